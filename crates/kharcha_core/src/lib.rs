//! Personal-expense Monte Carlo simulation library
//!
//! This crate draws a large number of simulated daily-expense outcomes from a
//! set of statistical assumptions and returns them as a trial-by-category
//! table. It supports:
//! - An analytical commute-cost model over five mutually exclusive choices
//! - Correlated multivariate sampling of daily variable expenses
//!   (transport, food, social)
//! - Deterministic daily-rate aggregation of periodic costs with lognormal
//!   and event-based stochastic overlays
//! - Month-driven seasonality multipliers
//! - A seeded, ordered component registry for bit-reproducible runs
//!
//! # Example
//!
//! ```ignore
//! use kharcha_core::config::Config;
//! use kharcha_core::engine::ExpenseModel;
//!
//! let config = Config::default();
//! let mut model = ExpenseModel::with_default_components(config)?;
//! let table = model.run()?;
//! let summary = kharcha_core::model::SimulationSummary::from_table(&table);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod components;
pub mod engine;
pub mod error;
pub mod seasonality;
pub mod transport;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use components::{DailyVariableExpenses, ExpenseComponent, PeriodicExpenses};
pub use config::Config;
pub use engine::ExpenseModel;
pub use error::{ConfigError, SimulationError, TableError};
pub use model::{SimulationSummary, TrialTable};
