//! Expense-simulation components
//!
//! Each component is a pure function of the configuration and the shared
//! random generator, producing one trial table. The orchestrator invokes
//! registered components exactly once per run, in registration order; the
//! generator state advances across invocations, so that order is part of
//! the reproducibility contract.

use rand::rngs::SmallRng;

use crate::config::Config;
use crate::error::SimulationError;
use crate::model::TrialTable;

pub mod periodic;
pub mod variable;

pub use periodic::PeriodicExpenses;
pub use variable::DailyVariableExpenses;

/// A single expense-simulation capability
pub trait ExpenseComponent {
    /// Stable identifier used in errors and logs
    fn name(&self) -> &'static str;

    /// Produce a table with exactly `config.simulation.mc_trials` rows,
    /// drawing all randomness from the shared generator
    fn simulate(
        &self,
        config: &Config,
        rng: &mut SmallRng,
    ) -> Result<TrialTable, SimulationError>;
}
