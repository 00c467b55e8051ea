//! Simulation orchestrator
//!
//! `ExpenseModel` owns the seeded generator and an ordered registry of
//! expense components. A run invokes every component exactly once, in
//! registration order, and concatenates their column blocks into one
//! trial-by-category table.
//!
//! The generator state advances monotonically across component
//! invocations, so output is order-dependent by design: identical seed,
//! identical registration order and identical configuration reproduce the
//! table bit-for-bit.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::components::{DailyVariableExpenses, ExpenseComponent, PeriodicExpenses};
use crate::config::Config;
use crate::error::{ConfigError, SimulationError};
use crate::model::TrialTable;

pub struct ExpenseModel {
    config: Config,
    rng: SmallRng,
    components: Vec<Box<dyn ExpenseComponent>>,
}

impl ExpenseModel {
    /// Validate the configuration and seed the shared generator. The
    /// registry starts empty; register components before calling `run`.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = SmallRng::seed_from_u64(config.simulation.random_seed);
        Ok(Self {
            config,
            rng,
            components: Vec::new(),
        })
    }

    /// A model with the standard registration order: daily variable
    /// expenses first, then periodic expenses.
    pub fn with_default_components(config: Config) -> Result<Self, ConfigError> {
        let mut model = Self::new(config)?;
        model.register(Box::new(DailyVariableExpenses));
        model.register(Box::new(PeriodicExpenses));
        Ok(model)
    }

    /// Append a component to the registry. Components run in registration
    /// order.
    pub fn register(&mut self, component: Box<dyn ExpenseComponent>) {
        self.components.push(component);
    }

    /// Names of the registered components, in invocation order
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Invoke every registered component once and concatenate their
    /// outputs. Fails fast on an empty registry, on a component whose row
    /// count mismatches the configured trial count, and on duplicate
    /// column names across components.
    pub fn run(&mut self) -> Result<TrialTable, SimulationError> {
        if self.components.is_empty() {
            return Err(SimulationError::EmptyRegistry);
        }

        let trials = self.config.simulation.mc_trials;
        let mut table = TrialTable::new(trials);
        for component in &self.components {
            let block = component.simulate(&self.config, &mut self.rng)?;
            if block.rows() != trials {
                return Err(SimulationError::ComponentRowCount {
                    component: component.name(),
                    expected: trials,
                    actual: block.rows(),
                });
            }
            table = table.hconcat(block)?;
        }
        Ok(table)
    }
}
