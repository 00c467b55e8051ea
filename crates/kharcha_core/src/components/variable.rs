//! Correlated daily variable expenses
//!
//! Transport, food and social spends are drawn jointly from a 3-dimensional
//! multivariate normal so their configured correlations survive into the
//! simulated trials. The transport marginal comes from the analytical
//! commute model; food and social marginals come straight from
//! configuration.

use nalgebra::DVector;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, StandardNormal};

use crate::components::ExpenseComponent;
use crate::config::{Config, VARIABLE_CATEGORIES};
use crate::error::SimulationError;
use crate::model::TrialTable;
use crate::seasonality;
use crate::transport;

/// Simulates the `transport`, `food` and `social` columns
pub struct DailyVariableExpenses;

impl ExpenseComponent for DailyVariableExpenses {
    fn name(&self) -> &'static str {
        "daily_variable_expenses"
    }

    fn simulate(
        &self,
        config: &Config,
        rng: &mut SmallRng,
    ) -> Result<TrialTable, SimulationError> {
        let trials = config.simulation.mc_trials;
        let var = &config.variable_expenses;

        let (transport_mean, transport_std) = transport::daily_cost_moments(config)?;
        let means = [transport_mean, var.mean("food")?, var.mean("social")?];
        let stds = [transport_std, var.std("food")?, var.std("social")?];

        // Factor of the covariance matrix: cov = D*C*D = (D*L)(D*L)^T with
        // D = diag(stds) and L the Cholesky factor of the correlation
        // matrix C. Scaling rows of L by the stds stays valid even when the
        // derived transport std is zero, where factoring cov directly would
        // fail.
        let mut factor = var.correlation_factor()?;
        for i in 0..3 {
            for j in 0..3 {
                factor[(i, j)] *= stds[i];
            }
        }

        let mut columns = vec![vec![0.0f64; trials]; 3];
        let mut z = DVector::<f64>::zeros(3);
        let mut x = DVector::<f64>::zeros(3);
        for row in 0..trials {
            for k in 0..3 {
                z[k] = StandardNormal.sample(rng);
            }
            factor.mul_to(&z, &mut x);
            for k in 0..3 {
                // Clip to zero: expenses cannot be negative. This is an
                // intentional approximation that places an atom of
                // probability mass at zero instead of reshaping into a
                // truncated normal.
                columns[k][row] = (means[k] + x[k]).max(0.0);
            }
        }

        let multipliers = seasonality::multipliers_for(config.simulation.month);
        for value in &mut columns[1] {
            *value *= multipliers.food;
        }
        for value in &mut columns[2] {
            *value *= multipliers.social;
        }

        let mut table = TrialTable::new(trials);
        for (name, values) in VARIABLE_CATEGORIES.iter().zip(columns) {
            table.push_column(*name, values)?;
        }
        Ok(table)
    }
}
