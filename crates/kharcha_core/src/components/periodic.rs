//! Periodic and semi-variable expenses
//!
//! The ~30 granular periodic cost inputs collapse deterministically into
//! eight daily-rate category columns, broadcast identically across trials.
//! Two stochastic overlays sit on top: a lognormal bike-maintenance cost
//! folded into `professional_and_financial`, and an event-based cricket
//! cost in its own `hobbies` column.

use rand::Rng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, LogNormal, Uniform};

use crate::components::ExpenseComponent;
use crate::config::Config;
use crate::error::SimulationError;
use crate::model::TrialTable;
use crate::seasonality;

/// Gym memberships bill yearly; spread over the true year length
const DAYS_PER_YEAR: f64 = 365.25;

/// The eight deterministic category columns, in output order
pub const PERIODIC_CATEGORIES: [&str; 8] = [
    "memberships",
    "subscriptions",
    "household",
    "family_support",
    "medical",
    "insurance_and_loans",
    "professional_and_financial",
    "miscellaneous",
];

/// Daily-rate scalars for the eight deterministic categories.
///
/// Pure function of configuration (the household rate includes the
/// month's seasonality multiplier); no hidden state, so repeated calls
/// with the same configuration return identical values.
pub fn deterministic_daily_rates(config: &Config) -> [(&'static str, f64); 8] {
    let p = &config.periodic_expenses;
    let days = config.time.days_in_month;
    let household_multiplier = seasonality::multipliers_for(config.simulation.month).household;

    [
        ("memberships", p.memberships.gym_yearly / DAYS_PER_YEAR),
        ("subscriptions", p.subscriptions.monthly_total() / days),
        (
            "household",
            p.household.monthly_total() * household_multiplier / days,
        ),
        ("family_support", p.family_support.monthly_total() / days),
        ("medical", p.medical.monthly_total() / days),
        (
            "insurance_and_loans",
            p.insurance_and_loans.monthly_total() / days,
        ),
        (
            "professional_and_financial",
            p.professional_and_financial.monthly_total() / days,
        ),
        ("miscellaneous", p.miscellaneous.monthly_total() / days),
    ]
}

/// Simulates the eight periodic categories plus the `hobbies` column
pub struct PeriodicExpenses;

impl ExpenseComponent for PeriodicExpenses {
    fn name(&self) -> &'static str {
        "periodic_expenses"
    }

    fn simulate(
        &self,
        config: &Config,
        rng: &mut SmallRng,
    ) -> Result<TrialTable, SimulationError> {
        let trials = config.simulation.mc_trials;
        let days = config.time.days_in_month;
        let mut table = TrialTable::new(trials);

        for (name, rate) in deterministic_daily_rates(config) {
            if name == "professional_and_financial" {
                table.push_column(name, with_maintenance_overlay(config, rng, rate)?)?;
            } else {
                table.push_broadcast_column(name, rate)?;
            }
        }

        table.push_column("hobbies", cricket_costs(config, rng)?)?;
        Ok(table)
    }
}

/// Add the lognormal monthly bike-maintenance draw, daily-rated, on top of
/// the deterministic professional/financial rate.
///
/// The location parameter is derived so the distribution's mean (not its
/// median) equals the configured mean: `mu = ln(mean) - sigma^2 / 2`.
/// A zero configured mean disables the overlay.
fn with_maintenance_overlay(
    config: &Config,
    rng: &mut SmallRng,
    base_rate: f64,
) -> Result<Vec<f64>, SimulationError> {
    let trials = config.simulation.mc_trials;
    let days = config.time.days_in_month;
    let prof = &config.periodic_expenses.professional_and_financial;

    let mut values = vec![base_rate; trials];
    if prof.bike_maintenance_mean_monthly > 0.0 {
        let sigma = prof.bike_maintenance_sigma;
        let mu = prof.bike_maintenance_mean_monthly.ln() - sigma * sigma / 2.0;
        let maintenance =
            LogNormal::new(mu, sigma).map_err(|_| SimulationError::InvalidDistribution {
                what: "bike maintenance lognormal",
                mean: prof.bike_maintenance_mean_monthly,
                sigma,
                reason: "sigma must be non-negative and finite",
            })?;
        for value in &mut values {
            *value += maintenance.sample(rng) / days;
        }
    }
    Ok(values)
}

/// Per-trial cricket cost: a Bernoulli event with probability
/// `cricket_days_per_month / days_in_month` gates a uniform cost draw.
/// Trials without an outing cost zero, giving the column its two-part
/// spike-at-zero distribution.
fn cricket_costs(config: &Config, rng: &mut SmallRng) -> Result<Vec<f64>, SimulationError> {
    let trials = config.simulation.mc_trials;
    let hobbies = &config.periodic_expenses.hobbies;
    let p_cricket = hobbies.cricket_days_per_month / config.time.days_in_month;

    let cost = Uniform::new_inclusive(hobbies.cricket_cost_min, hobbies.cricket_cost_max)
        .map_err(|_| SimulationError::InvalidDistribution {
            what: "cricket cost uniform",
            mean: hobbies.cricket_cost_min,
            sigma: hobbies.cricket_cost_max,
            reason: "cost bounds must be finite with min <= max",
        })?;

    let mut values = vec![0.0; trials];
    for value in &mut values {
        let outing = rng.random::<f64>() < p_cricket;
        let sampled = cost.sample(rng);
        if outing {
            *value = sampled;
        }
    }
    Ok(values)
}
