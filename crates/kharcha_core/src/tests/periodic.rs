//! Tests for the periodic expense aggregator and its stochastic overlays

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::components::periodic::{PERIODIC_CATEGORIES, deterministic_daily_rates};
use crate::components::{ExpenseComponent, PeriodicExpenses};
use crate::tests::{mean, test_config};

#[test]
fn test_output_shape_and_columns() {
    let config = test_config(500);
    let mut rng = SmallRng::seed_from_u64(config.simulation.random_seed);

    let table = PeriodicExpenses.simulate(&config, &mut rng).unwrap();

    assert_eq!(table.rows(), 500);
    let names: Vec<&str> = table.column_names().collect();
    let expected: Vec<&str> = PERIODIC_CATEGORIES
        .iter()
        .copied()
        .chain(["hobbies"])
        .collect();
    assert_eq!(names, expected);
    for (name, values) in table.iter() {
        assert!(
            values.iter().all(|v| *v >= 0.0),
            "column {name:?} contains negative values"
        );
    }
}

/// The deterministic sub-totals are pure functions of configuration: two
/// calls must agree bit-for-bit.
#[test]
fn test_deterministic_rates_idempotent() {
    let mut config = test_config(10);
    config.periodic_expenses.subscriptions.internet_monthly = 649.0;
    config.periodic_expenses.household.groceries_monthly = 9_000.0;
    config.periodic_expenses.medical.health_checkup_yearly = 6_000.0;

    let first = deterministic_daily_rates(&config);
    let second = deterministic_daily_rates(&config);
    assert_eq!(first, second);
}

/// Hand-computed daily rates: monthly fields divide by days_in_month, the
/// 90-day mobile pack spreads over three months, yearly fields over
/// twelve, and gym memberships over 365.25 days directly.
#[test]
fn test_daily_rate_normalization() {
    let mut config = test_config(50);
    config.time.days_in_month = 30.0;
    config.periodic_expenses.memberships.gym_yearly = 3_652.5;
    config.periodic_expenses.subscriptions.internet_monthly = 300.0;
    config.periodic_expenses.subscriptions.mobile_90_days = 900.0;
    config.periodic_expenses.subscriptions.cloud_backup_yearly = 1_200.0;

    let rates = deterministic_daily_rates(&config);
    let rate_of = |name: &str| {
        rates
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| *r)
            .unwrap()
    };

    assert!((rate_of("memberships") - 10.0).abs() < 1e-9);
    // 300 + 900/3 + 1200/12 = 700 per month
    assert!((rate_of("subscriptions") - 700.0 / 30.0).abs() < 1e-9);
}

/// Festival months scale the household daily rate by 1.1; the other
/// deterministic categories are untouched.
#[test]
fn test_household_seasonality() {
    let mut config = test_config(50);
    config.periodic_expenses.household.rent_contribution_monthly = 12_000.0;
    config.periodic_expenses.medical.consumables_monthly = 600.0;

    config.simulation.month = Some(3);
    let march = deterministic_daily_rates(&config);
    config.simulation.month = Some(11);
    let november = deterministic_daily_rates(&config);

    let pick = |rates: &[(&str, f64)], name: &str| {
        rates.iter().find(|(n, _)| *n == name).unwrap().1
    };
    assert!(
        (pick(&november, "household") - pick(&march, "household") * 1.1).abs() < 1e-9,
        "household rate should carry the festival multiplier"
    );
    assert!(
        (pick(&november, "medical") - pick(&march, "medical")).abs() < 1e-12,
        "medical rate must not be seasonal"
    );
}

/// Scenario from the statistical contract: 4 cricket days in a 30-day
/// month with costs in [300, 500] gives a zero fraction near 1 - 4/30 and
/// a conditional mean near the midpoint.
#[test]
fn test_cricket_zero_fraction_and_range() {
    let mut config = test_config(10_000);
    config.time.days_in_month = 30.0;
    config.periodic_expenses.hobbies.cricket_days_per_month = 4.0;
    config.periodic_expenses.hobbies.cricket_cost_min = 300.0;
    config.periodic_expenses.hobbies.cricket_cost_max = 500.0;
    let mut rng = SmallRng::seed_from_u64(config.simulation.random_seed);

    let table = PeriodicExpenses.simulate(&config, &mut rng).unwrap();
    let hobbies = table.column("hobbies").unwrap();

    let zeros = hobbies.iter().filter(|v| **v == 0.0).count();
    let zero_fraction = zeros as f64 / hobbies.len() as f64;
    let expected = 1.0 - 4.0 / 30.0;
    assert!(
        (zero_fraction - expected).abs() < 0.01,
        "expected zero fraction near {expected:.4}, got {zero_fraction:.4}"
    );

    let outings: Vec<f64> = hobbies.iter().copied().filter(|v| *v > 0.0).collect();
    assert!(
        outings.iter().all(|v| (300.0..=500.0).contains(v)),
        "outing costs must stay inside the configured bounds"
    );
    let outing_mean = mean(&outings);
    assert!(
        (outing_mean - 400.0).abs() < 10.0,
        "expected outing mean near 400, got {outing_mean:.2}"
    );
}

#[test]
fn test_no_cricket_days_means_all_zero() {
    let mut config = test_config(1_000);
    config.periodic_expenses.hobbies.cricket_days_per_month = 0.0;
    let mut rng = SmallRng::seed_from_u64(1);

    let table = PeriodicExpenses.simulate(&config, &mut rng).unwrap();
    assert!(
        table.column("hobbies").unwrap().iter().all(|v| *v == 0.0),
        "no outings configured, the hobbies column must be all zero"
    );
}

/// The lognormal location parameter is chosen so the distribution's mean
/// (not its median) equals the configured monthly mean.
#[test]
fn test_maintenance_mean_convergence() {
    let mut config = test_config(100_000);
    config.time.days_in_month = 30.0;
    let prof = &mut config.periodic_expenses.professional_and_financial;
    prof.bike_maintenance_mean_monthly = 1_000.0;
    prof.bike_maintenance_sigma = 1.0;
    let mut rng = SmallRng::seed_from_u64(99);

    let table = PeriodicExpenses.simulate(&config, &mut rng).unwrap();
    let column = table.column("professional_and_financial").unwrap();

    // All other professional fields default to zero, so the column is the
    // daily-rated maintenance draw alone.
    let monthly: Vec<f64> = column.iter().map(|v| v * 30.0).collect();
    let empirical = mean(&monthly);
    assert!(
        (empirical - 1_000.0).abs() < 1_000.0 * 0.03,
        "expected monthly maintenance mean near 1000, got {empirical:.1}"
    );
}

/// A zero configured maintenance mean disables the overlay entirely,
/// leaving the deterministic broadcast value.
#[test]
fn test_maintenance_disabled_at_zero_mean() {
    let mut config = test_config(200);
    config.time.days_in_month = 30.0;
    let prof = &mut config.periodic_expenses.professional_and_financial;
    prof.bike_maintenance_mean_monthly = 0.0;
    prof.bank_charges_yearly = 360.0;
    let mut rng = SmallRng::seed_from_u64(5);

    let table = PeriodicExpenses.simulate(&config, &mut rng).unwrap();
    let column = table.column("professional_and_financial").unwrap();

    let expected = 360.0 / 12.0 / 30.0;
    assert!(
        column.iter().all(|v| (v - expected).abs() < 1e-12),
        "column should be the constant deterministic rate"
    );
}
