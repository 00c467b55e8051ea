//! Analytical commute-cost model
//!
//! Daily transport cost is modeled as a discrete mixture over five mutually
//! exclusive commute choices. The mixture's mean and standard deviation are
//! derived in closed form and feed the correlated variable-expense sampler
//! as its transport marginal.

use crate::config::Config;
use crate::error::ConfigError;

/// Number of mutually exclusive commute choices
pub const COMMUTE_CHOICES: usize = 5;

/// Probabilities of the five commute choices, derived from monthly
/// frequencies. Collectively exhaustive: metro absorbs whatever probability
/// mass the explicit choices leave over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommuteProbabilities {
    /// Own bike, fuel cost only
    pub bike: f64,
    /// Both legs hitched, no fare
    pub hitch_two_way: f64,
    /// One leg hitched, the other by metro
    pub hitch_one_way: f64,
    /// Rare paid ride replacing a hitched leg
    pub rare_rapido: f64,
    /// Metro both ways (the residual choice)
    pub metro: f64,
}

impl CommuteProbabilities {
    /// Derive the probability vector from configuration.
    ///
    /// A configuration whose explicit choices sum past 1 would leave the
    /// metro residual negative; that is rejected here rather than letting a
    /// negative probability leak into the moment computation.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let t = &config.transport;
        let days = config.time.days_in_month;

        let bike = t.bike_days_per_month / days;
        let hitch_any = t.hitch_days_per_month / days;
        let hitch_two_way = hitch_any * t.hitch_two_way_frac;
        let rare_rapido = t.rare_hitch_rapido_prob;
        let hitch_one_way = hitch_any - hitch_two_way - rare_rapido;
        let metro = 1.0 - (bike + hitch_two_way + hitch_one_way + rare_rapido);

        let derived = Self {
            bike,
            hitch_two_way,
            hitch_one_way,
            rare_rapido,
            metro,
        };
        for (choice, value) in derived.named() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::CommuteProbabilityOutOfRange { choice, value });
            }
        }
        Ok(derived)
    }

    /// Choice order used throughout the moment computation
    pub fn as_array(&self) -> [f64; COMMUTE_CHOICES] {
        [
            self.bike,
            self.hitch_two_way,
            self.hitch_one_way,
            self.rare_rapido,
            self.metro,
        ]
    }

    fn named(&self) -> [(&'static str, f64); COMMUTE_CHOICES] {
        [
            ("bike", self.bike),
            ("hitch_two_way", self.hitch_two_way),
            ("hitch_one_way", self.hitch_one_way),
            ("rare_rapido", self.rare_rapido),
            ("metro", self.metro),
        ]
    }
}

/// Expected cost of a day under each commute choice, workday-scaled.
///
/// Fuel covers the office round trip on bike days plus the gym round trip
/// under every choice; fares cover the metro/rapido legs of the non-bike
/// choices. Costs accrue only on workdays, hence the `p_workday` scaling.
fn choice_costs(config: &Config) -> [f64; COMMUTE_CHOICES] {
    let t = &config.transport;
    let p_workday = config.time.workdays_per_month / config.time.days_in_month;

    let gym_km = t.gym_oneway_km * 2.0;
    let km = [
        t.office_oneway_km * 2.0 + gym_km,
        gym_km,
        gym_km,
        gym_km,
        gym_km,
    ];
    let fares = [
        0.0,
        0.0,
        t.metro_one_way_rs,
        t.rare_rapido_rs,
        t.metro_one_way_rs * 2.0,
    ];

    let mut costs = [0.0; COMMUTE_CHOICES];
    for i in 0..COMMUTE_CHOICES {
        let fuel = km[i] * p_workday / t.bike_kmpl * t.petrol_price_rs_per_l;
        costs[i] = fuel + fares[i] * p_workday;
    }
    costs
}

/// Mean and standard deviation of daily transport cost.
///
/// Population-style moments of the categorical mixture: the variance is the
/// probability-weighted spread of the per-choice costs around the mean,
/// with no sample correction.
pub fn daily_cost_moments(config: &Config) -> Result<(f64, f64), ConfigError> {
    let probs = CommuteProbabilities::from_config(config)?.as_array();
    let costs = choice_costs(config);

    let mean: f64 = probs
        .iter()
        .zip(costs.iter())
        .map(|(p, c)| p * c)
        .sum();
    let variance: f64 = probs
        .iter()
        .zip(costs.iter())
        .map(|(p, c)| p * (c - mean).powi(2))
        .sum();

    Ok((mean, variance.sqrt()))
}
