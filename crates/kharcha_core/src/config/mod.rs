//! Simulation configuration
//!
//! The main configuration type is `Config`, an immutable parameter tree
//! grouped by expense domain. It is deserialized once at process start
//! (the CLI crate reads it from YAML) and validated with
//! [`Config::validate`] before any sampling begins.
//!
//! # Conceptual Organization
//!
//! **Run controls**:
//! - `simulation` - trial count, seed, explicit simulation month
//! - `time` - calendar constants used for daily-rate normalization
//!
//! **Statistical assumptions**:
//! - `transport` - the five-way commute-choice model
//! - `variable_expenses` - marginals and correlations of the daily spends
//!
//! **Periodic costs**:
//! - `periodic_expenses` - nine sub-category groups of fixed and
//!   semi-variable costs
//!
//! **Reporting inputs** (never read by the engine):
//! - `financials`, `investment_profiles`

use std::collections::HashMap;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::transport::CommuteProbabilities;

/// Column order of the correlated variable-expense block. The correlation
/// matrix rows/columns follow this order.
pub const VARIABLE_CATEGORIES: [&str; 3] = ["transport", "food", "social"];

fn default_mc_trials() -> usize {
    200_000
}

fn default_random_seed() -> u64 {
    42
}

fn default_days_in_month() -> f64 {
    30.4375
}

fn default_workdays_per_month() -> f64 {
    22.0
}

fn default_investment_profile() -> String {
    "Balanced".to_string()
}

/// Monte Carlo run controls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of simulated trials (rows of the result table)
    #[serde(default = "default_mc_trials")]
    pub mc_trials: usize,

    /// Seed for the shared generator; identical seeds reproduce runs
    /// bit-for-bit
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,

    /// Calendar month (1-12) driving seasonality multipliers. The engine
    /// never reads the wall clock; when this is `None` no seasonality
    /// adjustment is applied. The CLI fills it from the current date when
    /// the configuration file leaves it out.
    pub month: Option<i8>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            mc_trials: default_mc_trials(),
            random_seed: default_random_seed(),
            month: None,
        }
    }
}

/// Calendar constants used to normalize periodic costs to daily rates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSettings {
    #[serde(default = "default_days_in_month")]
    pub days_in_month: f64,
    #[serde(default = "default_workdays_per_month")]
    pub workdays_per_month: f64,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            days_in_month: default_days_in_month(),
            workdays_per_month: default_workdays_per_month(),
        }
    }
}

/// Investable-surplus settings, consumed only by the reporting layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialSettings {
    pub monthly_investable_amount: f64,
    #[serde(default = "default_investment_profile")]
    pub active_investment_profile: String,
}

impl Default for FinancialSettings {
    fn default() -> Self {
        Self {
            monthly_investable_amount: 0.0,
            active_investment_profile: default_investment_profile(),
        }
    }
}

/// Parameters of the five-way commute-choice model.
///
/// Frequencies are per-month; the derived choice probabilities must form a
/// proper probability vector (validated, never silently clamped).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSettings {
    pub bike_days_per_month: f64,
    pub hitch_days_per_month: f64,
    /// Fraction of hitched days where both legs are hitched
    pub hitch_two_way_frac: f64,
    /// Probability of a rare paid ride replacing a hitched leg
    pub rare_hitch_rapido_prob: f64,
    pub office_oneway_km: f64,
    pub gym_oneway_km: f64,
    pub bike_kmpl: f64,
    pub petrol_price_rs_per_l: f64,
    pub metro_one_way_rs: f64,
    pub rare_rapido_rs: f64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            bike_days_per_month: 2.0,
            hitch_days_per_month: 8.0,
            hitch_two_way_frac: 0.6,
            rare_hitch_rapido_prob: 0.05,
            office_oneway_km: 16.0,
            gym_oneway_km: 1.0,
            bike_kmpl: 45.0,
            petrol_price_rs_per_l: 109.5,
            metro_one_way_rs: 50.0,
            rare_rapido_rs: 120.0,
        }
    }
}

/// Marginal statistics and correlation structure of the daily variable
/// expenses. `means`/`stds` carry the `food` and `social` entries; the
/// transport marginal is derived analytically from [`TransportSettings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableExpenseSettings {
    pub means: HashMap<String, f64>,
    pub stds: HashMap<String, f64>,
    /// 3x3, ordered as [`VARIABLE_CATEGORIES`]
    pub correlation_matrix: Vec<Vec<f64>>,
}

impl Default for VariableExpenseSettings {
    fn default() -> Self {
        Self {
            means: HashMap::from([("food".to_string(), 350.0), ("social".to_string(), 180.0)]),
            stds: HashMap::from([("food".to_string(), 120.0), ("social".to_string(), 140.0)]),
            correlation_matrix: vec![
                vec![1.0, 0.15, 0.10],
                vec![0.15, 1.0, 0.35],
                vec![0.10, 0.35, 1.0],
            ],
        }
    }
}

impl VariableExpenseSettings {
    pub fn mean(&self, category: &'static str) -> Result<f64, ConfigError> {
        self.means
            .get(category)
            .copied()
            .ok_or(ConfigError::MissingMarginal {
                table: "means",
                category,
            })
    }

    pub fn std(&self, category: &'static str) -> Result<f64, ConfigError> {
        self.stds
            .get(category)
            .copied()
            .ok_or(ConfigError::MissingMarginal {
                table: "stds",
                category,
            })
    }

    /// Lower Cholesky factor of the correlation matrix.
    ///
    /// This is the factor the sampler scales by the marginal stds, so
    /// validation and sampling agree on what "valid" means: a matrix this
    /// factorization rejects cannot be sampled from.
    pub(crate) fn correlation_factor(&self) -> Result<DMatrix<f64>, ConfigError> {
        let m = DMatrix::from_fn(3, 3, |i, j| self.correlation_matrix[i][j]);
        m.cholesky()
            .map(|c| c.l())
            .ok_or(ConfigError::CorrelationNotPositiveDefinite)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for category in ["food", "social"] {
            let mean = self.mean(category)?;
            if mean < 0.0 {
                return Err(ConfigError::NegativeField {
                    field: "variable_expenses.means",
                    value: mean,
                });
            }
            let std = self.std(category)?;
            if std <= 0.0 {
                return Err(ConfigError::NonPositiveStd {
                    category: category.to_string(),
                    value: std,
                });
            }
        }

        let n = VARIABLE_CATEGORIES.len();
        let widths: Vec<usize> = self.correlation_matrix.iter().map(Vec::len).collect();
        if self.correlation_matrix.len() != n || widths.iter().any(|&w| w != n) {
            return Err(ConfigError::CorrelationShape {
                rows: self.correlation_matrix.len(),
                cols: widths,
            });
        }
        for i in 0..n {
            let diag = self.correlation_matrix[i][i];
            if (diag - 1.0).abs() > 1e-9 {
                return Err(ConfigError::CorrelationDiagonal {
                    index: i,
                    value: diag,
                });
            }
            for j in 0..n {
                let v = self.correlation_matrix[i][j];
                if !(-1.0..=1.0).contains(&v) {
                    return Err(ConfigError::CorrelationOutOfRange {
                        row: i,
                        col: j,
                        value: v,
                    });
                }
                if (v - self.correlation_matrix[j][i]).abs() > 1e-9 {
                    return Err(ConfigError::CorrelationAsymmetric { row: i, col: j });
                }
            }
        }

        self.correlation_factor().map(|_| ())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MembershipSettings {
    pub gym_yearly: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionSettings {
    pub internet_monthly: f64,
    pub mobile_90_days: f64,
    pub google_one_monthly: f64,
    pub spotify_monthly: f64,
    pub cloud_backup_yearly: f64,
    pub antivirus_yearly: f64,
    pub news_monthly: f64,
    pub other_apps_monthly: f64,
}

impl SubscriptionSettings {
    /// Collapse to a single monthly figure; the 90-day mobile pack is
    /// spread over its three months, yearly fields over twelve.
    pub fn monthly_total(&self) -> f64 {
        self.internet_monthly
            + self.mobile_90_days / 3.0
            + self.google_one_monthly
            + self.spotify_monthly
            + self.news_monthly
            + self.other_apps_monthly
            + self.cloud_backup_yearly / 12.0
            + self.antivirus_yearly / 12.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdSettings {
    pub rent_contribution_monthly: f64,
    pub society_maintenance_monthly: f64,
    pub groceries_monthly: f64,
    pub utilities_monthly: f64,
    pub emergency_repair_fund_monthly: f64,
    pub appliance_replacement_fund_monthly: f64,
    pub wfh_equipment_fund_monthly: f64,
    pub seasonal_clothing_yearly: f64,
}

impl HouseholdSettings {
    pub fn monthly_total(&self) -> f64 {
        self.rent_contribution_monthly
            + self.society_maintenance_monthly
            + self.groceries_monthly
            + self.utilities_monthly
            + self.emergency_repair_fund_monthly
            + self.appliance_replacement_fund_monthly
            + self.wfh_equipment_fund_monthly
            + self.seasonal_clothing_yearly / 12.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilySupportSettings {
    pub child_elder_care_monthly: f64,
    pub caregiver_wages_monthly: f64,
    pub school_tuition_monthly: f64,
    pub education_fund_monthly: f64,
}

impl FamilySupportSettings {
    pub fn monthly_total(&self) -> f64 {
        self.child_elder_care_monthly
            + self.caregiver_wages_monthly
            + self.school_tuition_monthly
            + self.education_fund_monthly
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalSettings {
    pub consumables_monthly: f64,
    pub specialist_consultations_yearly: f64,
    pub dental_procedures_yearly: f64,
    pub optical_costs_yearly: f64,
    pub long_term_meds_monthly: f64,
    pub emergency_buffer_yearly: f64,
    pub health_checkup_yearly: f64,
}

impl MedicalSettings {
    pub fn monthly_total(&self) -> f64 {
        self.consumables_monthly
            + self.long_term_meds_monthly
            + (self.specialist_consultations_yearly
                + self.dental_procedures_yearly
                + self.optical_costs_yearly
                + self.emergency_buffer_yearly
                + self.health_checkup_yearly)
                / 12.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceAndLoanSettings {
    pub life_insurance_yearly: f64,
    pub hospitalization_copay_yearly: f64,
    pub loan_emi_monthly: f64,
    pub credit_card_payment_monthly: f64,
}

impl InsuranceAndLoanSettings {
    pub fn monthly_total(&self) -> f64 {
        self.loan_emi_monthly
            + self.credit_card_payment_monthly
            + (self.life_insurance_yearly + self.hospitalization_copay_yearly) / 12.0
    }
}

/// Professional and financial overheads. The deterministic yearly fees are
/// collapsed by [`monthly_total`](Self::monthly_total); bike maintenance is
/// a lognormal overlay handled by the periodic component, not part of the
/// deterministic total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionalAndFinancialSettings {
    pub income_tax_provision_yearly: f64,
    pub bank_charges_yearly: f64,
    pub investment_platform_fees_yearly: f64,
    pub advisory_fees_yearly: f64,
    pub legal_services_yearly: f64,
    pub professional_license_yearly: f64,
    pub tax_filing_assistance_yearly: f64,
    /// Mean (not median) of the lognormal monthly maintenance cost;
    /// zero disables the overlay
    pub bike_maintenance_mean_monthly: f64,
    /// Lognormal shape parameter
    pub bike_maintenance_sigma: f64,
}

impl Default for ProfessionalAndFinancialSettings {
    fn default() -> Self {
        Self {
            income_tax_provision_yearly: 0.0,
            bank_charges_yearly: 0.0,
            investment_platform_fees_yearly: 0.0,
            advisory_fees_yearly: 0.0,
            legal_services_yearly: 0.0,
            professional_license_yearly: 0.0,
            tax_filing_assistance_yearly: 0.0,
            bike_maintenance_mean_monthly: 0.0,
            bike_maintenance_sigma: 1.0,
        }
    }
}

impl ProfessionalAndFinancialSettings {
    pub fn monthly_total(&self) -> f64 {
        (self.income_tax_provision_yearly
            + self.bank_charges_yearly
            + self.investment_platform_fees_yearly
            + self.advisory_fees_yearly
            + self.legal_services_yearly
            + self.professional_license_yearly
            + self.tax_filing_assistance_yearly)
            / 12.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MiscellaneousSettings {
    pub gifts_and_occasions_yearly: f64,
    pub donations_monthly: f64,
    pub pet_care_monthly: f64,
    pub inflation_buffer_monthly: f64,
}

impl MiscellaneousSettings {
    pub fn monthly_total(&self) -> f64 {
        self.donations_monthly
            + self.pet_care_monthly
            + self.inflation_buffer_monthly
            + self.gifts_and_occasions_yearly / 12.0
    }
}

/// Event-based hobby outings (cricket): a Bernoulli day-gate with a
/// uniform cost draw when the outing happens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HobbySettings {
    pub cricket_days_per_month: f64,
    pub cricket_cost_min: f64,
    pub cricket_cost_max: f64,
}

impl Default for HobbySettings {
    fn default() -> Self {
        Self {
            cricket_days_per_month: 2.0,
            cricket_cost_min: 300.0,
            cricket_cost_max: 500.0,
        }
    }
}

/// A unified, nested group for all periodic, fixed, or semi-variable
/// expenses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodicExpenseSettings {
    pub memberships: MembershipSettings,
    pub subscriptions: SubscriptionSettings,
    pub household: HouseholdSettings,
    pub family_support: FamilySupportSettings,
    pub medical: MedicalSettings,
    pub insurance_and_loans: InsuranceAndLoanSettings,
    pub professional_and_financial: ProfessionalAndFinancialSettings,
    pub miscellaneous: MiscellaneousSettings,
    pub hobbies: HobbySettings,
}

/// Complete simulation configuration
///
/// Constructed once from external input (the CLI deserializes it from
/// YAML), validated with [`validate`](Self::validate), read-only thereafter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationSettings,
    pub time: TimeSettings,
    pub financials: FinancialSettings,
    pub transport: TransportSettings,
    pub variable_expenses: VariableExpenseSettings,
    pub periodic_expenses: PeriodicExpenseSettings,
    /// Named allocation profiles, asset class -> fraction. Read by the
    /// reporting layer only.
    pub investment_profiles: HashMap<String, HashMap<String, f64>>,
}

impl Config {
    /// Check every invariant the sampling code relies on. Called by the
    /// orchestrator before any draw; invalid input is rejected with a
    /// single descriptive error, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.mc_trials == 0 {
            return Err(ConfigError::NoTrials);
        }
        if self.time.days_in_month <= 0.0 {
            return Err(ConfigError::NonPositiveDaysInMonth(self.time.days_in_month));
        }
        if self.time.workdays_per_month > self.time.days_in_month {
            return Err(ConfigError::WorkdaysExceedMonth {
                workdays: self.time.workdays_per_month,
                days_in_month: self.time.days_in_month,
            });
        }
        if let Some(month) = self.simulation.month
            && !(1..=12).contains(&month)
        {
            return Err(ConfigError::MonthOutOfRange(month));
        }

        let t = &self.transport;
        let p = &self.periodic_expenses;
        let non_negative: &[(&'static str, f64)] = &[
            ("time.workdays_per_month", self.time.workdays_per_month),
            (
                "financials.monthly_investable_amount",
                self.financials.monthly_investable_amount,
            ),
            ("transport.bike_days_per_month", t.bike_days_per_month),
            ("transport.hitch_days_per_month", t.hitch_days_per_month),
            ("transport.office_oneway_km", t.office_oneway_km),
            ("transport.gym_oneway_km", t.gym_oneway_km),
            ("transport.petrol_price_rs_per_l", t.petrol_price_rs_per_l),
            ("transport.metro_one_way_rs", t.metro_one_way_rs),
            ("transport.rare_rapido_rs", t.rare_rapido_rs),
            ("memberships.gym_yearly", p.memberships.gym_yearly),
            (
                "subscriptions.internet_monthly",
                p.subscriptions.internet_monthly,
            ),
            ("subscriptions.mobile_90_days", p.subscriptions.mobile_90_days),
            (
                "subscriptions.google_one_monthly",
                p.subscriptions.google_one_monthly,
            ),
            (
                "subscriptions.spotify_monthly",
                p.subscriptions.spotify_monthly,
            ),
            (
                "subscriptions.cloud_backup_yearly",
                p.subscriptions.cloud_backup_yearly,
            ),
            (
                "subscriptions.antivirus_yearly",
                p.subscriptions.antivirus_yearly,
            ),
            ("subscriptions.news_monthly", p.subscriptions.news_monthly),
            (
                "subscriptions.other_apps_monthly",
                p.subscriptions.other_apps_monthly,
            ),
            (
                "household.rent_contribution_monthly",
                p.household.rent_contribution_monthly,
            ),
            (
                "household.society_maintenance_monthly",
                p.household.society_maintenance_monthly,
            ),
            ("household.groceries_monthly", p.household.groceries_monthly),
            ("household.utilities_monthly", p.household.utilities_monthly),
            (
                "household.emergency_repair_fund_monthly",
                p.household.emergency_repair_fund_monthly,
            ),
            (
                "household.appliance_replacement_fund_monthly",
                p.household.appliance_replacement_fund_monthly,
            ),
            (
                "household.wfh_equipment_fund_monthly",
                p.household.wfh_equipment_fund_monthly,
            ),
            (
                "household.seasonal_clothing_yearly",
                p.household.seasonal_clothing_yearly,
            ),
            (
                "family_support.child_elder_care_monthly",
                p.family_support.child_elder_care_monthly,
            ),
            (
                "family_support.caregiver_wages_monthly",
                p.family_support.caregiver_wages_monthly,
            ),
            (
                "family_support.school_tuition_monthly",
                p.family_support.school_tuition_monthly,
            ),
            (
                "family_support.education_fund_monthly",
                p.family_support.education_fund_monthly,
            ),
            ("medical.consumables_monthly", p.medical.consumables_monthly),
            (
                "medical.specialist_consultations_yearly",
                p.medical.specialist_consultations_yearly,
            ),
            (
                "medical.dental_procedures_yearly",
                p.medical.dental_procedures_yearly,
            ),
            ("medical.optical_costs_yearly", p.medical.optical_costs_yearly),
            (
                "medical.long_term_meds_monthly",
                p.medical.long_term_meds_monthly,
            ),
            (
                "medical.emergency_buffer_yearly",
                p.medical.emergency_buffer_yearly,
            ),
            (
                "medical.health_checkup_yearly",
                p.medical.health_checkup_yearly,
            ),
            (
                "insurance_and_loans.life_insurance_yearly",
                p.insurance_and_loans.life_insurance_yearly,
            ),
            (
                "insurance_and_loans.hospitalization_copay_yearly",
                p.insurance_and_loans.hospitalization_copay_yearly,
            ),
            (
                "insurance_and_loans.loan_emi_monthly",
                p.insurance_and_loans.loan_emi_monthly,
            ),
            (
                "insurance_and_loans.credit_card_payment_monthly",
                p.insurance_and_loans.credit_card_payment_monthly,
            ),
            (
                "professional_and_financial.income_tax_provision_yearly",
                p.professional_and_financial.income_tax_provision_yearly,
            ),
            (
                "professional_and_financial.bank_charges_yearly",
                p.professional_and_financial.bank_charges_yearly,
            ),
            (
                "professional_and_financial.investment_platform_fees_yearly",
                p.professional_and_financial.investment_platform_fees_yearly,
            ),
            (
                "professional_and_financial.advisory_fees_yearly",
                p.professional_and_financial.advisory_fees_yearly,
            ),
            (
                "professional_and_financial.legal_services_yearly",
                p.professional_and_financial.legal_services_yearly,
            ),
            (
                "professional_and_financial.professional_license_yearly",
                p.professional_and_financial.professional_license_yearly,
            ),
            (
                "professional_and_financial.tax_filing_assistance_yearly",
                p.professional_and_financial.tax_filing_assistance_yearly,
            ),
            (
                "professional_and_financial.bike_maintenance_mean_monthly",
                p.professional_and_financial.bike_maintenance_mean_monthly,
            ),
            (
                "professional_and_financial.bike_maintenance_sigma",
                p.professional_and_financial.bike_maintenance_sigma,
            ),
            (
                "miscellaneous.gifts_and_occasions_yearly",
                p.miscellaneous.gifts_and_occasions_yearly,
            ),
            (
                "miscellaneous.donations_monthly",
                p.miscellaneous.donations_monthly,
            ),
            ("miscellaneous.pet_care_monthly", p.miscellaneous.pet_care_monthly),
            (
                "miscellaneous.inflation_buffer_monthly",
                p.miscellaneous.inflation_buffer_monthly,
            ),
            (
                "hobbies.cricket_days_per_month",
                p.hobbies.cricket_days_per_month,
            ),
            ("hobbies.cricket_cost_min", p.hobbies.cricket_cost_min),
            ("hobbies.cricket_cost_max", p.hobbies.cricket_cost_max),
        ];
        for &(field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::NegativeField { field, value });
            }
        }

        for &(field, value) in &[
            ("transport.hitch_two_way_frac", t.hitch_two_way_frac),
            ("transport.rare_hitch_rapido_prob", t.rare_hitch_rapido_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FractionOutOfRange { field, value });
            }
        }
        if t.bike_kmpl <= 0.0 {
            return Err(ConfigError::NonPositiveField {
                field: "transport.bike_kmpl",
                value: t.bike_kmpl,
            });
        }

        if p.hobbies.cricket_cost_min > p.hobbies.cricket_cost_max {
            return Err(ConfigError::CricketCostRange {
                min: p.hobbies.cricket_cost_min,
                max: p.hobbies.cricket_cost_max,
            });
        }
        if p.hobbies.cricket_days_per_month > self.time.days_in_month {
            return Err(ConfigError::FractionOutOfRange {
                field: "hobbies.cricket_days_per_month / days_in_month",
                value: p.hobbies.cricket_days_per_month / self.time.days_in_month,
            });
        }

        self.variable_expenses.validate()?;

        // Derives all five commute probabilities, rejecting a negative
        // metro residual or any other out-of-range choice.
        CommuteProbabilities::from_config(self).map(|_| ())
    }
}
