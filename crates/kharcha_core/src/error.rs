use std::fmt;

/// Errors raised while validating a configuration, before any sampling
/// begins. Every variant names the offending field and value so the failure
/// is actionable from the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `mc_trials` must be strictly positive
    NoTrials,
    NonPositiveDaysInMonth(f64),
    WorkdaysExceedMonth {
        workdays: f64,
        days_in_month: f64,
    },
    /// A rate, cost or count field holds a negative value
    NegativeField {
        field: &'static str,
        value: f64,
    },
    /// A divisor field must be strictly positive
    NonPositiveField {
        field: &'static str,
        value: f64,
    },
    /// A fraction/probability field lies outside [0, 1]
    FractionOutOfRange {
        field: &'static str,
        value: f64,
    },
    /// `variable_expenses.means`/`stds` is missing a required category
    MissingMarginal {
        table: &'static str,
        category: &'static str,
    },
    NonPositiveStd {
        category: String,
        value: f64,
    },
    CorrelationShape {
        rows: usize,
        cols: Vec<usize>,
    },
    CorrelationAsymmetric {
        row: usize,
        col: usize,
    },
    CorrelationDiagonal {
        index: usize,
        value: f64,
    },
    CorrelationOutOfRange {
        row: usize,
        col: usize,
        value: f64,
    },
    /// The correlation matrix admits no Cholesky factor, so multivariate
    /// normal sampling is ill-defined
    CorrelationNotPositiveDefinite,
    /// A derived commute-choice probability fell outside [0, 1]; the five
    /// choices must form a proper probability vector
    CommuteProbabilityOutOfRange {
        choice: &'static str,
        value: f64,
    },
    MonthOutOfRange(i8),
    CricketCostRange {
        min: f64,
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoTrials => write!(f, "simulation.mc_trials must be greater than zero"),
            ConfigError::NonPositiveDaysInMonth(v) => {
                write!(f, "time.days_in_month must be positive, got {v}")
            }
            ConfigError::WorkdaysExceedMonth {
                workdays,
                days_in_month,
            } => write!(
                f,
                "time.workdays_per_month ({workdays}) exceeds days_in_month ({days_in_month})"
            ),
            ConfigError::NegativeField { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
            ConfigError::NonPositiveField { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ConfigError::FractionOutOfRange { field, value } => {
                write!(f, "{field} must lie in [0, 1], got {value}")
            }
            ConfigError::MissingMarginal { table, category } => {
                write!(f, "variable_expenses.{table} is missing entry {category:?}")
            }
            ConfigError::NonPositiveStd { category, value } => write!(
                f,
                "variable_expenses.stds[{category:?}] must be positive, got {value}"
            ),
            ConfigError::CorrelationShape { rows, cols } => write!(
                f,
                "correlation_matrix must be 3x3, got {rows} rows with widths {cols:?}"
            ),
            ConfigError::CorrelationAsymmetric { row, col } => write!(
                f,
                "correlation_matrix must be symmetric, entries ({row},{col}) and ({col},{row}) differ"
            ),
            ConfigError::CorrelationDiagonal { index, value } => write!(
                f,
                "correlation_matrix diagonal entry ({index},{index}) must be 1.0, got {value}"
            ),
            ConfigError::CorrelationOutOfRange { row, col, value } => write!(
                f,
                "correlation_matrix entry ({row},{col}) must lie in [-1, 1], got {value}"
            ),
            ConfigError::CorrelationNotPositiveDefinite => {
                write!(f, "correlation_matrix is not positive definite")
            }
            ConfigError::CommuteProbabilityOutOfRange { choice, value } => write!(
                f,
                "derived probability for commute choice {choice:?} is {value:.4}; \
                 transport frequencies must leave every choice in [0, 1]"
            ),
            ConfigError::MonthOutOfRange(m) => {
                write!(f, "simulation.month must lie in 1..=12, got {m}")
            }
            ConfigError::CricketCostRange { min, max } => write!(
                f,
                "hobbies.cricket_cost_min ({min}) exceeds cricket_cost_max ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors related to trial-table construction
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    DuplicateColumn(String),
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::DuplicateColumn(name) => {
                write!(f, "column {name:?} already exists in the trial table")
            }
            TableError::ColumnLengthMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "column {column:?} has {actual} rows, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for TableError {}

/// Errors raised while running the simulation itself
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// `run` was called with no registered components
    EmptyRegistry,
    /// A component returned a table whose row count does not match the
    /// configured trial count
    ComponentRowCount {
        component: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A stochastic overlay could not construct its sampling distribution
    InvalidDistribution {
        what: &'static str,
        mean: f64,
        sigma: f64,
        reason: &'static str,
    },
    Config(ConfigError),
    Table(TableError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::EmptyRegistry => {
                write!(f, "no expense components have been registered")
            }
            SimulationError::ComponentRowCount {
                component,
                expected,
                actual,
            } => write!(
                f,
                "component {component:?} produced {actual} trials, expected {expected}"
            ),
            SimulationError::InvalidDistribution {
                what,
                mean,
                sigma,
                reason,
            } => write!(
                f,
                "invalid {what} parameters (mean={mean}, sigma={sigma}): {reason}"
            ),
            SimulationError::Config(e) => write!(f, "{e}"),
            SimulationError::Table(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            SimulationError::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}

impl From<TableError> for SimulationError {
    fn from(e: TableError) -> Self {
        SimulationError::Table(e)
    }
}
