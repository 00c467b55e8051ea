//! Summary statistics over a trial table
//!
//! Computed once after a run so the reporting layer never re-derives
//! statistics from raw trials.

use crate::model::TrialTable;

/// Distribution summary of a single column (or of the row totals)
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p5: f64,
    pub median: f64,
    pub p95: f64,
}

impl ColumnSummary {
    fn from_values(name: &str, values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                name: name.to_string(),
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                p5: 0.0,
                median: 0.0,
                p95: 0.0,
            };
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = if values.len() > 1 {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
        } else {
            0.0
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Self {
            name: name.to_string(),
            mean,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            p5: percentile(&sorted, 0.05),
            median: percentile(&sorted, 0.50),
            p95: percentile(&sorted, 0.95),
        }
    }
}

/// Per-category and total distribution statistics of one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub trials: usize,
    /// One entry per table column, in table order
    pub categories: Vec<ColumnSummary>,
    /// Distribution of the per-trial sum across all categories
    pub total: ColumnSummary,
}

impl SimulationSummary {
    pub fn from_table(table: &TrialTable) -> Self {
        let categories = table
            .iter()
            .map(|(name, values)| ColumnSummary::from_values(name, values))
            .collect();
        let total = ColumnSummary::from_values("total", &table.row_totals());

        Self {
            trials: table.rows(),
            categories,
            total,
        }
    }

    pub fn category(&self, name: &str) -> Option<&ColumnSummary> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// Nearest-rank percentile over a pre-sorted slice
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[idx]
}
