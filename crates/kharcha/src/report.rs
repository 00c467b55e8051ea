//! Textual report rendering
//!
//! Consumes the summary statistics computed by the engine and renders the
//! expense table, the total-cost distribution block and the investment
//! allocation breakdown as plain-text tables.

use kharcha_core::config::Config;
use kharcha_core::model::SimulationSummary;

use crate::format::{format_percentage, format_rupees};

const DAYS_PER_YEAR: f64 = 365.25;

/// Daily averages below this are noise, not expenses worth a table row
const DISPLAY_THRESHOLD: f64 = 0.01;

/// Render the full report
pub fn render_report(summary: &SimulationSummary, config: &Config) -> String {
    let mut sections = vec![
        expense_table(summary, config),
        distribution_block(summary),
    ];
    if let Some(investments) = investment_table(config) {
        sections.push(investments);
    }
    sections.join("\n")
}

/// Daily/monthly/yearly averages per category plus the grand total
fn expense_table(summary: &SimulationSummary, config: &Config) -> String {
    let days = config.time.days_in_month;

    let mut rows: Vec<[String; 4]> = summary
        .categories
        .iter()
        .filter(|c| c.mean > DISPLAY_THRESHOLD)
        .map(|c| {
            [
                title_case(&c.name),
                format_rupees(c.mean),
                format_rupees(c.mean * days),
                format_rupees(c.mean * DAYS_PER_YEAR),
            ]
        })
        .collect();
    rows.push([
        "Total Estimated Expenses".to_string(),
        format_rupees(summary.total.mean),
        format_rupees(summary.total.mean * days),
        format_rupees(summary.total.mean * DAYS_PER_YEAR),
    ]);

    render_table(
        &format!(
            "Expense Simulation Summary (Daily Averages, {} trials)",
            summary.trials
        ),
        ["Expense Category", "Daily Avg", "Monthly Avg", "Yearly Avg"],
        &rows,
    )
}

/// Distribution of the per-trial total daily cost
fn distribution_block(summary: &SimulationSummary) -> String {
    let total = &summary.total;
    let rows = [
        ("Mean", total.mean),
        ("Median", total.median),
        ("Std Dev", total.std_dev),
        ("P5", total.p5),
        ("P95", total.p95),
    ];

    let mut out = String::from("Total Daily Cost Distribution\n");
    for (label, value) in rows {
        out.push_str(&format!("  {label:<8} {:>14}\n", format_rupees(value)));
    }
    out
}

/// Allocation breakdown for the active investment profile. Returns `None`
/// (after a warning) when there is nothing to invest or the named profile
/// does not exist; the report continues without this section.
fn investment_table(config: &Config) -> Option<String> {
    let financials = &config.financials;
    if financials.monthly_investable_amount <= 0.0 {
        return None;
    }

    let profile_name = &financials.active_investment_profile;
    let Some(profile) = config.investment_profiles.get(profile_name) else {
        tracing::warn!(
            "active investment profile {profile_name:?} not found in config, \
             skipping allocation breakdown"
        );
        return None;
    };

    // Profile maps deserialize in arbitrary order; sort for a stable report.
    let mut allocations: Vec<(&String, &f64)> = profile.iter().collect();
    allocations.sort_by(|a, b| a.0.cmp(b.0));

    let mut rows: Vec<[String; 3]> = allocations
        .iter()
        .map(|(asset, fraction)| {
            [
                title_case(asset),
                format_percentage(**fraction),
                format_rupees(financials.monthly_investable_amount * **fraction),
            ]
        })
        .collect();
    rows.push([
        "Total Investment".to_string(),
        String::new(),
        format_rupees(financials.monthly_investable_amount),
    ]);

    Some(render_table(
        &format!("Investment Allocation ({profile_name} Profile)"),
        ["Asset Class", "Allocation", "Monthly Amount"],
        &rows,
    ))
}

/// Render a titled table with a left-aligned first column and
/// right-aligned value columns
fn render_table<const N: usize>(title: &str, headers: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths: [usize; N] = [0; N];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = header.chars().count();
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    let mut header_line = String::from("  ");
    let mut rule = String::from("  ");
    for (i, header) in headers.iter().enumerate() {
        header_line.push_str(&pad(header, widths[i], i == 0));
        rule.push_str(&"-".repeat(widths[i]));
        if i + 1 < N {
            header_line.push_str("  ");
            rule.push_str("  ");
        }
    }
    out.push_str(&header_line);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for row in rows {
        out.push_str("  ");
        for (i, cell) in row.iter().enumerate() {
            out.push_str(&pad(cell, widths[i], i == 0));
            if i + 1 < N {
                out.push_str("  ");
            }
        }
        out.push('\n');
    }
    out
}

/// Pad on chars, not bytes: the rupee sign is multi-byte and would skew
/// `format!` width padding
fn pad(text: &str, width: usize, left_align: bool) -> String {
    let len = text.chars().count();
    let fill = " ".repeat(width.saturating_sub(len));
    if left_align {
        format!("{text}{fill}")
    } else {
        format!("{fill}{text}")
    }
}

/// `family_support` -> `Family Support`
fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use kharcha_core::engine::ExpenseModel;
    use kharcha_core::model::SimulationSummary;

    use super::*;

    fn small_summary(config: &Config) -> SimulationSummary {
        let mut model = ExpenseModel::with_default_components(config.clone()).unwrap();
        SimulationSummary::from_table(&model.run().unwrap())
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.simulation.mc_trials = 200;
        config.simulation.month = Some(3);
        config.periodic_expenses.household.groceries_monthly = 6_000.0;
        config
    }

    #[test]
    fn test_report_lists_categories_and_total() {
        let config = test_config();
        let report = render_report(&small_summary(&config), &config);

        assert!(report.contains("Food"));
        assert!(report.contains("Household"));
        assert!(report.contains("Total Estimated Expenses"));
        assert!(report.contains("Total Daily Cost Distribution"));
    }

    #[test]
    fn test_investment_section_requires_investable_amount() {
        let mut config = test_config();
        config.financials.monthly_investable_amount = 0.0;
        let report = render_report(&small_summary(&config), &config);
        assert!(!report.contains("Investment Allocation"));
    }

    #[test]
    fn test_investment_section_renders_active_profile() {
        let mut config = test_config();
        config.financials.monthly_investable_amount = 30_000.0;
        config.financials.active_investment_profile = "Balanced".to_string();
        config.investment_profiles.insert(
            "Balanced".to_string(),
            [
                ("index_funds".to_string(), 0.5),
                ("debt_funds".to_string(), 0.4),
                ("gold".to_string(), 0.1),
            ]
            .into(),
        );

        let report = render_report(&small_summary(&config), &config);
        assert!(report.contains("Investment Allocation (Balanced Profile)"));
        assert!(report.contains("Index Funds"));
        assert!(report.contains("₹15,000.00"));
    }

    #[test]
    fn test_missing_profile_skips_section() {
        let mut config = test_config();
        config.financials.monthly_investable_amount = 30_000.0;
        config.financials.active_investment_profile = "DoesNotExist".to_string();

        let report = render_report(&small_summary(&config), &config);
        assert!(!report.contains("Investment Allocation"));
        assert!(report.contains("Total Estimated Expenses"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("family_support"), "Family Support");
        assert_eq!(title_case("hobbies"), "Hobbies");
    }
}
