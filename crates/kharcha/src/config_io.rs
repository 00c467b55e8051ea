//! YAML configuration loading
//!
//! The file deserializes into the core `Config` tree and is validated
//! before the engine sees it. A file that omits `simulation.month` gets
//! the current calendar month filled in here, at the process boundary,
//! so the engine itself stays deterministic.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{WrapErr, bail};
use kharcha_core::config::Config;

pub fn load_config(path: &Path) -> color_eyre::Result<Config> {
    if !path.is_file() {
        bail!("configuration file not found at: {}", path.display());
    }

    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let mut config: Config = serde_saphyr::from_str(&text)
        .wrap_err_with(|| format!("failed to parse {}", path.display()))?;

    if config.simulation.month.is_none() {
        config.simulation.month = Some(jiff::Zoned::now().month());
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_minimal_config() {
        let file = write_config(
            "simulation:\n  mc_trials: 500\n  random_seed: 7\n  month: 3\n",
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.simulation.mc_trials, 500);
        assert_eq!(config.simulation.random_seed, 7);
        assert_eq!(config.simulation.month, Some(3));
    }

    #[test]
    fn test_missing_month_is_filled_from_calendar() {
        let file = write_config("simulation:\n  mc_trials: 100\n");
        let config = load_config(file.path()).unwrap();

        let month = config.simulation.month.unwrap();
        assert!((1..=12).contains(&month));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_config(Path::new("does/not/exist.yaml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = write_config(
            "simulation:\n  mc_trials: 100\n  month: 3\ntransport:\n  bike_kmpl: -1.0\n",
        );
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_nested_overrides_parse() {
        let file = write_config(concat!(
            "simulation:\n",
            "  mc_trials: 250\n",
            "  month: 10\n",
            "periodic_expenses:\n",
            "  household:\n",
            "    groceries_monthly: 6500.0\n",
            "  hobbies:\n",
            "    cricket_days_per_month: 4.0\n",
        ));
        let config = load_config(file.path()).unwrap();

        assert_eq!(
            config.periodic_expenses.household.groceries_monthly,
            6500.0
        );
        assert_eq!(
            config.periodic_expenses.hobbies.cricket_days_per_month,
            4.0
        );
        // Untouched groups keep their defaults.
        assert_eq!(config.periodic_expenses.hobbies.cricket_cost_min, 300.0);
    }
}
