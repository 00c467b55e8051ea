use std::fs;
use std::path::PathBuf;

use clap::Parser;

use kharcha::{config_io, logging, report};
use kharcha_core::engine::ExpenseModel;
use kharcha_core::model::SimulationSummary;

#[derive(Parser, Debug)]
#[command(name = "kharcha")]
#[command(about = "A personal-finance Monte Carlo expense simulator")]
struct Args {
    /// Path to the configuration YAML file
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Directory the rendered report is written to
    #[arg(short, long, default_value = "reports")]
    output_dir: PathBuf,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init_logging(&args.log_level)?;

    let config = config_io::load_config(&args.config)?;
    tracing::info!(
        trials = config.simulation.mc_trials,
        seed = config.simulation.random_seed,
        month = config.simulation.month,
        "configuration loaded from {}",
        args.config.display()
    );

    let mut model = ExpenseModel::with_default_components(config)?;
    for name in model.component_names() {
        tracing::debug!("registered expense component: {name}");
    }

    let table = model.run()?;
    tracing::info!(
        rows = table.rows(),
        columns = table.n_columns(),
        "simulation complete"
    );

    let summary = SimulationSummary::from_table(&table);
    let text = report::render_report(&summary, model.config());
    println!("{text}");

    fs::create_dir_all(&args.output_dir)?;
    let report_path = args.output_dir.join("summary.txt");
    fs::write(&report_path, &text)?;
    tracing::info!("report written to {}", report_path.display());

    Ok(())
}
