use camera_map::config::AppConfig;
use camera_map::datasets::Dataset;
use camera_map::pipeline;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render camera maps to standalone HTML files
    Generate {
        #[arg(value_enum, default_value = "all")]
        dataset: DatasetArg,
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Load and validate a dataset without rendering it
    Inspect {
        #[arg(value_enum)]
        dataset: DatasetArg,
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DatasetArg {
    Korea,
    CentralAsia,
    Neoline,
    All,
}

impl DatasetArg {
    fn datasets(self) -> Vec<Dataset> {
        match self {
            DatasetArg::Korea => vec![Dataset::Korea],
            DatasetArg::CentralAsia => vec![Dataset::CentralAsia],
            DatasetArg::Neoline => vec![Dataset::Neoline],
            DatasetArg::All => Dataset::ALL.to_vec(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate { dataset, config } => {
            let app_config = AppConfig::load_or_default(config)?;

            for dataset in dataset.datasets() {
                let summary = pipeline::generate(dataset, app_config.dataset(dataset))?;
                println!(
                    "Map saved to {} ({} cameras)",
                    summary.output.display(),
                    summary.rendered
                );
            }
        }
        Commands::Inspect { dataset, config } => {
            let app_config = AppConfig::load_or_default(config)?;

            for dataset in dataset.datasets() {
                let report = pipeline::inspect(dataset, app_config.dataset(dataset))?;
                println!(
                    "{}: {} loaded, {} valid, {} skipped",
                    dataset,
                    report.loaded,
                    report.kept,
                    report.loaded - report.kept
                );
                for (color, count) in &report.by_color {
                    println!("  {:<8} {}", color, count);
                }
            }
        }
    }

    Ok(())
}
