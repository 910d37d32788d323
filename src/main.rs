use std::path::PathBuf;

use clap::{Parser, Subcommand};
use homebuy::api::{ServerConfig, report_from_json, run_http_server};
use homebuy::benefits::BenefitsCache;

#[derive(Parser, Debug)]
#[command(name = "homebuy", version, about = "Property purchase affordability calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(short, long, env = "PORT", default_value_t = 3001)]
        port: u16,

        /// Where fetched first-home benefits are persisted between restarts
        #[arg(long)]
        cache_file: Option<PathBuf>,

        /// JSON map of jurisdiction code to benefits, loaded into the cache at startup
        #[arg(long)]
        benefits_seed: Option<PathBuf>,
    },

    /// Print the full report for a payload file (or the defaults) as JSON
    Report {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Benefits cache to resolve grants from
        #[arg(long)]
        cache_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    homebuy::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            cache_file,
            benefits_seed,
        } => {
            let config = ServerConfig {
                host,
                port,
                cache_file,
                benefits_seed,
            };
            if let Err(e) = run_http_server(config).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Report { input, cache_file } => {
            if let Err(e) = print_report(input, cache_file) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

fn print_report(input: Option<PathBuf>, cache_file: Option<PathBuf>) -> Result<(), String> {
    let raw = match &input {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        ),
        None => None,
    };
    let benefits = BenefitsCache::new(cache_file).get();
    let bundle = report_from_json(raw.as_deref(), &benefits.data).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&bundle).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
