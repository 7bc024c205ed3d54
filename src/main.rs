use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use firmware_resolver::config::{ResolverConfig, log_path};
use firmware_resolver::listing::{FileListing, LgromListing, ListingSource};
use firmware_resolver::session::{final_result, run_confirmed};
use firmware_resolver::version::best_versions;

#[derive(Parser)]
#[command(name = "firmware-resolver")]
#[command(version, about = "Finds the best firmware release for a device model")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a model's listing and resolve its best firmware
    Resolve {
        /// Model number as shown in the phone settings (e.g. lgh860)
        model: String,
        /// Replay row records from a JSON file instead of fetching
        #[arg(long)]
        rows: Option<PathBuf>,
        /// Override the listing base URL
        #[arg(long)]
        base_url: Option<String>,
        /// Print the final resolution as JSON (`null` when there is none)
        #[arg(long)]
        json: bool,
    },
    /// Print the versions tied at the top ranking for a model input
    Rank {
        /// Model input whose last character anchors the ranking
        input: String,
        #[arg(required = true)]
        versions: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };

    // Logging is best effort; the command still runs without a log file
    let _guard = firmware_resolver::logging::init(&log_path(), &config.log.level)
        .inspect_err(|e| eprintln!("warning: logging disabled: {}", e))
        .ok();

    match cli.command {
        Command::Resolve {
            model,
            rows,
            base_url,
            json,
        } => {
            if let Some(base_url) = base_url {
                config.listing.base_url = base_url;
            }
            let source: Box<dyn ListingSource> = match rows {
                Some(path) => Box::new(FileListing::new(&path)),
                None => Box::new(LgromListing::from_config(&config.listing)),
            };

            info!("Resolving firmware for {}", model);
            let replies = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(run_confirmed(source.as_ref(), &model));

            if json {
                // stdout carries only the JSON result
                for reply in &replies {
                    eprint!("{}", reply);
                }
                println!("{}", serde_json::to_string(&final_result(&replies))?);
            } else {
                for reply in &replies {
                    print!("{}", reply);
                }
            }
        }
        Command::Rank { input, versions } => {
            for version in best_versions(&versions, &input)? {
                println!("{}", version);
            }
        }
    }

    Ok(())
}
