use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use powerforge::config::PowerRates;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with power plant rate constants
    #[arg(global = true, short, long)]
    rates: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find the best accumulator placements for each grid
    Search(cmd::search::SearchArgs),
    /// Rate of each grid with power plants only
    Baseline(cmd::baseline::BaselineArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing PowerForge...");

    let (mut config, sub_name) = match &cli.command {
        Commands::Search(args) => (args.config.clone(), "search"),
        Commands::Baseline(args) => (args.config.clone(), "baseline"),
    };

    // Rates file is the base, explicit CLI flags win
    if let Some(path) = &cli.rates {
        info!("⚖️  Loading rates from: {}", path);
        let mut file_rates = PowerRates::load_from_file(path).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        });
        if let Some(sub_matches) = matches.subcommand_matches(sub_name) {
            file_rates.merge_from_cli(&config.rates, sub_matches);
        }
        config.rates = file_rates;
    }

    if let Err(e) = config.validate() {
        error!("❌ {}", e);
        process::exit(1);
    }

    let outcome = match cli.command {
        Commands::Search(args) => cmd::search::run(args, config),
        Commands::Baseline(args) => cmd::baseline::run(args, config),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
