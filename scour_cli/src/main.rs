//! # Scour CLI
//!
//! Command-line front end for the scour depth calculations.
//!
//! ```text
//! scour general --h0 3 --d50 0.02 --u 1.5 --l0 30 --b 120 --theta 30 --m 2 \
//!     --position bend-concave --uc-method formula-a --gamma-s 26 --gamma-w 9.81
//! scour local --h0 5 --u 2 --uc 1 --alpha 15 --n 2 --pdf rv-1
//! scour run --input request.json --pdf package.pdf
//! ```

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;

/// Scour depth calculator for spur dikes and revetments
#[derive(Parser)]
#[command(name = "scour")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scour depth at spur dikes (D.2.1) and revetments (D.2.2)", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// General scour at a spur dike (D.2.1)
    General(commands::general::GeneralArgs),
    /// Local scour at a revetment (D.2.2)
    Local(commands::local::LocalArgs),
    /// Evaluate a JSON calculation request
    Run(commands::run::RunArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // try_init also routes `log` records from scour_core into the subscriber
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    match cli.command {
        Commands::General(args) => commands::general::execute(args),
        Commands::Local(args) => commands::local::execute(args),
        Commands::Run(args) => commands::run::execute(args),
    }
}
