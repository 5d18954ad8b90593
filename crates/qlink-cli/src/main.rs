//! qlink Command-Line Interface
//!
//! Runs framework-style operation lists on AQT gateway devices and prints
//! the measured samples.
//!
//! ```text
//! qlink run -i bell.json -d aqt.sim --shots 100
//! qlink devices
//! qlink operations
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{devices, operations, run, version};

/// qlink - run quantum circuits on AQT ion-trap gateways
#[derive(Parser)]
#[command(name = "qlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an operation list on a device
    Run {
        /// Input file (JSON operation list)
        #[arg(short, long)]
        input: String,

        /// Device short name
        #[arg(short, long, default_value = "aqt.sim")]
        device: String,

        /// Number of wires (inferred from the operations if omitted)
        #[arg(short, long)]
        wires: Option<usize>,

        /// Number of shots
        #[arg(short, long, default_value = "200")]
        shots: u32,

        /// AQT API key
        #[arg(long, env = "AQT_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Give up polling after this many seconds
        #[arg(long, default_value = "300")]
        poll_timeout: u64,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List available devices
    Devices,

    /// List supported operations and observables
    Operations,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run {
            input,
            device,
            wires,
            shots,
            token,
            poll_timeout,
            format,
        } => {
            run::execute(run::RunArgs {
                input: &input,
                device: &device,
                wires,
                shots,
                token,
                poll_timeout,
                format: &format,
            })
            .await
        }

        Commands::Devices => devices::execute(),

        Commands::Operations => {
            operations::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
