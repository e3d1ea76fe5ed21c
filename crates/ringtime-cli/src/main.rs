use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "ringtime", version, about = "Ringtime CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ring angle of a time of day
    Angle(commands::convert::AngleArgs),
    /// Print the time of day at a ring angle
    Time(commands::convert::TimeArgs),
    /// Find the first free slot for a task
    Slot(commands::slot::SlotArgs),
    /// Replay a scripted gesture sequence against a task file
    Simulate(commands::simulate::SimulateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RINGTIME_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Angle(args) => commands::convert::run_angle(args),
        Commands::Time(args) => commands::convert::run_time(args),
        Commands::Slot(args) => commands::slot::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
