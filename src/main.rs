//! Life Totals CLI - four-quadrant life counter for the terminal.
//!
//! This is the main binary entry point. See the `life_totals` library
//! for the core functionality.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_totals::{tui, Config};

const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI
#[derive(Parser)]
#[command(name = "life-totals")]
#[command(version = VERSION)]
#[command(about = "Track four life totals. Hold Back (Backspace/Esc) for 3 seconds to quit.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the counter (default)
    Start,
    /// Print the effective configuration as JSON
    Config,
}

/// Set up file logging so the full-screen UI doesn't interfere with log output.
///
/// Uses `LIFE_TOTALS_LOG_FILE`, then `<config dir>/life-totals.log`, then
/// `/tmp/life-totals.log`.
fn init_logging() -> Result<()> {
    let log_path = if let Ok(path) = std::env::var("LIFE_TOTALS_LOG_FILE") {
        std::path::PathBuf::from(path)
    } else {
        Config::config_dir()
            .ok()
            .filter(|dir| std::fs::create_dir_all(dir).is_ok())
            .map(|dir| dir.join("life-totals.log"))
            .unwrap_or_else(|| std::path::PathBuf::from("/tmp/life-totals.log"))
    };
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("Failed to create log file at {}", log_path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format_timestamp_millis()
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    // Set up panic hook to log panics and ensure terminal cleanup
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        log::error!("PANIC: {:?}", panic_info);
        tui::restore_terminal();
        default_hook(panic_info);
    }));

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command.unwrap_or(Commands::Start) {
        Commands::Start => {
            log::info!("Life Totals v{} starting with {:?}", VERSION, config);
            tui::run(&config)?;
            log::info!("Life Totals exited");
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
