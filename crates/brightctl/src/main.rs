//! brightctl
//!
//! Reads and adjusts the display backlight through sysfs and remembers the
//! last level set so it can be restored after the panel is power cycled.
//!
//! ```text
//! brightctl set 50%      absolute, percent of maximum
//! brightctl set -0.05    relative, fraction of maximum
//! brightctl get          prints the current fraction, e.g. 0.45
//! brightctl restore      reapplies the saved level
//! ```

use anyhow::Result;
use brightctl_config::BrightctlConfig;
use brightctl_hal::BacklightControl;
use clap::{ArgAction, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

const USAGE_EXAMPLES: &str = "\
Examples:
  brightctl set 50%
  brightctl set +5%
  brightctl set -5%
  brightctl get
  brightctl restore (to use within a startup script)";

#[derive(Parser, Debug)]
#[command(name = "brightctl", version, about, after_help = USAGE_EXAMPLES)]
struct Cli {
    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file to use instead of the default locations
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Directory holding backlight devices
    #[arg(
        long,
        value_name = "DIR",
        env = "BRIGHTCTL_BACKLIGHT_DIR",
        global = true
    )]
    backlight_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Set brightness, e.g. 50%, 0.5, +5%, -0.05
    Set {
        /// Absolute or signed relative value, as a percentage or a fraction
        #[arg(value_name = "EXPR", allow_hyphen_values = true)]
        expr: String,
    },

    /// Print the current brightness as a fraction of the maximum
    Get,

    /// Reapply the last saved brightness
    Restore,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Setup logging to stderr; stdout is reserved for command output
fn setup_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => BrightctlConfig::load(path)?,
        None => BrightctlConfig::load_default()?,
    };

    let backlight_dir = cli.backlight_dir.unwrap_or(config.backlight_dir.clone());
    let state_root = config.state_root();
    match &state_root {
        Some(root) => debug!("State root: {}", root.display()),
        None => debug!("No state root could be resolved, persistence disabled"),
    }

    let mut control = BacklightControl::open(&backlight_dir, state_root.as_deref())?;

    match cli.command {
        Command::Set { expr } => {
            control.set(&expr)?;
            println!("Brightness changed");
        }
        Command::Get => {
            println!("{}", control.get()?);
        }
        Command::Restore => {
            control.restore()?;
        }
    }

    Ok(())
}
