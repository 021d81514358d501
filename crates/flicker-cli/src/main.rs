//! Command-line front end for the flicker device helpers.
//!
//! Drives an attached Android device through the same helpers the flicker
//! tests use, which is handy when setting up or debugging a scenario by hand.
//!
//! # Usage
//!
//! ```bash
//! # List the activities of the flicker test app
//! flicker components
//!
//! # Print the display size of the only attached device
//! flicker display-size
//!
//! # Launch an activity on a specific device and wait for focus
//! flicker -s emulator-5554 launch SplitScreenPrimaryApp
//!
//! # Show the overview, then reopen the most recent app from it
//! flicker overview
//! flicker reopen-from-overview
//!
//! # Force-stop the test app
//! flicker kill SimpleApp
//!
//! # Remember which device to drive
//! flicker -s emulator-5554 config-set
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use flicker_core::adb::AdbDriver;
use flicker_core::component::{Components, ComponentsInfo};
use flicker_core::config::FlickerConfig;
use flicker_core::driver::DeviceDriver;
use flicker_core::helper::{AppHelper, StandardAppHelper};
use flicker_core::split_screen::SplitScreenHelper;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Drive an Android device for flicker test scenarios.
#[derive(Parser)]
#[command(name = "flicker")]
#[command(about = "Drive an Android device through flicker test helpers")]
#[command(version)]
struct Cli {
    /// Serial of the device to drive
    #[arg(short, long, env = "FLICKER_SERIAL")]
    serial: Option<String>,

    /// Path to the adb executable
    #[arg(long, env = "FLICKER_ADB")]
    adb: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List the activities of the flicker test app
    Components,

    /// Print the effective configuration
    ConfigShow,

    /// Persist --serial and --adb to ~/.flicker/config.json
    ConfigSet,

    /// Print the device display size
    DisplaySize,

    /// Launch an activity and wait until it is focused
    Launch {
        /// Activity label (see `flicker components`)
        label: String,
    },

    /// Force-stop the app an activity belongs to
    Kill {
        /// Activity label (see `flicker components`)
        label: String,
    },

    /// Show the task overview
    Overview,

    /// Reopen the most recent app from the task overview
    ReopenFromOverview,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

#[derive(Debug)]
enum CliError {
    Connection(String),
    ActionFailed(String),
    Usage(String),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::ActionFailed(_) => ExitCode::from(1),
            CliError::Connection(_) => ExitCode::from(2),
            CliError::Usage(_) => ExitCode::from(3),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Connection(msg) => write!(f, "Connection error: {}", msg),
            CliError::ActionFailed(msg) => write!(f, "Action failed: {}", msg),
            CliError::Usage(msg) => write!(f, "{}", msg),
        }
    }
}

fn lookup(label: &str) -> Result<ComponentsInfo, CliError> {
    Components::by_label(label).ok_or_else(|| {
        CliError::Usage(format!(
            "Unknown activity label '{}' (run `flicker components` for the list)",
            label
        ))
    })
}

fn print_success(cli: &Cli, text: &str) {
    if cli.format == OutputFormat::Json {
        println!("{}", serde_json::json!({ "success": true }));
    } else {
        eprintln!("{}", text);
    }
}

async fn connect(config: &FlickerConfig) -> Result<Arc<dyn DeviceDriver>, CliError> {
    let mut driver = AdbDriver::from_config(config);
    driver
        .connect()
        .await
        .map_err(|e| CliError::Connection(e.to_string()))?;
    debug!(serial = ?driver.serial(), "device ready");
    Ok(Arc::new(driver))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = FlickerConfig::load().with_overrides(cli.adb.clone(), cli.serial.clone());

    // Commands that don't need a device
    match cli.command {
        Command::Components => {
            let all = Components::all();
            if cli.format == OutputFormat::Json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&all)
                        .map_err(|e| CliError::ActionFailed(e.to_string()))?
                );
            } else {
                for info in &all {
                    println!("{:<26}{}", info.label, info.component);
                }
            }
            return Ok(());
        }
        Command::ConfigShow => {
            println!(
                "{}",
                serde_json::to_string_pretty(&config)
                    .map_err(|e| CliError::ActionFailed(e.to_string()))?
            );
            return Ok(());
        }
        Command::ConfigSet => {
            config
                .save()
                .map_err(|e| CliError::ActionFailed(format!("Failed to save config: {}", e)))?;
            print_success(&cli, "Saved config");
            return Ok(());
        }
        _ => {}
    }

    // Resolve labels before touching the device
    let info = match &cli.command {
        Command::Launch { label } | Command::Kill { label } => Some(lookup(label)?),
        _ => None,
    };

    let driver = connect(&config).await?;
    let action_failed = |e: flicker_core::driver::DriverError| CliError::ActionFailed(e.to_string());

    match cli.command {
        Command::DisplaySize => {
            let (width, height) = driver.display_size().await.map_err(action_failed)?;
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "width": width, "height": height }));
            } else {
                println!("{}x{}", width, height);
            }
        }
        Command::Launch { .. } | Command::Kill { .. } => {
            let info = info.ok_or_else(|| CliError::Usage("missing activity label".to_string()))?;
            let helper = StandardAppHelper::new(driver, info.label.clone(), info);
            if matches!(cli.command, Command::Launch { .. }) {
                helper.launch().await.map_err(action_failed)?;
                print_success(&cli, &format!("Launched {}", helper.activity_label()));
            } else {
                helper.kill().await.map_err(action_failed)?;
                print_success(&cli, &format!("Stopped {}", helper.components_info().package()));
            }
        }
        Command::Overview => {
            driver.press_recent_apps().await.map_err(action_failed)?;
            print_success(&cli, "Opened overview");
        }
        Command::ReopenFromOverview => {
            let info = Components::split_screen_primary();
            let helper = SplitScreenHelper::new(driver, info.label.clone(), info);
            helper.reopen_app_from_overview().await.map_err(action_failed)?;
            print_success(&cli, "Reopened app from overview");
        }
        Command::Components | Command::ConfigShow | Command::ConfigSet => {}
    }

    Ok(())
}
