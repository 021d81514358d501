//! [`DeviceDriver`] backed by the Android Debug Bridge (`adb`) CLI.
//!
//! Every operation shells out to `adb [-s SERIAL] shell ...` and parses the
//! textual output. The parsers are exposed as free functions so they can be
//! exercised without a device attached.
//!
//! # Requirements
//!
//! The Android SDK platform tools must be installed, with `adb` on `PATH` or
//! configured via [`FlickerConfig::adb_path`](crate::config::FlickerConfig).
//!
//! # Example
//!
//! ```no_run
//! use flicker_core::adb::AdbDriver;
//! use flicker_core::driver::DeviceDriver;
//!
//! # async fn run() -> Result<(), flicker_core::driver::DriverError> {
//! let mut driver = AdbDriver::new(Some("emulator-5554".to_string()));
//! driver.connect().await?;
//! println!("{}x{}", driver.display_width().await?, driver.display_height().await?);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::component::ComponentName;
use crate::config::FlickerConfig;
use crate::driver::{DeviceDriver, DriverError, KeyCode};

/// A device as listed by `adb devices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbDevice {
    /// Device serial, e.g. `emulator-5554`.
    pub serial: String,
    /// Connection state: `device`, `offline`, `unauthorized`, ...
    pub state: String,
}

impl AdbDevice {
    /// Whether the device is online and authorized.
    pub fn is_online(&self) -> bool {
        self.state == "device"
    }
}

/// Parses the output of `adb devices`.
///
/// Skips the header line and daemon status lines (starting with `*`).
pub fn parse_devices(output: &str) -> Vec<AdbDevice> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && !line.starts_with("List of devices") && !line.starts_with('*')
        })
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let serial = parts.next()?;
            let state = parts.next()?;
            Some(AdbDevice {
                serial: serial.to_string(),
                state: state.to_string(),
            })
        })
        .collect()
}

/// Chooses the device to drive.
///
/// With a requested serial, that device must be attached and online.
/// Without one, exactly one online device must be attached.
pub fn select_device(devices: &[AdbDevice], serial: Option<&str>) -> Result<String, DriverError> {
    if let Some(serial) = serial {
        return devices
            .iter()
            .find(|d| d.serial == serial && d.is_online())
            .map(|d| d.serial.clone())
            .ok_or_else(|| DriverError::DeviceNotFound(serial.to_string()));
    }

    let online: Vec<&AdbDevice> = devices.iter().filter(|d| d.is_online()).collect();
    match online.as_slice() {
        [] => Err(DriverError::DeviceNotFound("no device attached".to_string())),
        [only] => Ok(only.serial.clone()),
        _ => Err(DriverError::CommandFailed(format!(
            "{} devices attached, specify a serial",
            online.len()
        ))),
    }
}

fn parse_dimensions(s: &str) -> Option<(i32, i32)> {
    let (w, h) = s.trim().split_once('x')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

/// Parses the output of `wm size` into `(width, height)`.
///
/// An `Override size` line takes precedence over `Physical size`.
pub fn parse_wm_size(output: &str) -> Result<(i32, i32), DriverError> {
    let mut physical = None;
    let mut overridden = None;
    for line in output.lines() {
        if let Some(rest) = line.trim().strip_prefix("Physical size:") {
            physical = parse_dimensions(rest);
        } else if let Some(rest) = line.trim().strip_prefix("Override size:") {
            overridden = parse_dimensions(rest);
        }
    }
    overridden
        .or(physical)
        .ok_or_else(|| DriverError::Parse(format!("unexpected wm size output: {:?}", output.trim())))
}

/// Extracts the focused component from `dumpsys window` output.
///
/// Returns `None` when nothing is focused or the focused window does not
/// belong to an activity.
pub fn parse_focused_component(output: &str) -> Option<ComponentName> {
    let line = output.lines().find(|l| l.contains("mCurrentFocus="))?;
    let window = line.split("mCurrentFocus=").nth(1)?;
    window
        .trim_end()
        .trim_end_matches('}')
        .split_whitespace()
        .rev()
        .find(|token| token.contains('/'))
        .and_then(ComponentName::parse)
}

/// Extracts the failure reported by `am start`.
///
/// `am` prints failures on stdout and still exits zero. The `Error:` line
/// carries the reason; the preceding `Error type N` line does not.
pub fn parse_am_start_error(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("Error:"))
        .map(str::to_string)
}

/// Whether adb's stderr says the targeted device is not attached
/// (`device 'SERIAL' not found`).
fn is_device_not_found(stderr: &str) -> bool {
    stderr.contains("device '") && stderr.contains("' not found")
}

/// Device driver that runs `adb` commands.
#[derive(Debug, Clone)]
pub struct AdbDriver {
    adb_path: PathBuf,
    serial: Option<String>,
    connected: bool,
}

impl AdbDriver {
    /// Creates a driver for the given serial, or for the only attached
    /// device when `None`. The driver is **not** connected yet.
    pub fn new(serial: Option<String>) -> Self {
        Self {
            adb_path: PathBuf::from("adb"),
            serial,
            connected: false,
        }
    }

    /// Use a specific `adb` executable.
    pub fn with_adb_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.adb_path = path.into();
        self
    }

    /// Creates a driver from persisted configuration.
    pub fn from_config(config: &FlickerConfig) -> Self {
        let driver = Self::new(config.serial.clone());
        match &config.adb_path {
            Some(path) => driver.with_adb_path(path),
            None => driver,
        }
    }

    /// The serial this driver targets, once known.
    pub fn serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }

    /// Lists attached devices via `adb devices`.
    pub async fn list_devices(&self) -> Result<Vec<AdbDevice>, DriverError> {
        let output = self.run(&["devices"], false).await?;
        Ok(parse_devices(&output))
    }

    async fn run(&self, args: &[&str], targeted: bool) -> Result<String, DriverError> {
        let mut command = Command::new(&self.adb_path);
        if targeted {
            if let Some(serial) = &self.serial {
                command.args(["-s", serial]);
            }
        }
        command.args(args);

        debug!(serial = ?self.serial, ?args, "running adb");
        let output = command.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if is_device_not_found(&stderr) {
                return Err(DriverError::DeviceNotFound(
                    self.serial.clone().unwrap_or(stderr),
                ));
            }
            return Err(DriverError::CommandFailed(stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    async fn shell(&self, args: &[&str]) -> Result<String, DriverError> {
        if !self.connected {
            return Err(DriverError::NotConnected);
        }
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push("shell");
        full.extend_from_slice(args);
        self.run(&full, true).await
    }
}

#[async_trait]
impl DeviceDriver for AdbDriver {
    async fn connect(&mut self) -> Result<(), DriverError> {
        let devices = self.list_devices().await?;
        let serial = select_device(&devices, self.serial.as_deref())?;
        debug!(%serial, "connected to device");
        self.serial = Some(serial);
        self.connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn display_width(&self) -> Result<i32, DriverError> {
        let output = self.shell(&["wm", "size"]).await?;
        Ok(parse_wm_size(&output)?.0)
    }

    async fn display_height(&self) -> Result<i32, DriverError> {
        let output = self.shell(&["wm", "size"]).await?;
        Ok(parse_wm_size(&output)?.1)
    }

    async fn display_size(&self) -> Result<(i32, i32), DriverError> {
        let output = self.shell(&["wm", "size"]).await?;
        parse_wm_size(&output)
    }

    async fn click(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.shell(&["input", "tap", &x.to_string(), &y.to_string()])
            .await
            .map(|_| ())
    }

    async fn swipe(
        &self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        duration_ms: Option<u64>,
    ) -> Result<(), DriverError> {
        let mut args = vec![
            "input".to_string(),
            "swipe".to_string(),
            start_x.to_string(),
            start_y.to_string(),
            end_x.to_string(),
            end_y.to_string(),
        ];
        if let Some(ms) = duration_ms {
            args.push(ms.to_string());
        }
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.shell(&args).await.map(|_| ())
    }

    async fn press_key(&self, key: KeyCode) -> Result<(), DriverError> {
        self.shell(&["input", "keyevent", key.name()]).await.map(|_| ())
    }

    async fn launch_activity(&self, component: &ComponentName) -> Result<(), DriverError> {
        let name = component.flatten_to_string();
        let output = self.shell(&["am", "start", "-W", "-n", &name]).await?;
        match parse_am_start_error(&output) {
            Some(error) => Err(DriverError::CommandFailed(error)),
            None => Ok(()),
        }
    }

    async fn force_stop(&self, package: &str) -> Result<(), DriverError> {
        self.shell(&["am", "force-stop", package]).await.map(|_| ())
    }

    async fn focused_component(&self) -> Result<Option<ComponentName>, DriverError> {
        let output = self.shell(&["dumpsys", "window"]).await?;
        Ok(parse_focused_component(&output))
    }
}
