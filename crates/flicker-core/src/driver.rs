//! Device driver trait for backend-agnostic Android automation.
//!
//! This module defines the [`DeviceDriver`] trait, the device automation
//! context every helper in this crate is built on. A driver can report the
//! display geometry, inject input gestures, and start or stop activities.
//! Helpers hold an `Arc<dyn DeviceDriver>` and never know which backend is
//! behind it (the [`AdbDriver`](crate::adb::AdbDriver) in production, a
//! recording mock in tests).
//!
//! # Example
//!
//! ```no_run
//! use flicker_core::adb::AdbDriver;
//! use flicker_core::driver::DeviceDriver;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), flicker_core::driver::DriverError> {
//!     let mut driver = AdbDriver::new(None);
//!     driver.connect().await?;
//!
//!     let (width, height) = driver.display_size().await?;
//!     driver.click(width / 2, height / 2).await?;
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::component::ComponentName;

/// Errors that can occur during device driver operations.
///
/// This is the only error type the helpers return. Helpers propagate it
/// as-is, so callers see exactly what the backend reported.
#[derive(Error, Debug)]
pub enum DriverError {
    /// A command or operation failed with the given message.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The driver has not been connected to a device yet.
    #[error("Not connected to a device")]
    NotConnected,

    /// The requested device is not attached.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// An operation timed out.
    #[error("Operation timed out")]
    Timeout,

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Device output could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Hardware and navigation keys a driver can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// Go to the launcher.
    Home,
    /// Navigate back.
    Back,
    /// Show the task overview (recent apps).
    AppSwitch,
}

impl KeyCode {
    /// Returns the Android key event name for this key.
    pub fn name(&self) -> &'static str {
        match self {
            KeyCode::Home => "KEYCODE_HOME",
            KeyCode::Back => "KEYCODE_BACK",
            KeyCode::AppSwitch => "KEYCODE_APP_SWITCH",
        }
    }
}

/// Trait for backend-agnostic Android device automation.
///
/// Implementors provide the primitive device capabilities. Display geometry
/// is queried live on every call; implementors must not cache it, since
/// rotation and size overrides change it under a running test.
///
/// # Required Methods
///
/// Implementors must provide: [`connect`](DeviceDriver::connect),
/// [`is_connected`](DeviceDriver::is_connected),
/// [`display_width`](DeviceDriver::display_width),
/// [`display_height`](DeviceDriver::display_height),
/// [`click`](DeviceDriver::click),
/// [`swipe`](DeviceDriver::swipe),
/// [`press_key`](DeviceDriver::press_key),
/// [`launch_activity`](DeviceDriver::launch_activity),
/// [`force_stop`](DeviceDriver::force_stop),
/// and [`focused_component`](DeviceDriver::focused_component).
#[async_trait]
pub trait DeviceDriver: Send + Sync {
    /// Establish connection to the device.
    async fn connect(&mut self) -> Result<(), DriverError>;

    /// Check if the driver is ready to accept commands.
    fn is_connected(&self) -> bool;

    /// Current display width in device pixels.
    async fn display_width(&self) -> Result<i32, DriverError>;

    /// Current display height in device pixels.
    async fn display_height(&self) -> Result<i32, DriverError>;

    /// Current display size as `(width, height)`.
    ///
    /// The default implementation queries width and then height.
    async fn display_size(&self) -> Result<(i32, i32), DriverError> {
        let width = self.display_width().await?;
        let height = self.display_height().await?;
        Ok((width, height))
    }

    /// Tap at specific device coordinates.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate in device pixels
    /// * `y` - The y-coordinate in device pixels
    async fn click(&self, x: i32, y: i32) -> Result<(), DriverError>;

    /// Perform a swipe gesture from one point to another.
    ///
    /// # Arguments
    ///
    /// * `start_x` - Starting x-coordinate
    /// * `start_y` - Starting y-coordinate
    /// * `end_x` - Ending x-coordinate
    /// * `end_y` - Ending y-coordinate
    /// * `duration_ms` - Optional gesture duration in milliseconds
    async fn swipe(
        &self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        duration_ms: Option<u64>,
    ) -> Result<(), DriverError>;

    /// Press a hardware or navigation key.
    async fn press_key(&self, key: KeyCode) -> Result<(), DriverError>;

    /// Press HOME.
    async fn press_home(&self) -> Result<(), DriverError> {
        self.press_key(KeyCode::Home).await
    }

    /// Press BACK.
    async fn press_back(&self) -> Result<(), DriverError> {
        self.press_key(KeyCode::Back).await
    }

    /// Open the task overview.
    async fn press_recent_apps(&self) -> Result<(), DriverError> {
        self.press_key(KeyCode::AppSwitch).await
    }

    /// Start the given activity.
    async fn launch_activity(&self, component: &ComponentName) -> Result<(), DriverError>;

    /// Force-stop every process of the given package.
    async fn force_stop(&self, package: &str) -> Result<(), DriverError>;

    /// The component that currently holds window focus, if any.
    async fn focused_component(&self) -> Result<Option<ComponentName>, DriverError>;
}
