//! # flicker-core
//!
//! Device helpers for Android window-transition ("flicker") tests.
//!
//! Flicker tests record window and surface traces while the device is driven
//! through a transition, then check the traces for visual glitches. This
//! crate does the driving: it puts the app under test into the state a
//! scenario needs (launched, backgrounded, reopened from the overview, ...).
//!
//! ## Modules
//!
//! - [`driver`] - The [`DeviceDriver`](driver::DeviceDriver) trait every helper drives
//! - [`adb`] - `DeviceDriver` backed by the `adb` command-line tool
//! - [`component`] - Component names and the flicker test app registry
//! - [`helper`] - The base [`AppHelper`](helper::AppHelper) lifecycle capability
//! - [`split_screen`] - [`SplitScreenHelper`](split_screen::SplitScreenHelper) for split-screen scenarios
//! - [`config`] - Persistent settings in `~/.flicker/config.json`
//!
//! ## External Dependencies
//!
//! The [`adb`] backend requires the Android SDK platform tools (`adb`).
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use flicker_core::adb::AdbDriver;
//! use flicker_core::component::Components;
//! use flicker_core::config::FlickerConfig;
//! use flicker_core::driver::DeviceDriver;
//! use flicker_core::helper::AppHelper;
//! use flicker_core::split_screen::SplitScreenHelper;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), flicker_core::driver::DriverError> {
//!     let mut driver = AdbDriver::from_config(&FlickerConfig::load());
//!     driver.connect().await?;
//!
//!     let info = Components::split_screen_primary();
//!     let helper = SplitScreenHelper::new(Arc::new(driver), info.label.clone(), info);
//!     helper.launch().await?;
//!     helper.open_overview().await?;
//!     helper.reopen_app_from_overview().await
//! }
//! ```

pub mod adb;
pub mod component;
pub mod config;
pub mod driver;
pub mod helper;
pub mod split_screen;
