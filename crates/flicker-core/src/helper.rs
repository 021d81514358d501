//! Base app helper capability.
//!
//! An app helper drives one activity of the app under test through a
//! [`DeviceDriver`]. The [`AppHelper`] trait supplies the shared lifecycle
//! operations (launch, exit, kill, focus query, overview) as provided
//! methods on top of three accessors, so a specialised helper only has to
//! expose its driver and component to gain all of them.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use flicker_core::adb::AdbDriver;
//! use flicker_core::component::Components;
//! use flicker_core::driver::DeviceDriver;
//! use flicker_core::helper::{AppHelper, StandardAppHelper};
//!
//! # async fn run() -> Result<(), flicker_core::driver::DriverError> {
//! let mut driver = AdbDriver::new(None);
//! driver.connect().await?;
//!
//! let app = StandardAppHelper::new(Arc::new(driver), "SimpleApp", Components::simple());
//! app.launch().await?;
//! app.exit().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info_span, Instrument};

use crate::component::ComponentsInfo;
use crate::driver::{DeviceDriver, DriverError};

/// How long [`AppHelper::launch`] waits for the activity to gain focus.
pub const DEFAULT_LAUNCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Interval between focus checks while waiting for a launch.
const FOCUS_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Lifecycle operations shared by every app helper.
#[async_trait]
pub trait AppHelper: Send + Sync {
    /// The device this helper drives.
    fn driver(&self) -> &Arc<dyn DeviceDriver>;

    /// Launcher label of the activity under test.
    fn activity_label(&self) -> &str;

    /// Identifying metadata of the activity under test.
    fn components_info(&self) -> &ComponentsInfo;

    /// Upper bound for [`launch`](Self::launch) to see the activity focused.
    fn launch_timeout(&self) -> Duration {
        DEFAULT_LAUNCH_TIMEOUT
    }

    /// Starts the activity and waits until it holds window focus.
    ///
    /// # Errors
    ///
    /// - [`DriverError::Timeout`] if the activity is not focused within
    ///   [`launch_timeout`](Self::launch_timeout)
    /// - Any error from the driver
    async fn launch(&self) -> Result<(), DriverError> {
        let component = &self.components_info().component;
        let span = info_span!("launch", label = self.activity_label(), %component);
        async {
            self.driver().launch_activity(component).await?;

            let deadline = Instant::now() + self.launch_timeout();
            loop {
                if self.is_focused().await? {
                    debug!("activity focused");
                    return Ok(());
                }
                if Instant::now() >= deadline {
                    return Err(DriverError::Timeout);
                }
                debug!("waiting for focus");
                tokio::time::sleep(FOCUS_POLL_INTERVAL).await;
            }
        }
        .instrument(span)
        .await
    }

    /// Leaves the app by pressing HOME. The app keeps running.
    async fn exit(&self) -> Result<(), DriverError> {
        self.driver().press_home().await
    }

    /// Force-stops the app's package.
    async fn kill(&self) -> Result<(), DriverError> {
        self.driver().force_stop(self.components_info().package()).await
    }

    /// Whether the activity currently holds window focus.
    async fn is_focused(&self) -> Result<bool, DriverError> {
        let focused = self.driver().focused_component().await?;
        Ok(focused.as_ref() == Some(&self.components_info().component))
    }

    /// Shows the task overview.
    async fn open_overview(&self) -> Result<(), DriverError> {
        self.driver().press_recent_apps().await
    }
}

/// The plain [`AppHelper`] with no extra gestures.
pub struct StandardAppHelper {
    driver: Arc<dyn DeviceDriver>,
    activity_label: String,
    components_info: ComponentsInfo,
}

impl StandardAppHelper {
    pub fn new(
        driver: Arc<dyn DeviceDriver>,
        activity_label: impl Into<String>,
        components_info: ComponentsInfo,
    ) -> Self {
        Self {
            driver,
            activity_label: activity_label.into(),
            components_info,
        }
    }
}

#[async_trait]
impl AppHelper for StandardAppHelper {
    fn driver(&self) -> &Arc<dyn DeviceDriver> {
        &self.driver
    }

    fn activity_label(&self) -> &str {
        &self.activity_label
    }

    fn components_info(&self) -> &ComponentsInfo {
        &self.components_info
    }
}
