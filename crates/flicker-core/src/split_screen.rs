//! Split-screen helper for flicker tests.
//!
//! [`SplitScreenHelper`] is an [`AppHelper`] with one extra gesture,
//! [`reopen_app_from_overview`](SplitScreenHelper::reopen_app_from_overview),
//! used to bring an app back from the task overview while a transition trace
//! is being recorded.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use flicker_core::adb::AdbDriver;
//! use flicker_core::component::Components;
//! use flicker_core::driver::DeviceDriver;
//! use flicker_core::helper::AppHelper;
//! use flicker_core::split_screen::SplitScreenHelper;
//!
//! # async fn run() -> Result<(), flicker_core::driver::DriverError> {
//! let mut driver = AdbDriver::new(None);
//! driver.connect().await?;
//!
//! let info = Components::split_screen_primary();
//! let helper = SplitScreenHelper::new(Arc::new(driver), info.label.clone(), info);
//! helper.launch().await?;
//! helper.open_overview().await?;
//! helper.reopen_app_from_overview().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::component::ComponentsInfo;
use crate::driver::{DeviceDriver, DriverError};
use crate::helper::AppHelper;

/// Number of times each split-screen flicker scenario is repeated.
pub const TEST_REPETITIONS: u32 = 1;

/// Time allowed for a transition animation to settle, in milliseconds.
pub const TIMEOUT_MS: u64 = 3_000;

/// App helper for split-screen flicker scenarios.
pub struct SplitScreenHelper {
    driver: Arc<dyn DeviceDriver>,
    activity_label: String,
    components_info: ComponentsInfo,
}

impl SplitScreenHelper {
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

    /// Reopens the first app in the task overview.
    ///
    /// Taps the centre of the display, where the overview shows the most
    /// recent task, then waits [`TIMEOUT_MS`] for the transition to finish.
    /// The wait suspends the calling task (it does not block the thread).
    /// The overview must already be showing; this is not checked.
    ///
    /// # Errors
    ///
    /// Any error from the driver, returned as-is. Nothing is retried and the
    /// wait is skipped if the tap fails.
    pub async fn reopen_app_from_overview(&self) -> Result<(), DriverError> {
        let x = self.driver.display_width().await? / 2;
        let y = self.driver.display_height().await? / 2;
        self.driver.click(x, y).await?;
        // Wait for animation to complete.
        tokio::time::sleep(Duration::from_millis(TIMEOUT_MS)).await;
        Ok(())
    }
}

#[async_trait]
impl AppHelper for SplitScreenHelper {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(TEST_REPETITIONS, 1);
        assert_eq!(TIMEOUT_MS, 3000);
    }
}
