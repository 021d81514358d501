//! Shared test helpers for flicker-core integration tests.
//!
//! Provides [`MockDriver`], a [`DeviceDriver`] that records every call it
//! receives together with the (virtual) time it arrived, so tests can check
//! exactly which device interactions a helper made and in what order.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use flicker_core::component::ComponentName;
use flicker_core::driver::{DeviceDriver, DriverError, KeyCode};

/// A device interaction observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DisplayWidth,
    DisplayHeight,
    Click { x: i32, y: i32 },
    Swipe,
    Key(KeyCode),
    Launch(ComponentName),
    ForceStop(String),
    FocusedComponent,
}

/// Scripted in-memory device.
pub struct MockDriver {
    width: i32,
    height: i32,
    /// When true, launching an activity gives it focus immediately.
    focus_on_launch: bool,
    focused: Mutex<Option<ComponentName>>,
    click_error: Mutex<Option<DriverError>>,
    width_error: Mutex<Option<DriverError>>,
    calls: Mutex<Vec<(Instant, Call)>>,
}

impl MockDriver {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            focus_on_launch: true,
            focused: Mutex::new(None),
            click_error: Mutex::new(None),
            width_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Launched activities never gain focus.
    pub fn never_focus(mut self) -> Self {
        self.focus_on_launch = false;
        self
    }

    /// The next click fails with `err`.
    pub fn failing_click(self, err: DriverError) -> Self {
        *self.click_error.lock().unwrap() = Some(err);
        self
    }

    /// The next width query fails with `err`.
    pub fn failing_width(self, err: DriverError) -> Self {
        *self.width_error.lock().unwrap() = Some(err);
        self
    }

    /// Recorded calls, in arrival order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    /// Recorded calls with their arrival time.
    pub fn timed_calls(&self) -> Vec<(Instant, Call)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push((Instant::now(), call));
    }
}

#[async_trait]
impl DeviceDriver for MockDriver {
    async fn connect(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    fn is_connected(&self) -> bool {
        true
    }

    async fn display_width(&self) -> Result<i32, DriverError> {
        self.record(Call::DisplayWidth);
        match self.width_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(self.width),
        }
    }

    async fn display_height(&self) -> Result<i32, DriverError> {
        self.record(Call::DisplayHeight);
        Ok(self.height)
    }

    async fn click(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.record(Call::Click { x, y });
        match self.click_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn swipe(
        &self,
        _start_x: i32,
        _start_y: i32,
        _end_x: i32,
        _end_y: i32,
        _duration_ms: Option<u64>,
    ) -> Result<(), DriverError> {
        self.record(Call::Swipe);
        Ok(())
    }

    async fn press_key(&self, key: KeyCode) -> Result<(), DriverError> {
        self.record(Call::Key(key));
        Ok(())
    }

    async fn launch_activity(&self, component: &ComponentName) -> Result<(), DriverError> {
        self.record(Call::Launch(component.clone()));
        if self.focus_on_launch {
            *self.focused.lock().unwrap() = Some(component.clone());
        }
        Ok(())
    }

    async fn force_stop(&self, package: &str) -> Result<(), DriverError> {
        self.record(Call::ForceStop(package.to_string()));
        Ok(())
    }

    async fn focused_component(&self) -> Result<Option<ComponentName>, DriverError> {
        self.record(Call::FocusedComponent);
        Ok(self.focused.lock().unwrap().clone())
    }
}
