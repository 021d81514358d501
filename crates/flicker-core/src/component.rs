//! Component names and the flicker test app's activity registry.
//!
//! Helpers identify the app they drive by a [`ComponentsInfo`]: the
//! launcher label of the activity plus its fully qualified
//! [`ComponentName`]. The [`Components`] registry lists the activities
//! shipped in the flicker test app.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Package of the flicker test app.
pub const TEST_APP_PACKAGE: &str = "com.android.wm.shell.flicker.testapp";

/// A fully qualified Android component: `package/class`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentName {
    /// Application package, e.g. `com.android.settings`.
    pub package: String,
    /// Fully qualified activity class.
    pub class: String,
}

impl ComponentName {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }

    /// Parses `package/class`.
    ///
    /// A class starting with `.` is relative to the package, as in
    /// `com.example/.MainActivity`. Returns `None` if either half is empty.
    pub fn parse(s: &str) -> Option<Self> {
        let (package, class) = s.trim().split_once('/')?;
        if package.is_empty() || class.is_empty() {
            return None;
        }
        let class = if class.starts_with('.') {
            format!("{}{}", package, class)
        } else {
            class.to_string()
        };
        Some(Self::new(package, class))
    }

    /// Renders the component as `package/class`.
    pub fn flatten_to_string(&self) -> String {
        format!("{}/{}", self.package, self.class)
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.class)
    }
}

/// Identifying metadata for an activity under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentsInfo {
    /// Launcher label of the activity.
    pub label: String,
    /// The activity's component name.
    pub component: ComponentName,
}

impl ComponentsInfo {
    pub fn new(label: impl Into<String>, component: ComponentName) -> Self {
        Self {
            label: label.into(),
            component,
        }
    }

    /// Package the activity belongs to.
    pub fn package(&self) -> &str {
        &self.component.package
    }
}

/// `(label, class simple name)` for each activity of the test app.
const TEST_APP_ACTIVITIES: &[(&str, &str)] = &[
    ("SimpleApp", "SimpleActivity"),
    ("SplitScreenPrimaryApp", "SplitScreenActivity"),
    ("SplitScreenSecondaryApp", "SplitScreenSecondaryActivity"),
    ("NonResizeableApp", "NonResizeableActivity"),
    ("ImeApp", "ImeActivity"),
    ("PipApp", "PipActivity"),
];

/// Registry of the activities in the flicker test app.
pub struct Components;

impl Components {
    fn info(label: &str, simple_name: &str) -> ComponentsInfo {
        ComponentsInfo::new(
            label,
            ComponentName::new(
                TEST_APP_PACKAGE,
                format!("{}.{}", TEST_APP_PACKAGE, simple_name),
            ),
        )
    }

    /// All registered activities, in registration order.
    pub fn all() -> Vec<ComponentsInfo> {
        TEST_APP_ACTIVITIES
            .iter()
            .map(|(label, name)| Self::info(label, name))
            .collect()
    }

    /// Looks an activity up by its launcher label (case-insensitive).
    pub fn by_label(label: &str) -> Option<ComponentsInfo> {
        TEST_APP_ACTIVITIES
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .map(|(l, name)| Self::info(l, name))
    }

    pub fn simple() -> ComponentsInfo {
        Self::info("SimpleApp", "SimpleActivity")
    }

    pub fn split_screen_primary() -> ComponentsInfo {
        Self::info("SplitScreenPrimaryApp", "SplitScreenActivity")
    }

    pub fn split_screen_secondary() -> ComponentsInfo {
        Self::info("SplitScreenSecondaryApp", "SplitScreenSecondaryActivity")
    }

    pub fn non_resizeable() -> ComponentsInfo {
        Self::info("NonResizeableApp", "NonResizeableActivity")
    }
}
