//! AssignDevice configuration.
//!
//! Built explicitly with [`AssignDeviceConfig::builder`] or read from the
//! environment with [`AssignDeviceConfig::from_env`].

use bon::bon;

/// Environment variable holding the target device string.
pub const TARGET_DEVICE_ENV: &str = "TESSEL_TARGET_DEVICE";

const DEFAULT_TARGET: &str = "cpu";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignDeviceConfig {
    /// Device every device-producing call is moved to, e.g. `"cuda:1"`.
    pub target: String,
}

impl Default for AssignDeviceConfig {
    fn default() -> Self {
        Self { target: DEFAULT_TARGET.to_string() }
    }
}

#[bon]
impl AssignDeviceConfig {
    #[builder]
    pub fn new(#[builder(into)] target: String) -> Self {
        Self { target }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `TESSEL_TARGET_DEVICE` - Target device (default: `cpu`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let target = lookup(TARGET_DEVICE_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TARGET.to_string());
        Self { target }
    }
}
