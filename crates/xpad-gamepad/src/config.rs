use serde::Deserialize;

use crate::normalize::NormalizeMode;

/// Default deadzone, see the XInput dead zone guidance.
pub const DEFAULT_DEADZONE: f64 = 0.08;
/// Default minimum change before an axis update is reported.
pub const DEFAULT_DAMPEN: f64 = 0.000_000_005;

/// Tuning applied by a session when it diffs snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Normalized magnitudes strictly below this are treated as zero.
    pub deadzone: f64,
    /// Axis changes of at most this magnitude are ignored.
    pub dampen: f64,
    pub normalize: NormalizeMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            deadzone: DEFAULT_DEADZONE,
            dampen: DEFAULT_DAMPEN,
            normalize: NormalizeMode::Scale,
        }
    }
}

impl SessionConfig {
    pub fn with_deadzone(mut self, deadzone: f64) -> Self {
        self.deadzone = deadzone;
        self
    }

    pub fn with_dampen(mut self, dampen: f64) -> Self {
        self.dampen = dampen;
        self
    }

    pub fn with_normalize(mut self, normalize: NormalizeMode) -> Self {
        self.normalize = normalize;
        self
    }
}
