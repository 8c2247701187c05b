//! Mark configuration.

use serde::{Deserialize, Serialize};

/// Chart units are millimetres; world units are metres.
pub const DEFAULT_UNIT_SCALE: f32 = 1.0 / 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkConfig {
    /// Multiplier from abstract chart units to world units. Applies to
    /// position, offset and size channels; not to rotation, opacity or the
    /// `*offsetpct` channels.
    pub unit_scale: f32,
}

impl Default for MarkConfig {
    fn default() -> Self {
        Self {
            unit_scale: DEFAULT_UNIT_SCALE,
        }
    }
}
