use crate::foundation::error::HypnoticResult;
use crate::optics::mode::OpticMode;

/// Default per-frame phase step.
pub const DEFAULT_SPEED_INC: i32 = 16;
/// Default threshold, the middle of the pattern domain.
pub const DEFAULT_THRESHOLD: i32 = 128;

/// User-facing effect properties.
///
/// Serialized with camelCase keys (`mode`, `speedInc`, `threshold`); missing keys take defaults.
/// `threshold` is stored as given and clamped only when a frame is processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectConfig {
    /// Pattern geometry.
    pub mode: OpticMode,
    /// Phase step per processed frame; negative values reverse the motion.
    pub speed_inc: i32,
    /// Quantization cut point.
    pub threshold: i32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            mode: OpticMode::default(),
            speed_inc: DEFAULT_SPEED_INC,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl EffectConfig {
    /// Parse a JSON object such as `{"mode": "parabola", "speedInc": -4}`.
    pub fn from_json_str(s: &str) -> HypnoticResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to a JSON object.
    pub fn to_json_value(&self) -> HypnoticResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/config.rs"]
mod tests;
