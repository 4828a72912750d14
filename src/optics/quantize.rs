use crate::optics::phase::Phase;
use crate::optics::table::PATTERN_PERIOD;

/// Lowest meaningful threshold: every sample is on.
pub const THRESHOLD_MIN: i32 = 0;
/// Highest meaningful threshold: every sample is off.
pub const THRESHOLD_MAX: i32 = PATTERN_PERIOD as i32;

/// Visual decision for one pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternSample {
    /// Light band.
    On,
    /// Dark band.
    Off,
}

impl PatternSample {
    /// Whether this is the light band.
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Clamp a configured threshold into `THRESHOLD_MIN..=THRESHOLD_MAX`.
pub fn clamp_threshold(threshold: i32) -> u32 {
    threshold.clamp(THRESHOLD_MIN, THRESHOLD_MAX) as u32
}

/// Shift `table_value` by `phase` (mod period) and compare against `threshold`.
///
/// Never fails: out-of-range thresholds behave like the nearest bound.
pub fn quantize(table_value: u8, phase: Phase, threshold: i32) -> PatternSample {
    quantize_clamped(table_value, phase, clamp_threshold(threshold))
}

#[inline]
pub(crate) fn quantize_clamped(table_value: u8, phase: Phase, threshold: u32) -> PatternSample {
    let shifted = (u32::from(table_value) + phase.value()) % PATTERN_PERIOD;
    if shifted >= threshold {
        PatternSample::On
    } else {
        PatternSample::Off
    }
}

#[cfg(test)]
#[path = "../../tests/unit/optics/quantize.rs"]
mod tests;
