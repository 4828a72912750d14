use crate::optics::table::PATTERN_PERIOD;

/// Animation offset applied to a [`PatternTable`](crate::PatternTable), always in
/// `0..PATTERN_PERIOD`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Phase(u32);

impl Phase {
    /// Phase zero.
    pub const ZERO: Phase = Phase(0);

    /// Reduce an arbitrary offset into the canonical period.
    pub fn new(value: i64) -> Self {
        Self(value.rem_euclid(i64::from(PATTERN_PERIOD)) as u32)
    }

    /// Canonical value in `0..PATTERN_PERIOD`.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Step by `speed_inc` (any sign) and wrap.
    pub fn advance(self, speed_inc: i32) -> Self {
        Self::new(i64::from(self.0) + i64::from(speed_inc))
    }
}

/// Free-function form of [`Phase::advance`].
pub fn advance(phase: Phase, speed_inc: i32) -> Phase {
    phase.advance(speed_inc)
}

#[cfg(test)]
#[path = "../../tests/unit/optics/phase.rs"]
mod tests;
