use crate::foundation::error::{HypnoticError, HypnoticResult};

pub use kurbo::{Point, Vec2};

/// Rational time base of a stream (seconds per tick = `num / den`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TimeBase {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl TimeBase {
    /// Build a time base, rejecting a zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> HypnoticResult<Self> {
        if den == 0 {
            return Err(HypnoticError::validation("TimeBase den must be > 0"));
        }
        if num == 0 {
            return Err(HypnoticError::validation("TimeBase num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Duration of a single tick in seconds.
    pub fn tick_secs(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

impl Default for TimeBase {
    /// Microsecond ticks.
    fn default() -> Self {
        Self {
            num: 1,
            den: 1_000_000,
        }
    }
}

/// Presentation timestamp of a frame, carried through the effect untouched.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Timestamp {
    /// Presentation time in `time_base` ticks.
    pub pts: i64,
    /// Tick length.
    pub time_base: TimeBase,
}

impl Timestamp {
    /// Timestamp at `pts` ticks of `time_base`.
    pub fn new(pts: i64, time_base: TimeBase) -> Self {
        Self { pts, time_base }
    }

    /// Presentation time in seconds.
    pub fn as_secs(self) -> f64 {
        (self.pts as f64) * self.time_base.tick_secs()
    }
}
