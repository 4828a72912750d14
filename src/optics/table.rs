use std::f64::consts::PI;

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{HypnoticError, HypnoticResult, try_zeroed};
use crate::optics::mode::OpticMode;

/// Period of every pattern table: entries live in `0..PATTERN_PERIOD` and phase wraps at it.
pub const PATTERN_PERIOD: u32 = 256;

/// Row count the horizontal stripe spacing is tuned for; shorter frames get wider bands.
const STRIPE_REFERENCE_HEIGHT: u32 = 480;

/// Per-pixel illusion intensity for one frame geometry and mode, at phase zero.
///
/// Row-major, one `u8` per pixel, values in `0..PATTERN_PERIOD`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternTable {
    width: u32,
    height: u32,
    mode: OpticMode,
    values: Vec<u8>,
}

impl PatternTable {
    /// Build the table for `width x height` pixels.
    ///
    /// Identical inputs always produce identical tables.
    #[tracing::instrument(level = "debug")]
    pub fn build(width: u32, height: u32, mode: OpticMode) -> HypnoticResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| HypnoticError::validation("pattern table size overflow"))?;
        let mut values = try_zeroed(len, "pattern table")?;

        if len > 0 {
            let geometry = Geometry::new(width, height);
            for (y, row) in values.chunks_exact_mut(width as usize).enumerate() {
                let y = y as u32;
                for (x, v) in row.iter_mut().enumerate() {
                    *v = geometry.sample(mode, x as u32, y);
                }
            }
        }

        Ok(Self {
            width,
            height,
            mode,
            values,
        })
    }

    /// Table width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Table height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Geometry the table was built for.
    pub fn mode(&self) -> OpticMode {
        self.mode
    }

    /// All entries, row-major.
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Entries of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y as usize) * (self.width as usize);
        &self.values[start..start + self.width as usize]
    }

    /// Entry at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    /// Whether this table can be reused for a frame of the given geometry and mode.
    pub fn matches(&self, width: u32, height: u32, mode: OpticMode) -> bool {
        self.width == width && self.height == height && self.mode == mode
    }
}

struct Geometry {
    width: f64,
    center: Point,
    stripe_scale: u64,
}

impl Geometry {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            center: Point::new(f64::from(width) / 2.0, f64::from(height / 2)),
            stripe_scale: u64::from((STRIPE_REFERENCE_HEIGHT / height.max(1)).max(1)),
        }
    }

    /// Offset from the centre, in units of frame width.
    fn offset(&self, x: u32, y: u32) -> Vec2 {
        (Point::new(f64::from(x), f64::from(y)) - self.center) / self.width
    }

    fn sample(&self, mode: OpticMode, x: u32, y: u32) -> u8 {
        match mode {
            OpticMode::Spiral1 => {
                let d = self.offset(x, y);
                wrap(angle(d) / PI * 256.0 + d.hypot() * 4000.0)
            }
            OpticMode::Spiral2 => {
                let d = self.offset(x, y);
                let r = d.hypot();
                wrap(angle(d) / PI * 4096.0 + r * 1600.0 - ring_step(r))
            }
            OpticMode::Parabola => {
                let d = self.offset(x, y);
                wrap(d.y / (d.x * d.x * 0.3 + 0.1) * 400.0)
            }
            OpticMode::HorizontalStripe => {
                ((u64::from(y) * 8 * self.stripe_scale) % u64::from(PATTERN_PERIOD)) as u8
            }
        }
    }
}

/// Angle measured from the vertical axis, in `-PI..=PI`.
fn angle(d: Vec2) -> f64 {
    d.x.atan2(d.y)
}

/// Concentric ring offset for the stepped spiral: jumps by 64 every 32 units of `r * 300`,
/// ramping up over the last 4 units of each ring.
fn ring_step(r: f64) -> f64 {
    let scaled = r * 300.0;
    let ring = (scaled / 32.0).floor();
    let within = scaled - ring * 32.0;
    let ramp = if within > 28.0 {
        (within - 28.0) * 16.0
    } else {
        0.0
    };
    ring * 64.0 + ramp
}

fn wrap(v: f64) -> u8 {
    (v.floor() as i64).rem_euclid(i64::from(PATTERN_PERIOD)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/optics/table.rs"]
mod tests;
