use crate::frame::video::PixelFormat;
use crate::optics::phase::Phase;
use crate::optics::quantize::{PatternSample, quantize_clamped};

/// Luma above which a source pixel counts as bright for [`Combine::LumaXor`].
pub const LUMA_CUT: u8 = 127;

/// How a pattern sample is merged with the source pixel.
///
/// Fixed per effect instance so the look is stable from frame to frame.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Combine {
    /// On -> white, off -> black. Alpha is kept.
    #[default]
    Replace,
    /// On -> source pixel, off -> source with colour channels inverted. Alpha is kept.
    Invert,
    /// White where the sample and the source brightness disagree, black elsewhere.
    LumaXor,
}

/// Integer BT.601 luma.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * u32::from(r) + 150 * u32::from(g) + 29 * u32::from(b) + 128) >> 8) as u8
}

/// Everything needed to turn one source row into one output row.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RowPass {
    pub(crate) combine: Combine,
    pub(crate) format: PixelFormat,
    pub(crate) phase: Phase,
    pub(crate) threshold: u32,
}

impl RowPass {
    /// `src` and `dst` hold exactly `table.len()` packed pixels.
    pub(crate) fn run(&self, table: &[u8], src: &[u8], dst: &mut [u8]) {
        let bpp = self.format.bytes_per_pixel();
        for ((&t, s), d) in table
            .iter()
            .zip(src.chunks_exact(bpp))
            .zip(dst.chunks_exact_mut(bpp))
        {
            let sample = quantize_clamped(t, self.phase, self.threshold);
            combine_pixel(self.combine, self.format, sample, s, d);
        }
    }
}

fn combine_pixel(
    combine: Combine,
    format: PixelFormat,
    sample: PatternSample,
    src: &[u8],
    dst: &mut [u8],
) {
    let rgb = format.rgb_offsets();
    match combine {
        Combine::Replace => fill(dst, rgb, level(sample.is_on())),
        Combine::Invert => {
            if sample.is_on() {
                dst.copy_from_slice(src);
                return;
            }
            for o in rgb {
                dst[o] = 255 - src[o];
            }
        }
        Combine::LumaXor => {
            let bright = luma(src[rgb[0]], src[rgb[1]], src[rgb[2]]) > LUMA_CUT;
            fill(dst, rgb, level(sample.is_on() ^ bright));
        }
    }
    if let Some(a) = format.alpha_offset() {
        dst[a] = src[a];
    }
}

fn fill(dst: &mut [u8], rgb: [usize; 3], v: u8) {
    for o in rgb {
        dst[o] = v;
    }
}

fn level(on: bool) -> u8 {
    if on { 255 } else { 0 }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/combine.rs"]
mod tests;
