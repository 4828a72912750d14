use crate::foundation::core::Timestamp;
use crate::foundation::error::{HypnoticError, HypnoticResult, try_zeroed};

/// Packed 8-bit pixel layouts the effect can read and write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// `R G B A`, straight alpha.
    Rgba8,
    /// `B G R A`, straight alpha.
    Bgra8,
    /// `R G B`.
    Rgb8,
    /// `B G R`.
    Bgr8,
    /// Single luma byte.
    Gray8,
}

impl PixelFormat {
    /// Bytes occupied by one pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 | Self::Bgra8 => 4,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Gray8 => 1,
        }
    }

    /// Byte offsets of the red, green and blue samples within a pixel.
    ///
    /// `Gray8` maps all three to its single luma byte.
    pub fn rgb_offsets(self) -> [usize; 3] {
        match self {
            Self::Rgba8 | Self::Rgb8 => [0, 1, 2],
            Self::Bgra8 | Self::Bgr8 => [2, 1, 0],
            Self::Gray8 => [0, 0, 0],
        }
    }

    /// Byte offset of the alpha sample, if the format has one.
    pub fn alpha_offset(self) -> Option<usize> {
        match self {
            Self::Rgba8 | Self::Bgra8 => Some(3),
            Self::Rgb8 | Self::Bgr8 | Self::Gray8 => None,
        }
    }

    /// Whether the format stores a single luma sample.
    pub fn is_gray(self) -> bool {
        matches!(self, Self::Gray8)
    }

    /// Tightly packed row length in bytes.
    pub fn packed_stride(self, width: u32) -> HypnoticResult<usize> {
        (width as usize)
            .checked_mul(self.bytes_per_pixel())
            .ok_or_else(|| HypnoticError::validation("frame row size overflow"))
    }
}

/// One uncompressed video frame.
///
/// Rows are `stride` bytes apart; only the first `width * bytes_per_pixel` bytes of each row are
/// pixels. Constructors validate that `data` covers every row, so consumers can index freely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFrame {
    width: u32,
    height: u32,
    format: PixelFormat,
    stride: usize,
    data: Vec<u8>,
    timestamp: Timestamp,
}

impl VideoFrame {
    /// Allocate a zeroed, tightly packed frame.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        timestamp: Timestamp,
    ) -> HypnoticResult<Self> {
        let stride = format.packed_stride(width)?;
        let len = stride
            .checked_mul(height as usize)
            .ok_or_else(|| HypnoticError::validation("frame buffer size overflow"))?;
        Ok(Self {
            width,
            height,
            format,
            stride,
            data: try_zeroed(len, "frame buffer")?,
            timestamp,
        })
    }

    /// Wrap an existing buffer.
    ///
    /// `stride` must hold at least one packed row and `data` at least `stride * height` bytes
    /// (the final row may omit its padding). Empty geometry accepts any buffer.
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        stride: usize,
        data: Vec<u8>,
        timestamp: Timestamp,
    ) -> HypnoticResult<Self> {
        if width > 0 && height > 0 {
            let row = format.packed_stride(width)?;
            if stride < row {
                return Err(HypnoticError::validation(format!(
                    "frame stride {stride} is shorter than a packed row ({row} bytes)"
                )));
            }
            let needed = stride
                .checked_mul(height as usize - 1)
                .and_then(|v| v.checked_add(row))
                .ok_or_else(|| HypnoticError::validation("frame buffer size overflow"))?;
            if data.len() < needed {
                return Err(HypnoticError::validation(format!(
                    "frame buffer holds {} bytes, {width}x{height} {format:?} needs {needed}",
                    data.len()
                )));
            }
        }
        Ok(Self {
            width,
            height,
            format,
            stride,
            data,
            timestamp,
        })
    }

    /// Build an `Rgba8` frame from an [`image::RgbaImage`].
    pub fn from_rgba_image(img: image::RgbaImage, timestamp: Timestamp) -> HypnoticResult<Self> {
        let (width, height) = img.dimensions();
        let stride = PixelFormat::Rgba8.packed_stride(width)?;
        Self::from_raw(
            width,
            height,
            PixelFormat::Rgba8,
            stride,
            img.into_raw(),
            timestamp,
        )
    }

    /// Convert to an [`image::RgbaImage`], expanding gray/RGB formats to opaque RGBA.
    pub fn to_rgba_image(&self) -> HypnoticResult<image::RgbaImage> {
        let len = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| HypnoticError::validation("image buffer size overflow"))?;
        let mut out = try_zeroed(len, "rgba image")?;
        let mut dst = out.chunks_exact_mut(4);
        for y in 0..self.height {
            for px in self.row(y).chunks_exact(self.format.bytes_per_pixel()) {
                let Some(d) = dst.next() else {
                    break;
                };
                d.copy_from_slice(&rgba_of(self.format, px));
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, out)
            .ok_or_else(|| HypnoticError::validation("rgba image buffer has the wrong length"))
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Distance between row starts in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Presentation timestamp.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Raw buffer, including any row padding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel bytes of row `y` (padding excluded).
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y as usize) * self.stride;
        &self.data[start..start + (self.width as usize) * self.format.bytes_per_pixel()]
    }

    /// Bytes of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = (y as usize) * self.stride + (x as usize) * bpp;
        self.data.get(start..start + bpp)
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

fn rgba_of(format: PixelFormat, px: &[u8]) -> [u8; 4] {
    let [r, g, b] = format.rgb_offsets();
    let a = format.alpha_offset().map_or(255, |i| px[i]);
    [px[r], px[g], px[b], a]
}

#[cfg(test)]
#[path = "../../tests/unit/frame/video.rs"]
mod tests;
