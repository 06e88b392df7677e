//! Image sources and RGB565 packing.

use alloc::vec::Vec;

use embedded_graphics_core::geometry::Size;
use embedded_graphics_core::pixelcolor::RgbColor;

/// A color with 16 bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgba64 {
    /// Red
    pub r: u16,
    /// Green
    pub g: u16,
    /// Blue
    pub b: u16,
    /// Alpha, ignored by the panel.
    pub a: u16,
}

impl Rgba64 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF);

    /// Creates a color from 16 bit channels.
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Scales any embedded-graphics RGB color to 16 bit channels.
    ///
    /// The full range of each channel maps onto `0..=0xFFFF`, so an 8 bit
    /// value `v` becomes `v * 0x101`.
    pub fn from_rgb<C: RgbColor>(color: C) -> Self {
        Self {
            r: scale(color.r(), C::MAX_R),
            g: scale(color.g(), C::MAX_G),
            b: scale(color.b(), C::MAX_B),
            a: 0xFFFF,
        }
    }

    /// Packs the color as RGB565.
    pub fn to_rgb565(self) -> u16 {
        pack_rgb565(self)
    }
}

fn scale(value: u8, max: u8) -> u16 {
    if max == 0 {
        return 0;
    }
    (u32::from(value) * 0xFFFF / u32::from(max)) as u16
}

/// An addressable grid of pixels.
///
/// Coordinates run from `(0, 0)` to `(size.width - 1, size.height - 1)`.
pub trait Image {
    /// Dimensions in pixels.
    fn size(&self) -> Size;

    /// Color of the pixel at `(x, y)`.
    fn rgba(&self, x: u32, y: u32) -> Rgba64;
}

impl<T: Image + ?Sized> Image for &T {
    fn size(&self) -> Size {
        T::size(self)
    }

    fn rgba(&self, x: u32, y: u32) -> Rgba64 {
        T::rgba(self, x, y)
    }
}

/// Packs the top 5 bits of red, the top 6 bits of green and the top 5 bits
/// of blue into one RGB565 word. Alpha is dropped.
pub fn pack_rgb565(color: Rgba64) -> u16 {
    (color.r & 0xF800) | ((color.g >> 5) & 0x07E0) | (color.b >> 11)
}

/// Converts an image into the big-endian RGB565 stream the panel expects.
///
/// Pixels are emitted column by column (outer loop over x, inner over y),
/// which matches the memory access order configured at init. The result is
/// always `2 * width * height` bytes long.
pub fn to_rgb565<I: Image + ?Sized>(image: &I) -> Vec<u8> {
    let Size { width, height } = image.size();
    let mut out = Vec::with_capacity(width as usize * height as usize * 2);
    for x in 0..width {
        for y in 0..height {
            out.extend_from_slice(&pack_rgb565(image.rgba(x, y)).to_be_bytes());
        }
    }
    out
}
