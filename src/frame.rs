//! An in-memory image that `embedded-graphics` can draw into.
//!
//! [`Frame`] wraps a caller-owned slice of colors and implements both
//! [`DrawTarget`] and [`Image`]. A complete scene is drawn off-screen and then
//! sent to the panel in one [`Display::set_image`](crate::Display::set_image)
//! call.
//!
//! # Example
//!
//! ```
//! use embedded_graphics::pixelcolor::Rgb565;
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::{Circle, PrimitiveStyle};
//! use st7735_spi::frame::Frame;
//!
//! const WIDTH: usize = 80;
//! const HEIGHT: usize = 160;
//!
//! let mut pixels = [Rgb565::BLACK; WIDTH * HEIGHT];
//! let mut frame = Frame::new(&mut pixels[..], WIDTH, HEIGHT);
//!
//! Circle::new(Point::new(20, 60), 40)
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
//!     .draw(&mut frame)
//!     .unwrap();
//!
//! assert_eq!(frame.pixel(Point::new(40, 80)), Some(Rgb565::RED));
//! ```

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions},
    pixelcolor::RgbColor,
    prelude::*,
    primitives::Rectangle,
    Pixel,
};

use crate::image::{Image, Rgba64};

/// A row-major framebuffer of `C` colors.
pub struct Frame<'a, C> {
    pixels: &'a mut [C],
    width: usize,
    height: usize,
}

impl<'a, C> Frame<'a, C>
where
    C: RgbColor,
{
    /// Creates a new frame over `pixels`.
    ///
    /// # Panics
    ///
    /// Panics if `pixels` holds fewer than `width * height` colors.
    pub fn new(pixels: &'a mut [C], width: usize, height: usize) -> Self {
        let expected_len = width * height;
        assert!(
            pixels.len() >= expected_len,
            "Frame buffer is too small. Expected at least {}, got {}.",
            expected_len,
            pixels.len()
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Returns the width of the frame in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the frame in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at `point`, or `None` outside the frame.
    pub fn pixel(&self, point: Point) -> Option<C> {
        self.index(point).map(|i| self.pixels[i])
    }

    /// The active pixels, row by row.
    pub fn as_slice(&self) -> &[C] {
        &self.pixels[..self.width * self.height]
    }

    fn index(&self, point: Point) -> Option<usize> {
        if self.bounding_box().contains(point) {
            Some(point.y as usize * self.width + point.x as usize)
        } else {
            None
        }
    }
}

impl<C> OriginDimensions for Frame<'_, C> {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl<C> DrawTarget for Frame<'_, C>
where
    C: RgbColor,
{
    type Color = C;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(i) = self.index(coord) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let (x0, x1) = (area.top_left.x as usize, bottom_right.x as usize);
        for y in area.top_left.y as usize..=bottom_right.y as usize {
            let row = y * self.width;
            self.pixels[row + x0..=row + x1].fill(color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let len = self.width * self.height;
        self.pixels[..len].fill(color);
        Ok(())
    }
}

impl<C> Image for Frame<'_, C>
where
    C: RgbColor,
{
    fn size(&self) -> Size {
        OriginDimensions::size(self)
    }

    fn rgba(&self, x: u32, y: u32) -> Rgba64 {
        Rgba64::from_rgb(self.pixels[y as usize * self.width + x as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::to_rgb565;
    use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn draws_inside_bounds_only() {
        let mut buf = [Rgb565::BLACK; 4 * 3];
        let mut frame = Frame::new(&mut buf[..], 4, 3);
        frame
            .draw_iter([
                Pixel(Point::new(1, 2), Rgb565::RED),
                Pixel(Point::new(4, 0), Rgb565::RED),
                Pixel(Point::new(-1, 0), Rgb565::RED),
            ])
            .unwrap();
        assert_eq!(frame.pixel(Point::new(1, 2)), Some(Rgb565::RED));
        assert_eq!(frame.pixel(Point::new(4, 0)), None);
        assert_eq!(
            frame.as_slice().iter().filter(|c| **c == Rgb565::RED).count(),
            1
        );
    }

    #[test]
    fn fill_solid_is_clipped() {
        let mut buf = [Rgb888::BLACK; 5 * 5];
        let mut frame = Frame::new(&mut buf[..], 5, 5);
        Rectangle::new(Point::new(3, 3), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::WHITE))
            .draw(&mut frame)
            .unwrap();
        let white = frame
            .as_slice()
            .iter()
            .filter(|c| **c == Rgb888::WHITE)
            .count();
        assert_eq!(white, 4);
        assert_eq!(frame.pixel(Point::new(4, 4)), Some(Rgb888::WHITE));
        assert_eq!(frame.pixel(Point::new(2, 4)), Some(Rgb888::BLACK));
    }

    #[test]
    fn converts_column_major() {
        let mut buf = [Rgb565::BLACK; 2 * 2];
        let mut frame = Frame::new(&mut buf[..], 2, 2);
        frame.clear(Rgb565::BLUE).unwrap();
        frame
            .draw_iter([Pixel(Point::new(1, 0), Rgb565::RED)])
            .unwrap();
        // (0,0) (0,1) (1,0) (1,1)
        assert_eq!(
            to_rgb565(&frame),
            [0x00, 0x1F, 0x00, 0x1F, 0xF8, 0x00, 0x00, 0x1F]
        );
    }

    #[test]
    #[should_panic]
    fn short_buffer_panics() {
        let mut buf = [Rgb565::BLACK; 3];
        let _ = Frame::new(&mut buf[..], 2, 2);
    }
}
