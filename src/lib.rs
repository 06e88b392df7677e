#![no_std]
//! Blocking driver for the Sitronix ST7735 TFT LCD controller.
//!
//! The controller is connected over four-wire SPI (clock, data, chip select
//! and a data/command select line) plus a hardware reset line. [`Display::new`]
//! connects to the bus, resets the controller and runs the power-on sequence;
//! [`Display::set_image`] converts an [`Image`] to RGB565 and streams it to the
//! visible area described by a [`PanelGeometry`].
//!
//! # Example
//!
//! ```
//! use embedded_graphics::pixelcolor::Rgb565;
//! use embedded_graphics::prelude::*;
//! use st7735_spi::{frame::Frame, geometry::Mini, interface::Preconfigured, Display, NoChipSelect};
//! # use st7735_spi::_mock::{MockDelay, MockOutputPin, MockSpi};
//! # let (spi, dc, rst, mut delay) = (MockSpi, MockOutputPin, MockOutputPin, MockDelay);
//!
//! let mut display = Display::new(
//!     Preconfigured::new(spi),
//!     dc,
//!     rst,
//!     NoChipSelect,
//!     Mini,
//!     &mut delay,
//! )
//! .unwrap();
//!
//! let size = display.image_size();
//! let mut pixels = [Rgb565::BLACK; 160 * 80];
//! let mut frame = Frame::new(&mut pixels[..], size.width as usize, size.height as usize);
//! frame.clear(Rgb565::GREEN).unwrap();
//!
//! display.set_image(&frame).unwrap();
//! ```
//!
//! # Logging
//!
//! With the default `log` feature the driver reports bus negotiation,
//! commands and failures through the `log` crate. Enable `defmt` instead
//! (with `default-features = false`) to log through `defmt`.

extern crate alloc;

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible to the other modules.
mod fmt;

pub mod dcs;
use dcs::Command;

mod error;
pub use error::Error;

pub mod frame;
pub mod geometry;
use geometry::PanelGeometry;

pub mod image;
pub use image::{Image, Rgba64};

pub mod interface;
use interface::{Interface, SpiInterface, SpiPort, BUS_CONFIG, DEFAULT_MAX_TRANSFER_SIZE};

pub mod _troubleshooting;

#[doc(hidden)]
pub mod _mock;

#[cfg(test)]
mod testing;

use embedded_graphics_core::geometry::Size;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

/// Hold time for each phase of the hardware reset.
pub const RESET_DELAY_MS: u32 = 50;

/// Settle time after entering or leaving sleep mode.
pub const SLEEP_DELAY_MS: u32 = 120;

///
/// Display driver for ST7735 based TFT panels.
///
pub struct Display<DI, G, RST, CS>
where
    DI: Interface,
    G: PanelGeometry,
    RST: OutputPin,
    CS: InputPin,
{
    // Command interface
    di: DI,
    // Visible area inside controller memory
    geometry: G,
    // Reset pin, active low
    rst: RST,
    // Chip select, owned but never driven
    cs: CS,
    sleeping: bool,
}

impl<SPI, DC, G, RST, CS> Display<SpiInterface<SPI, DC>, G, RST, CS>
where
    SPI: SpiDevice,
    DC: OutputPin,
    G: PanelGeometry,
    RST: OutputPin,
    CS: InputPin,
{
    ///
    /// Connects to the controller over `port` and initializes it.
    ///
    /// The bus is requested at 4 MHz, SPI mode 0 with 8 bit words. Data
    /// transfers are split at the transaction size the port reports, or at
    /// [`DEFAULT_MAX_TRANSFER_SIZE`] bytes when it reports none.
    ///
    /// Any failure aborts construction. Commands already sent are not undone.
    ///
    pub fn new<P, D>(
        mut port: P,
        dc: DC,
        rst: RST,
        cs: CS,
        geometry: G,
        delay: &mut D,
    ) -> Result<Self, Error>
    where
        P: SpiPort<Connection = SPI>,
        D: DelayNs,
    {
        let spi = port.connect(&BUS_CONFIG).map_err(|err| {
            let err = Error::connection(err);
            warn!("could not connect to device: {:?}", err);
            err
        })?;

        let max_transfer_size = match port.max_transfer_size(&spi) {
            Some(size) if size > 0 => size,
            _ => DEFAULT_MAX_TRANSFER_SIZE,
        };
        debug!("connected, max transfer size {} bytes", max_transfer_size);

        let di = SpiInterface::new(spi, dc).with_max_transfer_size(max_transfer_size);
        Self::with_interface(di, rst, cs, geometry, delay)
    }

    /// Largest number of bytes sent in a single bus transaction.
    pub fn max_transfer_size(&self) -> usize {
        self.di.max_transfer_size()
    }
}

impl<DI, G, RST, CS> Display<DI, G, RST, CS>
where
    DI: Interface,
    G: PanelGeometry,
    RST: OutputPin,
    CS: InputPin,
{
    ///
    /// Resets and initializes the controller over an existing interface.
    ///
    pub fn with_interface<D: DelayNs>(
        di: DI,
        rst: RST,
        cs: CS,
        geometry: G,
        delay: &mut D,
    ) -> Result<Self, Error> {
        let mut display = Self {
            di,
            geometry,
            rst,
            cs,
            sleeping: false,
        };

        display.hard_reset(delay)?;
        display.init(delay)?;

        Ok(display)
    }

    /// Returns the panel geometry.
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    ///
    /// Size of the image [`set_image`](Self::set_image) expects.
    ///
    /// Images are streamed column by column, so the image width runs along
    /// the controller's rows and the image height along its columns.
    ///
    pub fn image_size(&self) -> Size {
        Size::new(
            u32::from(self.geometry.visible_height()),
            u32::from(self.geometry.visible_width()),
        )
    }

    ///
    /// Converts `image` to RGB565 and writes it to the whole visible area.
    ///
    /// On error the controller's write window is left undefined; the next
    /// write sets it again.
    ///
    pub fn set_image<I: Image + ?Sized>(&mut self, image: &I) -> Result<(), Error> {
        let (x0, x1) = (self.geometry.offset_x(), self.geometry.offset_x_end());
        let (y0, y1) = (self.geometry.offset_y(), self.geometry.offset_y_end());
        self.set_window_address(x0.into(), x1.into(), y0.into(), y1.into())?;

        let size = image.size();
        if size != self.image_size() {
            warn!(
                "image is {}x{}, panel expects {}x{}",
                size.width,
                size.height,
                self.image_size().width,
                self.image_size().height
            );
        }

        let pixels = image::to_rgb565(image);
        debug!("writing {} bytes of pixel data", pixels.len());
        self.di.send_data_slice(&pixels)
    }

    ///
    /// Writes pre-packed big-endian RGB565 data to a rectangle of the
    /// visible area.
    ///
    /// `x` counts controller columns and `y` controller rows, both relative
    /// to the geometry's offsets. `pixel_data` is written row by row in
    /// controller order and must hold exactly `2 * width * height` bytes.
    ///
    /// Rectangles outside the visible area and data of the wrong length fail
    /// with [`Error::OutOfBounds`] before anything is sent.
    ///
    pub fn show_raw_data(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        pixel_data: &[u8],
    ) -> Result<(), Error> {
        let fits = |start: u16, len: u16, visible: u16| {
            len > 0 && start.checked_add(len).is_some_and(|end| end <= visible)
        };
        if !fits(x, width, self.geometry.visible_width())
            || !fits(y, height, self.geometry.visible_height())
        {
            return Err(Error::OutOfBounds);
        }
        if pixel_data.len() != 2 * usize::from(width) * usize::from(height) {
            warn!(
                "raw data is {} bytes, {}x{} window needs {}",
                pixel_data.len(),
                width,
                height,
                2 * usize::from(width) * usize::from(height)
            );
            return Err(Error::OutOfBounds);
        }

        let sx = u16::from(self.geometry.offset_x()) + x;
        let sy = u16::from(self.geometry.offset_y()) + y;
        self.set_window_address(sx, sx + width - 1, sy, sy + height - 1)?;
        self.di.send_data_slice(pixel_data)
    }

    ///
    /// Returns `true` if display is currently set to sleep.
    ///
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    ///
    /// Puts the display to sleep, reducing power consumption.
    /// Need to call [Self::wake] before issuing other commands
    ///
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.send(Command::new(dcs::SLPIN).delay_ms(SLEEP_DELAY_MS), delay)?;
        self.sleeping = true;
        Ok(())
    }

    ///
    /// Wakes the display after it's been set to sleep via [Self::sleep]
    ///
    pub fn wake<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.send(Command::new(dcs::SLPOUT).delay_ms(SLEEP_DELAY_MS), delay)?;
        self.sleeping = false;
        Ok(())
    }

    /// Turns the panel output on or off. Display memory is kept.
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error> {
        self.command(if on { dcs::DISPON } else { dcs::DISPOFF }, &[])
    }

    /// Enables or disables color inversion.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error> {
        self.command(if inverted { dcs::INVON } else { dcs::INVOFF }, &[])
    }

    /// Enables or disables the reduced color idle mode.
    pub fn set_idle_mode(&mut self, idle: bool) -> Result<(), Error> {
        self.command(if idle { dcs::IDMON } else { dcs::IDMOFF }, &[])
    }

    /// Switches between partial and normal display mode.
    pub fn set_partial_mode(&mut self, partial: bool) -> Result<(), Error> {
        self.command(if partial { dcs::PTLON } else { dcs::NORON }, &[])
    }

    ///
    /// Configures the tearing effect output.
    ///
    pub fn set_tearing_effect(&mut self, tearing_effect: dcs::TearingEffect) -> Result<(), Error> {
        let command = tearing_effect.command();
        self.command(command.opcode, command.args)
    }

    /// Selects one of the predefined gamma curves.
    pub fn set_gamma_curve(&mut self, curve: dcs::GammaCurve) -> Result<(), Error> {
        self.command(dcs::GAMSET, &[curve.value()])
    }

    /// Returns the chip select pin.
    pub fn chip_select(&mut self) -> &mut CS {
        &mut self.cs
    }

    ///
    /// Release resources allocated to this driver back.
    /// This returns the interface, reset pin, chip select pin and geometry.
    ///
    /// No shutdown sequence is sent.
    ///
    pub fn release(self) -> (DI, RST, CS, G) {
        (self.di, self.rst, self.cs, self.geometry)
    }

    /// Returns the interface for sending raw commands.
    ///
    /// # Safety
    ///
    /// Sending raw commands to the controller can lead to undefined behaviour,
    /// because the rest of the code isn't aware of any state changes that were caused by sending raw commands.
    /// The user must ensure that the state of the controller isn't altered in a way that interferes with the normal
    /// operation of this crate.
    pub unsafe fn dcs(&mut self) -> &mut DI {
        &mut self.di
    }

    fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.rst.set_high().map_err(Error::pin)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_low().map_err(Error::pin)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high().map_err(Error::pin)?;
        delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }

    fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        let columns = dcs::address_range(
            self.geometry.offset_x().into(),
            self.geometry.offset_x_end().into(),
        );
        let rows = dcs::address_range(
            self.geometry.offset_y().into(),
            self.geometry.offset_y_end().into(),
        );

        for command in dcs::init_sequence(&columns, &rows) {
            self.send(command, delay).map_err(|err| {
                warn!("init command {:#x} failed: {:?}", command.opcode, err);
                err
            })?;
        }

        debug!("display initialized");
        Ok(())
    }

    // Sets the write window, then starts a memory write.
    fn set_window_address(&mut self, x0: u16, x1: u16, y0: u16, y1: u16) -> Result<(), Error> {
        trace!("window x {}..={} y {}..={}", x0, x1, y0, y1);
        self.command(dcs::CASET, &dcs::address_range(x0, x1))?;
        self.command(dcs::RASET, &dcs::address_range(y0, y1))?;
        self.command(dcs::RAMWR, &[])
    }

    fn command(&mut self, opcode: u8, args: &[u8]) -> Result<(), Error> {
        trace!("command {:#x}, {} parameter bytes", opcode, args.len());
        self.di.send_command(opcode, args)
    }

    fn send<D: DelayNs>(&mut self, command: Command<'_>, delay: &mut D) -> Result<(), Error> {
        self.command(command.opcode, command.args)?;
        if command.delay_ms > 0 {
            delay.delay_ms(command.delay_ms);
        }
        Ok(())
    }
}

/// Placeholder for a chip select line the driver does not see.
///
/// Chip select is normally handled by the [`SpiDevice`]; use this when the
/// pin is not passed to [`Display::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoChipSelect;

impl ErrorType for NoChipSelect {
    type Error = core::convert::Infallible;
}

impl InputPin for NoChipSelect {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}
