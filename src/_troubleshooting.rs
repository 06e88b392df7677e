//! # Troubleshooting guide
//!
//! This guide lists common issues that can cause a blank or corrupted display.
//!
//! ## Display stays black/blank
//!
//! ### Reset pin
//!
//! The reset pin of the ST7735 is active low and must be driven **high** for
//! the display to operate. [`Display::new`](crate::Display::new) pulses it
//! high, low and high again with 50 ms between steps, so the pin has to be
//! wired to a GPIO the driver owns.
//!
//! ### Backlight pin
//!
//! This driver does **NOT** handle the backlight pin to keep the code simpler.
//! Users must control the backlight manually. First thing to try is to see if
//! setting the backlight pin to high fixes the issue.
//!
//! ### Transport misconfiguration
//!
//! The driver asks the [`SpiPort`](crate::interface::SpiPort) for 4 MHz,
//! SPI mode 0 and 8 bit words. A [`Preconfigured`](crate::interface::Preconfigured)
//! port cannot apply these settings, so the wrapped device must already use
//! them. Faster clocks often work but are outside the datasheet timing.
//!
//! ### Transfers larger than the SPI driver allows
//!
//! Some SPI drivers reject transactions above a DMA or FIFO limit. Report the
//! limit through [`SpiPort::max_transfer_size`](crate::interface::SpiPort::max_transfer_size)
//! or [`Preconfigured::with_max_transfer_size`](crate::interface::Preconfigured::with_max_transfer_size)
//! and pixel data is split accordingly. Without a report the driver uses
//! 4096 byte transactions.
//!
//! ```
//! # use st7735_spi::{geometry::Standard, interface::Preconfigured, Display, NoChipSelect};
//! # use st7735_spi::_mock::{MockDelay, MockOutputPin, MockSpi};
//! let port = Preconfigured::new(MockSpi).with_max_transfer_size(64);
//! let display = Display::new(
//!     port,
//!     MockOutputPin,
//!     MockOutputPin,
//!     NoChipSelect,
//!     Standard,
//!     &mut MockDelay,
//! )
//! .unwrap();
//! assert_eq!(display.max_transfer_size(), 64);
//! ```
//!
//! ## Image is shifted or wraps around
//!
//! The controller memory is 162x132 pixels, larger than most glass. Pick the
//! [`PanelGeometry`](crate::geometry::PanelGeometry) that matches the module:
//! [`Standard`](crate::geometry::Standard) for panels covering the whole
//! memory, [`Mini`](crate::geometry::Mini) for 0.96" 160x80 modules. Other
//! modules can implement the trait with their own offsets.
//!
//! ## Image appears transposed
//!
//! Pixels are sent column by column to match the memory access order set at
//! init. Size images with [`Display::image_size`](crate::Display::image_size)
//! rather than the panel's nominal width and height.
//!
//! ```
//! # use st7735_spi::_mock::new_mock_display;
//! use embedded_graphics::prelude::*;
//!
//! let display = new_mock_display();
//! assert_eq!(display.image_size(), Size::new(160, 80));
//! ```
//!
//! ## Incorrect colors
//!
//! Colors are sent as RGB565 with the channels scaled from the image's 16 bit
//! values.
//!
//! If every color looks like its negative (black shows as white), the module
//! ships with an inverted panel. Use
//! [`set_inverted`](crate::Display::set_inverted) to compensate.
//!
//! ```
//! let mut display = st7735_spi::_mock::new_mock_display();
//! display.set_inverted(true).unwrap();
//! ```
//!
//! If red and blue are swapped, the panel's subpixel order differs from the
//! BGR order selected at init ([`MADCTL_DEFAULT`](crate::dcs::MADCTL_DEFAULT)
//! is `0xC8`, BGR bit set). Inversion does not change channel order. Clear
//! the BGR bit by sending `MADCTL` with `0xC0` through the unsafe
//! [`Display::dcs`](crate::Display::dcs) accessor after init.
