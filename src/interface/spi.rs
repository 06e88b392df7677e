//!
//! Four-wire SPI interface for the ST7735.
//!
//! The controller is driven over SCK/SDA plus a data/command (D/C) select line.
//! Chip select is handled by the [`SpiDevice`] implementation.
//!
//! Connecting happens in two steps: a [`SpiPort`] negotiates the bus
//! ([`BusConfig`]) and hands out a connected [`SpiDevice`], which is then
//! wrapped together with the D/C pin in a [`SpiInterface`].
//!
//! # Example
//!
//! ```rust,ignore
//! use st7735_spi::interface::{Preconfigured, SpiPort, SpiInterface, BUS_CONFIG};
//!
//! let spi = /* SpiDevice configured for 4 MHz, mode 0 */;
//! let dc = /* D/C OutputPin */;
//! let mut port = Preconfigured::new(spi).with_max_transfer_size(64);
//! let device = port.connect(&BUS_CONFIG)?;
//! let mut iface = SpiInterface::new(device, dc);
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{self, Mode, SpiDevice, MODE_0};

use super::Interface;
use crate::Error;

/// SPI clock used to talk to the controller.
pub const SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Transfer size used when the port does not report a limit.
pub const DEFAULT_MAX_TRANSFER_SIZE: usize = 4096;

/// Bus parameters requested from a [`SpiPort`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusConfig {
    /// Clock frequency in Hz.
    pub frequency_hz: u32,
    /// Clock polarity and phase.
    pub mode: Mode,
    /// Word size.
    pub bits_per_word: u8,
}

/// The configuration the driver connects with.
pub const BUS_CONFIG: BusConfig = BusConfig {
    frequency_hz: SPI_FREQUENCY_HZ,
    mode: MODE_0,
    bits_per_word: 8,
};

/// An SPI port that can open a connection with a given configuration.
pub trait SpiPort {
    /// The connected device.
    type Connection: SpiDevice;

    /// Error returned when the connection cannot be established.
    type Error: spi::Error;

    /// Negotiate a connection.
    fn connect(&mut self, config: &BusConfig) -> Result<Self::Connection, Self::Error>;

    /// Largest number of bytes `connection` accepts in a single transaction.
    ///
    /// Ports without such a limit return `None`.
    fn max_transfer_size(&self, connection: &Self::Connection) -> Option<usize> {
        let _ = connection;
        None
    }
}

/// A [`SpiPort`] around a [`SpiDevice`] the caller has already configured.
///
/// The device must already run at [`SPI_FREQUENCY_HZ`] in mode 0 with 8 bit
/// words; the requested [`BusConfig`] is not applied. The device is handed out
/// once, connecting again fails.
pub struct Preconfigured<SPI> {
    spi: Option<SPI>,
    max_transfer_size: Option<usize>,
}

impl<SPI> Preconfigured<SPI>
where
    SPI: SpiDevice,
{
    /// Wraps a configured device.
    pub fn new(spi: SPI) -> Self {
        Self {
            spi: Some(spi),
            max_transfer_size: None,
        }
    }

    /// Reports `size` as the largest transaction the device accepts.
    pub fn with_max_transfer_size(mut self, size: usize) -> Self {
        self.max_transfer_size = Some(size);
        self
    }
}

impl<SPI> SpiPort for Preconfigured<SPI>
where
    SPI: SpiDevice,
{
    type Connection = SPI;
    type Error = spi::ErrorKind;

    fn connect(&mut self, config: &BusConfig) -> Result<SPI, Self::Error> {
        trace!(
            "connecting at {} Hz, {} bits per word",
            config.frequency_hz,
            config.bits_per_word
        );
        self.spi.take().ok_or(spi::ErrorKind::Other)
    }

    fn max_transfer_size(&self, _connection: &SPI) -> Option<usize> {
        self.max_transfer_size
    }
}

/// SPI interface for the ST7735.
///
/// Use [`SpiInterface::new`] to construct, and [`SpiInterface::release`] to
/// deconstruct and recover the SPI and DC resources.
pub struct SpiInterface<SPI, DC> {
    spi: SPI,
    dc: DC,
    max_transfer_size: usize,
}

impl<SPI, DC> SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new SPI interface from an SPI device and DC pin.
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self {
            spi,
            dc,
            max_transfer_size: DEFAULT_MAX_TRANSFER_SIZE,
        }
    }

    /// Limits data transactions to `size` bytes.
    ///
    /// A size of zero selects [`DEFAULT_MAX_TRANSFER_SIZE`].
    pub fn with_max_transfer_size(mut self, size: usize) -> Self {
        self.max_transfer_size = if size == 0 {
            DEFAULT_MAX_TRANSFER_SIZE
        } else {
            size
        };
        self
    }

    /// Largest number of bytes sent in one data transaction.
    pub fn max_transfer_size(&self) -> usize {
        self.max_transfer_size
    }

    /// Release the DC pin and SPI peripheral back, deconstructing the interface.
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> Interface for SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// The DC pin is set low for the command byte, then high for the argument bytes.
    fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), Error> {
        self.dc.set_low().map_err(Error::pin)?;
        self.spi.write(&[command]).map_err(Error::transfer)?;
        if args.is_empty() {
            return Ok(());
        }
        self.send_data_slice(args)
    }

    /// The DC pin is set high once, then the data is written in chunks of at
    /// most [`max_transfer_size`](Self::max_transfer_size) bytes, one
    /// transaction per chunk. The first failing chunk ends the transfer.
    fn send_data_slice(&mut self, data: &[u8]) -> Result<(), Error> {
        self.dc.set_high().map_err(Error::pin)?;
        for (index, chunk) in data.chunks(self.max_transfer_size).enumerate() {
            if let Err(err) = self.spi.write(chunk) {
                let err = Error::transfer(err);
                warn!(
                    "data chunk {} of {} bytes failed: {:?}",
                    index,
                    chunk.len(),
                    err
                );
                return Err(err);
            }
        }
        Ok(())
    }
}
