//! Driver error type.

use core::fmt;

use embedded_hal::{digital, spi};

/// Errors returned by the driver.
///
/// Errors from the underlying HAL are reduced to their embedded-hal
/// [`ErrorKind`](spi::ErrorKind) so that a single error type can describe
/// failures of the bus and of both control pins.
///
/// None of these are fatal: the caller decides whether to retry, re-create
/// the driver or give up. After a failed image write the controller's write
/// window is undefined and must be set again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The bus connection could not be negotiated.
    Connection(spi::ErrorKind),
    /// Driving the data/command or reset pin failed.
    PinWrite(digital::ErrorKind),
    /// A bus transaction carrying a command or data failed.
    Transfer(spi::ErrorKind),
    /// The requested rectangle does not fit inside the visible panel area.
    OutOfBounds,
}

impl Error {
    pub(crate) fn connection<E: spi::Error>(err: E) -> Self {
        Self::Connection(err.kind())
    }

    pub(crate) fn pin<E: digital::Error>(err: E) -> Self {
        Self::PinWrite(err.kind())
    }

    pub(crate) fn transfer<E: spi::Error>(err: E) -> Self {
        Self::Transfer(err.kind())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(kind) => write!(f, "could not connect to device: {kind}"),
            Self::PinWrite(kind) => write!(f, "pin write failed: {kind}"),
            Self::Transfer(kind) => write!(f, "bus transfer failed: {kind}"),
            Self::OutOfBounds => f.write_str("rectangle outside of the visible area"),
        }
    }
}
