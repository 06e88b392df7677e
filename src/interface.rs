//! Interface traits and implementations

mod spi;
pub use spi::*;

use crate::Error;

/// Command and data interface
pub trait Interface {
    /// Send a command with optional parameters.
    ///
    /// The opcode is sent as a command byte. When `args` is not empty the
    /// parameters follow as data bytes.
    fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), Error>;

    /// Send a raw slice of data, typically pre-formatted pixel data.
    ///
    /// `RAMWR` must be sent before calling this function when the data is
    /// meant for display memory.
    fn send_data_slice(&mut self, data: &[u8]) -> Result<(), Error>;
}

impl<T: Interface + ?Sized> Interface for &mut T {
    fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), Error> {
        T::send_command(self, command, args)
    }

    fn send_data_slice(&mut self, data: &[u8]) -> Result<(), Error> {
        T::send_data_slice(self, data)
    }
}
