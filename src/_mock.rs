//! Mock implementations of embedded-hal traits.
//!
//! Used by the documentation examples. Do not use in real code!

use core::convert::Infallible;

use embedded_hal::{delay::DelayNs, digital, spi};

use crate::{geometry::Mini, interface::Preconfigured, Display, NoChipSelect};

/// A display driving [`MockSpi`] and [`MockOutputPin`]s.
pub type MockDisplay = Display<
    crate::interface::SpiInterface<MockSpi, MockOutputPin>,
    Mini,
    MockOutputPin,
    NoChipSelect,
>;

/// Creates an initialized display backed by mocks.
pub fn new_mock_display() -> MockDisplay {
    match Display::new(
        Preconfigured::new(MockSpi),
        MockOutputPin,
        MockOutputPin,
        NoChipSelect,
        Mini,
        &mut MockDelay,
    ) {
        Ok(display) => display,
        Err(_) => unreachable!("mocks never fail"),
    }
}

/// An output pin that accepts every level.
pub struct MockOutputPin;

impl digital::ErrorType for MockOutputPin {
    type Error = Infallible;
}

impl digital::OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// An SPI device that discards all traffic.
pub struct MockSpi;

impl spi::ErrorType for MockSpi {
    type Error = Infallible;
}

impl spi::SpiDevice for MockSpi {
    fn transaction(
        &mut self,
        _operations: &mut [spi::Operation<'_, u8>],
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A delay that returns immediately.
pub struct MockDelay;

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
