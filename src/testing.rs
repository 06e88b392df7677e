//! Recording fakes for unit tests.
//!
//! Every handle created from one [`Recorder`] appends to the same ordered
//! event list, so tests can assert on the exact interleaving of pin levels,
//! bus writes and delays.

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};

use crate::interface::{BusConfig, SpiPort};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Dc(bool),
    Reset(bool),
    Write(Vec<u8>),
    DelayMs(u32),
    DelayNs(u32),
}

#[derive(Default)]
struct State {
    events: Vec<Event>,
    writes: usize,
    fail_write: Option<usize>,
    fail_dc: bool,
    reset_writes: usize,
    fail_reset: Option<usize>,
    connected: Option<BusConfig>,
}

#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<State>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spi(&self) -> FakeSpi {
        FakeSpi(self.clone())
    }

    pub fn dc(&self) -> FakePin {
        FakePin {
            rec: self.clone(),
            reset: false,
        }
    }

    pub fn rst(&self) -> FakePin {
        FakePin {
            rec: self.clone(),
            reset: true,
        }
    }

    pub fn delay(&self) -> FakeDelay {
        FakeDelay(self.clone())
    }

    pub fn port(&self) -> FakePort {
        FakePort {
            rec: self.clone(),
            max_transfer_size: None,
            refuse: false,
        }
    }

    /// Fails the bus write with the given zero-based index.
    pub fn fail_write(&self, index: usize) {
        self.0.borrow_mut().fail_write = Some(index);
    }

    /// Fails the bus write `count` writes from now.
    pub fn fail_write_after(&self, count: usize) {
        let mut state = self.0.borrow_mut();
        let index = state.writes + count;
        state.fail_write = Some(index);
    }

    /// Fails every D/C pin write.
    pub fn fail_dc(&self) {
        self.0.borrow_mut().fail_dc = true;
    }

    /// Fails the reset pin write with the given zero-based index.
    pub fn fail_reset(&self, index: usize) {
        self.0.borrow_mut().fail_reset = Some(index);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn connected_with(&self) -> Option<BusConfig> {
        self.0.borrow().connected
    }

    /// Opcodes of all commands sent, in order.
    ///
    /// A command is a single-byte write while D/C is low.
    pub fn opcodes(&self) -> Vec<u8> {
        let mut dc = true;
        let mut out = Vec::new();
        for event in self.events() {
            match event {
                Event::Dc(level) => dc = level,
                Event::Write(bytes) if !dc => out.extend_from_slice(&bytes),
                _ => {}
            }
        }
        out
    }

    /// Data writes only, in order.
    pub fn data_writes(&self) -> Vec<Vec<u8>> {
        let mut dc = true;
        let mut out = Vec::new();
        for event in self.events() {
            match event {
                Event::Dc(level) => dc = level,
                Event::Write(bytes) if dc => out.push(bytes),
                _ => {}
            }
        }
        out
    }

    pub fn clear(&self) {
        self.0.borrow_mut().events.clear();
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }
}

pub struct FakeSpi(Recorder);

impl spi::ErrorType for FakeSpi {
    type Error = spi::ErrorKind;
}

impl SpiDevice for FakeSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        for op in operations {
            if let Operation::Write(bytes) = op {
                let mut state = self.0 .0.borrow_mut();
                let index = state.writes;
                state.writes += 1;
                if state.fail_write == Some(index) {
                    return Err(spi::ErrorKind::Other);
                }
                state.events.push(Event::Write(bytes.to_vec()));
            }
        }
        Ok(())
    }
}

pub struct FakePin {
    rec: Recorder,
    reset: bool,
}

impl FakePin {
    fn set(&mut self, level: bool) -> Result<(), digital::ErrorKind> {
        if self.reset {
            let fail = {
                let mut state = self.rec.0.borrow_mut();
                let index = state.reset_writes;
                state.reset_writes += 1;
                state.fail_reset == Some(index)
            };
            if fail {
                return Err(digital::ErrorKind::Other);
            }
            self.rec.push(Event::Reset(level));
        } else {
            if self.rec.0.borrow().fail_dc {
                return Err(digital::ErrorKind::Other);
            }
            self.rec.push(Event::Dc(level));
        }
        Ok(())
    }
}

impl digital::ErrorType for FakePin {
    type Error = digital::ErrorKind;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

pub struct FakeDelay(Recorder);

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayMs(ms));
    }
}

pub struct FakePort {
    rec: Recorder,
    max_transfer_size: Option<usize>,
    refuse: bool,
}

impl FakePort {
    pub fn with_max_transfer_size(mut self, size: usize) -> Self {
        self.max_transfer_size = Some(size);
        self
    }

    pub fn refusing(mut self) -> Self {
        self.refuse = true;
        self
    }
}

impl SpiPort for FakePort {
    type Connection = FakeSpi;
    type Error = spi::ErrorKind;

    fn connect(&mut self, config: &BusConfig) -> Result<FakeSpi, Self::Error> {
        if self.refuse {
            return Err(spi::ErrorKind::ModeFault);
        }
        self.rec.0.borrow_mut().connected = Some(*config);
        Ok(self.rec.spi())
    }

    fn max_transfer_size(&self, _connection: &FakeSpi) -> Option<usize> {
        self.max_transfer_size
    }
}
