//! ST7735 command set.
//!
//! Opcode values and initialization tables come from the ST7735 datasheet.
//! The calibration tables are opaque constants and must be sent verbatim.

/// No operation.
pub const NOP: u8 = 0x00;
/// Software reset.
pub const SWRESET: u8 = 0x01;
/// Enter sleep mode.
pub const SLPIN: u8 = 0x10;
/// Leave sleep mode.
pub const SLPOUT: u8 = 0x11;
/// Partial display mode on.
pub const PTLON: u8 = 0x12;
/// Normal display mode on (partial mode off).
pub const NORON: u8 = 0x13;
/// Display inversion off.
pub const INVOFF: u8 = 0x20;
/// Display inversion on.
pub const INVON: u8 = 0x21;
/// Gamma curve select.
pub const GAMSET: u8 = 0x26;
/// Display off.
pub const DISPOFF: u8 = 0x28;
/// Display on.
pub const DISPON: u8 = 0x29;
/// Column address set.
pub const CASET: u8 = 0x2A;
/// Row address set.
pub const RASET: u8 = 0x2B;
/// Memory write.
pub const RAMWR: u8 = 0x2C;
/// Tearing effect line off.
pub const TEOFF: u8 = 0x34;
/// Tearing effect line on.
pub const TEON: u8 = 0x35;
/// Memory data access control (orientation and RGB order).
pub const MADCTL: u8 = 0x36;
/// Idle mode off.
pub const IDMOFF: u8 = 0x38;
/// Idle mode on.
pub const IDMON: u8 = 0x39;
/// Interface pixel format.
pub const COLMOD: u8 = 0x3A;
/// Frame rate control, normal mode.
pub const FRMCTR1: u8 = 0xB1;
/// Frame rate control, idle mode.
pub const FRMCTR2: u8 = 0xB2;
/// Frame rate control, partial mode.
pub const FRMCTR3: u8 = 0xB3;
/// Display inversion control.
pub const INVCTR: u8 = 0xB4;
/// Power control 1.
pub const PWCTR1: u8 = 0xC0;
/// Power control 2.
pub const PWCTR2: u8 = 0xC1;
/// Power control 3, normal mode.
pub const PWCTR3: u8 = 0xC2;
/// Power control 4, idle mode.
pub const PWCTR4: u8 = 0xC3;
/// Power control 5, partial mode.
pub const PWCTR5: u8 = 0xC4;
/// VCOM control.
pub const VMCTR1: u8 = 0xC5;
/// Positive gamma correction.
pub const GMCTRP1: u8 = 0xE0;
/// Negative gamma correction.
pub const GMCTRN1: u8 = 0xE1;

/// MADCTL value used at init: MY | MX | BGR.
pub const MADCTL_DEFAULT: u8 = 0xC8;
/// COLMOD value for 16 bits per pixel.
pub const COLMOD_16BPP: u8 = 0x05;

const FRAME_RATE: [u8; 3] = [0x01, 0x2C, 0x2D];
const FRAME_RATE_PARTIAL: [u8; 6] = [0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D];

const GAMMA_POSITIVE: [u8; 16] = [
    0x02, 0x1C, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2D, 0x29, 0x25, 0x2B, 0x39, 0x00, 0x01, 0x03, 0x10,
];
const GAMMA_NEGATIVE: [u8; 16] = [
    0x03, 0x1D, 0x07, 0x06, 0x2E, 0x2C, 0x29, 0x2D, 0x2E, 0x2E, 0x37, 0x3F, 0x00, 0x00, 0x02, 0x10,
];

/// Number of commands in the power-on sequence.
pub const INIT_SEQUENCE_LEN: usize = 21;

/// One protocol unit: an opcode, its parameter bytes and a settle time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command<'a> {
    /// Opcode, sent with D/C low.
    pub opcode: u8,
    /// Parameters, sent with D/C high. Empty for none.
    pub args: &'a [u8],
    /// Delay after the command in milliseconds.
    pub delay_ms: u32,
}

impl<'a> Command<'a> {
    /// A command without parameters or delay.
    pub const fn new(opcode: u8) -> Self {
        Self {
            opcode,
            args: &[],
            delay_ms: 0,
        }
    }

    /// Sets the parameter bytes.
    pub const fn args(mut self, args: &'a [u8]) -> Self {
        self.args = args;
        self
    }

    /// Sets the post-command delay.
    pub const fn delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Encodes an inclusive address range as CASET/RASET parameters.
pub fn address_range(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}

/// Builds the power-on sequence.
///
/// `columns` and `rows` are the CASET/RASET parameters of the visible area,
/// see [`address_range`].
pub fn init_sequence<'a>(
    columns: &'a [u8; 4],
    rows: &'a [u8; 4],
) -> [Command<'a>; INIT_SEQUENCE_LEN] {
    [
        Command::new(SWRESET).delay_ms(50),
        Command::new(SLPOUT).delay_ms(50),
        Command::new(FRMCTR1).args(&FRAME_RATE),
        Command::new(FRMCTR2).args(&FRAME_RATE),
        Command::new(FRMCTR3).args(&FRAME_RATE_PARTIAL),
        Command::new(INVCTR).args(&[0x07]),
        Command::new(PWCTR1).args(&[0xA2, 0x02, 0x84]),
        Command::new(PWCTR2).args(&[0xC5]),
        Command::new(PWCTR3).args(&[0x0A, 0x00]),
        Command::new(PWCTR4).args(&[0x8A, 0x2A]),
        Command::new(PWCTR5).args(&[0x8A, 0xEE]),
        Command::new(VMCTR1).args(&[0x0E]),
        Command::new(INVOFF),
        Command::new(MADCTL).args(&[MADCTL_DEFAULT]),
        Command::new(COLMOD).args(&[COLMOD_16BPP]),
        Command::new(CASET).args(columns),
        Command::new(RASET).args(rows),
        Command::new(GMCTRP1).args(&GAMMA_POSITIVE),
        Command::new(GMCTRN1).args(&GAMMA_NEGATIVE),
        Command::new(NORON).delay_ms(10),
        Command::new(DISPON).delay_ms(100),
    ]
}

/// Tearing effect output configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TearingEffect {
    /// Disable the TE output.
    #[default]
    Off,
    /// Pulse on vertical blanking only.
    Vertical,
    /// Pulse on both horizontal and vertical blanking.
    HorizontalAndVertical,
}

impl TearingEffect {
    pub(crate) fn command(self) -> Command<'static> {
        match self {
            Self::Off => Command::new(TEOFF),
            Self::Vertical => Command::new(TEON).args(&[0x00]),
            Self::HorizontalAndVertical => Command::new(TEON).args(&[0x01]),
        }
    }
}

/// Predefined gamma curves selectable with GAMSET.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GammaCurve {
    /// Gamma 1.0.
    #[default]
    Curve1,
    /// Gamma 2.5.
    Curve2,
    /// Gamma 2.2.
    Curve3,
    /// Gamma 1.8.
    Curve4,
}

impl GammaCurve {
    pub(crate) fn value(self) -> u8 {
        match self {
            Self::Curve1 => 0x01,
            Self::Curve2 => 0x02,
            Self::Curve3 => 0x04,
            Self::Curve4 => 0x08,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_range_is_big_endian() {
        assert_eq!(address_range(0, 161), [0x00, 0x00, 0x00, 0xA1]);
        assert_eq!(address_range(0x0102, 0x0304), [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn init_sequence_order() {
        let cols = address_range(26, 105);
        let rows = address_range(1, 160);
        let seq = init_sequence(&cols, &rows);
        let opcodes: [u8; INIT_SEQUENCE_LEN] = core::array::from_fn(|i| seq[i].opcode);
        assert_eq!(
            opcodes,
            [
                SWRESET, SLPOUT, FRMCTR1, FRMCTR2, FRMCTR3, INVCTR, PWCTR1, PWCTR2, PWCTR3, PWCTR4,
                PWCTR5, VMCTR1, INVOFF, MADCTL, COLMOD, CASET, RASET, GMCTRP1, GMCTRN1, NORON,
                DISPON,
            ]
        );
        assert_eq!(seq[15].args, &[0, 26, 0, 105]);
        assert_eq!(seq[16].args, &[0, 1, 0, 160]);
        assert_eq!(seq[13].args, &[0xC8]);
        assert_eq!(seq[14].args, &[0x05]);
    }

    #[test]
    fn init_sequence_delays() {
        let range = address_range(0, 1);
        let seq = init_sequence(&range, &range);
        let delayed: usize = seq.iter().filter(|c| c.delay_ms > 0).count();
        assert_eq!(delayed, 4);
        assert_eq!(seq[0].delay_ms, 50);
        assert_eq!(seq[1].delay_ms, 50);
        assert_eq!(seq[19].delay_ms, 10);
        assert_eq!(seq[20].delay_ms, 100);
        assert!(seq[19].args.is_empty());
        assert!(seq[20].args.is_empty());
    }

    #[test]
    fn tearing_effect_commands() {
        assert_eq!(TearingEffect::Off.command(), Command::new(TEOFF));
        assert_eq!(TearingEffect::Vertical.command().args, &[0x00]);
        assert_eq!(
            TearingEffect::HorizontalAndVertical.command(),
            Command::new(TEON).args(&[0x01])
        );
    }
}
