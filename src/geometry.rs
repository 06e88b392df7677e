//! Panel geometries.
//!
//! The ST7735 addresses a [`WIDTH`] x [`HEIGHT`] memory, which is larger than
//! the glass of most modules. A [`PanelGeometry`] tells the driver which part
//! of that memory is actually visible.

/// Width of the controller's addressable memory.
pub const WIDTH: u8 = 162;

/// Height of the controller's addressable memory.
pub const HEIGHT: u8 = 132;

/// Visible rectangle of a panel variant, as inclusive controller addresses.
///
/// Each end offset must be greater than its start offset, and no offset may
/// exceed the controller's longest side (`WIDTH - 1`).
pub trait PanelGeometry {
    /// First visible column.
    fn offset_x(&self) -> u8;

    /// Last visible column.
    fn offset_x_end(&self) -> u8;

    /// First visible row.
    fn offset_y(&self) -> u8;

    /// Last visible row.
    fn offset_y_end(&self) -> u8;

    /// Number of visible columns.
    fn visible_width(&self) -> u16 {
        u16::from(self.offset_x_end()) - u16::from(self.offset_x()) + 1
    }

    /// Number of visible rows.
    fn visible_height(&self) -> u16 {
        u16::from(self.offset_y_end()) - u16::from(self.offset_y()) + 1
    }
}

/// Modules whose glass covers the whole controller memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Standard;

impl PanelGeometry for Standard {
    fn offset_x(&self) -> u8 {
        0
    }

    fn offset_x_end(&self) -> u8 {
        WIDTH - 1
    }

    fn offset_y(&self) -> u8 {
        0
    }

    fn offset_y_end(&self) -> u8 {
        HEIGHT - 1
    }
}

/// 0.96" modules with a 160x80 glass centred in the controller memory.
///
/// The row range is centred using [`WIDTH`] and the column range using
/// [`HEIGHT`], the reverse of what the axis names suggest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mini;

impl Mini {
    const LONG_SIDE: u8 = 160;
    const SHORT_SIDE: u8 = 80;
}

impl PanelGeometry for Mini {
    fn offset_x(&self) -> u8 {
        (HEIGHT - Self::SHORT_SIDE) / 2
    }

    fn offset_x_end(&self) -> u8 {
        Self::SHORT_SIDE + self.offset_x() - 1
    }

    fn offset_y(&self) -> u8 {
        (WIDTH - Self::LONG_SIDE) / 2
    }

    fn offset_y_end(&self) -> u8 {
        Self::LONG_SIDE + self.offset_y() - 1
    }
}

impl<T: PanelGeometry + ?Sized> PanelGeometry for &T {
    fn offset_x(&self) -> u8 {
        T::offset_x(self)
    }

    fn offset_x_end(&self) -> u8 {
        T::offset_x_end(self)
    }

    fn offset_y(&self) -> u8 {
        T::offset_y(self)
    }

    fn offset_y_end(&self) -> u8 {
        T::offset_y_end(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_inside(g: &dyn PanelGeometry) {
        assert!(g.offset_x_end() > g.offset_x());
        assert!(g.offset_y_end() > g.offset_y());
        assert!(g.offset_x_end() < WIDTH);
    }

    #[test]
    fn standard_covers_full_memory() {
        let g = Standard;
        assert_eq!(g.offset_x(), 0);
        assert_eq!(g.offset_x_end(), 161);
        assert_eq!(g.offset_y(), 0);
        assert_eq!(g.offset_y_end(), 131);
        assert_eq!(g.visible_width(), 162);
        assert_eq!(g.visible_height(), 132);
        assert_inside(&g);
        assert!(g.offset_y_end() < HEIGHT);
    }

    #[test]
    fn mini_is_centred() {
        let g = Mini;
        assert_eq!(g.offset_y(), 1);
        assert_eq!(g.offset_y_end(), 160);
        assert_eq!(g.offset_x(), 26);
        assert_eq!(g.offset_x_end(), 105);
        assert_eq!(g.visible_width(), 80);
        assert_eq!(g.visible_height(), 160);
        assert_inside(&g);
        // rows are centred with WIDTH, so they extend past HEIGHT
        assert!(g.offset_y_end() >= HEIGHT);
        assert!(g.offset_y_end() < WIDTH);
    }

    #[test]
    fn references_forward_offsets() {
        let g = &Mini;
        assert_eq!(PanelGeometry::offset_x(&g), 26);
        assert_eq!(PanelGeometry::offset_y_end(&g), 160);
    }
}
