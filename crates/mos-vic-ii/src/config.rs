//! Raster timing models for the two VIC-II families.
//!
//! The 6569 (PAL) and 6567 (NTSC) differ in line count, cycles per line and
//! border geometry. All timing-derived values live here so the rest of the
//! chip can be written against one `Geometry` regardless of variant.

/// Video timing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimingMode {
    /// PAL (6569) - 50Hz, 312 lines, 63 cycles/line
    #[default]
    Pal,
    /// NTSC (6567R8) - 60Hz, 263 lines, 65 cycles/line
    Ntsc,
}

impl TimingMode {
    /// CPU clock frequency in Hz.
    pub const fn cpu_clock(self) -> u32 {
        match self {
            TimingMode::Pal => 985_248,
            TimingMode::Ntsc => 1_022_727,
        }
    }

    /// Cycles per raster line.
    pub const fn cycles_per_line(self) -> u16 {
        match self {
            TimingMode::Pal => 63,
            TimingMode::Ntsc => 65,
        }
    }

    /// Total raster lines per frame.
    pub const fn lines_per_frame(self) -> u16 {
        match self {
            TimingMode::Pal => 312,
            TimingMode::Ntsc => 263,
        }
    }

    /// Cycles per frame.
    pub const fn cycles_per_frame(self) -> u32 {
        self.cycles_per_line() as u32 * self.lines_per_frame() as u32
    }

    /// Frames per second.
    pub const fn fps(self) -> f32 {
        match self {
            TimingMode::Pal => 50.125,
            TimingMode::Ntsc => 59.826,
        }
    }
}

/// Per-variant raster geometry.
///
/// `first_x_coord` is the sprite-coordinate of the first pixel of cycle 1
/// ($194 on the 6569, $19C on the 6567R8). The chip's internal x counter
/// runs from 0 at the start of each line; sprite and border coordinates are
/// translated through this offset when compared against it.
#[derive(Clone, Copy, Debug)]
pub struct Geometry {
    pub cycles_per_line: u16,
    pub lines_per_frame: u16,
    pub first_x_coord: u16,
    pub pixels_per_line: u16,
    /// X position (chip-internal) where the viewable area begins.
    pub visible_x_start: u16,
    /// Viewable pixels per line (left border + 320 + right border).
    pub viewable_width: u16,
    /// First raster line inside the viewable area.
    pub first_visible_line: u16,
    /// Viewable raster lines.
    pub viewable_height: u16,
}

/// 6569: 46px left border, 36px right, 8 invisible lines on top.
pub const GEOMETRY_PAL: Geometry = Geometry {
    cycles_per_line: 63,
    lines_per_frame: 312,
    first_x_coord: 0x194,
    pixels_per_line: 63 * 8,
    visible_x_start: 78,
    viewable_width: 402,
    first_visible_line: 8,
    viewable_height: 292,
};

/// 6567R8: 49px borders, 28 invisible lines on top.
pub const GEOMETRY_NTSC: Geometry = Geometry {
    cycles_per_line: 65,
    lines_per_frame: 263,
    first_x_coord: 0x19c,
    pixels_per_line: 65 * 8,
    visible_x_start: 83,
    viewable_width: 418,
    first_visible_line: 28,
    viewable_height: 235,
};

/// Widest viewable line across variants; sizes the line buffers.
pub(crate) const MAX_VIEWABLE_WIDTH: usize = 418;

impl Geometry {
    pub const fn for_mode(mode: TimingMode) -> &'static Geometry {
        match mode {
            TimingMode::Pal => &GEOMETRY_PAL,
            TimingMode::Ntsc => &GEOMETRY_NTSC,
        }
    }

    /// Translate a sprite-coordinate X value to the chip-internal x counter.
    ///
    /// Sprite coordinates above the counter range never match (positions
    /// $1F8-$1FF are off-screen on the 6569).
    pub(crate) fn sprite_to_raster_x(&self, sprite_x: u16) -> Option<u16> {
        if sprite_x >= self.pixels_per_line {
            return None;
        }
        Some(self.raster_x(sprite_x))
    }

    /// Infallible variant for the fixed comparison values (border edges,
    /// display window origin), which always lie in range.
    pub(crate) fn raster_x(&self, sprite_x: u16) -> u16 {
        (sprite_x + self.pixels_per_line - self.first_x_coord) % self.pixels_per_line
    }

    /// Cycle in which the pointer fetch for sprite `n` happens.
    pub(crate) fn sprite_pointer_cycle(&self, n: usize) -> u16 {
        // Sprites 3-7 are fetched at the start of the line, sprites 0-2 at
        // the end. The 6567's two extra cycles push the late fetches out.
        let table: [u16; 8] = if self.cycles_per_line == 63 {
            [58, 60, 62, 1, 3, 5, 7, 9]
        } else {
            [60, 62, 64, 1, 3, 5, 7, 9]
        };
        table[n]
    }

    /// Sprite whose pointer fetch starts in `cycle`, if any.
    pub(crate) fn sprite_fetch_starting_at(&self, cycle: u16) -> Option<usize> {
        (0..8).find(|&n| self.sprite_pointer_cycle(n) == cycle)
    }

    /// BA window for sprite `n`: low from three cycles before its first
    /// s-access until the end of its fetch slot. Windows wrap across the
    /// line boundary for sprites 3 and 4.
    pub(crate) fn sprite_ba_window(&self, n: usize) -> (u16, u16) {
        let p = self.sprite_pointer_cycle(n);
        let start = if p > 3 {
            p - 3
        } else {
            self.cycles_per_line + p - 3
        };
        let end = if p + 1 > self.cycles_per_line { 1 } else { p + 1 };
        (start, end)
    }

    /// Wrap-aware test for "cycle inside [start, end]".
    pub(crate) fn cycle_in_window(cycle: u16, window: (u16, u16)) -> bool {
        let (start, end) = window;
        if start <= end {
            cycle >= start && cycle <= end
        } else {
            cycle >= start || cycle <= end
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_cycle_counts() {
        assert_eq!(TimingMode::Pal.cycles_per_frame(), 19_656);
        assert_eq!(TimingMode::Ntsc.cycles_per_frame(), 17_095);
    }

    #[test]
    fn sprite_coordinate_mapping() {
        let g = GEOMETRY_PAL;
        // First pixel of cycle 1 is sprite coordinate $194.
        assert_eq!(g.sprite_to_raster_x(0x194), Some(0));
        // The display window's left edge (sprite X 24) lands mid cycle 16.
        assert_eq!(g.sprite_to_raster_x(24), Some(124));
        // Coordinates beyond the counter range never match.
        assert_eq!(g.sprite_to_raster_x(0x1f8), None);

        let n = GEOMETRY_NTSC;
        assert_eq!(n.sprite_to_raster_x(0x19c), Some(0));
        assert_eq!(n.sprite_to_raster_x(24), Some(132));
    }

    #[test]
    fn sprite_ba_windows_wrap() {
        let g = GEOMETRY_PAL;
        assert_eq!(g.sprite_ba_window(0), (55, 59));
        assert_eq!(g.sprite_ba_window(3), (61, 2));
        assert!(Geometry::cycle_in_window(62, (61, 2)));
        assert!(Geometry::cycle_in_window(1, (61, 2)));
        assert!(!Geometry::cycle_in_window(30, (61, 2)));
    }
}
