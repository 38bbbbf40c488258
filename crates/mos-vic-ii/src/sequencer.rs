//! Graphics sequencer: the 8-bit shift register that turns fetched bytes
//! into pixels.
//!
//! Every g-access deposits a byte (plus the matrix character and color it
//! belongs to) into a pending latch. The shift register reloads from the
//! latch at the pixel column selected by XSCROLL and then shifts one bit
//! per pixel. A fetch completes halfway through its cycle, so a reload in
//! the first four pixels of a cycle still sees the previous cycle's fetch;
//! the two pending slots model that half-cycle boundary.
//!
//! The display mode is latched together with the data, which is what delays
//! mid-line mode switches until the next reload. Color registers are read
//! live, so background color changes show up immediately.

/// The eight display modes, selected by the ECM/BMM/MCM bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    StandardText,
    MulticolorText,
    StandardBitmap,
    MulticolorBitmap,
    EcmText,
    /// ECM + MCM: black output, multicolor-text bit patterns.
    InvalidText,
    /// ECM + BMM: black output, bitmap bit patterns.
    InvalidBitmap1,
    /// ECM + BMM + MCM: black output, multicolor-bitmap bit patterns.
    InvalidBitmap2,
}

impl DisplayMode {
    pub fn from_bits(ecm: bool, bmm: bool, mcm: bool) -> DisplayMode {
        match (ecm, bmm, mcm) {
            (false, false, false) => DisplayMode::StandardText,
            (false, false, true) => DisplayMode::MulticolorText,
            (false, true, false) => DisplayMode::StandardBitmap,
            (false, true, true) => DisplayMode::MulticolorBitmap,
            (true, false, false) => DisplayMode::EcmText,
            (true, false, true) => DisplayMode::InvalidText,
            (true, true, false) => DisplayMode::InvalidBitmap1,
            (true, true, true) => DisplayMode::InvalidBitmap2,
        }
    }

    /// Whether the mode uses bitmap addressing for g-accesses.
    pub fn is_bitmap(self) -> bool {
        matches!(
            self,
            DisplayMode::StandardBitmap
                | DisplayMode::MulticolorBitmap
                | DisplayMode::InvalidBitmap1
                | DisplayMode::InvalidBitmap2
        )
    }
}

/// One g-access worth of data waiting to enter the shift register.
#[derive(Clone, Copy, Debug)]
struct Pending {
    g_data: u8,
    c_data: u8,
    c_color: u8,
    mode: DisplayMode,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GfxSequencer {
    shift: u8,
    mc_flop: bool,
    pair: u8,
    // Attributes latched at the last reload.
    c_data: u8,
    c_color: u8,
    mode: DisplayMode,
    multicolor: bool,
    // Fetch pipeline: the current cycle's fetch and the previous one.
    pending_cur: Option<Pending>,
    pending_old: Option<Pending>,
}

impl GfxSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposit the result of a g-access. `c_data`/`c_color` are zero in
    /// idle state.
    pub fn set_pending(&mut self, g_data: u8, c_data: u8, c_color: u8, mode: DisplayMode) {
        self.pending_cur = Some(Pending {
            g_data,
            c_data,
            c_color,
            mode,
        });
    }

    /// Rotate the fetch pipeline at the end of each cycle.
    pub fn end_cycle(&mut self) {
        self.pending_old = self.pending_cur.take();
    }

    /// Drop any unconsumed fetch at the start of a raster line.
    pub fn begin_line(&mut self) {
        self.pending_cur = None;
        self.pending_old = None;
    }

    /// Reload the shift register at an XSCROLL-matching pixel.
    ///
    /// `second_half` selects which pipeline slot is visible: a fetch
    /// becomes available after the first half of its own cycle.
    pub fn reload(&mut self, second_half: bool) {
        let slot = if second_half {
            &mut self.pending_cur
        } else {
            &mut self.pending_old
        };
        let Some(p) = slot.take() else {
            return;
        };
        self.shift = p.g_data;
        self.c_data = p.c_data;
        self.c_color = p.c_color;
        self.mode = p.mode;
        self.mc_flop = true;
        self.multicolor = match p.mode {
            DisplayMode::MulticolorText | DisplayMode::InvalidText => p.c_color & 0x08 != 0,
            DisplayMode::MulticolorBitmap | DisplayMode::InvalidBitmap2 => true,
            _ => false,
        };
    }

    /// Produce one pixel: `(color index, is foreground)`.
    ///
    /// Background colors come from the live register file so mid-line
    /// writes to $D021-$D024 take effect immediately.
    pub fn shift_pixel(&mut self, regs: &[u8; 0x40]) -> (u8, bool) {
        let (color, foreground);
        if self.multicolor {
            if self.mc_flop {
                self.pair = self.shift >> 6;
            }
            self.mc_flop = !self.mc_flop;
            foreground = self.pair & 0x02 != 0;
            color = self.multicolor_lookup(regs);
        } else {
            let bit = self.shift & 0x80 != 0;
            foreground = bit;
            color = self.single_color_lookup(regs, bit);
        }
        self.shift <<= 1;
        (color, foreground)
    }

    fn single_color_lookup(&self, regs: &[u8; 0x40], bit: bool) -> u8 {
        match self.mode {
            DisplayMode::StandardText => {
                if bit {
                    self.c_color & 0x0F
                } else {
                    regs[0x21] & 0x0F
                }
            }
            // MCM with color bit 3 clear: single color, 3-bit color range.
            DisplayMode::MulticolorText => {
                if bit {
                    self.c_color & 0x07
                } else {
                    regs[0x21] & 0x0F
                }
            }
            DisplayMode::StandardBitmap => {
                if bit {
                    self.c_data >> 4
                } else {
                    self.c_data & 0x0F
                }
            }
            DisplayMode::EcmText => {
                if bit {
                    self.c_color & 0x0F
                } else {
                    regs[0x21 + (self.c_data >> 6) as usize] & 0x0F
                }
            }
            _ => 0,
        }
    }

    fn multicolor_lookup(&self, regs: &[u8; 0x40]) -> u8 {
        match self.mode {
            DisplayMode::MulticolorText => match self.pair {
                0b00 => regs[0x21] & 0x0F,
                0b01 => regs[0x22] & 0x0F,
                0b10 => regs[0x23] & 0x0F,
                _ => self.c_color & 0x07,
            },
            DisplayMode::MulticolorBitmap => match self.pair {
                0b00 => regs[0x21] & 0x0F,
                0b01 => self.c_data >> 4,
                0b10 => self.c_data & 0x0F,
                _ => self.c_color & 0x0F,
            },
            _ => 0,
        }
    }
}
