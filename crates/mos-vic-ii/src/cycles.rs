//! The per-line cycle schedule.
//!
//! One raster line, bad line, 6569 (63 cycles; the 6567 stretches the
//! sprite 0-2 fetches two cycles to the right):
//!
//! ```text
//! cycle  1- 10  sprite 3-7 pointer + data fetches (from the previous line)
//! cycle 11- 15  DRAM refresh
//! cycle     14  VC <- VCBASE, VMLI <- 0, RC <- 0 on bad lines
//! cycle 15- 54  c-accesses (bad lines, BA low from cycle 12)
//! cycle 16- 55  g-accesses
//! cycle 55/ 56  sprite y-expansion toggle, sprite DMA-on checks
//! cycle     58  RC/VCBASE end-of-row logic, sprite MC reload + display
//! cycle 58- 63  sprite 0-2 pointer + data fetches
//! ```
//!
//! The raster interrupt fires in cycle 1 of every line except line 0,
//! where it fires in cycle 2.

use crate::bus::VicBus;
use crate::config::Geometry;
use crate::irq::IRQ_RASTER;
use crate::Vic;

impl Vic {
    /// Re-evaluate the bad-line condition at a cycle boundary.
    ///
    /// The condition tracks the current YSCROLL value, so a mid-line write
    /// can turn any cycle of a display-window line into the start of a bad
    /// line. DEN is only sampled for the line-$30 latch.
    pub(crate) fn update_bad_line(&mut self) {
        if self.y_counter == 0x30 && self.den() {
            self.den_in_30 = true;
        }
        self.bad_line = self.den_in_30
            && (0x30..=0xF7).contains(&self.y_counter)
            && (self.y_counter & 0x07) as u8 == self.yscroll();
        if self.bad_line {
            self.display_state = true;
        }
    }

    /// Recompute the BA sources for the current cycle and record the
    /// high-to-low transition.
    pub(crate) fn update_ba(&mut self) {
        let mut mask = 0u16;
        if self.bad_line && (12..=54).contains(&self.cycle) {
            mask |= 0x100;
        }
        for n in 0..8 {
            if self.sprites[n].dma
                && Geometry::cycle_in_window(self.cycle, self.geom.sprite_ba_window(n))
            {
                mask |= 1 << n;
            }
        }
        if mask != 0 && self.ba_mask == 0 {
            self.ba_went_low_at = self.cycle_counter;
        }
        self.ba_mask = mask;
    }

    /// Latch an interrupt source and leave a trace of it.
    pub(crate) fn trigger_irq(&mut self, source: u8) {
        self.irq.set_event(source);
        log::trace!(
            target: "vic::irq",
            "irq source {:02x} at line {} cycle {} (latch {:02x} mask {:02x})",
            source,
            self.y_counter,
            self.cycle,
            self.irq.latch_bits(),
            self.irq.mask_bits()
        );
    }

    /// Run the bus and state operations of the current cycle.
    pub(crate) fn execute_cycle(&mut self, bus: &dyn VicBus) {
        let cycle = self.cycle;

        match cycle {
            1 => {
                if self.y_counter != 0 && self.y_counter == self.raster_compare {
                    self.trigger_irq(IRQ_RASTER);
                }
            }
            // Line 0 reports its raster match one cycle late.
            2 => {
                if self.y_counter == 0 && self.raster_compare == 0 {
                    self.trigger_irq(IRQ_RASTER);
                }
            }
            14 => {
                self.vc = self.vc_base;
                self.vmli = 0;
                if self.bad_line {
                    self.rc = 0;
                }
            }
            16 => self.sprite_mcbase_update(),
            55 => {
                self.sprite_expansion_toggle();
                self.sprite_dma_check();
                // A DMA that switched on this cycle pulls BA right away.
                self.update_ba();
            }
            56 => {
                self.sprite_dma_check();
                self.update_ba();
            }
            58 => {
                self.end_of_row();
                self.sprite_display_check();
            }
            63 => {
                let rsel = self.rsel();
                let den = self.den();
                self.border.check_vertical(self.y_counter, rsel, den);
            }
            _ => {}
        }

        if (11..=15).contains(&cycle) {
            self.r_access(bus);
        }
        if (16..=55).contains(&cycle) {
            self.g_access(bus);
        }
        if self.bad_line && (15..=54).contains(&cycle) {
            self.c_access(bus);
        }

        // Sprite fetch slots: the pointer and first data byte share one
        // cycle, the remaining two data bytes the next.
        if let Some(n) = self.geom.sprite_fetch_starting_at(cycle) {
            self.p_access(bus, n);
            self.s_access(bus, n);
        }
        let prev = if cycle == 1 {
            self.geom.cycles_per_line
        } else {
            cycle - 1
        };
        if let Some(n) = self.geom.sprite_fetch_starting_at(prev) {
            self.s_access(bus, n);
            self.s_access(bus, n);
        }
    }

    /// Cycle 58: row counter and display/idle transition.
    fn end_of_row(&mut self) {
        if self.rc == 7 {
            self.vc_base = self.vc;
            if !self.bad_line {
                self.display_state = false;
            }
        }
        if self.display_state {
            self.rc = (self.rc + 1) & 0x07;
        }
    }

    /// Cycle 55: invert the expansion flip-flop of y-expanded sprites.
    fn sprite_expansion_toggle(&mut self) {
        let y_expand = self.regs[0x17];
        for n in 0..8 {
            if y_expand & (1 << n) != 0 {
                self.sprites[n].expansion_ff = !self.sprites[n].expansion_ff;
            }
        }
    }

    /// Cycles 55 and 56: turn sprite DMA on for enabled sprites whose Y
    /// coordinate matches the current line.
    fn sprite_dma_check(&mut self) {
        let enable = self.regs[0x15];
        let y_expand = self.regs[0x17];
        let line = (self.y_counter & 0xFF) as u8;
        for n in 0..8 {
            let bit = 1 << n;
            if enable & bit != 0 && self.sprite_y(n) == line && !self.sprites[n].dma {
                self.sprites[n].dma = true;
                self.sprites[n].mcbase = 0;
                if y_expand & bit != 0 {
                    self.sprites[n].expansion_ff = false;
                }
            }
        }
    }

    /// Cycle 58: reload MC from MCBASE and decide whether the sprite shows
    /// on this line.
    ///
    /// A sprite whose Y no longer matches keeps displaying while its DMA
    /// runs (that is what carries it through its 21 rows); once DMA drops,
    /// the display flag follows.
    fn sprite_display_check(&mut self) {
        let line = (self.y_counter & 0xFF) as u8;
        for n in 0..8 {
            self.sprites[n].mc = self.sprites[n].mcbase;
            if self.sprites[n].dma {
                if self.sprite_y(n) == line {
                    self.sprites[n].display = true;
                }
            } else {
                self.sprites[n].display = false;
            }
        }
    }

    /// Cycle 16: close out the previous line's sprite DMA.
    ///
    /// With the expansion flip-flop set, MCBASE catches up with MC; a
    /// sprite whose 63 data bytes are exhausted drops its DMA. A $D017
    /// write that cleared the expansion bit in cycle 15 crunches the
    /// counter instead. The display flag stays up so the already fetched
    /// last row still shows on this line.
    fn sprite_mcbase_update(&mut self) {
        let crunch = self.crunch_pending;
        self.crunch_pending = 0;
        for n in 0..8 {
            let s = &mut self.sprites[n];
            if crunch & (1 << n) != 0 {
                if s.dma {
                    s.mc = (0x2A & s.mcbase & s.mc) | (0x15 & (s.mcbase | s.mc));
                }
            } else if s.expansion_ff {
                s.mcbase = s.mc;
            }
            if s.mcbase == 63 {
                s.dma = false;
            }
        }
    }

    pub(crate) fn begin_rasterline(&mut self) {
        self.gfx.begin_line();
    }

    /// After the last cycle of a line: flush pixels, advance the beam.
    pub(crate) fn end_rasterline(&mut self) {
        self.flush_line();
        self.cycle = 1;
        self.x_counter = 0;
        self.y_counter += 1;
        if self.y_counter >= self.geom.lines_per_frame {
            self.end_frame();
        }
    }

    /// After the last line: wrap the raster counter and swap buffers.
    fn end_frame(&mut self) {
        self.y_counter = 0;
        self.vc_base = 0;
        self.den_in_30 = false;
        self.lightpen_fired = false;
        self.front = 1 - self.front;
        self.frame_counter += 1;
        self.frame_complete = true;
    }
}
