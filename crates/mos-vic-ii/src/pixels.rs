//! Pixel composition: the depth-buffered line buffer and the per-cycle
//! eight-pixel output path.
//!
//! Layers are resolved with a z-buffer; a lower depth value is closer to
//! the viewer. Sprites carry their number in the low bits so that sprite 0
//! beats sprite 7 within the same layer. A parallel source mask records,
//! per pixel, which sprites and whether foreground graphics were drawn;
//! collision detection reads it back.

use crate::border::BorderUnit;
use crate::config::MAX_VIEWABLE_WIDTH;
use crate::irq::{IRQ_SPRITE_BG, IRQ_SPRITE_SPRITE};
use crate::palette::palette_for_scheme;
use crate::Vic;

/// Border overlay, in front of everything.
pub(crate) const DEPTH_BORDER: u8 = 0x10;
/// Sprites in front of the graphics foreground.
pub(crate) const DEPTH_SPRITE_FG: u8 = 0x20;
/// Graphics foreground.
pub(crate) const DEPTH_FOREGROUND: u8 = 0x30;
/// Sprites behind the graphics foreground (MxDP set).
pub(crate) const DEPTH_SPRITE_BG: u8 = 0x40;
/// Graphics background.
pub(crate) const DEPTH_BACKGROUND: u8 = 0x50;

/// Source-mask bit for foreground graphics (sprites use bits 0-7).
pub(crate) const SRC_FOREGROUND: u16 = 0x100;

/// One raster line of pixels with depth and source information.
pub(crate) struct LineBuffer {
    pub color: [u8; MAX_VIEWABLE_WIDTH],
    pub depth: [u8; MAX_VIEWABLE_WIDTH],
    pub source: [u16; MAX_VIEWABLE_WIDTH],
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            color: [0; MAX_VIEWABLE_WIDTH],
            depth: [0xFF; MAX_VIEWABLE_WIDTH],
            source: [0; MAX_VIEWABLE_WIDTH],
        }
    }

    pub fn clear(&mut self) {
        self.color = [0; MAX_VIEWABLE_WIDTH];
        self.depth = [0xFF; MAX_VIEWABLE_WIDTH];
        self.source = [0; MAX_VIEWABLE_WIDTH];
    }

    /// Draw a pixel if it is closer than what is already there.
    pub fn put(&mut self, idx: usize, color: u8, depth: u8) {
        if depth < self.depth[idx] {
            self.color[idx] = color;
            self.depth[idx] = depth;
        }
    }
}

impl Vic {
    /// Produce the eight pixels of the current cycle.
    ///
    /// Per pixel, in order: frame flip-flop comparisons, graphics
    /// sequencer output, sprite output with collision recording, border
    /// overlay.
    pub(crate) fn draw_cycle_pixels(&mut self) {
        let csel = self.csel();
        let rsel = self.rsel();
        let den = self.den();
        let y = self.y_counter;
        let left = self.geom.raster_x(BorderUnit::left_comparison(csel));
        let right = self.geom.raster_x(BorderUnit::right_comparison(csel));
        // The 40-column window opens at sprite coordinate 24 regardless of
        // CSEL; XSCROLL slides the shift register reload within it.
        let load_origin = self.geom.raster_x(24) + u16::from(self.xscroll());
        let border_color = self.regs[0x20] & 0x0F;

        for i in 0..8u16 {
            let x = self.x_counter + i;

            if x == right {
                self.border.check_right_edge();
            }
            if x == left {
                self.border.check_left_edge(y, rsel, den);
            }

            if x >= load_origin && (x - load_origin) % 8 == 0 {
                // A fetch is visible from the second half of its own cycle.
                self.gfx.reload(i >= 4);
            }
            let (g_color, g_foreground) = self.gfx.shift_pixel(&self.regs);

            let vis = self.visible_index(x);
            if let Some(px) = vis {
                let depth = if g_foreground {
                    DEPTH_FOREGROUND
                } else {
                    DEPTH_BACKGROUND
                };
                self.line.put(px, g_color, depth);
                if g_foreground {
                    self.line.source[px] |= SRC_FOREGROUND;
                }
            }

            self.clock_sprites_pixel(x, vis);

            if self.border.main_ff {
                if let Some(px) = vis {
                    self.line.put(px, border_color, DEPTH_BORDER);
                }
            }
        }
    }

    fn visible_index(&self, x: u16) -> Option<usize> {
        let start = self.geom.visible_x_start;
        if x >= start && x < start + self.geom.viewable_width {
            Some((x - start) as usize)
        } else {
            None
        }
    }

    /// Clock all eight sprite shifters for one pixel position.
    ///
    /// Shifters advance even outside the viewable area so sprites that
    /// straddle the blanking interval keep their alignment; drawing and
    /// collision recording only happen for viewable pixels.
    fn clock_sprites_pixel(&mut self, x: u16, vis: Option<usize>) {
        let mc_reg = self.regs[0x1C];
        let xe_reg = self.regs[0x1D];
        let prio_reg = self.regs[0x1B];
        let mm0 = self.regs[0x25] & 0x0F;
        let mm1 = self.regs[0x26] & 0x0F;

        for n in 0..8 {
            let bit = 1u8 << n;

            if self.sprites[n].display && !self.sprites[n].is_shifting() {
                if let Some(start) = self.geom.sprite_to_raster_x(self.sprite_x(n)) {
                    if x == start {
                        self.sprites[n].start_shift();
                    }
                }
            }

            let code = self.sprites[n].clock_pixel(mc_reg & bit != 0, xe_reg & bit != 0);
            let Some(code) = code else { continue };
            let Some(px) = vis else { continue };

            let src = self.line.source[px];
            let earlier_sprites = (src & 0xFF) as u8;
            if earlier_sprites != 0 && self.spr_spr_check & bit != 0 {
                // An interrupt only on the 0 -> nonzero transition of the
                // collision register.
                if self.spr_spr_coll == 0 {
                    self.trigger_irq(IRQ_SPRITE_SPRITE);
                }
                self.spr_spr_coll |= earlier_sprites | bit;
            }
            if src & SRC_FOREGROUND != 0 && self.spr_bg_check & bit != 0 {
                if self.spr_bg_coll == 0 {
                    self.trigger_irq(IRQ_SPRITE_BG);
                }
                self.spr_bg_coll |= bit;
            }
            self.line.source[px] |= u16::from(bit);

            if self.hide_sprites {
                continue;
            }
            let color = match code {
                0b01 => mm0,
                0b11 => mm1,
                _ => self.regs[0x27 + n] & 0x0F,
            };
            let depth = if prio_reg & bit != 0 {
                DEPTH_SPRITE_BG
            } else {
                DEPTH_SPRITE_FG
            } | n as u8;
            self.line.put(px, color, depth);
        }
    }

    /// Copy the finished line into the back framebuffer through the
    /// palette, then clear the line buffer for the next line.
    pub(crate) fn flush_line(&mut self) {
        let first = self.geom.first_visible_line;
        if self.y_counter >= first && self.y_counter < first + self.geom.viewable_height {
            let row = (self.y_counter - first) as usize;
            let stride = self.geom.viewable_width as usize;
            let pal = palette_for_scheme(self.scheme);
            let back = 1 - self.front;
            let dst = &mut self.frames[back][row * stride..(row + 1) * stride];
            for (out, &c) in dst.iter_mut().zip(self.line.color[..stride].iter()) {
                *out = pal[(c & 0x0F) as usize].to_u32();
            }
        }
        self.line.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_depth_wins() {
        let mut line = LineBuffer::new();
        line.put(0, 5, DEPTH_BACKGROUND);
        line.put(0, 7, DEPTH_FOREGROUND);
        assert_eq!(line.color[0], 7);
        line.put(0, 3, DEPTH_SPRITE_BG);
        assert_eq!(line.color[0], 7, "sprite behind foreground loses");
        line.put(0, 1, DEPTH_BORDER);
        assert_eq!(line.color[0], 1, "border overlays everything");
    }

    #[test]
    fn sprite_numbers_break_depth_ties() {
        // The sprite number rides in the depth's low bits, so sprite 0
        // beats sprite 3 no matter which order they draw in.
        let mut line = LineBuffer::new();
        line.put(4, 9, DEPTH_SPRITE_FG | 3);
        line.put(4, 2, DEPTH_SPRITE_FG);
        assert_eq!(line.color[4], 2);

        let mut line = LineBuffer::new();
        line.put(4, 2, DEPTH_SPRITE_FG);
        line.put(4, 9, DEPTH_SPRITE_FG | 3);
        assert_eq!(line.color[4], 2);
    }
}
