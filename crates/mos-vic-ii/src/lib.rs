//! MOS 6567/6569 VIC-II video chip emulator, cycle accurate.
//!
//! The VIC-II generates the C64's video signal and shares the memory bus
//! with the CPU. Driven by `tick()` once per system clock cycle, the chip
//! walks a fixed per-line schedule (63 cycles on the PAL 6569, 65 on the
//! NTSC 6567), fetching matrix, graphics and sprite data, producing eight
//! pixels per cycle, and pulling the BA line low three cycles ahead of any
//! cycle where it needs the bus for itself.
//!
//! # Register map (47 registers, $D000-$D02E)
//!
//! | Addr | Register |
//! |------|----------|
//! | $00-$0F | Sprite 0-7 X/Y coordinates |
//! | $10  | Sprite X coordinate bit 8 |
//! | $11  | Control 1: YSCROLL, RSEL, DEN, BMM, ECM, raster compare bit 8 |
//! | $12  | Raster counter / raster compare low byte |
//! | $13/$14 | Lightpen X/Y |
//! | $15  | Sprite enable |
//! | $16  | Control 2: XSCROLL, CSEL, MCM |
//! | $17  | Sprite Y expansion |
//! | $18  | Memory pointers: VM13-VM10, CB13-CB11 |
//! | $19  | Interrupt latch (read) / acknowledge (write) |
//! | $1A  | Interrupt mask |
//! | $1B  | Sprite-background priority |
//! | $1C  | Sprite multicolor select |
//! | $1D  | Sprite X expansion |
//! | $1E  | Sprite-sprite collision (clear on read) |
//! | $1F  | Sprite-background collision (clear on read) |
//! | $20  | Border color |
//! | $21-$24 | Background colors 0-3 |
//! | $25/$26 | Sprite multicolor 0/1 |
//! | $27-$2E | Sprite 0-7 colors |
//!
//! The host drives the chip with a [`VicBus`] implementation and samples
//! the produced [`Vic::ba_low`] and [`Vic::irq`] lines after each tick.
//! Register access happens between ticks; `read` carries the hardware's
//! clear-on-read side effects, `peek` is the side-effect-free variant for
//! debuggers.

mod border;
mod bus;
mod config;
mod cycles;
mod fetch;
mod irq;
mod palette;
mod pixels;
mod registers;
mod sequencer;
mod snapshot;
mod sprites;

pub use bus::VicBus;
pub use config::{Geometry, TimingMode, GEOMETRY_NTSC, GEOMETRY_PAL};
pub use irq::{IrqControl, IRQ_LIGHTPEN, IRQ_RASTER, IRQ_SPRITE_BG, IRQ_SPRITE_SPRITE};
pub use palette::{palette_for_scheme, Color, ColorScheme, Palette, COLOR_NAMES};
pub use registers::ScreenGeometry;
pub use sequencer::DisplayMode;
pub use snapshot::SNAPSHOT_SIZE;

use border::BorderUnit;
use pixels::LineBuffer;
use sequencer::GfxSequencer;
use sprites::SpriteUnit;

/// MOS 6567/6569 VIC-II video chip.
pub struct Vic {
    // Configuration
    pub(crate) mode: TimingMode,
    pub(crate) geom: &'static Geometry,
    pub(crate) scheme: ColorScheme,

    // Register file. Raw written values; unimplemented bits are masked on
    // read, live values ($D011 bit 7, $D012) are substituted there too.
    pub(crate) regs: [u8; 0x40],
    pub(crate) raster_compare: u16,

    // Hidden counters
    pub(crate) vc: u16,
    pub(crate) vc_base: u16,
    pub(crate) rc: u8,
    pub(crate) vmli: usize,
    pub(crate) refresh: u8,
    pub(crate) cycle: u16,
    pub(crate) x_counter: u16,
    pub(crate) y_counter: u16,
    pub(crate) cycle_counter: u64,
    pub(crate) frame_counter: u64,

    // Runtime state
    pub(crate) bad_line: bool,
    pub(crate) den_in_30: bool,
    pub(crate) display_state: bool,
    pub(crate) data_bus: u8,
    pub(crate) bank: u8,
    // 40 columns per line; sized for the full 6-bit VMLI index.
    pub(crate) matrix_line: [u8; 64],
    pub(crate) color_line: [u8; 64],

    // Functional units
    pub(crate) gfx: GfxSequencer,
    pub(crate) sprites: [SpriteUnit; 8],
    pub(crate) crunch_pending: u8,
    pub(crate) border: BorderUnit,
    pub(crate) irq: IrqControl,

    // Bus arbitration: one bit per source (sprites 0-7, bit 8 = bad line).
    pub(crate) ba_mask: u16,
    pub(crate) ba_went_low_at: u64,

    // Collision registers and lightpen
    pub(crate) spr_spr_coll: u8,
    pub(crate) spr_bg_coll: u8,
    pub(crate) lightpen_fired: bool,

    // Debugging aids: per-sprite collision checking and sprite hiding.
    pub(crate) spr_spr_check: u8,
    pub(crate) spr_bg_check: u8,
    pub(crate) hide_sprites: bool,

    // Pixel pipeline
    pub(crate) line: LineBuffer,
    pub(crate) frames: [Vec<u32>; 2],
    pub(crate) front: usize,
    pub(crate) frame_complete: bool,
}

impl Vic {
    /// Create a chip in the given timing mode, in power-on state.
    pub fn new(mode: TimingMode) -> Self {
        log::info!(target: "vic", "initializing VIC-II ({mode:?})");
        let geom = Geometry::for_mode(mode);
        let fb_len = geom.viewable_width as usize * geom.viewable_height as usize;
        Self {
            mode,
            geom,
            scheme: ColorScheme::default(),
            regs: [0; 0x40],
            raster_compare: 0,
            vc: 0,
            vc_base: 0,
            rc: 0,
            vmli: 0,
            refresh: 0xFF,
            cycle: 1,
            x_counter: 0,
            y_counter: 0,
            cycle_counter: 0,
            frame_counter: 0,
            bad_line: false,
            den_in_30: false,
            display_state: false,
            data_bus: 0,
            bank: 0,
            matrix_line: [0; 64],
            color_line: [0; 64],
            gfx: GfxSequencer::new(),
            sprites: [SpriteUnit::new(); 8],
            crunch_pending: 0,
            border: BorderUnit::new(),
            irq: IrqControl::new(),
            ba_mask: 0,
            ba_went_low_at: 0,
            spr_spr_coll: 0,
            spr_bg_coll: 0,
            lightpen_fired: false,
            spr_spr_check: 0xFF,
            spr_bg_check: 0xFF,
            hide_sprites: false,
            line: LineBuffer::new(),
            frames: [vec![0xFF00_0000; fb_len], vec![0xFF00_0000; fb_len]],
            front: 0,
            frame_complete: false,
        }
    }

    /// Advance the chip by one system clock cycle.
    pub fn tick(&mut self, bus: &dyn VicBus) {
        if self.cycle == 1 {
            self.begin_rasterline();
        }

        // Bad-line condition and BA are re-evaluated at every cycle
        // boundary; YSCROLL writes can create or cancel a bad line mid-line.
        self.update_bad_line();
        self.update_ba();

        self.execute_cycle(bus);
        self.draw_cycle_pixels();
        self.gfx.end_cycle();

        self.cycle_counter += 1;
        self.x_counter += 8;
        self.cycle += 1;
        if self.cycle > self.geom.cycles_per_line {
            self.end_rasterline();
        }
    }

    /// Restore power-on state.
    pub fn power_on(&mut self) {
        let scheme = self.scheme;
        let mode = self.mode;
        *self = Vic::new(mode);
        self.scheme = scheme;
    }

    /// Blank the output; chip state is frozen until the next power-on.
    pub fn power_off(&mut self) {
        for frame in &mut self.frames {
            frame.fill(0xFF00_0000);
        }
        self.ba_mask = 0;
        self.irq.reset();
    }

    /// External reset: power-on values, framebuffers cleared to the border
    /// color (which the zeroed register file makes black).
    pub fn reset(&mut self) {
        self.power_on();
        let border = palette_for_scheme(self.scheme)[(self.regs[0x20] & 0x0F) as usize].to_u32();
        for frame in &mut self.frames {
            frame.fill(border);
        }
    }

    /// Switch between the PAL and NTSC raster models. Resets the beam and
    /// reallocates the framebuffers; the register file is preserved.
    pub fn set_variant(&mut self, mode: TimingMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.geom = Geometry::for_mode(mode);
        let fb_len = self.geom.viewable_width as usize * self.geom.viewable_height as usize;
        self.frames = [vec![0xFF00_0000; fb_len], vec![0xFF00_0000; fb_len]];
        self.front = 0;
        self.cycle = 1;
        self.x_counter = 0;
        self.y_counter = 0;
        self.line.clear();
    }

    /// Current timing mode.
    pub fn variant(&self) -> TimingMode {
        self.mode
    }

    /// Select one of the twelve color schemes.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Simulate a lightpen pulse. Software uses this to read back a beam
    /// position; the interrupt latches at most once per frame.
    pub fn trigger_lightpen(&mut self) {
        if self.lightpen_fired {
            return;
        }
        self.lightpen_fired = true;
        self.regs[0x13] = (self.x_counter >> 1) as u8;
        self.regs[0x14] = self.y_counter as u8;
        self.trigger_irq(IRQ_LIGHTPEN);
    }

    /// The most recently completed frame, RGBA little-endian.
    pub fn front_buffer(&self) -> &[u32] {
        &self.frames[self.front]
    }

    /// Framebuffer width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.geom.viewable_width)
    }

    /// Framebuffer height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.geom.viewable_height)
    }

    /// Check and clear the frame-complete flag.
    pub fn take_frame_complete(&mut self) -> bool {
        let complete = self.frame_complete;
        self.frame_complete = false;
        complete
    }

    /// Whether the chip is pulling the BA line low (CPU stall request).
    pub fn ba_low(&self) -> bool {
        self.ba_mask != 0
    }

    /// Whether BA has been low long enough to block CPU reads.
    pub fn ba_low_for_three_cycles(&self) -> bool {
        self.ba_mask != 0 && self.cycle_counter.saturating_sub(self.ba_went_low_at) >= 3
    }

    /// Whether the IRQ line to the CPU is asserted.
    pub fn irq(&self) -> bool {
        self.irq.is_asserted()
    }

    /// Current raster line.
    pub fn raster_line(&self) -> u16 {
        self.y_counter
    }

    /// Cycle within the current line (1-based; the next cycle `tick` runs).
    pub fn raster_cycle(&self) -> u16 {
        self.cycle
    }

    /// Frames completed since power-on.
    pub fn frame(&self) -> u64 {
        self.frame_counter
    }

    /// Whether the current line is a bad line.
    pub fn is_bad_line(&self) -> bool {
        self.bad_line
    }

    /// Whether the graphics logic is in display state (vs idle).
    pub fn in_display_state(&self) -> bool {
        self.display_state
    }

    /// Last value seen on the chip's data bus.
    pub fn data_bus(&self) -> u8 {
        self.data_bus
    }

    /// Data counter of sprite `n` (debug).
    pub fn sprite_mc(&self, n: usize) -> u8 {
        self.sprites[n].mc
    }

    /// Data counter base of sprite `n` (debug).
    pub fn sprite_mcbase(&self, n: usize) -> u8 {
        self.sprites[n].mcbase
    }

    /// Whether DMA is on for sprite `n` (debug).
    pub fn sprite_dma(&self, n: usize) -> bool {
        self.sprites[n].dma
    }

    /// Enable or disable sprite-sprite collision checking per sprite.
    pub fn set_sprite_sprite_collision_mask(&mut self, mask: u8) {
        self.spr_spr_check = mask;
    }

    /// Enable or disable sprite-background collision checking per sprite.
    pub fn set_sprite_bg_collision_mask(&mut self, mask: u8) {
        self.spr_bg_check = mask;
    }

    /// Hide all sprites from the output (collisions still detected).
    pub fn set_hide_sprites(&mut self, hide: bool) {
        self.hide_sprites = hide;
    }

    /// One-line state summary for debugging.
    pub fn dump_state(&self) -> String {
        format!(
            "Raster={:03} Cycle={:02} X={:03} VC={:03X} VCBASE={:03X} RC={} VMLI={:02} \
             {} {} BA={} IRQ={:02X}/{:02X}",
            self.y_counter,
            self.cycle,
            self.x_counter,
            self.vc,
            self.vc_base,
            self.rc,
            self.vmli,
            if self.bad_line { "BAD" } else { "   " },
            if self.display_state { "DISP" } else { "IDLE" },
            if self.ba_low() { "LOW" } else { "HI " },
            self.irq.latch_bits(),
            self.irq.mask_bits(),
        )
    }
}

impl Default for Vic {
    fn default() -> Self {
        Self::new(TimingMode::default())
    }
}
