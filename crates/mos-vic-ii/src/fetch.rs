//! The five VIC-II memory access types.
//!
//! Every read goes out over the shared bus with the bank bits sampled from
//! the sister chip at that moment, and the returned byte stays latched on
//! the chip's data bus (software can observe it through idle reads).
//!
//! - `r`: DRAM refresh, five per line.
//! - `c`: video matrix + color RAM, 40 per bad line.
//! - `g`: character or bitmap pattern, 40 per display line.
//! - `p`: sprite pointer, one per sprite per line.
//! - `s`: sprite data, three per DMA-active sprite per line.

use crate::bus::VicBus;
use crate::sequencer::DisplayMode;
use crate::Vic;

impl Vic {
    /// Single bus read: sample the bank bits, read, latch the data bus.
    pub(crate) fn mem_read(&mut self, bus: &dyn VicBus, addr: u16) -> u8 {
        self.bank = bus.bank() & 0x03;
        let value = bus.read(self.bank, addr & 0x3FFF);
        self.data_bus = value;
        value
    }

    /// DRAM refresh access.
    pub(crate) fn r_access(&mut self, bus: &dyn VicBus) {
        self.mem_read(bus, 0x3F00 | u16::from(self.refresh));
        self.refresh = self.refresh.wrapping_sub(1);
    }

    /// Video matrix access: 8 bits from the bus plus 4 bits from color RAM
    /// in parallel. Only succeeds once BA has been low for three cycles;
    /// before that the bus yields $FF and the color lines float high.
    pub(crate) fn c_access(&mut self, bus: &dyn VicBus) {
        if self.ba_low_for_three_cycles() {
            let data = self.mem_read(bus, self.vm_base() | self.vc);
            let color = bus.read_color_ram(self.vc) & 0x0F;
            self.matrix_line[self.vmli] = data;
            self.color_line[self.vmli] = color;
        } else {
            self.matrix_line[self.vmli] = 0xFF;
            self.color_line[self.vmli] = 0x0F;
        }
    }

    /// Graphics data access.
    ///
    /// In display state the address depends on the mode; in idle state the
    /// chip reads $3FFF. ECM pulls address bits 9 and 10 low in both.
    pub(crate) fn g_access(&mut self, bus: &dyn VicBus) {
        let mode = self.display_mode();
        let mut addr = if self.display_state {
            if mode.is_bitmap() {
                (self.cb_base() & 0x2000) | (self.vc << 3) | u16::from(self.rc)
            } else {
                self.cb_base() | (u16::from(self.matrix_line[self.vmli]) << 3) | u16::from(self.rc)
            }
        } else {
            0x3FFF
        };
        if self.ecm() {
            addr &= 0x39FF;
        }
        let g_data = self.mem_read(bus, addr);

        let (c_data, c_color) = if self.display_state {
            (self.matrix_line[self.vmli], self.color_line[self.vmli])
        } else {
            (0, 0)
        };
        self.gfx.set_pending(g_data, c_data, c_color, mode);

        if self.display_state {
            self.vc = (self.vc + 1) & 0x3FF;
            self.vmli = (self.vmli + 1) & 0x3F;
        }
    }

    /// Sprite pointer access; always performed, even with DMA off.
    pub(crate) fn p_access(&mut self, bus: &dyn VicBus, n: usize) {
        let addr = self.vm_base() | 0x03F8 | n as u16;
        self.sprites[n].pointer = self.mem_read(bus, addr);
    }

    /// One sprite data access. Skipped when DMA is off; reads the floating
    /// data bus if BA has not been low long enough.
    pub(crate) fn s_access(&mut self, bus: &dyn VicBus, n: usize) {
        if !self.sprites[n].dma {
            return;
        }
        let byte = if self.ba_low_for_three_cycles() {
            let addr = (u16::from(self.sprites[n].pointer) << 6) | u16::from(self.sprites[n].mc);
            self.mem_read(bus, addr)
        } else {
            self.data_bus
        };
        self.sprites[n].load_byte(byte);
        self.sprites[n].mc = (self.sprites[n].mc + 1) & 0x3F;
    }

    // Register-file derived addressing helpers.

    /// Video matrix base: VM13-VM10 from $D018.
    pub(crate) fn vm_base(&self) -> u16 {
        u16::from(self.regs[0x18] & 0xF0) << 6
    }

    /// Character generator base: CB13-CB11 from $D018.
    pub(crate) fn cb_base(&self) -> u16 {
        u16::from(self.regs[0x18] & 0x0E) << 10
    }

    pub(crate) fn display_mode(&self) -> DisplayMode {
        DisplayMode::from_bits(self.ecm(), self.bmm(), self.mcm())
    }
}
