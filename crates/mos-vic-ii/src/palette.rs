//! C64 color palettes.
//!
//! The VIC-II outputs one of 16 colors per pixel; what those colors look
//! like on a monitor is a matter of taste and calibration, so the chip
//! offers the classic set of community palettes as selectable schemes.

/// RGB color value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to RGBA bytes (for framebuffer).
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Pack as a 32-bit RGBA value, little-endian byte order in memory.
    pub const fn to_u32(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, 255])
    }
}

/// A 16-color C64 palette.
pub type Palette = [Color; 16];

/// Selectable color scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorScheme {
    Ccs64,
    Vice,
    Frodo,
    Pc64,
    C64s,
    Alec64,
    Win64,
    C64Alive,
    Godot,
    C64Sally,
    #[default]
    Pepto,
    Grayscale,
}

impl ColorScheme {
    /// Look up a scheme by its numeric id (0-11). Unknown ids are refused.
    pub const fn from_id(id: u8) -> Option<ColorScheme> {
        Some(match id {
            0x00 => ColorScheme::Ccs64,
            0x01 => ColorScheme::Vice,
            0x02 => ColorScheme::Frodo,
            0x03 => ColorScheme::Pc64,
            0x04 => ColorScheme::C64s,
            0x05 => ColorScheme::Alec64,
            0x06 => ColorScheme::Win64,
            0x07 => ColorScheme::C64Alive,
            0x08 => ColorScheme::Godot,
            0x09 => ColorScheme::C64Sally,
            0x0a => ColorScheme::Pepto,
            0x0b => ColorScheme::Grayscale,
            _ => return None,
        })
    }

    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// Get the color palette for a scheme.
pub const fn palette_for_scheme(scheme: ColorScheme) -> &'static Palette {
    match scheme {
        ColorScheme::Ccs64 => &PALETTE_CCS64,
        ColorScheme::Vice => &PALETTE_VICE,
        ColorScheme::Frodo => &PALETTE_FRODO,
        ColorScheme::Pc64 => &PALETTE_PC64,
        ColorScheme::C64s => &PALETTE_C64S,
        ColorScheme::Alec64 => &PALETTE_ALEC64,
        ColorScheme::Win64 => &PALETTE_WIN64,
        ColorScheme::C64Alive => &PALETTE_C64ALIVE,
        ColorScheme::Godot => &PALETTE_GODOT,
        ColorScheme::C64Sally => &PALETTE_C64SALLY,
        ColorScheme::Pepto => &PALETTE_PEPTO,
        ColorScheme::Grayscale => &PALETTE_GRAYSCALE,
    }
}

/// Color names for reference.
pub const COLOR_NAMES: [&str; 16] = [
    "Black",
    "White",
    "Red",
    "Cyan",
    "Purple",
    "Green",
    "Blue",
    "Yellow",
    "Orange",
    "Brown",
    "Light Red",
    "Dark Grey",
    "Grey",
    "Light Green",
    "Light Blue",
    "Light Grey",
];

/// CCS64 emulator palette - bright, slightly lifted blacks.
pub const PALETTE_CCS64: Palette = [
    Color::new(0x10, 0x10, 0x10), // Black
    Color::new(0xFF, 0xFF, 0xFF), // White
    Color::new(0xE0, 0x40, 0x40), // Red
    Color::new(0x60, 0xFF, 0xFF), // Cyan
    Color::new(0xE0, 0x60, 0xE0), // Purple
    Color::new(0x40, 0xE0, 0x40), // Green
    Color::new(0x40, 0x40, 0xE0), // Blue
    Color::new(0xFF, 0xFF, 0x40), // Yellow
    Color::new(0xE0, 0xA0, 0x40), // Orange
    Color::new(0x9C, 0x74, 0x48), // Brown
    Color::new(0xFF, 0xA0, 0xA0), // Light Red
    Color::new(0x54, 0x54, 0x54), // Dark Grey
    Color::new(0x88, 0x88, 0x88), // Grey
    Color::new(0xA0, 0xFF, 0xA0), // Light Green
    Color::new(0xA0, 0xA0, 0xFF), // Light Blue
    Color::new(0xC0, 0xC0, 0xC0), // Light Grey
];

/// VICE default palette.
pub const PALETTE_VICE: Palette = [
    Color::new(0x00, 0x00, 0x00), // Black
    Color::new(0xFD, 0xFE, 0xFC), // White
    Color::new(0xBE, 0x1A, 0x24), // Red
    Color::new(0x30, 0xE6, 0xC6), // Cyan
    Color::new(0xB4, 0x1A, 0xE2), // Purple
    Color::new(0x1F, 0xD2, 0x1E), // Green
    Color::new(0x21, 0x1B, 0xAE), // Blue
    Color::new(0xDF, 0xF6, 0x0A), // Yellow
    Color::new(0xB8, 0x41, 0x04), // Orange
    Color::new(0x6A, 0x33, 0x04), // Brown
    Color::new(0xFE, 0x4A, 0x57), // Light Red
    Color::new(0x42, 0x45, 0x40), // Dark Grey
    Color::new(0x70, 0x74, 0x6F), // Grey
    Color::new(0x59, 0xFE, 0x59), // Light Green
    Color::new(0x5F, 0x53, 0xFE), // Light Blue
    Color::new(0xA4, 0xA7, 0xA2), // Light Grey
];

/// Frodo emulator palette - fully saturated primaries.
pub const PALETTE_FRODO: Palette = [
    Color::new(0x00, 0x00, 0x00), // Black
    Color::new(0xFF, 0xFF, 0xFF), // White
    Color::new(0xCC, 0x00, 0x00), // Red
    Color::new(0x00, 0xFF, 0xCC), // Cyan
    Color::new(0xFF, 0x00, 0xFF), // Purple
    Color::new(0x00, 0xCC, 0x00), // Green
    Color::new(0x00, 0x00, 0xCC), // Blue
    Color::new(0xFF, 0xFF, 0x00), // Yellow
    Color::new(0xFF, 0x88, 0x00), // Orange
    Color::new(0x88, 0x44, 0x00), // Brown
    Color::new(0xFF, 0x88, 0x88), // Light Red
    Color::new(0x44, 0x44, 0x44), // Dark Grey
    Color::new(0x88, 0x88, 0x88), // Grey
    Color::new(0x88, 0xFF, 0x88), // Light Green
    Color::new(0x88, 0x88, 0xFF), // Light Blue
    Color::new(0xCC, 0xCC, 0xCC), // Light Grey
];

/// PC64 (DOS) palette - EGA-flavored.
pub const PALETTE_PC64: Palette = [
    Color::new(0x00, 0x00, 0x00), // Black
    Color::new(0xFF, 0xFF, 0xFF), // White
    Color::new(0xAA, 0x00, 0x00), // Red
    Color::new(0x00, 0xAA, 0xAA), // Cyan
    Color::new(0xAA, 0x00, 0xAA), // Purple
    Color::new(0x00, 0xAA, 0x00), // Green
    Color::new(0x00, 0x00, 0xAA), // Blue
    Color::new(0xFF, 0xFF, 0x55), // Yellow
    Color::new(0xAA, 0x55, 0x00), // Orange
    Color::new(0x55, 0x55, 0x00), // Brown
    Color::new(0xFF, 0x55, 0x55), // Light Red
    Color::new(0x55, 0x55, 0x55), // Dark Grey
    Color::new(0xAA, 0xAA, 0xAA), // Grey
    Color::new(0x55, 0xFF, 0x55), // Light Green
    Color::new(0x55, 0x55, 0xFF), // Light Blue
    Color::new(0xEE, 0xEE, 0xEE), // Light Grey
];

/// C64S emulator palette.
pub const PALETTE_C64S: Palette = [
    Color::new(0x00, 0x00, 0x00), // Black
    Color::new(0xFC, 0xFC, 0xFC), // White
    Color::new(0xA8, 0x00, 0x00), // Red
    Color::new(0x54, 0xFC, 0xFC), // Cyan
    Color::new(0xA8, 0x00, 0xA8), // Purple
    Color::new(0x00, 0xA8, 0x00), // Green
    Color::new(0x00, 0x00, 0xA8), // Blue
    Color::new(0xFC, 0xFC, 0x00), // Yellow
    Color::new(0xA8, 0x54, 0x00), // Orange
    Color::new(0x80, 0x2C, 0x00), // Brown
    Color::new(0xFC, 0x54, 0x54), // Light Red
    Color::new(0x54, 0x54, 0x54), // Dark Grey
    Color::new(0x80, 0x80, 0x80), // Grey
    Color::new(0x54, 0xFC, 0x54), // Light Green
    Color::new(0x54, 0x54, 0xFC), // Light Blue
    Color::new(0xA8, 0xA8, 0xA8), // Light Grey
];

/// ALEC64 palette - warm, low-contrast.
pub const PALETTE_ALEC64: Palette = [
    Color::new(0x00, 0x00, 0x00), // Black
    Color::new(0xF2, 0xF2, 0xF2), // White
    Color::new(0x8E, 0x34, 0x20), // Red
    Color::new(0x7A, 0xBF, 0xC7), // Cyan
    Color::new(0x8E, 0x3C, 0x97), // Purple
    Color::new(0x68, 0xA9, 0x41), // Green
    Color::new(0x3E, 0x31, 0xA2), // Blue
    Color::new(0xD0, 0xDC, 0x71), // Yellow
    Color::new(0x90, 0x5F, 0x25), // Orange
    Color::new(0x5C, 0x47, 0x00), // Brown
    Color::new(0xBB, 0x77, 0x6D), // Light Red
    Color::new(0x55, 0x55, 0x55), // Dark Grey
    Color::new(0x80, 0x80, 0x80), // Grey
    Color::new(0xAC, 0xEA, 0x88), // Light Green
    Color::new(0x7C, 0x70, 0xDA), // Light Blue
    Color::new(0xAB, 0xAB, 0xAB), // Light Grey
];

/// WIN64 palette.
pub const PALETTE_WIN64: Palette = [
    Color::new(0x00, 0x00, 0x00), // Black
    Color::new(0xFF, 0xFF, 0xFF), // White
    Color::new(0x91, 0x4A, 0x40), // Red
    Color::new(0x86, 0xC5, 0xCC), // Cyan
    Color::new(0x93, 0x4E, 0xB6), // Purple
    Color::new(0x73, 0xB2, 0x4B), // Green
    Color::new(0x4A, 0x35, 0xAA), // Blue
    Color::new(0xD4, 0xE0, 0x7C), // Yellow
    Color::new(0x98, 0x6A, 0x2D), // Orange
    Color::new(0x66, 0x53, 0x00), // Brown
    Color::new(0xC2, 0x81, 0x7A), // Light Red
    Color::new(0x60, 0x60, 0x60), // Dark Grey
    Color::new(0x8A, 0x8A, 0x8A), // Grey
    Color::new(0xB5, 0xEB, 0x9C), // Light Green
    Color::new(0x87, 0x7C, 0xDC), // Light Blue
    Color::new(0xB5, 0xB5, 0xB5), // Light Grey
];

/// C64alive 0.9 palette.
pub const PALETTE_C64ALIVE: Palette = [
    Color::new(0x00, 0x00, 0x00), // Black
    Color::new(0xF0, 0xF0, 0xF0), // White
    Color::new(0x93, 0x28, 0x1C), // Red
    Color::new(0x66, 0xC8, 0xC8), // Cyan
    Color::new(0x96, 0x32, 0x96), // Purple
    Color::new(0x50, 0xA8, 0x32), // Green
    Color::new(0x32, 0x28, 0x96), // Blue
    Color::new(0xC8, 0xD2, 0x64), // Yellow
    Color::new(0x96, 0x5A, 0x1E), // Orange
    Color::new(0x64, 0x46, 0x00), // Brown
    Color::new(0xC8, 0x78, 0x6E), // Light Red
    Color::new(0x46, 0x46, 0x46), // Dark Grey
    Color::new(0x73, 0x73, 0x73), // Grey
    Color::new(0xA0, 0xE6, 0x8C), // Light Green
    Color::new(0x78, 0x6E, 0xC8), // Light Blue
    Color::new(0xA0, 0xA0, 0xA0), // Light Grey
];

/// GoDot palette - even luminance steps.
pub const PALETTE_GODOT: Palette = [
    Color::new(0x00, 0x00, 0x00), // Black
    Color::new(0xFF, 0xFF, 0xFF), // White
    Color::new(0x88, 0x00, 0x00), // Red
    Color::new(0xAA, 0xFF, 0xEE), // Cyan
    Color::new(0xCC, 0x44, 0xCC), // Purple
    Color::new(0x00, 0xCC, 0x55), // Green
    Color::new(0x00, 0x00, 0xAA), // Blue
    Color::new(0xEE, 0xEE, 0x77), // Yellow
    Color::new(0xDD, 0x88, 0x55), // Orange
    Color::new(0x66, 0x44, 0x00), // Brown
    Color::new(0xFF, 0x77, 0x77), // Light Red
    Color::new(0x33, 0x33, 0x33), // Dark Grey
    Color::new(0x77, 0x77, 0x77), // Grey
    Color::new(0xAA, 0xFF, 0x66), // Light Green
    Color::new(0x00, 0x88, 0xFF), // Light Blue
    Color::new(0xBB, 0xBB, 0xBB), // Light Grey
];

/// C64Sally palette.
pub const PALETTE_C64SALLY: Palette = [
    Color::new(0x00, 0x00, 0x00), // Black
    Color::new(0xFF, 0xFF, 0xFF), // White
    Color::new(0xB0, 0x37, 0x2B), // Red
    Color::new(0x76, 0xB4, 0xC0), // Cyan
    Color::new(0xAA, 0x3D, 0xA6), // Purple
    Color::new(0x58, 0xAD, 0x43), // Green
    Color::new(0x35, 0x28, 0xA9), // Blue
    Color::new(0xC8, 0xD7, 0x6F), // Yellow
    Color::new(0xAF, 0x4F, 0x25), // Orange
    Color::new(0x73, 0x39, 0x00), // Brown
    Color::new(0xDA, 0x67, 0x59), // Light Red
    Color::new(0x4C, 0x4C, 0x4C), // Dark Grey
    Color::new(0x7C, 0x7C, 0x7C), // Grey
    Color::new(0xAA, 0xE2, 0x84), // Light Green
    Color::new(0x7C, 0x5E, 0xD5), // Light Blue
    Color::new(0xA5, 0xA5, 0xA5), // Light Grey
];

/// Pepto's measured palette - the community reference.
pub const PALETTE_PEPTO: Palette = [
    Color::new(0x00, 0x00, 0x00), // Black
    Color::new(0xFF, 0xFF, 0xFF), // White
    Color::new(0x68, 0x37, 0x2B), // Red
    Color::new(0x70, 0xA4, 0xB2), // Cyan
    Color::new(0x6F, 0x3D, 0x86), // Purple
    Color::new(0x58, 0x8D, 0x43), // Green
    Color::new(0x35, 0x28, 0x79), // Blue
    Color::new(0xB8, 0xC7, 0x6F), // Yellow
    Color::new(0x6F, 0x4F, 0x25), // Orange
    Color::new(0x43, 0x39, 0x00), // Brown
    Color::new(0x9A, 0x67, 0x59), // Light Red
    Color::new(0x44, 0x44, 0x44), // Dark Grey
    Color::new(0x6C, 0x6C, 0x6C), // Grey
    Color::new(0x9A, 0xD2, 0x84), // Light Green
    Color::new(0x6C, 0x5E, 0xB5), // Light Blue
    Color::new(0x95, 0x95, 0x95), // Light Grey
];

/// Grayscale - Pepto luminances without chroma.
pub const PALETTE_GRAYSCALE: Palette = [
    Color::new(0x00, 0x00, 0x00), // Black
    Color::new(0xFF, 0xFF, 0xFF), // White
    Color::new(0x44, 0x44, 0x44), // Red
    Color::new(0x95, 0x95, 0x95), // Cyan
    Color::new(0x54, 0x54, 0x54), // Purple
    Color::new(0x75, 0x75, 0x75), // Green
    Color::new(0x36, 0x36, 0x36), // Blue
    Color::new(0xB9, 0xB9, 0xB9), // Yellow
    Color::new(0x53, 0x53, 0x53), // Orange
    Color::new(0x36, 0x36, 0x36), // Brown
    Color::new(0x74, 0x74, 0x74), // Light Red
    Color::new(0x44, 0x44, 0x44), // Dark Grey
    Color::new(0x6C, 0x6C, 0x6C), // Grey
    Color::new(0xB8, 0xB8, 0xB8), // Light Green
    Color::new(0x6B, 0x6B, 0x6B), // Light Blue
    Color::new(0x95, 0x95, 0x95), // Light Grey
];
