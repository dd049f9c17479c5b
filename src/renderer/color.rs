//! Ball colors

/// How much each channel drops for the shaded edge of a ball
pub const SHADE_STEP: u8 = 40;

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Every channel lowered by `amount`, saturating at zero
    pub fn darken(self, amount: u8) -> Self {
        Self::new(
            self.r.saturating_sub(amount),
            self.g.saturating_sub(amount),
            self.b.saturating_sub(amount),
        )
    }

    /// Edge/shadow tone used when drawing a ball of this color
    pub fn shade(self) -> Self {
        self.darken(SHADE_STEP)
    }

    /// CSS `rgb()` notation
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Ball palette, assigned by prize index
pub const PALETTE: [Rgb; 12] = [
    Rgb::new(0xFF, 0x6B, 0x6B),
    Rgb::new(0x4E, 0xCD, 0xC4),
    Rgb::new(0x45, 0xB7, 0xD1),
    Rgb::new(0xFF, 0xA0, 0x7A),
    Rgb::new(0x98, 0xD8, 0xC8),
    Rgb::new(0xF7, 0xDC, 0x6F),
    Rgb::new(0xBB, 0x8F, 0xCE),
    Rgb::new(0x85, 0xC1, 0xE2),
    Rgb::new(0xF8, 0xB7, 0x39),
    Rgb::new(0x52, 0xB7, 0x88),
    Rgb::new(0xFF, 0x8F, 0xA3),
    Rgb::new(0x99, 0xC1, 0xDE),
];

/// Palette color for the prize at `index`
#[inline]
pub fn palette_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}
