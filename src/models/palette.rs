/// An RGB pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Canonical foreground (dark module) color
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Canonical background (light module) color
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Debug fill used by mask pattern 2
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    /// Create an RGB value from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The on/off module palette shared by the interpreter and the mask
/// applicator. Immutable; pass one value to both components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleColors {
    /// Foreground (dark) module color
    pub on: Rgb,
    /// Background (light) module color
    pub off: Rgb,
}

impl ModuleColors {
    /// Create a palette from explicit on/off colors
    pub const fn new(on: Rgb, off: Rgb) -> Self {
        Self { on, off }
    }

    /// Invert a module color. The foreground color maps to background;
    /// anything else (including stray colors like the red debug fill)
    /// maps to foreground.
    pub fn invert(&self, color: Rgb) -> Rgb {
        if color == self.on { self.off } else { self.on }
    }
}

impl Default for ModuleColors {
    fn default() -> Self {
        Self::new(Rgb::BLACK, Rgb::WHITE)
    }
}
