//! Mask pattern application: the eight mask predicates, their actions,
//! and the fixed-pattern reconstruction pass.

use crate::error::QrMaskError;
use crate::interpreter::RasterInterpreter;
use crate::models::{ModuleColors, Raster, Rgb};

/// What a mask does to a module its predicate selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskAction {
    /// Toggle between the canonical foreground and background colors
    Invert,
    /// Overwrite with a fixed color regardless of the current one
    ForceColor(Rgb),
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskPattern {
    /// (row + col) % 2 == 0
    Pattern0 = 0,
    /// row % 2 == 0
    Pattern1 = 1,
    /// col % 3 == 0
    Pattern2 = 2,
    /// (row + col) % 3 == 0
    Pattern3 = 3,
    /// (row/2 + col/3) % 2 == 0
    Pattern4 = 4,
    /// (row*col)%2 + (row*col)%3 == 0
    Pattern5 = 5,
    /// ((row*col)%2 + (row*col)%3) % 2 == 0
    Pattern6 = 6,
    /// ((row+col)%2 + (row*col)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns in index order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get the mask pattern for an index 0-7
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(MaskPattern::Pattern0),
            1 => Some(MaskPattern::Pattern1),
            2 => Some(MaskPattern::Pattern2),
            3 => Some(MaskPattern::Pattern3),
            4 => Some(MaskPattern::Pattern4),
            5 => Some(MaskPattern::Pattern5),
            6 => Some(MaskPattern::Pattern6),
            7 => Some(MaskPattern::Pattern7),
            _ => None,
        }
    }

    /// The pattern's index (0-7)
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Check if the module at (row, col) is selected by this pattern
    pub fn is_masked(&self, row: usize, col: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (row + col) % 2 == 0,
            MaskPattern::Pattern1 => row % 2 == 0,
            MaskPattern::Pattern2 => col % 3 == 0,
            MaskPattern::Pattern3 => (row + col) % 3 == 0,
            MaskPattern::Pattern4 => (row / 2 + col / 3) % 2 == 0,
            MaskPattern::Pattern5 => (row * col) % 2 + (row * col) % 3 == 0,
            MaskPattern::Pattern6 => ((row * col) % 2 + (row * col) % 3) % 2 == 0,
            MaskPattern::Pattern7 => ((row + col) % 2 + (row * col) % 3) % 2 == 0,
        }
    }

    /// The action this pattern applies to selected modules. Pattern 2
    /// recolors to the fixed red debug fill instead of inverting; that
    /// asymmetry is part of the observable output and stays a tagged
    /// variant rather than being unified into an invert.
    pub fn action(&self) -> MaskAction {
        match self {
            MaskPattern::Pattern2 => MaskAction::ForceColor(Rgb::RED),
            _ => MaskAction::Invert,
        }
    }
}

/// Applies mask patterns to a QR raster, producing a new raster per
/// call. The input raster is never mutated.
pub struct MaskApplicator<'a> {
    raster: &'a Raster,
    colors: ModuleColors,
}

impl<'a> MaskApplicator<'a> {
    /// Mask a raster using the default black/white palette
    pub fn new(raster: &'a Raster) -> Self {
        Self::with_colors(raster, ModuleColors::default())
    }

    /// Mask a raster using an explicit module palette
    pub fn with_colors(raster: &'a Raster, colors: ModuleColors) -> Self {
        Self { raster, colors }
    }

    /// Apply the mask pattern with the given index (0-7)
    pub fn apply_mask_pattern(&self, index: u8) -> Result<Raster, QrMaskError> {
        let pattern =
            MaskPattern::from_index(index).ok_or(QrMaskError::UnknownMaskIndex(index))?;
        self.apply(pattern)
    }

    /// Apply a mask pattern, returning the masked raster.
    ///
    /// Modules inside the three fixed corner zones are copied unchanged.
    /// The timing lines and (for version > 1) the alignment blocks are
    /// redrawn after the mask pass, overwriting whatever it produced
    /// there.
    pub fn apply(&self, pattern: MaskPattern) -> Result<Raster, QrMaskError> {
        let interpreter = RasterInterpreter::with_colors(self.raster, self.colors);
        let version = interpreter.version()?;
        if !(1..=6).contains(&version) {
            return Err(QrMaskError::UnsupportedVersion(version));
        }
        let module_size = interpreter.module_size()?;
        let size = self.raster.width() / module_size;

        let mut out = Raster::new(self.raster.width(), self.raster.height(), self.colors.off);
        for row in 0..self.raster.height() / module_size {
            for col in 0..self.raster.width() / module_size {
                let mut color = self.raster.get(col * module_size, row * module_size);
                if outside_fixed_corners(row, col, size) && pattern.is_masked(row, col) {
                    color = match pattern.action() {
                        MaskAction::Invert => self.colors.invert(color),
                        MaskAction::ForceColor(fill) => fill,
                    };
                }
                out.fill_module(col, row, module_size, color);
            }
        }

        self.redraw_timing(&mut out, module_size, size);
        if version > 1 {
            self.redraw_alignment(&mut out, module_size, size);
        }
        Ok(out)
    }

    /// Redraw the two timing lines at module row 6 and column 6,
    /// alternating foreground on even module index.
    fn redraw_timing(&self, out: &mut Raster, module_size: usize, size: usize) {
        for i in 7..size.saturating_sub(7) {
            let color = if i % 2 == 0 {
                self.colors.on
            } else {
                self.colors.off
            };
            out.fill_module(i, 6, module_size, color);
            out.fill_module(6, i, module_size, color);
        }
    }

    /// Redraw alignment blocks at every center reached by stepping
    /// inward from the bottom/right edges by 7 modules and then by
    /// 18-module strides, stopping once within 7 modules of either edge.
    /// Only the layouts of versions 2-6 are handled.
    fn redraw_alignment(&self, out: &mut Raster, module_size: usize, size: usize) {
        let mut center_y = size as isize - 7;
        while center_y > 7 {
            let mut center_x = size as isize - 7;
            while center_x > 7 {
                self.draw_alignment_block(out, center_x as usize, center_y as usize, module_size);
                center_x -= 18;
            }
            center_y -= 18;
        }
    }

    /// 5x5 foreground ring around a 3x3 background ring around a single
    /// foreground center module.
    fn draw_alignment_block(
        &self,
        out: &mut Raster,
        center_x: usize,
        center_y: usize,
        module_size: usize,
    ) {
        for dy in 0..5usize {
            for dx in 0..5usize {
                let ring = dx.abs_diff(2).max(dy.abs_diff(2));
                let color = if ring == 1 {
                    self.colors.off
                } else {
                    self.colors.on
                };
                out.fill_module(center_x - 2 + dx, center_y - 2 + dy, module_size, color);
            }
        }
    }
}

/// True when the module at (row, col) lies outside all three fixed
/// corner zones, tested against the grid boundaries.
fn outside_fixed_corners(row: usize, col: usize, size: usize) -> bool {
    (row > 8 || col > 8) && (row < size - 8 || col > 8) && (row > 8 || col < size - 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::blank_symbol;

    const INVERTING: [u8; 7] = [0, 1, 3, 4, 5, 6, 7];

    #[test]
    fn test_unknown_mask_index() {
        let symbol = blank_symbol(1, 1, ModuleColors::default());
        let applicator = MaskApplicator::new(&symbol);
        assert_eq!(
            applicator.apply_mask_pattern(8),
            Err(QrMaskError::UnknownMaskIndex(8))
        );
    }

    #[test]
    fn test_unsupported_version() {
        // 45 modules per side derives version 7.
        let mut raster = Raster::new(45, 45, Rgb::WHITE);
        for x in 0..7 {
            raster.set(x, 0, Rgb::BLACK);
        }
        let applicator = MaskApplicator::new(&raster);
        assert_eq!(
            applicator.apply_mask_pattern(0),
            Err(QrMaskError::UnsupportedVersion(7))
        );
    }

    #[test]
    fn test_fixed_corners_boundary() {
        let size = 21;
        assert!(!outside_fixed_corners(8, 8, size));
        assert!(outside_fixed_corners(9, 9, size));
        assert!(!outside_fixed_corners(0, size - 8, size));
        assert!(outside_fixed_corners(0, size - 9, size));
        assert!(!outside_fixed_corners(size - 8, 0, size));
        assert!(outside_fixed_corners(size - 9, 9, size));
    }

    #[test]
    fn test_inverting_masks_are_involutive() {
        let colors = ModuleColors::default();
        for version in [1u8, 2, 4, 6] {
            for module_size in [1usize, 2] {
                let symbol = blank_symbol(version, module_size, colors);
                for index in INVERTING {
                    let once = MaskApplicator::with_colors(&symbol, colors)
                        .apply_mask_pattern(index)
                        .unwrap();
                    let twice = MaskApplicator::with_colors(&once, colors)
                        .apply_mask_pattern(index)
                        .unwrap();
                    assert_eq!(
                        twice, symbol,
                        "mask {index} not involutive for v{version} m{module_size}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_mask2_forces_red_and_is_idempotent() {
        let colors = ModuleColors::default();
        let symbol = blank_symbol(1, 1, colors);
        let once = MaskApplicator::with_colors(&symbol, colors)
            .apply_mask_pattern(2)
            .unwrap();

        // Data module at (row 9, col 9): col % 3 == 0 selects it.
        assert_eq!(once.get(9, 9), Rgb::RED);
        // Col 10 is not selected and stays background.
        assert_eq!(once.get(10, 9), Rgb::WHITE);
        assert_ne!(once, symbol);

        let twice = MaskApplicator::with_colors(&once, colors)
            .apply_mask_pattern(2)
            .unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn test_fixed_zones_preserved_for_every_mask() {
        let colors = ModuleColors::default();
        let version = 3u8;
        let module_size = 2usize;
        let symbol = blank_symbol(version, module_size, colors);
        let size = symbol.width() / module_size;

        for index in 0..8u8 {
            let masked = MaskApplicator::with_colors(&symbol, colors)
                .apply_mask_pattern(index)
                .unwrap();

            // Corner zones.
            for row in 0..size {
                for col in 0..size {
                    if outside_fixed_corners(row, col, size) {
                        continue;
                    }
                    assert_modules_equal(&symbol, &masked, col, row, module_size, index);
                }
            }
            // Timing lines.
            for i in 0..size {
                assert_modules_equal(&symbol, &masked, i, 6, module_size, index);
                assert_modules_equal(&symbol, &masked, 6, i, module_size, index);
            }
            // Alignment block at the lone version-3 center.
            for dy in 0..5 {
                for dx in 0..5 {
                    let col = size - 9 + dx;
                    let row = size - 9 + dy;
                    assert_modules_equal(&symbol, &masked, col, row, module_size, index);
                }
            }
        }
    }

    fn assert_modules_equal(
        a: &Raster,
        b: &Raster,
        col: usize,
        row: usize,
        module_size: usize,
        index: u8,
    ) {
        for dy in 0..module_size {
            for dx in 0..module_size {
                let x = col * module_size + dx;
                let y = row * module_size + dy;
                assert_eq!(
                    a.get(x, y),
                    b.get(x, y),
                    "mask {index} disturbed fixed module ({col}, {row})"
                );
            }
        }
    }

    #[test]
    fn test_masking_preserves_geometry() {
        let colors = ModuleColors::default();
        for version in 1..=6u8 {
            let symbol = blank_symbol(version, 3, colors);
            for index in 0..8u8 {
                let masked = MaskApplicator::with_colors(&symbol, colors)
                    .apply_mask_pattern(index)
                    .unwrap();
                let interpreter = RasterInterpreter::with_colors(&masked, colors);
                assert_eq!(interpreter.module_size(), Ok(3));
                assert_eq!(interpreter.version(), Ok(version as i32));
            }
        }
    }

    #[test]
    fn test_input_raster_is_not_mutated() {
        let colors = ModuleColors::default();
        let symbol = blank_symbol(2, 1, colors);
        let copy = symbol.clone();
        let _ = MaskApplicator::with_colors(&symbol, colors)
            .apply_mask_pattern(0)
            .unwrap();
        assert_eq!(symbol, copy);
    }

    #[test]
    fn test_mask0_inverts_checkerboard_positions() {
        let colors = ModuleColors::default();
        let symbol = blank_symbol(1, 1, colors);
        let masked = MaskApplicator::with_colors(&symbol, colors)
            .apply_mask_pattern(0)
            .unwrap();
        // (row 9, col 9): (9 + 9) % 2 == 0, background inverts to
        // foreground; (row 9, col 10) is untouched.
        assert_eq!(masked.get(9, 9), Rgb::BLACK);
        assert_eq!(masked.get(10, 9), Rgb::WHITE);
    }
}
