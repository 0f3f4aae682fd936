//! Integration tests for the full mask-selection workflow
//!
//! These exercise the caller's intended control flow end to end: build a
//! raster, read its geometry, mask it eight ways, re-interpret each
//! output for its penalty, and pick the winner.

use qr_mask::tools::blank_symbol;
use qr_mask::{
    MaskApplicator, MaskPattern, ModuleColors, QrMaskError, Raster, RasterInterpreter, Rgb,
    best_mask, evaluate_masks,
};

#[test]
fn test_full_sweep_across_supported_versions() {
    let colors = ModuleColors::default();
    for version in 1..=6u8 {
        for module_size in [1usize, 2, 4] {
            let symbol = blank_symbol(version, module_size, colors);
            let evaluations = evaluate_masks(&symbol, colors).expect("sweep should succeed");
            assert_eq!(evaluations.len(), 8);

            for eval in &evaluations {
                // Masking never changes geometry.
                let interpreter = RasterInterpreter::with_colors(&eval.raster, colors);
                assert_eq!(interpreter.module_size(), Ok(module_size));
                assert_eq!(interpreter.version(), Ok(version as i32));
            }

            let best = best_mask(&symbol, colors).expect("selection should succeed");
            for eval in &evaluations {
                assert!(best.penalty <= eval.penalty);
            }
        }
    }
}

#[test]
fn test_sweep_is_deterministic() {
    let colors = ModuleColors::default();
    let symbol = blank_symbol(3, 2, colors);
    let first = evaluate_masks(&symbol, colors).unwrap();
    let second = evaluate_masks(&symbol, colors).unwrap();
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.pattern, b.pattern);
        assert_eq!(a.penalty, b.penalty);
        assert_eq!(a.raster, b.raster);
    }
}

#[test]
fn test_masked_output_feeds_back_into_the_applicator() {
    // A masked raster is itself a valid input: unmasking with the same
    // inverting pattern restores the source symbol.
    let colors = ModuleColors::default();
    let symbol = blank_symbol(5, 2, colors);
    let masked = MaskApplicator::with_colors(&symbol, colors)
        .apply(MaskPattern::Pattern6)
        .unwrap();
    let restored = MaskApplicator::with_colors(&masked, colors)
        .apply(MaskPattern::Pattern6)
        .unwrap();
    assert_eq!(restored, symbol);
}

#[test]
fn test_precondition_failures_surface_unchanged() {
    let colors = ModuleColors::default();

    let blank = Raster::new(21, 21, Rgb::WHITE);
    assert_eq!(
        RasterInterpreter::with_colors(&blank, colors).module_size(),
        Err(QrMaskError::ModuleSizeUndeterminable)
    );

    let symbol = blank_symbol(1, 1, colors);
    assert_eq!(
        MaskApplicator::with_colors(&symbol, colors).apply_mask_pattern(8),
        Err(QrMaskError::UnknownMaskIndex(8))
    );

    let mut oversized = Raster::new(45, 45, Rgb::WHITE);
    for x in 0..7 {
        oversized.set(x, 0, Rgb::BLACK);
    }
    assert_eq!(
        MaskApplicator::with_colors(&oversized, colors).apply_mask_pattern(0),
        Err(QrMaskError::UnsupportedVersion(7))
    );
}
