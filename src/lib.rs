//! qr_mask - QR code mask evaluation in pure Rust
//!
//! Extracts structural parameters from a rendered QR raster (module
//! size, symbol version), scores it with the standard four-rule mask
//! penalty, and applies any of the eight mask formulas while keeping the
//! fixed patterns intact. Versions 1-6 are supported.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Precondition-failure taxonomy shared by both components
pub mod error;
/// Raster interpretation (module size, version, penalty score)
pub mod interpreter;
/// Mask patterns and the mask application pass
pub mod masking;
/// Core data structures (Raster, Rgb, ModuleColors)
pub mod models;
/// Image-file glue and synthetic symbol rendering for the CLI and tests
pub mod tools;

pub use error::QrMaskError;
pub use interpreter::RasterInterpreter;
pub use masking::{MaskAction, MaskApplicator, MaskPattern};
pub use models::{ModuleColors, Raster, Rgb};

use rayon::prelude::*;

/// One entry of the eight-way mask sweep.
#[derive(Debug, Clone)]
pub struct MaskEvaluation {
    /// The pattern that was applied
    pub pattern: MaskPattern,
    /// Penalty score of the masked output; lower is better
    pub penalty: u32,
    /// The masked raster itself
    pub raster: Raster,
}

/// Apply all eight mask patterns to a raster and score each output.
///
/// The eight evaluations are independent (each reads the same immutable
/// source raster and produces its own output), so they run in parallel.
/// The result vector is ordered by pattern index.
pub fn evaluate_masks(
    raster: &Raster,
    colors: ModuleColors,
) -> Result<Vec<MaskEvaluation>, QrMaskError> {
    MaskPattern::ALL
        .par_iter()
        .map(|&pattern| {
            let masked = MaskApplicator::with_colors(raster, colors).apply(pattern)?;
            let penalty = RasterInterpreter::with_colors(&masked, colors).penalty()?;
            Ok(MaskEvaluation {
                pattern,
                penalty,
                raster: masked,
            })
        })
        .collect()
}

/// Evaluate all eight masks and return the one with the lowest penalty.
/// Ties go to the lowest pattern index.
///
/// ```
/// use qr_mask::{ModuleColors, best_mask, tools::blank_symbol};
///
/// let colors = ModuleColors::default();
/// let symbol = blank_symbol(1, 4, colors);
/// let chosen = best_mask(&symbol, colors).unwrap();
/// assert!(chosen.pattern.index() < 8);
/// ```
pub fn best_mask(raster: &Raster, colors: ModuleColors) -> Result<MaskEvaluation, QrMaskError> {
    let mut evaluations = evaluate_masks(raster, colors)?;
    evaluations.sort_by_key(|eval| (eval.penalty, eval.pattern.index()));
    Ok(evaluations.swap_remove(0))
}
