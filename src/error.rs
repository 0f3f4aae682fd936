use thiserror::Error;

/// Precondition failures reported by the interpreter and the mask
/// applicator. All are fail-fast: they indicate a malformed input raster
/// or caller misuse, and nothing is retried or partially produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QrMaskError {
    /// No foreground run was found while scanning for the finder
    /// pattern border, so the pixels-per-module ratio is unknown.
    #[error("cannot determine module size: no foreground run found")]
    ModuleSizeUndeterminable,

    /// The raster's module grid derives a version outside 1-6.
    #[error("unsupported QR version {0}: only versions 1 to 6 are supported")]
    UnsupportedVersion(i32),

    /// Mask pattern indexes run from 0 to 7.
    #[error("mask pattern {0} does not exist")]
    UnknownMaskIndex(u8),
}
