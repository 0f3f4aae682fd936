//! Core data structures: the pixel raster, the RGB palette, and the
//! shared on/off module colors.

pub mod palette;
pub mod raster;

pub use palette::{ModuleColors, Rgb};
pub use raster::Raster;
