//! Helpers shared by the CLI binary and tests: image-file glue and a
//! synthetic symbol builder. The core components never touch a file
//! format; everything format-shaped lives here.

use crate::models::{ModuleColors, Raster, Rgb};
use std::path::Path;

/// Render a blank symbol skeleton for a version 1-6: finder rings,
/// timing lines and alignment blocks in place, every data module
/// background. The fixed patterns are drawn exactly where the mask
/// applicator's reconstruction pass redraws them, so masking a blank
/// symbol twice with an inverting pattern reproduces it pixel for pixel.
pub fn blank_symbol(version: u8, module_size: usize, colors: ModuleColors) -> Raster {
    let size = 17 + 4 * version as usize;
    let mut raster = Raster::new(size * module_size, size * module_size, colors.off);

    draw_finder(&mut raster, 0, 0, module_size, colors);
    draw_finder(&mut raster, size - 7, 0, module_size, colors);
    draw_finder(&mut raster, 0, size - 7, module_size, colors);

    for i in 7..size - 7 {
        let color = if i % 2 == 0 { colors.on } else { colors.off };
        raster.fill_module(i, 6, module_size, color);
        raster.fill_module(6, i, module_size, color);
    }

    if version > 1 {
        let mut center_y = size as isize - 7;
        while center_y > 7 {
            let mut center_x = size as isize - 7;
            while center_x > 7 {
                draw_alignment(
                    &mut raster,
                    center_x as usize,
                    center_y as usize,
                    module_size,
                    colors,
                );
                center_x -= 18;
            }
            center_y -= 18;
        }
    }

    raster
}

/// 7x7 finder: foreground border ring, background ring, 3x3 foreground
/// center.
fn draw_finder(raster: &mut Raster, col: usize, row: usize, module_size: usize, colors: ModuleColors) {
    for dy in 0..7usize {
        for dx in 0..7usize {
            let ring = dx.abs_diff(3).max(dy.abs_diff(3));
            let color = if ring == 2 { colors.off } else { colors.on };
            raster.fill_module(col + dx, row + dy, module_size, color);
        }
    }
}

/// 5x5 alignment block: foreground ring, background ring, foreground
/// center.
fn draw_alignment(
    raster: &mut Raster,
    center_x: usize,
    center_y: usize,
    module_size: usize,
    colors: ModuleColors,
) {
    for dy in 0..5usize {
        for dx in 0..5usize {
            let ring = dx.abs_diff(2).max(dy.abs_diff(2));
            let color = if ring == 1 { colors.off } else { colors.on };
            raster.fill_module(center_x - 2 + dx, center_y - 2 + dy, module_size, color);
        }
    }
}

/// Load an image file as a raster.
pub fn load_raster<P: AsRef<Path>>(path: P) -> Result<Raster, image::ImageError> {
    let img = image::open(path)?.to_rgb8();
    let (width, height) = img.dimensions();
    let mut raster = Raster::new(width as usize, height as usize, Rgb::WHITE);
    for (x, y, px) in img.enumerate_pixels() {
        raster.set(x as usize, y as usize, Rgb::new(px[0], px[1], px[2]));
    }
    Ok(raster)
}

/// Save a raster as an image file; the format follows the extension.
pub fn save_raster<P: AsRef<Path>>(raster: &Raster, path: P) -> Result<(), image::ImageError> {
    let img = image::RgbImage::from_fn(
        raster.width() as u32,
        raster.height() as u32,
        |x, y| {
            let px = raster.get(x as usize, y as usize);
            image::Rgb([px.r, px.g, px.b])
        },
    );
    img.save(path)
}
