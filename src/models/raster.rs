use super::Rgb;

/// Owned RGB pixel grid. Logically partitioned into square modules of a
/// uniform side length; components borrow a raster read-only and produce
/// new rasters rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// Create a raster filled with a single color
    pub fn new(width: usize, height: usize, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Raster width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the pixel at (x, y)
    ///
    /// # Panics
    /// Panics if (x, y) is out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.pixels[y * self.width + x]
    }

    /// Set the pixel at (x, y); out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    /// Fill one module block (module coordinates, not pixels) with a
    /// color. Writes extending past the raster edge are clipped.
    pub fn fill_module(&mut self, col: usize, row: usize, module_size: usize, color: Rgb) {
        for dy in 0..module_size {
            for dx in 0..module_size {
                self.set(col * module_size + dx, row * module_size + dy, color);
            }
        }
    }

    /// Build a raster from a flat RGB byte buffer (3 bytes per pixel),
    /// the layout image loaders hand over. Returns `None` when the
    /// buffer length does not match the dimensions.
    pub fn from_rgb_bytes(bytes: &[u8], width: usize, height: usize) -> Option<Self> {
        if bytes.len() != width * height * 3 {
            return None;
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Flatten into an RGB byte buffer (3 bytes per pixel)
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            bytes.extend_from_slice(&[px.r, px.g, px.b]);
        }
        bytes
    }
}
