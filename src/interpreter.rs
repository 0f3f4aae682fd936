//! Raster interpretation: module size detection, version derivation and
//! the four-rule mask penalty score.

use crate::error::QrMaskError;
use crate::models::{ModuleColors, Raster, Rgb};

/// The two 11-module signatures penalized by rule 3.
const FINDER_LIKE: [&str; 2] = ["10111010000", "00001011101"];

/// Read-only interpreter over a rendered QR raster.
///
/// Everything is recomputed from the raster on every call; no state is
/// cached between queries.
pub struct RasterInterpreter<'a> {
    raster: &'a Raster,
    colors: ModuleColors,
}

impl<'a> RasterInterpreter<'a> {
    /// Interpret a raster with the default black/white palette
    pub fn new(raster: &'a Raster) -> Self {
        Self::with_colors(raster, ModuleColors::default())
    }

    /// Interpret a raster with an explicit module palette
    pub fn with_colors(raster: &'a Raster, colors: ModuleColors) -> Self {
        Self { raster, colors }
    }

    /// Determine the module size in pixels.
    ///
    /// Scans pixels left-to-right, top-to-bottom and measures the first
    /// horizontal foreground run it hits. Scanning starts above any data
    /// region, so that run is the top row of the top-left finder
    /// pattern's outer ring, which spans exactly 7 modules.
    pub fn module_size(&self) -> Result<usize, QrMaskError> {
        for y in 0..self.raster.height() {
            for x in 0..self.raster.width() {
                let color = self.raster.get(x, y);
                if color != self.colors.on {
                    continue;
                }
                let mut run = 0;
                let mut x = x;
                while x < self.raster.width() && self.raster.get(x, y) == self.colors.on {
                    run += 1;
                    x += 1;
                }
                if run / 7 == 0 {
                    // A run narrower than one ring module cannot be the
                    // finder border; the raster is malformed.
                    return Err(QrMaskError::ModuleSizeUndeterminable);
                }
                return Ok(run / 7);
            }
        }
        Err(QrMaskError::ModuleSizeUndeterminable)
    }

    /// Derive the symbol version from `size = version * 4 + 17`.
    ///
    /// No bounds validation happens here; a raster outside versions 1-6
    /// yields a number outside that range and is rejected by the mask
    /// applicator.
    pub fn version(&self) -> Result<i32, QrMaskError> {
        let module_size = self.module_size()?;
        Ok(((self.raster.width() / module_size) as i32 - 17) / 4)
    }

    /// Compute the four-rule penalty score; lower is better.
    pub fn penalty(&self) -> Result<u32, QrMaskError> {
        let module_size = self.module_size()?;
        let grid = ModuleGrid::sample(self.raster, module_size);
        Ok(rule_runs(&grid)
            + rule_blocks(&grid)
            + rule_finder_like(&grid, self.colors)
            + rule_balance(&grid, self.colors))
    }
}

/// Module-grid view of a raster, sampling each module's top-left pixel.
struct ModuleGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Rgb>,
}

impl ModuleGrid {
    fn sample(raster: &Raster, module_size: usize) -> Self {
        let cols = raster.width() / module_size;
        let rows = raster.height() / module_size;
        let mut cells = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(raster.get(col * module_size, row * module_size));
            }
        }
        Self { cols, rows, cells }
    }

    fn get(&self, col: usize, row: usize) -> Rgb {
        self.cells[row * self.cols + col]
    }

    fn row(&self, row: usize) -> impl Iterator<Item = Rgb> + '_ {
        (0..self.cols).map(move |col| self.get(col, row))
    }

    fn column(&self, col: usize) -> impl Iterator<Item = Rgb> + '_ {
        (0..self.rows).map(move |row| self.get(col, row))
    }
}

/// Rule 1: runs of equal colors, per row then per column. A run reaching
/// length 4 adds 3; every module beyond length 4 adds 1 more.
fn rule_runs(grid: &ModuleGrid) -> u32 {
    let mut penalty = 0;
    for row in 0..grid.rows {
        penalty += line_run_penalty(grid.row(row));
    }
    for col in 0..grid.cols {
        penalty += line_run_penalty(grid.column(col));
    }
    penalty
}

fn line_run_penalty(line: impl Iterator<Item = Rgb>) -> u32 {
    let mut penalty = 0;
    let mut prev: Option<Rgb> = None;
    let mut run = 0usize;
    for color in line {
        run = if prev == Some(color) { run + 1 } else { 1 };
        if run == 4 {
            penalty += 3;
        } else if run > 4 {
            penalty += 1;
        }
        prev = Some(color);
    }
    penalty
}

/// Rule 2: every overlapping 2x2 block of adjacent modules whose four
/// raw color samples are pairwise identical adds 3.
fn rule_blocks(grid: &ModuleGrid) -> u32 {
    let mut penalty = 0;
    for row in 0..grid.rows.saturating_sub(1) {
        for col in 0..grid.cols.saturating_sub(1) {
            let a = grid.get(col, row);
            let b = grid.get(col + 1, row);
            let c = grid.get(col, row + 1);
            let d = grid.get(col + 1, row + 1);
            if a == b && b == c && c == d {
                penalty += 3;
            }
        }
    }
    penalty
}

/// Rule 3: finder-like 11-module signatures in rows, then in columns,
/// consumed non-overlapping by leftmost-first removal. Each hit adds 40.
///
/// Removal concatenates the remainder, so a match created by stitching
/// the two sides together is counted as well. That literal behavior is
/// the scoring contract; it is not the ISO 1:1:3:1:1 ratio scan.
fn rule_finder_like(grid: &ModuleGrid, colors: ModuleColors) -> u32 {
    let mut hits = 0;
    for row in 0..grid.rows {
        hits += strip_signatures(line_bits(grid.row(row), colors));
    }
    for col in 0..grid.cols {
        hits += strip_signatures(line_bits(grid.column(col), colors));
    }
    hits * 40
}

fn line_bits(line: impl Iterator<Item = Rgb>, colors: ModuleColors) -> String {
    line.map(|color| if color == colors.on { '1' } else { '0' })
        .collect()
}

fn strip_signatures(mut line: String) -> u32 {
    let mut hits = 0;
    for signature in FINDER_LIKE {
        while let Some(at) = line.find(signature) {
            line.replace_range(at..at + signature.len(), "");
            hits += 1;
        }
    }
    hits
}

/// Rule 4: deviation of the foreground percentage from 50%, quantized to
/// the nearer multiple of 5 in either direction.
fn rule_balance(grid: &ModuleGrid, colors: ModuleColors) -> u32 {
    let total = (grid.cols * grid.rows) as f64;
    let dark = grid.cells.iter().filter(|&&c| c == colors.on).count() as f64;
    let p = (dark / total * 100.0).round() as i64;
    let up = ((p as f64 / 5.0).ceil() as i64 * 5 - 50).abs() * 2;
    let down = ((p as f64 / 5.0).floor() as i64 * 5 - 50).abs() * 2;
    up.min(down) as u32
}
