use image::{Rgb, RgbImage};
use log::debug;

use crate::error::{Result, TerrainError};
use crate::layer::{DenseLayer, Point};
use crate::palette::Palette;

pub type Color = Rgb<u8>;

// Row-major RGB image, origin top-left
pub type PixelBuffer = RgbImage;

// What to do with points that land outside the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bounds {
    // Fail on the first out-of-range point, before anything is painted
    #[default]
    Reject,
    // Skip off-image columns and trim fills to the visible rows; every
    // clipped point is counted in `RasterStats`
    Clip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterStats {
    pub columns_painted: usize,
    pub pixels_painted: usize,
    pub points_clipped: usize,
}

impl RasterStats {
    fn merge(&mut self, other: RasterStats) {
        self.columns_painted += other.columns_painted;
        self.pixels_painted += other.pixels_painted;
        self.points_clipped += other.points_clipped;
    }
}

// (column, row) of a terrain surface point. Higher elevation means a smaller row.
pub fn surface_cell(point: Point, image_height: u32) -> (i64, i64) {
    let column = point.x.round() as i64;
    // Saturates, so a hugely negative elevation stays below the image
    let row = i64::from(image_height).saturating_sub(point.y.round() as i64);
    (column, row)
}

// Paint every point of `layer` and fill its column down to the bottom edge
pub fn rasterize(
    buffer: &mut PixelBuffer,
    layer: &DenseLayer,
    color: Color,
    bounds: Bounds,
) -> Result<RasterStats> {
    let (width, height) = buffer.dimensions();
    let (w, h) = (i64::from(width), i64::from(height));

    if bounds == Bounds::Reject {
        for &point in layer.points() {
            let (column, row) = surface_cell(point, height);
            if !(0..w).contains(&column) || !(0..h).contains(&row) {
                return Err(TerrainError::OutOfRangeCoordinate {
                    column,
                    row,
                    width,
                    height,
                });
            }
        }
    }

    let mut stats = RasterStats::default();
    for &point in layer.points() {
        let (column, row) = surface_cell(point, height);
        // Surface below the image or column off either side
        if !(0..w).contains(&column) || row >= h {
            stats.points_clipped += 1;
            continue;
        }
        if row < 0 {
            stats.points_clipped += 1;
        }

        let top = row.max(0) as u32;
        for y in top..height {
            buffer.put_pixel(column as u32, y, color);
        }
        stats.columns_painted += 1;
        stats.pixels_painted += (height - top) as usize;
    }

    if stats.points_clipped > 0 {
        debug!(
            "clipped {} of {} points to the {}x{} buffer",
            stats.points_clipped,
            layer.len(),
            width,
            height
        );
    }
    Ok(stats)
}

// Rasterize layers in the given order (back to front); layer `i` uses palette colour `i`
pub fn rasterize_layers(
    buffer: &mut PixelBuffer,
    layers: &[DenseLayer],
    palette: &Palette,
    bounds: Bounds,
) -> Result<RasterStats> {
    let mut total = RasterStats::default();
    for (index, layer) in layers.iter().enumerate() {
        let stats = rasterize(buffer, layer, palette.layer_color(index), bounds)?;
        debug!(
            "layer {index}: {} columns, {} pixels, {} clipped",
            stats.columns_painted, stats.pixels_painted, stats.points_clipped
        );
        total.merge(stats);
    }
    Ok(total)
}
