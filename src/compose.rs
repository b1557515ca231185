//! Render a practice sheet into a single raster.
//!
//! A host UI usually draws cells straight into its window; this module
//! produces the same picture as an image, for printing or saving.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use crate::cells::CellMetrics;
use crate::enhance::enhance;
use crate::geometry::{Color, Size};
use crate::sheet::{SheetError, SheetParams, grid_dims, placements};

/// Compose `images` into a practice sheet.
///
/// Each source image is enhanced once with the sheet's contrast and
/// brightness, then every instance is scaled into its cell (aspect ratio
/// kept, top-left anchored) on a `background` canvas. An empty image set
/// gives a canvas of just the margins.
pub fn compose_sheet(
    images: &[RgbImage],
    params: &SheetParams,
    metrics: &CellMetrics,
    background: Color,
) -> Result<RgbImage, SheetError> {
    let dims = grid_dims(images.len(), params)?;
    let size = metrics.sheet_size(dims);
    let mut canvas = RgbImage::from_pixel(
        size.width.max(1),
        size.height.max(1),
        Rgb([background.r, background.g, background.b]),
    );

    // Scale once per source; repeats reuse the scaled copy.
    let scaled: Vec<RgbImage> = images
        .iter()
        .map(|img| {
            let enhanced = enhance(img, params.contrast, params.brightness);
            let fit = metrics.fit_image(Size::new(img.width(), img.height()));
            if fit.is_empty() || fit == Size::new(img.width(), img.height()) {
                enhanced
            } else {
                imageops::resize(&enhanced, fit.width, fit.height, FilterType::Lanczos3)
            }
        })
        .collect();

    for p in placements(images.len(), params)? {
        let cell = metrics.cell_rect(p.row, p.col);
        imageops::replace(&mut canvas, &scaled[p.source], cell.x as i64, cell.y as i64);
    }
    log::debug!(
        "composed {} source image(s) into a {}x{} sheet",
        images.len(),
        size.width,
        size.height
    );
    Ok(canvas)
}

/// Save a composed sheet; the format follows the file extension.
pub fn save_sheet(sheet: &RgbImage, path: &Path) -> image::ImageResult<()> {
    sheet.save(path)
}
