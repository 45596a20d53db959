// autoredact/src/paint.rs
//! Paints redaction regions onto a raster image as opaque black boxes.

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use log::{debug, info};
use std::path::{Path, PathBuf};

use autoredact_core::Region;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// `redacted-<stem>.png` in the directory of `input`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("redacted-{}.png", stem))
}

/// Fills every region, clamped to the image. Returns how many were drawn.
pub fn paint_regions(image: &mut RgbaImage, regions: &[Region]) -> usize {
    let (width, height) = image.dimensions();
    let mut painted = 0;
    for region in regions {
        let Some(r) = region.clamp(width, height) else {
            debug!("Region {:?} lies outside the {}x{} image; skipped.", region, width, height);
            continue;
        };
        let rect = Rect::at(r.x0, r.y0).of_size(r.width() as u32, r.height() as u32);
        draw_filled_rect_mut(image, rect, BLACK);
        painted += 1;
    }
    painted
}

/// Loads `input`, paints `regions` and saves the result to `output`.
pub fn redact_image_file(input: &Path, output: &Path, regions: &[Region]) -> Result<usize> {
    let mut image = image::open(input)
        .with_context(|| format!("Failed to open image {}", input.display()))?
        .to_rgba8();
    let painted = paint_regions(&mut image, regions);
    image
        .save(output)
        .with_context(|| format!("Failed to write redacted image {}", output.display()))?;
    info!("Painted {} region(s) onto {}.", painted, output.display());
    Ok(painted)
}
