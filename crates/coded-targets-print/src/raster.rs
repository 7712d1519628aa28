//! PNG sheet rendering.

use coded_targets_ring::RingCatalog;
use nalgebra::Point2;

use crate::{page_slots, PrintError, SheetLayout, TargetGeometry};

#[cfg(feature = "tracing")]
use tracing::instrument;

const MAX_DPI: u32 = 1200;
const PAPER: u8 = 255;
const BACKGROUND: u8 = 0;
const WHITE: u8 = 255;

/// Rasterize one page into an 8-bit grayscale PNG.
///
/// Pixels are sampled at their centres, without antialiasing. Labels are
/// not drawn; use the SVG output when numbered targets are needed.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(catalog, layout), fields(codes = catalog.len()))
)]
pub fn render_sheet_png(
    catalog: &RingCatalog,
    layout: &SheetLayout,
    page: usize,
    dpi: u32,
) -> Result<Vec<u8>, PrintError> {
    if dpi == 0 || dpi > MAX_DPI {
        return Err(PrintError::InvalidDpi {
            got: dpi,
            max: MAX_DPI,
        });
    }
    layout.validate()?;
    let slots = page_slots(catalog, layout, page)?;

    let scale = layout.unit.pixels_per_unit(dpi);
    let width = (layout.width * scale).round().max(1.0) as usize;
    let height = (layout.height * scale).round().max(1.0) as usize;
    let mut pixels = vec![PAPER; width * height];

    let to_px = |v: f32, limit: usize| ((v * scale).round().max(0.0) as usize).min(limit);
    let [bx, by, bw, bh] = layout.background_rect();
    let (x0, x1) = (to_px(bx, width), to_px(bx + bw, width));
    let (y0, y1) = (to_px(by, height), to_px(by + bh, height));
    for row in pixels.chunks_exact_mut(width).take(y1).skip(y0) {
        row[x0..x1].fill(BACKGROUND);
    }

    let r = layout.dot_radius();
    for (slot, codeword) in slots {
        let center = layout.target_center(slot);
        let g = TargetGeometry::new(codeword.pattern, catalog.ring_length(), center, r);
        let reach = g.ring_outer;
        let (cx0, cx1) = (
            to_px(center.x - reach, width),
            to_px(center.x + reach, width),
        );
        let (cy0, cy1) = (
            to_px(center.y - reach, height),
            to_px(center.y + reach, height),
        );
        for py in cy0..cy1 {
            for px in cx0..cx1 {
                let p = Point2::new((px as f32 + 0.5) / scale, (py as f32 + 0.5) / scale);
                if g.is_white(p) {
                    pixels[py * width + px] = WHITE;
                }
            }
        }
    }

    encode_gray(&pixels, width as u32, height as u32)
}

fn encode_gray(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PrintError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixels)?;
        writer.finish()?;
    }
    Ok(out)
}
