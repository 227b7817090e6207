//! Image to ASCII art conversion.
//!
//! The pipeline: decode, derive luminance, resize both buffers in
//! lock-step to the glyph grid, quantize every sample through the
//! charset, then re-synthesize a raster canvas by drawing one glyph per
//! cell. Every buffer is call-local; a failed render leaves nothing
//! behind for the next call to trip over.

use std::path::Path;

use image::{GrayImage, Rgb, RgbImage};
use log::debug;

use crate::charset;
use crate::error::Result;
use crate::filters;
use crate::font::{self, GlyphMetrics};
use crate::io;
use crate::resize;

/// Ink color for uncolorized output.
const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Canvas background.
const CANVAS: Rgb<u8> = Rgb([255, 255, 255]);

/// Render the image at `path` as ASCII art on a white canvas.
///
/// The canvas is `target_width * glyph_width` pixels wide and
/// `new_height * 1.5 * glyph_height` tall, where `new_height` follows
/// from the source aspect ratio (see [`resize::target_height`]). With
/// `colorize` each glyph is drawn in the color point-sampled at its
/// cell; otherwise in solid black.
///
/// Output is a deterministic function of the inputs: same file, width,
/// and flag always produce a bit-identical canvas.
pub fn render(path: impl AsRef<Path>, target_width: u32, colorize: bool) -> Result<RgbImage> {
    let path = path.as_ref();
    let source = io::decode(path)?;
    let gray = filters::luminance(&source);
    let (gray, color) = resize::resize_pair(&gray, &source, target_width)?;

    let layout = layout_rows(&gray);
    debug!(
        "ascii layout for {:?}: {} cols x {} rows",
        path,
        target_width,
        layout.len()
    );

    let metrics = font::measure(font::REFERENCE_GLYPH);
    let canvas_width = target_width * metrics.width;
    let canvas_height =
        (gray.height() as f32 * font::CHAR_ASPECT_RATIO * metrics.height as f32) as u32;
    let mut canvas = RgbImage::from_pixel(canvas_width, canvas_height, CANVAS);

    for (row, line) in layout.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let ink = if colorize {
                *color.get_pixel(col as u32, row as u32)
            } else {
                INK
            };
            let x = col as u32 * metrics.width;
            let y = (row as f32 * metrics.height as f32 * font::CHAR_ASPECT_RATIO) as u32
                + font::VERTICAL_OFFSET;
            draw_glyph(&mut canvas, ch, x, y, ink, metrics);
        }
    }

    Ok(canvas)
}

/// Render the image at `path` as plain text, one string per grid row.
///
/// Same quantization as [`render`], no raster re-synthesis. Each call
/// recomputes the rows in full and returns an owned sequence.
pub fn render_text(path: impl AsRef<Path>, target_width: u32) -> Result<Vec<String>> {
    let source = io::decode(path.as_ref())?;
    let gray = filters::luminance(&source);
    let gray = resize::resize(&gray, target_width)?;
    Ok(layout_rows(&gray))
}

/// Quantize a resized luminance buffer into text rows.
///
/// Rows are `width` characters each; should the sample count ever not
/// divide evenly, the final row is simply shorter.
fn layout_rows(gray: &GrayImage) -> Vec<String> {
    let cols = gray.width() as usize;
    let glyphs: Vec<char> = gray.pixels().map(|p| charset::quantize(p[0])).collect();
    glyphs
        .chunks(cols)
        .map(|row| row.iter().collect())
        .collect()
}

/// Stamp one glyph bitmap onto the canvas at pixel position `(x, y)`.
fn draw_glyph(canvas: &mut RgbImage, ch: char, x: u32, y: u32, ink: Rgb<u8>, metrics: GlyphMetrics) {
    let rows = font::glyph_rows(ch);
    for (dy, bits) in rows.iter().enumerate() {
        let py = y + dy as u32;
        if py >= canvas.height() {
            break;
        }
        for dx in 0..metrics.width {
            if bits & (0x80 >> dx) != 0 {
                let px = x + dx;
                if px < canvas.width() {
                    canvas.put_pixel(px, py, ink);
                }
            }
        }
    }
}
