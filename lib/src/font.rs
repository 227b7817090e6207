//! Built-in monospaced glyph face used for raster re-synthesis.
//!
//! An 8x8 bitmap per charset glyph, bit 7 of each row byte being the
//! leftmost pixel. Shipping the face as const tables instead of a font
//! file keeps the output bit-deterministic: there is no font backend to
//! vary between platforms.

/// Advance width of every glyph, in pixels.
pub const GLYPH_WIDTH: u32 = 8;

/// Height of every glyph, in pixels.
pub const GLYPH_HEIGHT: u32 = 8;

/// Row stride multiplier: a text row occupies 1.5 glyph heights so the
/// art keeps the proportions established by the vertical-compression
/// resample.
pub const CHAR_ASPECT_RATIO: f32 = 1.5;

/// Offset from the top of a row band to the glyph top, centering the
/// glyph inside the taller band.
pub const VERTICAL_OFFSET: u32 = 2;

/// Glyph used to measure the face.
pub const REFERENCE_GLYPH: char = '@';

/// Face metrics, measured once per render from [`REFERENCE_GLYPH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub width: u32,
    pub height: u32,
}

/// Measure the advance box of the face from a reference glyph.
///
/// The face is strictly monospaced, so any covered glyph reports the
/// same box.
pub fn measure(reference: char) -> GlyphMetrics {
    let rows = glyph_rows(reference);
    GlyphMetrics {
        width: GLYPH_WIDTH,
        height: rows.len() as u32,
    }
}

/// Bitmap rows for one charset glyph, top to bottom.
///
/// A character outside the face renders as a filled cell, so a drifting
/// charset table shows up in the output instead of vanishing.
pub fn glyph_rows(ch: char) -> [u8; 8] {
    GLYPHS
        .iter()
        .find(|(glyph, _)| *glyph == ch)
        .map(|(_, rows)| *rows)
        .unwrap_or([0xFF; 8])
}

/// One bitmap per charset glyph, densest ink first.
const GLYPHS: [(char, [u8; 8]); 21] = [
    ('@', [0x7C, 0x82, 0x9A, 0xAA, 0x9E, 0x80, 0x7C, 0x00]),
    ('#', [0x24, 0x7E, 0x24, 0x24, 0x7E, 0x24, 0x00, 0x00]),
    ('8', [0x3C, 0x42, 0x42, 0x3C, 0x42, 0x42, 0x3C, 0x00]),
    ('&', [0x60, 0x90, 0x90, 0x60, 0x94, 0x88, 0x74, 0x00]),
    ('W', [0x82, 0x82, 0x82, 0x92, 0xAA, 0xC6, 0x82, 0x00]),
    ('M', [0x82, 0xC6, 0xAA, 0x92, 0x82, 0x82, 0x82, 0x00]),
    ('B', [0xFC, 0x82, 0x82, 0xFC, 0x82, 0x82, 0xFC, 0x00]),
    ('Q', [0x7C, 0x82, 0x82, 0x82, 0x92, 0x8C, 0x7A, 0x00]),
    ('H', [0x82, 0x82, 0x82, 0xFE, 0x82, 0x82, 0x82, 0x00]),
    ('D', [0xF8, 0x84, 0x82, 0x82, 0x82, 0x84, 0xF8, 0x00]),
    ('X', [0x82, 0x44, 0x28, 0x10, 0x28, 0x44, 0x82, 0x00]),
    ('Y', [0x82, 0x44, 0x28, 0x10, 0x10, 0x10, 0x10, 0x00]),
    ('O', [0x7C, 0x82, 0x82, 0x82, 0x82, 0x82, 0x7C, 0x00]),
    ('C', [0x7C, 0x82, 0x80, 0x80, 0x80, 0x82, 0x7C, 0x00]),
    ('I', [0x7C, 0x10, 0x10, 0x10, 0x10, 0x10, 0x7C, 0x00]),
    ('*', [0x10, 0x54, 0x38, 0x54, 0x10, 0x00, 0x00, 0x00]),
    ('!', [0x10, 0x10, 0x10, 0x10, 0x10, 0x00, 0x10, 0x00]),
    (';', [0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x30, 0x00]),
    (':', [0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00]),
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CHARSET;

    #[test]
    fn test_face_covers_full_charset() {
        for &ch in &CHARSET {
            assert!(
                GLYPHS.iter().any(|(glyph, _)| *glyph == ch),
                "charset glyph {ch:?} missing from the face"
            );
        }
    }

    #[test]
    fn test_measure_reference_glyph() {
        let metrics = measure(REFERENCE_GLYPH);
        assert_eq!(metrics.width, 8);
        assert_eq!(metrics.height, 8);
    }

    #[test]
    fn test_space_is_blank() {
        assert_eq!(glyph_rows(' '), [0; 8]);
    }

    #[test]
    fn test_unknown_glyph_is_filled() {
        assert_eq!(glyph_rows('~'), [0xFF; 8]);
    }

    #[test]
    fn test_glyphs_fit_inside_row_band() {
        // Glyph top offset plus glyph height stays within one row stride.
        let band = (GLYPH_HEIGHT as f32 * CHAR_ASPECT_RATIO) as u32;
        assert!(VERTICAL_OFFSET + GLYPH_HEIGHT <= band);
    }
}
