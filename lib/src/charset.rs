//! Luminance-to-glyph quantization table.
//!
//! The ramp is ordered by ink density: index 0 carries the most ink, the
//! last index the least, so dark pixels map to heavy glyphs when the art
//! is drawn black-on-white.

/// Fixed 21-glyph density ramp, darkest first.
pub const CHARSET: [char; 21] = [
    '@', '#', '8', '&', 'W', 'M', 'B', 'Q', 'H', 'D', 'X', 'Y', 'O', 'C', 'I', '*', '!', ';', ':',
    '.', ' ',
];

/// Width of one luminance bucket.
///
/// Integer division makes the last bucket wider than the others; the
/// brightest few values land there via the clamp in [`quantize`]. That
/// asymmetry is part of the output contract, not an artifact to even out.
pub const SCALE_FACTOR: usize = 256 / (CHARSET.len() - 1);

/// Map a luminance sample to its glyph.
///
/// Total over the whole `u8` range: indices past the table (possible only
/// at the brightest values) clamp onto the final glyph.
pub fn quantize(luminance: u8) -> char {
    let index = luminance as usize / SCALE_FACTOR;
    CHARSET[index.min(CHARSET.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor() {
        assert_eq!(SCALE_FACTOR, 12);
    }

    #[test]
    fn test_quantize_darkest() {
        assert_eq!(quantize(0), '@');
    }

    #[test]
    fn test_quantize_brightest_clamps() {
        // 255 / 12 == 21, one past the table; must clamp, not panic.
        assert_eq!(quantize(255), ' ');
    }

    #[test]
    fn test_quantize_mid_gray() {
        // 128 / 12 == 10
        assert_eq!(quantize(128), CHARSET[10]);
    }

    #[test]
    fn test_quantize_is_total() {
        for v in 0..=255u8 {
            let ch = quantize(v);
            assert!(CHARSET.contains(&ch));
        }
    }

    #[test]
    fn test_quantize_is_monotone_in_density() {
        // Brighter input never yields a denser (earlier) glyph.
        let index_of = |ch| CHARSET.iter().position(|&c| c == ch).unwrap();
        let mut last = 0;
        for v in 0..=255u8 {
            let idx = index_of(quantize(v));
            assert!(idx >= last);
            last = idx;
        }
    }
}
