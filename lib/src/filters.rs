//! Parametric preview filters.
//!
//! Every filter is a pure function over `(path, params)`: it decodes the
//! pristine source, transforms it, and returns a fresh buffer. Filters
//! never read a previously filtered result, so nudging a slider
//! re-applies only the selected transform: equal inputs always produce
//! byte-identical output, and filters never stack.

use std::path::Path;

use image::imageops;
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::edges::canny;
use log::debug;

use crate::config::{BlurParams, ContourParams, SharpenParams};
use crate::error::Result;
use crate::io;

/// Sigma of the heavy mask blur used by the unsharp sharpen.
const SHARPEN_SIGMA: f32 = 3.0;

/// Kernel size of the light post-blur that softens aliased single-pixel
/// edges in the contour sketch.
const POST_BLUR_KERNEL: u32 = 3;

/// Convert the freshly decoded source to grayscale.
///
/// The luminance is written back over the working copy, all three
/// channels set to L; decode always yields a fresh buffer, so the file's
/// pixels are never touched.
pub fn grayscale(path: impl AsRef<Path>) -> Result<RgbImage> {
    let mut img = io::decode(path.as_ref())?;
    grayscale_in_place(&mut img);
    Ok(img)
}

/// Gaussian smoothing with the configured odd kernel size.
///
/// Sigma is derived from the kernel, so a larger kernel always smooths
/// more; an even kernel is corrected up by one, never rejected.
pub fn blur(path: impl AsRef<Path>, params: &BlurParams) -> Result<RgbImage> {
    params.validate()?;
    let kernel = params.normalized_kernel();
    let img = io::decode(path.as_ref())?;
    debug!("blur {:?}: kernel {kernel}", path.as_ref());
    Ok(gaussian_blur_rgb(&img, kernel_sigma(kernel), kernel))
}

/// Unsharp-mask sharpening.
///
/// A heavily blurred copy is combined back into the source as
/// `out = src * weight + blurred * (1 - weight)` per channel, clamped.
/// At `weight == 1.0` the blurred term vanishes and the output equals
/// the plain decode.
pub fn sharpen(path: impl AsRef<Path>, params: &SharpenParams) -> Result<RgbImage> {
    params.validate()?;
    let img = io::decode(path.as_ref())?;
    let blurred = gaussian_blur_rgb(&img, SHARPEN_SIGMA, sigma_kernel(SHARPEN_SIGMA));

    let weight = params.weight;
    let (width, height) = img.dimensions();
    let mut output = RgbImage::new(width, height);
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let src = img.get_pixel(x, y);
        let soft = blurred.get_pixel(x, y);
        for c in 0..3 {
            let combined = src[c] as f32 * weight + soft[c] as f32 * (1.0 - weight);
            pixel[c] = combined.clamp(0.0, 255.0) as u8;
        }
    }
    Ok(output)
}

/// Edge-sketch filter: inverted line art from a two-threshold edge
/// detector.
///
/// Grayscale, Gaussian pre-blur to suppress noise, hysteresis edge
/// detection (strong above `high`, suppressed below `low`, kept between
/// only when connected to a strong edge), a light post-blur against
/// aliased single-pixel lines, then a bitwise invert so edges read as
/// dark strokes on a light background.
pub fn contour(path: impl AsRef<Path>, params: &ContourParams) -> Result<RgbImage> {
    params.validate()?;
    let kernel = params.normalized_pre_blur();
    let img = io::decode(path.as_ref())?;

    let gray = luminance(&img);
    let smoothed = gaussian_blur_gray(&gray, kernel_sigma(kernel), kernel);
    let edges = edge_map(&smoothed, params.low_threshold, params.high_threshold);
    let soft = gaussian_blur_gray(&edges, kernel_sigma(POST_BLUR_KERNEL), POST_BLUR_KERNEL);

    let (width, height) = soft.dimensions();
    let mut output = RgbImage::new(width, height);
    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let v = 255 - soft.get_pixel(x, y)[0];
        *pixel = Rgb([v, v, v]);
    }
    Ok(output)
}

/// Per-channel bitwise complement of the freshly decoded source.
pub fn invert(path: impl AsRef<Path>) -> Result<RgbImage> {
    let mut img = io::decode(path.as_ref())?;
    imageops::invert(&mut img);
    Ok(img)
}

/// Luminance of a color buffer using the standard coefficients
/// L = 0.2127*R + 0.7152*G + 0.0722*B.
pub(crate) fn luminance(img: &RgbImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels() {
        output.put_pixel(x, y, Luma([luma_of(pixel)]));
    }
    output
}

pub(crate) fn grayscale_in_place(img: &mut RgbImage) {
    for pixel in img.pixels_mut() {
        let l = luma_of(pixel);
        *pixel = Rgb([l, l, l]);
    }
}

fn luma_of(pixel: &Rgb<u8>) -> u8 {
    let r = pixel[0] as f32 / 255.0;
    let g = pixel[1] as f32 / 255.0;
    let b = pixel[2] as f32 / 255.0;
    let luminance = 0.2127 * r + 0.7152 * g + 0.0722 * b;
    (luminance.clamp(0.0, 1.0) * 255.0) as u8
}

/// Sigma carried by a kernel of the given size, per the standard
/// 0.3*((k-1)*0.5 - 1) + 0.8 rule.
fn kernel_sigma(kernel: u32) -> f32 {
    0.3 * ((kernel as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Odd kernel size wide enough to carry the given sigma.
fn sigma_kernel(sigma: f32) -> u32 {
    ((sigma * 6.0).ceil() as u32) | 1
}

/// Calculate Gaussian weight for a given sigma and position.
fn gaussian(sigma: f32, pos: f32) -> f32 {
    let two_pi = 2.0 * std::f32::consts::PI;
    let sigma_sq = sigma * sigma;

    (1.0 / (two_pi * sigma_sq).sqrt()) * (-pos * pos / (2.0 * sigma_sq)).exp()
}

/// Full separable Gaussian blur over a color buffer.
fn gaussian_blur_rgb(img: &RgbImage, sigma: f32, kernel: u32) -> RgbImage {
    let radius = (kernel / 2) as i32;
    let temp = blur_pass_rgb(img, sigma, radius, true);
    blur_pass_rgb(&temp, sigma, radius, false)
}

/// One directional pass of the separable blur, per channel, with
/// clamped border sampling and weight normalization.
fn blur_pass_rgb(img: &RgbImage, sigma: f32, radius: i32, horizontal: bool) -> RgbImage {
    let (width, height) = img.dimensions();
    let mut output = RgbImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut sum = [0.0f32; 3];
            let mut weight_sum = 0.0;

            for offset in -radius..=radius {
                let (sx, sy) = if horizontal {
                    ((x as i32 + offset).clamp(0, width as i32 - 1) as u32, y)
                } else {
                    (x, (y as i32 + offset).clamp(0, height as i32 - 1) as u32)
                };
                let weight = gaussian(sigma, offset as f32);
                let sample = img.get_pixel(sx, sy);
                for c in 0..3 {
                    sum[c] += sample[c] as f32 / 255.0 * weight;
                }
                weight_sum += weight;
            }

            let mut pixel = [0u8; 3];
            for c in 0..3 {
                pixel[c] = ((sum[c] / weight_sum).clamp(0.0, 1.0) * 255.0) as u8;
            }
            output.put_pixel(x, y, Rgb(pixel));
        }
    }

    output
}

/// Full separable Gaussian blur over a luminance buffer.
fn gaussian_blur_gray(img: &GrayImage, sigma: f32, kernel: u32) -> GrayImage {
    let radius = (kernel / 2) as i32;
    let temp = blur_pass_gray(img, sigma, radius, true);
    blur_pass_gray(&temp, sigma, radius, false)
}

fn blur_pass_gray(img: &GrayImage, sigma: f32, radius: i32, horizontal: bool) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            let mut weight_sum = 0.0;

            for offset in -radius..=radius {
                let (sx, sy) = if horizontal {
                    ((x as i32 + offset).clamp(0, width as i32 - 1) as u32, y)
                } else {
                    (x, (y as i32 + offset).clamp(0, height as i32 - 1) as u32)
                };
                let weight = gaussian(sigma, offset as f32);
                sum += img.get_pixel(sx, sy)[0] as f32 / 255.0 * weight;
                weight_sum += weight;
            }

            let result = (sum / weight_sum).clamp(0.0, 1.0);
            output.put_pixel(x, y, Luma([(result * 255.0) as u8]));
        }
    }

    output
}

/// Two-threshold hysteresis edge detector.
///
/// A swapped threshold pair is corrected rather than rejected; the
/// detector itself requires `low <= high`.
fn edge_map(gray: &GrayImage, low: u32, high: u32) -> GrayImage {
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    canny(gray, low as f32, high as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    use crate::error::Error;

    /// Writes a small test scene to disk: dark background with a bright
    /// square, enough structure for every filter to bite on.
    fn scene() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scene.png");

        let mut img = RgbImage::from_pixel(48, 32, Rgb([30, 40, 50]));
        for y in 8..24 {
            for x in 12..36 {
                img.put_pixel(x, y, Rgb([220, 210, 200]));
            }
        }
        img.save(&path).unwrap();
        (dir, path)
    }

    #[test]
    fn test_luminance_extremes() {
        let black = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        assert_eq!(luminance(&black).get_pixel(0, 0)[0], 0);

        let white = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        assert_eq!(luminance(&white).get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_luminance_gray_is_stable() {
        let img = RgbImage::from_pixel(4, 4, Rgb([128, 128, 128]));
        let val = luminance(&img).get_pixel(0, 0)[0];
        assert!((127..=129).contains(&val));
    }

    #[test]
    fn test_gaussian_symmetry() {
        let w1 = gaussian(2.0, 1.0);
        let w2 = gaussian(2.0, -1.0);
        assert!((w1 - w2).abs() < 0.0001);
    }

    #[test]
    fn test_kernel_sigma_grows_with_kernel() {
        assert!(kernel_sigma(9) > kernel_sigma(3));
        assert!(kernel_sigma(51) > kernel_sigma(9));
    }

    #[test]
    fn test_sigma_kernel_is_odd() {
        for sigma in [0.5, 1.0, 1.5, 3.0, 5.0] {
            assert_eq!(sigma_kernel(sigma) % 2, 1);
        }
    }

    #[test]
    fn test_blur_is_idempotent_per_params() {
        let (_dir, path) = scene();
        let params = BlurParams { kernel: 5 };
        let a = blur(&path, &params).unwrap();
        let b = blur(&path, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_blur_never_stacks() {
        // Applying kernel 5 then kernel 9 equals a single kernel-9 call:
        // each invocation re-reads the pristine source.
        let (_dir, path) = scene();
        let _ = blur(&path, &BlurParams { kernel: 5 }).unwrap();
        let chained = blur(&path, &BlurParams { kernel: 9 }).unwrap();
        let direct = blur(&path, &BlurParams { kernel: 9 }).unwrap();
        assert_eq!(chained, direct);
    }

    #[test]
    fn test_even_kernel_matches_next_odd() {
        let (_dir, path) = scene();
        let even = blur(&path, &BlurParams { kernel: 4 }).unwrap();
        let odd = blur(&path, &BlurParams { kernel: 5 }).unwrap();
        assert_eq!(even, odd);
    }

    #[test]
    fn test_blur_smooths_the_edge() {
        let (_dir, path) = scene();
        let out = blur(&path, &BlurParams { kernel: 9 }).unwrap();
        // A pixel just outside the bright square picks up some of it.
        let near_edge = out.get_pixel(11, 16)[0];
        assert!(near_edge > 30);
    }

    #[test]
    fn test_sharpen_weight_one_is_plain_decode() {
        let (_dir, path) = scene();
        let out = sharpen(&path, &SharpenParams { weight: 1.0 }).unwrap();
        let plain = io::decode(&path).unwrap();
        assert_eq!(out, plain);
    }

    #[test]
    fn test_sharpen_increases_edge_contrast() {
        let (_dir, path) = scene();
        let plain = io::decode(&path).unwrap();
        let out = sharpen(&path, &SharpenParams { weight: 2.5 }).unwrap();
        // Inside edge of the bright square gets pushed brighter.
        assert!(out.get_pixel(13, 16)[0] >= plain.get_pixel(13, 16)[0]);
    }

    #[test]
    fn test_invert_is_self_inverse() {
        let (_dir, path) = scene();
        let plain = io::decode(&path).unwrap();

        let mut twice = invert(&path).unwrap();
        imageops::invert(&mut twice);
        assert_eq!(twice, plain);
    }

    #[test]
    fn test_invert_complements_channels() {
        let (_dir, path) = scene();
        let out = invert(&path).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [225, 215, 205]);
    }

    #[test]
    fn test_grayscale_equalizes_channels() {
        let (_dir, path) = scene();
        let out = grayscale(&path).unwrap();
        for pixel in out.pixels() {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }
    }

    #[test]
    fn test_contour_output_is_light_background() {
        let (_dir, path) = scene();
        let out = contour(&path, &ContourParams::default()).unwrap();
        // Inverted sketch: corners far from any edge stay near white.
        assert!(out.get_pixel(0, 0)[0] > 200);
    }

    #[test]
    fn test_edge_count_monotone_in_high_threshold() {
        let (_dir, path) = scene();
        let img = io::decode(&path).unwrap();
        let gray = luminance(&img);

        let count = |high: u32| {
            edge_map(&gray, 50, high)
                .pixels()
                .filter(|p| p[0] > 0)
                .count()
        };
        // Raising the ceiling can only demote strong edges.
        assert!(count(400) <= count(150));
        assert!(count(150) <= count(60));
    }

    #[test]
    fn test_edge_map_swaps_reversed_thresholds() {
        let (_dir, path) = scene();
        let img = io::decode(&path).unwrap();
        let gray = luminance(&img);
        assert_eq!(edge_map(&gray, 150, 50), edge_map(&gray, 50, 150));
    }

    #[test]
    fn test_filters_reject_missing_file() {
        let missing = "no/such/image.png";
        assert!(matches!(
            blur(missing, &BlurParams::default()),
            Err(Error::Decode { .. })
        ));
        assert!(matches!(invert(missing), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_blur_rejects_out_of_range_kernel() {
        let (_dir, path) = scene();
        let err = blur(&path, &BlurParams { kernel: 99 }).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
