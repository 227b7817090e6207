//! Aspect-preserving downsampling to the glyph grid.

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};

use crate::error::{Error, Result};

/// Glyph cells are visually taller than wide, so vertical sampling is
/// compressed to roughly half to keep the rendered art proportional to
/// the source.
pub const VERTICAL_COMPRESSION: f32 = 0.5;

/// Row count for a source of the given shape downsampled to
/// `target_width` columns.
///
/// Floored at 1 so an extreme panorama still yields a grid.
pub fn target_height(width: u32, height: u32, target_width: u32) -> u32 {
    let aspect_ratio = height as f32 / width as f32;
    let new_height = (aspect_ratio * target_width as f32 * VERTICAL_COMPRESSION).round() as u32;
    new_height.max(1)
}

/// Downsample a luminance buffer to exactly `target_width x new_height`
/// samples with linear interpolation.
pub fn resize(source: &GrayImage, target_width: u32) -> Result<GrayImage> {
    let (width, height) = source.dimensions();
    check(width, height, target_width)?;

    let new_height = target_height(width, height, target_width);
    Ok(imageops::resize(
        source,
        target_width,
        new_height,
        FilterType::Triangle,
    ))
}

/// Downsample a luminance buffer and its color twin in lock-step.
///
/// Both outputs have identical dimensions, so sample `[r][c]` of either
/// buffer names the same spatial cell. Later stages point-sample color
/// by grid coordinate without any extra coordinate mapping.
pub fn resize_pair(
    gray: &GrayImage,
    color: &RgbImage,
    target_width: u32,
) -> Result<(GrayImage, RgbImage)> {
    let (width, height) = gray.dimensions();
    check(width, height, target_width)?;

    let new_height = target_height(width, height, target_width);
    let gray = imageops::resize(gray, target_width, new_height, FilterType::Triangle);
    let color = imageops::resize(color, target_width, new_height, FilterType::Triangle);
    Ok((gray, color))
}

fn check(width: u32, height: u32, target_width: u32) -> Result<()> {
    if target_width == 0 {
        return Err(Error::InvalidParameter(format!(
            "target width must be positive, got {target_width}"
        )));
    }
    if width == 0 || height == 0 {
        return Err(Error::EmptySource);
    }
    Ok(())
}
