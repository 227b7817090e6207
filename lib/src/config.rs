//! Filter parameter objects.
//!
//! Each filter takes a plain value struct, snapshotted by the caller per
//! invocation. Kernel sizes must be odd; an even value is corrected up by
//! one via the `normalized_*` accessors rather than rejected. Everything
//! else out of range is rejected by `validate`.

use crate::error::{Error, Result};

/// Smallest accepted convolution kernel size.
pub const KERNEL_MIN: u32 = 3;
/// Largest accepted convolution kernel size.
pub const KERNEL_MAX: u32 = 51;
/// Upper bound for the contour hysteresis thresholds.
pub const THRESHOLD_MAX: u32 = 500;

/// Gaussian blur settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlurParams {
    /// Kernel size, odd, 3-51.
    pub kernel: u32,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self { kernel: 3 }
    }
}

impl BlurParams {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<()> {
        check_kernel(self.kernel, "blur kernel")
    }

    /// Kernel size with evenness corrected.
    pub fn normalized_kernel(&self) -> u32 {
        normalize_kernel(self.kernel)
    }
}

/// Unsharp-mask settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SharpenParams {
    /// Source weight, 1.0-3.0; 1.0 is pass-through.
    pub weight: f32,
}

impl Default for SharpenParams {
    fn default() -> Self {
        Self { weight: 1.5 }
    }
}

impl SharpenParams {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if !(1.0..=3.0).contains(&self.weight) {
            return Err(Error::InvalidParameter(format!(
                "sharpen weight must be between 1.0 and 3.0, got {}",
                self.weight
            )));
        }
        Ok(())
    }
}

/// Edge-sketch settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContourParams {
    /// Hysteresis floor: gradients below it are suppressed.
    pub low_threshold: u32,
    /// Hysteresis ceiling: gradients above it are strong edges.
    pub high_threshold: u32,
    /// Noise-suppression blur applied before edge detection, odd, 3-51.
    pub pre_blur_kernel: u32,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            low_threshold: 50,
            high_threshold: 150,
            pre_blur_kernel: 3,
        }
    }
}

impl ContourParams {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if self.low_threshold > THRESHOLD_MAX {
            return Err(Error::InvalidParameter(format!(
                "low threshold must be at most {THRESHOLD_MAX}, got {}",
                self.low_threshold
            )));
        }
        if self.high_threshold > THRESHOLD_MAX {
            return Err(Error::InvalidParameter(format!(
                "high threshold must be at most {THRESHOLD_MAX}, got {}",
                self.high_threshold
            )));
        }
        check_kernel(self.pre_blur_kernel, "contour pre-blur kernel")
    }

    /// Pre-blur kernel size with evenness corrected.
    pub fn normalized_pre_blur(&self) -> u32 {
        normalize_kernel(self.pre_blur_kernel)
    }
}

fn normalize_kernel(kernel: u32) -> u32 {
    if kernel % 2 == 0 { kernel + 1 } else { kernel }
}

fn check_kernel(kernel: u32, name: &str) -> Result<()> {
    if !(KERNEL_MIN..=KERNEL_MAX).contains(&kernel) {
        return Err(Error::InvalidParameter(format!(
            "{name} must be between {KERNEL_MIN} and {KERNEL_MAX}, got {kernel}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BlurParams::default().validate().is_ok());
        assert!(SharpenParams::default().validate().is_ok());
        assert!(ContourParams::default().validate().is_ok());
    }

    #[test]
    fn test_even_kernel_rounds_up() {
        let params = BlurParams { kernel: 4 };
        assert!(params.validate().is_ok());
        assert_eq!(params.normalized_kernel(), 5);
    }

    #[test]
    fn test_odd_kernel_unchanged() {
        let params = BlurParams { kernel: 7 };
        assert_eq!(params.normalized_kernel(), 7);
    }

    #[test]
    fn test_kernel_out_of_range() {
        assert!(BlurParams { kernel: 1 }.validate().is_err());
        assert!(BlurParams { kernel: 99 }.validate().is_err());
    }

    #[test]
    fn test_sharpen_weight_bounds() {
        assert!(SharpenParams { weight: 0.5 }.validate().is_err());
        assert!(SharpenParams { weight: 3.5 }.validate().is_err());
        assert!(SharpenParams { weight: 1.0 }.validate().is_ok());
        assert!(SharpenParams { weight: 3.0 }.validate().is_ok());
    }

    #[test]
    fn test_contour_threshold_bounds() {
        let mut params = ContourParams::default();
        params.high_threshold = 501;
        assert!(params.validate().is_err());

        params.high_threshold = 500;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_contour_pre_blur_normalization() {
        let params = ContourParams {
            pre_blur_kernel: 10,
            ..Default::default()
        };
        assert_eq!(params.normalized_pre_blur(), 11);
    }
}
