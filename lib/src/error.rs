use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for the transform engine.
///
/// Every failure is local to one render/filter call; nothing here is fatal
/// to the process, and callers are expected to surface a placeholder or
/// warning rather than abort.
#[derive(Debug, Error)]
pub enum Error {
    /// The file is missing, truncated, or in an unsupported format.
    #[error("could not decode image {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A caller-supplied value is outside its documented range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The source buffer has zero width or height.
    #[error("source image is empty (zero width or height)")]
    EmptySource,

    /// The save target is unwritable or its extension names no raster format.
    #[error("could not encode image {path:?}: {reason}")]
    Encode { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_path() {
        let err = Error::Encode {
            path: PathBuf::from("out.xyz"),
            reason: "unsupported save extension `xyz`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("out.xyz"));
        assert!(msg.contains("xyz"));
    }

    #[test]
    fn test_invalid_parameter_carries_detail() {
        let err = Error::InvalidParameter("kernel must be between 3 and 51, got 99".to_string());
        assert!(err.to_string().contains("99"));
    }
}
