//! asciiview - image to ASCII art, plus parametric preview filters.
//!
//! The engine renders a raster image into a monospaced-glyph canvas and
//! offers five independent filters (blur, sharpen, contour, invert,
//! grayscale) for interactive preview. Every operation re-reads the
//! pristine source file: filters never stack, so equal parameters always
//! reproduce equal output.
//!
//! # Example
//! ```no_run
//! use asciiview::BlurParams;
//!
//! let art = asciiview::render("photo.jpg", 120, true)?;
//! asciiview::io::save(&art, "ascii_art.png")?;
//!
//! let softened = asciiview::blur("photo.jpg", &BlurParams { kernel: 9 })?;
//! # Ok::<(), asciiview::Error>(())
//! ```

pub mod ascii;
pub mod charset;
pub mod config;
pub mod error;
pub mod filters;
pub mod font;
pub mod io;
pub mod resize;

// Re-export the main entry points for convenience
pub use ascii::{render, render_text};
pub use config::{BlurParams, ContourParams, SharpenParams};
pub use error::{Error, Result};
pub use filters::{blur, contour, grayscale, invert, sharpen};
