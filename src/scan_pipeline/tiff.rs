//! TIFF export module
//!
//! Writes post-processed textures as 8-bit grayscale TIFF files.

mod standard_tiff_writer;
pub mod types;
mod writer;

pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TextureExportConfig, TiffCompression};
pub use writer::TextureWriter;
