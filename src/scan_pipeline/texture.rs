//! Texture post-processing module
//!
//! Converts the scanner's floating point texture into an 8-bit image:
//! global tone mapping first, then optional CLAHE.

pub mod clahe;
mod processor;
pub mod tone_map;
pub mod types;

#[cfg(test)]
mod tests;

pub use processor::TexturePostProcessor;
pub use types::ProcessedTexture;
