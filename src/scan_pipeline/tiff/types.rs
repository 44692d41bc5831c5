//! TIFF export configuration types

/// TIFF compression methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Configuration for texture export
#[derive(Debug, Clone, Default)]
pub struct TextureExportConfig {
    pub compression: TiffCompression,
}

impl TextureExportConfig {
    pub fn with_compression(compression: TiffCompression) -> Self {
        Self { compression }
    }
}
