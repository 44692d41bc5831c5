use std::io::Write;

use tracing::debug;

use crate::scan_pipeline::common::error::{Result, ScanError};
use crate::scan_pipeline::texture::ProcessedTexture;
use crate::scan_pipeline::tiff::types::{TextureExportConfig, TiffCompression};
use crate::scan_pipeline::tiff::writer::TextureWriter;

pub struct StandardTiffWriter;

impl TextureWriter for StandardTiffWriter {
    fn write_texture(
        &self,
        texture: &ProcessedTexture,
        output: &mut dyn Write,
        config: &TextureExportConfig,
    ) -> Result<()> {
        debug!("Encoding TIFF texture: {}x{}", texture.width(), texture.height());

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Fast,
            ),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Balanced,
            ),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Best,
            ),
        };

        let pixels = texture.to_row_major_vec();
        {
            let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| ScanError::EncodeError(e.to_string()))?
                .with_compression(compression);

            encoder
                .write_image::<tiff::encoder::colortype::Gray8>(
                    texture.width() as u32,
                    texture.height() as u32,
                    &pixels,
                )
                .map_err(|e| ScanError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
