use std::io::Write;
use std::path::Path;

use crate::scan_pipeline::common::error::{Result, ScanError};
use crate::scan_pipeline::texture::ProcessedTexture;
use crate::scan_pipeline::tiff::types::TextureExportConfig;

pub trait TextureWriter {
    fn write_texture(
        &self,
        texture: &ProcessedTexture,
        output: &mut dyn Write,
        config: &TextureExportConfig,
    ) -> Result<()>;

    fn write_texture_file(
        &self,
        texture: &ProcessedTexture,
        path: &Path,
        config: &TextureExportConfig,
    ) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .map_err(|e| ScanError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        self.write_texture(texture, &mut file, config)
    }
}
