use ndarray::Array2;
use tracing::{debug, instrument};

use crate::scan_pipeline::common::config::PointCloudConfig;
use crate::scan_pipeline::texture::{clahe, tone_map, types::ProcessedTexture};

/// Turns the scanner's floating point texture into an 8-bit, contrast enhanced image.
#[derive(Debug, Default, Clone, Copy)]
pub struct TexturePostProcessor;

impl TexturePostProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Tone maps `raw` and, when enabled, applies CLAHE to the result.
    ///
    /// Returns `None` when there is no texture; texture output is optional
    /// on the device, so this is not an error.
    #[instrument(skip_all, fields(auto_range = config.uses_auto_range(), clahe = config.clahe_enabled()))]
    pub fn process(
        &self,
        raw: Option<&Array2<f32>>,
        config: &PointCloudConfig,
    ) -> Option<ProcessedTexture> {
        let raw = raw?;
        let (height, width) = raw.dim();
        debug!("Post-processing texture {}x{}", width, height);

        let mut image = tone_map::tone_map(raw, config);

        if config.clahe_enabled() {
            image = clahe::equalize(
                &image,
                config.clahe_clip_limit,
                config.clahe_size_x as usize,
                config.clahe_size_y as usize,
            );
        }

        Some(ProcessedTexture::new(image))
    }
}
