use tracing::{info, instrument};

use crate::scan_pipeline::{
    cloud::{PointCloud, PointCloudBuilder},
    common::{
        config::PointCloudConfig,
        error::{Result, ScanError},
    },
    device::DeviceSession,
    frame::RawFrame,
    texture::{ProcessedTexture, TexturePostProcessor},
};

/// A captured frame together with its post-processed texture.
#[derive(Debug, Clone)]
pub struct PostProcessedFrame {
    pub frame: RawFrame,
    pub texture: Option<ProcessedTexture>,
}

/// Capture → texture post-processing → point cloud, one frame at a time.
pub struct ScanPipeline<S: DeviceSession> {
    session: S,
    processor: TexturePostProcessor,
    builder: PointCloudBuilder,
    config: PointCloudConfig,
}

impl<S: DeviceSession> ScanPipeline<S> {
    pub fn new(session: S, config: PointCloudConfig) -> Self {
        Self {
            session,
            processor: TexturePostProcessor::new(),
            builder: PointCloudBuilder::new(),
            config,
        }
    }

    /// Triggers a capture and post-processes it.
    ///
    /// Returns `None` if the device delivered no frame.
    #[instrument(skip(self))]
    pub fn capture_frame(&mut self) -> Result<Option<PostProcessedFrame>> {
        self.session.is_ok()?;

        let frame = {
            let _span = tracing::info_span!("fetch_frame").entered();
            self.session.current_frame()?
        };

        Ok(frame.map(|frame| self.post_process(frame)))
    }

    /// Runs texture post-processing if the device is sending textures.
    pub fn post_process(&self, frame: RawFrame) -> PostProcessedFrame {
        let _span = tracing::info_span!("post_process", frame_index = frame.frame_index()).entered();

        let raw_texture = frame
            .texture()
            .filter(|_| self.session.is_texture_output_enabled());
        let texture = self.processor.process(raw_texture, &self.config);

        PostProcessedFrame { frame, texture }
    }

    pub fn point_cloud_from_frame(&self, frame: &PostProcessedFrame) -> Result<PointCloud> {
        let _span = tracing::info_span!("build_point_cloud").entered();
        self.builder.build(
            Some(&frame.frame),
            frame.texture.as_ref(),
            self.session.is_normal_map_output_enabled(),
            &self.config,
        )
    }

    /// Captures a new frame and converts it to a point cloud.
    ///
    /// # Errors
    ///
    /// Device errors are passed through; a missing or unsuccessful frame is
    /// [`ScanError::CorruptedFrame`].
    #[instrument(skip(self))]
    pub fn capture_point_cloud(&mut self) -> Result<PointCloud> {
        let frame = self.capture_frame()?.ok_or(ScanError::CorruptedFrame)?;
        let cloud = self.point_cloud_from_frame(&frame)?;

        info!(
            frame_index = frame.frame.frame_index(),
            points = cloud.len(),
            valid = cloud.valid_count(),
            "Point cloud captured"
        );
        Ok(cloud)
    }

    pub fn config(&self) -> &PointCloudConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PointCloudConfig) {
        self.config = config;
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }
}
