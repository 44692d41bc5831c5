use tracing::{debug, instrument, warn};

use crate::scan_pipeline::{
    cloud::types::{CloudPoint, PointCloud, Rgb8},
    common::{
        config::PointCloudConfig,
        error::{Result, ScanError},
    },
    frame::types::{INVALID_POINT, RawFrame, Resolution},
    texture::ProcessedTexture,
};

/// Millimeters per meter; the scanner reports positions in millimeters.
const MM_PER_METER: f32 = 1000.0;

/// Builds point clouds from captured frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointCloudBuilder;

impl PointCloudBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Converts `frame` into a point cloud.
    ///
    /// Pixels are visited row by row, columns ascending. A pixel equal to
    /// [`INVALID_POINT`] becomes a NaN slot in a dense cloud and is dropped
    /// from a sparse one. Valid pixels are scaled to meters and, when
    /// available, colored from `texture` and given the frame's normal.
    ///
    /// # Errors
    ///
    /// [`ScanError::CorruptedFrame`] when `frame` is missing or unsuccessful.
    #[instrument(skip_all, fields(only_valid_points = config.only_valid_points))]
    pub fn build(
        &self,
        frame: Option<&RawFrame>,
        texture: Option<&ProcessedTexture>,
        normals_enabled: bool,
        config: &PointCloudConfig,
    ) -> Result<PointCloud> {
        let frame = match frame {
            Some(frame) if frame.is_successful() => frame,
            _ => return Err(ScanError::CorruptedFrame),
        };

        let Resolution { width, height } = frame.resolution();
        let texture = texture.filter(|texture| {
            let matches = texture.width() == width && texture.height() == height;
            if !matches {
                warn!(
                    "Ignoring {}x{} texture for {}x{} frame",
                    texture.width(),
                    texture.height(),
                    width,
                    height
                );
            }
            matches
        });
        let normals = frame.normals().filter(|_| normals_enabled);

        debug!(
            frame_index = frame.frame_index(),
            has_texture = texture.is_some(),
            has_normals = normals.is_some(),
            "Building point cloud {}x{}",
            width,
            height
        );

        let points = frame.points();
        let mut cloud = Vec::with_capacity(width * height);

        for row in 0..height {
            for col in 0..width {
                let point = points[[row, col]];
                if point == INVALID_POINT {
                    if !config.only_valid_points {
                        cloud.push(CloudPoint::invalid());
                    }
                    continue;
                }

                cloud.push(CloudPoint {
                    x: point.x / MM_PER_METER,
                    y: point.y / MM_PER_METER,
                    z: point.z / MM_PER_METER,
                    color: texture.map(|t| Rgb8::gray(t.as_array()[[row, col]])),
                    normal: normals.map(|n| n[[row, col]]),
                });
            }
        }

        debug!("Point cloud complete: {} points", cloud.len());

        if config.only_valid_points {
            Ok(PointCloud::Sparse { points: cloud })
        } else {
            Ok(PointCloud::Dense {
                width,
                height,
                points: cloud,
            })
        }
    }
}
