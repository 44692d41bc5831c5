//! Raw frame data types

use ndarray::Array2;

use crate::scan_pipeline::common::error::{Result, ScanError};

/// A 3D coordinate or direction as delivered by the scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3f {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Value the scanner writes where no depth could be computed.
///
/// A real measurement exactly at the sensor origin is indistinguishable from it.
pub const INVALID_POINT: Point3f = Point3f::new(0.0, 0.0, 0.0);

/// Image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// One synchronized capture: point map, optional normal map and optional texture.
///
/// Grids are indexed `[[row, col]]`, i.e. shape is `(height, width)`.
#[derive(Debug, Clone)]
pub struct RawFrame {
    frame_index: u64,
    successful: bool,
    points: Array2<Point3f>,
    normals: Option<Array2<Point3f>>,
    texture: Option<Array2<f32>>,
}

impl RawFrame {
    /// Builds a frame, checking that every present channel matches the point grid.
    ///
    /// An empty normal map or texture grid is treated as absent.
    pub fn new(
        frame_index: u64,
        successful: bool,
        points: Array2<Point3f>,
        normals: Option<Array2<Point3f>>,
        texture: Option<Array2<f32>>,
    ) -> Result<Self> {
        let (height, width) = points.dim();
        if width == 0 || height == 0 {
            return Err(ScanError::InvalidDimensions(width, height));
        }

        let normals = normals.filter(|n| !n.is_empty());
        if let Some(normals) = &normals {
            check_shape("normal map", normals.dim(), width, height)?;
        }

        let texture = texture.filter(|t| !t.is_empty());
        if let Some(texture) = &texture {
            check_shape("texture", texture.dim(), width, height)?;
        }

        Ok(Self {
            frame_index,
            successful,
            points,
            normals,
            texture,
        })
    }

    pub fn resolution(&self) -> Resolution {
        let (height, width) = self.points.dim();
        Resolution::new(width, height)
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn is_successful(&self) -> bool {
        self.successful
    }

    pub fn points(&self) -> &Array2<Point3f> {
        &self.points
    }

    pub fn normals(&self) -> Option<&Array2<Point3f>> {
        self.normals.as_ref()
    }

    pub fn texture(&self) -> Option<&Array2<f32>> {
        self.texture.as_ref()
    }
}

fn check_shape(
    channel: &'static str,
    (actual_height, actual_width): (usize, usize),
    width: usize,
    height: usize,
) -> Result<()> {
    if actual_width != width || actual_height != height {
        return Err(ScanError::ChannelShapeMismatch {
            channel,
            width,
            height,
            actual_width,
            actual_height,
        });
    }
    Ok(())
}
