//! Point cloud types

use crate::scan_pipeline::frame::types::Point3f;

/// Grayscale-replicated color of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn gray(intensity: u8) -> Self {
        Self {
            r: intensity,
            g: intensity,
            b: intensity,
        }
    }
}

/// One output point. Position is in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: Option<Rgb8>,
    pub normal: Option<Point3f>,
}

impl CloudPoint {
    /// Placeholder for a pixel without depth; only appears in dense clouds.
    pub const fn invalid() -> Self {
        Self {
            x: f32::NAN,
            y: f32::NAN,
            z: f32::NAN,
            color: None,
            normal: None,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Reconstructed cloud, either keeping the sensor grid or holding valid points only.
#[derive(Debug, Clone, PartialEq)]
pub enum PointCloud {
    /// One slot per pixel in row-major order; pixels without depth hold NaN positions.
    Dense {
        width: usize,
        height: usize,
        points: Vec<CloudPoint>,
    },
    /// Valid points only, in row-major scan order.
    Sparse { points: Vec<CloudPoint> },
}

impl PointCloud {
    /// Follows the PCL convention: true when no point can be NaN.
    ///
    /// Only the sparse variant guarantees that, so this is true exactly for
    /// clouds built with `only_valid_points`.
    pub fn is_dense(&self) -> bool {
        matches!(self, PointCloud::Sparse { .. })
    }

    pub fn points(&self) -> &[CloudPoint] {
        match self {
            PointCloud::Dense { points, .. } | PointCloud::Sparse { points } => points,
        }
    }

    pub fn into_points(self) -> Vec<CloudPoint> {
        match self {
            PointCloud::Dense { points, .. } | PointCloud::Sparse { points } => points,
        }
    }

    pub fn len(&self) -> usize {
        self.points().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    /// Width of the organized cloud; a sparse cloud is a single row.
    pub fn width(&self) -> usize {
        match self {
            PointCloud::Dense { width, .. } => *width,
            PointCloud::Sparse { points } => points.len(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            PointCloud::Dense { height, .. } => *height,
            PointCloud::Sparse { .. } => 1,
        }
    }

    /// Grid lookup; `None` for sparse clouds or out-of-range indices.
    pub fn at(&self, row: usize, col: usize) -> Option<&CloudPoint> {
        match self {
            PointCloud::Dense {
                width,
                height,
                points,
            } if row < *height && col < *width => points.get(row * width + col),
            _ => None,
        }
    }

    /// Number of points with a finite position.
    pub fn valid_count(&self) -> usize {
        self.points().iter().filter(|p| p.is_finite()).count()
    }
}
