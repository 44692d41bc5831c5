//! Scanner configuration types

use std::time::Duration;

use crate::scan_pipeline::common::error::ScanError;
use crate::scan_pipeline::frame::types::Resolution;

/// Full sensor resolution
pub const HIGH_RESOLUTION: Resolution = Resolution::new(2064, 1544);
/// Binned sensor resolution
pub const LOW_RESOLUTION: Resolution = Resolution::new(1032, 772);

/// How long to wait for a device connection to come up.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(5000);
/// How long to wait for a triggered frame to arrive.
pub const FRAME_TIMEOUT: Duration = Duration::from_millis(10000);

/// Trigger source for new captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerMode {
    /// Frames are captured continuously while acquiring
    Freerun,
    /// Frames are captured on request from the host
    #[default]
    Software,
    /// Frames are captured on an external hardware signal
    Hardware,
    NoValue,
}

impl TryFrom<i32> for TriggerMode {
    type Error = ScanError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TriggerMode::Freerun),
            1 => Ok(TriggerMode::Software),
            2 => Ok(TriggerMode::Hardware),
            3 => Ok(TriggerMode::NoValue),
            other => Err(ScanError::InvalidTriggerMode(other)),
        }
    }
}

/// Reference frame the device reports point coordinates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSpace {
    NoValue,
    #[default]
    CameraSpace,
    MountingSpace,
    MarkerSpace,
    RobotSpace,
    CustomSpace,
}

/// Rigid transformation applied by the device to its output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransformation {
    pub rotation: [[f64; 3]; 3],
    pub translation: [f64; 3],
}

impl Default for CoordinateTransformation {
    fn default() -> Self {
        Self {
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0; 3],
        }
    }
}

impl From<[[f64; 4]; 4]> for CoordinateTransformation {
    /// Takes the rotation block and translation column of a homogeneous matrix.
    fn from(matrix: [[f64; 4]; 4]) -> Self {
        let mut rotation = [[0.0; 3]; 3];
        for (i, row) in rotation.iter_mut().enumerate() {
            row.copy_from_slice(&matrix[i][..3]);
        }
        Self {
            rotation,
            translation: [matrix[0][3], matrix[1][3], matrix[2][3]],
        }
    }
}

/// A transformation slot on the device, which may not exist on every model
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformationSlot {
    pub supported: bool,
    pub transformation: CoordinateTransformation,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinatesSettings {
    pub coordinate_space: CoordinateSpace,
    pub robot_transformation: TransformationSlot,
    pub custom_transformation: TransformationSlot,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapturingMode {
    pub resolution: Resolution,
}

impl Default for CapturingMode {
    fn default() -> Self {
        Self {
            resolution: HIGH_RESOLUTION,
        }
    }
}
