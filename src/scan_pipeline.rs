//! Scan processing pipeline module
//!
//! This module turns structured-light scanner captures into point clouds,
//! with separate modules for frames, texture post-processing, point cloud
//! reconstruction, device management and texture export.

pub mod cloud;
pub mod common;
pub mod conversions;
pub mod device;
pub mod frame;
pub mod texture;
pub mod tiff;

pub use common::{PointCloudConfig, PointCloudConfigBuilder, Result, ScanError};

pub use frame::{INVALID_POINT, Point3f, RawFrame, Resolution};

pub use texture::{ProcessedTexture, TexturePostProcessor};

pub use cloud::{CloudPoint, PointCloud, PointCloudBuilder, Rgb8};

pub use device::{
    DeviceSession, ScannerDevice, ScannerFactory, ScannerInterface, SimulatedFactory,
    SimulatedScanner, TriggerMode,
};

pub use conversions::{PostProcessedFrame, ScanPipeline};

pub use self::tiff::{StandardTiffWriter, TextureExportConfig, TextureWriter, TiffCompression};
