//! Pipeline conversions module
//!
//! This module contains the orchestration that turns a device capture into
//! a point cloud.

mod frame_to_cloud;

pub use frame_to_cloud::{PostProcessedFrame, ScanPipeline};
