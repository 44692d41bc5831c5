//! Common utilities module
//!
//! This module contains the error type and the point cloud configuration
//! shared by every stage of the scan pipeline.

pub mod config;
pub mod error;

pub use config::{PointCloudConfig, PointCloudConfigBuilder};
pub use error::{Result, ScanError};
