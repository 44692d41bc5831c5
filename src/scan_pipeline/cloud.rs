//! Point cloud reconstruction module
//!
//! Fuses the point map, the optional normal map and the post-processed
//! texture of a frame into a [`PointCloud`].

mod builder;
pub mod types;


pub use builder::PointCloudBuilder;
pub use types::{CloudPoint, PointCloud, Rgb8};
