//! Raw capture frames
//!
//! This module holds the frame produced by the scanner for one capture and
//! the geometric primitives it is made of.

pub mod types;

pub use types::{INVALID_POINT, Point3f, RawFrame, Resolution};
