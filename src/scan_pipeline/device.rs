//! Scanner device module
//!
//! Capability contracts for the vendor runtime ([`ScannerFactory`],
//! [`ScannerDevice`]), the [`DeviceSession`] consumed by the scan pipeline,
//! and [`ScannerInterface`], which manages connection and trigger state on
//! top of them.

mod scanner;
mod session;
pub mod simulated;
pub mod types;

#[cfg(test)]
mod tests;

pub use scanner::ScannerInterface;
pub use session::{DeviceSession, ScannerDevice, ScannerFactory};
pub use simulated::{SimulatedFactory, SimulatedScanner};
pub use types::{
    CapturingMode, CoordinateSpace, CoordinateTransformation, CoordinatesSettings,
    HIGH_RESOLUTION, LOW_RESOLUTION, TransformationSlot, TriggerMode,
};
