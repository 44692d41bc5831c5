use std::time::Duration;

use crate::scan_pipeline::common::error::Result;
use crate::scan_pipeline::device::types::{CapturingMode, CoordinatesSettings, TriggerMode};
use crate::scan_pipeline::frame::types::RawFrame;

/// What the scan pipeline needs from a connected scanner.
pub trait DeviceSession {
    /// Fails with `ScannerNotConnected` when there is no live connection.
    fn is_ok(&self) -> Result<()>;

    /// Captures a new frame and returns it, `None` if the device produced nothing.
    fn current_frame(&mut self) -> Result<Option<RawFrame>>;

    fn is_texture_output_enabled(&self) -> bool;

    fn is_normal_map_output_enabled(&self) -> bool;
}

/// Handle to one physical scanner, as exposed by the vendor runtime.
pub trait ScannerDevice {
    fn is_connected(&self) -> bool;
    fn is_acquiring(&self) -> bool;
    fn disconnect(&mut self, log_out: bool);

    fn start_acquisition(&mut self);
    fn stop_acquisition(&mut self);

    /// Returns the new frame id, or a negative status code:
    /// -1 trigger not accepted, -2 device not running, -3 communication
    /// error, -4 waiting for grabbing end not supported.
    fn trigger_frame(&mut self) -> i32;
    fn get_specific_frame(&mut self, id: u32, timeout: Duration) -> Option<RawFrame>;

    fn hardware_identification(&self) -> String;

    fn trigger_mode(&self) -> TriggerMode;
    fn set_trigger_mode(&mut self, mode: TriggerMode);

    fn coordinates_settings(&self) -> CoordinatesSettings;
    fn set_coordinates_settings(&mut self, settings: CoordinatesSettings);
    fn save_settings(&mut self);

    fn capturing_mode(&self) -> CapturingMode;
    fn set_capturing_mode(&mut self, mode: CapturingMode);
    fn supported_capturing_modes(&self) -> Vec<CapturingMode>;

    fn send_texture(&self) -> bool;
    fn send_normal_map(&self) -> bool;
}

/// Entry point of the vendor runtime: discovery and connection.
pub trait ScannerFactory {
    type Device: ScannerDevice;

    fn is_control_running(&self) -> bool;

    /// Hardware identifications of every scanner visible on the network.
    fn device_list(&self) -> Vec<String>;

    fn create_and_connect(&self, hardware_id: &str, timeout: Duration) -> Option<Self::Device>;
}
