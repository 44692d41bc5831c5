//! In-memory scanner for running the pipeline without hardware.
//!
//! [`SimulatedScanner`] renders a tilted plane with a circular hole (pixels
//! without depth), a gradient texture and a constant normal map. Frames are
//! only produced on software trigger while acquiring, like a real device in
//! software trigger mode.

use std::time::Duration;

use ndarray::Array2;
use tracing::debug;

use crate::scan_pipeline::device::session::{ScannerDevice, ScannerFactory};
use crate::scan_pipeline::device::types::{
    CapturingMode, CoordinatesSettings, HIGH_RESOLUTION, LOW_RESOLUTION, TriggerMode,
};
use crate::scan_pipeline::frame::types::{INVALID_POINT, Point3f, RawFrame, Resolution};

/// Trigger status codes shared with real devices
const TRIGGER_NOT_ACCEPTED: i32 = -1;
const DEVICE_NOT_RUNNING: i32 = -2;

#[derive(Debug, Clone)]
pub struct SimulatedScanner {
    hardware_id: String,
    connected: bool,
    acquiring: bool,
    acquisition_fault: bool,
    trigger_mode: TriggerMode,
    coordinates: CoordinatesSettings,
    capturing_mode: CapturingMode,
    send_texture: bool,
    send_normal_map: bool,
    frames_triggered: u32,
    last_frame: Option<(u32, RawFrame)>,
}

impl SimulatedScanner {
    pub fn new(hardware_id: impl Into<String>) -> Self {
        let mut coordinates = CoordinatesSettings::default();
        coordinates.robot_transformation.supported = true;
        coordinates.custom_transformation.supported = true;

        Self {
            hardware_id: hardware_id.into(),
            connected: false,
            acquiring: false,
            acquisition_fault: false,
            trigger_mode: TriggerMode::Freerun,
            coordinates,
            capturing_mode: CapturingMode {
                resolution: LOW_RESOLUTION,
            },
            send_texture: true,
            send_normal_map: true,
            frames_triggered: 0,
            last_frame: None,
        }
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.capturing_mode.resolution = resolution;
        self
    }

    pub fn with_outputs(mut self, texture: bool, normal_map: bool) -> Self {
        self.send_texture = texture;
        self.send_normal_map = normal_map;
        self
    }

    pub fn with_robot_transformation(mut self, supported: bool) -> Self {
        self.coordinates.robot_transformation.supported = supported;
        self
    }

    /// Makes the device ignore start/stop acquisition requests.
    pub fn with_acquisition_fault(mut self) -> Self {
        self.acquisition_fault = true;
        self
    }
}

impl ScannerDevice for SimulatedScanner {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_acquiring(&self) -> bool {
        self.acquiring
    }

    fn disconnect(&mut self, _log_out: bool) {
        self.connected = false;
        self.acquiring = false;
    }

    fn start_acquisition(&mut self) {
        if self.connected && !self.acquisition_fault {
            self.acquiring = true;
        }
    }

    fn stop_acquisition(&mut self) {
        if !self.acquisition_fault {
            self.acquiring = false;
        }
    }

    fn trigger_frame(&mut self) -> i32 {
        if !self.acquiring {
            return DEVICE_NOT_RUNNING;
        }
        if self.trigger_mode != TriggerMode::Software {
            return TRIGGER_NOT_ACCEPTED;
        }

        self.frames_triggered += 1;
        let id = self.frames_triggered;
        self.last_frame = synthetic_frame(
            id as u64,
            self.capturing_mode.resolution,
            self.send_texture,
            self.send_normal_map,
        )
        .map(|frame| (id, frame));
        debug!("Simulated trigger, frame {}", id);
        id as i32
    }

    fn get_specific_frame(&mut self, id: u32, _timeout: Duration) -> Option<RawFrame> {
        match &self.last_frame {
            Some((last_id, frame)) if *last_id == id => Some(frame.clone()),
            _ => None,
        }
    }

    fn hardware_identification(&self) -> String {
        self.hardware_id.clone()
    }

    fn trigger_mode(&self) -> TriggerMode {
        self.trigger_mode
    }

    fn set_trigger_mode(&mut self, mode: TriggerMode) {
        self.trigger_mode = mode;
    }

    fn coordinates_settings(&self) -> CoordinatesSettings {
        self.coordinates
    }

    fn set_coordinates_settings(&mut self, settings: CoordinatesSettings) {
        self.coordinates = settings;
    }

    fn save_settings(&mut self) {
        debug!("Simulated scanner {} settings saved", self.hardware_id);
    }

    fn capturing_mode(&self) -> CapturingMode {
        self.capturing_mode
    }

    fn set_capturing_mode(&mut self, mode: CapturingMode) {
        self.capturing_mode = mode;
    }

    fn supported_capturing_modes(&self) -> Vec<CapturingMode> {
        vec![
            CapturingMode {
                resolution: HIGH_RESOLUTION,
            },
            CapturingMode {
                resolution: LOW_RESOLUTION,
            },
        ]
    }

    fn send_texture(&self) -> bool {
        self.send_texture
    }

    fn send_normal_map(&self) -> bool {
        self.send_normal_map
    }
}

/// Discovery over a fixed set of simulated scanners.
#[derive(Debug, Clone)]
pub struct SimulatedFactory {
    control_running: bool,
    refuse_connections: bool,
    scanners: Vec<SimulatedScanner>,
}

impl SimulatedFactory {
    pub fn new(scanners: Vec<SimulatedScanner>) -> Self {
        Self {
            control_running: true,
            refuse_connections: false,
            scanners,
        }
    }

    /// Behaves as if the vendor control service were not running.
    pub fn with_control_stopped(mut self) -> Self {
        self.control_running = false;
        self
    }

    /// Lists scanners but fails every connection attempt.
    pub fn with_refused_connections(mut self) -> Self {
        self.refuse_connections = true;
        self
    }
}

impl ScannerFactory for SimulatedFactory {
    type Device = SimulatedScanner;

    fn is_control_running(&self) -> bool {
        self.control_running
    }

    fn device_list(&self) -> Vec<String> {
        self.scanners.iter().map(|s| s.hardware_id.clone()).collect()
    }

    fn create_and_connect(&self, hardware_id: &str, _timeout: Duration) -> Option<SimulatedScanner> {
        if self.refuse_connections {
            return None;
        }
        let mut scanner = self
            .scanners
            .iter()
            .find(|s| s.hardware_id == hardware_id)?
            .clone();
        scanner.connected = true;
        Some(scanner)
    }
}

/// Renders one frame of the simulated scene at `resolution`.
///
/// Returns `None` for an empty resolution.
pub fn synthetic_frame(
    frame_index: u64,
    resolution: Resolution,
    texture: bool,
    normal_map: bool,
) -> Option<RawFrame> {
    let Resolution { width, height } = resolution;
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let hole_radius = width.min(height) as f32 / 6.0;

    let points = Array2::from_shape_fn((height, width), |(row, col)| {
        let (x, y) = (col as f32 - cx, row as f32 - cy);
        if (x * x + y * y).sqrt() < hole_radius {
            return INVALID_POINT;
        }
        Point3f::new(x * 0.5, y * 0.5, 800.0 + row as f32 * 0.2)
    });

    let normals =
        normal_map.then(|| Array2::from_elem((height, width), Point3f::new(0.0, -0.196, 0.981)));

    let texture = texture.then(|| {
        Array2::from_shape_fn((height, width), |(row, col)| {
            let stripes = ((col as f32) * 0.05).sin() * 200.0;
            100.0 + row as f32 * 1.5 + stripes.abs()
        })
    });

    RawFrame::new(frame_index, true, points, normals, texture).ok()
}
