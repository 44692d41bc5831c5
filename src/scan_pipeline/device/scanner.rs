use tracing::{debug, info, instrument, warn};

use crate::scan_pipeline::common::error::{Result, ScanError};
use crate::scan_pipeline::device::session::{DeviceSession, ScannerDevice, ScannerFactory};
use crate::scan_pipeline::device::types::{
    CONNECT_TIMEOUT, CapturingMode, CoordinateSpace, CoordinateTransformation, FRAME_TIMEOUT,
    HIGH_RESOLUTION, LOW_RESOLUTION, TriggerMode,
};
use crate::scan_pipeline::frame::types::{RawFrame, Resolution};

/// Connection, acquisition and trigger management on top of a vendor runtime.
///
/// Holds at most one scanner handle. Every call that talks to the device
/// first checks that the handle exists and is still connected.
pub struct ScannerInterface<F: ScannerFactory> {
    factory: F,
    scanner: Option<F::Device>,
}

impl<F: ScannerFactory> ScannerInterface<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            scanner: None,
        }
    }

    fn device(&self) -> Result<&F::Device> {
        match &self.scanner {
            Some(scanner) if scanner.is_connected() => Ok(scanner),
            _ => Err(ScanError::ScannerNotConnected),
        }
    }

    fn device_mut(&mut self) -> Result<&mut F::Device> {
        match &mut self.scanner {
            Some(scanner) if scanner.is_connected() => Ok(scanner),
            _ => Err(ScanError::ScannerNotConnected),
        }
    }

    /// Hardware identifications of all scanners on the network.
    pub fn camera_list(&mut self) -> Result<Vec<String>> {
        if !self.factory.is_control_running() {
            self.scanner = None;
            return Err(ScanError::ControlNotRunning);
        }
        Ok(self.factory.device_list())
    }

    /// Connects to the scanner with `hardware_id` and applies `mode`.
    ///
    /// Reconnecting to the scanner that is already connected only re-applies
    /// the trigger mode. Any other connection is closed first.
    #[instrument(skip(self))]
    pub fn connect_camera(
        &mut self,
        hardware_id: &str,
        mode: TriggerMode,
        start_acquisition: bool,
    ) -> Result<()> {
        let same_scanner = self
            .device()
            .is_ok_and(|scanner| scanner.hardware_identification() == hardware_id);
        if same_scanner {
            debug!("Already connected, re-applying trigger mode");
            return self.set_trigger_mode(mode, start_acquisition);
        }

        if !self.factory.is_control_running() {
            return Err(ScanError::ControlNotRunning);
        }

        if !self.factory.device_list().iter().any(|id| id == hardware_id) {
            return Err(ScanError::ScannerNotFound(hardware_id.to_string()));
        }

        self.disconnect_camera();
        match self.factory.create_and_connect(hardware_id, CONNECT_TIMEOUT) {
            Some(scanner) => self.scanner = Some(scanner),
            None => {
                self.scanner = None;
                return Err(ScanError::UnableToConnect(hardware_id.to_string()));
            }
        }

        info!("Connected to scanner {}", hardware_id);
        self.set_trigger_mode(mode, start_acquisition)
    }

    pub fn disconnect_camera(&mut self) {
        if let Some(scanner) = self.scanner.as_mut() {
            if scanner.is_connected() {
                info!("Disconnecting scanner {}", scanner.hardware_identification());
                scanner.disconnect(true);
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.device().is_ok()
    }

    pub fn is_acquiring(&self) -> bool {
        self.scanner.as_ref().is_some_and(|s| s.is_acquiring())
    }

    pub fn is_ok(&self) -> Result<()> {
        self.device().map(|_| ())
    }

    pub fn start_acquisition(&mut self) -> Result<()> {
        let scanner = self.device_mut()?;
        if scanner.is_acquiring() {
            return Ok(());
        }
        scanner.start_acquisition();
        if !scanner.is_acquiring() {
            return Err(ScanError::UnableToStartAcquisition);
        }
        debug!("Acquisition started");
        Ok(())
    }

    pub fn stop_acquisition(&mut self) -> Result<()> {
        let scanner = self.device_mut()?;
        if !scanner.is_acquiring() {
            return Ok(());
        }
        scanner.stop_acquisition();
        if scanner.is_acquiring() {
            return Err(ScanError::UnableToStopAcquisition);
        }
        debug!("Acquisition stopped");
        Ok(())
    }

    /// Switches to software triggering and requests a new capture.
    ///
    /// Returns the id of the triggered frame.
    pub fn trigger_image(&mut self) -> Result<u32> {
        self.set_trigger_mode(TriggerMode::Software, true)?;
        let code = self.device_mut()?.trigger_frame();
        if code < 0 {
            warn!("Trigger rejected with code {}", code);
            return Err(ScanError::TriggerRejected(code));
        }
        Ok(code as u32)
    }

    /// Fetches frame `id`, or triggers a new one when `id` is `None`.
    ///
    /// Only the most recently triggered frame can be retrieved.
    #[instrument(skip(self))]
    pub fn get_frame(&mut self, id: Option<u32>) -> Result<Option<RawFrame>> {
        let id = match id {
            Some(id) => id,
            None => self.trigger_image()?,
        };
        let frame = self.device_mut()?.get_specific_frame(id, FRAME_TIMEOUT);
        if frame.is_none() {
            warn!("Scanner returned no frame for id {}", id);
        }
        Ok(frame)
    }

    pub fn set_coordinate_space(&mut self, space: CoordinateSpace) -> Result<()> {
        let scanner = self.device_mut()?;
        let mut settings = scanner.coordinates_settings();
        settings.coordinate_space = space;
        scanner.set_coordinates_settings(settings);
        Ok(())
    }

    pub fn coordinate_space(&self) -> Result<CoordinateSpace> {
        Ok(self.device()?.coordinates_settings().coordinate_space)
    }

    /// Stores `transformation` for `space`, which must be robot or custom space.
    ///
    /// With `set_space` the device also switches to `space`; with
    /// `save_settings` the change survives a reconnect. Without `set_space`
    /// the active coordinate space is left unchanged.
    pub fn set_transformation(
        &mut self,
        transformation: CoordinateTransformation,
        space: CoordinateSpace,
        set_space: bool,
        save_settings: bool,
    ) -> Result<()> {
        let scanner = self.device_mut()?;
        let mut settings = scanner.coordinates_settings();

        let slot = match space {
            CoordinateSpace::RobotSpace => &mut settings.robot_transformation,
            CoordinateSpace::CustomSpace => &mut settings.custom_transformation,
            other => return Err(ScanError::CoordinateSpaceNotSupported(other)),
        };
        if !slot.supported {
            return Err(ScanError::CoordinateSpaceNotSupported(space));
        }
        slot.transformation = transformation;

        if set_space {
            settings.coordinate_space = space;
        }
        scanner.set_coordinates_settings(settings);
        if save_settings {
            scanner.save_settings();
        }
        Ok(())
    }

    /// Same as [`Self::set_transformation`], from a 4x4 homogeneous matrix.
    pub fn set_transformation_matrix(
        &mut self,
        matrix: [[f64; 4]; 4],
        space: CoordinateSpace,
        set_space: bool,
        save_settings: bool,
    ) -> Result<()> {
        self.set_transformation(matrix.into(), space, set_space, save_settings)
    }

    pub fn hardware_identification(&self) -> Result<String> {
        Ok(self.device()?.hardware_identification())
    }

    pub fn supported_capturing_modes(&self) -> Result<Vec<CapturingMode>> {
        Ok(self.device()?.supported_capturing_modes())
    }

    pub fn set_high_resolution(&mut self) -> Result<()> {
        self.set_resolution(HIGH_RESOLUTION)
    }

    pub fn set_low_resolution(&mut self) -> Result<()> {
        self.set_resolution(LOW_RESOLUTION)
    }

    fn set_resolution(&mut self, resolution: Resolution) -> Result<()> {
        let scanner = self.device_mut()?;
        let mut mode = scanner.capturing_mode();
        mode.resolution = resolution;
        scanner.set_capturing_mode(mode);
        debug!("Resolution set to {}x{}", resolution.width, resolution.height);
        Ok(())
    }

    /// Sets the trigger mode; acquisition is restarted only if requested.
    ///
    /// In freerun mode frames are produced as soon as acquisition starts.
    pub fn set_trigger_mode(&mut self, mode: TriggerMode, start_acquisition: bool) -> Result<()> {
        let current = self.device()?.trigger_mode();
        if mode != current {
            self.stop_acquisition()?;
            self.device_mut()?.set_trigger_mode(mode);
            debug!("Trigger mode {:?} -> {:?}", current, mode);
        }

        if start_acquisition {
            self.start_acquisition()
        } else {
            self.stop_acquisition()
        }
    }

    pub fn trigger_mode(&self) -> Result<TriggerMode> {
        Ok(self.device()?.trigger_mode())
    }
}

impl<F: ScannerFactory> DeviceSession for ScannerInterface<F> {
    fn is_ok(&self) -> Result<()> {
        ScannerInterface::is_ok(self)
    }

    fn current_frame(&mut self) -> Result<Option<RawFrame>> {
        self.get_frame(None)
    }

    fn is_texture_output_enabled(&self) -> bool {
        self.device().is_ok_and(|s| s.send_texture())
    }

    fn is_normal_map_output_enabled(&self) -> bool {
        self.device().is_ok_and(|s| s.send_normal_map())
    }
}
