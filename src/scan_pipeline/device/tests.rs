use crate::scan_pipeline::common::error::ScanError;
use crate::scan_pipeline::device::{
    CoordinateSpace, CoordinateTransformation, DeviceSession, LOW_RESOLUTION, ScannerInterface,
    SimulatedFactory, SimulatedScanner, TriggerMode,
};
use crate::scan_pipeline::frame::types::Resolution;

const SCANNER_ID: &str = "1711015";

fn small_scanner(id: &str) -> SimulatedScanner {
    SimulatedScanner::new(id).with_resolution(Resolution::new(8, 6))
}

fn connected_interface() -> ScannerInterface<SimulatedFactory> {
    let factory = SimulatedFactory::new(vec![small_scanner(SCANNER_ID), small_scanner("2001")]);
    let mut interface = ScannerInterface::new(factory);
    interface
        .connect_camera(SCANNER_ID, TriggerMode::Software, true)
        .unwrap();
    interface
}

#[test]
fn test_camera_list() {
    let mut interface = ScannerInterface::new(SimulatedFactory::new(vec![
        small_scanner("a"),
        small_scanner("b"),
    ]));
    assert_eq!(interface.camera_list().unwrap(), vec!["a", "b"]);
}

#[test]
fn test_camera_list_without_control() {
    let factory = SimulatedFactory::new(vec![small_scanner("a")]).with_control_stopped();
    let mut interface = ScannerInterface::new(factory);
    assert!(matches!(
        interface.camera_list().unwrap_err(),
        ScanError::ControlNotRunning
    ));
}

#[test]
fn test_connect_sets_trigger_mode_and_acquisition() {
    let interface = connected_interface();
    assert!(interface.is_connected());
    assert!(interface.is_acquiring());
    assert_eq!(interface.trigger_mode().unwrap(), TriggerMode::Software);
    assert_eq!(interface.hardware_identification().unwrap(), SCANNER_ID);
}

#[test]
fn test_reconnect_same_scanner_only_updates_mode() {
    let mut interface = connected_interface();
    interface
        .connect_camera(SCANNER_ID, TriggerMode::Hardware, false)
        .unwrap();

    assert!(interface.is_connected());
    assert!(!interface.is_acquiring());
    assert_eq!(interface.trigger_mode().unwrap(), TriggerMode::Hardware);
}

#[test]
fn test_connect_switches_scanner() {
    let mut interface = connected_interface();
    interface
        .connect_camera("2001", TriggerMode::Freerun, true)
        .unwrap();
    assert_eq!(interface.hardware_identification().unwrap(), "2001");
}

#[test]
fn test_connect_unknown_scanner() {
    let mut interface = ScannerInterface::new(SimulatedFactory::new(vec![small_scanner("a")]));
    let err = interface
        .connect_camera("missing", TriggerMode::Software, true)
        .unwrap_err();
    assert!(matches!(err, ScanError::ScannerNotFound(id) if id == "missing"));
}

#[test]
fn test_connect_refused() {
    let factory = SimulatedFactory::new(vec![small_scanner("a")]).with_refused_connections();
    let mut interface = ScannerInterface::new(factory);
    let err = interface
        .connect_camera("a", TriggerMode::Software, true)
        .unwrap_err();
    assert!(matches!(err, ScanError::UnableToConnect(_)));
    assert!(!interface.is_connected());
}

#[test]
fn test_operations_require_connection() {
    let mut interface = ScannerInterface::new(SimulatedFactory::new(vec![small_scanner("a")]));

    assert!(matches!(interface.is_ok(), Err(ScanError::ScannerNotConnected)));
    assert!(matches!(
        interface.start_acquisition(),
        Err(ScanError::ScannerNotConnected)
    ));
    assert!(matches!(
        interface.get_frame(None),
        Err(ScanError::ScannerNotConnected)
    ));
    assert!(matches!(
        interface.set_low_resolution(),
        Err(ScanError::ScannerNotConnected)
    ));
    assert!(!interface.is_texture_output_enabled());
    assert!(!interface.is_normal_map_output_enabled());
}

#[test]
fn test_disconnect() {
    let mut interface = connected_interface();
    interface.disconnect_camera();
    assert!(!interface.is_connected());
    assert!(!interface.is_acquiring());
    assert!(matches!(
        interface.trigger_mode(),
        Err(ScanError::ScannerNotConnected)
    ));
}

#[test]
fn test_acquisition_fault_is_reported() {
    let factory = SimulatedFactory::new(vec![small_scanner("a").with_acquisition_fault()]);
    let mut interface = ScannerInterface::new(factory);
    let err = interface
        .connect_camera("a", TriggerMode::Software, true)
        .unwrap_err();
    assert!(matches!(err, ScanError::UnableToStartAcquisition));
}

#[test]
fn test_trigger_forces_software_mode() {
    let mut interface = connected_interface();
    interface
        .set_trigger_mode(TriggerMode::Freerun, false)
        .unwrap();

    let first = interface.trigger_image().unwrap();
    let second = interface.trigger_image().unwrap();

    assert_eq!(interface.trigger_mode().unwrap(), TriggerMode::Software);
    assert!(interface.is_acquiring());
    assert_eq!(second, first + 1);
}

#[test]
fn test_get_frame_triggers_new_capture() {
    let mut interface = connected_interface();
    let frame = interface.get_frame(None).unwrap().unwrap();
    assert_eq!(frame.resolution(), Resolution::new(8, 6));
    assert!(frame.is_successful());

    let again = interface.get_frame(Some(frame.frame_index() as u32)).unwrap();
    assert!(again.is_some());

    let stale = interface.get_frame(Some(frame.frame_index() as u32 + 10)).unwrap();
    assert!(stale.is_none());
}

#[test]
fn test_coordinate_space_roundtrip() {
    let mut interface = connected_interface();
    interface
        .set_coordinate_space(CoordinateSpace::MarkerSpace)
        .unwrap();
    assert_eq!(
        interface.coordinate_space().unwrap(),
        CoordinateSpace::MarkerSpace
    );
}

#[test]
fn test_set_transformation_from_matrix() {
    let mut interface = connected_interface();
    let matrix = [
        [0.0, -1.0, 0.0, 0.1],
        [1.0, 0.0, 0.0, 0.2],
        [0.0, 0.0, 1.0, 0.3],
        [0.0, 0.0, 0.0, 1.0],
    ];
    interface
        .set_transformation_matrix(matrix, CoordinateSpace::RobotSpace, true, false)
        .unwrap();

    assert_eq!(
        interface.coordinate_space().unwrap(),
        CoordinateSpace::RobotSpace
    );
    let transformation = CoordinateTransformation::from(matrix);
    assert_eq!(transformation.rotation[0], [0.0, -1.0, 0.0]);
    assert_eq!(transformation.translation, [0.1, 0.2, 0.3]);
}

#[test]
fn test_set_transformation_without_switching_space() {
    let mut interface = connected_interface();
    interface
        .set_transformation(
            CoordinateTransformation::default(),
            CoordinateSpace::CustomSpace,
            false,
            true,
        )
        .unwrap();
    assert_eq!(
        interface.coordinate_space().unwrap(),
        CoordinateSpace::CameraSpace
    );
}

#[test]
fn test_set_transformation_rejects_unsupported_space() {
    let mut interface = connected_interface();
    let err = interface
        .set_transformation(
            CoordinateTransformation::default(),
            CoordinateSpace::CameraSpace,
            true,
            false,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ScanError::CoordinateSpaceNotSupported(CoordinateSpace::CameraSpace)
    ));

    let factory =
        SimulatedFactory::new(vec![small_scanner("r").with_robot_transformation(false)]);
    let mut interface = ScannerInterface::new(factory);
    interface
        .connect_camera("r", TriggerMode::Software, false)
        .unwrap();
    let err = interface
        .set_transformation(
            CoordinateTransformation::default(),
            CoordinateSpace::RobotSpace,
            true,
            false,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ScanError::CoordinateSpaceNotSupported(CoordinateSpace::RobotSpace)
    ));
}

#[test]
fn test_resolution_presets() {
    let mut interface = connected_interface();
    interface.set_low_resolution().unwrap();
    let frame = interface.get_frame(None).unwrap().unwrap();
    assert_eq!(frame.resolution(), LOW_RESOLUTION);

    assert_eq!(interface.supported_capturing_modes().unwrap().len(), 2);
}

#[test]
fn test_trigger_mode_from_raw_value() {
    assert_eq!(TriggerMode::try_from(1).unwrap(), TriggerMode::Software);
    assert!(matches!(
        TriggerMode::try_from(9),
        Err(ScanError::InvalidTriggerMode(9))
    ));
}

#[test]
fn test_output_flags_follow_device() {
    let factory = SimulatedFactory::new(vec![small_scanner("plain").with_outputs(false, false)]);
    let mut interface = ScannerInterface::new(factory);
    interface
        .connect_camera("plain", TriggerMode::Software, true)
        .unwrap();

    assert!(!interface.is_texture_output_enabled());
    assert!(!interface.is_normal_map_output_enabled());

    let frame = interface.current_frame().unwrap().unwrap();
    assert!(frame.texture().is_none());
    assert!(frame.normals().is_none());
}
