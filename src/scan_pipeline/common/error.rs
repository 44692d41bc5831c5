use thiserror::Error;

use crate::scan_pipeline::device::types::CoordinateSpace;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Corrupted frame")]
    CorruptedFrame,

    #[error("No scanner connected")]
    ScannerNotConnected,

    #[error("Scanner control service is not running")]
    ControlNotRunning,

    #[error("Scanner not found: {0}")]
    ScannerNotFound(String),

    #[error("Scanner {0} was not able to connect, disconnected")]
    UnableToConnect(String),

    #[error("Unable to start acquisition")]
    UnableToStartAcquisition,

    #[error("Unable to stop acquisition")]
    UnableToStopAcquisition,

    #[error("Invalid trigger mode {0}")]
    InvalidTriggerMode(i32),

    #[error("Coordinate space is not supported: {0:?}")]
    CoordinateSpaceNotSupported(CoordinateSpace),

    #[error("Trigger rejected by device (code {0})")]
    TriggerRejected(i32),

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("{channel} grid is {actual_width}x{actual_height}, expected {width}x{height}")]
    ChannelShapeMismatch {
        channel: &'static str,
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
