use phoxi_cloud_rs::logger;
use phoxi_cloud_rs::scan_pipeline::{
    PointCloudConfig, ScanPipeline, ScannerInterface, SimulatedFactory, SimulatedScanner,
    StandardTiffWriter, TextureExportConfig, TextureWriter, TiffCompression, TriggerMode,
};

use std::path::Path;

use anyhow::Context;
use tracing::{error, info};

const SCANNER_ID: &str = "simulated-0";

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting scan pipeline...");

    let factory = SimulatedFactory::new(vec![SimulatedScanner::new(SCANNER_ID)]);
    let mut scanner = ScannerInterface::new(factory);
    info!("Available scanners: {:?}", scanner.camera_list()?);

    scanner
        .connect_camera(SCANNER_ID, TriggerMode::Software, true)
        .with_context(|| format!("connecting to {}", SCANNER_ID))?;
    scanner.set_low_resolution()?;

    let config = PointCloudConfig::builder().only_valid_points(true).build();
    let mut pipeline = ScanPipeline::new(scanner, config);

    info!(
        "Point cloud mode: {}",
        if pipeline.config().only_valid_points {
            "valid points only"
        } else {
            "organized"
        }
    );

    let frame = pipeline
        .capture_frame()?
        .context("scanner returned no frame")?;
    let cloud = pipeline.point_cloud_from_frame(&frame)?;
    info!(
        "Captured frame {}: {} points ({}x{})",
        frame.frame.frame_index(),
        cloud.len(),
        cloud.width(),
        cloud.height()
    );

    if let Some(texture) = &frame.texture {
        let export = TextureExportConfig::with_compression(TiffCompression::DeflateFast);
        match StandardTiffWriter.write_texture_file(texture, Path::new("texture.tiff"), &export) {
            Ok(_) => info!("Texture written to texture.tiff"),
            Err(e) => error!("Texture export failed: {}", e),
        }
    }

    pipeline.session_mut().disconnect_camera();
    Ok(())
}
