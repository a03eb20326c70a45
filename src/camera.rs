use anyhow::{anyhow, Context, Result};
use colored::*;
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution},
    Camera,
};

use crate::config::CameraConfig;
use crate::types::Frame;

/// Anything that yields frames one at a time. Errors mean "skip this frame".
pub trait FrameSource {
    fn capture(&mut self) -> Result<Frame>;
}

pub struct CameraSource {
    camera: Camera,
    mirror: bool,
}

impl CameraSource {
    pub fn new(config: &CameraConfig) -> Result<Self> {
        let cam_index = CameraIndex::Index(config.index);
        // Closest match to the configured size; drivers may pick another mode.
        let format = CameraFormat::new(
            Resolution::new(config.width, config.height),
            FrameFormat::MJPEG,
            30,
        );
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));
        let mut camera = Camera::new(cam_index, requested).context("Failed to create camera instance")?;

        camera.open_stream().map_err(|e| anyhow!(e)).context("Failed to open camera stream")?;

        println!("{}", format!("Opened camera: {}", camera.info().human_name()).green());
        println!("Format: {}", camera.camera_format());

        Ok(Self {
            camera,
            mirror: config.mirror,
        })
    }

    pub fn width(&self) -> u32 {
        self.camera.resolution().width()
    }

    pub fn height(&self) -> u32 {
        self.camera.resolution().height()
    }
}

impl FrameSource for CameraSource {
    fn capture(&mut self) -> Result<Frame> {
        let frame = self.camera.frame().map_err(|e| anyhow!(e)).context("Failed to get frame")?;
        let mut decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| anyhow!(e))
            .context("Failed to decode frame")?;
        if self.mirror {
            image::imageops::flip_horizontal_in_place(&mut decoded);
        }
        Ok(decoded)
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        let _ = self.camera.stop_stream();
    }
}

/// Print the cameras nokhwa can see.
pub fn list_cameras() -> Result<()> {
    let cameras = nokhwa::query(nokhwa::utils::ApiBackend::Auto)?;
    println!("Available Cameras:");
    println!("{:<5} | {:<30} | {:<10}", "Index", "Name", "Misc");
    println!("{}", "-".repeat(60));
    for cam in cameras {
        println!("{:<5} | {:<30} | {:?}", cam.index(), cam.human_name(), cam.misc());
    }
    Ok(())
}
