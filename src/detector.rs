use anyhow::{bail, Context, Result};
use image::imageops::FilterType;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;
use tracing::debug;

use crate::config::DetectorConfig;
use crate::gesture::fingers_up;
use crate::pipeline::HandPipeline;
use crate::types::{Frame, HandObservation, Handedness, Point, Rect, LANDMARK_COUNT};

const INPUT_SIZE: u32 = 224;

/// Single-hand landmark model (MediaPipe hand_landmark exported to ONNX).
///
/// Input: `[1, 224, 224, 3]` RGB in 0..1.
/// Outputs: 63 landmark floats (x, y, z in input pixels), hand presence, handedness.
pub struct HandLandmarkPipeline {
    session: Session,
    min_confidence: f32,
    roi_padding: f32,
    /// Box of the hand seen last frame; next crop is taken around it.
    last_box: Option<Rect>,
}

impl HandLandmarkPipeline {
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        if !Path::new(&config.model_path).exists() {
            bail!("Hand landmark model not found at {}", config.model_path);
        }
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .with_execution_providers([ort::execution_providers::CPUExecutionProvider::default().build()])?
            .commit_from_file(&config.model_path)
            .with_context(|| format!("loading {}", config.model_path))?;

        Ok(Self {
            session,
            min_confidence: config.min_confidence,
            roi_padding: config.roi_padding,
            last_box: None,
        })
    }

    fn infer(&mut self, crop: &Frame) -> Result<(Vec<f32>, f32, f32)> {
        let resized = image::imageops::resize(crop, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);
        let mut input_data = Vec::with_capacity((INPUT_SIZE * INPUT_SIZE * 3) as usize);
        for pixel in resized.pixels() {
            input_data.push(pixel[0] as f32 / 255.0);
            input_data.push(pixel[1] as f32 / 255.0);
            input_data.push(pixel[2] as f32 / 255.0);
        }

        let shape = vec![1, INPUT_SIZE as usize, INPUT_SIZE as usize, 3];
        let input = Tensor::from_array((shape, input_data))?;
        let outputs = self.session.run(ort::inputs![input])?;

        let (_shape, landmarks) = outputs[0].try_extract_tensor::<f32>()?;
        let (_shape, presence) = outputs[1].try_extract_tensor::<f32>()?;
        let (_shape, handedness) = outputs[2].try_extract_tensor::<f32>()?;

        if landmarks.len() < LANDMARK_COUNT * 3 || presence.is_empty() || handedness.is_empty() {
            bail!("unexpected hand model output sizes");
        }
        Ok((landmarks.to_vec(), presence[0], handedness[0]))
    }
}

/// Region to crop this frame: the padded previous box, or the whole frame.
pub fn crop_region(last_box: Option<Rect>, padding: f32, frame_w: u32, frame_h: u32) -> Rect {
    let full = Rect::new(0.0, 0.0, frame_w as f32, frame_h as f32);
    let Some(b) = last_box else {
        return full;
    };

    // Square around the hand so the model sees undistorted proportions.
    let side = b.width.max(b.height) * (1.0 + padding);
    let c = b.center();
    let x = (c.x as f32 - side / 2.0).max(0.0);
    let y = (c.y as f32 - side / 2.0).max(0.0);
    let w = side.min(frame_w as f32 - x);
    let h = side.min(frame_h as f32 - y);
    if w < 8.0 || h < 8.0 {
        return full;
    }
    Rect::new(x, y, w, h)
}

/// Map model-space landmarks (0..224) in `roi` back to frame pixels.
pub fn to_frame_points(raw: &[f32], roi: Rect) -> Vec<Point> {
    let sx = roi.width / INPUT_SIZE as f32;
    let sy = roi.height / INPUT_SIZE as f32;
    raw.chunks_exact(3)
        .take(LANDMARK_COUNT)
        .map(|c| Point::new((roi.x + c[0] * sx) as i32, (roi.y + c[1] * sy) as i32))
        .collect()
}

impl HandPipeline for HandLandmarkPipeline {
    fn name(&self) -> String {
        "Hand Landmarks (21 pts)".to_string()
    }

    fn process(&mut self, frame: &Frame) -> Result<Option<HandObservation>> {
        let roi = crop_region(self.last_box, self.roi_padding, frame.width(), frame.height());
        let crop = image::imageops::crop_imm(
            frame,
            roi.x as u32,
            roi.y as u32,
            roi.width as u32,
            roi.height as u32,
        )
        .to_image();

        let (raw, presence, handedness_score) = self.infer(&crop)?;
        if presence < self.min_confidence {
            debug!("no hand (presence {:.2})", presence);
            self.last_box = None;
            return Ok(None);
        }

        let landmarks = to_frame_points(&raw, roi);
        let Some(bbox) = Rect::bounding(&landmarks) else {
            self.last_box = None;
            return Ok(None);
        };
        self.last_box = Some(bbox);

        let handedness = if handedness_score > 0.5 {
            Handedness::Right
        } else {
            Handedness::Left
        };
        let fingers = fingers_up(&landmarks, handedness);

        Ok(Some(HandObservation {
            center: bbox.center(),
            landmarks,
            handedness,
            fingers,
            confidence: presence,
        }))
    }
}
