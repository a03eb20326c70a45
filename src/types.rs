use image::{ImageBuffer, Rgb};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single RGB camera frame, as delivered by the camera and drawn on by the overlays.
pub type Frame = ImageBuffer<Rgb<u8>, Vec<u8>>;

/// Number of landmarks produced by the hand model.
pub const LANDMARK_COUNT: usize = 21;

/// Landmark index of the index fingertip, the drawing point.
pub const INDEX_FINGER_TIP: usize = 8;

/// Integer pixel position in frame coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle containing every point.
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(
            min_x as f32,
            min_y as f32,
            (max_x - min_x) as f32,
            (max_y - min_y) as f32,
        ))
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.x + self.width / 2.0) as i32,
            (self.y + self.height / 2.0) as i32,
        )
    }
}

/// Up/down state of the five fingers, thumb first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FingerState(pub [bool; 5]);

impl FingerState {
    pub const THUMB: usize = 0;
    pub const INDEX: usize = 1;
    pub const MIDDLE: usize = 2;
    pub const RING: usize = 3;
    pub const PINKY: usize = 4;

    pub fn new(fingers: [bool; 5]) -> Self {
        Self(fingers)
    }

    pub fn is_up(&self, finger: usize) -> bool {
        self.0[finger]
    }

    /// Parse a pattern like `"01110"` (thumb..pinky).
    pub fn parse(pattern: &str) -> Option<Self> {
        let bytes = pattern.as_bytes();
        if bytes.len() != 5 {
            return None;
        }
        let mut fingers = [false; 5];
        for (slot, b) in fingers.iter_mut().zip(bytes) {
            *slot = match b {
                b'1' => true,
                b'0' => false,
                _ => return None,
            };
        }
        Some(Self(fingers))
    }
}

impl From<[u8; 5]> for FingerState {
    fn from(bits: [u8; 5]) -> Self {
        Self(bits.map(|b| b != 0))
    }
}

impl fmt::Display for FingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for up in self.0 {
            f.write_str(if up { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// Everything the hand pipeline reports about the single tracked hand in a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    /// Centre of the landmark bounding box, in pixels.
    pub center: Point,
    /// Landmarks in pixel coordinates, MediaPipe ordering.
    pub landmarks: Vec<Point>,
    pub handedness: Handedness,
    pub fingers: FingerState,
    pub confidence: f32,
}

impl HandObservation {
    /// Where the index finger points; `None` if the landmark list is short.
    pub fn index_tip(&self) -> Option<Point> {
        self.landmarks.get(INDEX_FINGER_TIP).copied()
    }
}

/// Categorical command derived from a finger configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Next,
    Previous,
    ZoomIn,
    ZoomOut,
    ToggleDraw,
    None,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::ZoomIn => "zoom in",
            Self::ZoomOut => "zoom out",
            Self::ToggleDraw => "draw mode",
            Self::None => "none",
        }
    }
}
