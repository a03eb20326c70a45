//! Finger configuration → gesture classification.
//!
//! Classification is a table lookup: each row binds an exact five-finger
//! pattern to a gesture and rows are checked in order. The hand must also
//! be raised above the gate line (small y) for anything to be recognised.

use anyhow::{anyhow, Result};

use crate::config::GestureBinding;
use crate::types::{FingerState, Gesture, Handedness, Point, LANDMARK_COUNT};

/// Default pattern table, highest priority first.
pub const DEFAULT_TABLE: [(FingerState, Gesture); 5] = [
    (FingerState([true, true, true, true, true]), Gesture::Next),
    (FingerState([true, false, false, false, false]), Gesture::Previous),
    (FingerState([false, true, false, false, false]), Gesture::ZoomIn),
    (FingerState([false, true, true, false, false]), Gesture::ZoomOut),
    (FingerState([false, true, true, true, false]), Gesture::ToggleDraw),
];

pub struct GestureClassifier {
    threshold_y: i32,
    table: Vec<(FingerState, Gesture)>,
}

impl GestureClassifier {
    pub fn new(threshold_y: i32, table: Vec<(FingerState, Gesture)>) -> Self {
        Self { threshold_y, table }
    }

    pub fn with_default_table(threshold_y: i32) -> Self {
        Self::new(threshold_y, DEFAULT_TABLE.to_vec())
    }

    /// Build the table from configured bindings, rejecting malformed patterns.
    pub fn from_bindings(threshold_y: i32, bindings: &[GestureBinding]) -> Result<Self> {
        let table = bindings
            .iter()
            .map(|b| {
                FingerState::parse(&b.pattern)
                    .map(|fingers| (fingers, b.gesture))
                    .ok_or_else(|| {
                        anyhow!(
                            "invalid finger pattern {:?} for {:?}: expected 5 characters of 0/1",
                            b.pattern,
                            b.gesture
                        )
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(threshold_y, table))
    }

    pub fn threshold_y(&self) -> i32 {
        self.threshold_y
    }

    /// Pure classification. A hand whose centre is below the gate line yields `None`.
    pub fn classify(&self, fingers: FingerState, center_y: i32) -> Gesture {
        if center_y > self.threshold_y {
            return Gesture::None;
        }
        self.table
            .iter()
            .find(|(pattern, _)| *pattern == fingers)
            .map(|(_, gesture)| *gesture)
            .unwrap_or(Gesture::None)
    }

    /// Pattern that keeps ink flowing while draw mode is on. It is the toggle
    /// pattern itself, so changing pose pauses the stroke without leaving draw mode.
    pub fn draw_pattern(&self) -> Option<FingerState> {
        self.table
            .iter()
            .find(|(_, gesture)| *gesture == Gesture::ToggleDraw)
            .map(|(pattern, _)| *pattern)
    }

    /// Drawing ignores the gate line.
    pub fn is_drawing_pose(&self, fingers: FingerState) -> bool {
        self.draw_pattern() == Some(fingers)
    }
}

const FINGER_TIPS: [usize; 5] = [4, 8, 12, 16, 20];

/// Derive which fingers are extended from the 21 hand landmarks.
///
/// Thumb: tip outward of the IP joint along x, direction depending on the hand.
/// Other fingers: tip higher in the image than the PIP joint.
pub fn fingers_up(landmarks: &[Point], handedness: Handedness) -> FingerState {
    let mut fingers = [false; 5];
    if landmarks.len() < LANDMARK_COUNT {
        return FingerState(fingers);
    }

    let thumb_tip = landmarks[FINGER_TIPS[0]];
    let thumb_ip = landmarks[FINGER_TIPS[0] - 1];
    fingers[0] = match handedness {
        Handedness::Right => thumb_tip.x > thumb_ip.x,
        Handedness::Left => thumb_tip.x < thumb_ip.x,
    };

    for (slot, &tip) in fingers.iter_mut().zip(FINGER_TIPS.iter()).skip(1) {
        *slot = landmarks[tip].y < landmarks[tip - 2].y;
    }

    FingerState(fingers)
}
