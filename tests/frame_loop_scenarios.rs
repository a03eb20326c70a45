use anyhow::{anyhow, bail, Result};
use image::Rgb;
use std::collections::VecDeque;

use hand_slides::annotation::StrokeStyle;
use hand_slides::camera::FrameSource;
use hand_slides::config::UiConfig;
use hand_slides::driver::FrameLoop;
use hand_slides::gesture::GestureClassifier;
use hand_slides::output::FrameSink;
use hand_slides::pipeline::HandPipeline;
use hand_slides::presenter::Presenter;
use hand_slides::types::{FingerState, Frame, Gesture, HandObservation, Handedness, Point};

// =========================================================================
// Fakes for the four collaborators
// =========================================================================

/// Yields blank frames; `false` entries in the script are capture failures.
struct ScriptedCamera {
    script: VecDeque<bool>,
}

impl FrameSource for ScriptedCamera {
    fn capture(&mut self) -> Result<Frame> {
        match self.script.pop_front() {
            Some(false) => Err(anyhow!("camera hiccup")),
            _ => Ok(Frame::new(640, 480)),
        }
    }
}

/// Replays one entry per processed frame; `Err` entries simulate inference failure.
struct ScriptedPipeline {
    script: VecDeque<Result<Option<HandObservation>>>,
}

impl HandPipeline for ScriptedPipeline {
    fn name(&self) -> String {
        "scripted".to_string()
    }

    fn process(&mut self, _frame: &Frame) -> Result<Option<HandObservation>> {
        self.script.pop_front().unwrap_or(Ok(None))
    }
}

#[derive(Default)]
struct RecordingPresenter {
    calls: Vec<&'static str>,
    fail: bool,
}

impl Presenter for RecordingPresenter {
    fn name(&self) -> String {
        "recording".to_string()
    }

    fn advance(&mut self) -> Result<()> {
        self.calls.push("advance");
        if self.fail {
            bail!("rejected");
        }
        Ok(())
    }

    fn retreat(&mut self) -> Result<()> {
        self.calls.push("retreat");
        if self.fail {
            bail!("rejected");
        }
        Ok(())
    }
}

/// Keeps the last shown frame and asks to quit after `polls_left` iterations.
struct RecordingSink {
    polls_left: usize,
    presented: usize,
    last: Option<Frame>,
}

impl RecordingSink {
    fn quitting_after(iterations: usize) -> Self {
        Self {
            polls_left: iterations,
            presented: 0,
            last: None,
        }
    }
}

impl FrameSink for RecordingSink {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.presented += 1;
        self.last = Some(frame.clone());
        Ok(())
    }

    fn quit_requested(&mut self) -> bool {
        self.polls_left = self.polls_left.saturating_sub(1);
        self.polls_left == 0
    }
}

// =========================================================================
// Helpers
// =========================================================================

const OPEN: [u8; 5] = [1, 1, 1, 1, 1];
const THUMB: [u8; 5] = [1, 0, 0, 0, 0];
const DRAW: [u8; 5] = [0, 1, 1, 1, 0];

fn hand(fingers: [u8; 5], center_y: i32, tip: (i32, i32)) -> Option<HandObservation> {
    let mut landmarks = vec![Point::new(320, center_y); 21];
    landmarks[8] = tip.into();
    Some(HandObservation {
        center: Point::new(320, center_y),
        landmarks,
        handedness: Handedness::Right,
        fingers: FingerState::from(fingers),
        confidence: 0.9,
    })
}

fn quiet_ui() -> UiConfig {
    UiConfig {
        show_hud: false,
        show_landmarks: false,
        show_threshold: false,
        ..UiConfig::default()
    }
}

fn build(
    camera: Vec<bool>,
    hands: Vec<Option<HandObservation>>,
    presenter: RecordingPresenter,
) -> FrameLoop<ScriptedCamera, ScriptedPipeline, RecordingPresenter, RecordingSink> {
    let iterations = camera.len().max(hands.len());
    FrameLoop::new(
        ScriptedCamera {
            script: camera.into(),
        },
        ScriptedPipeline {
            script: hands.into_iter().map(Ok).collect(),
        },
        presenter,
        RecordingSink::quitting_after(iterations),
        GestureClassifier::with_default_table(300),
        30,
    )
    .with_ui(quiet_ui())
}

fn all_frames_ok(n: usize) -> Vec<bool> {
    vec![true; n]
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn next_gesture_advances_and_clears() {
    // Draw a little, wait out the cooldown, then open hand.
    let mut hands = vec![hand(DRAW, 50, (10, 10)), hand(DRAW, 500, (20, 20))];
    hands.extend(std::iter::repeat_with(|| None).take(30));
    hands.push(hand(OPEN, 100, (0, 0)));
    let frames = hands.len();
    let mut frame_loop = build(all_frames_ok(frames), hands, RecordingPresenter::default());
    frame_loop.run().unwrap();

    let state = frame_loop.state();
    assert_eq!(frame_loop.presenter().calls, vec!["advance"]);
    assert!(!state.draw_mode);
    assert_eq!(state.annotations.strokes().len(), 1);
    assert_eq!(state.annotations.cursor(), None);
    assert_eq!(state.last_fired, Some(Gesture::Next));
}

#[test]
fn thumb_gesture_retreats() {
    let mut frame_loop = build(all_frames_ok(1), vec![hand(THUMB, 50, (0, 0))], RecordingPresenter::default());
    frame_loop.run().unwrap();
    assert_eq!(frame_loop.presenter().calls, vec!["retreat"]);
    assert_eq!(frame_loop.state().annotations.point_count(), 0);
}

#[test]
fn draw_pose_records_fingertip_path() {
    let hands = vec![
        hand(DRAW, 50, (10, 10)),
        hand(DRAW, 60, (12, 11)),
        hand(DRAW, 70, (15, 14)),
    ];
    let mut frame_loop = build(all_frames_ok(3), hands, RecordingPresenter::default());
    frame_loop.run().unwrap();

    let state = frame_loop.state();
    assert!(state.draw_mode);
    assert_eq!(state.annotations.strokes().len(), 2);
    assert_eq!(
        state.annotations.current().unwrap().points,
        vec![Point::new(10, 10), Point::new(12, 11), Point::new(15, 14)]
    );
}

#[test]
fn repeated_next_within_cooldown_fires_once() {
    let mut hands = vec![hand(OPEN, 100, (0, 0))];
    hands.extend(std::iter::repeat_with(|| None).take(4));
    hands.push(hand(OPEN, 100, (0, 0)));
    let mut frame_loop = build(all_frames_ok(6), hands, RecordingPresenter::default());
    let stats = frame_loop.run().unwrap();

    assert_eq!(frame_loop.presenter().calls, vec!["advance"]);
    assert_eq!(stats.gestures_fired, 1);
}

#[test]
fn low_hand_never_navigates() {
    let hands = (0..40).map(|_| hand(OPEN, 450, (0, 0))).collect();
    let mut frame_loop = build(all_frames_ok(40), hands, RecordingPresenter::default());
    frame_loop.run().unwrap();
    assert!(frame_loop.presenter().calls.is_empty());
}

#[test]
fn failed_frames_are_skipped() {
    let camera = vec![true, false, false, true];
    let hands = vec![hand(THUMB, 50, (0, 0)), hand(OPEN, 50, (0, 0))];
    let mut frame_loop = build(camera, hands, RecordingPresenter::default());
    let stats = frame_loop.run().unwrap();

    assert_eq!(stats.frames, 2);
    assert_eq!(stats.dropped_frames, 2);
    assert_eq!(frame_loop.sink().presented, 2);
    // The second hand was still inside the cooldown window.
    assert_eq!(frame_loop.presenter().calls, vec!["retreat"]);
}

#[test]
fn detector_error_counts_as_no_hand() {
    let mut frame_loop = FrameLoop::new(
        ScriptedCamera {
            script: all_frames_ok(2).into(),
        },
        ScriptedPipeline {
            script: vec![Err(anyhow!("bad tensor")), Ok(hand(OPEN, 50, (0, 0)))].into(),
        },
        RecordingPresenter::default(),
        RecordingSink::quitting_after(2),
        GestureClassifier::with_default_table(300),
        30,
    )
    .with_ui(quiet_ui());
    let stats = frame_loop.run().unwrap();

    assert_eq!(stats.detector_errors, 1);
    assert_eq!(frame_loop.presenter().calls, vec!["advance"]);
}

#[test]
fn rejected_command_keeps_loop_running() {
    let mut hands = vec![hand(OPEN, 50, (0, 0))];
    hands.extend(std::iter::repeat_with(|| None).take(31));
    hands.push(hand(THUMB, 50, (0, 0)));
    let frames = hands.len();
    let presenter = RecordingPresenter {
        fail: true,
        ..Default::default()
    };
    let mut frame_loop = build(all_frames_ok(frames), hands, presenter);
    let stats = frame_loop.run().unwrap();

    assert_eq!(stats.frames as usize, frames);
    assert_eq!(frame_loop.presenter().calls, vec!["advance", "retreat"]);
}

#[test]
fn strokes_are_drawn_on_presented_frame() {
    let hands = vec![hand(DRAW, 50, (100, 100)), hand(DRAW, 50, (200, 100))];
    let style = StrokeStyle {
        color: Rgb([200, 0, 0]),
        thickness: 4,
    };
    let mut frame_loop = build(all_frames_ok(2), hands, RecordingPresenter::default()).with_style(style);
    frame_loop.run().unwrap();

    let shown = frame_loop.sink().last.as_ref().unwrap();
    assert_eq!(*shown.get_pixel(150, 100), Rgb([200, 0, 0]));
    assert_eq!(*shown.get_pixel(150, 150), Rgb([0, 0, 0]));
}
