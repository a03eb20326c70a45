//! Mutable state owned by the frame loop, and the gesture half of a frame:
//! classify → debounce → dispatch → capture ink → tick.

use crate::annotation::AnnotationSet;
use crate::debounce::DebounceGate;
use crate::dispatch::{Action, Dispatcher};
use crate::gesture::GestureClassifier;
use crate::presenter::Presenter;
use crate::types::{Gesture, HandObservation};

#[derive(Debug, Clone)]
pub struct SessionState {
    pub annotations: AnnotationSet,
    pub draw_mode: bool,
    pub debounce: DebounceGate,
    /// Most recent gesture that got past the debounce gate, for the HUD.
    pub last_fired: Option<Gesture>,
}

/// Outcome of one frame's gesture processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    pub action: Option<Action>,
    pub drew: bool,
}

impl SessionState {
    pub fn new(cooldown_frames: u32) -> Self {
        Self {
            annotations: AnnotationSet::new(),
            draw_mode: false,
            debounce: DebounceGate::new(cooldown_frames),
            last_fired: None,
        }
    }

    /// Run one frame. `hand` is `None` when nothing was detected; the debounce
    /// gate still ticks in that case.
    pub fn step<P: Presenter>(
        &mut self,
        hand: Option<&HandObservation>,
        classifier: &GestureClassifier,
        dispatcher: &mut Dispatcher<P>,
    ) -> StepReport {
        let mut report = StepReport::default();

        if let Some(hand) = hand {
            if !self.debounce.is_active() {
                let gesture = classifier.classify(hand.fingers, hand.center.y);
                if self.debounce.should_fire(gesture) {
                    self.debounce.arm();
                    self.last_fired = Some(gesture);
                    report.action = Some(dispatcher.dispatch(gesture, self));
                }
            }

            if self.draw_mode && classifier.is_drawing_pose(hand.fingers) {
                if let Some(tip) = hand.index_tip() {
                    report.drew = self.annotations.append_point(tip);
                }
            }
        }

        self.debounce.tick();
        report
    }
}
