use tracing::{info, warn};

use crate::presenter::Presenter;
use crate::session::SessionState;
use crate::types::Gesture;

/// What a dispatched gesture did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Slide changed (or was asked to); annotations cleared, draw mode off.
    Navigated(Gesture),
    /// Draw mode toggled to the contained value.
    DrawMode(bool),
    /// Recognised but has no effect yet (zoom).
    Reserved(Gesture),
    Ignored,
}

/// Routes debounce-approved gestures to the presenter and the session state.
pub struct Dispatcher<P: Presenter> {
    presenter: P,
}

impl<P: Presenter> Dispatcher<P> {
    pub fn new(presenter: P) -> Self {
        Self { presenter }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    pub fn dispatch(&mut self, gesture: Gesture, state: &mut SessionState) -> Action {
        match gesture {
            Gesture::Next | Gesture::Previous => {
                let result = if gesture == Gesture::Next {
                    self.presenter.advance()
                } else {
                    self.presenter.retreat()
                };
                match result {
                    Ok(()) => info!("{}", gesture.as_str()),
                    // A failed command must not end the talk; keep going.
                    Err(e) => warn!("{} command failed: {:#}", gesture.as_str(), e),
                }
                state.annotations.reset();
                state.draw_mode = false;
                Action::Navigated(gesture)
            }
            Gesture::ZoomIn | Gesture::ZoomOut => {
                info!("{} (not implemented)", gesture.as_str());
                Action::Reserved(gesture)
            }
            Gesture::ToggleDraw => {
                state.draw_mode = !state.draw_mode;
                if state.draw_mode {
                    state.annotations.begin_stroke();
                }
                info!("draw mode {}", if state.draw_mode { "on" } else { "off" });
                Action::DrawMode(state.draw_mode)
            }
            Gesture::None => Action::Ignored,
        }
    }
}
