// Everything drawn on top of the frame besides the annotation strokes:
// hand landmarks, the gesture gate line and the status HUD.

use image::Rgb;

use crate::config::UiConfig;
use crate::draw::{draw_hline, fill_disc};
use crate::font::draw_text_line;
use crate::session::SessionState;
use crate::types::{Frame, HandObservation};

const LANDMARK_COLOR: Rgb<u8> = Rgb([255, 0, 255]);
const GATE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const HUD_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const HUD_ACTIVE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const HUD_MUTED_COLOR: Rgb<u8> = Rgb([150, 150, 150]);

pub fn draw_landmarks(frame: &mut Frame, hand: &HandObservation) {
    for p in &hand.landmarks {
        fill_disc(frame, p.x, p.y, 3, LANDMARK_COLOR);
    }
    fill_disc(frame, hand.center.x, hand.center.y, 5, GATE_COLOR);
}

pub fn draw_gate_line(frame: &mut Frame, threshold_y: i32) {
    draw_hline(frame, threshold_y, 2, GATE_COLOR);
}

/// HUD lines as (text, color), top to bottom.
pub fn hud_lines(state: &SessionState, hand: Option<&HandObservation>) -> Vec<(String, Rgb<u8>)> {
    let mut lines = Vec::new();

    let (draw_text, draw_color) = if state.draw_mode {
        ("DRAW [ON]", HUD_ACTIVE_COLOR)
    } else {
        ("DRAW [OFF]", HUD_COLOR)
    };
    lines.push((draw_text.to_string(), draw_color));

    match state.last_fired {
        Some(g) => lines.push((format!("LAST: {}", g.as_str()), HUD_COLOR)),
        None => lines.push(("LAST: -".to_string(), HUD_MUTED_COLOR)),
    }

    if state.debounce.is_active() {
        lines.push((format!("WAIT: {}", state.debounce.remaining()), HUD_MUTED_COLOR));
    }

    match hand {
        Some(h) => lines.push((format!("HAND: {}", h.fingers), HUD_COLOR)),
        None => lines.push(("HAND: ----".to_string(), HUD_MUTED_COLOR)),
    }

    lines
}

pub fn draw_hud(frame: &mut Frame, state: &SessionState, hand: Option<&HandObservation>, scale: usize) {
    let line_height = (7 * scale.max(1)) as i32;
    let mut y = 10;
    for (text, color) in hud_lines(state, hand) {
        draw_text_line(frame, 10, y, &text, color, scale);
        y += line_height;
    }
}

/// All non-annotation overlays, gated by the UI switches.
pub fn draw_overlays(
    frame: &mut Frame,
    ui: &UiConfig,
    threshold_y: i32,
    state: &SessionState,
    hand: Option<&HandObservation>,
) {
    if ui.show_threshold {
        draw_gate_line(frame, threshold_y);
    }
    if ui.show_landmarks {
        if let Some(h) = hand {
            draw_landmarks(frame, h);
        }
    }
    if ui.show_hud {
        draw_hud(frame, state, hand, ui.hud_scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Gesture;

    #[test]
    fn test_hud_reflects_state() {
        let mut state = SessionState::new(30);
        let lines = hud_lines(&state, None);
        assert_eq!(lines[0].0, "DRAW [OFF]");
        assert_eq!(lines[1].0, "LAST: -");
        assert_eq!(lines.len(), 3);

        state.draw_mode = true;
        state.last_fired = Some(Gesture::ToggleDraw);
        state.debounce.arm();
        let lines = hud_lines(&state, None);
        assert_eq!(lines[0], ("DRAW [ON]".to_string(), HUD_ACTIVE_COLOR));
        assert_eq!(lines[1].0, "LAST: draw mode");
        assert_eq!(lines[2].0, "WAIT: 31");
    }

    #[test]
    fn test_gate_line_drawn_at_threshold() {
        let mut frame = Frame::new(20, 20);
        draw_gate_line(&mut frame, 10);
        assert_eq!(*frame.get_pixel(0, 10), GATE_COLOR);
        assert_eq!(*frame.get_pixel(19, 11), GATE_COLOR);
        assert_eq!(*frame.get_pixel(0, 15), Rgb([0, 0, 0]));
    }
}
