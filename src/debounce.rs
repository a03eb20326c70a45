use crate::types::Gesture;

/// Suppresses re-triggering for a fixed number of frames after a gesture fires.
///
/// Usage per frame: `should_fire` → (`arm` if it fired) → `tick`.
#[derive(Debug, Clone)]
pub struct DebounceGate {
    active: bool,
    frames_since_trigger: u32,
    cooldown_frames: u32,
}

impl DebounceGate {
    pub fn new(cooldown_frames: u32) -> Self {
        Self {
            active: false,
            frames_since_trigger: 0,
            cooldown_frames,
        }
    }

    pub fn should_fire(&self, gesture: Gesture) -> bool {
        gesture != Gesture::None && !self.active
    }

    pub fn arm(&mut self) {
        self.active = true;
        self.frames_since_trigger = 0;
    }

    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        self.frames_since_trigger += 1;
        if self.frames_since_trigger > self.cooldown_frames {
            self.active = false;
            self.frames_since_trigger = 0;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Frames left before the gate reopens (0 when idle).
    pub fn remaining(&self) -> u32 {
        if self.active {
            self.cooldown_frames.saturating_add(1).saturating_sub(self.frames_since_trigger)
        } else {
            0
        }
    }

    pub fn cooldown_frames(&self) -> u32 {
        self.cooldown_frames
    }
}
