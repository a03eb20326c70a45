use anyhow::Result;
use minifb::{Key, KeyRepeat};

use crate::types::Frame;

/// Where finished frames go, plus the per-frame quit poll.
pub trait FrameSink {
    fn present(&mut self, frame: &Frame) -> Result<()>;
    /// Non-blocking. True once the user asked to stop or closed the window.
    fn quit_requested(&mut self) -> bool;
    /// Called instead of `present` when there is no frame, so window events keep flowing.
    fn idle(&mut self) {}
}

pub struct WindowOutput {
    window: minifb::Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    quit_key: Key,
}

impl WindowOutput {
    pub fn new(title: &str, width: usize, height: usize, quit_key: char) -> Result<Self> {
        let mut window = minifb::Window::new(
            title,
            width,
            height,
            minifb::WindowOptions {
                resize: true,
                ..minifb::WindowOptions::default()
            },
        )
        .map_err(|e| anyhow::anyhow!("Failed to create window: {}", e))?;

        window.set_target_fps(60);

        Ok(Self {
            window,
            buffer: vec![0; width * height],
            width,
            height,
            quit_key: key_from_char(quit_key).unwrap_or(Key::Q),
        })
    }
}

impl FrameSink for WindowOutput {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        let target_w = frame.width() as usize;
        let target_h = frame.height() as usize;
        if target_w != self.width || target_h != self.height {
            self.width = target_w;
            self.height = target_h;
        }
        if self.buffer.len() != self.width * self.height {
            self.buffer.resize(self.width * self.height, 0);
        }

        // RGB8 -> 0x00RRGGBB
        for (dst, pixel) in self.buffer.iter_mut().zip(frame.pixels()) {
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            *dst = (r << 16) | (g << 8) | b;
        }

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| anyhow::anyhow!("Window update failed: {}", e))
    }

    fn idle(&mut self) {
        self.window.update();
    }

    fn quit_requested(&mut self) -> bool {
        if !self.window.is_open() {
            return true;
        }
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .any(|k| k == self.quit_key || k == Key::Escape)
    }
}

/// Letter or digit → minifb key.
pub fn key_from_char(c: char) -> Option<Key> {
    let key = match c.to_ascii_lowercase() {
        'a' => Key::A,
        'b' => Key::B,
        'c' => Key::C,
        'd' => Key::D,
        'e' => Key::E,
        'f' => Key::F,
        'g' => Key::G,
        'h' => Key::H,
        'i' => Key::I,
        'j' => Key::J,
        'k' => Key::K,
        'l' => Key::L,
        'm' => Key::M,
        'n' => Key::N,
        'o' => Key::O,
        'p' => Key::P,
        'q' => Key::Q,
        'r' => Key::R,
        's' => Key::S,
        't' => Key::T,
        'u' => Key::U,
        'v' => Key::V,
        'w' => Key::W,
        'x' => Key::X,
        'y' => Key::Y,
        'z' => Key::Z,
        '0' => Key::Key0,
        '1' => Key::Key1,
        '2' => Key::Key2,
        '3' => Key::Key3,
        '4' => Key::Key4,
        '5' => Key::Key5,
        '6' => Key::Key6,
        '7' => Key::Key7,
        '8' => Key::Key8,
        '9' => Key::Key9,
        _ => return None,
    };
    Some(key)
}
