// Software raster primitives on RGB frames.
// Everything clips silently at the frame edge.

use image::Rgb;
use tracing::warn;

use crate::types::{Frame, Point};

const FALLBACK: Rgb<u8> = Rgb([255, 0, 0]);

/// Parse `#RRGGBB`; anything else falls back to red.
pub fn parse_hex(hex: &str) -> Rgb<u8> {
    match try_parse_hex(hex) {
        Some(color) => color,
        None => {
            warn!("Invalid colour {:?}, using red", hex);
            FALLBACK
        }
    }
}

fn try_parse_hex(hex: &str) -> Option<Rgb<u8>> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

#[inline]
pub fn put_pixel(frame: &mut Frame, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 || x >= frame.width() as i32 || y >= frame.height() as i32 {
        return;
    }
    frame.put_pixel(x as u32, y as u32, color);
}

/// Filled circle; radius 0 is a single pixel.
pub fn fill_disc(frame: &mut Frame, cx: i32, cy: i32, radius: i32, color: Rgb<u8>) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put_pixel(frame, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Bresenham walk from `a` to `b`, stamping a disc of `thickness / 2` at every step.
pub fn draw_thick_line(frame: &mut Frame, a: Point, b: Point, thickness: u32, color: Rgb<u8>) {
    let radius = (thickness / 2) as i32;
    let (mut x0, mut y0) = (a.x, a.y);
    let dx = (b.x - x0).abs();
    let sx = if x0 < b.x { 1 } else { -1 };
    let dy = -(b.y - y0).abs();
    let sy = if y0 < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        fill_disc(frame, x0, y0, radius, color);
        if x0 == b.x && y0 == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

pub fn draw_hline(frame: &mut Frame, y: i32, thickness: u32, color: Rgb<u8>) {
    let half = (thickness / 2) as i32;
    for py in (y - half)..=(y + half) {
        for px in 0..frame.width() as i32 {
            put_pixel(frame, px, py, color);
        }
    }
}
