/// Compact 3x5 bitmap font for HUD text.
/// Uppercase letters, digits and a little punctuation; lowercase is folded up.
use image::Rgb;

use crate::draw::put_pixel;
use crate::types::Frame;

pub fn draw_text_line(frame: &mut Frame, x: i32, y: i32, text: &str, color: Rgb<u8>, scale: usize) {
    let scale = scale.max(1) as i32;
    let mut cx = x;
    for c in text.chars() {
        draw_char(frame, cx, y, c, color, scale);
        cx += 4 * scale; // 3 wide + 1 spacing
    }
}

pub fn measure_text_width(text: &str, scale: usize) -> usize {
    text.chars().count() * 4 * scale.max(1)
}

/// Each row is 3 bits, bit 2 = leftmost column.
fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0x7, 0x5, 0x5, 0x5, 0x7],
        '1' => [0x2, 0x6, 0x2, 0x2, 0x7],
        '2' => [0x7, 0x1, 0x7, 0x4, 0x7],
        '3' => [0x7, 0x1, 0x7, 0x1, 0x7],
        '4' => [0x5, 0x5, 0x7, 0x1, 0x1],
        '5' => [0x7, 0x4, 0x7, 0x1, 0x7],
        '6' => [0x7, 0x4, 0x7, 0x5, 0x7],
        '7' => [0x7, 0x1, 0x2, 0x4, 0x4],
        '8' => [0x7, 0x5, 0x7, 0x5, 0x7],
        '9' => [0x7, 0x5, 0x7, 0x1, 0x7],
        'A' => [0x2, 0x5, 0x7, 0x5, 0x5],
        'B' => [0x6, 0x5, 0x6, 0x5, 0x6],
        'C' => [0x3, 0x4, 0x4, 0x4, 0x3],
        'D' => [0x6, 0x5, 0x5, 0x5, 0x6],
        'E' => [0x7, 0x4, 0x6, 0x4, 0x7],
        'F' => [0x7, 0x4, 0x6, 0x4, 0x4],
        'G' => [0x3, 0x4, 0x5, 0x5, 0x3],
        'H' => [0x5, 0x5, 0x7, 0x5, 0x5],
        'I' => [0x7, 0x2, 0x2, 0x2, 0x7],
        'J' => [0x1, 0x1, 0x1, 0x5, 0x2],
        'K' => [0x5, 0x5, 0x6, 0x5, 0x5],
        'L' => [0x4, 0x4, 0x4, 0x4, 0x7],
        'M' => [0x5, 0x7, 0x7, 0x5, 0x5],
        'N' => [0x6, 0x5, 0x5, 0x5, 0x5],
        'O' => [0x2, 0x5, 0x5, 0x5, 0x2],
        'P' => [0x6, 0x5, 0x6, 0x4, 0x4],
        'Q' => [0x2, 0x5, 0x5, 0x6, 0x3],
        'R' => [0x6, 0x5, 0x6, 0x5, 0x5],
        'S' => [0x3, 0x4, 0x2, 0x1, 0x6],
        'T' => [0x7, 0x2, 0x2, 0x2, 0x2],
        'U' => [0x5, 0x5, 0x5, 0x5, 0x7],
        'V' => [0x5, 0x5, 0x5, 0x5, 0x2],
        'W' => [0x5, 0x5, 0x7, 0x7, 0x5],
        'X' => [0x5, 0x5, 0x2, 0x5, 0x5],
        'Y' => [0x5, 0x5, 0x2, 0x2, 0x2],
        'Z' => [0x7, 0x1, 0x2, 0x4, 0x7],
        ':' => [0x0, 0x2, 0x0, 0x2, 0x0],
        '-' => [0x0, 0x0, 0x7, 0x0, 0x0],
        '.' => [0x0, 0x0, 0x0, 0x0, 0x2],
        '/' => [0x1, 0x1, 0x2, 0x4, 0x4],
        '[' => [0x6, 0x4, 0x4, 0x4, 0x6],
        ']' => [0x3, 0x1, 0x1, 0x1, 0x3],
        _ => [0x0; 5],
    }
}

fn draw_char(frame: &mut Frame, x: i32, y: i32, c: char, color: Rgb<u8>, scale: i32) {
    for (row, bits) in glyph(c).iter().enumerate() {
        for col in 0..3 {
            if bits & (0x4 >> col) == 0 {
                continue;
            }
            for sy in 0..scale {
                for sx in 0..scale {
                    put_pixel(
                        frame,
                        x + col * scale + sx,
                        y + row as i32 * scale + sy,
                        color,
                    );
                }
            }
        }
    }
}
