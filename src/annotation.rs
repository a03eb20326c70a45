//! Freehand annotation strokes drawn over the live feed.
//!
//! The set always holds at least one stroke. `cursor` names the stroke that
//! receives new points; with no cursor, points are dropped.

use image::Rgb;

use crate::draw::{draw_thick_line, parse_hex};
use crate::types::{Frame, Point};

/// One continuous pen path; consecutive points are joined by segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgb<u8>,
    pub thickness: u32,
}

impl StrokeStyle {
    pub fn from_config(config: &crate::config::AnnotationConfig) -> Self {
        Self {
            color: parse_hex(&config.color_hex),
            thickness: config.thickness.max(1),
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Rgb([200, 0, 0]),
            thickness: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSet {
    strokes: Vec<Stroke>,
    cursor: Option<usize>,
}

impl Default for AnnotationSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self {
            strokes: vec![Stroke::default()],
            cursor: None,
        }
    }

    /// Back to a single empty placeholder stroke with no cursor.
    pub fn reset(&mut self) {
        self.strokes.clear();
        self.strokes.push(Stroke::default());
        self.cursor = None;
    }

    pub fn begin_stroke(&mut self) {
        self.strokes.push(Stroke::default());
        self.cursor = Some(self.strokes.len() - 1);
    }

    /// Returns whether the point was recorded.
    pub fn append_point(&mut self, p: Point) -> bool {
        match self.cursor.and_then(|i| self.strokes.get_mut(i)) {
            Some(stroke) => {
                stroke.points.push(p);
                true
            }
            None => false,
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Stroke> {
        self.cursor.and_then(|i| self.strokes.get(i))
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|s| s.points.len()).sum()
    }

    /// Draw every stroke onto `frame`. Does not touch the set.
    pub fn render(&self, frame: &mut Frame, style: &StrokeStyle) {
        for stroke in &self.strokes {
            for pair in stroke.points.windows(2) {
                draw_thick_line(frame, pair[0], pair[1], style.thickness, style.color);
            }
        }
    }
}
