#![cfg(feature = "egui")]

use eframe::egui::{self, Align2, Color32, Pos2, Stroke, StrokeKind};

use crate::geometry::{Circle, Point, Rect, Segment};
use crate::render::{Canvas, Rgb, Style};

pub fn to_pos2(p: Point) -> Pos2 {
    Pos2::new(p.x, p.y)
}

pub fn to_egui_rect(r: Rect) -> egui::Rect {
    egui::Rect::from_min_max(to_pos2(r.min), to_pos2(r.max))
}

pub fn to_color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

fn stroke(style: &Style) -> Stroke {
    Stroke::new(style.width, to_color32(style.stroke))
}

/// [`Canvas`] backed by an egui painter. Coordinates are egui screen points.
pub struct EguiCanvas<'a> {
    painter: &'a egui::Painter,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(painter: &'a egui::Painter) -> Self {
        Self { painter }
    }
}

impl Canvas for EguiCanvas<'_> {
    fn rect(&mut self, rect: Rect, style: &Style) {
        let fill = style.fill.map(to_color32).unwrap_or(Color32::TRANSPARENT);
        self.painter
            .rect(to_egui_rect(rect), 0.0, fill, stroke(style), StrokeKind::Inside);
    }

    fn line(&mut self, segment: Segment, style: &Style) {
        self.painter
            .line_segment([to_pos2(segment.a), to_pos2(segment.b)], stroke(style));
    }

    fn circle(&mut self, circle: Circle, style: &Style) {
        let fill = style.fill.map(to_color32).unwrap_or(Color32::TRANSPARENT);
        self.painter
            .circle(to_pos2(circle.center), circle.radius, fill, stroke(style));
    }

    fn text(&mut self, pos: Point, text: &str, font_size: f32, style: &Style) {
        // egui panics on non-positive font sizes.
        if !(font_size > 0.0) || text.is_empty() {
            return;
        }
        self.painter.text(
            to_pos2(pos),
            Align2::LEFT_TOP,
            text,
            egui::FontId::proportional(font_size),
            to_color32(style.stroke),
        );
    }
}
