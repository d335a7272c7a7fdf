//! World ↔ screen transform and the input deltas that drive it.
//!
//! `screen = world * scale + offset`. Pan and wheel input is accumulated into
//! [`InputDeltas`] between frames and folded into the transform at the start
//! of the next render tick.

use crate::config::RenderConfig;
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub offset: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset.x,
            p.y * self.scale + self.offset.y,
        )
    }

    pub fn to_world(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset.x) / self.scale,
            (p.y - self.offset.y) / self.scale,
        )
    }

    pub fn rect_to_screen(&self, r: &Rect) -> Rect {
        Rect::from_min_max(self.to_screen(r.min), self.to_screen(r.max))
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Multiply the scale by `factor`, keeping the world point under
    /// `pointer` at the same screen position.
    pub fn zoom_at(&mut self, factor: f32, pointer: Point) {
        self.scale *= factor;
        self.offset.x = self.offset.x * factor + pointer.x * (1.0 - factor);
        self.offset.y = self.offset.y * factor + pointer.y * (1.0 - factor);
    }

    /// Transform that shows `target` centred in `viewport`, scaled to occupy
    /// `margin` of it along the tighter axis. `None` for degenerate input.
    pub fn fit(target: &Rect, viewport: &Rect, margin: f32) -> Option<Self> {
        let (tw, th) = (target.width(), target.height());
        let (vw, vh) = (viewport.width(), viewport.height());
        if tw <= 0.0 || th <= 0.0 || vw <= 0.0 || vh <= 0.0 {
            return None;
        }
        let scale = (vw / tw).min(vh / th) * margin;
        let vc = viewport.center();
        let tc = target.center();
        Some(Self {
            scale,
            offset: Point::new(vc.x - tc.x * scale, vc.y - tc.y * scale),
        })
    }
}

/// Input accumulated since the last render tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputDeltas {
    pub pan_x: f32,
    pub pan_y: f32,
    /// Total wheel notches received, positive zooms in.
    pub wheel_total: f32,
    /// Portion of `wheel_total` already folded into the transform.
    pub wheel_applied: f32,
    /// Screen position the zoom is anchored at.
    pub pointer: Point,
}

impl InputDeltas {
    pub fn add_pan(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn add_wheel(&mut self, notches: f32, pointer: Point) {
        self.wheel_total += notches;
        self.pointer = pointer;
    }

    pub fn is_pending(&self) -> bool {
        self.pan_x != 0.0 || self.pan_y != 0.0 || self.wheel_total != self.wheel_applied
    }

    /// Fold pending input into `t` and reset the pan accumulator.
    pub fn apply(&mut self, t: &mut ViewTransform, cfg: &RenderConfig) {
        t.pan(self.pan_x, self.pan_y);
        self.pan_x = 0.0;
        self.pan_y = 0.0;

        let unapplied = self.wheel_total - self.wheel_applied;
        self.wheel_applied = self.wheel_total;
        if unapplied != 0.0 {
            let factor = cfg.zoom_step.powf(unapplied);
            let target = (t.scale * factor).clamp(cfg.min_scale, cfg.max_scale);
            let factor = target / t.scale;
            if factor.is_finite() && factor > 0.0 {
                t.zoom_at(factor, self.pointer);
            }
        }
    }
}
