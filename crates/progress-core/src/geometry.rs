// File: crates/progress-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math and aspect-preserving viewport fitting.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }

    pub fn distance_sq(&self, other: PointF) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    /// Inclusive on all edges.
    pub fn contains(&self, p: PointF) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Fits a logical canvas into a surface, preserving aspect ratio and centring the result
/// (the `xMidYMid meet` rule). Surface areas outside the fitted rectangle are letterbox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub logical_width: f32,
    pub logical_height: f32,
}

impl Viewport {
    pub fn fit(surface_width: f32, surface_height: f32, logical_width: f32, logical_height: f32) -> Self {
        let lw = logical_width.max(1.0);
        let lh = logical_height.max(1.0);
        let scale = (surface_width / lw).min(surface_height / lh).max(1e-6);
        Self {
            scale,
            offset_x: (surface_width - lw * scale) * 0.5,
            offset_y: (surface_height - lh * scale) * 0.5,
            logical_width: lw,
            logical_height: lh,
        }
    }

    /// Map a surface pixel to logical coordinates; `None` when it falls outside the rendered chart.
    pub fn to_logical(&self, px: f32, py: f32) -> Option<PointF> {
        let p = PointF::new((px - self.offset_x) / self.scale, (py - self.offset_y) / self.scale);
        RectF::from_ltwh(0.0, 0.0, self.logical_width, self.logical_height)
            .contains(p)
            .then_some(p)
    }
}
