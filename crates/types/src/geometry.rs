use serde::{Deserialize, Serialize};

const EPSILON: f32 = 0.001;

/// An axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PartialEq for Rect {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.width - other.width).abs() < EPSILON
            && (self.height - other.height).abs() < EPSILON
    }
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Moves the rectangle by the given offset.
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }
    }

    /// Multiplies position and size by independent horizontal and vertical factors.
    pub fn scale(self, sx: f32, sy: f32) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
            width: self.width * sx,
            height: self.height * sy,
        }
    }

    /// Clamps this rectangle so it lies entirely inside `bounds`.
    ///
    /// A rectangle that lies completely outside collapses to a zero-sized
    /// rectangle on the nearest edge of `bounds`.
    pub fn clip_to(self, bounds: Rect) -> Self {
        let left = self.x.clamp(bounds.x, bounds.right());
        let top = self.y.clamp(bounds.y, bounds.bottom());
        let right = self.right().clamp(left, bounds.right());
        let bottom = self.bottom().clamp(top, bounds.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }

    /// True when the interiors of the two rectangles overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() - EPSILON
            && other.x < self.right() - EPSILON
            && self.y < other.bottom() - EPSILON
            && other.y < self.bottom() - EPSILON
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// The largest size with this size's aspect ratio that fits inside `bounds`.
    pub fn fit_within(self, bounds: Size) -> Size {
        if !self.is_positive() || !bounds.is_positive() {
            return Size::zero();
        }
        let scale = (bounds.width / self.width).min(bounds.height / self.height);
        Size::new(self.width * scale, self.height * scale)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
