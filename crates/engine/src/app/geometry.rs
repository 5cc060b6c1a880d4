use std::ops::{Add, Sub};

/// World-space vector. World space is bottom-left origin, y up, one unit per framebuffer pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn rotated_about(self, pivot: Vec2, radians: f32) -> Vec2 {
        if radians == 0.0 {
            return self;
        }
        let (sin, cos) = radians.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Vec2 {
            x: pivot.x + dx * cos - dy * sin,
            y: pivot.y + dx * sin + dy * cos,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned rectangle stored as center + full size.
///
/// Sizes are expected to be positive; the scene builder rejects anything else before
/// a rect reaches collision code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn from_xywh(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(center_x, center_y), Vec2::new(width, height))
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.size.x * 0.5
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.size.x * 0.5
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.size.y * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.size.y * 0.5
    }

    pub fn has_positive_size(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }

    /// Closed-interval test: points on an edge count as inside.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }

    /// Closed-interval AABB intersection; touching edges overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.bottom() <= other.top()
            && other.bottom() <= self.top()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center = self.center + delta;
    }

    pub fn with_center(self, center: Vec2) -> Self {
        Self { center, ..self }
    }
}
