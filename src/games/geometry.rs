//! Collision primitives shared by the engines.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in logical pixels, origin top-left, y growing down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict interior test: a point on an edge is outside.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// Strict overlap: boxes that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Bounded probe-and-accept.
///
/// Draws up to `cap` candidates from `generate` and returns the first one
/// `acceptable` approves. When the budget runs out the last candidate is
/// returned anyway, so this never fails. `cap` is treated as at least 1.
pub fn probe_and_accept<T>(
    cap: usize,
    mut generate: impl FnMut() -> T,
    mut acceptable: impl FnMut(&T) -> bool,
) -> (T, usize) {
    let mut attempts = 1;
    let mut candidate = generate();
    while attempts < cap && !acceptable(&candidate) {
        candidate = generate();
        attempts += 1;
    }
    (candidate, attempts)
}
