// File: crates/bento-core/src/types.rs
// Summary: Shared geometry types and constants (sizes, margins, points, rects).

/// Default widget height in pixels when the caller supplies none.
pub const DEFAULT_HEIGHT: f32 = 300.0;
/// Width assumed before a container has been measured.
pub const DEFAULT_WIDTH: f32 = 600.0;
/// Smallest width a widget is ever laid out at.
pub const MIN_WIDTH: f32 = 320.0;

/// Plot margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }
    /// Total horizontal margin (left + right).
    pub fn hsum(&self) -> f32 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub fn vsum(&self) -> f32 { self.top + self.bottom }

    /// Inner plot extent for an outer size, never negative.
    pub fn inner(&self, size: Size) -> Size {
        Size::new((size.width - self.hsum()).max(0.0), (size.height - self.vsum()).max(0.0))
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(20.0, 20.0, 30.0, 50.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self { Self { width, height } }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }

    pub fn offset(self, dx: f32, dy: f32) -> Self { Self::new(self.x + dx, self.y + dy) }

    pub fn distance(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
    pub fn right(&self) -> f32 { self.x + self.width }
    pub fn bottom(&self) -> f32 { self.y + self.height }
    pub fn center(&self) -> Point { Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0) }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::from_xywh(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_inner_never_negative() {
        let m = Margin::default();
        assert_eq!(m.inner(Size::new(600.0, 300.0)), Size::new(530.0, 250.0));
        assert_eq!(m.inner(Size::new(10.0, 10.0)), Size::new(0.0, 0.0));
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::from_xywh(10.0, 10.0, 5.0, 5.0);
        assert!(r.contains(Point::new(10.0, 15.0)));
        assert!(!r.contains(Point::new(9.9, 12.0)));
        assert_eq!(r.center(), Point::new(12.5, 12.5));
    }
}
