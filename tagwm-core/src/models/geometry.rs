use serde::{Deserialize, Serialize};

/// A rectangle in root-window coordinates. Widths and heights are kept
/// signed so geometry math never needs casts mid-expression.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Area of the overlap between two rectangles, 0 when disjoint.
    /// This is the tie-breaker used to decide which monitor a window
    /// "mostly" lives on.
    pub fn intersect_area(&self, other: &Rect) -> i32 {
        let horiz = 0.max(self.right().min(other.right()) - self.x.max(other.x));
        let vert = 0.max(self.bottom().min(other.bottom()) - self.y.max(other.y));
        horiz * vert
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_rects_have_no_overlap() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(100, 0, 100, 100);
        assert_eq!(a.intersect_area(&b), 0);
    }

    #[test]
    fn overlap_area_is_symmetric() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);
        assert_eq!(a.intersect_area(&b), 2500);
        assert_eq!(b.intersect_area(&a), 2500);
    }

    #[test]
    fn contains_point_excludes_far_edges() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains_point(10, 10));
        assert!(r.contains_point(29, 29));
        assert!(!r.contains_point(30, 30));
    }
}
