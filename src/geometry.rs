use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page-relative inches
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Positive, finite extent
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// True when the interiors overlap; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_area() {
        let rect = Rect::new(6.1, 0.0, 5.9, 12.0);
        assert!((rect.right() - 12.0).abs() < 1e-9);
        assert_eq!(rect.bottom(), 12.0);
        assert!((rect.area() - 70.8).abs() < 1e-9);
    }

    #[test]
    fn test_rect_validity() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, 1.0, -2.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, f64::NAN, 1.0).is_valid());
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 5.9, 5.9);
        let b = Rect::new(6.1, 0.0, 5.9, 5.9);
        let c = Rect::new(5.0, 5.0, 2.0, 2.0);
        let touching = Rect::new(5.9, 0.0, 1.0, 1.0);

        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(b.intersects(&c));
        assert!(!a.intersects(&touching));
    }

    #[test]
    fn test_rect_translate() {
        let moved = Rect::new(1.0, 2.0, 3.0, 4.0).translate(-0.5, 1.0);
        assert_eq!(moved, Rect::new(0.5, 3.0, 3.0, 4.0));
    }
}
