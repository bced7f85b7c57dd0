#![forbid(unsafe_code)]

//! Integer rectangles in cell units.

use serde::{Deserialize, Serialize};

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Parse `WxH` (also accepts `W,H`), e.g. `80x24`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (w, h) = value.trim().split_once(['x', 'X', ','])?;
        Some(Self::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
    }
}

/// An axis-aligned rectangle. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    #[inline]
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Exclusive right edge (saturating).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge (saturating).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether `other` lies entirely inside `self`.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_saturate() {
        let r = Rect::new(u16::MAX - 1, 3, 10, 4);
        assert_eq!(r.right(), u16::MAX);
        assert_eq!(r.bottom(), 7);
    }

    #[test]
    fn empty_when_either_axis_is_zero() {
        assert!(Rect::new(1, 1, 0, 5).is_empty());
        assert!(Rect::new(1, 1, 5, 0).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn contains_rect_is_inclusive_of_edges() {
        let outer = Rect::new(10, 10, 20, 10);
        assert!(outer.contains_rect(&outer));
        assert!(outer.contains_rect(&Rect::new(15, 12, 15, 8)));
        assert!(!outer.contains_rect(&Rect::new(15, 12, 16, 8)));
        assert!(!outer.contains_rect(&Rect::new(9, 12, 2, 2)));
    }

    #[test]
    fn size_parse_accepts_common_forms() {
        assert_eq!(Size::parse("80x24"), Some(Size::new(80, 24)));
        assert_eq!(Size::parse(" 120X40 "), Some(Size::new(120, 40)));
        assert_eq!(Size::parse("10,5"), Some(Size::new(10, 5)));
        assert_eq!(Size::parse("80"), None);
        assert_eq!(Size::parse("ax3"), None);
        assert_eq!(Size::parse("70000x1"), None);
    }

    #[test]
    fn rect_serializes_as_plain_fields() {
        let json = serde_json::to_string(&Rect::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"width":3,"height":4}"#);
    }
}
