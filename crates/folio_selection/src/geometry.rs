//! Coordinate types and the mapping from an embedded surface into the outer
//! viewport.

use folio_css::{Padding, ScaleFactors};
use serde::{Deserialize, Serialize};

/// A point in the outer container's local space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in some coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Box from an origin and a size, the way client rects are usually
    /// reported.
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(y, x + width, y + height, x)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Shrink each edge inward by the matching padding.
    #[must_use]
    pub fn inset(&self, padding: Padding) -> Self {
        Self::new(
            self.top + padding.top,
            self.right - padding.right,
            self.bottom - padding.bottom,
            self.left + padding.left,
        )
    }

    /// Smallest box covering both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
            self.left.min(other.left),
        )
    }

    pub(crate) fn horizontal_mid(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub(crate) fn vertical_mid(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }
}

/// Offset of an embedded rendering surface relative to the outer viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub top: f32,
    pub left: f32,
}

impl Frame {
    pub const ORIGIN: Self = Self {
        top: 0.0,
        left: 0.0,
    };

    pub const fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }
}

/// An embedding surface as the resolver sees it: where it sits and how it is
/// scaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingSurface {
    pub frame: Frame,
    pub scale: ScaleFactors,
}

/// Size of the outer window, used for the on-screen test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Strictly inside the viewport: points on an edge are off-screen.
    pub fn contains(&self, point: Point) -> bool {
        point.x > 0.0 && point.y > 0.0 && point.x < self.width && point.y < self.height
    }
}

/// Map a rect measured inside an embedded surface into outer-viewport space.
///
/// Scale is relative to the surface's own origin, so it is applied before the
/// frame offset.
pub fn frame_rect(frame: Frame, rect: Rect, scale: ScaleFactors) -> Rect {
    Rect::new(
        scale.sy * rect.top + frame.top,
        scale.sx * rect.right + frame.left,
        scale.sy * rect.bottom + frame.top,
        scale.sx * rect.left + frame.left,
    )
}

/// Clamp a point into `[padding, right - padding] x [padding, bottom - padding]`.
pub(crate) fn constrain_point(point: Point, rect: Rect, padding: f32) -> Point {
    Point::new(
        padding.max(point.x.min(rect.right - padding)),
        padding.max(point.y.min(rect.bottom - padding)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_applied_before_translation() {
        let mapped = frame_rect(
            Frame::new(100.0, 50.0),
            Rect::new(20.0, 30.0, 40.0, 10.0),
            ScaleFactors::new(2.0, 0.5),
        );
        assert_eq!(mapped, Rect::new(110.0, 110.0, 120.0, 70.0));
    }

    #[test]
    fn viewport_edges_are_off_screen() {
        let viewport = Viewport::new(800.0, 600.0);
        assert!(viewport.contains(Point::new(1.0, 1.0)));
        assert!(!viewport.contains(Point::ZERO));
        assert!(!viewport.contains(Point::new(800.0, 300.0)));
        assert!(!viewport.contains(Point::new(400.0, 600.0)));
    }

    #[test]
    fn constrain_keeps_padding_from_edges() {
        let rect = Rect::new(0.0, 500.0, 400.0, 0.0);
        assert_eq!(
            constrain_point(Point::new(-20.0, 900.0), rect, 8.0),
            Point::new(8.0, 392.0)
        );
        assert_eq!(
            constrain_point(Point::new(250.0, 100.0), rect, 8.0),
            Point::new(250.0, 100.0)
        );
    }

    #[test]
    fn inset_and_union() {
        let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect, Rect::new(20.0, 110.0, 70.0, 10.0));
        assert_eq!(
            rect.inset(Padding::new(1.0, 2.0, 3.0, 4.0)),
            Rect::new(21.0, 108.0, 67.0, 14.0)
        );
        let other = Rect::from_xywh(0.0, 60.0, 20.0, 20.0);
        assert_eq!(rect.union(&other), Rect::new(20.0, 110.0, 80.0, 0.0));
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
    }
}
