//! Anchor positions handed to the popup layer.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Side of the anchor point a popup opens towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionDir {
    Up,
    Down,
    Left,
    Right,
}

/// An anchor point plus the preferred opening direction.
///
/// A position with no direction, or sitting at the origin, is degraded: no
/// usable on-screen anchor was found and the caller should not render a
/// popup for it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub point: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PositionDir>,
}

impl Position {
    pub const fn new(point: Point, dir: PositionDir) -> Self {
        Self {
            point,
            dir: Some(dir),
        }
    }

    /// Zero point, no direction.
    pub const fn degraded() -> Self {
        Self {
            point: Point::ZERO,
            dir: None,
        }
    }

    /// Zero point that keeps the direction the resolver chose.
    pub const fn degraded_towards(dir: PositionDir) -> Self {
        Self {
            point: Point::ZERO,
            dir: Some(dir),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.dir.is_none() || self.point == Point::ZERO
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_like_the_popup_layer_expects() {
        let position = Position::new(Point::new(12.0, 30.5), PositionDir::Up);
        let json = serde_json::to_string(&position).unwrap();
        assert_eq!(json, r#"{"point":{"x":12.0,"y":30.5},"dir":"up"}"#);

        let degraded = serde_json::to_string(&Position::degraded()).unwrap();
        assert_eq!(degraded, r#"{"point":{"x":0.0,"y":0.0}}"#);
    }

    #[test]
    fn degraded_shapes() {
        assert!(Position::degraded().is_degraded());
        assert!(Position::degraded_towards(PositionDir::Left).is_degraded());
        assert!(!Position::new(Point::new(1.0, 1.0), PositionDir::Down).is_degraded());
    }
}
