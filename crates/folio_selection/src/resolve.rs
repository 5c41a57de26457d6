//! Anchor resolution: where a selection popup should point.

use crate::geometry::{EmbeddingSurface, Point, Rect, Viewport, constrain_point, frame_rect};
use crate::measure::{Measure, Target};
use crate::position::{Position, PositionDir};
use folio_css::Padding;

/// Gap between the selection and a side or bottom anchor.
pub const ANCHOR_GAP_PX: f32 = 6.0;

/// Gap between the selection and an anchor above it; leaves room for the
/// popup's pointer triangle.
pub const ANCHOR_LIFT_PX: f32 = 12.0;

/// Resolve the anchor for a popup attached to `target`.
///
/// The returned point is relative to `bounding`'s top-left corner. In
/// vertical writing mode the anchor sits beside the first fragment on the
/// roomier side and is clamped `padding_px` inside `bounding`; otherwise it
/// sits above the first fragment or below the last, preferring above.
///
/// Never fails: a target with no boxes, or whose anchor lands off-screen,
/// yields a degraded position (see [`Position::is_degraded`]).
pub fn resolve_position<M: Measure + ?Sized>(
    measure: &M,
    target: &Target<M::Span, M::Element>,
    bounding: Rect,
    padding_px: f32,
    vertical: bool,
) -> Position {
    let surface = measure.embedding_surface(target).unwrap_or_else(|| {
        log::trace!(target: "folio_selection", "target is not embedded, using the outer viewport");
        EmbeddingSurface::default()
    });
    let padding = match target {
        Target::Element(element) => measure.padding(element),
        Target::Span(_) => Padding::ZERO,
    };
    let rects = measure.client_rects(target);
    let (Some(first), Some(last)) = (rects.first(), rects.last()) else {
        log::debug!(target: "folio_selection", "target has no client rects, degrading anchor");
        return Position::degraded();
    };
    let first = frame_rect(surface.frame, first.inset(padding), surface.scale);
    let last = frame_rect(surface.frame, last.inset(padding), surface.scale);
    let viewport = measure.viewport();

    if vertical {
        resolve_beside(first, bounding, padding_px, viewport)
    } else {
        resolve_above_or_below(first, last, bounding, viewport)
    }
}

/// Vertical writing mode: anchor to the left or right of the first fragment.
fn resolve_beside(first: Rect, bounding: Rect, padding_px: f32, viewport: Viewport) -> Position {
    let left_space = first.left - bounding.left;
    let right_space = bounding.right - first.right;
    // Strict comparison: equal room opens to the right.
    let dir = if left_space > right_space {
        PositionDir::Left
    } else {
        PositionDir::Right
    };
    let x = match dir {
        PositionDir::Left => first.left - bounding.left - ANCHOR_GAP_PX,
        PositionDir::Right | PositionDir::Up | PositionDir::Down => {
            first.right - bounding.left + ANCHOR_GAP_PX
        }
    };
    let y = first.vertical_mid() - bounding.top;
    let point = constrain_point(Point::new(x, y), bounding, padding_px);
    if viewport.contains(point) {
        Position::new(point, dir)
    } else {
        log::debug!(target: "folio_selection", "side anchor {point:?} is off-screen");
        Position::degraded_towards(dir)
    }
}

/// Horizontal writing mode: above the first fragment or below the last.
fn resolve_above_or_below(first: Rect, last: Rect, bounding: Rect, viewport: Viewport) -> Position {
    let start = Position::new(
        Point::new(
            first.horizontal_mid() - bounding.left,
            first.top - bounding.top - ANCHOR_LIFT_PX,
        ),
        PositionDir::Up,
    );
    let end = Position::new(
        Point::new(
            last.horizontal_mid() - bounding.left,
            last.bottom - bounding.top + ANCHOR_GAP_PX,
        ),
        PositionDir::Down,
    );
    match (viewport.contains(start.point), viewport.contains(end.point)) {
        (true, _) => start,
        (false, true) => end,
        (false, false) => {
            log::debug!(
                target: "folio_selection",
                "neither {:?} nor {:?} is on-screen",
                start.point,
                end.point
            );
            Position::degraded()
        }
    }
}
