//! Popup placement around a resolved anchor.

use crate::config::SelectionConfig;
use crate::geometry::{Point, Rect};
use crate::measure::{Measure, Target};
use crate::position::{Position, PositionDir};
use crate::resolve::resolve_position;

/// Gap between the anchor and a popup opening downwards or to the right.
pub const POPUP_GAP_PX: f32 = 6.0;

/// Top-left corner for a `popup_width_px` x `popup_height_px` popup opening
/// from `position`, clamped `popup_padding_px` inside `bounding`.
///
/// The result is in the same space as the anchor (relative to `bounding`'s
/// top-left corner) and keeps the anchor's direction. A popup larger than the
/// padded bounding box cannot fit; that is not checked here.
pub fn popup_position(
    position: &Position,
    bounding: Rect,
    popup_width_px: f32,
    popup_height_px: f32,
    popup_padding_px: f32,
) -> Position {
    let anchor = position.point;
    let mut corner = match position.dir {
        Some(PositionDir::Up) => Point::new(
            anchor.x - popup_width_px / 2.0,
            anchor.y - popup_height_px,
        ),
        Some(PositionDir::Down) => Point::new(
            anchor.x - popup_width_px / 2.0,
            anchor.y + POPUP_GAP_PX,
        ),
        Some(PositionDir::Left) => Point::new(
            anchor.x - popup_width_px,
            anchor.y - popup_height_px / 2.0,
        ),
        Some(PositionDir::Right) => Point::new(
            anchor.x + POPUP_GAP_PX,
            anchor.y - popup_height_px / 2.0,
        ),
        None => Point::ZERO,
    };

    if corner.x < popup_padding_px {
        corner.x = popup_padding_px;
    }
    if corner.y < popup_padding_px {
        corner.y = popup_padding_px;
    }
    let max_x = bounding.width() - popup_padding_px - popup_width_px;
    if corner.x > max_x {
        corner.x = max_x;
    }
    let max_y = bounding.height() - popup_padding_px - popup_height_px;
    if corner.y > max_y {
        corner.y = max_y;
    }

    Position {
        point: corner,
        dir: position.dir,
    }
}

/// A resolved anchor together with the popup box placed from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopupPlacement {
    pub anchor: Position,
    pub popup: Position,
}

/// Resolve the anchor for `target` and place a popup sized by `config`.
///
/// Returns `None` when the anchor is degraded, so nothing should be drawn.
pub fn place_popup<M: Measure + ?Sized>(
    measure: &M,
    target: &Target<M::Span, M::Element>,
    bounding: Rect,
    config: &SelectionConfig,
) -> Option<PopupPlacement> {
    let anchor = resolve_position(
        measure,
        target,
        bounding,
        config.anchor_padding_px,
        config.vertical,
    );
    if anchor.is_degraded() {
        return None;
    }
    let popup = popup_position(
        &anchor,
        bounding,
        config.popup_width_px,
        config.popup_height_px,
        config.popup_padding_px,
    );
    Some(PopupPlacement { anchor, popup })
}
