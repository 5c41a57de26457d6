//! Selection geometry for the folio reader.
//!
//! Given a text selection or element, possibly inside a scaled and offset
//! iframe holding paginated book content, this crate works out where a
//! selection popup should anchor ([`resolve_position`]), where the popup box
//! goes once clamped into its container ([`popup_position`]), and, through
//! [`DomMeasure`] and [`text_selection`], what text the selection covers.
//!
//! All reads of live geometry go through the [`Measure`] trait, so the
//! coordinate math runs the same against a browser bridge or a DOM snapshot.

pub mod config;
pub mod dom;
pub mod geometry;
pub mod measure;
pub mod popup;
pub mod position;
pub mod resolve;
pub mod selection;

pub use config::SelectionConfig;
pub use dom::{DomMeasure, text_selection};
pub use folio_css::{Padding, ScaleFactors};
pub use geometry::{EmbeddingSurface, Frame, Point, Rect, Viewport, frame_rect};
pub use measure::{Measure, Target};
pub use popup::{POPUP_GAP_PX, PopupPlacement, place_popup, popup_position};
pub use position::{Position, PositionDir};
pub use resolve::{ANCHOR_GAP_PX, ANCHOR_LIFT_PX, resolve_position};
pub use selection::TextSelection;
