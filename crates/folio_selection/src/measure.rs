//! The measurement capability the resolver reads live geometry through.

use crate::geometry::{EmbeddingSurface, Rect, Viewport};
use folio_css::Padding;

/// What a popup is anchored to: a span of content or a single element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target<S, E> {
    Span(S),
    Element(E),
}

/// Access to rendered geometry and computed style.
///
/// Implementations report boxes in the coordinate space of the document the
/// target lives in; the resolver maps them out of any embedding surface.
pub trait Measure {
    type Span;
    type Element;

    /// One box per visual fragment of the target, in document order.
    fn client_rects(&self, target: &Target<Self::Span, Self::Element>) -> Vec<Rect>;

    /// Computed padding of an element; zero on each edge that cannot be read.
    fn padding(&self, element: &Self::Element) -> Padding;

    /// The surface the target is rendered inside, if it is embedded.
    fn embedding_surface(
        &self,
        target: &Target<Self::Span, Self::Element>,
    ) -> Option<EmbeddingSurface>;

    /// Outer window size for the on-screen test.
    fn viewport(&self) -> Viewport;
}
