//! Identified selections in reading content.

/// A selection the reader is tracking, keyed for annotation lookups.
///
/// `range` is whatever span type the caller measures with; this crate never
/// builds one itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSelection<R> {
    pub key: String,
    pub text: String,
    pub range: R,
    /// Index of the section (spine item) the selection belongs to.
    pub index: usize,
    pub href: Option<String>,
    pub annotated: bool,
}

impl<R> TextSelection<R> {
    pub fn new(key: impl Into<String>, text: impl Into<String>, range: R, index: usize) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            range,
            index,
            href: None,
            annotated: false,
        }
    }

    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    #[must_use]
    pub fn with_annotated(mut self, annotated: bool) -> Self {
        self.annotated = annotated;
        self
    }
}
