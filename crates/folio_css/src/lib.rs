//! Computed-style reading for selection geometry.
//!
//! Covers the handful of properties the popup anchor depends on: element
//! padding (so anchors sit on the content box) and the 2D transform of an
//! embedding frame (so boxes measured inside it can be scaled out).

#![forbid(unsafe_code)]

pub mod padding;
pub mod style_attr;
pub mod transform;

pub use padding::{Padding, parse_int_px};
pub use style_attr::{Declaration, parse_style_attribute, parse_style_attribute_into_map};
pub use transform::{
    ScaleFactors, Transform2D, TransformError, parse_transform, scale_factors_from_transform,
};
