//! Padding edges read from computed style values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Content-box inset of an element, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Resolve padding from style declarations.
    ///
    /// The `padding` shorthand (one to four values) is applied first, then any
    /// `padding-*` longhand overrides its edge. Each value goes through
    /// [`parse_int_px`]; anything unparseable counts as 0.
    pub fn from_declarations(declarations: &HashMap<String, String>) -> Self {
        let mut padding = declarations
            .get("padding")
            .map_or(Self::ZERO, |value| Self::from_shorthand(value));
        let longhands: [(&str, &mut f32); 4] = [
            ("padding-top", &mut padding.top),
            ("padding-right", &mut padding.right),
            ("padding-bottom", &mut padding.bottom),
            ("padding-left", &mut padding.left),
        ];
        for (property, edge) in longhands {
            if let Some(value) = declarations.get(property) {
                *edge = px_or_zero(value);
            }
        }
        padding
    }

    fn from_shorthand(value: &str) -> Self {
        let values: Vec<f32> = value.split_ascii_whitespace().map(px_or_zero).collect();
        match values.as_slice() {
            [all] => Self::uniform(*all),
            [vertical, horizontal] => Self::new(*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => Self::new(*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => Self::new(*top, *right, *bottom, *left),
            _ => Self::ZERO,
        }
    }
}

fn px_or_zero(value: &str) -> f32 {
    parse_int_px(value).map_or(0.0, |px| px as f32)
}

/// Leading-integer parse of a computed length such as `"12px"` or `"7.9px"`.
///
/// Skips leading whitespace, accepts an optional sign, then reads decimal
/// digits and ignores whatever follows. Returns `None` when no digit is found.
pub fn parse_int_px(value: &str) -> Option<i32> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|byte| !byte.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end]
        .bytes()
        .fold(0_i64, |acc, byte| {
            (acc * 10 + i64::from(byte - b'0')).min(i64::from(i32::MAX))
        });
    let signed = if negative { -magnitude } else { magnitude };
    i32::try_from(signed).ok()
}
