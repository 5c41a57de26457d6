//! Declarations from an element's `style="..."` attribute.
//!
//! The DOM snapshot carries no cascade, so an element's inline declarations
//! stand in for its computed style.

use std::collections::HashMap;

/// A single `property: value` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// ASCII-lowercased property name.
    pub property: String,
    /// Value trimmed of surrounding whitespace, `!important` removed.
    pub value: String,
}

/// Parse the value of a `style` attribute into declarations, in source order.
///
/// Items without a colon, or with an empty property or value, are skipped.
pub fn parse_style_attribute(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|item| {
            let (property, value) = item.split_once(':')?;
            let property = property.trim();
            let value = strip_important(value.trim());
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some(Declaration {
                property: property.to_ascii_lowercase(),
                value: value.to_owned(),
            })
        })
        .collect()
}

/// Parse into a map keyed by property name; later duplicates win.
pub fn parse_style_attribute_into_map(input: &str) -> HashMap<String, String> {
    parse_style_attribute(input)
        .into_iter()
        .map(|declaration| (declaration.property, declaration.value))
        .collect()
}

fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    lower
        .rfind("!important")
        .filter(|index| lower[index + "!important".len()..].trim().is_empty())
        .map_or(value, |index| value[..index].trim_end())
}
