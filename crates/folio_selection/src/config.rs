//! Popup sizing and anchoring settings.
//!
//! Settings can be built in code, read from `FOLIO_*` environment variables,
//! or deserialized from the reader's JSON view settings.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Sizing and anchoring settings for the selection popup.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionConfig {
    /// Popup box width in pixels
    pub popup_width_px: f32,
    /// Popup box height in pixels
    pub popup_height_px: f32,
    /// Minimum distance between the popup and the bounding container's edges
    pub popup_padding_px: f32,
    /// Minimum distance between a side anchor and the container's edges
    pub anchor_padding_px: f32,
    /// Whether content is laid out in a vertical writing mode
    pub vertical: bool,
}

impl SelectionConfig {
    /// Construct a `SelectionConfig` with explicit values.
    ///
    /// Negative sizes and paddings are raised to zero.
    #[must_use]
    pub fn new(
        popup_width_px: f32,
        popup_height_px: f32,
        popup_padding_px: f32,
        anchor_padding_px: f32,
        vertical: bool,
    ) -> Self {
        Self {
            popup_width_px: popup_width_px.max(0.0),
            popup_height_px: popup_height_px.max(0.0),
            popup_padding_px: popup_padding_px.max(0.0),
            anchor_padding_px: anchor_padding_px.max(0.0),
            vertical,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables, falling back to
    /// [`SelectionConfig::default`] for anything missing or malformed:
    /// - `FOLIO_POPUP_WIDTH_PX`
    /// - `FOLIO_POPUP_HEIGHT_PX`
    /// - `FOLIO_POPUP_PADDING_PX`
    /// - `FOLIO_ANCHOR_PADDING_PX`
    /// - `FOLIO_VERTICAL`: set to "1" for vertical writing mode
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let px = |name: &str, fallback: f32| {
            lookup(name)
                .and_then(|val| val.trim().parse::<f32>().ok())
                .filter(|value| value.is_finite())
                .unwrap_or(fallback)
        };
        let vertical = lookup("FOLIO_VERTICAL").map_or(defaults.vertical, |val| val.trim() == "1");
        Self::new(
            px("FOLIO_POPUP_WIDTH_PX", defaults.popup_width_px),
            px("FOLIO_POPUP_HEIGHT_PX", defaults.popup_height_px),
            px("FOLIO_POPUP_PADDING_PX", defaults.popup_padding_px),
            px("FOLIO_ANCHOR_PADDING_PX", defaults.anchor_padding_px),
            vertical,
        )
    }

    /// Parse settings from JSON; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error if `json` is not a valid settings object.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: Self =
            serde_json::from_str(json).context("failed to parse selection popup settings")?;
        Ok(Self::new(
            parsed.popup_width_px,
            parsed.popup_height_px,
            parsed.popup_padding_px,
            parsed.anchor_padding_px,
            parsed.vertical,
        ))
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            popup_width_px: 240.0,
            popup_height_px: 160.0,
            popup_padding_px: 10.0,
            anchor_padding_px: 10.0,
            vertical: false,
        }
    }
}
