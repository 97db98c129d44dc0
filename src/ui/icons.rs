// SPDX-License-Identifier: MPL-2.0
//! Kind icons.
//!
//! Icons are text glyphs so they follow the toast's text color without any
//! asset loading. `[icons]` in the settings file replaces the glyph of a
//! kind; a toast's own `icon` wins over both.

use crate::config::IconConfig;
use crate::toast::{ToastKind, ToastRecord};

pub const SUCCESS: &str = "\u{2714}";
pub const INFO: &str = "\u{2139}";
pub const WARNING: &str = "\u{26A0}";
pub const ERROR: &str = "\u{2716}";
pub const CLOSE: &str = "\u{2715}";

/// What to draw in a toast's icon slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    Glyph(String),
    /// The animated loading indicator.
    Spinner,
}

/// Icon of `record`, if its kind has one.
#[must_use]
pub fn for_toast(record: &ToastRecord, overrides: &IconConfig) -> Option<Icon> {
    if let Some(icon) = &record.icon {
        return Some(Icon::Glyph(icon.clone()));
    }

    let kind = if record.is_loading() {
        ToastKind::Loading
    } else {
        record.kind
    };

    if let Some(glyph) = overrides.get(kind) {
        return Some(Icon::Glyph(glyph.to_string()));
    }

    match kind {
        ToastKind::Loading => Some(Icon::Spinner),
        ToastKind::Success => Some(Icon::Glyph(SUCCESS.into())),
        ToastKind::Info => Some(Icon::Glyph(INFO.into())),
        ToastKind::Warning => Some(Icon::Glyph(WARNING.into())),
        ToastKind::Error => Some(Icon::Glyph(ERROR.into())),
        ToastKind::Default | ToastKind::Normal | ToastKind::Action => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{ToastId, ToastOptions};

    fn record(options: ToastOptions) -> ToastRecord {
        ToastRecord::from_options(ToastId::Num(1), &options)
    }

    #[test]
    fn semantic_kinds_get_default_glyphs() {
        let icons = IconConfig::default();
        assert_eq!(
            for_toast(&record(ToastOptions::new().kind(ToastKind::Success)), &icons),
            Some(Icon::Glyph(SUCCESS.into()))
        );
        assert_eq!(for_toast(&record(ToastOptions::new()), &icons), None);
    }

    #[test]
    fn loading_draws_the_spinner_unless_overridden() {
        let loading = record(ToastOptions::new().kind(ToastKind::Loading));
        assert_eq!(
            for_toast(&loading, &IconConfig::default()),
            Some(Icon::Spinner)
        );

        let icons = IconConfig {
            loading: Some("…".into()),
            ..IconConfig::default()
        };
        assert_eq!(for_toast(&loading, &icons), Some(Icon::Glyph("…".into())));
    }

    #[test]
    fn toast_icon_wins_over_config() {
        let icons = IconConfig {
            error: Some("!".into()),
            ..IconConfig::default()
        };
        let toast = record(ToastOptions::new().kind(ToastKind::Error).icon("x"));
        assert_eq!(for_toast(&toast, &icons), Some(Icon::Glyph("x".into())));
    }
}
