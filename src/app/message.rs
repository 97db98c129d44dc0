// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags of the demo application.

use crate::toast::toaster;
use crate::toast::{Position, ToastKind};
use crate::ui::theming::ThemeMode;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Toaster(toaster::Message),
    TitleChanged(String),
    DescriptionChanged(String),
    RichColorsToggled(bool),
    CloseButtonToggled(bool),
    PositionSelected(Position),
    Show(ToastKind),
    ShowAction,
    ShowPromise { fail: bool },
    PromiseSettled,
    ShowCustom,
    DismissAll,
    /// The title field was submitted (Enter).
    Submit,
}

/// Runtime flags passed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Directory holding `settings.toml`.
    pub config_dir: Option<String>,
    /// Overrides `[layout] position`.
    pub position: Option<Position>,
    /// Overrides `[appearance] theme`.
    pub theme: Option<ThemeMode>,
}
