// SPDX-License-Identifier: MPL-2.0
//! Toast records and the events the store broadcasts about them.
//!
//! A [`ToastRecord`] is the consumer-side copy of a toast. Producers never
//! build records directly: they describe what they want with
//! [`ToastOptions`], and every consumer merges those options into its own
//! record for the same [`ToastId`].

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Stable identity of a toast.
///
/// Store-generated ids are monotonically increasing integers; callers may
/// supply their own numeric or string ids to update a toast later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ToastId {
    Num(u64),
    Name(String),
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastId::Num(n) => write!(f, "{n}"),
            ToastId::Name(name) => f.write_str(name),
        }
    }
}

impl From<u64> for ToastId {
    fn from(value: u64) -> Self {
        ToastId::Num(value)
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        ToastId::Name(value.to_string())
    }
}

impl From<String> for ToastId {
    fn from(value: String) -> Self {
        ToastId::Name(value)
    }
}

/// Kind of toast; drives the icon and the loading → resolved transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastKind {
    #[default]
    Default,
    Normal,
    Action,
    Success,
    Info,
    Warning,
    Error,
    Loading,
}

impl ToastKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Default => "default",
            ToastKind::Normal => "normal",
            ToastKind::Action => "action",
            ToastKind::Success => "success",
            ToastKind::Info => "info",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
            ToastKind::Loading => "loading",
        }
    }
}

/// Vertical edge a position group is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalEdge {
    Top,
    Bottom,
}

/// Horizontal placement of a position group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalPlacement {
    Left,
    Center,
    Right,
}

/// Screen anchor of a stack of toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    #[must_use]
    pub fn y(self) -> VerticalEdge {
        match self {
            Position::TopLeft | Position::TopCenter | Position::TopRight => VerticalEdge::Top,
            Position::BottomLeft | Position::BottomCenter | Position::BottomRight => {
                VerticalEdge::Bottom
            }
        }
    }

    #[must_use]
    pub fn x(self) -> HorizontalPlacement {
        match self {
            Position::TopLeft | Position::BottomLeft => HorizontalPlacement::Left,
            Position::TopCenter | Position::BottomCenter => HorizontalPlacement::Center,
            Position::TopRight | Position::BottomRight => HorizontalPlacement::Right,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|position| position.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Config(format!("unknown position `{s}`")))
    }
}

/// How long a toast stays before closing itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastDuration {
    Finite(Duration),
    /// Never auto-closes.
    Infinite,
}

impl ToastDuration {
    #[must_use]
    pub fn millis(ms: u64) -> Self {
        ToastDuration::Finite(Duration::from_millis(ms))
    }

    /// Returns the finite budget, `None` when infinite.
    #[must_use]
    pub fn budget(self) -> Option<Duration> {
        match self {
            ToastDuration::Finite(d) => Some(d),
            ToastDuration::Infinite => None,
        }
    }
}

/// Progress of the asynchronous operation backing a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromiseState {
    Pending,
    Resolved,
    Rejected,
}

/// Callback invoked with the record when a toast is dismissed or auto-closed.
#[derive(Clone)]
pub struct ToastCallback(Arc<dyn Fn(&ToastRecord) + Send + Sync>);

impl ToastCallback {
    pub fn new(f: impl Fn(&ToastRecord) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, record: &ToastRecord) {
        (self.0)(record);
    }
}

impl fmt::Debug for ToastCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ToastCallback(..)")
    }
}

/// Click passed to an action or cancel handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    pub toast_id: ToastId,
    default_prevented: bool,
}

impl ActionEvent {
    #[must_use]
    pub fn new(toast_id: ToastId) -> Self {
        Self {
            toast_id,
            default_prevented: false,
        }
    }

    /// Keeps the toast open after an action click.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Button rendered on a toast (`action` or `cancel`).
#[derive(Clone)]
pub struct Action {
    pub label: String,
    on_click: Option<Arc<dyn Fn(&mut ActionEvent) + Send + Sync>>,
}

impl Action {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: None,
        }
    }

    #[must_use]
    pub fn on_click(mut self, f: impl Fn(&mut ActionEvent) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(f));
        self
    }

    /// Runs the click handler and returns the event it may have marked.
    pub fn click(&self, toast_id: &ToastId) -> ActionEvent {
        let mut event = ActionEvent::new(toast_id.clone());
        if let Some(handler) = &self.on_click {
            handler(&mut event);
        }
        event
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

/// Per-part style class names, joined by the surface's `cx` function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassNames {
    pub toast: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub close_button: Option<String>,
    pub action_button: Option<String>,
    pub cancel_button: Option<String>,
    pub icon: Option<String>,
}

/// Partial description of a toast.
///
/// Used both to create a toast and to update one: every `Some` field
/// overwrites the consumer's copy, `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    pub id: Option<ToastId>,
    pub kind: Option<ToastKind>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub custom: Option<String>,
    pub duration: Option<ToastDuration>,
    pub dismissible: Option<bool>,
    pub close_button: Option<bool>,
    pub rich_colors: Option<bool>,
    pub invert: Option<bool>,
    pub important: Option<bool>,
    pub action: Option<Action>,
    pub cancel: Option<Action>,
    pub position: Option<Position>,
    pub promise: Option<PromiseState>,
    pub on_dismiss: Option<ToastCallback>,
    pub on_auto_close: Option<ToastCallback>,
    pub class_name: Option<String>,
    pub description_class_name: Option<String>,
    pub class_names: Option<ClassNames>,
}

impl ToastOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: ToastDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    #[must_use]
    pub fn close_button(mut self, close_button: bool) -> Self {
        self.close_button = Some(close_button);
        self
    }

    #[must_use]
    pub fn rich_colors(mut self, rich_colors: bool) -> Self {
        self.rich_colors = Some(rich_colors);
        self
    }

    #[must_use]
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = Some(invert);
        self
    }

    #[must_use]
    pub fn important(mut self, important: bool) -> Self {
        self.important = Some(important);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn cancel(mut self, cancel: Action) -> Self {
        self.cancel = Some(cancel);
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn on_dismiss(mut self, f: impl Fn(&ToastRecord) + Send + Sync + 'static) -> Self {
        self.on_dismiss = Some(ToastCallback::new(f));
        self
    }

    #[must_use]
    pub fn on_auto_close(mut self, f: impl Fn(&ToastRecord) + Send + Sync + 'static) -> Self {
        self.on_auto_close = Some(ToastCallback::new(f));
        self
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn description_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.description_class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn class_names(mut self, class_names: ClassNames) -> Self {
        self.class_names = Some(class_names);
        self
    }

    pub(crate) fn custom(mut self, key: impl Into<String>) -> Self {
        self.custom = Some(key.into());
        self
    }

    pub(crate) fn promise(mut self, state: PromiseState) -> Self {
        self.promise = Some(state);
        self
    }
}

/// A consumer's copy of one toast.
#[derive(Debug, Clone)]
pub struct ToastRecord {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    /// Owner-rendered content key; replaces all internal chrome when set.
    pub custom: Option<String>,
    pub duration: Option<ToastDuration>,
    pub dismissible: bool,
    pub close_button: Option<bool>,
    pub rich_colors: Option<bool>,
    pub invert: Option<bool>,
    pub important: bool,
    pub action: Option<Action>,
    pub cancel: Option<Action>,
    pub position: Option<Position>,
    pub promise: Option<PromiseState>,
    pub on_dismiss: Option<ToastCallback>,
    pub on_auto_close: Option<ToastCallback>,
    pub class_name: Option<String>,
    pub description_class_name: Option<String>,
    pub class_names: ClassNames,
    /// Set when the id was dismissed; the renderer must start its exit.
    pub delete: bool,
}

impl ToastRecord {
    /// Builds a fresh record from the first options seen for `id`.
    #[must_use]
    pub fn from_options(id: ToastId, options: &ToastOptions) -> Self {
        let mut record = Self {
            id,
            kind: ToastKind::Default,
            title: None,
            description: None,
            icon: None,
            custom: None,
            duration: None,
            dismissible: true,
            close_button: None,
            rich_colors: None,
            invert: None,
            important: false,
            action: None,
            cancel: None,
            position: None,
            promise: None,
            on_dismiss: None,
            on_auto_close: None,
            class_name: None,
            description_class_name: None,
            class_names: ClassNames::default(),
            delete: false,
        };
        record.merge(options);
        record
    }

    /// Shallow merge: every `Some` field of `options` overwrites this record.
    pub fn merge(&mut self, options: &ToastOptions) {
        if let Some(kind) = options.kind {
            self.kind = kind;
        }
        if let Some(title) = &options.title {
            self.title = Some(title.clone());
        }
        if let Some(description) = &options.description {
            self.description = Some(description.clone());
        }
        if let Some(icon) = &options.icon {
            self.icon = Some(icon.clone());
        }
        if let Some(custom) = &options.custom {
            self.custom = Some(custom.clone());
        }
        if let Some(duration) = options.duration {
            self.duration = Some(duration);
        }
        if let Some(dismissible) = options.dismissible {
            self.dismissible = dismissible;
        }
        if let Some(close_button) = options.close_button {
            self.close_button = Some(close_button);
        }
        if let Some(rich_colors) = options.rich_colors {
            self.rich_colors = Some(rich_colors);
        }
        if let Some(invert) = options.invert {
            self.invert = Some(invert);
        }
        if let Some(important) = options.important {
            self.important = important;
        }
        if let Some(action) = &options.action {
            self.action = Some(action.clone());
        }
        if let Some(cancel) = &options.cancel {
            self.cancel = Some(cancel.clone());
        }
        if let Some(position) = options.position {
            self.position = Some(position);
        }
        if let Some(promise) = options.promise {
            self.promise = Some(promise);
        }
        if let Some(on_dismiss) = &options.on_dismiss {
            self.on_dismiss = Some(on_dismiss.clone());
        }
        if let Some(on_auto_close) = &options.on_auto_close {
            self.on_auto_close = Some(on_auto_close.clone());
        }
        if let Some(class_name) = &options.class_name {
            self.class_name = Some(class_name.clone());
        }
        if let Some(class_name) = &options.description_class_name {
            self.description_class_name = Some(class_name.clone());
        }
        if let Some(class_names) = &options.class_names {
            self.class_names = class_names.clone();
        }
    }

    /// Resolved screen anchor, falling back to the surface default.
    #[must_use]
    pub fn position_or(&self, default: Position) -> Position {
        self.position.unwrap_or(default)
    }

    /// Whether user interaction is disabled while the toast is loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.kind == ToastKind::Loading
    }

    #[must_use]
    pub fn promise_pending(&self) -> bool {
        self.promise == Some(PromiseState::Pending)
    }
}

/// Event broadcast by the store to every subscriber.
#[derive(Debug, Clone)]
pub enum ToastEvent {
    /// Create or merge-update the toast with this id.
    Upsert { id: ToastId, fields: ToastOptions },
    /// Dismiss marker: mark this id for removal.
    Dismiss { id: ToastId },
}

impl ToastEvent {
    #[must_use]
    pub fn id(&self) -> &ToastId {
        match self {
            ToastEvent::Upsert { id, .. } | ToastEvent::Dismiss { id } => id,
        }
    }
}
