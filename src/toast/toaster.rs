// SPDX-License-Identifier: MPL-2.0
//! The toaster surface: owns the rendered toast list and its layout state.
//!
//! The surface applies store events one message at a time, drives every
//! toast's [`Lifecycle`], keeps the shared [`Heights`] registry, and tracks
//! the stack-wide flags (`expanded`, `interacting`, `hidden`, focus). It is
//! framework-agnostic state; `crate::ui::toaster` renders it with iced.

use super::heights::Heights;
use super::hotkey::{self, Hotkey};
use super::lifecycle::{self, Lifecycle, PointerKind, RemovalCause, Tuning};
use super::record::{Position, ToastEvent, ToastId, ToastRecord};
use super::store::ToastStore;
use crate::config::Config;
use crate::ui::theming::ThemeTracker;
use iced::keyboard::{Key, Modifiers};
use iced::widget::Id;
use iced::Point;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Input reported by one rendered toast.
#[derive(Debug, Clone, PartialEq)]
pub enum ToastInput {
    /// Natural content height measured during layout.
    Measured(f32),
    PointerDown {
        position: Point,
        /// The press landed on a button inside the toast.
        on_control: bool,
        kind: PointerKind,
    },
    PointerMoved {
        position: Point,
        kind: PointerKind,
    },
    PointerUp,
    Close,
    Action,
    Cancel,
}

#[derive(Debug, Clone)]
pub enum Message {
    Store(ToastEvent),
    Tick(Instant),
    Toast { id: ToastId, input: ToastInput },
    StackEntered,
    StackMoved,
    StackLeft,
    KeyPressed { key: Key, modifiers: Modifiers },
    /// Keyboard focus moved into the stack from `previous`.
    FocusEntered { previous: Option<Id>, dismissible: bool },
    FocusLeft,
    VisibilityChanged { hidden: bool },
}

/// Work the host application must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Give keyboard focus back to the element focused before the stack.
    RestoreFocus(Id),
}

#[derive(Debug, Default)]
struct FocusTracker {
    within: bool,
    previous: Option<Id>,
}

impl FocusTracker {
    fn enter(&mut self, previous: Option<Id>) {
        if !self.within {
            self.within = true;
            self.previous = previous;
        }
    }

    fn leave(&mut self) -> Option<Effect> {
        if !self.within {
            return None;
        }
        self.within = false;
        self.previous.take().map(Effect::RestoreFocus)
    }
}

/// Render-ready view of one toast in a position group.
#[derive(Debug, Clone)]
pub struct StackItem<'a> {
    pub record: &'a ToastRecord,
    pub index: usize,
    pub front: bool,
    pub visible: bool,
    pub z_index: usize,
    pub offset: f32,
    pub mounted: bool,
    pub removed: bool,
    pub swiping: bool,
    pub swipe_out: bool,
    pub swipe_amount: f32,
    pub expanded: bool,
    pub initial_height: f32,
    /// Loading toasts ignore close and swipe.
    pub disabled: bool,
}

#[derive(Debug)]
pub struct Toaster {
    store: ToastStore,
    config: Config,
    tuning: Tuning,
    hotkey: Hotkey,
    /// Newest first.
    toasts: Vec<ToastRecord>,
    lifecycles: HashMap<ToastId, Lifecycle>,
    heights: Heights,
    expanded: bool,
    /// Toast holding the current press; the stack is `interacting` while set.
    pressed: Option<ToastId>,
    hidden: bool,
    focus: FocusTracker,
    return_focus: Option<Id>,
    theme: ThemeTracker,
    /// First and latest clock readings, for animations.
    started: Option<Instant>,
    clock: Option<Instant>,
}

impl Toaster {
    #[must_use]
    pub fn new(store: ToastStore, config: Config) -> Self {
        let config = config.sanitized();
        let theme = ThemeTracker::new(config.appearance.theme);
        Self::with_theme(store, config, theme)
    }

    /// Builds a surface with an explicit theme tracker (used by tests to
    /// avoid probing the OS).
    #[must_use]
    pub fn with_theme(store: ToastStore, config: Config, theme: ThemeTracker) -> Self {
        let config = config.sanitized();
        Self {
            store,
            tuning: config.tuning(),
            hotkey: config.hotkey(),
            config,
            toasts: Vec::new(),
            lifecycles: HashMap::new(),
            heights: Heights::new(),
            expanded: false,
            pressed: None,
            hidden: false,
            focus: FocusTracker::default(),
            return_focus: None,
            theme,
            started: None,
            clock: None,
        }
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.started.get_or_insert(now);
        self.clock = Some(now);

        match message {
            Message::Store(event) => self.apply_event(event, now, &mut effects),
            Message::Tick(at) => {
                self.theme.poll(at);
                self.tick(at, &mut effects);
            }
            Message::Toast { id, input } => self.toast_input(id, input, now, &mut effects),
            Message::StackEntered | Message::StackMoved => self.expanded = true,
            Message::StackLeft => {
                if self.pressed.is_none() {
                    self.expanded = false;
                }
            }
            Message::KeyPressed { key, modifiers } => {
                if self.hotkey.matches(&key, modifiers) {
                    tracing::trace!(hotkey = %self.hotkey, "stack hotkey pressed");
                    self.expanded = true;
                    self.focus.enter(self.return_focus.clone());
                } else if hotkey::is_escape(&key) && self.focus.within {
                    self.expanded = false;
                    effects.extend(self.focus.leave());
                }
            }
            Message::FocusEntered {
                previous,
                dismissible,
            } => {
                if dismissible {
                    let previous = previous.or_else(|| self.return_focus.clone());
                    self.focus.enter(previous);
                }
            }
            Message::FocusLeft => effects.extend(self.focus.leave()),
            Message::VisibilityChanged { hidden } => self.hidden = hidden,
        }

        self.reconcile(now);
        effects
    }

    fn apply_event(&mut self, event: ToastEvent, now: Instant, effects: &mut Vec<Effect>) {
        match event {
            ToastEvent::Upsert { id, fields } => {
                // The store forgot a dismissed id, so this is a new toast
                // even if the old one is still playing its exit.
                if self.toasts.iter().any(|t| t.id == id && t.delete) {
                    self.forget(&id);
                    tracing::trace!(%id, "id reused while its toast was leaving");
                }

                if let Some(record) = self.toasts.iter_mut().find(|t| t.id == id) {
                    record.merge(&fields);
                    tracing::trace!(%id, "toast updated");
                    if fields.duration.is_some() {
                        let budget = budget_for(record, &self.config);
                        if let Some(lifecycle) = self.lifecycles.get_mut(&id) {
                            lifecycle.reset_timer(budget);
                        }
                    }
                    return;
                }

                let record = ToastRecord::from_options(id.clone(), &fields);
                let anchor = record.position_or(self.config.layout.position);
                let budget = budget_for(&record, &self.config);
                self.lifecycles
                    .insert(id.clone(), Lifecycle::new(id.clone(), anchor, budget, self.tuning));
                self.toasts.insert(0, record);
                tracing::debug!(%id, position = anchor.as_str(), "toast added to surface");
            }
            ToastEvent::Dismiss { id } => {
                let Some(record) = self.toasts.iter_mut().find(|t| t.id == id) else {
                    return;
                };
                record.delete = true;
                self.remove(&id, now, RemovalCause::Dismissed, effects);
            }
        }
    }

    fn toast_input(&mut self, id: ToastId, input: ToastInput, now: Instant, effects: &mut Vec<Effect>) {
        // The pressed toast may be gone by the time the pointer is released.
        if input == ToastInput::PointerUp {
            self.pressed = None;
        }
        let Some(record) = self.record(&id) else {
            return;
        };
        let dismissible = record.dismissible;
        let disabled = record.is_loading();
        let action = record.action.clone();
        let cancel = record.cancel.clone();
        let offset = self.live_offset(&id);

        let transitions = match input {
            ToastInput::Measured(height) => self
                .lifecycles
                .get_mut(&id)
                .map(|lifecycle| lifecycle.measured(height))
                .unwrap_or_default(),
            ToastInput::PointerDown {
                position,
                on_control,
                kind: _,
            } => {
                if dismissible {
                    self.pressed = Some(id.clone());
                }
                if let Some(lifecycle) = self.lifecycles.get_mut(&id) {
                    lifecycle.pointer_down(now, position, on_control, offset, dismissible && !disabled);
                }
                Vec::new()
            }
            ToastInput::PointerMoved { position, kind } => {
                if let Some(lifecycle) = self.lifecycles.get_mut(&id) {
                    lifecycle.pointer_move(position, kind, dismissible);
                }
                Vec::new()
            }
            ToastInput::PointerUp => self
                .lifecycles
                .get_mut(&id)
                .map(|lifecycle| lifecycle.pointer_up(now, offset, dismissible))
                .unwrap_or_default(),
            ToastInput::Close => {
                if disabled || !dismissible {
                    return;
                }
                self.begin_removal(&id, now, RemovalCause::CloseButton)
            }
            ToastInput::Action => {
                let Some(event) = action.map(|action| action.click(&id)) else {
                    return;
                };
                if event.default_prevented() {
                    tracing::trace!(%id, "action kept the toast open");
                    return;
                }
                self.begin_removal(&id, now, RemovalCause::Action)
            }
            ToastInput::Cancel => {
                if !dismissible {
                    return;
                }
                let Some(cancel) = cancel else {
                    return;
                };
                cancel.click(&id);
                self.begin_removal(&id, now, RemovalCause::Cancel)
            }
        };

        self.apply_transitions(&id, transitions, effects);
    }

    fn begin_removal(&mut self, id: &ToastId, now: Instant, cause: RemovalCause) -> Vec<lifecycle::Effect> {
        let offset = self.live_offset(id);
        self.lifecycles
            .get_mut(id)
            .map(|lifecycle| lifecycle.begin_removal(now, offset, cause))
            .unwrap_or_default()
    }

    fn remove(&mut self, id: &ToastId, now: Instant, cause: RemovalCause, effects: &mut Vec<Effect>) {
        let transitions = self.begin_removal(id, now, cause);
        self.apply_transitions(id, transitions, effects);
    }

    fn tick(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let ids: Vec<ToastId> = self.toasts.iter().map(|t| t.id.clone()).collect();
        for id in ids {
            let offset = self.live_offset(&id);
            let transitions = self
                .lifecycles
                .get_mut(&id)
                .map(|lifecycle| lifecycle.tick(now, offset))
                .unwrap_or_default();
            self.apply_transitions(&id, transitions, effects);
        }
    }

    fn apply_transitions(
        &mut self,
        id: &ToastId,
        transitions: Vec<lifecycle::Effect>,
        effects: &mut Vec<Effect>,
    ) {
        for transition in transitions {
            match transition {
                lifecycle::Effect::RegisterHeight(entry) => {
                    self.heights = self.heights.upsert(entry);
                }
                lifecycle::Effect::DropHeight(toast_id) => {
                    self.heights = self.heights.without(&toast_id);
                }
                lifecycle::Effect::NotifyDismiss => {
                    if let Some(record) = self.record(id) {
                        if let Some(callback) = &record.on_dismiss {
                            callback.call(record);
                        }
                    }
                }
                lifecycle::Effect::NotifyAutoClose => {
                    tracing::debug!(%id, "toast auto-closed");
                    if let Some(record) = self.record(id) {
                        if let Some(callback) = &record.on_auto_close {
                            callback.call(record);
                        }
                    }
                }
                lifecycle::Effect::Detach => self.detach(id, effects),
            }
        }
    }

    fn detach(&mut self, id: &ToastId, effects: &mut Vec<Effect>) {
        let Some(record) = self.forget(id) else {
            return;
        };

        if !record.delete {
            self.store.dismiss(id);
        }
        tracing::debug!(%id, remaining = self.toasts.len(), "toast removed from surface");

        if self.toasts.is_empty() {
            effects.extend(self.focus.leave());
        }
    }

    /// Drops every trace of `id` from the surface.
    fn forget(&mut self, id: &ToastId) -> Option<ToastRecord> {
        let index = self.toasts.iter().position(|t| &t.id == id)?;
        let record = self.toasts.remove(index);
        self.lifecycles.remove(id);
        self.heights = self.heights.without(id);
        if self.pressed.as_ref() == Some(id) {
            self.pressed = None;
        }
        Some(record)
    }

    /// Re-derives stack flags and timer states after any change.
    fn reconcile(&mut self, now: Instant) {
        if self.toasts.len() <= 1 && self.expanded {
            tracing::trace!("collapsing stack with a single toast");
            self.expanded = false;
        }

        let paused = self.expanded
            || self.pressed.is_some()
            || (self.config.timing.pause_when_hidden && self.hidden);

        for record in &self.toasts {
            if let Some(lifecycle) = self.lifecycles.get_mut(&record.id) {
                let blocked = record.is_loading() || record.promise_pending();
                lifecycle.sync_timer(now, !blocked && !paused);
            }
        }
    }

    fn live_offset(&self, id: &ToastId) -> f32 {
        let position = self
            .record(id)
            .map_or(self.config.layout.position, |t| t.position_or(self.config.layout.position));
        self.heights
            .group(position)
            .offset_of(id, self.config.layout.gap)
            .unwrap_or(0.0)
    }

    /// Element to refocus when keyboard focus leaves the stack.
    pub fn remember_focus(&mut self, id: Id) {
        self.return_focus = Some(id);
    }

    /// Positions with at least one toast: the default first, then the
    /// others in first-seen order.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = vec![self.config.layout.position];
        for position in self.toasts.iter().filter_map(|t| t.position) {
            if !positions.contains(&position) {
                positions.push(position);
            }
        }
        positions
    }

    /// View model of every toast anchored at `position`, front first.
    #[must_use]
    pub fn stack(&self, position: Position) -> Vec<StackItem<'_>> {
        let default = self.config.layout.position;
        let group: Vec<&ToastRecord> = self
            .toasts
            .iter()
            .filter(|t| t.position_or(default) == position)
            .collect();
        let len = group.len();

        group
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let lifecycle = self.lifecycles.get(&record.id)?;
                let mounted = lifecycle.mounted();
                Some(StackItem {
                    record,
                    index,
                    front: index == 0,
                    visible: index < self.config.layout.visible_toasts,
                    z_index: len - index,
                    offset: lifecycle.display_offset(self.live_offset(&record.id)),
                    mounted,
                    removed: lifecycle.removed(),
                    swiping: lifecycle.swiping(),
                    swipe_out: lifecycle.swipe_out(),
                    swipe_amount: lifecycle.swipe_amount(),
                    expanded: self.expanded || (self.config.layout.expand && mounted),
                    initial_height: lifecycle.initial_height(),
                    disabled: record.is_loading(),
                })
            })
            .collect()
    }

    /// Height of the front toast of `position`, used for the collapsed stack.
    #[must_use]
    pub fn front_toast_height(&self, position: Position) -> f32 {
        self.heights.group(position).front_height()
    }

    /// Accessible label of the stack, e.g. `Notifications Alt+T`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Notifications {}", self.hotkey.label())
    }

    /// Whether the surface clock must run.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        !self.toasts.is_empty()
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(crate::config::TICK_INTERVAL_MS)
    }

    #[must_use]
    pub fn toasts(&self) -> &[ToastRecord] {
        &self.toasts
    }

    #[must_use]
    pub fn record(&self, id: &ToastId) -> Option<&ToastRecord> {
        self.toasts.iter().find(|t| &t.id == id)
    }

    #[must_use]
    pub fn lifecycle(&self, id: &ToastId) -> Option<&Lifecycle> {
        self.lifecycles.get(id)
    }

    #[must_use]
    pub fn heights(&self) -> &Heights {
        &self.heights
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[must_use]
    pub fn is_interacting(&self) -> bool {
        self.pressed.is_some()
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub fn focus_within(&self) -> bool {
        self.focus.within
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeTracker {
        &self.theme
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &ToastStore {
        &self.store
    }

    /// Time between the first and the latest update; drives the loading
    /// spinner.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match (self.started, self.clock) {
            (Some(started), Some(clock)) => clock.saturating_duration_since(started),
            _ => Duration::ZERO,
        }
    }
}

fn budget_for(record: &ToastRecord, config: &Config) -> Option<Duration> {
    match record.duration {
        Some(duration) => duration.budget(),
        None => Some(config.duration()),
    }
}
