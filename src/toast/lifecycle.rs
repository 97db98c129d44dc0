// SPDX-License-Identifier: MPL-2.0
//! Per-toast interaction state machine.
//!
//! ```text
//! Entering ──measured──▶ Idle ◀──release below threshold── Swiping
//!                          │  ──pointer down (dismissible)──▶   │
//!                          │                                    │ release past threshold
//!                          ▼ timer / dismiss / button           ▼
//!                       Removing ──unmount delay──▶ Removed
//! ```
//!
//! The machine never touches shared state. Transitions return
//! [`Effect`]s that the owning surface applies: height registration,
//! callback notification, and final detachment.

use super::heights::HeightEntry;
use super::record::{Position, ToastId, VerticalEdge};
use iced::Point;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Idle,
    Swiping,
    Removing,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Why a toast started its exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalCause {
    Swipe,
    CloseButton,
    Action,
    Cancel,
    AutoClose,
    /// The record was marked `delete` by a store dismiss.
    Dismissed,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RegisterHeight(HeightEntry),
    DropHeight(ToastId),
    NotifyDismiss,
    NotifyAutoClose,
    Detach,
}

/// Gesture and exit tuning, copied from the surface configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub swipe_threshold: f32,
    /// Pixels per millisecond.
    pub velocity_threshold: f32,
    pub mouse_start_threshold: f32,
    pub touch_start_threshold: f32,
    pub unmount_delay: Duration,
    pub swipe_enabled: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        use crate::config::defaults;
        Self {
            swipe_threshold: defaults::SWIPE_THRESHOLD,
            velocity_threshold: defaults::VELOCITY_THRESHOLD,
            mouse_start_threshold: defaults::MOUSE_SWIPE_START_THRESHOLD,
            touch_start_threshold: defaults::TOUCH_SWIPE_START_THRESHOLD,
            unmount_delay: Duration::from_millis(defaults::UNMOUNT_DELAY_MS),
            swipe_enabled: true,
        }
    }
}

/// Single-shot auto-close deadline that can be paused and resumed.
///
/// Pausing subtracts the time already spent from the remaining budget,
/// so resuming continues instead of starting over.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseTimer {
    /// `None` for toasts that never auto-close.
    remaining: Option<Duration>,
    started_at: Option<Instant>,
}

impl CloseTimer {
    #[must_use]
    pub fn new(budget: Option<Duration>) -> Self {
        Self {
            remaining: budget,
            started_at: None,
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.remaining.is_some() && self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if let (Some(started), Some(remaining)) = (self.started_at.take(), self.remaining) {
            let elapsed = now.saturating_duration_since(started);
            self.remaining = Some(remaining.saturating_sub(elapsed));
        }
    }

    /// Clears the deadline for good.
    pub fn cancel(&mut self) {
        self.remaining = None;
        self.started_at = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let remaining = self.remaining?;
        Some(match self.started_at {
            Some(started) => remaining.saturating_sub(now.saturating_duration_since(started)),
            None => remaining,
        })
    }

    #[must_use]
    pub fn expired(&self, now: Instant) -> bool {
        self.is_running() && self.remaining(now) == Some(Duration::ZERO)
    }
}

/// Interaction state of one rendered toast.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    id: ToastId,
    anchor: Position,
    tuning: Tuning,
    phase: Phase,
    mounted: bool,
    swipe_out: bool,
    initial_height: f32,
    offset_before_remove: f32,
    swipe_amount: f32,
    drag_started_at: Option<Instant>,
    pointer_start: Option<Point>,
    timer: CloseTimer,
    remove_at: Option<Instant>,
}

impl Lifecycle {
    #[must_use]
    pub fn new(id: ToastId, anchor: Position, budget: Option<Duration>, tuning: Tuning) -> Self {
        Self {
            id,
            anchor,
            tuning,
            phase: Phase::Entering,
            mounted: false,
            swipe_out: false,
            initial_height: 0.0,
            offset_before_remove: 0.0,
            swipe_amount: 0.0,
            drag_started_at: None,
            pointer_start: None,
            timer: CloseTimer::new(budget),
            remove_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn removed(&self) -> bool {
        matches!(self.phase, Phase::Removing | Phase::Removed)
    }

    #[must_use]
    pub fn swiping(&self) -> bool {
        self.phase == Phase::Swiping
    }

    #[must_use]
    pub fn swipe_out(&self) -> bool {
        self.swipe_out
    }

    #[must_use]
    pub fn swipe_amount(&self) -> f32 {
        self.swipe_amount
    }

    #[must_use]
    pub fn initial_height(&self) -> f32 {
        self.initial_height
    }

    #[must_use]
    pub fn timer(&self) -> &CloseTimer {
        &self.timer
    }

    /// Offset to draw at: frozen at its last value once removal started.
    #[must_use]
    pub fn display_offset(&self, live_offset: f32) -> f32 {
        if self.removed() {
            self.offset_before_remove
        } else {
            live_offset
        }
    }

    /// Records a layout measurement. The first one mounts the toast.
    pub fn measured(&mut self, height: f32) -> Vec<Effect> {
        if self.removed() || !height.is_finite() {
            return Vec::new();
        }
        if !self.mounted {
            self.mounted = true;
            self.phase = Phase::Idle;
        }
        if (self.initial_height - height).abs() < f32::EPSILON && self.initial_height > 0.0 {
            return Vec::new();
        }
        self.initial_height = height;
        vec![Effect::RegisterHeight(HeightEntry {
            toast_id: self.id.clone(),
            height,
            position: self.anchor,
        })]
    }

    /// Restarts the auto-close budget after the record changed.
    pub fn reset_timer(&mut self, budget: Option<Duration>) {
        if self.removed() {
            return;
        }
        self.timer = CloseTimer::new(budget);
    }

    /// Runs or pauses the auto-close timer.
    pub fn sync_timer(&mut self, now: Instant, should_run: bool) {
        if self.removed() {
            return;
        }
        if should_run {
            self.timer.resume(now);
        } else {
            self.timer.pause(now);
        }
    }

    /// Pointer pressed on the toast.
    ///
    /// Presses on buttons and on toasts that cannot be dismissed never start
    /// a swipe.
    pub fn pointer_down(
        &mut self,
        now: Instant,
        position: Point,
        on_control: bool,
        live_offset: f32,
        dismissible: bool,
    ) {
        if !dismissible || self.removed() || !self.tuning.swipe_enabled {
            return;
        }
        self.drag_started_at = Some(now);
        self.offset_before_remove = live_offset;

        if on_control {
            return;
        }
        self.phase = Phase::Swiping;
        self.pointer_start = Some(position);
    }

    /// Pointer moved while pressed.
    pub fn pointer_move(&mut self, position: Point, kind: PointerKind, dismissible: bool) {
        let Some(start) = self.pointer_start else {
            return;
        };
        if !dismissible {
            return;
        }

        let dy = position.y - start.y;
        let dx = position.x - start.x;
        if !dy.is_finite() || !dx.is_finite() {
            return;
        }

        // Only motion away from the anchored edge counts.
        let clamped = match self.anchor.y() {
            VerticalEdge::Top => dy.min(0.0),
            VerticalEdge::Bottom => dy.max(0.0),
        };
        let start_threshold = match kind {
            PointerKind::Touch => self.tuning.touch_start_threshold,
            PointerKind::Mouse => self.tuning.mouse_start_threshold,
        };

        if clamped.abs() > start_threshold {
            self.swipe_amount = clamped;
        } else if dx.abs() > start_threshold {
            // Sideways first: the user is scrolling, not dismissing.
            self.pointer_start = None;
        }
    }

    /// Pointer released. Commits removal past the distance or velocity
    /// threshold, otherwise snaps back.
    pub fn pointer_up(&mut self, now: Instant, live_offset: f32, dismissible: bool) -> Vec<Effect> {
        if self.swipe_out || !dismissible || self.removed() {
            return Vec::new();
        }
        self.pointer_start = None;

        let amount = self.swipe_amount.abs();
        let velocity = match self.drag_started_at.take() {
            Some(started) => {
                let elapsed_ms = now.saturating_duration_since(started).as_secs_f32() * 1000.0;
                if elapsed_ms > 0.0 {
                    amount / elapsed_ms
                } else {
                    0.0
                }
            }
            None => 0.0,
        };

        if amount >= self.tuning.swipe_threshold || velocity > self.tuning.velocity_threshold {
            let effects = self.begin_removal(now, live_offset, RemovalCause::Swipe);
            self.swipe_out = true;
            return effects;
        }

        self.swipe_amount = 0.0;
        if self.phase == Phase::Swiping {
            self.phase = Phase::Idle;
        }
        Vec::new()
    }

    /// Starts the exit transition. Idempotent.
    pub fn begin_removal(&mut self, now: Instant, live_offset: f32, cause: RemovalCause) -> Vec<Effect> {
        if self.removed() {
            return Vec::new();
        }

        self.phase = Phase::Removing;
        self.timer.cancel();
        self.pointer_start = None;
        self.offset_before_remove = live_offset;
        self.remove_at = Some(now + self.tuning.unmount_delay);

        let notify = match cause {
            RemovalCause::AutoClose => Effect::NotifyAutoClose,
            RemovalCause::Swipe
            | RemovalCause::CloseButton
            | RemovalCause::Action
            | RemovalCause::Cancel
            | RemovalCause::Dismissed => Effect::NotifyDismiss,
        };
        vec![notify, Effect::DropHeight(self.id.clone())]
    }

    /// Advances time: fires the auto-close deadline and the final detach.
    pub fn tick(&mut self, now: Instant, live_offset: f32) -> Vec<Effect> {
        match self.phase {
            Phase::Entering | Phase::Idle | Phase::Swiping if self.timer.expired(now) => {
                self.begin_removal(now, live_offset, RemovalCause::AutoClose)
            }
            Phase::Removing if self.remove_at.is_some_and(|at| now >= at) => {
                self.phase = Phase::Removed;
                vec![Effect::Detach]
            }
            _ => Vec::new(),
        }
    }
}
