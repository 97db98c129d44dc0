// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Layout**: stack geometry around the anchored screen edge
//! - **Timing**: auto-close budget and exit transition length
//! - **Gestures**: swipe-to-dismiss thresholds
//! - **Keyboard**: stack shortcut

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Maximum number of toasts shown per position group before older ones hide.
pub const VISIBLE_TOASTS: usize = 3;

/// Lower bound for `visible_toasts`; a stack always shows its front toast.
pub const MIN_VISIBLE_TOASTS: usize = 1;

/// Gap between expanded toasts (px).
pub const GAP: f32 = 14.0;

/// Distance between the stack and the window edge (px).
pub const VIEWPORT_OFFSET: f32 = 32.0;

/// Toast width (px).
pub const TOAST_WIDTH: f32 = 356.0;

/// Upper bound for width, gap and offset values read from disk (px).
pub const MAX_LAYOUT_PX: f32 = 4096.0;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default time a toast stays on screen (ms).
pub const TOAST_LIFETIME_MS: u64 = 4000;

/// Time between the start of the exit transition and detachment (ms).
pub const UNMOUNT_DELAY_MS: u64 = 200;

/// Interval of the surface clock driving timers and animations (ms).
pub const TICK_INTERVAL_MS: u64 = 16;

/// Minimum interval between two OS theme queries (ms).
pub const THEME_POLL_INTERVAL_MS: u64 = 1000;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Swipe distance that commits a dismissal (px).
pub const SWIPE_THRESHOLD: f32 = 20.0;

/// Swipe speed that commits a dismissal regardless of distance (px/ms).
pub const VELOCITY_THRESHOLD: f32 = 0.12;

/// Motion a mouse must travel before a press becomes a swipe (px).
pub const MOUSE_SWIPE_START_THRESHOLD: f32 = 2.0;

/// Motion a finger must travel before a press becomes a swipe (px).
pub const TOUCH_SWIPE_START_THRESHOLD: f32 = 10.0;

// ==========================================================================
// Keyboard Defaults
// ==========================================================================

/// Shortcut expanding and focusing the stack.
pub const HOTKEY: &str = "Alt+T";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_defaults_are_consistent() {
        assert!(VISIBLE_TOASTS >= MIN_VISIBLE_TOASTS);
        assert!(TOAST_WIDTH < MAX_LAYOUT_PX);
        assert!(GAP > 0.0);
    }

    #[test]
    fn touch_needs_more_travel_than_mouse() {
        assert!(TOUCH_SWIPE_START_THRESHOLD > MOUSE_SWIPE_START_THRESHOLD);
        assert!(SWIPE_THRESHOLD > TOUCH_SWIPE_START_THRESHOLD);
    }

    #[test]
    fn exit_transition_is_shorter_than_lifetime() {
        assert!(UNMOUNT_DELAY_MS < TOAST_LIFETIME_MS);
        assert!(TICK_INTERVAL_MS < UNMOUNT_DELAY_MS);
    }
}
