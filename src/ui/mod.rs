// SPDX-License-Identifier: MPL-2.0
//! Iced rendering of the toast surface.
//!
//! # Modules
//!
//! - [`toaster`] - The toaster layer and its subscriptions
//! - [`toast`] - View of a single toast
//! - [`widgets`] - Height-measuring wrapper and loading spinner
//! - [`styles`] - Toast colors, class names and widget styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`icons`] - Kind glyphs

pub mod design_tokens;
pub mod icons;
pub mod styles;
pub mod theming;
pub mod toast;
pub mod toaster;
pub mod widgets;

pub use toaster::{subscription, toaster, ToasterView};
