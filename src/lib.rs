// SPDX-License-Identifier: MPL-2.0
//! `iced_toaster` renders stacked toast notifications in Iced applications.
//!
//! Producers push toasts into a [`toast::ToastStore`]; a [`toast::Toaster`]
//! surface follows the store and [`ui::toaster`] draws it as a layer over
//! the application. Preferences live in a `settings.toml` handled by
//! [`config`].

#![doc(html_root_url = "https://docs.rs/iced_toaster/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod toast;
pub mod ui;
