// SPDX-License-Identifier: MPL-2.0
//! Custom widgets used by the toast views.

pub mod measured;
pub mod spinner;

pub use measured::{measured, Measured, Pointer};
pub use spinner::Spinner;
