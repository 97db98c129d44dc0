// SPDX-License-Identifier: MPL-2.0
//! Toast notifications: the store producers talk to, and the surface state
//! that turns its events into a stack of toasts.
//!
//! ```no_run
//! use iced_toaster::toast::{ToastOptions, ToastStore};
//!
//! let store = ToastStore::new();
//! let id = store.loading("Uploading…", ToastOptions::new());
//! store.update(id, ToastOptions::new().title("Uploaded"));
//! ```

pub mod feed;
pub mod heights;
pub mod hotkey;
pub mod lifecycle;
pub mod list;
pub mod record;
pub mod store;
pub mod toaster;

pub use feed::ToastFeed;
pub use heights::{HeightEntry, Heights};
pub use hotkey::Hotkey;
pub use lifecycle::{Lifecycle, Phase, PointerKind};
pub use list::ToastList;
pub use record::{
    Action, ActionEvent, ClassNames, Position, PromiseState, ToastDuration, ToastEvent, ToastId,
    ToastKind, ToastOptions, ToastRecord,
};
pub use store::{PromiseHandlers, PromiseToast, ToastStore, Unsubscribe};
pub use toaster::{StackItem, ToastInput, Toaster};
