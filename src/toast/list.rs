// SPDX-License-Identifier: MPL-2.0
//! Plain mirror of a store's toasts, for code that wants to observe them
//! without rendering anything.
//!
//! Unlike the surface, a dismissed toast disappears immediately: there is
//! no exit transition to wait for.

use super::record::{ToastEvent, ToastId, ToastRecord};

#[derive(Debug, Clone, Default)]
pub struct ToastList {
    /// Newest first.
    toasts: Vec<ToastRecord>,
}

impl ToastList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &ToastEvent) {
        match event {
            ToastEvent::Upsert { id, fields } => {
                match self.toasts.iter_mut().find(|t| &t.id == id) {
                    Some(record) => record.merge(fields),
                    None => self
                        .toasts
                        .insert(0, ToastRecord::from_options(id.clone(), fields)),
                }
            }
            ToastEvent::Dismiss { id } => self.toasts.retain(|t| &t.id != id),
        }
    }

    #[must_use]
    pub fn toasts(&self) -> &[ToastRecord] {
        &self.toasts
    }

    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<&ToastRecord> {
        self.toasts.iter().find(|t| &t.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::record::ToastOptions;

    fn upsert(id: u64, title: &str) -> ToastEvent {
        ToastEvent::Upsert {
            id: ToastId::Num(id),
            fields: ToastOptions::new().title(title),
        }
    }

    #[test]
    fn mirrors_creates_updates_and_dismisses() {
        let mut list = ToastList::new();
        list.apply(&upsert(1, "a"));
        list.apply(&upsert(2, "b"));
        list.apply(&upsert(1, "a2"));

        let titles: Vec<_> = list.toasts().iter().filter_map(|t| t.title.as_deref()).collect();
        assert_eq!(titles, vec!["b", "a2"]);

        list.apply(&ToastEvent::Dismiss { id: ToastId::Num(2) });
        assert_eq!(list.len(), 1);
        assert!(list.get(&ToastId::Num(2)).is_none());
    }

    #[test]
    fn unknown_dismiss_is_harmless() {
        let mut list = ToastList::new();
        list.apply(&ToastEvent::Dismiss { id: ToastId::Num(9) });
        assert!(list.is_empty());
    }
}
