// SPDX-License-Identifier: MPL-2.0
//! Height registry and stacking offsets.
//!
//! Every mounted toast registers its measured height. Entries are kept
//! newest-first, so the most recent toast sits against the anchored screen
//! edge and older toasts are pushed outward by everything created after
//! them.
//!
//! The registry is a value: every write returns a new registry keyed by
//! toast id (insert-if-absent, else replace). Entries are never mutated in
//! place, so writes from several toasts commute.

use super::record::{Position, ToastId};

/// Measured height of one mounted toast.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightEntry {
    pub toast_id: ToastId,
    pub height: f32,
    pub position: Position,
}

/// Ordered snapshot of registered heights, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Heights {
    entries: Vec<HeightEntry>,
}

impl Heights {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entry with the same id, or prepends a new one.
    #[must_use]
    pub fn upsert(&self, entry: HeightEntry) -> Self {
        if self.index_of(&entry.toast_id).is_some() {
            let entries = self
                .entries
                .iter()
                .map(|existing| {
                    if existing.toast_id == entry.toast_id {
                        entry.clone()
                    } else {
                        existing.clone()
                    }
                })
                .collect();
            return Self { entries };
        }

        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(entry);
        entries.extend(self.entries.iter().cloned());
        Self { entries }
    }

    /// Drops the entry for `id`, if any.
    #[must_use]
    pub fn without(&self, id: &ToastId) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| &entry.toast_id != id)
                .cloned()
                .collect(),
        }
    }

    /// Entries of a single position group, order preserved.
    #[must_use]
    pub fn group(&self, position: Position) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| entry.position == position)
                .cloned()
                .collect(),
        }
    }

    #[must_use]
    pub fn index_of(&self, id: &ToastId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.toast_id == id)
    }

    /// Offset of `id` within this snapshot, `None` if it is not registered.
    #[must_use]
    pub fn offset_of(&self, id: &ToastId, gap: f32) -> Option<f32> {
        self.index_of(id)
            .map(|index| stack_offset(index, self.entries.iter().map(|e| e.height), gap))
    }

    /// Offsets of every entry, in registry order.
    #[must_use]
    pub fn offsets(&self, gap: f32) -> Vec<f32> {
        let mut before = 0.0;
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let offset = index as f32 * gap + before;
                before += entry.height;
                offset
            })
            .collect()
    }

    /// Height of the front-most entry, `0.0` when empty.
    #[must_use]
    pub fn front_height(&self) -> f32 {
        self.entries.first().map_or(0.0, |entry| entry.height)
    }

    #[must_use]
    pub fn height_of(&self, id: &ToastId) -> Option<f32> {
        self.entries
            .iter()
            .find(|entry| &entry.toast_id == id)
            .map(|entry| entry.height)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeightEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `index * gap + sum(heights before index)`.
pub fn stack_offset(index: usize, heights: impl IntoIterator<Item = f32>, gap: f32) -> f32 {
    let before: f32 = heights.into_iter().take(index).sum();
    index as f32 * gap + before
}
