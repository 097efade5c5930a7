// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-interaction snapshot of candidate dropzones and their rectangles.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::host::Host;
use crate::registry::DropRegistry;
use crate::types::DropzoneId;

/// One candidate with the rectangle captured when the set was built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActiveDrop<E> {
    /// Owning registration.
    pub dropzone: DropzoneId,
    /// Dropzone element.
    pub element: E,
    /// Rectangle at capture time; `None` if the element had no layout box.
    ///
    /// May be stale until the set is rebuilt.
    pub rect: Option<Rect>,
}

/// Ordered candidates for one interaction.
///
/// Built once at drag start, or rebuilt on every move when the registry's
/// [dynamic drop](DropRegistry::set_dynamic_drop) is on. Rebuilds replace the
/// whole set.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveDropSet<E> {
    drops: Vec<ActiveDrop<E>>,
}

impl<E> Default for ActiveDropSet<E> {
    fn default() -> Self {
        Self { drops: Vec::new() }
    }
}

impl<E: Copy + Eq> ActiveDropSet<E> {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the registry's candidates for `dragged`, capturing rectangles.
    pub fn collect<H: Host<Element = E>>(
        &mut self,
        registry: &DropRegistry<H>,
        host: &H,
        dragged: &E,
    ) {
        self.drops = registry
            .collect_drops(host, dragged)
            .into_iter()
            .map(|c| ActiveDrop {
                dropzone: c.dropzone,
                element: c.element,
                rect: host.rect_of(&c.element),
            })
            .collect();
    }

    /// Remove all candidates.
    pub fn clear(&mut self) {
        self.drops.clear();
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.drops.len()
    }

    /// Returns true if there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Candidate at `index`.
    pub fn get(&self, index: usize) -> Option<&ActiveDrop<E>> {
        self.drops.get(index)
    }

    /// Candidates in collection order.
    pub fn iter(&self) -> core::slice::Iter<'_, ActiveDrop<E>> {
        self.drops.iter()
    }

    /// Candidates as a slice.
    pub fn as_slice(&self) -> &[ActiveDrop<E>] {
        &self.drops
    }
}
