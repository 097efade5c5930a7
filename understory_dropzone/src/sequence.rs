// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop event sequencing: turn successive resolutions into dropzone lifecycle events.
//!
//! ## Usage
//!
//! 1) Resolve the tick with [`resolve_drop`](crate::resolve::resolve_drop) and store it
//!    with [`DropState::set_resolution`].
//! 2) Build the bundle with [`DropState::drop_events`]; this also annotates the drag event
//!    with `drag_enter`/`drag_leave`/`dropzone`/`prev_dropzone`.
//! 3) Deliver it with [`DropState::fire_drop_events`], which commits the resolution as the
//!    previous one.
//!
//! ## Ordering
//!
//! When the winner changes from A to B, `dragleave` for A is fired strictly before
//! `dragenter` for B. The complete firing order is leave, enter, move, drop, deactivate.
//! `dropactivate` and `dropdeactivate` are broadcasts: every active drop receives them,
//! skipping consecutive entries with the same element.

use crate::active::ActiveDropSet;
use crate::host::Host;
use crate::registry::DropRegistry;
use crate::resolve::Resolution;
use crate::types::{DragEvent, DragPhase, DropEvent, DropEventKind, DropzoneId};

/// The events synthesized for one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct DropEvents<E> {
    /// `dragenter` for the new winner.
    pub enter: Option<DropEvent<E>>,
    /// `dragleave` for the previous winner.
    pub leave: Option<DropEvent<E>>,
    /// `dropactivate` broadcast.
    pub activate: Option<DropEvent<E>>,
    /// `dropdeactivate` broadcast.
    pub deactivate: Option<DropEvent<E>>,
    /// `dropmove` for the current winner.
    pub drop_move: Option<DropEvent<E>>,
    /// `drop` for the current winner.
    pub drop: Option<DropEvent<E>>,
}

impl<E> Default for DropEvents<E> {
    fn default() -> Self {
        Self {
            enter: None,
            leave: None,
            activate: None,
            deactivate: None,
            drop_move: None,
            drop: None,
        }
    }
}

/// Drop-related state of one interaction.
///
/// Writers:
/// - `drop_target`/`drop_element`: the resolver, through [`DropState::set_resolution`].
/// - `prev_drop_target`/`prev_drop_element`: the sequencer, in [`DropState::fire_drop_events`].
/// - `active_drops`: collection at drag start, or the resolver in dynamic mode.
#[derive(Clone, Debug)]
pub struct DropState<E> {
    drop_target: Option<DropzoneId>,
    drop_element: Option<E>,
    prev_drop_target: Option<DropzoneId>,
    prev_drop_element: Option<E>,
    /// Candidates for the current drag.
    pub active_drops: ActiveDropSet<E>,
}

impl<E: Copy + Eq> Default for DropState<E> {
    fn default() -> Self {
        Self {
            drop_target: None,
            drop_element: None,
            prev_drop_target: None,
            prev_drop_element: None,
            active_drops: ActiveDropSet::new(),
        }
    }
}

impl<E: Copy + Eq> DropState<E> {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Winning dropzone of the current tick.
    pub fn drop_target(&self) -> Option<DropzoneId> {
        self.drop_target
    }

    /// Winning element of the current tick.
    pub fn drop_element(&self) -> Option<E> {
        self.drop_element
    }

    /// Winning dropzone as of the last fired tick.
    pub fn prev_drop_target(&self) -> Option<DropzoneId> {
        self.prev_drop_target
    }

    /// Winning element as of the last fired tick.
    pub fn prev_drop_element(&self) -> Option<E> {
        self.prev_drop_element
    }

    /// Store this tick's resolution.
    pub fn set_resolution(&mut self, resolution: Resolution<E>) {
        self.drop_target = resolution.dropzone;
        self.drop_element = resolution.element;
    }

    /// Forget current and previous winners.
    pub fn reset_targets(&mut self) {
        self.drop_target = None;
        self.drop_element = None;
        self.prev_drop_target = None;
        self.prev_drop_element = None;
    }

    /// Build the events for this tick, annotating `drag_event` with cross-references.
    pub fn drop_events(&self, drag_event: &mut DragEvent<E>) -> DropEvents<E> {
        let mut kinds = [None::<DropEventKind>; 6];
        let changed = self.drop_element != self.prev_drop_element;

        if changed && self.prev_drop_target.is_some() {
            kinds[0] = Some(DropEventKind::DragLeave);
            drag_event.drag_leave = self.prev_drop_element;
            drag_event.prev_dropzone = self.prev_drop_target;
        }
        if changed && self.drop_target.is_some() {
            kinds[1] = Some(DropEventKind::DragEnter);
            drag_event.drag_enter = self.drop_element;
            drag_event.dropzone = self.drop_target;
        }
        if drag_event.phase == DragPhase::End && self.drop_target.is_some() {
            kinds[2] = Some(DropEventKind::Drop);
            drag_event.dropzone = self.drop_target;
        }
        if drag_event.phase == DragPhase::Start {
            kinds[3] = Some(DropEventKind::DropActivate);
        }
        if drag_event.phase == DragPhase::End {
            kinds[4] = Some(DropEventKind::DropDeactivate);
        }
        if drag_event.phase == DragPhase::Move && self.drop_target.is_some() {
            kinds[5] = Some(DropEventKind::DropMove);
            drag_event.dropzone = self.drop_target;
        }

        // Every event shares the fully annotated drag event.
        let make = |kind: Option<DropEventKind>| {
            kind.map(|kind| {
                let (target, dropzone) = match kind {
                    DropEventKind::DragLeave => (self.prev_drop_element, self.prev_drop_target),
                    DropEventKind::DropActivate | DropEventKind::DropDeactivate => (None, None),
                    _ => (self.drop_element, self.drop_target),
                };
                DropEvent {
                    kind,
                    target,
                    dropzone,
                    related_target: drag_event.target,
                    draggable: drag_event.draggable,
                    timestamp: drag_event.timestamp,
                    drag_event: drag_event.clone(),
                }
            })
        };
        let [leave, enter, drop, activate, deactivate, drop_move] = kinds;
        DropEvents {
            leave: make(leave),
            enter: make(enter),
            drop: make(drop),
            activate: make(activate),
            deactivate: make(deactivate),
            drop_move: make(drop_move),
        }
    }

    /// Deliver a bundle (except `activate`, see [`DropState::fire_active_drops`]) and
    /// commit the current winner as the previous one.
    pub fn fire_drop_events<H: Host<Element = E>>(
        &mut self,
        registry: &mut DropRegistry<H>,
        events: DropEvents<E>,
    ) {
        if let (Some(ev), Some(prev)) = (&events.leave, self.prev_drop_target) {
            registry.fire(prev, ev);
        }
        if let Some(target) = self.drop_target {
            for ev in [&events.enter, &events.drop_move, &events.drop]
                .into_iter()
                .flatten()
            {
                registry.fire(target, ev);
            }
        }
        if let Some(ev) = events.deactivate {
            self.fire_active_drops(registry, ev);
        }

        self.prev_drop_target = self.drop_target;
        self.prev_drop_element = self.drop_element;
    }

    /// Broadcast `event` to every active drop, setting `target` per receiver.
    ///
    /// Consecutive entries with the same element receive the event once.
    pub fn fire_active_drops<H: Host<Element = E>>(
        &self,
        registry: &mut DropRegistry<H>,
        mut event: DropEvent<E>,
    ) {
        let mut prev_element = None;
        for drop in self.active_drops.iter() {
            if prev_element != Some(drop.element) {
                event.target = Some(drop.element);
                registry.fire(drop.dropzone, &event);
            }
            prev_element = Some(drop.element);
        }
    }
}
