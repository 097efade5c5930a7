// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag interaction: one draggable, its pointers, drops, and release simulation.
//!
//! ## Entry points
//!
//! The owner forwards input and frame callbacks; nothing runs on its own:
//!
//! - [`Interaction::pointer_down`]: records the pointer, may resume a running simulation.
//! - [`Interaction::start`]: `dragstart`; collects candidate dropzones and broadcasts `dropactivate`.
//! - [`Interaction::pointer_move`]: updates velocity and, while dragging, emits `dragmove`.
//! - [`Interaction::pointer_up`]: starts inertia or a smooth end, or ends the drag.
//! - [`Interaction::frame`]: one simulation frame.
//! - [`Interaction::end`] and [`Interaction::stop`]: `dragend`, then teardown.
//!
//! Each entry point returns the draggable-side [`DragEvent`]s it produced, in order.
//! Dropzone events go to listeners on the [`DropRegistry`](understory_dropzone::registry::DropRegistry)
//! while the entry point runs.
//!
//! ## Ownership
//!
//! The interaction owns its [`DropState`] and [`InertiaState`]. Only drop resolution
//! writes the current drop target, only event sequencing writes the previous one,
//! and only candidate collection writes the active drops.

use kurbo::{Point, Vec2};
use understory_dropzone::host::{Host, is_inclusive_ancestor};
use understory_dropzone::resolve::resolve_drop;
use understory_dropzone::sequence::DropState;
use understory_dropzone::types::{DragEvent, DragPhase, DraggableId};
use understory_inertia::frame::FrameHandle;
use understory_inertia::options::InertiaOptions;
use understory_inertia::pointer::{PointerCoords, PointerDelta};
use understory_inertia::state::{FrameStep, InertiaState, Release, ReleaseDecision, Simulation};

use crate::context::{DragContext, PointerSample};

/// A drag interaction for one draggable element.
pub struct Interaction<H: Host> {
    draggable: DraggableId,
    element: H::Element,
    /// Release behavior; read at every release and frame.
    pub inertia_options: InertiaOptions,
    drop: DropState<H::Element>,
    inertia: InertiaState<DragEvent<H::Element>>,
    cur: PointerCoords,
    prev: PointerCoords,
    delta: PointerDelta,
    pointers: Vec<u32>,
    interacting: bool,
    prev_event: Option<DragEvent<H::Element>>,
}

impl<H: Host> core::fmt::Debug for Interaction<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Interaction")
            .field("draggable", &self.draggable)
            .field("element", &self.element)
            .field("interacting", &self.interacting)
            .field("simulation", &self.inertia.simulation())
            .field("cur", &self.cur)
            .field("pointers", &self.pointers)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Interaction<H> {
    /// A new idle interaction dragging `element` on behalf of `draggable`.
    pub fn new(
        draggable: DraggableId,
        element: H::Element,
        inertia_options: InertiaOptions,
    ) -> Self {
        Self {
            draggable,
            element,
            inertia_options,
            drop: DropState::new(),
            inertia: InertiaState::new(),
            cur: PointerCoords::default(),
            prev: PointerCoords::default(),
            delta: PointerDelta::default(),
            pointers: Vec::new(),
            interacting: false,
            prev_event: None,
        }
    }

    /// The draggable registration.
    pub fn draggable(&self) -> DraggableId {
        self.draggable
    }

    /// The dragged element.
    pub fn element(&self) -> H::Element {
        self.element
    }

    /// Returns true between `dragstart` and `dragend`.
    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// The running release simulation, if any.
    pub fn simulation(&self) -> Option<Simulation> {
        self.inertia.simulation()
    }

    /// Drop targets and active drops.
    pub fn drop_state(&self) -> &DropState<H::Element> {
        &self.drop
    }

    /// Simulation state.
    pub fn inertia_state(&self) -> &InertiaState<DragEvent<H::Element>> {
        &self.inertia
    }

    /// Latest pointer (or simulated) coordinates.
    pub fn coords(&self) -> PointerCoords {
        self.cur
    }

    /// Movement between the two latest coordinates.
    pub fn pointer_delta(&self) -> PointerDelta {
        self.delta
    }

    /// The latest draggable-side event.
    pub fn prev_event(&self) -> Option<&DragEvent<H::Element>> {
        self.prev_event.as_ref()
    }

    /// Pointer went down on `event_target`.
    ///
    /// Returns true if this resumed a running simulation: the target is the dragged
    /// element or inside it and the options allow resuming.
    pub fn pointer_down(
        &mut self,
        ctx: &mut DragContext<'_, H>,
        sample: PointerSample,
        event_target: H::Element,
    ) -> bool {
        if !self.pointers.contains(&sample.pointer_id) {
            self.pointers.push(sample.pointer_id);
        }
        let resumed = self.inertia.is_active()
            && is_inclusive_ancestor(ctx.host, &self.element, &event_target)
            && self.inertia.resume(ctx.frames);
        if resumed || !self.interacting {
            self.cur = sample.coords();
            self.prev = self.cur;
            self.delta = PointerDelta::default();
        }
        resumed
    }

    /// Start dragging: collect candidate dropzones, emit `dragstart`, broadcast `dropactivate`.
    ///
    /// Does nothing while already dragging.
    pub fn start(&mut self, ctx: &mut DragContext<'_, H>, now: f64) -> Vec<DragEvent<H::Element>> {
        if self.interacting {
            return Vec::new();
        }
        self.interacting = true;
        self.drop.active_drops.clear();
        self.drop
            .active_drops
            .collect(ctx.registry, ctx.host, &self.element);

        let mut ev = self.event(ctx.host, DragPhase::Start, now);
        let events = self.drop.drop_events(&mut ev);
        if let Some(activate) = events.activate {
            self.drop.fire_active_drops(ctx.registry, activate);
        }
        tracing::debug!(
            element = ?self.element,
            candidates = self.drop.active_drops.len(),
            "drag started"
        );
        self.prev_event = Some(ev.clone());
        vec![ev]
    }

    /// Pointer moved.
    ///
    /// Moves that repeat the current coordinates, and moves while a simulation
    /// drives the element, are ignored.
    pub fn pointer_move(
        &mut self,
        ctx: &mut DragContext<'_, H>,
        sample: PointerSample,
        input: Option<&H::Input>,
    ) -> Vec<DragEvent<H::Element>> {
        if self.inertia.is_active() {
            return Vec::new();
        }
        if sample.page == self.cur.page && sample.client == self.cur.client {
            return Vec::new();
        }
        self.set_coords(sample.coords());
        if !self.interacting {
            return Vec::new();
        }
        let mut ev = self.event(ctx.host, DragPhase::Move, sample.timestamp);
        ev.delta = self
            .inertia
            .apply_resume_delta(&self.inertia_options, self.delta.page);
        self.resolve_and_fire(ctx, &mut ev, input);
        self.prev_event = Some(ev.clone());
        vec![ev]
    }

    /// Pointer released.
    ///
    /// Starts inertia or a smooth end when the release qualifies (returning the
    /// `draginertiastart` event), otherwise ends the drag.
    pub fn pointer_up(
        &mut self,
        ctx: &mut DragContext<'_, H>,
        sample: PointerSample,
        input: Option<&H::Input>,
    ) -> Vec<DragEvent<H::Element>> {
        let multi_pointer = self.pointers.len() > 1;
        self.pointers.retain(|id| *id != sample.pointer_id);
        if !self.interacting || self.inertia.is_active() {
            return Vec::new();
        }

        let now = sample.timestamp;
        let release = Release {
            up: self.cur,
            velocity: self.delta.client_velocity,
            speed: self.delta.speed(),
            now,
            last_move: self.cur.timestamp,
            multi_pointer,
            replay: self
                .inertia
                .start_event()
                .is_some_and(|start| start.timestamp == now),
        };
        let decision =
            self.inertia
                .evaluate_release(&self.inertia_options, &release, ctx.constraint);
        if decision == ReleaseDecision::None {
            return self.end(ctx, input, now);
        }

        let mut start = self.event(ctx.host, DragPhase::InertiaStart, now);
        start.delta = self.prev_event.as_ref().map_or(Vec2::ZERO, |p| p.delta);
        start.inertia = true;
        match decision {
            ReleaseDecision::Inertia => self.inertia.begin_inertia(
                &self.inertia_options,
                &release,
                start.clone(),
                ctx.constraint,
                ctx.frames,
            ),
            ReleaseDecision::SmoothEnd(target) => self.inertia.begin_smooth_end(
                &self.inertia_options,
                self.cur,
                target,
                start.clone(),
                now,
                ctx.frames,
            ),
            ReleaseDecision::None => {}
        }
        self.prev_event = Some(start.clone());
        vec![start]
    }

    /// A frame callback for `handle`. Stale handles are ignored.
    ///
    /// Returns the simulated `dragmove` and, on the last frame, the `dragend`.
    pub fn frame(
        &mut self,
        ctx: &mut DragContext<'_, H>,
        handle: FrameHandle,
        now: f64,
    ) -> Vec<DragEvent<H::Element>> {
        if !self.inertia.accept_frame(handle) {
            return Vec::new();
        }
        match self.inertia.step(&self.inertia_options, now, ctx.frames) {
            FrameStep::Idle => Vec::new(),
            FrameStep::Moved(_) => vec![self.simulated_move(ctx, now)],
            FrameStep::Finished(_) => {
                let mut out = vec![self.simulated_move(ctx, now)];
                out.extend(self.end(ctx, None, now));
                self.inertia.finish();
                out
            }
        }
    }

    /// End the drag: emit `dragend` (firing `drop` and `dropdeactivate`), then [stop](Self::stop).
    pub fn end(
        &mut self,
        ctx: &mut DragContext<'_, H>,
        input: Option<&H::Input>,
        now: f64,
    ) -> Vec<DragEvent<H::Element>> {
        if !self.interacting {
            return Vec::new();
        }
        let mut ev = self.event(ctx.host, DragPhase::End, now);
        ev.delta = self
            .prev_event
            .as_ref()
            .map_or(Vec2::ZERO, |p| ev.page - p.page);
        ev.inertia = self.inertia.is_active();
        self.resolve_and_fire(ctx, &mut ev, input);
        tracing::debug!(element = ?self.element, dropzone = ?ev.dropzone, "drag ended");
        self.stop(ctx);
        self.prev_event = Some(ev.clone());
        vec![ev]
    }

    /// Tear down without emitting events: clear drops and cancel any simulation.
    pub fn stop(&mut self, ctx: &mut DragContext<'_, H>) {
        self.interacting = false;
        self.drop.active_drops.clear();
        self.drop.reset_targets();
        self.inertia.stop(ctx.frames);
    }

    // --- internals ---

    fn set_coords(&mut self, coords: PointerCoords) {
        self.prev = self.cur;
        self.cur = coords;
        self.delta = PointerDelta::between(&self.prev, &self.cur);
    }

    // A drag event at the current coordinates, relative to the draggable's origin.
    fn event(&self, host: &H, phase: DragPhase, now: f64) -> DragEvent<H::Element> {
        let origin = host.origin_of(&self.element);
        DragEvent::new(
            phase,
            self.element,
            self.draggable,
            self.cur.page - origin,
            self.cur.client - origin,
            now,
        )
    }

    fn simulated_move(&mut self, ctx: &mut DragContext<'_, H>, now: f64) -> DragEvent<H::Element> {
        self.set_coords(self.inertia.current_coords(now));
        let mut ev = self.event(ctx.host, DragPhase::Move, now);
        ev.delta = self.delta.page;
        ev.inertia = true;
        // Synthesized moves carry no raw input.
        self.resolve_and_fire(ctx, &mut ev, None);
        self.prev_event = Some(ev.clone());
        ev
    }

    fn resolve_and_fire(
        &mut self,
        ctx: &mut DragContext<'_, H>,
        ev: &mut DragEvent<H::Element>,
        input: Option<&H::Input>,
    ) {
        let resolution = resolve_drop(
            ctx.registry,
            ctx.host,
            &mut self.drop.active_drops,
            ev,
            input,
            self.element,
        );
        self.drop.set_resolution(resolution);
        let events = self.drop.drop_events(ev);
        self.drop.fire_drop_events(ctx.registry, events);
    }
}

/// Page position of `ev` for hosts that work in absolute coordinates.
pub fn absolute_page<H: Host>(host: &H, ev: &DragEvent<H::Element>) -> Point {
    ev.page + host.origin_of(&ev.target)
}
