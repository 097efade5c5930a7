// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborators borrowed by an interaction for the duration of one entry point.

use kurbo::Point;
use understory_dropzone::host::Host;
use understory_dropzone::registry::DropRegistry;
use understory_inertia::constraint::PositionConstraint;
use understory_inertia::frame::FrameScheduler;
use understory_inertia::pointer::PointerCoords;

/// Everything an [`Interaction`](crate::interaction::Interaction) needs from its owner.
pub struct DragContext<'a, H: Host> {
    /// Element tree, geometry, and selectors.
    pub host: &'a H,
    /// Dropzone registrations; listeners fire through it.
    pub registry: &'a mut DropRegistry<H>,
    /// Display-refresh scheduler for simulations.
    pub frames: &'a mut dyn FrameScheduler,
    /// Where the dragged element may come to rest.
    pub constraint: &'a mut dyn PositionConstraint,
}

impl<'a, H: Host> DragContext<'a, H> {
    /// Bundle the collaborators.
    pub fn new(
        host: &'a H,
        registry: &'a mut DropRegistry<H>,
        frames: &'a mut dyn FrameScheduler,
        constraint: &'a mut dyn PositionConstraint,
    ) -> Self {
        Self {
            host,
            registry,
            frames,
            constraint,
        }
    }
}

impl<H: Host> core::fmt::Debug for DragContext<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragContext")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// One pointer input sample, already extracted from the toolkit's event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    /// Identifies the pointer among those currently down.
    pub pointer_id: u32,
    /// Page coordinates.
    pub page: Point,
    /// Client (viewport) coordinates.
    pub client: Point,
    /// Milliseconds.
    pub timestamp: f64,
}

impl PointerSample {
    /// A sample whose page and client positions coincide.
    pub fn at(pointer_id: u32, pos: Point, timestamp: f64) -> Self {
        Self {
            pointer_id,
            page: pos,
            client: pos,
            timestamp,
        }
    }

    /// The sample's coordinates.
    pub fn coords(&self) -> PointerCoords {
        PointerCoords {
            page: self.page,
            client: self.client,
            timestamp: self.timestamp,
        }
    }
}
