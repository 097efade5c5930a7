// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for drop detection: identifiers, overlap policies, and drag/drop events.
//!
//! ## Overview
//!
//! A drag produces [`DragEvent`]s on the draggable side (`dragstart`, `dragmove`,
//! `dragend`, `draginertiastart`). Dropzones receive [`DropEvent`]s synthesized by the
//! [sequencer](crate::sequence) from successive resolutions.

use core::str::FromStr;

use kurbo::{Point, Vec2};

/// Identifier for a dropzone registration in a [`DropRegistry`](crate::registry::DropRegistry).
///
/// Consists of a slot index and a generation counter. A slot freed by
/// [`DropRegistry::unset`](crate::registry::DropRegistry::unset) is reused with a higher
/// generation, so stale identifiers never alias a later registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DropzoneId(pub(crate) u32, pub(crate) u32);

impl DropzoneId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifier for the draggable registration that owns an interaction.
///
/// Assigned by the toolkit; carried on every [`DragEvent`] and [`DropEvent`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DraggableId(pub u32);

/// How a dragged element is tested against a dropzone.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Overlap {
    /// The pointer must be strictly inside the dropzone rectangle.
    #[default]
    Pointer,
    /// The center of the dragged element must be inside the dropzone rectangle (inclusive).
    Center,
    /// `(intersection area) / (dragged area)` must be at least this ratio in `[0, 1]`.
    Ratio(f64),
}

impl Overlap {
    /// Build a ratio policy, clamping into `[0, 1]`.
    ///
    /// Returns `None` for NaN.
    pub fn ratio(r: f64) -> Option<Self> {
        if r.is_nan() {
            None
        } else {
            Some(Self::Ratio(r.clamp(0.0, 1.0)))
        }
    }

    /// Returns a normalized copy, or `None` if the policy is not usable.
    ///
    /// Ratios are clamped into `[0, 1]`; a NaN ratio is rejected.
    pub fn normalized(self) -> Option<Self> {
        match self {
            Self::Ratio(r) => Self::ratio(r),
            other => Some(other),
        }
    }
}

/// Error returned when parsing an [`Overlap`] from text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum OverlapParseError {
    /// Neither `pointer`, `center`, nor a number.
    #[error("overlap must be `pointer`, `center` or a number")]
    Unknown,
    /// The text parsed as NaN.
    #[error("overlap ratio is not a number")]
    NotANumber,
}

impl FromStr for Overlap {
    type Err = OverlapParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pointer" => Ok(Self::Pointer),
            "center" => Ok(Self::Center),
            other => {
                let r: f64 = other.trim().parse().map_err(|_| OverlapParseError::Unknown)?;
                Self::ratio(r).ok_or(OverlapParseError::NotANumber)
            }
        }
    }
}

/// Phase of a drag as seen by the draggable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DragPhase {
    /// The drag has started.
    Start,
    /// The dragged element moved (by the pointer or a running simulation).
    Move,
    /// The drag ended.
    End,
    /// The pointer was released and an inertia or smooth-end simulation took over.
    InertiaStart,
}

impl DragPhase {
    /// Event type name for this phase.
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::Start => "dragstart",
            Self::Move => "dragmove",
            Self::End => "dragend",
            Self::InertiaStart => "draginertiastart",
        }
    }
}

/// An event on the draggable side of an interaction.
///
/// `page` and `client` are relative to the draggable's coordinate origin
/// (see [`Host::origin_of`](crate::host::Host::origin_of)).
///
/// The cross-reference fields (`drag_enter`, `drag_leave`, `dropzone`, `prev_dropzone`)
/// are annotated by [`DropState::drop_events`](crate::sequence::DropState::drop_events).
#[derive(Clone, Debug, PartialEq)]
pub struct DragEvent<E> {
    /// Drag phase.
    pub phase: DragPhase,
    /// The dragged element.
    pub target: E,
    /// The draggable registration.
    pub draggable: DraggableId,
    /// Page coordinates of the pointer.
    pub page: Point,
    /// Client (viewport) coordinates of the pointer.
    pub client: Point,
    /// Page-space movement since the previous drag event.
    pub delta: Vec2,
    /// Milliseconds.
    pub timestamp: f64,
    /// True while the event was produced by an inertia or smooth-end simulation.
    pub inertia: bool,
    /// Element entered during this tick.
    pub drag_enter: Option<E>,
    /// Element left during this tick.
    pub drag_leave: Option<E>,
    /// Dropzone currently under the drag.
    pub dropzone: Option<DropzoneId>,
    /// Dropzone left during this tick.
    pub prev_dropzone: Option<DropzoneId>,
}

impl<E> DragEvent<E> {
    /// Create an event with no cross-references.
    pub fn new(
        phase: DragPhase,
        target: E,
        draggable: DraggableId,
        page: Point,
        client: Point,
        timestamp: f64,
    ) -> Self {
        Self {
            phase,
            target,
            draggable,
            page,
            client,
            delta: Vec2::ZERO,
            timestamp,
            inertia: false,
            drag_enter: None,
            drag_leave: None,
            dropzone: None,
            prev_dropzone: None,
        }
    }

    /// Event type name, e.g. `dragmove`.
    pub fn event_type(&self) -> &'static str {
        self.phase.event_type()
    }
}

/// Kind of a dropzone event.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DropEventKind {
    /// The drag entered a dropzone element.
    DragEnter,
    /// The drag left a dropzone element.
    DragLeave,
    /// A compatible drag started (broadcast).
    DropActivate,
    /// A compatible drag ended (broadcast).
    DropDeactivate,
    /// The drag moved while over a dropzone element.
    DropMove,
    /// The drag ended over a dropzone element.
    Drop,
}

impl DropEventKind {
    /// Event type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DragEnter => "dragenter",
            Self::DragLeave => "dragleave",
            Self::DropActivate => "dropactivate",
            Self::DropDeactivate => "dropdeactivate",
            Self::DropMove => "dropmove",
            Self::Drop => "drop",
        }
    }
}

/// Event types emitted to dropzones, followed by the draggable-side inertia start.
///
/// Toolkits that keep a set of recognized event names should add all of these.
pub const EVENT_TYPES: [&str; 7] = [
    DropEventKind::DragEnter.as_str(),
    DropEventKind::DragLeave.as_str(),
    DropEventKind::DropActivate.as_str(),
    DropEventKind::DropDeactivate.as_str(),
    DropEventKind::DropMove.as_str(),
    DropEventKind::Drop.as_str(),
    DragPhase::InertiaStart.event_type(),
];

/// An event delivered to a dropzone.
#[derive(Clone, Debug, PartialEq)]
pub struct DropEvent<E> {
    /// Event kind.
    pub kind: DropEventKind,
    /// Dropzone element receiving the event.
    ///
    /// For broadcasts this is set per receiver while firing.
    pub target: Option<E>,
    /// Dropzone registration; `None` for activate/deactivate broadcasts.
    pub dropzone: Option<DropzoneId>,
    /// The dragged element.
    pub related_target: E,
    /// The draggable registration.
    pub draggable: DraggableId,
    /// Milliseconds, copied from the drag event.
    pub timestamp: f64,
    /// The drag event that caused this event, with its cross-references filled in.
    pub drag_event: DragEvent<E>,
}

impl<E> DropEvent<E> {
    /// Event type name, e.g. `dragenter`.
    pub fn event_type(&self) -> &'static str {
        self.kind.as_str()
    }
}
