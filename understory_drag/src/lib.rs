// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Drag: the pointer drag lifecycle.
//!
//! ## Overview
//!
//! An [`Interaction`](interaction::Interaction) ties together everything that happens
//! to one dragged element:
//!
//! - pointer tracking and release velocity,
//! - drop resolution and dropzone events through [`understory_dropzone`],
//! - release-time inertia and smooth end through [`understory_inertia`].
//!
//! The interaction is a plain value owned by the toolkit. Input and frame callbacks are
//! forwarded to its entry points together with a [`DragContext`](context::DragContext)
//! borrowing the host, the dropzone registry, a frame scheduler, and a position
//! constraint. Time is always passed in, in milliseconds.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_drag::context::{DragContext, PointerSample};
//! use understory_drag::interaction::Interaction;
//! use understory_dropzone::dom::{ElementData, ElementTree};
//! use understory_dropzone::registry::{DropRegistry, DropTarget, DropzoneConfig};
//! use understory_dropzone::types::{DragPhase, DraggableId};
//! use understory_inertia::constraint::Unconstrained;
//! use understory_inertia::frame::FrameQueue;
//! use understory_inertia::options::InertiaOptions;
//!
//! let mut tree = ElementTree::new();
//! let body = tree.insert(None, ElementData::default());
//! let card = tree.insert(Some(body), ElementData::default());
//! let column = tree.insert(
//!     Some(body),
//!     ElementData::default().with_rect(Rect::new(200.0, 0.0, 400.0, 600.0)),
//! );
//!
//! let mut registry = DropRegistry::new();
//! let zone = registry.insert(DropTarget::Element(column));
//! registry.configure(zone, DropzoneConfig::new());
//!
//! let mut frames = FrameQueue::new();
//! let mut constraint = Unconstrained;
//! let mut ctx = DragContext::new(&tree, &mut registry, &mut frames, &mut constraint);
//!
//! let mut drag = Interaction::new(DraggableId(1), card, InertiaOptions::default());
//! drag.pointer_down(&mut ctx, PointerSample::at(0, Point::new(10.0, 10.0), 0.0), card);
//! drag.start(&mut ctx, 0.0);
//! drag.pointer_move(&mut ctx, PointerSample::at(0, Point::new(250.0, 40.0), 100.0), None);
//! let events = drag.pointer_up(&mut ctx, PointerSample::at(0, Point::new(250.0, 40.0), 150.0), None);
//!
//! assert_eq!(events[0].phase, DragPhase::End);
//! assert_eq!(events[0].dropzone, Some(zone));
//! ```

pub mod context;
pub mod interaction;
