// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Dropzone: deterministic drop target resolution for pointer drags.
//!
//! While an element is dragged, this crate answers one question per tick: which
//! single dropzone element does the drag currently qualify for? It then turns
//! successive answers into the dropzone lifecycle (`dropactivate`, `dragenter`,
//! `dropmove`, `dragleave`, `drop`, `dropdeactivate`).
//!
//! - [`host::Host`]: the toolkit seam (parents, sibling order, rectangles, selectors).
//! - [`registry::DropRegistry`]: dropzone registrations with generational [`types::DropzoneId`]s.
//! - [`active::ActiveDropSet`]: the candidates of one interaction and their cached rectangles.
//! - [`check`]: per-candidate overlap policies and custom checkers.
//! - [`resolve::resolve_drop`]: picks the deepest qualifying element.
//! - [`sequence::DropState`]: synthesizes and fires lifecycle events.
//! - [`dom::ElementTree`]: an in-memory [`host::Host`] for tests, demos, and headless use.
//!
//! Pointer tracking, inertia, and the drag lifecycle itself live in
//! `understory_drag` and `understory_inertia`.
//!
//! ## Determinism
//!
//! Resolution is a pure function of the registry, the host, and the drag event.
//! Nested dropzones resolve to the innermost qualifying element; unrelated ones
//! to the element later in document order. Registration order never matters
//! except when two registrations share an element.
//!
//! ## Example
//!
//! ```
//! use core::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use understory_dropzone::active::ActiveDropSet;
//! use understory_dropzone::dom::{ElementData, ElementTree};
//! use understory_dropzone::registry::{DropRegistry, DropTarget, DropzoneConfig};
//! use understory_dropzone::resolve::resolve_drop;
//! use understory_dropzone::sequence::DropState;
//! use understory_dropzone::types::{DragEvent, DragPhase, DraggableId};
//!
//! let mut tree = ElementTree::new();
//! let body = tree.insert(None, ElementData::default());
//! let item = tree.insert(Some(body), ElementData::default());
//! let bin = tree.insert(
//!     Some(body),
//!     ElementData::default().with_rect(Rect::new(100.0, 0.0, 200.0, 100.0)),
//! );
//!
//! let entered = Rc::new(RefCell::new(0));
//! let mut registry = DropRegistry::new();
//! let zone = registry.insert(DropTarget::Element(bin));
//! let counter = entered.clone();
//! registry.configure(
//!     zone,
//!     DropzoneConfig::new().ondragenter(move |_| *counter.borrow_mut() += 1),
//! );
//!
//! let mut state = DropState::new();
//! state.active_drops.collect(&registry, &tree, &item);
//!
//! let p = Point::new(150.0, 50.0);
//! let mut ev = DragEvent::new(DragPhase::Move, item, DraggableId(0), p, p, 16.0);
//! let winner = resolve_drop(&registry, &tree, &mut state.active_drops, &ev, None, item);
//! assert_eq!(winner.element, Some(bin));
//!
//! state.set_resolution(winner);
//! let events = state.drop_events(&mut ev);
//! state.fire_drop_events(&mut registry, events);
//! assert_eq!(*entered.borrow(), 1);
//! assert_eq!(ev.dropzone, Some(zone));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod active;
pub mod check;
pub mod dom;
pub mod host;
pub mod registry;
pub mod resolve;
pub mod sequence;
pub mod types;
