// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropzone registrations and candidate collection.
//!
//! ## Overview
//!
//! A [`DropRegistry`] owns every drop-capable registration in registration order.
//! Each [`Dropzone`] pairs a target (a literal element or a selector query) with
//! [`DropOptions`] and per-kind listeners.
//!
//! [`DropRegistry::collect_drops`] is the candidate collector: for a dragged element it
//! produces the `(dropzone, element)` pairs that could receive it, in registry order
//! and then per-target element order. This order is used for rectangle capture and
//! broadcasts; it is *not* the resolution tie-break order (see [`resolve`](crate::resolve)).

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::check::DropCheck;
use crate::host::Host;
use crate::types::{DropEvent, DropEventKind, DropzoneId, Overlap};

/// Filter over the dragged elements a dropzone accepts.
pub enum Accept<H: Host> {
    /// Any dragged element.
    Any,
    /// Only this exact element.
    Element(H::Element),
    /// Dragged elements matching this selector.
    Selector(H::Selector),
}

impl<H: Host> Default for Accept<H> {
    fn default() -> Self {
        Self::Any
    }
}

impl<H: Host> core::fmt::Debug for Accept<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Element(e) => f.debug_tuple("Element").field(e).finish(),
            Self::Selector(s) => f.debug_tuple("Selector").field(s).finish(),
        }
    }
}

impl<H: Host> Accept<H> {
    /// Returns true if `dragged` passes this filter.
    pub fn admits(&self, host: &H, dragged: &H::Element) -> bool {
        match self {
            Self::Any => true,
            Self::Element(e) => e == dragged,
            Self::Selector(s) => host.matches(dragged, s),
        }
    }
}

/// The elements a dropzone registration stands for.
pub enum DropTarget<H: Host> {
    /// A single element.
    Element(H::Element),
    /// Every element matching `selector`, optionally within `context`.
    Selector {
        /// Selector to query.
        selector: H::Selector,
        /// Query root; `None` queries the whole document.
        context: Option<H::Element>,
    },
}

impl<H: Host> core::fmt::Debug for DropTarget<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Element(e) => f.debug_tuple("Element").field(e).finish(),
            Self::Selector { selector, context } => f
                .debug_struct("Selector")
                .field("selector", selector)
                .field("context", context)
                .finish(),
        }
    }
}

impl<H: Host> DropTarget<H> {
    /// Resolve the target's elements in document order.
    pub fn elements(&self, host: &H) -> Vec<H::Element> {
        match self {
            Self::Element(e) => alloc::vec![*e],
            Self::Selector { selector, context } => host.query(selector, context.as_ref()),
        }
    }
}

/// Custom drop checker.
///
/// Receives the check inputs and the result of the overlap policy, and returns the
/// final verdict.
pub type Checker<H> = Box<dyn Fn(&DropCheck<'_, H>, bool) -> bool>;

/// Listener for dropzone events.
pub type Listener<E> = Box<dyn FnMut(&DropEvent<E>)>;

/// Drop detection settings of a registration.
pub struct DropOptions<H: Host> {
    /// Whether drop detection is on.
    pub enabled: bool,
    /// Which dragged elements are accepted.
    pub accept: Accept<H>,
    /// Hit-test policy.
    pub overlap: Overlap,
    /// Optional checker with the final word on qualification.
    pub checker: Option<Checker<H>>,
}

impl<H: Host> Default for DropOptions<H> {
    fn default() -> Self {
        Self {
            enabled: false,
            accept: Accept::Any,
            overlap: Overlap::Pointer,
            checker: None,
        }
    }
}

impl<H: Host> core::fmt::Debug for DropOptions<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropOptions")
            .field("enabled", &self.enabled)
            .field("accept", &self.accept)
            .field("overlap", &self.overlap)
            .field("checker", &self.checker.is_some())
            .finish()
    }
}

/// Per-kind listeners of a registration.
pub struct DropListeners<E> {
    /// `drop`
    pub ondrop: Option<Listener<E>>,
    /// `dropactivate`
    pub ondropactivate: Option<Listener<E>>,
    /// `dropdeactivate`
    pub ondropdeactivate: Option<Listener<E>>,
    /// `dragenter`
    pub ondragenter: Option<Listener<E>>,
    /// `dragleave`
    pub ondragleave: Option<Listener<E>>,
    /// `dropmove`
    pub ondropmove: Option<Listener<E>>,
}

impl<E> Default for DropListeners<E> {
    fn default() -> Self {
        Self {
            ondrop: None,
            ondropactivate: None,
            ondropdeactivate: None,
            ondragenter: None,
            ondragleave: None,
            ondropmove: None,
        }
    }
}

impl<E> core::fmt::Debug for DropListeners<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropListeners")
            .field("ondrop", &self.ondrop.is_some())
            .field("ondropactivate", &self.ondropactivate.is_some())
            .field("ondropdeactivate", &self.ondropdeactivate.is_some())
            .field("ondragenter", &self.ondragenter.is_some())
            .field("ondragleave", &self.ondragleave.is_some())
            .field("ondropmove", &self.ondropmove.is_some())
            .finish()
    }
}

impl<E> DropListeners<E> {
    fn slot(&mut self, kind: DropEventKind) -> &mut Option<Listener<E>> {
        match kind {
            DropEventKind::Drop => &mut self.ondrop,
            DropEventKind::DropActivate => &mut self.ondropactivate,
            DropEventKind::DropDeactivate => &mut self.ondropdeactivate,
            DropEventKind::DragEnter => &mut self.ondragenter,
            DropEventKind::DragLeave => &mut self.ondragleave,
            DropEventKind::DropMove => &mut self.ondropmove,
        }
    }

    /// Invoke the listener for `event.kind`, if any.
    pub fn fire(&mut self, event: &DropEvent<E>) {
        if let Some(l) = self.slot(event.kind) {
            l(event);
        }
    }
}

/// A batch of option changes applied with [`DropRegistry::configure`].
///
/// Unset fields keep their current value, except `enabled`, which defaults to `true`
/// when a configuration is applied.
pub struct DropzoneConfig<H: Host> {
    enabled: Option<bool>,
    accept: Option<Accept<H>>,
    overlap: Option<Overlap>,
    checker: Option<Option<Checker<H>>>,
    listeners: Vec<(DropEventKind, Listener<H::Element>)>,
}

impl<H: Host> Default for DropzoneConfig<H> {
    fn default() -> Self {
        Self {
            enabled: None,
            accept: None,
            overlap: None,
            checker: None,
            listeners: Vec::new(),
        }
    }
}

impl<H: Host> core::fmt::Debug for DropzoneConfig<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropzoneConfig")
            .field("enabled", &self.enabled)
            .field("accept", &self.accept)
            .field("overlap", &self.overlap)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<H: Host> DropzoneConfig<H> {
    /// An empty configuration; applying it enables drop detection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn drop detection on or off.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Replace the accept filter. [`Accept::Any`] clears it.
    pub fn accept(mut self, accept: Accept<H>) -> Self {
        self.accept = Some(accept);
        self
    }

    /// Replace the overlap policy. Ratios are clamped; a NaN ratio is ignored.
    pub fn overlap(mut self, overlap: Overlap) -> Self {
        self.overlap = Some(overlap);
        self
    }

    /// Replace the overlap policy from text such as `"center"` or `"0.5"`.
    ///
    /// Unparseable text is ignored and keeps the previous policy.
    pub fn overlap_str(mut self, overlap: &str) -> Self {
        if let Ok(o) = overlap.parse() {
            self.overlap = Some(o);
        }
        self
    }

    /// Install a custom checker.
    pub fn checker(mut self, checker: impl Fn(&DropCheck<'_, H>, bool) -> bool + 'static) -> Self {
        self.checker = Some(Some(Box::new(checker)));
        self
    }

    /// Remove the custom checker.
    pub fn clear_checker(mut self) -> Self {
        self.checker = Some(None);
        self
    }

    /// Install a listener for one event kind.
    pub fn on(
        mut self,
        kind: DropEventKind,
        listener: impl FnMut(&DropEvent<H::Element>) + 'static,
    ) -> Self {
        self.listeners.push((kind, Box::new(listener)));
        self
    }

    /// Install the `drop` listener.
    pub fn ondrop(self, listener: impl FnMut(&DropEvent<H::Element>) + 'static) -> Self {
        self.on(DropEventKind::Drop, listener)
    }

    /// Install the `dropactivate` listener.
    pub fn ondropactivate(self, listener: impl FnMut(&DropEvent<H::Element>) + 'static) -> Self {
        self.on(DropEventKind::DropActivate, listener)
    }

    /// Install the `dropdeactivate` listener.
    pub fn ondropdeactivate(
        self,
        listener: impl FnMut(&DropEvent<H::Element>) + 'static,
    ) -> Self {
        self.on(DropEventKind::DropDeactivate, listener)
    }

    /// Install the `dragenter` listener.
    pub fn ondragenter(self, listener: impl FnMut(&DropEvent<H::Element>) + 'static) -> Self {
        self.on(DropEventKind::DragEnter, listener)
    }

    /// Install the `dragleave` listener.
    pub fn ondragleave(self, listener: impl FnMut(&DropEvent<H::Element>) + 'static) -> Self {
        self.on(DropEventKind::DragLeave, listener)
    }

    /// Install the `dropmove` listener.
    pub fn ondropmove(self, listener: impl FnMut(&DropEvent<H::Element>) + 'static) -> Self {
        self.on(DropEventKind::DropMove, listener)
    }
}

/// A drop-capable registration.
pub struct Dropzone<H: Host> {
    target: DropTarget<H>,
    options: DropOptions<H>,
    listeners: DropListeners<H::Element>,
}

impl<H: Host> core::fmt::Debug for Dropzone<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dropzone")
            .field("target", &self.target)
            .field("options", &self.options)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<H: Host> Dropzone<H> {
    /// The registration's target.
    pub fn target(&self) -> &DropTarget<H> {
        &self.target
    }

    /// Current drop options.
    pub fn options(&self) -> &DropOptions<H> {
        &self.options
    }

    fn apply(&mut self, config: DropzoneConfig<H>) {
        let DropzoneConfig {
            enabled,
            accept,
            overlap,
            checker,
            listeners,
        } = config;
        self.options.enabled = enabled.unwrap_or(true);
        if let Some(a) = accept {
            self.options.accept = a;
        }
        if let Some(o) = overlap.and_then(Overlap::normalized) {
            self.options.overlap = o;
        }
        if let Some(c) = checker {
            self.options.checker = c;
        }
        for (kind, l) in listeners {
            *self.listeners.slot(kind) = Some(l);
        }
    }
}

/// A `(dropzone, element)` pair that could receive the dragged element.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Candidate<E> {
    /// Owning registration.
    pub dropzone: DropzoneId,
    /// Dropzone element.
    pub element: E,
}

/// Registry of drop-capable registrations, in registration order.
pub struct DropRegistry<H: Host> {
    slots: Vec<Option<Dropzone<H>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    order: Vec<DropzoneId>,
    dynamic_drop: bool,
}

impl<H: Host> Default for DropRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> core::fmt::Debug for DropRegistry<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropRegistry")
            .field("registrations", &self.order.len())
            .field("free_list", &self.free_list.len())
            .field("dynamic_drop", &self.dynamic_drop)
            .finish_non_exhaustive()
    }
}

impl<H: Host> DropRegistry<H> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
            dynamic_drop: false,
        }
    }

    /// Register a target. Drop detection starts disabled; see [`DropRegistry::configure`].
    pub fn insert(&mut self, target: DropTarget<H>) -> DropzoneId {
        let zone = Dropzone {
            target,
            options: DropOptions::default(),
            listeners: DropListeners::default(),
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(zone);
            (idx, generation)
        } else {
            self.slots.push(Some(zone));
            self.generations.push(1);
            (self.slots.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "DropzoneId uses 32-bit indices by design."
        )]
        let id = DropzoneId::new(idx as u32, generation);
        self.order.push(id);
        id
    }

    /// Apply a configuration. Returns false for a stale id.
    pub fn configure(&mut self, id: DropzoneId, config: DropzoneConfig<H>) -> bool {
        let Some(zone) = self.get_mut(id) else {
            return false;
        };
        zone.apply(config);
        true
    }

    /// Turn drop detection on or off without touching other options.
    pub fn set_enabled(&mut self, id: DropzoneId, enabled: bool) -> bool {
        let Some(zone) = self.get_mut(id) else {
            return false;
        };
        zone.options.enabled = enabled;
        true
    }

    /// Current options of a registration.
    pub fn options(&self, id: DropzoneId) -> Option<&DropOptions<H>> {
        self.get(id).map(|z| &z.options)
    }

    /// Remove a registration. Drop detection is forced off before it is dropped.
    ///
    /// Returns the removed registration, or `None` for a stale id.
    pub fn unset(&mut self, id: DropzoneId) -> Option<Dropzone<H>> {
        self.get_mut(id)?.options.enabled = false;
        self.order.retain(|o| *o != id);
        self.free_list.push(id.idx());
        self.slots[id.idx()].take()
    }

    /// Returns true if `id` refers to a live registration.
    pub fn is_alive(&self, id: DropzoneId) -> bool {
        self.get(id).is_some()
    }

    /// A registration by id.
    pub fn get(&self, id: DropzoneId) -> Option<&Dropzone<H>> {
        let zone = self.slots.get(id.idx())?.as_ref()?;
        (self.generations[id.idx()] == id.1).then_some(zone)
    }

    fn get_mut(&mut self, id: DropzoneId) -> Option<&mut Dropzone<H>> {
        if self.generations.get(id.idx()) != Some(&id.1) {
            return None;
        }
        self.slots.get_mut(id.idx())?.as_mut()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (DropzoneId, &Dropzone<H>)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.get(*id).map(|z| (*id, z)))
    }

    /// When on, the active drop set is recollected (and rectangles re-queried) on every move.
    pub fn set_dynamic_drop(&mut self, dynamic: bool) {
        self.dynamic_drop = dynamic;
    }

    /// Whether dynamic drop is on.
    pub fn dynamic_drop(&self) -> bool {
        self.dynamic_drop
    }

    /// Deliver an event to a registration's listener.
    pub fn fire(&mut self, id: DropzoneId, event: &DropEvent<H::Element>) {
        if let Some(zone) = self.get_mut(id) {
            zone.listeners.fire(event);
        }
    }

    /// Collect every `(dropzone, element)` pair that could receive `dragged`.
    ///
    /// Skips disabled registrations and those whose accept filter rejects `dragged`,
    /// and never pairs a dropzone with the dragged element itself.
    pub fn collect_drops(&self, host: &H, dragged: &H::Element) -> Vec<Candidate<H::Element>> {
        let mut out = Vec::new();
        for (id, zone) in self.iter() {
            if !zone.options.enabled || !zone.options.accept.admits(host, dragged) {
                continue;
            }
            for element in zone.target.elements(host) {
                if element != *dragged {
                    out.push(Candidate {
                        dropzone: id,
                        element,
                    });
                }
            }
        }
        tracing::debug!(candidates = out.len(), "collected drop candidates");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ClassSelector, ElementData, ElementId, ElementTree};
    use crate::types::{DragEvent, DragPhase, DraggableId};
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use kurbo::Point;

    struct Fixture {
        tree: ElementTree,
        dragged: ElementId,
        a: ElementId,
        b: ElementId,
    }

    fn fixture() -> Fixture {
        let mut tree = ElementTree::new();
        let root = tree.insert(None, ElementData::default());
        let dragged = tree.insert(Some(root), ElementData::default().with_class("item"));
        let a = tree.insert(Some(root), ElementData::default().with_class("zone"));
        let b = tree.insert(Some(root), ElementData::default().with_class("zone"));
        Fixture {
            tree,
            dragged,
            a,
            b,
        }
    }

    #[test]
    fn disabled_by_default_and_enabled_by_configure() {
        let f = fixture();
        let mut reg: DropRegistry<ElementTree> = DropRegistry::new();
        let id = reg.insert(DropTarget::Element(f.a));
        assert!(reg.collect_drops(&f.tree, &f.dragged).is_empty());

        reg.configure(id, DropzoneConfig::new());
        assert_eq!(
            reg.collect_drops(&f.tree, &f.dragged),
            vec![Candidate {
                dropzone: id,
                element: f.a
            }]
        );

        reg.configure(id, DropzoneConfig::new().enabled(false));
        assert!(reg.collect_drops(&f.tree, &f.dragged).is_empty());
    }

    #[test]
    fn accept_filters_dragged_element() {
        let f = fixture();
        let mut reg: DropRegistry<ElementTree> = DropRegistry::new();
        let by_class = reg.insert(DropTarget::Element(f.a));
        reg.configure(
            by_class,
            DropzoneConfig::new().accept(Accept::Selector(ClassSelector::new(".other"))),
        );
        let by_element = reg.insert(DropTarget::Element(f.b));
        reg.configure(
            by_element,
            DropzoneConfig::new().accept(Accept::Element(f.dragged)),
        );

        let got = reg.collect_drops(&f.tree, &f.dragged);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].dropzone, by_element);

        // Clearing the filter admits everything again.
        reg.configure(by_class, DropzoneConfig::new().accept(Accept::Any));
        assert_eq!(reg.collect_drops(&f.tree, &f.dragged).len(), 2);
    }

    #[test]
    fn dragged_element_is_never_its_own_candidate() {
        let mut f = fixture();
        f.tree.add_class(f.dragged, "zone");
        let mut reg: DropRegistry<ElementTree> = DropRegistry::new();
        let id = reg.insert(DropTarget::Selector {
            selector: ClassSelector::new("zone"),
            context: None,
        });
        reg.configure(id, DropzoneConfig::new());
        let elements: Vec<_> = reg
            .collect_drops(&f.tree, &f.dragged)
            .into_iter()
            .map(|c| c.element)
            .collect();
        assert_eq!(elements, vec![f.a, f.b]);
    }

    #[test]
    fn collection_is_ordered_and_idempotent() {
        let f = fixture();
        let mut reg: DropRegistry<ElementTree> = DropRegistry::new();
        let single = reg.insert(DropTarget::Element(f.b));
        let many = reg.insert(DropTarget::Selector {
            selector: ClassSelector::new("zone"),
            context: None,
        });
        reg.configure(single, DropzoneConfig::new());
        reg.configure(many, DropzoneConfig::new());

        let first = reg.collect_drops(&f.tree, &f.dragged);
        let pairs: Vec<_> = first.iter().map(|c| (c.dropzone, c.element)).collect();
        assert_eq!(pairs, vec![(single, f.b), (many, f.a), (many, f.b)]);
        assert_eq!(first, reg.collect_drops(&f.tree, &f.dragged));
    }

    #[test]
    fn invalid_overlap_keeps_previous_value() {
        let f = fixture();
        let mut reg: DropRegistry<ElementTree> = DropRegistry::new();
        let id = reg.insert(DropTarget::Element(f.a));
        reg.configure(id, DropzoneConfig::new().overlap(Overlap::Center));
        reg.configure(id, DropzoneConfig::new().overlap(Overlap::Ratio(f64::NAN)));
        assert_eq!(reg.options(id).unwrap().overlap, Overlap::Center);
        reg.configure(id, DropzoneConfig::new().overlap_str("sideways"));
        assert_eq!(reg.options(id).unwrap().overlap, Overlap::Center);
        reg.configure(id, DropzoneConfig::new().overlap(Overlap::Ratio(2.0)));
        assert_eq!(reg.options(id).unwrap().overlap, Overlap::Ratio(1.0));
        reg.configure(id, DropzoneConfig::new().overlap_str("0.5"));
        assert_eq!(reg.options(id).unwrap().overlap, Overlap::Ratio(0.5));
    }

    #[test]
    fn unset_disables_and_invalidates_id() {
        let f = fixture();
        let mut reg: DropRegistry<ElementTree> = DropRegistry::new();
        let id = reg.insert(DropTarget::Element(f.a));
        reg.configure(id, DropzoneConfig::new());
        let removed = reg.unset(id).unwrap();
        assert!(!removed.options().enabled);
        assert!(!reg.is_alive(id));
        assert!(reg.unset(id).is_none());
        assert!(!reg.set_enabled(id, true));

        let again = reg.insert(DropTarget::Element(f.b));
        assert_ne!(id, again);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn fire_reaches_matching_listener_only() {
        let f = fixture();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut reg: DropRegistry<ElementTree> = DropRegistry::new();
        let id = reg.insert(DropTarget::Element(f.a));
        let l = log.clone();
        reg.configure(
            id,
            DropzoneConfig::new().ondrop(move |e| l.borrow_mut().push(e.kind)),
        );

        let drag = DragEvent::new(
            DragPhase::End,
            f.dragged,
            DraggableId(1),
            Point::ZERO,
            Point::ZERO,
            0.0,
        );
        let mut event = DropEvent {
            kind: DropEventKind::DragEnter,
            target: Some(f.a),
            dropzone: Some(id),
            related_target: f.dragged,
            draggable: DraggableId(1),
            timestamp: 0.0,
            drag_event: drag,
        };
        reg.fire(id, &event);
        event.kind = DropEventKind::Drop;
        reg.fire(id, &event);
        assert_eq!(*log.borrow(), vec![DropEventKind::Drop]);
    }
}
