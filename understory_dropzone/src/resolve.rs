// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop resolution: pick exactly one dropzone element for the current drag geometry.
//!
//! ## Target Selection
//!
//! - Every entry of the [`ActiveDropSet`] is checked with its cached rectangle.
//! - Among qualifying elements, the deepest in the document wins.
//! - Unrelated elements are ordered by document position; the later one wins
//!   ("last sibling wins").
//! - When several entries share the same element, the first entry is kept.
//! - No qualifier means no winner.
//!
//! Candidate order (registry order) does not affect the winner except for the
//! shared-element case above.

use alloc::vec::Vec;

use crate::active::ActiveDropSet;
use crate::check::DropCheck;
use crate::host::{Host, document_position};
use crate::registry::DropRegistry;
use crate::types::{DragEvent, DropzoneId};

/// Winning dropzone and element for one tick, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution<E> {
    /// Winning registration.
    pub dropzone: Option<DropzoneId>,
    /// Winning element.
    pub element: Option<E>,
}

impl<E> Resolution<E> {
    /// No winner.
    pub const NONE: Self = Self {
        dropzone: None,
        element: None,
    };
}

/// Index of the element that is deepest in the document, later document order winning ties.
///
/// `None` entries are skipped. Returns `None` if every entry is `None`.
pub fn index_of_deepest<H: Host + ?Sized>(
    host: &H,
    elements: &[Option<H::Element>],
) -> Option<usize> {
    // Single pass; the best position is cached and only recomputed on replacement.
    let mut best: Option<(usize, H::Element, Vec<usize>)> = None;
    for (i, el) in elements.iter().enumerate() {
        let Some(el) = el else {
            continue;
        };
        let pos = match &best {
            Some((_, best_el, _)) if best_el == el => continue,
            Some((_, _, best_pos)) => {
                let pos = document_position(host, el);
                if pos <= *best_pos {
                    continue;
                }
                pos
            }
            None => document_position(host, el),
        };
        best = Some((i, *el, pos));
    }
    best.map(|(i, _, _)| i)
}

/// Resolve the drop target for a `dragmove` or `dragend`.
///
/// With [dynamic drop](DropRegistry::set_dynamic_drop) on, `active` is rebuilt first.
pub fn resolve_drop<H: Host>(
    registry: &DropRegistry<H>,
    host: &H,
    active: &mut ActiveDropSet<H::Element>,
    drag_event: &DragEvent<H::Element>,
    input: Option<&H::Input>,
    dragged: H::Element,
) -> Resolution<H::Element> {
    if registry.dynamic_drop() {
        active.collect(registry, host, &dragged);
    }

    let qualifying: Vec<Option<H::Element>> = active
        .iter()
        .map(|drop| {
            let zone = registry.get(drop.dropzone)?;
            let check = DropCheck {
                drag_event,
                input,
                draggable: drag_event.draggable,
                draggable_element: dragged,
                dropzone: drop.dropzone,
                drop_element: drop.element,
            };
            zone.drop_check(host, &check, drop.rect)
                .then_some(drop.element)
        })
        .collect();

    let Some(i) = index_of_deepest(host, &qualifying) else {
        tracing::trace!("no dropzone qualifies");
        return Resolution::NONE;
    };
    let winner = &active.as_slice()[i];
    tracing::trace!(dropzone = ?winner.dropzone, element = ?winner.element, "resolved drop");
    Resolution {
        dropzone: Some(winner.dropzone),
        element: Some(winner.element),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ClassSelector, ElementData, ElementId, ElementTree};
    use crate::registry::{Accept, DropTarget, DropzoneConfig};
    use crate::types::{DragPhase, DraggableId};
    use kurbo::{Point, Rect};

    fn drag_at(dragged: ElementId, x: f64, y: f64) -> DragEvent<ElementId> {
        let p = Point::new(x, y);
        DragEvent::new(DragPhase::Move, dragged, DraggableId(1), p, p, 0.0)
    }

    fn zone(tree: &mut ElementTree, parent: ElementId, rect: Rect) -> ElementId {
        tree.insert(Some(parent), ElementData::default().with_rect(rect))
    }

    #[test]
    fn deepest_ignores_none_and_keeps_first_duplicate() {
        let mut t = ElementTree::new();
        let root = t.insert(None, ElementData::default());
        let a = t.insert(Some(root), ElementData::default());
        assert_eq!(index_of_deepest(&t, &[None, None]), None);
        assert_eq!(index_of_deepest(&t, &[None, Some(a), Some(a)]), Some(1));
        assert_eq!(index_of_deepest(&t, &[Some(a), Some(root)]), Some(0));
    }

    #[test]
    fn later_sibling_wins() {
        let mut t = ElementTree::new();
        let root = t.insert(None, ElementData::default());
        let a = t.insert(Some(root), ElementData::default());
        let a1 = t.insert(Some(a), ElementData::default());
        let b = t.insert(Some(root), ElementData::default());
        assert_eq!(index_of_deepest(&t, &[Some(b), Some(a)]), Some(0));
        // Later branch beats a deeper element of an earlier branch.
        assert_eq!(index_of_deepest(&t, &[Some(a1), Some(b)]), Some(1));
    }

    #[test]
    fn descendant_wins_regardless_of_registration_order() {
        let mut t = ElementTree::new();
        let root = t.insert(None, ElementData::default());
        let dragged = t.insert(Some(root), ElementData::default());
        let outer = zone(&mut t, root, Rect::new(0.0, 0.0, 200.0, 200.0));
        let inner = zone(&mut t, outer, Rect::new(50.0, 50.0, 100.0, 100.0));

        for inner_first in [true, false] {
            let mut reg: DropRegistry<ElementTree> = DropRegistry::new();
            let (first, second) = if inner_first { (inner, outer) } else { (outer, inner) };
            let id1 = reg.insert(DropTarget::Element(first));
            let id2 = reg.insert(DropTarget::Element(second));
            reg.configure(id1, DropzoneConfig::new());
            reg.configure(id2, DropzoneConfig::new());
            let inner_id = if inner_first { id1 } else { id2 };

            let mut active = ActiveDropSet::new();
            active.collect(&reg, &t, &dragged);
            let ev = drag_at(dragged, 75.0, 75.0);
            let r = resolve_drop(&reg, &t, &mut active, &ev, None, dragged);
            assert_eq!(r.element, Some(inner));
            assert_eq!(r.dropzone, Some(inner_id));

            // Outside the inner zone only the outer one qualifies.
            let ev = drag_at(dragged, 10.0, 10.0);
            let r = resolve_drop(&reg, &t, &mut active, &ev, None, dragged);
            assert_eq!(r.element, Some(outer));
        }
    }

    #[test]
    fn no_winner_outside_every_zone() {
        let mut t = ElementTree::new();
        let root = t.insert(None, ElementData::default());
        let dragged = t.insert(Some(root), ElementData::default());
        let z = zone(&mut t, root, Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut reg: DropRegistry<ElementTree> = DropRegistry::new();
        let id = reg.insert(DropTarget::Element(z));
        reg.configure(id, DropzoneConfig::new());
        let mut active = ActiveDropSet::new();
        active.collect(&reg, &t, &dragged);
        let ev = drag_at(dragged, 50.0, 50.0);
        let r = resolve_drop(&reg, &t, &mut active, &ev, None, dragged);
        assert_eq!(r, Resolution::NONE);
    }

    #[test]
    fn rejected_by_accept_never_wins() {
        let mut t = ElementTree::new();
        let root = t.insert(None, ElementData::default());
        let dragged = t.insert(Some(root), ElementData::default().with_class("item"));
        let outer = zone(&mut t, root, Rect::new(0.0, 0.0, 100.0, 100.0));
        let inner = zone(&mut t, outer, Rect::new(0.0, 0.0, 100.0, 100.0));

        let mut reg: DropRegistry<ElementTree> = DropRegistry::new();
        let outer_id = reg.insert(DropTarget::Element(outer));
        let inner_id = reg.insert(DropTarget::Element(inner));
        reg.configure(outer_id, DropzoneConfig::new());
        reg.configure(
            inner_id,
            DropzoneConfig::new().accept(Accept::Selector(ClassSelector::new("file"))),
        );

        let mut active = ActiveDropSet::new();
        active.collect(&reg, &t, &dragged);
        let ev = drag_at(dragged, 50.0, 50.0);
        let r = resolve_drop(&reg, &t, &mut active, &ev, None, dragged);
        assert_eq!(r.dropzone, Some(outer_id));
        assert_eq!(r.element, Some(outer));
    }

    #[test]
    fn dynamic_drop_sees_moved_and_new_zones() {
        let mut t = ElementTree::new();
        let root = t.insert(None, ElementData::default());
        let dragged = t.insert(Some(root), ElementData::default());
        let a = t.insert(
            Some(root),
            ElementData::default()
                .with_class("zone")
                .with_rect(Rect::new(0.0, 0.0, 10.0, 10.0)),
        );
        let mut reg: DropRegistry<ElementTree> = DropRegistry::new();
        let id = reg.insert(DropTarget::Selector {
            selector: ClassSelector::new("zone"),
            context: None,
        });
        reg.configure(id, DropzoneConfig::new());
        let mut active = ActiveDropSet::new();
        active.collect(&reg, &t, &dragged);

        t.set_rect(a, Some(Rect::new(100.0, 100.0, 110.0, 110.0)));
        let ev = drag_at(dragged, 105.0, 105.0);
        // Static: the stale rectangle is used.
        assert_eq!(
            resolve_drop(&reg, &t, &mut active, &ev, None, dragged),
            Resolution::NONE
        );
        reg.set_dynamic_drop(true);
        let r = resolve_drop(&reg, &t, &mut active, &ev, None, dragged);
        assert_eq!(r.element, Some(a));
        assert_eq!(active.len(), 1);
        assert_eq!(active.get(0).map(|d| d.element), Some(a));
    }
}
