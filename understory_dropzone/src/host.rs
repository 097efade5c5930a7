// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host collaborator: element tree, geometry, and selector engine.
//!
//! Drop detection never walks a scene on its own. Everything it needs from the
//! toolkit goes through [`Host`]: parents and sibling order for document-order
//! tie-breaks, element rectangles for overlap checks, and selector matching for
//! `accept` filters and selector-based dropzones.
//!
//! [`ElementTree`](crate::dom::ElementTree) is a small in-memory implementation.

use alloc::vec::Vec;

use kurbo::{Rect, Vec2};

/// Services provided by the toolkit hosting the drag.
pub trait Host {
    /// Element handle. Cheap to copy, compared by identity.
    type Element: Copy + Eq + core::fmt::Debug;
    /// Selector understood by [`Host::matches`] and [`Host::query`].
    type Selector: core::fmt::Debug;
    /// Raw input event handed to custom drop checkers.
    type Input;

    /// Returns the parent of `element`, or `None` for a root.
    fn parent_of(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Position of `element` among its siblings (or among roots), in document order.
    fn sibling_index(&self, element: &Self::Element) -> usize;

    /// Page-space bounding rectangle, or `None` if the element has no layout box.
    fn rect_of(&self, element: &Self::Element) -> Option<Rect>;

    /// Offset between page coordinates and a draggable's coordinate space.
    fn origin_of(&self, _element: &Self::Element) -> Vec2 {
        Vec2::ZERO
    }

    /// Returns true if `element` matches `selector`.
    fn matches(&self, element: &Self::Element, selector: &Self::Selector) -> bool;

    /// Elements matching `selector` in document order.
    ///
    /// With a `context`, only descendants of it are returned; otherwise the whole document.
    fn query(
        &self,
        selector: &Self::Selector,
        context: Option<&Self::Element>,
    ) -> Vec<Self::Element>;
}

/// Document-order key for `element`: sibling indices from the root down to it.
///
/// Keys compare lexicographically, which is document pre-order: an ancestor's
/// key is a prefix of (and so less than) each descendant's key, and among
/// unrelated elements the one later in the document has the greater key.
pub fn document_position<H: Host + ?Sized>(host: &H, element: &H::Element) -> Vec<usize> {
    let mut out = Vec::new();
    let mut cur = *element;
    // Collect to root; the host guarantees acyclic ancestry.
    loop {
        out.push(host.sibling_index(&cur));
        match host.parent_of(&cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}

/// Returns true if `ancestor` is `element` or one of its ancestors.
pub fn is_inclusive_ancestor<H: Host + ?Sized>(
    host: &H,
    ancestor: &H::Element,
    element: &H::Element,
) -> bool {
    let mut cur = Some(*element);
    while let Some(e) = cur {
        if e == *ancestor {
            return true;
        }
        cur = host.parent_of(&e);
    }
    false
}
