// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory element tree implementing [`Host`].
//!
//! [`ElementTree`] keeps a hierarchy of elements with class names, optional
//! page-space rectangles, and coordinate origins. Selectors are single class
//! names ([`ClassSelector`]). It is enough to drive drop detection headlessly
//! in tests, demos, and toolkits without a document model of their own.
//!
//! ```
//! use kurbo::Rect;
//! use understory_dropzone::dom::{ClassSelector, ElementData, ElementTree};
//! use understory_dropzone::host::Host;
//!
//! let mut tree = ElementTree::new();
//! let body = tree.insert(None, ElementData::default());
//! let zone = tree.insert(
//!     Some(body),
//!     ElementData::default()
//!         .with_class("zone")
//!         .with_rect(Rect::new(0.0, 0.0, 100.0, 100.0)),
//! );
//!
//! assert_eq!(tree.query(&ClassSelector::new(".zone"), None), vec![zone]);
//! assert!(tree.matches(&zone, &ClassSelector::new("zone")));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Vec2};

use crate::host::Host;

/// Identifier for an element in an [`ElementTree`] (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(u32, u32);

impl ElementId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Per-element data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementData {
    /// Class names, without the leading dot.
    pub classes: Vec<String>,
    /// Page-space rectangle; `None` when the element has no layout box.
    pub rect: Option<Rect>,
    /// Coordinate origin used when the element is dragged.
    pub origin: Vec2,
}

impl ElementData {
    /// Add a class name.
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(String::from(class.trim_start_matches('.')));
        self
    }

    /// Set the rectangle.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }
}

/// A single-class selector, e.g. `.dropzone`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ClassSelector(String);

impl ClassSelector {
    /// Create a selector from a class name, with or without the leading dot.
    pub fn new(class: &str) -> Self {
        Self(String::from(class.trim_start_matches('.')))
    }

    /// The class name.
    pub fn class(&self) -> &str {
        &self.0
    }
}

/// Raw input for [`ElementTree`]: the element the pointer event was dispatched to.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TreeInput {
    /// Literal event target.
    pub target: Option<ElementId>,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    data: ElementData,
}

/// In-memory element tree.
#[derive(Clone, Debug, Default)]
pub struct ElementTree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    roots: Vec<ElementId>,
}

impl ElementTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element as the last child of `parent` (or as the last root if `None`).
    pub fn insert(&mut self, parent: Option<ElementId>, data: ElementData) -> ElementId {
        let node = |generation| Node {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node(generation));
            (idx, generation)
        } else {
            self.nodes.push(Some(node(1)));
            self.generations.push(1);
            (self.nodes.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId uses 32-bit indices by design."
        )]
        let id = ElementId(idx as u32, generation);
        match parent.filter(|p| self.is_alive(*p)) {
            Some(p) => {
                self.node_mut(p).children.push(id);
                self.node_mut(id).parent = Some(p);
            }
            None => self.roots.push(id),
        }
        id
    }

    /// Remove an element and its subtree.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        match self.node(id).parent {
            Some(p) => self.node_mut(p).children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
        self.remove_subtree(id);
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Element data, if alive.
    pub fn data(&self, id: ElementId) -> Option<&ElementData> {
        self.node_opt(id).map(|n| &n.data)
    }

    /// Children of `id` in document order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Update the rectangle; `None` hides the element's layout box.
    pub fn set_rect(&mut self, id: ElementId, rect: Option<Rect>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.rect = rect;
        }
    }

    /// Update the coordinate origin.
    pub fn set_origin(&mut self, id: ElementId, origin: Vec2) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.origin = origin;
        }
    }

    /// Add a class name.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data
                .classes
                .push(String::from(class.trim_start_matches('.')));
        }
    }

    // --- internals ---

    fn remove_subtree(&mut self, id: ElementId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.remove_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn node(&self, id: ElementId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn node_opt(&self, id: ElementId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn collect_matching(
        &self,
        ids: &[ElementId],
        selector: &ClassSelector,
        out: &mut Vec<ElementId>,
    ) {
        for &id in ids {
            let Some(node) = self.node_opt(id) else {
                continue;
            };
            if node.data.classes.iter().any(|c| c == selector.class()) {
                out.push(id);
            }
            self.collect_matching(&node.children, selector, out);
        }
    }
}

impl Host for ElementTree {
    type Element = ElementId;
    type Selector = ClassSelector;
    type Input = TreeInput;

    fn parent_of(&self, element: &ElementId) -> Option<ElementId> {
        self.node_opt(*element)?.parent
    }

    fn sibling_index(&self, element: &ElementId) -> usize {
        let siblings = match self.parent_of(element) {
            Some(p) => self.children(p),
            None => self.roots.as_slice(),
        };
        siblings.iter().position(|s| s == element).unwrap_or(0)
    }

    fn rect_of(&self, element: &ElementId) -> Option<Rect> {
        self.node_opt(*element)?.data.rect
    }

    fn origin_of(&self, element: &ElementId) -> Vec2 {
        self.node_opt(*element)
            .map(|n| n.data.origin)
            .unwrap_or(Vec2::ZERO)
    }

    fn matches(&self, element: &ElementId, selector: &ClassSelector) -> bool {
        self.node_opt(*element)
            .is_some_and(|n| n.data.classes.iter().any(|c| c == selector.class()))
    }

    fn query(&self, selector: &ClassSelector, context: Option<&ElementId>) -> Vec<ElementId> {
        let mut out = Vec::new();
        match context {
            Some(c) => self.collect_matching(self.children(*c), selector, &mut out),
            None => self.collect_matching(&self.roots, selector, &mut out),
        }
        out
    }
}
