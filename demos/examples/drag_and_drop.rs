// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag and drop.
//!
//! Drag a card across two columns and print the dropzone events as they fire.
//!
//! Run:
//! - `cargo run -p understory_demos --example drag_and_drop`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_drag::context::{DragContext, PointerSample};
use understory_drag::interaction::Interaction;
use understory_dropzone::dom::{ClassSelector, ElementData, ElementId, ElementTree};
use understory_dropzone::registry::{DropRegistry, DropTarget, DropzoneConfig};
use understory_dropzone::types::{DragPhase, DraggableId, DropEvent};
use understory_inertia::constraint::Unconstrained;
use understory_inertia::frame::FrameQueue;
use understory_inertia::options::InertiaOptions;

type Log = Rc<RefCell<Vec<(&'static str, Option<ElementId>)>>>;

fn record(log: &Log) -> impl FnMut(&DropEvent<ElementId>) + 'static {
    let log = log.clone();
    move |e| log.borrow_mut().push((e.event_type(), e.target))
}

fn at(x: f64, y: f64, t: f64) -> PointerSample {
    PointerSample::at(0, Point::new(x, y), t)
}

fn main() {
    let mut tree = ElementTree::new();
    let board = tree.insert(None, ElementData::default());
    let card = tree.insert(Some(board), ElementData::default());
    let todo = tree.insert(
        Some(board),
        ElementData::default()
            .with_class("column")
            .with_rect(Rect::new(0.0, 0.0, 200.0, 600.0)),
    );
    let done = tree.insert(
        Some(board),
        ElementData::default()
            .with_class("column")
            .with_rect(Rect::new(220.0, 0.0, 420.0, 600.0)),
    );

    let fired: Log = Rc::default();
    let mut registry = DropRegistry::new();
    let columns = registry.insert(DropTarget::Selector {
        selector: ClassSelector::new(".column"),
        context: None,
    });
    let config = DropzoneConfig::new()
        .ondropactivate(record(&fired))
        .ondragenter(record(&fired))
        .ondragleave(record(&fired))
        .ondrop(record(&fired))
        .ondropdeactivate(record(&fired));
    registry.configure(columns, config);

    let mut frames = FrameQueue::new();
    let mut constraint = Unconstrained;
    let mut ctx = DragContext::new(&tree, &mut registry, &mut frames, &mut constraint);
    let mut drag = Interaction::new(DraggableId(1), card, InertiaOptions::default());

    drag.pointer_down(&mut ctx, at(50.0, 50.0, 0.0), card);
    drag.start(&mut ctx, 0.0);
    let path = [(100.0, 60.0), (210.0, 70.0), (300.0, 80.0)];
    for (i, (x, y)) in path.into_iter().enumerate() {
        let t = 16.0 * (i + 1) as f64;
        for ev in drag.pointer_move(&mut ctx, at(x, y, t), None) {
            let over = ev.dropzone;
            println!("{} at {:?} over {over:?}", ev.event_type(), ev.page);
        }
    }
    let end = drag.pointer_up(&mut ctx, at(300.0, 80.0, 500.0), None);
    assert_eq!(end[0].phase, DragPhase::End);

    for (name, target) in fired.borrow().iter() {
        println!("{name} -> {target:?}");
    }
    let names: Vec<_> = fired.borrow().iter().map(|(n, _)| *n).collect();
    assert_eq!(
        names,
        [
            "dropactivate",
            "dropactivate",
            "dragenter",
            "dragleave",
            "dragenter",
            "drop",
            "dropdeactivate",
            "dropdeactivate",
        ],
        "leave fires before the next enter"
    );
    assert_eq!(fired.borrow()[5].1, Some(done));
    assert_eq!(fired.borrow()[2].1, Some(todo));
}
