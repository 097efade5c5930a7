// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inertia throw.
//!
//! Flick an element inside a bounded area and drive the simulation with a frame
//! queue. The throw bends onto the constrained end point.
//!
//! Run:
//! - `cargo run -p understory_demos --example inertia_throw`

use kurbo::{Point, Rect};
use understory_drag::context::{DragContext, PointerSample};
use understory_drag::interaction::Interaction;
use understory_dropzone::dom::{ElementData, ElementTree};
use understory_dropzone::registry::DropRegistry;
use understory_dropzone::types::{DragPhase, DraggableId};
use understory_inertia::constraint::RestrictToRect;
use understory_inertia::frame::FrameQueue;
use understory_inertia::options::InertiaOptions;

fn at(x: f64, y: f64, t: f64) -> PointerSample {
    PointerSample::at(0, Point::new(x, y), t)
}

fn main() {
    let mut tree = ElementTree::new();
    let root = tree.insert(None, ElementData::default());
    let puck = tree.insert(Some(root), ElementData::default());

    let mut registry = DropRegistry::new();
    let mut frames = FrameQueue::new();
    let mut constraint = RestrictToRect::new(Rect::new(0.0, 0.0, 300.0, 200.0));
    let mut drag = Interaction::new(DraggableId(0), puck, InertiaOptions::enabled());

    {
        let mut ctx = DragContext::new(&tree, &mut registry, &mut frames, &mut constraint);
        drag.pointer_down(&mut ctx, at(50.0, 100.0, 0.0), puck);
        drag.start(&mut ctx, 0.0);
        drag.pointer_move(&mut ctx, at(90.0, 102.0, 8.0), None);
        drag.pointer_move(&mut ctx, at(130.0, 104.0, 16.0), None);
        let evs = drag.pointer_up(&mut ctx, at(130.0, 104.0, 20.0), None);
        assert_eq!(evs[0].phase, DragPhase::InertiaStart);
    }
    let state = drag.inertia_state();
    println!(
        "duration {:.3}s, natural end {:?}, constrained end {:?}",
        state.duration(),
        state.end_offset(),
        state.modified_end_offset()
    );

    let mut now = 20.0;
    let mut last = None;
    while let Some(handle) = frames.next_frame() {
        let mut ctx = DragContext::new(&tree, &mut registry, &mut frames, &mut constraint);
        for ev in drag.frame(&mut ctx, handle, now) {
            println!("{:>6.1}ms {} {:?}", now, ev.event_type(), ev.page);
            last = Some(ev);
        }
        now += 16.0;
    }

    let last = last.expect("the throw ends with dragend");
    assert_eq!(last.phase, DragPhase::End);
    let gap = (last.page.x - 300.0).abs();
    assert!(gap < 1e-6, "rests on the right edge");
    assert!(!drag.is_interacting());
}
