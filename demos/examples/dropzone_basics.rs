// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropzone basics.
//!
//! Register nested dropzones with different overlap policies, resolve a few drag
//! positions, and print the winners.
//!
//! Run:
//! - `cargo run -p understory_demos --example dropzone_basics`

use kurbo::{Point, Rect};
use understory_dropzone::active::ActiveDropSet;
use understory_dropzone::dom::{ClassSelector, ElementData, ElementTree};
use understory_dropzone::registry::{Accept, DropRegistry, DropTarget, DropzoneConfig};
use understory_dropzone::resolve::resolve_drop;
use understory_dropzone::types::{DragEvent, DragPhase, DraggableId, Overlap};

fn main() {
    let mut tree = ElementTree::new();
    let body = tree.insert(None, ElementData::default());
    let file = tree.insert(
        Some(body),
        ElementData::default()
            .with_class("file")
            .with_rect(Rect::new(0.0, 0.0, 40.0, 40.0)),
    );
    let folder = tree.insert(
        Some(body),
        ElementData::default().with_rect(Rect::new(100.0, 100.0, 400.0, 400.0)),
    );
    let subfolder = tree.insert(
        Some(folder),
        ElementData::default().with_rect(Rect::new(200.0, 200.0, 300.0, 300.0)),
    );
    let images = tree.insert(
        Some(body),
        ElementData::default().with_rect(Rect::new(500.0, 100.0, 600.0, 200.0)),
    );

    let mut registry = DropRegistry::new();
    let folder_zone = registry.insert(DropTarget::Element(folder));
    registry.configure(folder_zone, DropzoneConfig::new());
    let subfolder_zone = registry.insert(DropTarget::Element(subfolder));
    let centered = DropzoneConfig::new().overlap(Overlap::Center);
    registry.configure(subfolder_zone, centered);
    // Only accepts images; the dragged file never qualifies.
    let images_zone = registry.insert(DropTarget::Element(images));
    registry.configure(
        images_zone,
        DropzoneConfig::new().accept(Accept::Selector(ClassSelector::new("image"))),
    );

    let mut active = ActiveDropSet::new();
    active.collect(&registry, &tree, &file);
    println!("candidates: {}", active.len());
    assert_eq!(active.len(), 2, "the images zone rejects files");

    for (pos, expected) in [
        (Point::new(150.0, 150.0), Some(folder)),
        (Point::new(250.0, 250.0), Some(subfolder)),
        (Point::new(550.0, 150.0), None),
    ] {
        // Keep the dragged rectangle under the pointer for the center policy.
        tree.set_rect(file, Some(Rect::from_center_size(pos, (40.0, 40.0))));
        let ev = DragEvent::new(DragPhase::Move, file, DraggableId(0), pos, pos, 0.0);
        let winner = resolve_drop(&registry, &tree, &mut active, &ev, None, file);
        println!("at {:?}: {:?}", pos, winner.element);
        assert_eq!(winner.element, expected);
    }
}
