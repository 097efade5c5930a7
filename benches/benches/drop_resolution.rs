// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_dropzone::active::ActiveDropSet;
use understory_dropzone::dom::{ClassSelector, ElementData, ElementId, ElementTree};
use understory_dropzone::registry::{DropRegistry, DropTarget, DropzoneConfig};
use understory_dropzone::resolve::resolve_drop;
use understory_dropzone::types::{DragEvent, DragPhase, DraggableId, Overlap};

struct Scene {
    tree: ElementTree,
    registry: DropRegistry<ElementTree>,
    dragged: ElementId,
}

// An `n`x`n` grid of cells, each with a nested inner zone.
fn grid_scene(n: usize, cell: f64, overlap: Overlap) -> Scene {
    let mut tree = ElementTree::new();
    let body = tree.insert(None, ElementData::default());
    let dragged = tree.insert(
        Some(body),
        ElementData::default().with_rect(Rect::new(0.0, 0.0, cell * 0.5, cell * 0.5)),
    );
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let outer = tree.insert(
                Some(body),
                ElementData::default()
                    .with_class("cell")
                    .with_rect(Rect::new(x0, y0, x0 + cell, y0 + cell)),
            );
            let _ = tree.insert(
                Some(outer),
                ElementData::default().with_class("slot").with_rect(Rect::new(
                    x0 + cell * 0.25,
                    y0 + cell * 0.25,
                    x0 + cell * 0.75,
                    y0 + cell * 0.75,
                )),
            );
        }
    }
    let mut registry = DropRegistry::new();
    for class in ["cell", "slot"] {
        let id = registry.insert(DropTarget::Selector {
            selector: ClassSelector::new(class),
            context: None,
        });
        registry.configure(id, DropzoneConfig::new().overlap(overlap));
    }
    Scene {
        tree,
        registry,
        dragged,
    }
}

fn drag_at(dragged: ElementId, p: Point) -> DragEvent<ElementId> {
    DragEvent::new(DragPhase::Move, dragged, DraggableId(0), p, p, 0.0)
}

fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect");
    for &n in &[8usize, 32, 64] {
        let scene = grid_scene(n, 20.0, Overlap::Pointer);
        group.throughput(Throughput::Elements((2 * n * n) as u64));
        group.bench_function(format!("active_drops_n{}", n), |b| {
            b.iter_batched(
                ActiveDropSet::new,
                |mut set| {
                    set.collect(&scene.registry, &scene.tree, &scene.dragged);
                    black_box(set.len())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for (name, overlap) in [
        ("pointer", Overlap::Pointer),
        ("center", Overlap::Center),
        ("ratio", Overlap::Ratio(0.5)),
    ] {
        for &n in &[8usize, 32] {
            let scene = grid_scene(n, 20.0, overlap);
            let mut active = ActiveDropSet::new();
            active.collect(&scene.registry, &scene.tree, &scene.dragged);
            let ev = drag_at(scene.dragged, Point::new(n as f64 * 10.0, n as f64 * 10.0));
            group.throughput(Throughput::Elements(active.len() as u64));
            group.bench_function(format!("{}_n{}", name, n), |b| {
                b.iter(|| {
                    black_box(resolve_drop(
                        &scene.registry,
                        &scene.tree,
                        &mut active,
                        &ev,
                        None,
                        scene.dragged,
                    ))
                });
            });
        }
    }
    group.finish();
}

fn bench_resolve_dynamic(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_dynamic");
    let n = 32;
    let mut scene = grid_scene(n, 20.0, Overlap::Pointer);
    scene.registry.set_dynamic_drop(true);
    let mut active = ActiveDropSet::new();
    let ev = drag_at(scene.dragged, Point::new(315.0, 315.0));
    group.throughput(Throughput::Elements((2 * n * n) as u64));
    group.bench_function("pointer_n32", |b| {
        b.iter(|| {
            black_box(resolve_drop(
                &scene.registry,
                &scene.tree,
                &mut active,
                &ev,
                None,
                scene.dragged,
            ))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_collect, bench_resolve, bench_resolve_dynamic);
criterion_main!(benches);
