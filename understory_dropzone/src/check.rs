// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop checks: does the dragged element qualify for one dropzone element?
//!
//! The overlap policy of the registration decides first:
//!
//! - [`Overlap::Pointer`]: the pointer's page position (drag event page plus the
//!   draggable's origin) lies strictly inside the dropzone rectangle.
//! - [`Overlap::Center`]: the center of the dragged element's rectangle lies inside
//!   the dropzone rectangle, edges included.
//! - [`Overlap::Ratio`]: the intersection area divided by the dragged element's area
//!   is at least the ratio.
//!
//! A custom [`Checker`](crate::registry::Checker) then gets the final word. When the
//! dropzone element has no rectangle, only the checker is consulted (with `false`).

use kurbo::Rect;

use crate::host::Host;
use crate::registry::Dropzone;
use crate::types::{DragEvent, DraggableId, DropzoneId, Overlap};

/// Inputs to a drop check, also handed to custom checkers.
pub struct DropCheck<'a, H: Host> {
    /// The `dragmove` or `dragend` event being resolved.
    pub drag_event: &'a DragEvent<H::Element>,
    /// Raw input event; `None` for moves synthesized by a running simulation.
    pub input: Option<&'a H::Input>,
    /// The draggable registration.
    pub draggable: DraggableId,
    /// The dragged element.
    pub draggable_element: H::Element,
    /// The dropzone registration being checked.
    pub dropzone: DropzoneId,
    /// The dropzone element being checked.
    pub drop_element: H::Element,
}

impl<H: Host> core::fmt::Debug for DropCheck<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropCheck")
            .field("drag_event", self.drag_event)
            .field("draggable", &self.draggable)
            .field("draggable_element", &self.draggable_element)
            .field("dropzone", &self.dropzone)
            .field("drop_element", &self.drop_element)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Dropzone<H> {
    /// Decide whether the dragged element qualifies for `check.drop_element`.
    ///
    /// `rect` is the cached rectangle of the dropzone element; when absent it is
    /// queried from the host once more before falling back to the checker.
    pub fn drop_check(&self, host: &H, check: &DropCheck<'_, H>, rect: Option<Rect>) -> bool {
        let options = self.options();
        let Some(rect) = rect.or_else(|| host.rect_of(&check.drop_element)) else {
            return options.checker.as_ref().is_some_and(|c| c(check, false));
        };

        let dropped = match options.overlap {
            Overlap::Pointer => {
                let page = check.drag_event.page + host.origin_of(&check.draggable_element);
                page.x > rect.x0 && page.x < rect.x1 && page.y > rect.y0 && page.y < rect.y1
            }
            Overlap::Center => host.rect_of(&check.draggable_element).is_some_and(|drag| {
                let c = drag.center();
                c.x >= rect.x0 && c.x <= rect.x1 && c.y >= rect.y0 && c.y <= rect.y1
            }),
            Overlap::Ratio(r) => host
                .rect_of(&check.draggable_element)
                .is_some_and(|drag| overlap_ratio(rect, drag) >= r),
        };

        match &options.checker {
            Some(c) => c(check, dropped),
            None => dropped,
        }
    }
}

/// Fraction of `drag`'s area covered by `zone`, in `[0, 1]`.
///
/// Axes that do not overlap contribute zero. A dragged rectangle with no area
/// yields NaN, which never satisfies a ratio.
pub fn overlap_ratio(zone: Rect, drag: Rect) -> f64 {
    let w = (zone.x1.min(drag.x1) - zone.x0.max(drag.x0)).max(0.0);
    let h = (zone.y1.min(drag.y1) - zone.y0.max(drag.y0)).max(0.0);
    (w * h) / (drag.width() * drag.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementData, ElementId, ElementTree, TreeInput};
    use crate::registry::{DropRegistry, DropTarget, DropzoneConfig};
    use crate::types::DragPhase;
    use kurbo::{Point, Vec2};

    struct Setup {
        tree: ElementTree,
        reg: DropRegistry<ElementTree>,
        dragged: ElementId,
        zone_el: ElementId,
        zone: DropzoneId,
    }

    fn setup(
        zone_rect: Option<Rect>,
        drag_rect: Rect,
        config: DropzoneConfig<ElementTree>,
    ) -> Setup {
        let mut tree = ElementTree::new();
        let root = tree.insert(None, ElementData::default());
        let dragged = tree.insert(Some(root), ElementData::default().with_rect(drag_rect));
        let zone_el = tree.insert(Some(root), ElementData::default());
        tree.set_rect(zone_el, zone_rect);
        let mut reg = DropRegistry::new();
        let zone = reg.insert(DropTarget::Element(zone_el));
        reg.configure(zone, config);
        Setup {
            tree,
            reg,
            dragged,
            zone_el,
            zone,
        }
    }

    fn check_at(s: &Setup, page: Point, input: Option<&TreeInput>) -> bool {
        let ev = DragEvent::new(
            DragPhase::Move,
            s.dragged,
            DraggableId(1),
            page,
            page,
            0.0,
        );
        let check = DropCheck {
            drag_event: &ev,
            input,
            draggable: DraggableId(1),
            draggable_element: s.dragged,
            dropzone: s.zone,
            drop_element: s.zone_el,
        };
        let rect = s.tree.rect_of(&s.zone_el);
        s.reg.get(s.zone).unwrap().drop_check(&s.tree, &check, rect)
    }

    #[test]
    fn pointer_edges_are_exclusive() {
        let s = setup(
            Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            DropzoneConfig::new(),
        );
        assert!(check_at(&s, Point::new(50.0, 50.0), None));
        assert!(check_at(&s, Point::new(0.5, 99.5), None));
        assert!(!check_at(&s, Point::new(0.0, 50.0), None));
        assert!(!check_at(&s, Point::new(100.0, 50.0), None));
        assert!(!check_at(&s, Point::new(50.0, 0.0), None));
        assert!(!check_at(&s, Point::new(50.0, 100.0), None));
    }

    #[test]
    fn pointer_inside_tiny_zone_qualifies() {
        let s = setup(
            Some(Rect::new(10.0, 10.0, 11.0, 11.0)),
            Rect::new(0.0, 0.0, 500.0, 500.0),
            DropzoneConfig::new(),
        );
        assert!(check_at(&s, Point::new(10.5, 10.5), None));
    }

    #[test]
    fn pointer_adds_draggable_origin() {
        let mut s = setup(
            Some(Rect::new(100.0, 100.0, 200.0, 200.0)),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            DropzoneConfig::new(),
        );
        assert!(!check_at(&s, Point::new(50.0, 50.0), None));
        s.tree.set_origin(s.dragged, Vec2::new(100.0, 100.0));
        assert!(check_at(&s, Point::new(50.0, 50.0), None));
    }

    #[test]
    fn center_is_inclusive() {
        // Dragged center lands exactly on the zone's right edge.
        let s = setup(
            Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
            Rect::new(90.0, 40.0, 110.0, 60.0),
            DropzoneConfig::new().overlap(Overlap::Center),
        );
        assert!(check_at(&s, Point::new(-1000.0, -1000.0), None));

        let outside = setup(
            Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
            Rect::new(91.0, 40.0, 111.0, 60.0),
            DropzoneConfig::new().overlap(Overlap::Center),
        );
        assert!(!check_at(&outside, Point::new(50.0, 50.0), None));
    }

    #[test]
    fn ratio_half_overlap_scenario() {
        let drag = Rect::new(0.0, 0.0, 100.0, 100.0);
        let half = setup(
            Some(Rect::new(50.0, 0.0, 300.0, 100.0)),
            drag,
            DropzoneConfig::new().overlap(Overlap::Ratio(0.5)),
        );
        assert!(check_at(&half, Point::ZERO, None));

        let forty = setup(
            Some(Rect::new(60.0, 0.0, 300.0, 100.0)),
            drag,
            DropzoneConfig::new().overlap(Overlap::Ratio(0.5)),
        );
        assert!(!check_at(&forty, Point::ZERO, None));
    }

    #[test]
    fn ratio_identical_and_disjoint_rects() {
        let r = Rect::new(10.0, 20.0, 60.0, 90.0);
        for ratio in [0.0, 0.3, 1.0] {
            let config = DropzoneConfig::new().overlap(Overlap::Ratio(ratio));
            let s = setup(Some(r), r, config);
            assert!(check_at(&s, Point::ZERO, None));
        }
        for ratio in [0.01, 0.5, 1.0] {
            let s = setup(
                Some(Rect::new(200.0, 200.0, 300.0, 300.0)),
                r,
                DropzoneConfig::new().overlap(Overlap::Ratio(ratio)),
            );
            assert!(!check_at(&s, Point::ZERO, None));
        }
    }

    #[test]
    fn missing_rect_defers_to_checker_with_false() {
        let plain = setup(None, Rect::new(0.0, 0.0, 10.0, 10.0), DropzoneConfig::new());
        assert!(!check_at(&plain, Point::new(5.0, 5.0), None));

        let seen_false = setup(
            None,
            Rect::new(0.0, 0.0, 10.0, 10.0),
            DropzoneConfig::new().checker(|_, dropped| !dropped),
        );
        assert!(check_at(&seen_false, Point::new(5.0, 5.0), None));
    }

    #[test]
    fn checker_has_final_word_and_sees_input() {
        let s = setup(
            Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            DropzoneConfig::new().checker(|check, dropped| {
                dropped
                    && check
                        .input
                        .is_some_and(|i: &TreeInput| i.target == Some(check.drop_element))
            }),
        );
        let on_zone = TreeInput {
            target: Some(s.zone_el),
        };
        let elsewhere = TreeInput { target: None };
        assert!(check_at(&s, Point::new(50.0, 50.0), Some(&on_zone)));
        assert!(!check_at(&s, Point::new(50.0, 50.0), Some(&elsewhere)));
        assert!(!check_at(&s, Point::new(500.0, 50.0), Some(&on_zone)));
    }

    #[test]
    fn overlap_ratio_partial() {
        let drag = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(overlap_ratio(Rect::new(5.0, 5.0, 20.0, 20.0), drag), 0.25);
        assert_eq!(overlap_ratio(Rect::new(20.0, 0.0, 30.0, 10.0), drag), 0.0);
    }
}
