// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position constraints consulted when a simulation picks its end point.

use kurbo::{Point, Rect, Vec2};

/// Outcome of constraining a page position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstraintResult {
    /// Correction to add to the position.
    pub delta: Vec2,
    /// The element should move to the corrected position.
    pub should_move: bool,
    /// The constraint changed the position.
    pub locked: bool,
}

impl ConstraintResult {
    /// A result that leaves the position untouched.
    pub const FREE: Self = Self {
        delta: Vec2::ZERO,
        should_move: true,
        locked: false,
    };
}

/// Restricts where a dragged element may come to rest.
pub trait PositionConstraint {
    /// Constrain `page`.
    fn constrain(&mut self, page: Point) -> ConstraintResult;
}

/// No restriction.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unconstrained;

impl PositionConstraint for Unconstrained {
    fn constrain(&mut self, _page: Point) -> ConstraintResult {
        ConstraintResult::FREE
    }
}

/// Clamps positions into a rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RestrictToRect {
    /// Allowed area, in page coordinates.
    pub bounds: Rect,
}

impl RestrictToRect {
    /// Restrict to `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }
}

impl PositionConstraint for RestrictToRect {
    fn constrain(&mut self, page: Point) -> ConstraintResult {
        let b = self.bounds.abs();
        let clamped = Point::new(page.x.clamp(b.x0, b.x1), page.y.clamp(b.y0, b.y1));
        let delta = clamped - page;
        ConstraintResult {
            delta,
            should_move: true,
            locked: delta != Vec2::ZERO,
        }
    }
}
