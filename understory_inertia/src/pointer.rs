// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer coordinates and velocity.

use kurbo::{Point, Vec2};

/// A pointer position in page and client space at a point in time.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerCoords {
    /// Page coordinates.
    pub page: Point,
    /// Client (viewport) coordinates.
    pub client: Point,
    /// Milliseconds.
    pub timestamp: f64,
}

impl PointerCoords {
    /// Coordinates with identical page and client positions.
    pub fn at(pos: Point, timestamp: f64) -> Self {
        Self {
            page: pos,
            client: pos,
            timestamp,
        }
    }

    /// Shift both page and client positions by `offset`.
    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            page: self.page + offset,
            client: self.client + offset,
            timestamp: self.timestamp,
        }
    }
}

/// Movement between two [`PointerCoords`] samples.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerDelta {
    /// Page-space displacement.
    pub page: Vec2,
    /// Client-space displacement.
    pub client: Vec2,
    /// Elapsed milliseconds.
    pub dt: f64,
    /// Page velocity, pixels per second.
    pub page_velocity: Vec2,
    /// Client velocity, pixels per second.
    pub client_velocity: Vec2,
}

/// Shortest interval used for velocities, in seconds.
const MIN_DT: f64 = 0.001;

impl PointerDelta {
    /// Delta from `prev` to `cur`.
    ///
    /// Intervals shorter than a millisecond (including zero) are treated as one
    /// millisecond so velocities stay finite.
    pub fn between(prev: &PointerCoords, cur: &PointerCoords) -> Self {
        let dt = cur.timestamp - prev.timestamp;
        let secs = (dt / 1000.0).max(MIN_DT);
        let page = cur.page - prev.page;
        let client = cur.client - prev.client;
        Self {
            page,
            client,
            dt,
            page_velocity: page / secs,
            client_velocity: client / secs,
        }
    }

    /// Client speed, pixels per second.
    pub fn speed(&self) -> f64 {
        self.client_velocity.hypot()
    }
}
