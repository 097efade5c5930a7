// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Inertia: release-time simulations for pointer drags.
//!
//! ## Overview
//!
//! When a dragged element is released, it can keep going:
//!
//! - **Inertia**: a fast release throws the element along an exponential velocity
//!   decay. If a [`PositionConstraint`](constraint::PositionConstraint) moves the
//!   natural end point, the path bends along a quadratic curve onto the constrained
//!   point instead.
//! - **Smooth end**: a slow release outside the allowed area eases the element back
//!   over [`smooth_end_duration`](options::InertiaOptions::smooth_end_duration).
//!
//! Simulations are frame driven. They request callbacks from a
//! [`FrameScheduler`](frame::FrameScheduler) and never read a clock: every step
//! receives the current time in milliseconds. That keeps them deterministic and
//! easy to drive headlessly with [`FrameQueue`](frame::FrameQueue).
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_inertia::constraint::Unconstrained;
//! use understory_inertia::frame::FrameQueue;
//! use understory_inertia::options::InertiaOptions;
//! use understory_inertia::pointer::PointerCoords;
//! use understory_inertia::state::{FrameStep, InertiaState, Release, ReleaseDecision};
//!
//! let options = InertiaOptions::enabled();
//! let mut state: InertiaState = InertiaState::new();
//! let mut frames = FrameQueue::new();
//!
//! let release = Release {
//!     up: PointerCoords::at(Point::new(10.0, 10.0), 1000.0),
//!     velocity: Vec2::new(800.0, 0.0),
//!     speed: 800.0,
//!     now: 1000.0,
//!     last_move: 990.0,
//!     multi_pointer: false,
//!     replay: false,
//! };
//! assert_eq!(
//!     state.evaluate_release(&options, &release, &mut Unconstrained),
//!     ReleaseDecision::Inertia
//! );
//! state.begin_inertia(&options, &release, (), &mut Unconstrained, &mut frames);
//!
//! let mut now = 1000.0;
//! while let Some(handle) = frames.next_frame() {
//!     assert!(state.accept_frame(handle));
//!     now += 16.0;
//!     if let FrameStep::Finished(offset) = state.step(&options, now, &mut frames) {
//!         assert_eq!(offset, state.modified_end_offset());
//!         state.finish();
//!     }
//! }
//! assert!(!state.is_active());
//! ```

pub mod constraint;
pub mod frame;
pub mod kinematics;
pub mod options;
pub mod pointer;
pub mod state;
