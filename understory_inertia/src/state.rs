// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The inertia and smooth-end simulators.
//!
//! ## Lifecycle
//!
//! 1) On pointer release the owner describes the release with a [`Release`] and asks
//!    [`InertiaState::evaluate_release`] what to do.
//! 2) [`InertiaState::begin_inertia`] or [`InertiaState::begin_smooth_end`] arms a
//!    simulation and requests the first frame.
//! 3) Each frame callback goes through [`InertiaState::accept_frame`] and
//!    [`InertiaState::step`], which yields the offset to move the element to.
//! 4) On [`FrameStep::Finished`] the owner performs the final move, ends the drag
//!    and calls [`InertiaState::finish`].
//!
//! A pointer-down on the moving element may [resume](InertiaState::resume) the drag;
//! [`InertiaState::stop`] cancels everything.

use bitflags::bitflags;
use kurbo::Vec2;

use crate::constraint::PositionConstraint;
use crate::frame::{FrameHandle, FrameScheduler};
use crate::kinematics::{
    curve_offset, decay_duration, decay_end_offset, decay_progress, ease_out_quad,
};
use crate::options::InertiaOptions;
use crate::pointer::PointerCoords;

/// Releases later than this after the last move never start inertia, in milliseconds.
pub const RELEASE_WINDOW_MS: f64 = 50.0;

bitflags! {
    /// Simulation state bits.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InertiaFlags: u8 {
        /// A simulation is running.
        const ACTIVE = 1 << 0;
        /// The running simulation is a smooth end.
        const SMOOTH_END = 1 << 1;
        /// The running simulation may be resumed by a pointer-down.
        const ALLOW_RESUME = 1 << 2;
        /// A simulation was interrupted and the drag resumed.
        const RESUMED = 1 << 3;
        /// The final frame is being applied.
        const ENDING = 1 << 4;
    }
}

/// Which simulation drives the element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Simulation {
    /// Exponential velocity decay.
    Inertia,
    /// Short ease onto a constrained position.
    SmoothEnd,
}

/// Everything known about a pointer release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Release {
    /// Pointer coordinates at release.
    pub up: PointerCoords,
    /// Client velocity at release, pixels per second.
    pub velocity: Vec2,
    /// Client speed at release, pixels per second.
    pub speed: f64,
    /// Time of release, milliseconds.
    pub now: f64,
    /// Time of the last pointer move, milliseconds.
    pub last_move: f64,
    /// More than one pointer was down.
    pub multi_pointer: bool,
    /// The release re-delivers the event that started the running simulation.
    pub replay: bool,
}

/// What a release should do.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ReleaseDecision {
    /// Start an inertia throw.
    Inertia,
    /// Ease onto the constrained position, offset by the given correction.
    SmoothEnd(Vec2),
    /// End the drag right away.
    None,
}

/// Result of one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FrameStep {
    /// No simulation is running.
    Idle,
    /// Move to this offset from the release point; another frame was requested.
    Moved(Vec2),
    /// Move to this final offset and end the drag.
    Finished(Vec2),
}

/// Per-interaction simulation state.
///
/// `S` is the `inertiastart` event kept for replay detection and as the event the
/// drag is ended with.
#[derive(Clone, Debug)]
pub struct InertiaState<S = ()> {
    flags: InertiaFlags,
    start_event: Option<S>,
    up: PointerCoords,
    // Unconstrained and constrained end offsets.
    xe: f64,
    ye: f64,
    modified_xe: f64,
    modified_ye: f64,
    vx0: f64,
    vy0: f64,
    v0: f64,
    ve_v0: f64,
    one_ve_v0: f64,
    te: f64,
    /// Milliseconds.
    t0: f64,
    sx: f64,
    sy: f64,
    resume_dx: f64,
    resume_dy: f64,
    pending: Option<FrameHandle>,
}

impl<S> Default for InertiaState<S> {
    fn default() -> Self {
        Self {
            flags: InertiaFlags::empty(),
            start_event: None,
            up: PointerCoords::default(),
            xe: 0.0,
            ye: 0.0,
            modified_xe: 0.0,
            modified_ye: 0.0,
            vx0: 0.0,
            vy0: 0.0,
            v0: 0.0,
            ve_v0: 0.0,
            one_ve_v0: 0.0,
            te: 0.0,
            t0: 0.0,
            sx: 0.0,
            sy: 0.0,
            resume_dx: 0.0,
            resume_dy: 0.0,
            pending: None,
        }
    }
}

impl<S> InertiaState<S> {
    /// Idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current flags.
    pub fn flags(&self) -> InertiaFlags {
        self.flags
    }

    /// Returns true while a simulation runs.
    pub fn is_active(&self) -> bool {
        self.flags.contains(InertiaFlags::ACTIVE)
    }

    /// Returns true while the final frame is applied.
    pub fn is_ending(&self) -> bool {
        self.flags.contains(InertiaFlags::ENDING)
    }

    /// The running simulation, if any.
    pub fn simulation(&self) -> Option<Simulation> {
        if !self.is_active() {
            None
        } else if self.flags.contains(InertiaFlags::SMOOTH_END) {
            Some(Simulation::SmoothEnd)
        } else {
            Some(Simulation::Inertia)
        }
    }

    /// The `inertiastart` event of the last simulation.
    pub fn start_event(&self) -> Option<&S> {
        self.start_event.as_ref()
    }

    /// Coordinates at the release that started the last simulation.
    pub fn up_coords(&self) -> PointerCoords {
        self.up
    }

    /// Unconstrained end offset.
    pub fn end_offset(&self) -> Vec2 {
        Vec2::new(self.xe, self.ye)
    }

    /// End offset after constraints.
    pub fn modified_end_offset(&self) -> Vec2 {
        Vec2::new(self.modified_xe, self.modified_ye)
    }

    /// Release velocity and speed of the last inertia throw.
    pub fn initial_velocity(&self) -> (Vec2, f64) {
        (Vec2::new(self.vx0, self.vy0), self.v0)
    }

    /// Duration of the last inertia throw, in seconds.
    pub fn duration(&self) -> f64 {
        self.te
    }

    /// Offset applied by the latest frame.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.sx, self.sy)
    }

    /// Release coordinates shifted by the latest frame's offset.
    pub fn current_coords(&self, now: f64) -> PointerCoords {
        PointerCoords {
            timestamp: now,
            ..self.up.translated(self.offset())
        }
    }

    /// Deltas swallowed since the last resume.
    pub fn resume_delta(&self) -> Vec2 {
        Vec2::new(self.resume_dx, self.resume_dy)
    }

    /// The frame this state waits for.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Decide how a release continues.
    ///
    /// Inertia needs valid, enabled options, a single-pointer release that is not a
    /// replay, a move within [`RELEASE_WINDOW_MS`], and a speed above both
    /// `min_speed` and `end_speed`. Otherwise, if inertia was possible and the
    /// constraint locks the release point, the element eases onto the corrected
    /// position.
    pub fn evaluate_release(
        &self,
        options: &InertiaOptions,
        release: &Release,
        constraint: &mut dyn PositionConstraint,
    ) -> ReleaseDecision {
        if self.is_active() {
            return ReleaseDecision::None;
        }
        let possible =
            options.enabled && options.is_valid() && !release.multi_pointer && !release.replay;
        if !possible {
            return ReleaseDecision::None;
        }
        if release.now - release.last_move < RELEASE_WINDOW_MS
            && release.speed > options.min_speed
            && release.speed > options.end_speed
        {
            return ReleaseDecision::Inertia;
        }
        let result = constraint.constrain(release.up.page);
        if result.should_move && result.locked {
            ReleaseDecision::SmoothEnd(result.delta)
        } else {
            ReleaseDecision::None
        }
    }

    /// Start an inertia throw from `release`.
    pub fn begin_inertia(
        &mut self,
        options: &InertiaOptions,
        release: &Release,
        start_event: S,
        constraint: &mut dyn PositionConstraint,
        frames: &mut dyn FrameScheduler,
    ) {
        self.arm(options, release.up, start_event, release.now);

        let lambda = options.resistance;
        self.vx0 = release.velocity.x;
        self.vy0 = release.velocity.y;
        self.v0 = release.speed;
        self.te = decay_duration(self.v0, options.end_speed, lambda);
        let end = decay_end_offset(release.velocity, self.te, lambda);
        self.xe = end.x;
        self.ye = end.y;
        self.ve_v0 = options.end_speed / self.v0;
        self.one_ve_v0 = 1.0 - self.ve_v0;

        let result = constraint.constrain(release.up.page + end);
        self.modified_xe = self.xe + result.delta.x;
        self.modified_ye = self.ye + result.delta.y;

        self.pending = Some(frames.request_frame());
        tracing::debug!(
            v0 = self.v0,
            te = self.te,
            xe = self.xe,
            ye = self.ye,
            modified_xe = self.modified_xe,
            modified_ye = self.modified_ye,
            "inertia started"
        );
    }

    /// Start easing onto `target`, an offset from `up`.
    pub fn begin_smooth_end(
        &mut self,
        options: &InertiaOptions,
        up: PointerCoords,
        target: Vec2,
        start_event: S,
        now: f64,
        frames: &mut dyn FrameScheduler,
    ) {
        self.arm(options, up, start_event, now);
        self.flags.insert(InertiaFlags::SMOOTH_END);
        self.xe = target.x;
        self.ye = target.y;
        self.modified_xe = target.x;
        self.modified_ye = target.y;
        self.pending = Some(frames.request_frame());
        tracing::debug!(dx = target.x, dy = target.y, "smooth end started");
    }

    fn arm(&mut self, options: &InertiaOptions, up: PointerCoords, start_event: S, now: f64) {
        self.flags = InertiaFlags::ACTIVE;
        self.flags.set(InertiaFlags::ALLOW_RESUME, options.allow_resume);
        self.start_event = Some(start_event);
        self.up = up;
        self.t0 = now;
        self.sx = 0.0;
        self.sy = 0.0;
    }

    /// Consume a frame callback. Returns false for stale or unknown handles.
    pub fn accept_frame(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Advance the running simulation to `now` (milliseconds).
    pub fn step(
        &mut self,
        options: &InertiaOptions,
        now: f64,
        frames: &mut dyn FrameScheduler,
    ) -> FrameStep {
        let offset = match self.simulation() {
            None => return FrameStep::Idle,
            Some(Simulation::Inertia) => self.inertia_offset(options, now),
            Some(Simulation::SmoothEnd) => self.smooth_end_offset(options, now),
        };
        match offset {
            Some(offset) => {
                self.sx = offset.x;
                self.sy = offset.y;
                self.pending = Some(frames.request_frame());
                tracing::trace!(sx = offset.x, sy = offset.y, "simulation frame");
                FrameStep::Moved(offset)
            }
            None => {
                self.flags.insert(InertiaFlags::ENDING);
                self.sx = self.modified_xe;
                self.sy = self.modified_ye;
                FrameStep::Finished(self.offset())
            }
        }
    }

    // `None` once the throw is over.
    fn inertia_offset(&self, options: &InertiaOptions, now: f64) -> Option<Vec2> {
        let t = (now - self.t0) / 1000.0;
        if t >= self.te {
            return None;
        }
        let progress = decay_progress(t, options.resistance, self.ve_v0, self.one_ve_v0);
        let end = self.end_offset();
        let modified = self.modified_end_offset();
        Some(if modified == end {
            end * progress
        } else {
            curve_offset(end, modified, progress)
        })
    }

    fn smooth_end_offset(&self, options: &InertiaOptions, now: f64) -> Option<Vec2> {
        let t = now - self.t0;
        let d = options.smooth_end_duration;
        (t < d).then(|| {
            Vec2::new(
                ease_out_quad(t, 0.0, self.xe, d),
                ease_out_quad(t, 0.0, self.ye, d),
            )
        })
    }

    /// Return to idle after the owner handled [`FrameStep::Finished`].
    pub fn finish(&mut self) {
        self.flags.remove(
            InertiaFlags::ACTIVE | InertiaFlags::SMOOTH_END | InertiaFlags::ENDING,
        );
        tracing::debug!("simulation finished");
    }

    /// Interrupt the simulation because the pointer went down on the element.
    ///
    /// Returns false if nothing was running or resuming is not allowed.
    pub fn resume(&mut self, frames: &mut dyn FrameScheduler) -> bool {
        if !self.is_active() || !self.flags.contains(InertiaFlags::ALLOW_RESUME) {
            return false;
        }
        if let Some(handle) = self.pending.take() {
            frames.cancel_frame(handle);
        }
        self.flags.remove(
            InertiaFlags::ACTIVE | InertiaFlags::SMOOTH_END | InertiaFlags::ENDING,
        );
        self.flags.insert(InertiaFlags::RESUMED);
        tracing::debug!(sx = self.sx, sy = self.sy, "simulation resumed by pointer");
        true
    }

    /// Filter the delta of a drag move.
    ///
    /// The first move after a resume reports zero when `zero_resume_delta` is set;
    /// the swallowed delta is kept in [`InertiaState::resume_delta`].
    pub fn apply_resume_delta(&mut self, options: &InertiaOptions, delta: Vec2) -> Vec2 {
        if !self.flags.contains(InertiaFlags::RESUMED) {
            return delta;
        }
        self.flags.remove(InertiaFlags::RESUMED);
        if options.zero_resume_delta {
            self.resume_dx += delta.x;
            self.resume_dy += delta.y;
            Vec2::ZERO
        } else {
            delta
        }
    }

    /// Cancel any running simulation and forget a pending resume.
    pub fn stop(&mut self, frames: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            frames.cancel_frame(handle);
        }
        self.resume_dx = 0.0;
        self.resume_dy = 0.0;
        self.flags.remove(
            InertiaFlags::ACTIVE
                | InertiaFlags::SMOOTH_END
                | InertiaFlags::ENDING
                | InertiaFlags::RESUMED,
        );
    }
}
