// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inertia configuration.

/// Options controlling release-time simulations.
///
/// Speeds are in pixels per second; `smooth_end_duration` is in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InertiaOptions {
    /// Master switch. Disabled by default.
    pub enabled: bool,
    /// Decay constant λ; larger values stop sooner.
    pub resistance: f64,
    /// Release speed above which inertia starts.
    pub min_speed: f64,
    /// Speed at which the decay is considered finished.
    pub end_speed: f64,
    /// A pointer-down on the moving element may interrupt the simulation.
    pub allow_resume: bool,
    /// The first move after a resume reports a zero delta.
    pub zero_resume_delta: bool,
    /// Duration of the smooth-end ease, in milliseconds.
    pub smooth_end_duration: f64,
}

impl Default for InertiaOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            resistance: 10.0,
            min_speed: 100.0,
            end_speed: 10.0,
            allow_resume: true,
            zero_resume_delta: true,
            smooth_end_duration: 300.0,
        }
    }
}

impl InertiaOptions {
    /// Default options with inertia switched on.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Returns true if the parameters can produce a finite trajectory.
    ///
    /// Releases under invalid options behave as if inertia were disabled.
    pub fn is_valid(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.resistance)
            && positive(self.min_speed)
            && positive(self.end_speed)
            && self.smooth_end_duration.is_finite()
            && self.smooth_end_duration >= 0.0
    }
}
