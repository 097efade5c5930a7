// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed-form motion curves.
//!
//! Inertia follows an exponential velocity decay `v(t) = v0·e^{-λt}` that is cut
//! off once the speed reaches `end_speed`, at `te = -ln(end_speed / v0) / λ`.
//! Progress along the path is normalized so it is exactly `0` at `t = 0` and
//! exactly `1` at `t = te`.

use kurbo::{ParamCurve, Point, QuadBez, Vec2};

/// Time in seconds until the speed decays from `v0` to `end_speed`.
pub fn decay_duration(v0: f64, end_speed: f64, resistance: f64) -> f64 {
    -(end_speed / v0).ln() / resistance
}

/// Unconstrained end offset for initial velocity `v` and duration `te`.
pub fn decay_end_offset(v: Vec2, te: f64, resistance: f64) -> Vec2 {
    Vec2::new((v.x - te) / resistance, (v.y - te) / resistance)
}

/// Fraction of the path covered after `t` seconds.
///
/// `ve_v0` is `end_speed / v0`; `one_ve_v0` is `1 - ve_v0`.
pub fn decay_progress(t: f64, resistance: f64, ve_v0: f64, one_ve_v0: f64) -> f64 {
    1.0 - ((-resistance * t).exp() - ve_v0) / one_ve_v0
}

/// Point at `t` on the quadratic curve from the origin through `control` to `end`.
pub fn curve_offset(control: Vec2, end: Vec2, t: f64) -> Vec2 {
    QuadBez::new(Point::ZERO, control.to_point(), end.to_point())
        .eval(t)
        .to_vec2()
}

/// Quadratic ease-out of `change` from `begin` over `duration`.
pub fn ease_out_quad(t: f64, begin: f64, change: f64, duration: f64) -> f64 {
    let t = t / duration;
    -change * t * (t - 2.0) + begin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_spans_zero_to_one() {
        for (v0, end, lambda) in [(500.0, 10.0, 10.0), (2000.0, 10.0, 3.0), (150.0, 20.0, 25.0)] {
            let te = decay_duration(v0, end, lambda);
            let ve_v0 = end / v0;
            let p0 = decay_progress(0.0, lambda, ve_v0, 1.0 - ve_v0);
            let pe = decay_progress(te, lambda, ve_v0, 1.0 - ve_v0);
            assert!(p0.abs() < 1e-12);
            assert!((pe - 1.0).abs() < 1e-9);
            let mid = decay_progress(te / 2.0, lambda, ve_v0, 1.0 - ve_v0);
            assert!(mid > 0.5, "decay front-loads motion");
        }
    }

    #[test]
    fn end_offset_matches_closed_form() {
        let te = decay_duration(500.0, 10.0, 10.0);
        assert!((te - 50f64.ln() / 10.0).abs() < 1e-12);
        let xe = decay_end_offset(Vec2::new(500.0, 0.0), te, 10.0);
        assert!((xe.x - (500.0 - te) / 10.0).abs() < 1e-12);
        assert!((xe.y + te / 10.0).abs() < 1e-12);
    }

    #[test]
    fn curve_endpoints() {
        let c = Vec2::new(40.0, 0.0);
        let e = Vec2::new(30.0, 10.0);
        assert_eq!(curve_offset(c, e, 0.0), Vec2::ZERO);
        let end = curve_offset(c, e, 1.0);
        assert!((end - e).hypot() < 1e-9);
    }

    #[test]
    fn ease_out_quad_endpoints() {
        assert_eq!(ease_out_quad(0.0, 0.0, 12.0, 300.0), 0.0);
        let end = ease_out_quad(300.0, 0.0, 12.0, 300.0);
        assert!((end - 12.0).abs() < 1e-12);
        let mid = ease_out_quad(150.0, 0.0, 12.0, 300.0);
        assert!((mid - 9.0).abs() < 1e-12);
    }
}
