//! # embedded-flight-math
//! A `#![no_std]` library of the setpoint geometry used by a multi-copter position controller.
//!
//! Every function here is pure: no allocation, no shared state and a bounded cost per call,
//! so they can be evaluated directly from the control loop.
//!
//! # Attitude
//! [`thrust_to_attitude`] maps a thrust vector and a heading to an [`AttitudeSetpoint`]
//! for the attitude controller.
//!
//! # Horizontal saturation
//! [`constrain_xy`] limits the sum of a priority vector and a secondary vector to a maximum magnitude.
//!
//! # Path following
//! [`cross_sphere_line`] finds the look-ahead target on a path segment.
//!
//! # Optional setpoints
//! [`add_if_not_nan`] accumulates setpoint components where NaN means unset
//! (see [`add_optional`] for the typed version).

#![no_std]

use core::f32::consts::PI;
use nalgebra::Vector3;
use num_traits::Float;

pub mod attitude;
pub use attitude::{
    body_z_to_attitude, limit_tilt, thrust_to_attitude, try_thrust_to_attitude, AttitudeSetpoint,
};

pub mod constrain;
pub use constrain::constrain_xy;

mod error;
pub use error::Error;

pub mod path;
pub use path::{cross_sphere_line, try_cross_sphere_line};

pub mod setpoint;
pub use setpoint::{add_if_not_nan, add_if_not_nan_vector3, add_optional, set_zero_if_nan_vector3};

/// Solve `a * t^2 + b * t + c = 0` and return the larger root if it is real and positive.
///
/// `a` must be positive for the larger root to be `(-b + sqrt(b^2 - 4ac)) / 2a`,
/// anything else returns `None`.
pub(crate) fn larger_positive_root(a: f32, b: f32, c: f32) -> Option<f32> {
    if a.is_nan() || a <= 0. {
        return None;
    }

    let discriminant = b * b - 4. * a * c;
    if discriminant < 0. {
        return None;
    }

    let root = (-b + discriminant.sqrt()) / (2. * a);
    if root > 0. {
        Some(root)
    } else {
        None
    }
}

/// Wrap an angle to (-PI, PI].
pub(crate) fn wrap_pi(radian: f32) -> f32 {
    let res = radian % (PI * 2.);
    if res > PI {
        res - PI * 2.
    } else if res <= -PI {
        res + PI * 2.
    } else {
        res
    }
}

/// The component of `v` orthogonal to the unit vector `unit`.
pub(crate) fn reject(v: Vector3<f32>, unit: Vector3<f32>) -> Vector3<f32> {
    v - unit * v.dot(&unit)
}

#[cfg(test)]
mod tests {
    use super::{larger_positive_root, reject, wrap_pi};
    use approx::assert_relative_eq;
    use core::f32::consts::PI;
    use nalgebra::Vector3;

    #[test]
    fn larger_root_of_two_real_roots() {
        // (t - 1)(t + 3)
        assert_eq!(larger_positive_root(1., 2., -3.), Some(1.));
    }

    #[test]
    fn larger_root_is_scaled_by_a() {
        // 4t^2 - 9 = 0
        assert_eq!(larger_positive_root(4., 0., -9.), Some(1.5));
    }

    #[test]
    fn no_root_for_negative_discriminant() {
        assert_eq!(larger_positive_root(1., 0., 1.), None);
    }

    #[test]
    fn no_root_when_both_roots_are_behind() {
        // (t + 1)(t + 2)
        assert_eq!(larger_positive_root(1., 3., 2.), None);
        // double root at zero
        assert_eq!(larger_positive_root(1., 0., 0.), None);
    }

    #[test]
    fn no_root_for_degenerate_leading_coefficient() {
        assert_eq!(larger_positive_root(0., 1., -1.), None);
        assert_eq!(larger_positive_root(f32::NAN, 1., -1.), None);
    }

    #[test]
    fn wrap_pi_keeps_half_turn_positive() {
        assert_eq!(wrap_pi(-PI), PI);
        assert_eq!(wrap_pi(PI), PI);
        assert_relative_eq!(wrap_pi(3. * PI / 2.), -PI / 2., epsilon = 1e-6);
        assert_relative_eq!(wrap_pi(-3. * PI / 2.), PI / 2., epsilon = 1e-6);
        assert_eq!(wrap_pi(0.5), 0.5);
    }

    #[test]
    fn rejection_is_orthogonal() {
        let unit = Vector3::new(0., 0., 1.);
        let v = Vector3::new(1., 2., 3.);
        assert_eq!(reject(v, unit), Vector3::new(1., 2., 0.));
    }
}
