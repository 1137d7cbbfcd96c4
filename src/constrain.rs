use crate::larger_positive_root;
use log::trace;
use nalgebra::Vector2;

/// Length below which a vector is considered to be zero.
pub const SIGMA_NORM: f32 = 0.001;

/// Limit the sum of the priority vector `v0` and the secondary vector `v1` to a magnitude of `max`.
///
/// `v0` is kept as is while it fits and only the contribution of `v1` is shortened,
/// so the result lies on the circle of radius `max` whenever the sum is saturated.
///
/// ```
/// use embedded_flight_math::constrain_xy;
/// use nalgebra::Vector2;
/// use approx::assert_relative_eq;
///
/// // Feedback has priority over the feed forward
/// let feedback = Vector2::new(4., 0.);
/// let feed_forward = Vector2::new(0., -4.);
///
/// assert_relative_eq!(constrain_xy(feedback, feed_forward, 5.), Vector2::new(4., -3.));
/// ```
pub fn constrain_xy(v0: Vector2<f32>, v1: Vector2<f32>, max: f32) -> Vector2<f32> {
    let max = max.max(0.);
    let v0_len = v0.norm();

    if v0_len >= max {
        // The priority vector alone uses up the whole magnitude
        return scale_to(v0, max);
    }

    if v0_len < SIGMA_NORM && v1.norm() > max {
        return scale_to(v1, max);
    }

    let sum = v0 + v1;
    if sum.norm() <= max {
        return sum;
    }

    // Solve |v0 + t * v1| = max for the scale t of v1.
    // |v0| < max so the constant term is negative and the larger root is in (0, 1).
    let a = v1.norm_squared();
    let b = 2. * v0.dot(&v1);
    let c = v0.norm_squared() - max * max;

    match larger_positive_root(a, b, c) {
        Some(t) => v0 + v1 * t.min(1.),
        None => {
            trace!("no scale for secondary vector, saturating the sum");
            scale_to(sum, max)
        }
    }
}

/// Scale `v` to a length of `len`, the zero vector stays zero.
fn scale_to(v: Vector2<f32>, len: f32) -> Vector2<f32> {
    v.try_normalize(0.)
        .map(|unit| unit * len)
        .unwrap_or_else(Vector2::zeros)
}
