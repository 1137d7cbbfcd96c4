use crate::{larger_positive_root, Error};
use log::debug;
use nalgebra::Vector3;

/// Calculate the look-ahead target on the segment from `line_start` to `line_end`
/// for a sphere of `radius` around `center`.
///
/// Returns the furthest point along the segment that is still inside the sphere and `true`,
/// clipped to `line_end`.
/// If the sphere doesn't reach the segment ahead of `line_start`, the point on the segment
/// closest to `center` is returned with `false` and can still be used as a fallback target.
///
/// A segment with no length has no direction: it is treated as a line the sphere never crosses
/// and `(line_start, false)` is returned (see [`try_cross_sphere_line`]).
///
/// ```
/// use embedded_flight_math::cross_sphere_line;
/// use nalgebra::Vector3;
///
/// let previous = Vector3::new(0., 0., 0.);
/// let target = Vector3::new(0., 0., 2.);
///
/// let (look_ahead, intersects) = cross_sphere_line(Vector3::new(0., 0., -0.5), 1., previous, target);
/// assert!(intersects);
/// assert_eq!(look_ahead, Vector3::new(0., 0., 0.5));
/// ```
pub fn cross_sphere_line(
    center: Vector3<f32>,
    radius: f32,
    line_start: Vector3<f32>,
    line_end: Vector3<f32>,
) -> (Vector3<f32>, bool) {
    let d = line_end - line_start;
    if d.norm_squared() == 0. {
        debug!("look-ahead on a segment with no length");
        return (line_start, false);
    }

    // |line_start + t * d - center| = radius
    let f = line_start - center;
    let a = d.norm_squared();
    let b = 2. * d.dot(&f);
    let c = f.norm_squared() - radius * radius;

    match larger_positive_root(a, b, c) {
        Some(t) => (line_start + d * t.min(1.), true),
        // The sphere misses the line or only crosses it behind line_start
        None => (closest_point_on_segment(center, line_start, line_end), false),
    }
}

/// Checked version of [`cross_sphere_line`] that rejects a segment with no length.
pub fn try_cross_sphere_line(
    center: Vector3<f32>,
    radius: f32,
    line_start: Vector3<f32>,
    line_end: Vector3<f32>,
) -> Result<(Vector3<f32>, bool), Error> {
    if (line_end - line_start).norm_squared() == 0. {
        return Err(Error::DegenerateSegment);
    }

    Ok(cross_sphere_line(center, radius, line_start, line_end))
}

/// The point on the segment from `line_start` to `line_end` closest to `point`.
pub fn closest_point_on_segment(
    point: Vector3<f32>,
    line_start: Vector3<f32>,
    line_end: Vector3<f32>,
) -> Vector3<f32> {
    let d = line_end - line_start;
    let len_squared = d.norm_squared();
    if len_squared == 0. {
        return line_start;
    }

    let t = (point - line_start).dot(&d) / len_squared;
    line_start + d * t.max(0.).min(1.)
}
