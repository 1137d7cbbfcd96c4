//! Accumulation of setpoint components that may be unset.
//!
//! Setpoints travelling over `f32` fields mark unset components with NaN.
//! [`add_optional`] is the typed form of the same merge.

use nalgebra::Vector3;

/// Merge two optional setpoint components.
///
/// An unset component has no influence on the result and two set components are added.
///
/// ```
/// use embedded_flight_math::add_optional;
///
/// assert_eq!(add_optional(Some(1.), Some(2.)), Some(3.));
/// assert_eq!(add_optional(Some(1.), None), Some(1.));
/// assert_eq!(add_optional(None, Some(2.)), Some(2.));
/// assert_eq!(add_optional(None, None), None);
/// ```
pub fn add_optional(setpoint: Option<f32>, addition: Option<f32>) -> Option<f32> {
    match (setpoint, addition) {
        (Some(setpoint), Some(addition)) => Some(setpoint + addition),
        (setpoint, None) => setpoint,
        (None, addition) => addition,
    }
}

/// Add `addition` to `setpoint` where NaN marks either value as unset.
///
/// A NaN `addition` leaves the setpoint untouched and a NaN `setpoint` is overwritten.
pub fn add_if_not_nan(setpoint: &mut f32, addition: f32) {
    *setpoint = add_optional(set(*setpoint), set(addition)).unwrap_or(f32::NAN);
}

/// Add each component of `addition` to `setpoint` with [`add_if_not_nan`].
pub fn add_if_not_nan_vector3(setpoint: &mut Vector3<f32>, addition: Vector3<f32>) {
    for (setpoint, addition) in setpoint.iter_mut().zip(addition.iter()) {
        add_if_not_nan(setpoint, *addition);
    }
}

/// Replace the unset components of `vector` with zero.
pub fn set_zero_if_nan_vector3(vector: &mut Vector3<f32>) {
    add_if_not_nan_vector3(vector, Vector3::zeros());
}

fn set(value: f32) -> Option<f32> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}
