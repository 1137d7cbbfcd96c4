use crate::{reject, wrap_pi, Error};
use core::f32::consts::FRAC_PI_2;
use log::trace;
use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};
use num_traits::Float;

/// Distance of `|sin(pitch)|` from one below which roll and yaw are treated as the same axis.
pub const GIMBAL_LOCK_MARGIN: f32 = 1e-6;

/// Attitude setpoint for the attitude controller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttitudeSetpoint {
    /// Desired rotation from the body frame to the world frame.
    pub q_d: UnitQuaternion<f32>,

    /// Rotation about the body x axis in radians.
    pub roll_body: f32,

    /// Rotation about the body y axis in radians.
    pub pitch_body: f32,

    /// Rotation about the body z axis in radians.
    pub yaw_body: f32,

    /// Thrust in the body frame, only the z axis carries thrust.
    pub thrust_body: Vector3<f32>,
}

impl Default for AttitudeSetpoint {
    fn default() -> Self {
        Self {
            q_d: UnitQuaternion::identity(),
            roll_body: 0.,
            pitch_body: 0.,
            yaw_body: 0.,
            thrust_body: Vector3::zeros(),
        }
    }
}

impl AttitudeSetpoint {
    /// The roll, pitch and yaw angles of this setpoint in radians.
    pub fn euler(&self) -> Vector3<f32> {
        Vector3::new(self.roll_body, self.pitch_body, self.yaw_body)
    }
}

/// Calculate the attitude setpoint that points the thrust along `thrust_setpoint` with heading `yaw`.
///
/// Thrust acts along the negative body z axis, so the body z axis is set opposite to the thrust.
/// The magnitude of the thrust is carried in `thrust_body.z`.
///
/// `thrust_setpoint` must not be the zero vector (see [`try_thrust_to_attitude`]).
///
/// ```
/// use embedded_flight_math::thrust_to_attitude;
/// use nalgebra::Vector3;
/// use approx::assert_relative_eq;
///
/// // Hover thrust pointing up in NED
/// let attitude = thrust_to_attitude(Vector3::new(0., 0., -0.5), 0.);
///
/// assert_relative_eq!(attitude.roll_body, 0.);
/// assert_relative_eq!(attitude.pitch_body, 0.);
/// assert_relative_eq!(attitude.yaw_body, 0.);
/// assert_eq!(attitude.thrust_body, Vector3::new(0., 0., -0.5));
/// ```
pub fn thrust_to_attitude(thrust_setpoint: Vector3<f32>, yaw: f32) -> AttitudeSetpoint {
    let mut attitude = body_z_to_attitude(-thrust_setpoint, yaw);
    attitude.thrust_body.z = -thrust_setpoint.norm();
    attitude
}

/// Checked version of [`thrust_to_attitude`] that rejects a thrust setpoint with no direction.
pub fn try_thrust_to_attitude(
    thrust_setpoint: Vector3<f32>,
    yaw: f32,
) -> Result<AttitudeSetpoint, Error> {
    if thrust_setpoint.norm_squared() == 0. {
        return Err(Error::ZeroThrust);
    }

    Ok(thrust_to_attitude(thrust_setpoint, yaw))
}

/// Calculate the attitude whose body z axis points along `body_z` with its x axis as close to `yaw` as possible.
/// The returned setpoint has no thrust.
pub fn body_z_to_attitude(body_z: Vector3<f32>, yaw: f32) -> AttitudeSetpoint {
    debug_assert!(body_z.norm_squared() > 0., "body z axis has no direction");
    let body_z = body_z.normalize();

    // Desired heading in the horizontal plane, tilted into the plane orthogonal to body z
    // as body_y x body_z, which stays unit length when the heading is close to body z.
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let mut body_y = body_z.cross(&Vector3::new(cos_yaw, sin_yaw, 0.));

    if body_y.norm_squared() < f32::EPSILON {
        // The heading lies along body z and can't orient the body, which only happens for horizontal thrust.
        trace!("heading parallel to body z axis, using world z as reference");
        body_y = body_z.cross(&Vector3::z());
    }

    let body_y = body_y.normalize();
    let body_x = body_y.cross(&body_z);

    let dcm = Matrix3::from_columns(&[body_x, body_y, body_z]);
    let q_d = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(dcm));
    let (roll_body, pitch_body, yaw_body) = euler_xyz(&dcm);

    AttitudeSetpoint {
        q_d,
        roll_body,
        pitch_body,
        yaw_body,
        thrust_body: Vector3::zeros(),
    }
}

/// Decompose a rotation matrix into `(roll, pitch, yaw)` with `dcm = Rx(roll) * Ry(pitch) * Rz(yaw)`.
///
/// Roll comes first so that a half turn of the thrust vector shows up as a roll of PI instead of a pitch.
/// Angles are in (-PI, PI]. In gimbal lock the rotation about the shared axis is assigned to yaw.
pub fn euler_xyz(dcm: &Matrix3<f32>) -> (f32, f32, f32) {
    let sin_pitch = dcm[(0, 2)].max(-1.).min(1.);

    if 1. - sin_pitch.abs() < GIMBAL_LOCK_MARGIN {
        let pitch = if sin_pitch > 0. { FRAC_PI_2 } else { -FRAC_PI_2 };
        let yaw = dcm[(1, 0)].atan2(dcm[(1, 1)]);
        (0., pitch, wrap_pi(yaw))
    } else {
        let pitch = sin_pitch.asin();
        let roll = (-dcm[(1, 2)]).atan2(dcm[(2, 2)]);
        let yaw = (-dcm[(0, 1)]).atan2(dcm[(0, 0)]);
        (wrap_pi(roll), pitch, wrap_pi(yaw))
    }
}

/// Rotate the unit vector `body_unit` towards `world_unit` until the angle between them is at most `max_angle`.
pub fn limit_tilt(
    body_unit: Vector3<f32>,
    world_unit: Vector3<f32>,
    max_angle: f32,
) -> Vector3<f32> {
    let dot = body_unit.dot(&world_unit).max(-1.).min(1.);
    let angle = dot.acos().min(max_angle.max(0.));

    let mut rejection = reject(body_unit, world_unit);
    if rejection.norm_squared() < f32::EPSILON {
        // Parallel vectors, tilt about any axis orthogonal to world_unit
        rejection = reject(Vector3::x(), world_unit);
        if rejection.norm_squared() < f32::EPSILON {
            rejection = reject(Vector3::y(), world_unit);
        }
    }

    world_unit * angle.cos() + rejection.normalize() * angle.sin()
}
