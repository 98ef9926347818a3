use super::constants::{COULOMB_CONSTANT, GEOMETRY_EPSILON};
use crate::core::models::source::ChargedSphere;
use nalgebra::{Point3, Vector3};

/// Field of a uniformly charged sphere.
///
/// A solid sphere grows linearly inside (`k·Q·r/R³`) and falls off as `k·Q/r²` outside.
/// A hollow sphere has no interior field at all; its surface and exterior follow the
/// inverse-square law.
#[inline]
pub fn sphere_field(source: &ChargedSphere, point: &Point3<f64>) -> Vector3<f64> {
    let offset = point - source.center;
    let distance = offset.norm();
    if distance < GEOMETRY_EPSILON {
        return Vector3::zeros();
    }

    let inside = distance < source.radius;
    // Scale factor applied to the raw offset, so the direction never needs normalizing.
    let scale = match (inside, source.hollow) {
        (true, true) => return Vector3::zeros(),
        (true, false) => COULOMB_CONSTANT * source.charge / source.radius.powi(3),
        (false, _) => COULOMB_CONSTANT * source.charge / distance.powi(3),
    };
    offset * scale
}
