use super::constants::{GEOMETRY_EPSILON, VACUUM_PERMITTIVITY};
use crate::core::models::source::InfinitePlane;
use nalgebra::{Point3, Vector3};

/// Field of an infinite sheet: `σ/(2ε0)` along the normal, pointing away from a positive
/// sheet on either side, and zero on the sheet itself.
#[inline]
pub fn infinite_plane_field(source: &InfinitePlane, point: &Point3<f64>) -> Vector3<f64> {
    let signed_distance = (point - source.position).dot(source.normal.as_ref());
    if signed_distance.abs() < GEOMETRY_EPSILON {
        return Vector3::zeros();
    }
    let magnitude = source.charge_density / (2.0 * VACUUM_PERMITTIVITY);
    source.normal.as_ref() * (magnitude * signed_distance.signum())
}
