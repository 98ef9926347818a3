use super::constants::{COULOMB_CONSTANT, GEOMETRY_EPSILON};
use crate::core::models::source::PointCharge;
use nalgebra::{Point3, Vector3};

/// Coulomb field `k·q·r̂/r²` of a point charge; zero at the charge itself.
#[inline]
pub fn point_charge_field(source: &PointCharge, point: &Point3<f64>) -> Vector3<f64> {
    let offset = point - source.position;
    let distance = offset.norm();
    if distance < GEOMETRY_EPSILON {
        return Vector3::zeros();
    }
    offset * (COULOMB_CONSTANT * source.charge / distance.powi(3))
}
