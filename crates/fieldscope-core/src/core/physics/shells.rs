use super::constants::{COULOMB_CONSTANT, GEOMETRY_EPSILON};
use crate::core::models::source::{CylindricalShells, SphericalShells};
use crate::core::utils::geometry::split_along_axis;
use nalgebra::{Point3, Vector3};

/// Field of a concentric spherical shell system.
///
/// The radial distance picks a layer, the redistributed surface charge enclosed by that
/// layer drives an inverse-square field scaled by the layer's dielectric constant, and
/// conductors screen their interior completely.
pub fn spherical_shells_field(source: &SphericalShells, point: &Point3<f64>) -> Vector3<f64> {
    let offset = point - source.center;
    let distance = offset.norm();
    if distance < GEOMETRY_EPSILON {
        return Vector3::zeros();
    }
    let charge = source.system.effective_charge(distance);
    offset * (COULOMB_CONSTANT * charge / distance.powi(3))
}

/// Field of a coaxial cylindrical shell system.
///
/// Layering works on the distance from the axis only, and the enclosed charge per unit
/// length drives a `2k·λ/r` falloff as for an infinite line.
pub fn cylindrical_shells_field(source: &CylindricalShells, point: &Point3<f64>) -> Vector3<f64> {
    let (_, perpendicular) = split_along_axis(&(point - source.center), &source.axis);
    let distance = perpendicular.norm();
    if distance < GEOMETRY_EPSILON {
        return Vector3::zeros();
    }
    let charge = source.system.effective_charge(distance);
    perpendicular * (2.0 * COULOMB_CONSTANT * charge / (distance * distance))
}
