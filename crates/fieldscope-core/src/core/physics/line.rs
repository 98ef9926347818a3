use super::constants::{COULOMB_CONSTANT, GEOMETRY_EPSILON, VACUUM_PERMITTIVITY};
use crate::core::models::source::{FiniteWire, InfiniteWire};
use crate::core::utils::geometry::{radial_vector, split_along_axis};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Field of an infinite line charge: `λ/(2π·ε0·r⊥)` radially away from the axis.
#[inline]
pub fn infinite_wire_field(source: &InfiniteWire, point: &Point3<f64>) -> Vector3<f64> {
    let (_, perpendicular) = split_along_axis(&(point - source.position), &source.direction);
    let distance = perpendicular.norm();
    if distance < GEOMETRY_EPSILON {
        return Vector3::zeros();
    }
    let magnitude = source.charge_density / (2.0 * PI * VACUUM_PERMITTIVITY * distance);
    radial_vector(&perpendicular, magnitude, GEOMETRY_EPSILON)
}

/// Exact field of a uniformly charged straight segment.
///
/// With `ρ` the perpendicular distance to the wire axis and `a`, `b` the signed axial
/// distances from the near (`-L/2`) and far (`+L/2`) ends, the field decomposes into
///
/// ```text
/// E_ρ = kλ/ρ · (a/√(ρ²+a²) − b/√(ρ²+b²))
/// E_z = kλ   · (1/√(ρ²+b²) − 1/√(ρ²+a²))
/// ```
///
/// Points inside the wire body (within `radius` of the axis, between the ends) see zero
/// field. On the axis beyond an end only the axial term survives.
pub fn finite_wire_field(source: &FiniteWire, point: &Point3<f64>) -> Vector3<f64> {
    let (axial, perpendicular) = split_along_axis(&(point - source.position), &source.direction);
    let rho = perpendicular.norm();
    let half_length = 0.5 * source.length;

    let within_ends = axial.abs() <= half_length;
    if within_ends && (rho < source.radius || rho < GEOMETRY_EPSILON) {
        return Vector3::zeros();
    }

    let a = axial + half_length;
    let b = axial - half_length;
    let dist_a = (rho * rho + a * a).sqrt();
    let dist_b = (rho * rho + b * b).sqrt();
    let k_lambda = COULOMB_CONSTANT * source.charge_density;

    let axial_coefficient = k_lambda * (1.0 / dist_b - 1.0 / dist_a);
    let axial_field = source.direction.as_ref() * axial_coefficient;

    if rho < GEOMETRY_EPSILON {
        return axial_field;
    }

    let radial_coefficient = k_lambda / rho * (a / dist_a - b / dist_b);
    axial_field + radial_vector(&perpendicular, radial_coefficient, GEOMETRY_EPSILON)
}
