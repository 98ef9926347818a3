//! # Physics Module
//!
//! Closed-form electrostatics used by the sampling engine. Every evaluator is a pure
//! function `(source, point) -> field vector` in SI units and is total: degenerate
//! geometry (a point on a charge, an axis, a plane or a shell boundary) yields the zero
//! vector rather than an error, so a full grid can be sampled without per-point checks.
//!
//! ## Key Components
//!
//! - [`constants`] - Coulomb constant, vacuum permittivity and geometric tolerances
//! - [`layers`] - Charge redistribution across nested conductor/dielectric layers
//! - [`point`], [`line`], [`plane`], [`sphere`], [`shells`] - One evaluator family each
//!
//! [`field_at`] dispatches a [`ChargeSource`] to the matching evaluator.

pub mod constants;
pub mod layers;
pub mod line;
pub mod plane;
pub mod point;
pub mod shells;
pub mod sphere;

use crate::core::models::source::ChargeSource;
use nalgebra::{Point3, Vector3};

/// Evaluates the field of a single source at `point`.
#[inline]
pub fn field_at(source: &ChargeSource, point: &Point3<f64>) -> Vector3<f64> {
    match source {
        ChargeSource::Point(s) => point::point_charge_field(s, point),
        ChargeSource::InfiniteWire(s) => line::infinite_wire_field(s, point),
        ChargeSource::FiniteWire(s) => line::finite_wire_field(s, point),
        ChargeSource::Plane(s) => plane::infinite_plane_field(s, point),
        ChargeSource::Sphere(s) => sphere::sphere_field(s, point),
        ChargeSource::SphericalShells(s) => shells::spherical_shells_field(s, point),
        ChargeSource::CylindricalShells(s) => shells::cylindrical_shells_field(s, point),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::source::{ChargedSphere, InfinitePlane, PointCharge};

    #[test]
    fn field_at_dispatches_to_matching_evaluator() {
        let charge = PointCharge {
            position: Point3::new(1.0, 0.0, 0.0),
            charge: 1e-9,
        };
        let point = Point3::new(0.0, 2.0, 0.0);
        assert_eq!(
            field_at(&ChargeSource::Point(charge), &point),
            point::point_charge_field(&charge, &point)
        );
    }

    #[test]
    fn evaluators_never_produce_nan_on_degenerate_points() {
        let sources = [
            ChargeSource::Point(PointCharge {
                position: Point3::origin(),
                charge: 1.0,
            }),
            ChargeSource::Plane(InfinitePlane {
                position: Point3::origin(),
                normal: Vector3::x_axis(),
                charge_density: 1.0,
            }),
            ChargeSource::Sphere(ChargedSphere {
                center: Point3::origin(),
                radius: 1.0,
                charge: 1.0,
                hollow: false,
            }),
        ];
        for source in &sources {
            let field = field_at(source, &Point3::origin());
            assert!(field.iter().all(|c| c.is_finite()));
        }
    }
}
