use super::shell::ShellSystem;
use nalgebra::{Point3, Unit, Vector3};
use std::fmt;

/// Identifies which family of closed-form evaluator a source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    PointCharge,
    InfiniteWire,
    FiniteWire,
    InfinitePlane,
    Sphere,
    SphericalShells,
    CylindricalShells,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::PointCharge => "point-charge",
            SourceKind::InfiniteWire => "infinite-wire",
            SourceKind::FiniteWire => "finite-wire",
            SourceKind::InfinitePlane => "infinite-plane",
            SourceKind::Sphere => "sphere",
            SourceKind::SphericalShells => "concentric-spheres",
            SourceKind::CylindricalShells => "concentric-cylinders",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point charge `charge` (C) located at `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCharge {
    pub position: Point3<f64>,
    pub charge: f64,
}

/// An infinitely long line charge through `position` along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteWire {
    pub position: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
    /// Linear charge density λ in C/m.
    pub charge_density: f64,
}

/// A straight wire segment centered on `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteWire {
    pub position: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
    /// Linear charge density λ in C/m.
    pub charge_density: f64,
    pub length: f64,
    /// Physical radius of the wire body; the field inside the body is zero.
    pub radius: f64,
}

/// An infinite charged plane through `position` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfinitePlane {
    pub position: Point3<f64>,
    pub normal: Unit<Vector3<f64>>,
    /// Surface charge density σ in C/m².
    pub charge_density: f64,
}

/// A uniformly charged ball, or a thin shell when `hollow` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargedSphere {
    pub center: Point3<f64>,
    pub radius: f64,
    /// Total charge Q in C.
    pub charge: f64,
    pub hollow: bool,
}

/// Concentric spherical layers around `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalShells {
    pub center: Point3<f64>,
    pub system: ShellSystem,
}

/// Coaxial cylindrical layers around the axis through `center` along `axis`.
///
/// Layer charges are interpreted per unit length.
#[derive(Debug, Clone, PartialEq)]
pub struct CylindricalShells {
    pub center: Point3<f64>,
    pub axis: Unit<Vector3<f64>>,
    pub system: ShellSystem,
}

/// Every kind of charge configuration the field engine can evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum ChargeSource {
    Point(PointCharge),
    InfiniteWire(InfiniteWire),
    FiniteWire(FiniteWire),
    Plane(InfinitePlane),
    Sphere(ChargedSphere),
    SphericalShells(SphericalShells),
    CylindricalShells(CylindricalShells),
}

impl ChargeSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            ChargeSource::Point(_) => SourceKind::PointCharge,
            ChargeSource::InfiniteWire(_) => SourceKind::InfiniteWire,
            ChargeSource::FiniteWire(_) => SourceKind::FiniteWire,
            ChargeSource::Plane(_) => SourceKind::InfinitePlane,
            ChargeSource::Sphere(_) => SourceKind::Sphere,
            ChargeSource::SphericalShells(_) => SourceKind::SphericalShells,
            ChargeSource::CylindricalShells(_) => SourceKind::CylindricalShells,
        }
    }

    /// The layered system behind a shell source, if any.
    pub fn shell_system(&self) -> Option<&ShellSystem> {
        match self {
            ChargeSource::SphericalShells(shells) => Some(&shells.system),
            ChargeSource::CylindricalShells(shells) => Some(&shells.system),
            _ => None,
        }
    }
}
