use crate::core::physics::constants::BOUNDARY_TOLERANCE;
use crate::core::physics::layers::{self, LayerError};
use std::fmt;
use std::str::FromStr;

/// The electrical behaviour of one layer in a shell system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    /// Free charge migrates to the layer's boundaries and screens its interior.
    Conductor,
    /// Enclosed charge passes through; the field is scaled by the dielectric constant.
    Dielectric,
}

static MATERIAL_TAGS: phf::Map<&'static str, Material> = phf::phf_map! {
    "conductor" => Material::Conductor,
    "dielectric" => Material::Dielectric,
};

impl FromStr for Material {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MATERIAL_TAGS
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| format!("unknown material '{s}', expected 'conductor' or 'dielectric'"))
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Material::Conductor => "conductor",
            Material::Dielectric => "dielectric",
        })
    }
}

/// Where a radial distance falls relative to the layers of a shell system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerPosition {
    /// Strictly inside layer `i`, between `radii[i - 1]` (or the center) and `radii[i]`.
    Inside(usize),
    /// On the boundary surface at `radii[i]`.
    OnBoundary(usize),
    /// Beyond the outermost radius.
    Outside,
}

/// A validated stack of concentric conductor/dielectric layers.
///
/// The same layering model serves both spherical and cylindrical geometries; only the
/// distance measure and the falloff law differ between them. The per-surface charge
/// distribution is solved once at construction, since the layer arrays are immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellSystem {
    radii: Vec<f64>,
    materials: Vec<Material>,
    dielectrics: Vec<f64>,
    charges: Vec<f64>,
    surface_charges: Vec<f64>,
}

impl ShellSystem {
    /// Builds a shell system from its parallel layer arrays.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError`] if the arrays differ in length, the radii are not positive and
    /// strictly increasing, a value is not finite, or a dielectric constant is not positive.
    pub fn new(
        radii: Vec<f64>,
        materials: Vec<Material>,
        dielectrics: Vec<f64>,
        charges: Vec<f64>,
    ) -> Result<Self, LayerError> {
        if dielectrics.len() != radii.len() {
            return Err(LayerError::LengthMismatch {
                field: "dielectrics",
                expected: radii.len(),
                found: dielectrics.len(),
            });
        }
        for (index, &value) in dielectrics.iter().enumerate() {
            if !value.is_finite() {
                return Err(LayerError::NonFiniteValue {
                    what: "dielectric constant",
                    index,
                });
            }
            if value <= 0.0 {
                return Err(LayerError::NonPositiveDielectric { index, value });
            }
        }

        let surface_charges = layers::solve_surface_charges(&radii, &charges, &materials)?;

        Ok(Self {
            radii,
            materials,
            dielectrics,
            charges,
            surface_charges,
        })
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn dielectrics(&self) -> &[f64] {
        &self.dielectrics
    }

    pub fn charges(&self) -> &[f64] {
        &self.charges
    }

    /// Net charge on each interface after redistribution, index-aligned with [`Self::radii`].
    pub fn surface_charges(&self) -> &[f64] {
        &self.surface_charges
    }

    pub fn total_charge(&self) -> f64 {
        self.charges.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    pub fn locate(&self, distance: f64) -> LayerPosition {
        for (index, &radius) in self.radii.iter().enumerate() {
            if (distance - radius).abs() <= BOUNDARY_TOLERANCE {
                return LayerPosition::OnBoundary(index);
            }
            if distance < radius {
                return LayerPosition::Inside(index);
            }
        }
        LayerPosition::Outside
    }

    /// The charge that drives the field at `distance`, already divided by the local
    /// dielectric constant.
    ///
    /// Zero inside conductors and on every boundary surface except the outermost one when
    /// the outermost layer is a dielectric; that surface is evaluated as part of the layer
    /// it closes. Outside the system the full declared charge acts through vacuum.
    pub fn effective_charge(&self, distance: f64) -> f64 {
        let layer = match self.locate(distance) {
            LayerPosition::Outside => return self.total_charge(),
            LayerPosition::Inside(index) => index,
            LayerPosition::OnBoundary(index) if self.is_outer_dielectric_boundary(index) => index,
            LayerPosition::OnBoundary(_) => return 0.0,
        };

        if self.materials[layer] == Material::Conductor {
            return 0.0;
        }

        let enclosed: f64 = self.surface_charges[..layer].iter().sum();
        enclosed / self.dielectrics[layer]
    }

    fn is_outer_dielectric_boundary(&self, index: usize) -> bool {
        index + 1 == self.radii.len() && self.materials[index] == Material::Dielectric
    }
}
