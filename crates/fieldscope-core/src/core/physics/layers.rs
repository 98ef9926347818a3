use crate::core::models::shell::Material;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayerError {
    #[error("Layer array '{field}' has {found} entries but {expected} radii were given")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Radius at layer {index} is not positive: {value}")]
    NonPositiveRadius { index: usize, value: f64 },
    #[error("Radii must be strictly increasing: layer {index} has radius {current} after {previous}")]
    NonIncreasingRadii {
        index: usize,
        previous: f64,
        current: f64,
    },
    #[error("Non-finite {what} at layer {index}")]
    NonFiniteValue { what: &'static str, index: usize },
    #[error("Dielectric constant at layer {index} must be positive, got {value}")]
    NonPositiveDielectric { index: usize, value: f64 },
}

/// How a layer relates to the one directly outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// Dielectric layer wrapped by a conductor; the conductor's inner surface is induced here.
    DielectricToConductor,
    /// Conductor wrapped by another conductor; charge keeps migrating outward.
    ConductorToConductor,
    /// Outermost surface of a conductor run (next layer is dielectric, or there is none).
    ConductorClosing,
    /// Dielectric wrapped by dielectric, or the outermost dielectric.
    DielectricPassThrough,
}

impl Boundary {
    pub(crate) fn classify(current: Material, next: Option<Material>) -> Self {
        match (current, next) {
            (Material::Dielectric, Some(Material::Conductor)) => Self::DielectricToConductor,
            (Material::Conductor, Some(Material::Conductor)) => Self::ConductorToConductor,
            (Material::Conductor, _) => Self::ConductorClosing,
            (Material::Dielectric, _) => Self::DielectricPassThrough,
        }
    }
}

/// Run state carried from one layer boundary to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum RunState {
    Idle {
        /// Induced charge on the inner surface of the conductor about to start.
        cancel_charge: f64,
    },
    InConductorRun {
        /// Declared charge of every conductor already folded into the run.
        accumulated: f64,
        /// Cancel charge in effect when the run was entered.
        entry_cancel: f64,
    },
}

impl Default for RunState {
    fn default() -> Self {
        Self::Idle { cancel_charge: 0.0 }
    }
}

impl RunState {
    /// Returns the surface charge at the current boundary and the next state.
    ///
    /// `enclosed` is the net surface charge of every boundary strictly inside this one;
    /// `previous_surface` is the surface charge computed for the layer just inside
    /// (zero for the innermost layer).
    pub(crate) fn advance(
        self,
        boundary: Boundary,
        declared: f64,
        enclosed: f64,
        previous_surface: f64,
    ) -> (f64, RunState) {
        match (boundary, self) {
            (Boundary::DielectricToConductor, _) => {
                let induced = -enclosed;
                (
                    induced,
                    RunState::Idle {
                        cancel_charge: induced,
                    },
                )
            }
            (Boundary::ConductorToConductor, RunState::Idle { cancel_charge }) => (
                0.0,
                RunState::InConductorRun {
                    accumulated: declared,
                    entry_cancel: cancel_charge,
                },
            ),
            (
                Boundary::ConductorToConductor,
                RunState::InConductorRun {
                    accumulated,
                    entry_cancel,
                },
            ) => (
                0.0,
                RunState::InConductorRun {
                    accumulated: accumulated + declared,
                    entry_cancel,
                },
            ),
            (
                Boundary::ConductorClosing,
                RunState::InConductorRun {
                    accumulated,
                    entry_cancel,
                },
            ) => (declared + accumulated - entry_cancel, RunState::default()),
            (Boundary::ConductorClosing, RunState::Idle { .. }) => {
                (declared - previous_surface, RunState::default())
            }
            (Boundary::DielectricPassThrough, state) => (0.0, state),
        }
    }
}

/// Validates the parallel layer arrays shared by every shell system.
pub fn validate_layers(
    radii: &[f64],
    charges: &[f64],
    materials: &[Material],
) -> Result<(), LayerError> {
    let expected = radii.len();
    if charges.len() != expected {
        return Err(LayerError::LengthMismatch {
            field: "charges",
            expected,
            found: charges.len(),
        });
    }
    if materials.len() != expected {
        return Err(LayerError::LengthMismatch {
            field: "materials",
            expected,
            found: materials.len(),
        });
    }

    for (index, (&radius, &charge)) in radii.iter().zip(charges).enumerate() {
        if !radius.is_finite() {
            return Err(LayerError::NonFiniteValue {
                what: "radius",
                index,
            });
        }
        if !charge.is_finite() {
            return Err(LayerError::NonFiniteValue {
                what: "charge",
                index,
            });
        }
        if radius <= 0.0 {
            return Err(LayerError::NonPositiveRadius {
                index,
                value: radius,
            });
        }
        if index > 0 && radius <= radii[index - 1] {
            return Err(LayerError::NonIncreasingRadii {
                index,
                previous: radii[index - 1],
                current: radius,
            });
        }
    }
    Ok(())
}

/// Computes the net charge sitting on each interface of a layered shell system.
///
/// Layer `i` spans from `radii[i - 1]` (or the center) out to `radii[i]`, and the
/// returned value at `i` is the charge on the surface at `radii[i]`. Conductors push
/// their declared charge to the outer surface of the conductor run they belong to and
/// induce a cancelling charge on their inner surface; dielectrics pass enclosed charge
/// through untouched.
///
/// # Errors
///
/// Returns [`LayerError`] when the arrays differ in length, radii are not positive and
/// strictly increasing, or any value is not finite.
pub fn solve_surface_charges(
    radii: &[f64],
    charges: &[f64],
    materials: &[Material],
) -> Result<Vec<f64>, LayerError> {
    validate_layers(radii, charges, materials)?;

    let mut surfaces = Vec::with_capacity(radii.len());
    let mut state = RunState::default();
    let mut enclosed = 0.0;

    for (index, (&material, &declared)) in materials.iter().zip(charges).enumerate() {
        let boundary = Boundary::classify(material, materials.get(index + 1).copied());
        let previous_surface = surfaces.last().copied().unwrap_or(0.0);

        let (surface, next_state) = state.advance(boundary, declared, enclosed, previous_surface);
        trace!(index, ?boundary, surface, ?next_state, "Layer boundary resolved.");

        enclosed += surface;
        surfaces.push(surface);
        state = next_state;
    }

    Ok(surfaces)
}
