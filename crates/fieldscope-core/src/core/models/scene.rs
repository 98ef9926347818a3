use super::domain::{DomainError, SamplingDomain};
use super::shell::{Material, ShellSystem};
use super::source::{
    ChargeSource, ChargedSphere, CylindricalShells, FiniteWire, InfinitePlane, InfiniteWire,
    PointCharge, SphericalShells,
};
use crate::core::physics::layers::LayerError;
use nalgebra::{Point3, Unit, Vector3};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Unknown scene object type '{0}'")]
    UnknownType(String),
    #[error("Object of type '{kind}' is missing required property '{property}'")]
    MissingProperty {
        kind: String,
        property: &'static str,
    },
    #[error("Invalid value for property '{property}': {reason}")]
    InvalidProperty {
        property: &'static str,
        reason: String,
    },
    #[error("Invalid layer configuration: {0}")]
    Layers(#[from] LayerError),
}

#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Descriptor type tags understood by the scene loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectTag {
    Charge,
    Wire,
    Plane,
    Sphere,
    ConcentricSpheres,
    ConcentricCylinders,
}

static OBJECT_TAGS: phf::Map<&'static str, ObjectTag> = phf::phf_map! {
    "charge" => ObjectTag::Charge,
    "point-charge" => ObjectTag::Charge,
    "wire" => ObjectTag::Wire,
    "plane" => ObjectTag::Plane,
    "sphere" => ObjectTag::Sphere,
    "concentric-spheres" => ObjectTag::ConcentricSpheres,
    "concentric-cylinders" => ObjectTag::ConcentricCylinders,
};

/// The free-form property bag attached to a scene object.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PropertyBag {
    pub position: Option<[f64; 3]>,
    pub charge: Option<f64>,
    pub charge_density: Option<f64>,
    pub radius: Option<f64>,
    pub radii: Option<Vec<f64>>,
    pub materials: Option<Vec<String>>,
    pub dielectrics: Option<Vec<f64>>,
    pub charges: Option<Vec<f64>>,
    pub direction: Option<[f64; 3]>,
    pub length: Option<f64>,
    pub hollow: Option<bool>,
    pub infinite: Option<bool>,
}

/// One object handed over by the scene collaborator: a type tag plus its properties.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SceneObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub properties: PropertyBag,
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ResolutionSpec {
    Uniform(usize),
    PerAxis([usize; 3]),
}

impl ResolutionSpec {
    pub fn per_axis(&self) -> [usize; 3] {
        match *self {
            ResolutionSpec::Uniform(n) => [n; 3],
            ResolutionSpec::PerAxis(axes) => axes,
        }
    }
}

/// Sampling-domain descriptor as it appears in a scene file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum DomainDescriptor {
    Grid {
        min: [f64; 3],
        max: [f64; 3],
        resolution: ResolutionSpec,
    },
    Points {
        points: Vec<[f64; 3]>,
    },
}

impl DomainDescriptor {
    pub fn to_domain(&self) -> Result<SamplingDomain, DomainError> {
        match self {
            DomainDescriptor::Grid {
                min,
                max,
                resolution,
            } => SamplingDomain::grid(
                Point3::from(*min),
                Point3::from(*max),
                resolution.per_axis(),
            ),
            DomainDescriptor::Points { points } => {
                SamplingDomain::points(points.iter().copied().map(Point3::from).collect())
            }
        }
    }
}

/// Everything the scene collaborator hands to the engine for one sampling pass.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    pub domain: Option<DomainDescriptor>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self, SceneLoadError> {
        debug!("Loading scene from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| SceneLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| SceneLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Converts every active object into a [`ChargeSource`], keeping its index in the scene.
    ///
    /// # Errors
    ///
    /// Returns the index of the first object that fails conversion together with the cause.
    pub fn active_sources(&self) -> Result<Vec<(usize, ChargeSource)>, (usize, SourceError)> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, object)| object.active)
            .map(|(index, object)| {
                ChargeSource::try_from(object)
                    .map(|source| (index, source))
                    .map_err(|e| (index, e))
            })
            .collect()
    }
}

impl TryFrom<&SceneObject> for ChargeSource {
    type Error = SourceError;

    fn try_from(object: &SceneObject) -> Result<Self, Self::Error> {
        let tag = OBJECT_TAGS
            .get(object.kind.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| SourceError::UnknownType(object.kind.clone()))?;
        let props = PropertyReader {
            kind: &object.kind,
            bag: &object.properties,
        };
        let position = props.position()?;

        let source = match tag {
            ObjectTag::Charge => ChargeSource::Point(PointCharge {
                position,
                charge: props.charge()?,
            }),
            ObjectTag::Wire if props.bag.infinite.unwrap_or(false) => {
                ChargeSource::InfiniteWire(InfiniteWire {
                    position,
                    direction: props.direction(Vector3::y())?,
                    charge_density: props.charge_density()?,
                })
            }
            ObjectTag::Wire => ChargeSource::FiniteWire(FiniteWire {
                position,
                direction: props.direction(Vector3::y())?,
                charge_density: props.charge_density()?,
                length: props.positive(props.required(props.bag.length, "length")?, "length")?,
                radius: props.non_negative(props.bag.radius.unwrap_or(0.0), "radius")?,
            }),
            ObjectTag::Plane => ChargeSource::Plane(InfinitePlane {
                position,
                normal: props.direction(Vector3::z())?,
                charge_density: props.charge_density()?,
            }),
            ObjectTag::Sphere => ChargeSource::Sphere(ChargedSphere {
                center: position,
                radius: props.positive(props.required(props.bag.radius, "radius")?, "radius")?,
                charge: props.charge()?,
                hollow: props.bag.hollow.unwrap_or(false),
            }),
            ObjectTag::ConcentricSpheres => ChargeSource::SphericalShells(SphericalShells {
                center: position,
                system: props.shell_system()?,
            }),
            ObjectTag::ConcentricCylinders => ChargeSource::CylindricalShells(CylindricalShells {
                center: position,
                axis: props.direction(Vector3::y())?,
                system: props.shell_system()?,
            }),
        };

        debug!(kind = %source.kind(), "Converted scene object into charge source.");
        Ok(source)
    }
}

struct PropertyReader<'a> {
    kind: &'a str,
    bag: &'a PropertyBag,
}

impl PropertyReader<'_> {
    fn required<T>(&self, value: Option<T>, property: &'static str) -> Result<T, SourceError> {
        value.ok_or_else(|| SourceError::MissingProperty {
            kind: self.kind.to_string(),
            property,
        })
    }

    fn charge(&self) -> Result<f64, SourceError> {
        self.finite(self.required(self.bag.charge, "charge")?, "charge")
    }

    fn charge_density(&self) -> Result<f64, SourceError> {
        self.finite(
            self.required(self.bag.charge_density, "charge-density")?,
            "charge-density",
        )
    }

    fn position(&self) -> Result<Point3<f64>, SourceError> {
        let position = self.bag.position.unwrap_or([0.0; 3]);
        for coordinate in position {
            self.finite(coordinate, "position")?;
        }
        Ok(Point3::from(position))
    }

    fn direction(&self, fallback: Vector3<f64>) -> Result<Unit<Vector3<f64>>, SourceError> {
        let raw = self.bag.direction.map(Vector3::from).unwrap_or(fallback);
        for &component in raw.iter() {
            self.finite(component, "direction")?;
        }
        Unit::try_new(raw, f64::EPSILON).ok_or_else(|| SourceError::InvalidProperty {
            property: "direction",
            reason: "direction vector must be non-zero".to_string(),
        })
    }

    fn finite(&self, value: f64, property: &'static str) -> Result<f64, SourceError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(SourceError::InvalidProperty {
                property,
                reason: format!("expected a finite number, got {value}"),
            })
        }
    }

    fn positive(&self, value: f64, property: &'static str) -> Result<f64, SourceError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(SourceError::InvalidProperty {
                property,
                reason: format!("expected a positive number, got {value}"),
            })
        }
    }

    fn non_negative(&self, value: f64, property: &'static str) -> Result<f64, SourceError> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(SourceError::InvalidProperty {
                property,
                reason: format!("expected a non-negative number, got {value}"),
            })
        }
    }

    fn shell_system(&self) -> Result<ShellSystem, SourceError> {
        let radii = self.required(self.bag.radii.clone(), "radii")?;
        let materials = self
            .required(self.bag.materials.as_ref(), "materials")?
            .iter()
            .map(|tag| {
                tag.parse::<Material>()
                    .map_err(|reason| SourceError::InvalidProperty {
                        property: "materials",
                        reason,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let dielectrics = self
            .bag
            .dielectrics
            .clone()
            .unwrap_or_else(|| vec![1.0; radii.len()]);
        let charges = self
            .bag
            .charges
            .clone()
            .unwrap_or_else(|| vec![0.0; radii.len()]);

        Ok(ShellSystem::new(radii, materials, dielectrics, charges)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::source::SourceKind;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn object(kind: &str, properties: PropertyBag) -> SceneObject {
        SceneObject {
            kind: kind.to_string(),
            active: true,
            properties,
        }
    }

    #[test]
    fn charge_descriptor_converts_to_point_source() {
        let source = ChargeSource::try_from(&object(
            "charge",
            PropertyBag {
                position: Some([1.0, 2.0, 3.0]),
                charge: Some(1e-9),
                ..Default::default()
            },
        ))
        .unwrap();

        assert_eq!(
            source,
            ChargeSource::Point(PointCharge {
                position: Point3::new(1.0, 2.0, 3.0),
                charge: 1e-9
            })
        );
    }

    #[test]
    fn wire_infinite_flag_selects_evaluator_family() {
        let mut props = PropertyBag {
            charge_density: Some(1.0),
            length: Some(2.0),
            ..Default::default()
        };
        let finite = ChargeSource::try_from(&object("wire", props.clone())).unwrap();
        props.infinite = Some(true);
        let infinite = ChargeSource::try_from(&object("wire", props)).unwrap();

        assert_eq!(finite.kind(), SourceKind::FiniteWire);
        assert_eq!(infinite.kind(), SourceKind::InfiniteWire);
    }

    #[test]
    fn missing_required_property_is_reported() {
        let err = ChargeSource::try_from(&object("sphere", PropertyBag::default())).unwrap_err();
        assert!(matches!(
            err,
            SourceError::MissingProperty {
                property: "radius",
                ..
            }
        ));
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let err = ChargeSource::try_from(&object("magnet", PropertyBag::default())).unwrap_err();
        assert!(matches!(err, SourceError::UnknownType(tag) if tag == "magnet"));
    }

    #[test]
    fn zero_direction_is_rejected() {
        let err = ChargeSource::try_from(&object(
            "plane",
            PropertyBag {
                charge_density: Some(1.0),
                direction: Some([0.0, 0.0, 0.0]),
                ..Default::default()
            },
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidProperty {
                property: "direction",
                ..
            }
        ));
    }

    #[test]
    fn non_finite_charge_is_rejected() {
        let err = ChargeSource::try_from(&object(
            "charge",
            PropertyBag {
                charge: Some(f64::NAN),
                ..Default::default()
            },
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidProperty {
                property: "charge",
                ..
            }
        ));
    }

    #[test]
    fn non_finite_geometry_is_rejected() {
        let wire = |position: [f64; 3], direction: [f64; 3]| {
            ChargeSource::try_from(&object(
                "wire",
                PropertyBag {
                    infinite: Some(true),
                    charge_density: Some(1.0),
                    position: Some(position),
                    direction: Some(direction),
                    ..Default::default()
                },
            ))
        };

        assert!(matches!(
            wire([0.0, f64::INFINITY, 0.0], [0.0, 1.0, 0.0]),
            Err(SourceError::InvalidProperty {
                property: "position",
                ..
            })
        ));
        assert!(matches!(
            wire([0.0, 0.0, 0.0], [f64::NAN, 1.0, 0.0]),
            Err(SourceError::InvalidProperty {
                property: "direction",
                ..
            })
        ));
    }

    #[test]
    fn shell_descriptor_defaults_dielectrics_and_validates_layers() {
        let source = ChargeSource::try_from(&object(
            "concentric-spheres",
            PropertyBag {
                radii: Some(vec![1.0, 2.0]),
                materials: Some(vec!["conductor".into(), "conductor".into()]),
                charges: Some(vec![3.0, 4.0]),
                ..Default::default()
            },
        ))
        .unwrap();
        let system = source.shell_system().unwrap();
        assert_eq!(system.dielectrics(), &[1.0, 1.0]);
        assert_eq!(system.surface_charges(), &[0.0, 7.0]);

        let err = ChargeSource::try_from(&object(
            "concentric-cylinders",
            PropertyBag {
                radii: Some(vec![2.0, 1.0]),
                materials: Some(vec!["dielectric".into(), "conductor".into()]),
                ..Default::default()
            },
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            SourceError::Layers(LayerError::NonIncreasingRadii { .. })
        ));
    }

    #[test]
    fn unknown_material_tag_is_rejected() {
        let err = ChargeSource::try_from(&object(
            "concentric-spheres",
            PropertyBag {
                radii: Some(vec![1.0]),
                materials: Some(vec!["rubber".into()]),
                ..Default::default()
            },
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidProperty {
                property: "materials",
                ..
            }
        ));
    }

    #[test]
    fn active_sources_skips_inactive_objects_and_keeps_indices() {
        let mut hidden = object(
            "charge",
            PropertyBag {
                charge: Some(1.0),
                ..Default::default()
            },
        );
        hidden.active = false;
        let visible = object(
            "charge",
            PropertyBag {
                charge: Some(-1.0),
                ..Default::default()
            },
        );
        let scene = Scene {
            objects: vec![hidden, visible],
            domain: None,
        };

        let sources = scene.active_sources().unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].0, 1);
    }

    #[test]
    fn load_parses_objects_and_grid_domain() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("scene.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(
            file,
            r#"
            [domain]
            type = "grid"
            min = [-1.0, -1.0, 0.0]
            max = [1.0, 1.0, 0.0]
            resolution = [5, 5, 1]

            [[objects]]
            type = "charge"
            [objects.properties]
            position = [0.0, 0.0, 0.0]
            charge = 1e-9

            [[objects]]
            type = "plane"
            active = false
            [objects.properties]
            charge-density = 1e-12
            "#
        )
        .unwrap();

        let scene = Scene::load(&file_path).unwrap();
        assert_eq!(scene.objects.len(), 2);
        assert!(!scene.objects[1].active);

        let domain = scene.domain.unwrap().to_domain().unwrap();
        assert_eq!(domain.len(), 25);
    }

    #[test]
    fn load_parses_point_list_domain() {
        let scene: Scene = toml::from_str(
            r#"
            [domain]
            type = "points"
            points = [[0.0, 0.0, 1.0], [0.0, 0.0, 2.0]]
            "#,
        )
        .unwrap();
        assert_eq!(scene.domain.unwrap().to_domain().unwrap().len(), 2);
        assert!(scene.objects.is_empty());
    }

    #[test]
    fn nan_charge_in_scene_file_fails_conversion() {
        let scene: Scene = toml::from_str(
            r#"
            [[objects]]
            type = "charge"
            [objects.properties]
            charge = nan
            "#,
        )
        .unwrap();

        let (index, err) = scene.active_sources().unwrap_err();
        assert_eq!(index, 0);
        assert!(matches!(
            err,
            SourceError::InvalidProperty {
                property: "charge",
                ..
            }
        ));
    }

    #[test]
    fn uniform_resolution_expands_to_every_axis() {
        assert_eq!(ResolutionSpec::Uniform(4).per_axis(), [4, 4, 4]);
    }

    #[test]
    fn load_reports_unknown_property_keys() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.toml");
        std::fs::write(
            &file_path,
            "[[objects]]\ntype = \"charge\"\n[objects.properties]\nmass = 1.0\n",
        )
        .unwrap();

        let err = Scene::load(&file_path).unwrap_err();
        assert!(matches!(err, SceneLoadError::Toml { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Scene::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, SceneLoadError::Io { .. }));
    }
}
