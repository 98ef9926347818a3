use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Grid bound on axis {axis} is not finite")]
    NonFiniteBound { axis: usize },
    #[error("Grid minimum exceeds maximum on axis {axis}: {min} > {max}")]
    InvertedBounds { axis: usize, min: f64, max: f64 },
    #[error("Sample point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
    #[error("Grid resolution {resolution:?} yields more positions than can be addressed")]
    TooManyPositions { resolution: [usize; 3] },
}

/// An axis-aligned box sampled on a regular lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    min: Point3<f64>,
    max: Point3<f64>,
    resolution: [usize; 3],
}

impl GridSpec {
    /// Creates a grid with `resolution[axis]` evenly spaced samples per axis, bounds included.
    ///
    /// An axis with a single sample is sampled at the midpoint of its range; an axis with
    /// zero samples makes the grid empty. The total position count must fit in `usize`.
    pub fn new(
        min: Point3<f64>,
        max: Point3<f64>,
        resolution: [usize; 3],
    ) -> Result<Self, DomainError> {
        for axis in 0..3 {
            if !min[axis].is_finite() || !max[axis].is_finite() {
                return Err(DomainError::NonFiniteBound { axis });
            }
            if min[axis] > max[axis] {
                return Err(DomainError::InvertedBounds {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        if resolution
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .is_none()
        {
            return Err(DomainError::TooManyPositions { resolution });
        }
        Ok(Self {
            min,
            max,
            resolution,
        })
    }

    pub fn min(&self) -> &Point3<f64> {
        &self.min
    }

    pub fn max(&self) -> &Point3<f64> {
        &self.max
    }

    pub fn resolution(&self) -> [usize; 3] {
        self.resolution
    }

    pub fn len(&self) -> usize {
        self.resolution.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn coordinate(&self, axis: usize, step: usize) -> f64 {
        let n = self.resolution[axis];
        let (lo, hi) = (self.min[axis], self.max[axis]);
        if n <= 1 {
            0.5 * (lo + hi)
        } else {
            lo + (hi - lo) * step as f64 / (n - 1) as f64
        }
    }

    /// Lattice points with x varying fastest, then y, then z.
    pub fn points(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        let [nx, ny, nz] = self.resolution;
        (0..nz).flat_map(move |k| {
            (0..ny).flat_map(move |j| {
                (0..nx).map(move |i| {
                    Point3::new(
                        self.coordinate(0, i),
                        self.coordinate(1, j),
                        self.coordinate(2, k),
                    )
                })
            })
        })
    }
}

/// The set of positions a sampling pass evaluates.
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingDomain {
    Grid(GridSpec),
    Points(Vec<Point3<f64>>),
}

impl SamplingDomain {
    pub fn grid(
        min: Point3<f64>,
        max: Point3<f64>,
        resolution: [usize; 3],
    ) -> Result<Self, DomainError> {
        GridSpec::new(min, max, resolution).map(SamplingDomain::Grid)
    }

    pub fn points(points: Vec<Point3<f64>>) -> Result<Self, DomainError> {
        if let Some(index) = points
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(DomainError::NonFinitePoint { index });
        }
        Ok(SamplingDomain::Points(points))
    }

    pub fn len(&self) -> usize {
        match self {
            SamplingDomain::Grid(grid) => grid.len(),
            SamplingDomain::Points(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materializes every sample position in domain order.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        match self {
            SamplingDomain::Grid(grid) => grid.points().collect(),
            SamplingDomain::Points(points) => points.clone(),
        }
    }
}
