use nalgebra::{Unit, Vector3};

/// Splits `offset` into its signed component along `axis` and the remainder perpendicular to it.
#[inline]
pub fn split_along_axis(
    offset: &Vector3<f64>,
    axis: &Unit<Vector3<f64>>,
) -> (f64, Vector3<f64>) {
    let axial = offset.dot(axis.as_ref());
    (axial, offset - axis.as_ref() * axial)
}

/// Scales the unit direction of `offset` by `magnitude`, returning zero when `offset`
/// is shorter than `epsilon`.
#[inline]
pub fn radial_vector(offset: &Vector3<f64>, magnitude: f64, epsilon: f64) -> Vector3<f64> {
    let distance = offset.norm();
    if distance < epsilon {
        return Vector3::zeros();
    }
    offset * (magnitude / distance)
}
