/// Vacuum permittivity ε0 in F/m.
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;

/// Coulomb constant k = 1 / (4π ε0) in N·m²/C².
pub const COULOMB_CONSTANT: f64 = 8.987_551_792_3e9;

/// Distances below this are treated as degenerate (on a charge, axis or plane).
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// Tolerance for deciding that a radial distance sits on a shell boundary.
pub const BOUNDARY_TOLERANCE: f64 = 1e-9;
