pub mod bezier_2d;
pub mod intersect_2d;

/// 2D point type. Ground-plane points map `(x, z)` onto `(x, y)`.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type (Y up).
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Up direction of the scene (Y+).
pub const UP: Vector3 = Vector3::new(0.0, 1.0, 0.0);

/// Projects a 3D scene point onto the ground plane.
#[must_use]
pub fn ground(p: &Point3) -> Point2 {
    Point2::new(p.x, p.z)
}

/// Normalizes `v`, returning the zero vector for (near) zero-length input
/// instead of NaN components.
#[must_use]
pub fn normalize_or_zero(v: Vector3) -> Vector3 {
    let len = v.norm();
    if len < TOLERANCE {
        Vector3::zeros()
    } else {
        v / len
    }
}
