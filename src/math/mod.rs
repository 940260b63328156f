//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{Matrix3, Vector3};

pub mod elliptic;
pub mod rotation;

pub use elliptic::{
    ellip_e, ellip_e_with_order, ellip_k, ellip_k_with_order, simpson, MAX_QUADRATURE_ORDER,
};
pub use rotation::{align, skew, Frame};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;
/// Convenient alias for three-by-three real matrices.
pub type R3x3 = Matrix3<Scalar>;

/// Distances (and squared distances) at or below this value are treated as coincident points.
pub const DEGENERATE_DISTANCE: Scalar = 1.0e-12;

/// Returns `v / |v|`, or `None` when `|v|` is at or below [`DEGENERATE_DISTANCE`].
#[inline]
#[must_use]
pub fn try_unit(v: &R3) -> Option<R3> {
    let n = v.norm();
    if n <= DEGENERATE_DISTANCE || !n.is_finite() {
        None
    } else {
        Some(v / n)
    }
}

/// Returns the unit vector along `v`, or the zero vector when `v` has no direction.
#[inline]
#[must_use]
pub fn unit_or_zero(v: &R3) -> R3 {
    try_unit(v).unwrap_or_else(R3::zeros)
}

/// Replaces a vector with any NaN or infinite component by the zero vector.
#[inline]
#[must_use]
pub fn finite_or_zero(v: R3) -> R3 {
    if v.iter().all(|c| c.is_finite()) {
        v
    } else {
        R3::zeros()
    }
}

/// Hashable, bit-exact key for a point.
///
/// `-0.0` is folded onto `0.0` so both spellings of the origin share one entry.
#[inline]
#[must_use]
pub fn point_key(p: &R3) -> [u64; 3] {
    let bits = |c: Scalar| if c == 0.0 { 0.0_f64.to_bits() } else { c.to_bits() };
    [bits(p.x), bits(p.y), bits(p.z)]
}
