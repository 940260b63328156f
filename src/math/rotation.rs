//! Rotation matrices aligning one direction onto another.

use super::{try_unit, R3, R3x3, Scalar};

/// Below this `|â × b̂|` the inputs are treated as parallel or anti-parallel.
const ALIGN_EPSILON: Scalar = 1.0e-12;

/// Skew-symmetric cross-product matrix `[v]×`, so that `skew(v) * w == v.cross(&w)`.
#[must_use]
pub fn skew(v: &R3) -> R3x3 {
    R3x3::new(
        0.0, -v.z, v.y, //
        v.z, 0.0, -v.x, //
        -v.y, v.x, 0.0,
    )
}

/// Rotation matrix `R` with `R * â == b̂` (Rodrigues form).
///
/// Inputs are normalized first; a zero input yields the identity. Anti-parallel inputs get a
/// half-turn about an axis perpendicular to `a`, never a reflection.
#[must_use]
pub fn align(a: &R3, b: &R3) -> R3x3 {
    let (Some(a), Some(b)) = (try_unit(a), try_unit(b)) else {
        return R3x3::identity();
    };
    let v = a.cross(&b);
    let s = v.norm();
    let c = a.dot(&b);

    if s <= ALIGN_EPSILON {
        if c > 0.0 {
            return R3x3::identity();
        }
        let u = perpendicular(&a);
        return 2.0 * u * u.transpose() - R3x3::identity();
    }

    let vx = skew(&v);
    R3x3::identity() + vx + vx * vx * ((1.0 - c) / (s * s))
}

/// Some unit vector perpendicular to the unit vector `a`.
fn perpendicular(a: &R3) -> R3 {
    // cross with the basis axis least aligned with `a`
    let basis = if a.x.abs() <= a.y.abs() && a.x.abs() <= a.z.abs() {
        R3::x()
    } else if a.y.abs() <= a.z.abs() {
        R3::y()
    } else {
        R3::z()
    };
    a.cross(&basis).normalize()
}

/// A pair of rotations between world orientation and a local frame.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    to_local: R3x3,
    to_world: R3x3,
}

impl Frame {
    /// Frame in which the world direction `axis` becomes `reference`.
    #[must_use]
    pub fn aligning(axis: &R3, reference: &R3) -> Self {
        let to_local = align(axis, reference);
        // orthonormal, so the inverse is the transpose
        Self { to_local, to_world: to_local.transpose() }
    }

    /// Rotates a world-oriented vector into the local frame.
    #[inline]
    #[must_use]
    pub fn to_local(&self, v: &R3) -> R3 {
        self.to_local * v
    }

    /// Rotates a local vector back into world orientation.
    #[inline]
    #[must_use]
    pub fn to_world(&self, v: &R3) -> R3 {
        self.to_world * v
    }

    /// World-to-local matrix.
    #[must_use]
    pub fn rotation(&self) -> &R3x3 {
        &self.to_local
    }

    /// Local-to-world matrix.
    #[must_use]
    pub fn inverse(&self) -> &R3x3 {
        &self.to_world
    }
}
