use std::f64::consts::PI;

use crate::constants::VACUUM_PERMEABILITY;
use crate::math::elliptic::{DEFAULT_QUADRATURE_ORDER, MAX_QUADRATURE_ORDER};
use crate::math::{ellip_e_with_order, ellip_k_with_order, try_unit, Frame, R3, Scalar};

use super::{require_finite, require_finite_vector, InducerError, MagneticSource};

/// Relative (to radius²) threshold below which α², β² or ρ² count as zero.
const LOCUS_EPSILON: Scalar = 1.0e-12;

/// Builder and serialized form of a [`Coil`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoilSpec {
    /// Centre of the first turn (m).
    pub center: R3,
    /// Turn radius (m).
    pub radius: Scalar,
    /// Coil axis; need not be normalized.
    pub normal: R3,
    /// Current through every turn (A), right-handed about `normal` when positive.
    pub current: Scalar,
    /// Number of turns.
    #[cfg_attr(feature = "serde", serde(default = "default_loops"))]
    pub loops: usize,
    /// Axial advance per turn (m).
    #[cfg_attr(feature = "serde", serde(default = "default_pitch"))]
    pub pitch: Scalar,
    /// Simpson subintervals for the elliptic integrals.
    #[cfg_attr(feature = "serde", serde(default = "default_order"))]
    pub quadrature_order: usize,
}

#[cfg(feature = "serde")]
const fn default_loops() -> usize {
    1
}

#[cfg(feature = "serde")]
const fn default_pitch() -> Scalar {
    1.0
}

#[cfg(feature = "serde")]
const fn default_order() -> usize {
    DEFAULT_QUADRATURE_ORDER
}

impl CoilSpec {
    /// Single-turn coil description with unit pitch.
    #[must_use]
    pub fn new(center: R3, radius: Scalar, normal: R3, current: Scalar) -> Self {
        Self {
            center,
            radius,
            normal,
            current,
            loops: 1,
            pitch: 1.0,
            quadrature_order: DEFAULT_QUADRATURE_ORDER,
        }
    }

    /// Sets the number of turns.
    #[must_use]
    pub fn loops(mut self, loops: usize) -> Self {
        self.loops = loops;
        self
    }

    /// Sets the axial advance per turn.
    #[must_use]
    pub fn pitch(mut self, pitch: Scalar) -> Self {
        self.pitch = pitch;
        self
    }

    /// Sets the Simpson subdivision count used for K and E, at most [`MAX_QUADRATURE_ORDER`].
    #[must_use]
    pub fn quadrature_order(mut self, order: usize) -> Self {
        self.quadrature_order = order;
        self
    }

    /// Validates the description and precomputes the coil frame.
    pub fn build(self) -> Result<Coil, InducerError> {
        require_finite_vector("coil center", &self.center)?;
        require_finite_vector("coil normal", &self.normal)?;
        require_finite("coil current", self.current)?;
        require_finite("coil pitch", self.pitch)?;
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(InducerError::InvalidParameter { name: "coil radius", value: self.radius });
        }
        if self.loops == 0 {
            return Err(InducerError::NoLoops);
        }
        if self.quadrature_order > MAX_QUADRATURE_ORDER {
            return Err(InducerError::InvalidParameter {
                name: "coil quadrature order",
                value: self.quadrature_order as Scalar,
            });
        }
        let normal = try_unit(&self.normal)
            .ok_or(InducerError::DegenerateGeometry("coil normal has zero length"))?;
        Ok(Coil { frame: Frame::aligning(&normal, &R3::z()), normal, spec: self })
    }
}

/// Circular current loop, or a helix of identical loops stacked along the normal.
///
/// Each turn is evaluated in a frame where its normal is the z axis, using the closed form
/// of the off-axis loop field in terms of complete elliptic integrals, then rotated back.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CoilSpec", into = "CoilSpec"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coil {
    spec: CoilSpec,
    normal: R3,
    frame: Frame,
}

impl Coil {
    /// Single-turn coil; see [`CoilSpec`] for helices.
    pub fn new(center: R3, radius: Scalar, normal: R3, current: Scalar) -> Result<Self, InducerError> {
        CoilSpec::new(center, radius, normal, current).build()
    }

    /// Parameters the coil was built from.
    #[must_use]
    pub fn spec(&self) -> &CoilSpec {
        &self.spec
    }

    /// Unit normal.
    #[must_use]
    pub fn normal(&self) -> R3 {
        self.normal
    }

    /// Rotation between world orientation and the coil frame.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Centre of turn `index`.
    #[must_use]
    pub fn turn_center(&self, index: usize) -> R3 {
        self.spec.center + self.normal * (self.spec.pitch * index as Scalar)
    }

    /// Field of one turn at `local`, both in the coil frame with the turn centred at the origin.
    fn loop_field(&self, local: &R3) -> R3 {
        let a = self.spec.radius;
        let a_sq = a * a;
        let eps = LOCUS_EPSILON * a_sq;
        let (x, y, z) = (local.x, local.y, local.z);

        let rho_sq = x * x + y * y;
        let r_sq = rho_sq + z * z;
        let rho = rho_sq.sqrt();
        let alpha_sq = a_sq + r_sq - 2.0 * a * rho;
        let beta_sq = a_sq + r_sq + 2.0 * a * rho;
        // on the ring itself
        if alpha_sq <= eps || beta_sq <= eps {
            return R3::zeros();
        }

        let k_sq = (1.0 - alpha_sq / beta_sq).clamp(0.0, 1.0);
        let order = self.spec.quadrature_order;
        let e = ellip_e_with_order(k_sq, order);
        let k = ellip_k_with_order(k_sq, order);
        let c = VACUUM_PERMEABILITY * self.spec.current / PI;
        let denom = 2.0 * alpha_sq * beta_sq.sqrt();

        let bz = c / denom * ((a_sq - r_sq) * e + alpha_sq * k);
        if rho_sq <= eps {
            return R3::new(0.0, 0.0, bz);
        }
        let radial = c / (denom * rho_sq) * ((a_sq + r_sq) * e - alpha_sq * k);
        R3::new(radial * x * z, radial * y * z, bz)
    }
}

impl TryFrom<CoilSpec> for Coil {
    type Error = InducerError;

    fn try_from(spec: CoilSpec) -> Result<Self, Self::Error> {
        spec.build()
    }
}

impl From<Coil> for CoilSpec {
    fn from(coil: Coil) -> Self {
        coil.spec
    }
}

impl MagneticSource for Coil {
    fn bfield_at(&self, point: &R3) -> R3 {
        let local: R3 = (0..self.spec.loops)
            .map(|turn| self.loop_field(&self.frame.to_local(&(point - self.turn_center(turn)))))
            .sum();
        self.frame.to_world(&local)
    }
}
