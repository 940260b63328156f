//! Field sources ("inducers") and the capabilities they expose.
//!
//! Every source implements [`MagneticSource`]; only [`Wire`] also implements
//! [`ElectricSource`]. [`Inducer`] is the closed set of sources a [`crate::field::Field`] holds.

mod bar;
mod coil;
mod particle;
mod wire;

pub use bar::Bar;
pub use coil::{Coil, CoilSpec};
pub use particle::Particle;
pub use wire::{LineModel, Wire};

use crate::math::{R3, Scalar};

/// Produces a magnetic flux density contribution (T) at a point.
pub trait MagneticSource {
    /// Magnetic field vector at `point`; the zero vector on the source itself.
    fn bfield_at(&self, point: &R3) -> R3;
}

/// Produces an electric field contribution (V/m) at a point.
pub trait ElectricSource {
    /// Electric field vector at `point`; the zero vector on the source itself.
    fn efield_at(&self, point: &R3) -> R3;
}

/// Errors raised while constructing an inducer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InducerError {
    /// A direction-defining vector (wire span, coil normal, bar axis) has zero length.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
    /// A scalar parameter is outside its admissible range.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: Scalar,
    },
    /// A coil needs at least one turn.
    #[error("coil must have at least one loop")]
    NoLoops,
}

pub(crate) fn require_finite_vector(name: &'static str, v: &R3) -> Result<(), InducerError> {
    match v.iter().find(|c| !c.is_finite()) {
        Some(&value) => Err(InducerError::InvalidParameter { name, value }),
        None => Ok(()),
    }
}

pub(crate) fn require_finite(name: &'static str, value: Scalar) -> Result<(), InducerError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InducerError::InvalidParameter { name, value })
    }
}

/// Any field source a [`crate::field::Field`] can hold.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq)]
pub enum Inducer {
    /// Straight conductor.
    Wire(Wire),
    /// Circular loop or helical coil.
    Coil(Coil),
    /// Bar magnet.
    Bar(Bar),
    /// Point dipole.
    Particle(Particle),
}

impl Inducer {
    /// The electric capability, when this source has one.
    #[must_use]
    pub fn as_electric(&self) -> Option<&dyn ElectricSource> {
        match self {
            Self::Wire(w) => Some(w),
            Self::Coil(_) | Self::Bar(_) | Self::Particle(_) => None,
        }
    }

    /// Short lowercase name of the variant.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Wire(_) => "wire",
            Self::Coil(_) => "coil",
            Self::Bar(_) => "bar",
            Self::Particle(_) => "particle",
        }
    }
}

impl MagneticSource for Inducer {
    fn bfield_at(&self, point: &R3) -> R3 {
        match self {
            Self::Wire(w) => w.bfield_at(point),
            Self::Coil(c) => c.bfield_at(point),
            Self::Bar(b) => b.bfield_at(point),
            Self::Particle(p) => p.bfield_at(point),
        }
    }
}

impl From<Wire> for Inducer {
    fn from(w: Wire) -> Self {
        Self::Wire(w)
    }
}

impl From<Coil> for Inducer {
    fn from(c: Coil) -> Self {
        Self::Coil(c)
    }
}

impl From<Bar> for Inducer {
    fn from(b: Bar) -> Self {
        Self::Bar(b)
    }
}

impl From<Particle> for Inducer {
    fn from(p: Particle) -> Self {
        Self::Particle(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_wires_are_electric() {
        let wire: Inducer = Wire::new(R3::zeros(), R3::x(), 1.0).unwrap().into();
        let dipole: Inducer = Particle::new(R3::zeros(), R3::z()).into();
        assert!(wire.as_electric().is_some());
        assert!(dipole.as_electric().is_none());
        assert_eq!(dipole.kind_name(), "particle");
    }

    #[test]
    fn enum_dispatch_matches_variant() {
        let p = Particle::new(R3::zeros(), R3::z());
        let point = R3::new(0.3, -0.2, 1.5);
        assert_eq!(Inducer::from(p).bfield_at(&point), p.bfield_at(&point));
    }
}
