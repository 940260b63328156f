use crate::math::{unit_or_zero, R3, Scalar};

use super::{require_finite, require_finite_vector, InducerError, MagneticSource, Particle};

/// Bar magnet modelled as two point dipoles at its ends.
///
/// Each end carries half of the moment, oriented along the axis, so far from the bar the
/// field is that of a single dipole of moment `moment · axis`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBar"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    position: R3,
    axis: R3,
    moment: Scalar,
    length: Scalar,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBar {
    position: R3,
    axis: R3,
    moment: Scalar,
    length: Scalar,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBar> for Bar {
    type Error = InducerError;

    fn try_from(raw: RawBar) -> Result<Self, Self::Error> {
        Self::new(raw.position, raw.axis, raw.moment, raw.length)
    }
}

impl Bar {
    /// Creates a bar centred on `position`, pointing (south to north) along `axis`.
    ///
    /// `moment` is the total magnetic moment in A·m² and `length` the pole separation in meters.
    pub fn new(position: R3, axis: R3, moment: Scalar, length: Scalar) -> Result<Self, InducerError> {
        require_finite_vector("bar position", &position)?;
        require_finite_vector("bar axis", &axis)?;
        require_finite("bar moment", moment)?;
        require_finite("bar length", length)?;
        if length < 0.0 {
            return Err(InducerError::InvalidParameter { name: "bar length", value: length });
        }
        let axis = unit_or_zero(&axis);
        if axis == R3::zeros() {
            return Err(InducerError::DegenerateGeometry("bar axis has zero length"));
        }
        Ok(Self { position, axis, moment, length })
    }

    /// Centre of the bar.
    #[must_use]
    pub fn position(&self) -> R3 {
        self.position
    }

    /// Unit axis, south pole to north pole.
    #[must_use]
    pub fn axis(&self) -> R3 {
        self.axis
    }

    /// Total magnetic moment (A·m²).
    #[must_use]
    pub fn moment(&self) -> Scalar {
        self.moment
    }

    /// Pole separation (m).
    #[must_use]
    pub fn length(&self) -> Scalar {
        self.length
    }

    /// The two end dipoles, north end first.
    #[must_use]
    pub fn poles(&self) -> [Particle; 2] {
        let offset = self.axis * (self.length / 2.0);
        let m = self.axis * (self.moment / 2.0);
        [
            Particle::new(self.position + offset, m),
            Particle::new(self.position - offset, m),
        ]
    }
}

impl MagneticSource for Bar {
    fn bfield_at(&self, point: &R3) -> R3 {
        self.poles().iter().map(|p| p.bfield_at(point)).sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn rejects_zero_axis() {
        assert_eq!(
            Bar::new(R3::zeros(), R3::zeros(), 1.0, 1.0),
            Err(InducerError::DegenerateGeometry("bar axis has zero length"))
        );
        assert!(Bar::new(R3::zeros(), R3::z(), 1.0, -1.0).is_err());
    }

    #[test]
    fn poles_sit_at_the_ends() {
        let bar = Bar::new(R3::new(10.0, 0.0, 0.0), R3::new(0.0, 0.0, 4.0), 1.0, 10.0).unwrap();
        let [north, south] = bar.poles();
        assert_eq!(north.position, R3::new(10.0, 0.0, 5.0));
        assert_eq!(south.position, R3::new(10.0, 0.0, -5.0));
        assert_eq!(north.moment, R3::new(0.0, 0.0, 0.5));
        assert_eq!(south.moment, north.moment);
    }

    #[test]
    fn far_field_converges_to_single_dipole() {
        let bar = Bar::new(R3::zeros(), R3::z(), 2.0, 1.0).unwrap();
        let dipole = Particle::new(R3::zeros(), R3::new(0.0, 0.0, 2.0));
        let dir = R3::new(1.0, 0.5, 2.0).normalize();
        let mut last = Scalar::INFINITY;
        for r in [5.0, 20.0, 80.0] {
            let p = dir * r;
            let err = (bar.bfield_at(&p) - dipole.bfield_at(&p)).norm() / dipole.bfield_at(&p).norm();
            assert!(err < last);
            last = err;
        }
        assert!(last < 1.0e-3);
    }

    #[test]
    fn zero_length_bar_is_a_dipole() {
        let bar = Bar::new(R3::zeros(), R3::x(), 1.0, 0.0).unwrap();
        let dipole = Particle::new(R3::zeros(), R3::x());
        let p = R3::new(0.4, 1.0, -0.3);
        let (b, d) = (bar.bfield_at(&p), dipole.bfield_at(&p));
        for i in 0..3 {
            assert_relative_eq!(b[i], d[i], max_relative = 1.0e-12);
        }
    }
}
