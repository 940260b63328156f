use crate::constants::{line_charge_coeff, MU0_OVER_2PI, MU0_OVER_4PI};
use crate::math::{R3, Scalar, DEGENERATE_DISTANCE};

use super::{require_finite, require_finite_vector, ElectricSource, InducerError, MagneticSource};

/// How a [`Wire`] evaluates its magnetic field.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineModel {
    /// Treat the wire as the infinite line through its endpoints: `|B| = μ₀I / 2πd`.
    #[default]
    Infinite,
    /// Biot–Savart integral over the segment between the endpoints only.
    Finite,
}

/// Straight wire between two points.
///
/// Positive current flows from `start` to `end`. The same geometry doubles as a uniformly
/// charged rod for [`ElectricSource`], in which case `current` is read as the rod's total
/// charge in coulombs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawWire"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wire {
    start: R3,
    end: R3,
    current: Scalar,
    model: LineModel,
}

/// Unvalidated serialized form of a [`Wire`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawWire {
    start: R3,
    end: R3,
    current: Scalar,
    #[serde(default)]
    model: LineModel,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWire> for Wire {
    type Error = InducerError;

    fn try_from(raw: RawWire) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.start, raw.end, raw.current)?.with_model(raw.model))
    }
}

/// Decomposition of a point relative to the wire's line.
struct LineOffset {
    /// Signed distance along the axis from `start` to the foot of the perpendicular.
    along: Scalar,
    /// Perpendicular distance from the line.
    distance: Scalar,
    /// Unit vector from the line towards the point.
    radial: R3,
}

impl Wire {
    /// Creates an infinite-line wire from `start` to `end` carrying `current` amperes.
    pub fn new(start: R3, end: R3, current: Scalar) -> Result<Self, InducerError> {
        require_finite_vector("wire start", &start)?;
        require_finite_vector("wire end", &end)?;
        require_finite("wire current", current)?;
        if (end - start).norm() <= DEGENERATE_DISTANCE {
            return Err(InducerError::DegenerateGeometry("wire endpoints coincide"));
        }
        Ok(Self { start, end, current, model: LineModel::Infinite })
    }

    /// Switches the magnetic field model.
    #[must_use]
    pub fn with_model(mut self, model: LineModel) -> Self {
        self.model = model;
        self
    }

    /// Start point; current flows away from here when positive.
    #[must_use]
    pub fn start(&self) -> R3 {
        self.start
    }

    /// End point.
    #[must_use]
    pub fn end(&self) -> R3 {
        self.end
    }

    /// Signed current in amperes (or charge in coulombs for the electric field).
    #[must_use]
    pub fn current(&self) -> Scalar {
        self.current
    }

    /// Active magnetic field model.
    #[must_use]
    pub fn model(&self) -> LineModel {
        self.model
    }

    /// Distance between the endpoints.
    #[must_use]
    pub fn length(&self) -> Scalar {
        (self.end - self.start).norm()
    }

    /// Unit vector from `start` to `end`.
    #[must_use]
    pub fn direction(&self) -> R3 {
        (self.end - self.start) / self.length()
    }

    /// Projects `point` onto the wire's line; `None` when the point lies on it.
    fn offset(&self, point: &R3) -> Option<LineOffset> {
        let axis = self.direction();
        let along = (point - self.start).dot(&axis);
        let foot = self.start + axis * along;
        let r_vec = point - foot;
        let distance = r_vec.norm();
        if distance <= DEGENERATE_DISTANCE {
            return None;
        }
        Some(LineOffset { along, distance, radial: r_vec / distance })
    }
}

impl MagneticSource for Wire {
    fn bfield_at(&self, point: &R3) -> R3 {
        let Some(LineOffset { along, distance: d, radial }) = self.offset(point) else {
            return R3::zeros();
        };
        let magnitude = match self.model {
            LineModel::Infinite => MU0_OVER_2PI * self.current / d,
            LineModel::Finite => {
                // cos of the angles subtended at the point by each end
                let to_end = self.length() - along;
                let cos_start = along / along.hypot(d);
                let cos_end = to_end / to_end.hypot(d);
                MU0_OVER_4PI * self.current / d * (cos_start + cos_end)
            }
        };
        self.direction().cross(&radial) * magnitude
    }
}

impl ElectricSource for Wire {
    /// Line charge field `Q / (2πε₀ L d)`, pointing away from the rod for positive charge.
    fn efield_at(&self, point: &R3) -> R3 {
        let Some(LineOffset { distance: d, radial, .. }) = self.offset(point) else {
            return R3::zeros();
        };
        radial * (line_charge_coeff() * self.current / (self.length() * d))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::{VACUUM_PERMEABILITY, VACUUM_PERMITTIVITY};

    fn z_wire(current: Scalar) -> Wire {
        Wire::new(R3::new(0.0, 0.0, -5.0), R3::new(0.0, 0.0, 5.0), current).unwrap()
    }

    #[test]
    fn infinite_model_matches_closed_form() {
        let w = z_wire(3.0);
        let d = 2.0;
        let b = w.bfield_at(&R3::new(d, 0.0, 1.0));
        assert_relative_eq!(b.norm(), VACUUM_PERMEABILITY * 3.0 / (2.0 * PI * d), max_relative = 1.0e-12);
        // right-hand rule: +z current, point on +x, field along +y
        assert_relative_eq!(b.y / b.norm(), 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(b.dot(&w.direction()), 0.0, epsilon = 1.0e-18);
    }

    #[test]
    fn reversed_current_flips_field() {
        let p = R3::new(-1.0, 2.0, 0.5);
        assert_eq!(z_wire(-1.0).bfield_at(&p), -z_wire(1.0).bfield_at(&p));
    }

    #[test]
    fn field_on_axis_is_zero() {
        let w = z_wire(1.0);
        assert_eq!(w.bfield_at(&R3::zeros()), R3::zeros());
        assert_eq!(w.bfield_at(&R3::new(0.0, 0.0, 40.0)), R3::zeros());
        assert_eq!(w.efield_at(&R3::zeros()), R3::zeros());
    }

    #[test]
    fn finite_segment_approaches_infinite_line_when_long() {
        let long = Wire::new(R3::new(0.0, 0.0, -1.0e4), R3::new(0.0, 0.0, 1.0e4), 1.0)
            .unwrap()
            .with_model(LineModel::Finite);
        let p = R3::new(0.0, 1.0, 0.0);
        let inf = long.with_model(LineModel::Infinite).bfield_at(&p);
        assert_relative_eq!(long.bfield_at(&p).x, inf.x, max_relative = 1.0e-6);
    }

    #[test]
    fn finite_segment_at_midplane_matches_reference() {
        // B = μ₀I / (4πd) · 2 (L/2) / sqrt((L/2)² + d²)
        let w = z_wire(1.0).with_model(LineModel::Finite);
        let d = 5.0;
        let expected = MU0_OVER_4PI / d * 2.0 * 5.0 / (50.0_f64).sqrt();
        assert_relative_eq!(w.bfield_at(&R3::new(d, 0.0, 0.0)).norm(), expected, max_relative = 1.0e-12);
    }

    #[test]
    fn electric_field_points_radially_outward() {
        let w = z_wire(2.0e-9);
        let d = 0.5;
        let e = w.efield_at(&R3::new(0.0, -d, 3.0));
        let expected = 2.0e-9 / (2.0 * PI * VACUUM_PERMITTIVITY * 10.0 * d);
        assert_relative_eq!(e.norm(), expected, max_relative = 1.0e-12);
        assert_relative_eq!(e.y / e.norm(), -1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn rejects_coincident_endpoints() {
        assert!(matches!(
            Wire::new(R3::x(), R3::x(), 1.0),
            Err(InducerError::DegenerateGeometry(_))
        ));
        assert!(Wire::new(R3::zeros(), R3::x(), Scalar::NAN).is_err());
    }
}
