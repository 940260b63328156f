use crate::math::{R3, Scalar};

use super::SamplingError;

/// Upper bound on the number of grid points a single region may enumerate.
pub const MAX_GRID_POINTS: usize = 1 << 28;

/// Relative slack when counting how many whole steps fit in a size.
const STEP_COUNT_SLACK: Scalar = 1.0e-9;

/// Per-axis extent; a scalar broadcasts to all three axes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent(pub R3);

impl From<Scalar> for Extent {
    fn from(v: Scalar) -> Self {
        Self(R3::repeat(v))
    }
}

impl From<R3> for Extent {
    fn from(v: R3) -> Self {
        Self(v)
    }
}

/// Axis-aligned box of grid points, optionally clipped to a sphere for display.
///
/// Points are `origin + (i·step.x, j·step.y, k·step.z)` for every `i, j, k` from zero up to and
/// including the number of whole steps that fit in `size` on that axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Corner the grid starts from.
    pub origin: R3,
    /// Extent of the box along each axis.
    pub size: R3,
    /// Spacing between grid points along each axis.
    pub step: R3,
    /// Records farther than this from the coordinate origin are not emitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub radius: Option<Scalar>,
}

impl Region {
    /// Region with no radius cut-off.
    #[must_use]
    pub fn new(origin: R3, size: impl Into<Extent>, step: impl Into<Extent>) -> Self {
        Self { origin, size: size.into().0, step: step.into().0, radius: None }
    }

    /// Restricts emitted records to points within `radius` of the coordinate origin.
    #[must_use]
    pub fn with_radius(mut self, radius: Scalar) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Checks every parameter, failing fast on anything that would not enumerate a finite grid.
    pub fn validate(&self) -> Result<(), SamplingError> {
        for (axis, i) in [('x', 0), ('y', 1), ('z', 2)] {
            let (origin, size, step) = (self.origin[i], self.size[i], self.step[i]);
            if !origin.is_finite() {
                return Err(SamplingError::InvalidOrigin { axis, value: origin });
            }
            if !(step.is_finite() && step > 0.0) {
                return Err(SamplingError::InvalidStep { axis, value: step });
            }
            if !(size.is_finite() && size >= 0.0) {
                return Err(SamplingError::InvalidSize { axis, value: size });
            }
        }
        if let Some(r) = self.radius {
            if !(r.is_finite() && r >= 0.0) {
                return Err(SamplingError::InvalidRadius(r));
            }
        }
        Ok(())
    }

    /// Number of grid points along x, y and z.
    pub fn axis_counts(&self) -> Result<[usize; 3], SamplingError> {
        self.validate()?;
        let mut counts = [0_usize; 3];
        for (i, count) in counts.iter_mut().enumerate() {
            let steps = (self.size[i] / self.step[i] * (1.0 + STEP_COUNT_SLACK)).floor();
            if steps >= MAX_GRID_POINTS as Scalar {
                return Err(SamplingError::GridTooLarge { limit: MAX_GRID_POINTS });
            }
            *count = steps as usize + 1;
        }
        let total = counts
            .iter()
            .try_fold(1_usize, |acc, &c| acc.checked_mul(c))
            .filter(|&t| t <= MAX_GRID_POINTS);
        match total {
            Some(_) => Ok(counts),
            None => Err(SamplingError::GridTooLarge { limit: MAX_GRID_POINTS }),
        }
    }

    /// Total number of grid points before the radius filter.
    pub fn point_count(&self) -> Result<usize, SamplingError> {
        Ok(self.axis_counts()?.iter().product())
    }

    /// Grid points in x-outer, y-middle, z-inner order.
    pub fn grid_points(&self) -> Result<GridPoints, SamplingError> {
        let counts = self.axis_counts()?;
        Ok(GridPoints { origin: self.origin, step: self.step, counts, next: 0, total: counts.iter().product() })
    }

    /// Whether a record at `point` passes the radius cut-off.
    #[must_use]
    pub fn is_displayed(&self, point: &R3) -> bool {
        self.radius.map_or(true, |r| point.norm() <= r)
    }
}

/// Iterator over the points of a [`Region`].
#[derive(Debug, Clone)]
pub struct GridPoints {
    origin: R3,
    step: R3,
    counts: [usize; 3],
    next: usize,
    total: usize,
}

impl GridPoints {
    /// Points per axis.
    #[must_use]
    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }
}

impl Iterator for GridPoints {
    type Item = R3;

    fn next(&mut self) -> Option<R3> {
        if self.next >= self.total {
            return None;
        }
        let [_, ny, nz] = self.counts;
        let n = self.next;
        self.next += 1;
        let (i, j, k) = (n / (ny * nz), (n / nz) % ny, n % nz);
        Some(self.origin + R3::new(i as Scalar * self.step.x, j as Scalar * self.step.y, k as Scalar * self.step.z))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for GridPoints {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_extents_broadcast() {
        let region = Region::new(R3::zeros(), 10.0, 2.0);
        assert_eq!(region.size, R3::repeat(10.0));
        assert_eq!(region.step, R3::repeat(2.0));
        assert_eq!(region.radius, None);
    }

    #[test]
    fn endpoints_are_inclusive() {
        let region = Region::new(R3::zeros(), R3::new(10.0, 10.0, 10.0), 2.0);
        assert_eq!(region.axis_counts().unwrap(), [6, 6, 6]);
        assert_eq!(region.point_count().unwrap(), 216);
        let points: Vec<R3> = region.grid_points().unwrap().collect();
        assert_eq!(points.len(), 216);
        assert_eq!(points[0], R3::zeros());
        assert_eq!(points[1], R3::new(0.0, 0.0, 2.0));
        assert_eq!(points[6], R3::new(0.0, 2.0, 0.0));
        assert_eq!(points[36], R3::new(2.0, 0.0, 0.0));
        assert_eq!(points[215], R3::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn partial_steps_are_dropped() {
        let region = Region::new(R3::new(-1.0, 0.0, 0.0), R3::new(5.0, 0.0, 0.9), R3::new(2.0, 1.0, 0.3));
        assert_eq!(region.axis_counts().unwrap(), [3, 1, 4]);
    }

    #[test]
    fn invalid_parameters_fail_fast() {
        let zero_step = Region::new(R3::zeros(), 10.0, R3::new(1.0, 0.0, 1.0));
        assert_eq!(zero_step.validate(), Err(SamplingError::InvalidStep { axis: 'y', value: 0.0 }));
        let negative_step = Region::new(R3::zeros(), 10.0, -1.0);
        assert!(matches!(negative_step.grid_points(), Err(SamplingError::InvalidStep { axis: 'x', .. })));
        let negative_size = Region::new(R3::zeros(), -1.0, 1.0);
        assert!(matches!(negative_size.validate(), Err(SamplingError::InvalidSize { .. })));
        let bad_radius = Region::new(R3::zeros(), 1.0, 1.0).with_radius(-2.0);
        assert_eq!(bad_radius.validate(), Err(SamplingError::InvalidRadius(-2.0)));
        let nan_origin = Region::new(R3::new(0.0, 0.0, Scalar::NAN), 1.0, 1.0);
        assert!(matches!(nan_origin.validate(), Err(SamplingError::InvalidOrigin { axis: 'z', .. })));
    }

    #[test]
    fn oversized_grids_are_rejected() {
        let region = Region::new(R3::zeros(), 1.0, 1.0e-9);
        assert_eq!(region.point_count(), Err(SamplingError::GridTooLarge { limit: MAX_GRID_POINTS }));
    }

    #[test]
    fn radius_is_measured_from_the_coordinate_origin() {
        let region = Region::new(R3::new(5.0, 5.0, 5.0), 2.0, 1.0).with_radius(9.0);
        assert!(region.is_displayed(&R3::new(5.0, 5.0, 5.0)));
        assert!(!region.is_displayed(&R3::new(7.0, 7.0, 7.0)));
        assert!(Region::new(R3::zeros(), 1.0, 1.0).is_displayed(&R3::repeat(1.0e6)));
    }
}
