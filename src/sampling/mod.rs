//! Grid sampling and intensity normalization.
//!
//! A run is strictly two-pass. [`sample_region`] evaluates every grid point of the region
//! into a fresh [`SampleCache`] and fixes the [`MagnitudeStats`]; only then does the returned
//! [`SampleRun`] start yielding [`SampleRecord`]s. The region's radius filters emitted records
//! only, so the statistics always describe the whole box.

mod cache;
mod record;
mod region;
mod stats;

pub use cache::SampleCache;
pub use record::SampleRecord;
pub use region::{Extent, GridPoints, Region, MAX_GRID_POINTS};
pub use stats::MagnitudeStats;

use crate::field::Field;
use crate::math::Scalar;

/// Errors raised by region validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SamplingError {
    /// Step must be finite and strictly positive.
    #[error("invalid step along {axis}: {value}")]
    InvalidStep {
        /// Offending axis.
        axis: char,
        /// Offending value.
        value: Scalar,
    },
    /// Size must be finite and non-negative.
    #[error("invalid size along {axis}: {value}")]
    InvalidSize {
        /// Offending axis.
        axis: char,
        /// Offending value.
        value: Scalar,
    },
    /// Origin components must be finite.
    #[error("invalid origin along {axis}: {value}")]
    InvalidOrigin {
        /// Offending axis.
        axis: char,
        /// Offending value.
        value: Scalar,
    },
    /// Radius must be finite and non-negative.
    #[error("invalid radius: {0}")]
    InvalidRadius(Scalar),
    /// The region would enumerate more points than allowed.
    #[error("grid exceeds {limit} points")]
    GridTooLarge {
        /// Maximum number of points.
        limit: usize,
    },
}

/// Evaluates `field` over every point of `region` and returns the record stream.
pub fn sample_region<'a>(field: &'a Field, region: &Region) -> Result<SampleRun<'a>, SamplingError> {
    let grid = region.grid_points()?;
    if field.is_empty() {
        tracing::warn!("sampling a field with no inducers; every intensity will be 0");
    }

    let mut cache = SampleCache::with_capacity(grid.len());
    let stats = MagnitudeStats::from_magnitudes(grid.clone().map(|p| cache.sample(field, &p).norm()))
        .unwrap_or_default();

    let [nx, ny, nz] = grid.counts();
    tracing::debug!(
        nx,
        ny,
        nz,
        inducers = field.len(),
        average = stats.average,
        maximum = stats.maximum,
        floor = stats.floor,
        "sampling pass complete"
    );

    Ok(SampleRun { field, region: *region, grid, cache, stats })
}

/// Records of one completed sampling pass, yielded in grid order.
///
/// The stream is finite and cannot be restarted; sample the region again for a fresh one.
#[derive(Debug)]
pub struct SampleRun<'a> {
    field: &'a Field,
    region: Region,
    grid: GridPoints,
    cache: SampleCache,
    stats: MagnitudeStats,
}

impl SampleRun<'_> {
    /// Statistics the intensities are normalized against.
    #[must_use]
    pub fn statistics(&self) -> &MagnitudeStats {
        &self.stats
    }

    /// Region being sampled.
    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Number of distinct points evaluated, including ones the radius hides.
    #[must_use]
    pub fn evaluated_points(&self) -> usize {
        self.cache.len()
    }

    /// Field values of the run.
    #[must_use]
    pub fn cache(&self) -> &SampleCache {
        &self.cache
    }
}

impl Iterator for SampleRun<'_> {
    type Item = SampleRecord;

    fn next(&mut self) -> Option<SampleRecord> {
        let point = self.grid.find(|p| self.region.is_displayed(p))?;
        let field = self.cache.sample(self.field, &point);
        Some(SampleRecord::new(point, field, &self.stats))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.grid.size_hint();
        (0, upper)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::inducers::{Coil, Particle, Wire};
    use crate::math::R3;

    fn wire_field() -> Field {
        let mut field = Field::magnetic();
        field.add_inducer(Wire::new(R3::new(0.0, 0.0, -5.0), R3::new(0.0, 0.0, 5.0), 1.0).unwrap()).unwrap();
        field
    }

    #[test]
    fn enumerates_every_grid_point() {
        let field = wire_field();
        let region = Region::new(R3::zeros(), R3::new(10.0, 10.0, 10.0), 2.0);
        let run = sample_region(&field, &region).unwrap();
        assert_eq!(run.region(), &region);
        assert_eq!(run.evaluated_points(), 216);
        assert_eq!(run.count(), 216);
    }

    #[test]
    fn radius_filters_records_but_not_statistics() {
        let field = wire_field();
        let full = sample_region(&field, &Region::new(R3::repeat(-4.0), 8.0, 2.0)).unwrap();
        let clipped = sample_region(&field, &Region::new(R3::repeat(-4.0), 8.0, 2.0).with_radius(4.0)).unwrap();
        assert_eq!(full.statistics(), clipped.statistics());
        assert_eq!(clipped.evaluated_points(), 125);
        let records: Vec<SampleRecord> = clipped.collect();
        assert!(records.len() < 125);
        assert!(records.iter().all(|r| r.position.norm() <= 4.0));
        assert!(records.iter().any(|r| r.position == R3::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn records_reuse_the_first_pass_values() {
        let field = wire_field();
        let mut run = sample_region(&field, &Region::new(R3::new(1.0, 1.0, 1.0), 2.0, 1.0)).unwrap();
        let grid = run.region().grid_points().unwrap();
        let cached: Vec<R3> = grid.map(|p| run.cache().get(&p).unwrap()).collect();
        let emitted: Vec<R3> = run.by_ref().map(|r| r.field).collect();
        assert_eq!(emitted, cached);
        assert_eq!(run.cache().len(), 27);
    }

    #[test]
    fn records_follow_grid_order() {
        let field = wire_field();
        let region = Region::new(R3::new(1.0, 1.0, 1.0), 1.0, 1.0);
        let positions: Vec<R3> = sample_region(&field, &region).unwrap().map(|r| r.position).collect();
        let expected: Vec<R3> = region.grid_points().unwrap().collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn empty_field_gives_zero_intensity() {
        let field = Field::magnetic();
        let run = sample_region(&field, &Region::new(R3::zeros(), 2.0, 1.0)).unwrap();
        let records: Vec<SampleRecord> = run.collect();
        assert_eq!(records.len(), 27);
        assert!(records.iter().all(|r| r.intensity == 0.0 && r.field == R3::zeros()));
    }

    #[test]
    fn strongest_sample_has_zero_intensity() {
        let mut field = Field::magnetic();
        field.add_inducer(Coil::new(R3::zeros(), 2.0, R3::new(0.0, 1.0, 1.0), 10.0).unwrap()).unwrap();
        field.add_inducer(Particle::new(R3::new(0.0, 4.0, 0.0), R3::new(0.0, -0.5, 0.0))).unwrap();
        let run = sample_region(&field, &Region::new(R3::repeat(-6.0), 12.0, 3.0)).unwrap();
        let maximum = run.statistics().maximum;
        let records: Vec<SampleRecord> = run.collect();
        let strongest = records
            .iter()
            .max_by(|a, b| a.magnitude.total_cmp(&b.magnitude))
            .unwrap();
        assert_relative_eq!(strongest.magnitude, maximum);
        assert_relative_eq!(strongest.intensity, 0.0, epsilon = 1.0e-12);
        assert!(records.iter().all(|r| (0.0..=1.0).contains(&r.intensity)));
        assert!(records.iter().all(|r| r.field.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn invalid_step_is_an_error() {
        let field = wire_field();
        let err = sample_region(&field, &Region::new(R3::zeros(), 10.0, 0.0)).unwrap_err();
        assert_eq!(err, SamplingError::InvalidStep { axis: 'x', value: 0.0 });
    }
}
