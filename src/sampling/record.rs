use crate::math::{R3, Scalar};

use super::MagnitudeStats;

/// One emitted grid sample, ready for a renderer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRecord {
    /// Grid point.
    pub position: R3,
    /// Raw field vector.
    pub field: R3,
    /// `|field|`.
    pub magnitude: Scalar,
    /// Unit direction of `field`; zero when the field vanishes.
    pub direction: R3,
    /// Normalized intensity in `[0, 1]`; 0 for the strongest samples.
    pub intensity: Scalar,
}

impl SampleRecord {
    /// Decomposes `field` and normalizes its magnitude against `stats`.
    #[must_use]
    pub fn new(position: R3, field: R3, stats: &MagnitudeStats) -> Self {
        let magnitude = field.norm();
        let direction = if magnitude == 0.0 { R3::zeros() } else { field / magnitude };
        Self { position, field, magnitude, direction, intensity: stats.intensity(magnitude) }
    }
}
