use crate::math::Scalar;

/// Spans at or below this fraction of the maximum are treated as a uniform field.
const FLAT_SPAN: Scalar = 1.0e-12;

/// Magnitude statistics of one sampling run.
///
/// `floor` is not the true minimum: magnitudes near sources span many orders, and the true
/// minimum sits close to zero, which would squeeze almost every point into one end of the
/// intensity range. The floor `max − 2·(max − avg)` mirrors the maximum about the average.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MagnitudeStats {
    /// Mean magnitude over all evaluated points.
    pub average: Scalar,
    /// Largest magnitude over all evaluated points.
    pub maximum: Scalar,
    /// Estimated lower end of the intensity range.
    pub floor: Scalar,
}

impl MagnitudeStats {
    /// Statistics over `magnitudes`; `None` when there are none.
    pub fn from_magnitudes<I>(magnitudes: I) -> Option<Self>
    where
        I: IntoIterator<Item = Scalar>,
    {
        let (count, sum, maximum) = magnitudes
            .into_iter()
            .fold((0_usize, 0.0, Scalar::NEG_INFINITY), |(n, s, m), v| (n + 1, s + v, m.max(v)));
        if count == 0 {
            return None;
        }
        let average = sum / count as Scalar;
        Some(Self { average, maximum, floor: maximum - 2.0 * (maximum - average) })
    }

    /// Width of the intensity range.
    #[must_use]
    pub fn span(&self) -> Scalar {
        self.maximum - self.floor
    }

    /// Maps a magnitude to `1 − (|B| − floor) / (max − floor)`, clamped to `[0, 1]`.
    ///
    /// The strongest sample maps to 0. A flat run (no inducers, or a uniform field) maps
    /// everything to 0.
    #[must_use]
    pub fn intensity(&self, magnitude: Scalar) -> Scalar {
        let span = self.span();
        if !(span.is_finite() && span > FLAT_SPAN * self.maximum.abs()) {
            return 0.0;
        }
        let val = 1.0 - (magnitude - self.floor) / span;
        if val.is_nan() {
            0.0
        } else {
            val.clamp(0.0, 1.0)
        }
    }
}
