//! Superposition of inducer contributions.

use crate::inducers::{ElectricSource, Inducer, MagneticSource};
use crate::math::{finite_or_zero, R3};
use crate::sampling::{Region, SampleRun, SamplingError};

/// Which contribution a [`Field`] sums.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Magnetic flux density B (T).
    #[default]
    Magnetic,
    /// Electric field E (V/m).
    Electric,
}

/// Errors raised while assembling a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The inducer cannot contribute to this kind of field.
    #[error("{inducer} inducer has no {kind:?} contribution")]
    Unsupported {
        /// Variant name of the rejected inducer.
        inducer: &'static str,
        /// Kind of the field it was added to.
        kind: FieldKind,
    },
}

/// Ordered collection of inducers whose contributions add up.
#[derive(Debug, Clone, Default)]
pub struct Field {
    kind: FieldKind,
    inducers: Vec<Inducer>,
}

impl Field {
    /// Empty field of the given kind.
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self { kind, inducers: Vec::new() }
    }

    /// Empty magnetic field.
    #[must_use]
    pub fn magnetic() -> Self {
        Self::new(FieldKind::Magnetic)
    }

    /// Empty electric field.
    #[must_use]
    pub fn electric() -> Self {
        Self::new(FieldKind::Electric)
    }

    /// Field of `kind` holding every inducer yielded by `inducers`.
    pub fn with_inducers<I>(kind: FieldKind, inducers: I) -> Result<Self, FieldError>
    where
        I: IntoIterator,
        I::Item: Into<Inducer>,
    {
        let mut field = Self::new(kind);
        for inducer in inducers {
            field.add_inducer(inducer)?;
        }
        Ok(field)
    }

    /// Appends an inducer.
    ///
    /// Electric fields only accept inducers with an electric contribution.
    pub fn add_inducer(&mut self, inducer: impl Into<Inducer>) -> Result<(), FieldError> {
        let inducer = inducer.into();
        if self.kind == FieldKind::Electric && inducer.as_electric().is_none() {
            return Err(FieldError::Unsupported { inducer: inducer.kind_name(), kind: self.kind });
        }
        tracing::trace!(inducer = inducer.kind_name(), count = self.inducers.len() + 1, "inducer added");
        self.inducers.push(inducer);
        Ok(())
    }

    /// Field kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Registered inducers in insertion order.
    #[must_use]
    pub fn inducers(&self) -> &[Inducer] {
        &self.inducers
    }

    /// Number of inducers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inducers.len()
    }

    /// True when no inducer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inducers.is_empty()
    }

    /// Vector sum of every inducer's contribution at `point`.
    ///
    /// A non-finite total (a point numerically too close to a source) is reported as zero.
    #[must_use]
    pub fn evaluate(&self, point: &R3) -> R3 {
        let total: R3 = match self.kind {
            FieldKind::Magnetic => self.inducers.iter().map(|i| i.bfield_at(point)).sum(),
            FieldKind::Electric => self
                .inducers
                .iter()
                .filter_map(Inducer::as_electric)
                .map(|i| i.efield_at(point))
                .sum(),
        };
        let sanitized = finite_or_zero(total);
        if sanitized != total {
            tracing::warn!(x = point.x, y = point.y, z = point.z, "non-finite field replaced by zero");
        }
        sanitized
    }

    /// Samples this field over `region`; see [`crate::sampling::sample_region`].
    pub fn sample_region(&self, region: &Region) -> Result<SampleRun<'_>, SamplingError> {
        crate::sampling::sample_region(self, region)
    }
}
