//! Shared error types used across submodules.

use thiserror::Error;

use crate::field::FieldError;
use crate::inducers::InducerError;
use crate::sampling::SamplingError;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum ElvizError {
    /// Wraps inducer construction errors.
    #[error(transparent)]
    Inducer(#[from] InducerError),
    /// Wraps field assembly errors.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// Wraps region validation errors.
    #[error(transparent)]
    Sampling(#[from] SamplingError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn build() -> Result<usize, ElvizError> {
        let mut field = Field::magnetic();
        field.add_inducer(Wire::new(R3::zeros(), R3::z(), 1.0)?)?;
        Ok(field.sample_region(&Region::new(R3::zeros(), 1.0, -1.0))?.count())
    }

    #[test]
    fn question_mark_converts_every_error() {
        let err = build().unwrap_err();
        assert!(matches!(err, ElvizError::Sampling(SamplingError::InvalidStep { .. })));
        assert_eq!(err.to_string(), "invalid step along x: -1");
    }
}
