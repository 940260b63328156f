//! Convenience re-exports for building and sampling fields.

pub use crate::constants::*;
pub use crate::errors::ElvizError;
pub use crate::field::{Field, FieldError, FieldKind};
pub use crate::inducers::{
    Bar, Coil, CoilSpec, ElectricSource, Inducer, InducerError, LineModel, MagneticSource, Particle, Wire,
};
pub use crate::math::{Frame, R3, R3x3, Scalar};
pub use crate::sampling::{
    sample_region, Extent, MagnitudeStats, Region, SampleCache, SampleRecord, SampleRun, SamplingError,
};
