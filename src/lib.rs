#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants used by the field sources.
pub mod constants;
/// Shared mathematical utilities (vectors, matrices, rotations, elliptic integrals).
pub mod math;
/// Field sources: wires, coils, bar magnets and point dipoles.
pub mod inducers;
/// Superposition of inducer contributions.
pub mod field;
/// Grid sampling, memoization and intensity normalization.
pub mod sampling;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

pub use errors::ElvizError;
