//! Physical constants used by the field sources.
//!
//! ## Accuracy
//!
//! Measured constants (ε₀, μ₀) are provided with 11-12 significant figures, which is far below
//! the resolution of any display the sampled fields end up on.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - CODATA 2018 values published May 20, 2019 (following 2019 SI redefinition)

use std::f64::consts::PI;

use crate::math::Scalar;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m (11 significant figures).
pub const VACUUM_PERMITTIVITY: Scalar = 8.854_187_812_8e-12;
/// Vacuum permeability μ₀ in henries per meter (H/m).
/// Approximate value: 1.25663706212 × 10⁻⁶ H/m (12 significant figures).
pub const VACUUM_PERMEABILITY: Scalar = 1.256_637_062_12e-6;
/// μ₀/4π, the prefactor of the Biot–Savart and dipole formulas.
pub const MU0_OVER_4PI: Scalar = VACUUM_PERMEABILITY / (4.0 * PI);
/// μ₀/2π, the prefactor of the infinite straight wire field.
pub const MU0_OVER_2PI: Scalar = VACUUM_PERMEABILITY / (2.0 * PI);

/// Returns 1/(2πε₀), the prefactor of the field of an infinite line charge.
#[inline]
#[must_use]
pub fn line_charge_coeff() -> Scalar {
    1.0 / (2.0 * PI * VACUUM_PERMITTIVITY)
}
