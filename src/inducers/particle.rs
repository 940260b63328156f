use crate::constants::MU0_OVER_4PI;
use crate::math::{R3, DEGENERATE_DISTANCE};

use super::MagneticSource;

/// Point magnetic dipole.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in meters.
    pub position: R3,
    /// Magnetic moment in A·m².
    pub moment: R3,
}

impl Particle {
    /// Creates a dipole at `position` with magnetic moment `moment`.
    #[must_use]
    pub fn new(position: R3, moment: R3) -> Self {
        Self { position, moment }
    }
}

impl MagneticSource for Particle {
    /// `B = μ₀/4π · (3(m·r̂)r̂ − m) / |r|³`.
    fn bfield_at(&self, point: &R3) -> R3 {
        let r_vec = point - self.position;
        let r = r_vec.norm();
        if r <= DEGENERATE_DISTANCE {
            return R3::zeros();
        }
        let r_hat = r_vec / r;
        let m_dot_r = self.moment.dot(&r_hat);
        (r_hat * (3.0 * m_dot_r) - self.moment) * (MU0_OVER_4PI / (r * r * r))
    }
}
