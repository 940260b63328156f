//! Complete elliptic integrals by composite Simpson quadrature.
//!
//! Both integrals take the *parameter* `m = k²`, the same quantity the loop field formula
//! calls `k²`:
//!
//! ```text
//! K(m) = ∫₀^{π/2} (1 − m sin²θ)^(−1/2) dθ
//! E(m) = ∫₀^{π/2} (1 − m sin²θ)^(1/2)  dθ
//! ```
//!
//! The integrands are smooth and periodic, so a low fixed order is already accurate to many
//! digits away from `m → 1`. `K` diverges at `m = 1`; callers must not ask for it there.

use std::f64::consts::FRAC_PI_2;

use super::Scalar;

/// Subdivision count used by [`ellip_k`] and [`ellip_e`].
pub const DEFAULT_QUADRATURE_ORDER: usize = 10;

/// Largest subdivision count a coil may request.
pub const MAX_QUADRATURE_ORDER: usize = 1 << 16;

/// Integrates `f` over `[a, b]` with composite Simpson's rule on `n` subintervals.
///
/// Odd `n` is rounded up to the next even number and `n = 0` is treated as 2. The cost is
/// linear in `n`; coils cap it at [`MAX_QUADRATURE_ORDER`].
#[must_use]
pub fn simpson<F>(f: F, a: Scalar, b: Scalar, n: usize) -> Scalar
where
    F: Fn(Scalar) -> Scalar,
{
    // odd counts round up, except usize::MAX which rounds down
    let n = n.saturating_add(n % 2).max(2);
    let n = n - n % 2;
    let h = (b - a) / n as Scalar;
    let mut s = f(a) + f(b);
    for i in (1..n).step_by(2) {
        s += 4.0 * f(a + i as Scalar * h);
    }
    for i in (2..n - 1).step_by(2) {
        s += 2.0 * f(a + i as Scalar * h);
    }
    s * h / 3.0
}

/// Complete elliptic integral of the first kind, `K(m)`, with `order` Simpson subintervals.
#[must_use]
pub fn ellip_k_with_order(m: Scalar, order: usize) -> Scalar {
    simpson(|t| (1.0 - m * t.sin().powi(2)).powf(-0.5), 0.0, FRAC_PI_2, order)
}

/// Complete elliptic integral of the second kind, `E(m)`, with `order` Simpson subintervals.
#[must_use]
pub fn ellip_e_with_order(m: Scalar, order: usize) -> Scalar {
    simpson(|t| (1.0 - m * t.sin().powi(2)).sqrt(), 0.0, FRAC_PI_2, order)
}

/// Complete elliptic integral of the first kind, `K(m)`.
#[inline]
#[must_use]
pub fn ellip_k(m: Scalar) -> Scalar {
    ellip_k_with_order(m, DEFAULT_QUADRATURE_ORDER)
}

/// Complete elliptic integral of the second kind, `E(m)`.
#[inline]
#[must_use]
pub fn ellip_e(m: Scalar) -> Scalar {
    ellip_e_with_order(m, DEFAULT_QUADRATURE_ORDER)
}
