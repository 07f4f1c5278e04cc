//! Regularized incomplete beta function I_x(a, b).
//!
//! Evaluated with the continued-fraction expansion and the modified Lentz
//! method (Numerical Recipes, 3rd ed., §6.4). The log-prefactor uses a
//! Lanczos `ln_gamma`, which keeps the result accurate to well under 1e-9
//! relative error for shape parameters into the low thousands.

use crate::error::DomainError;

const MAX_ITER: usize = 10_000;
const EPS: f64 = f64::EPSILON;
const TINY: f64 = 1e-300;

/// Regularized incomplete beta function I_x(a, b).
///
/// # Errors
/// * [`DomainError::OutOfUnitInterval`] if `x` is outside `[0, 1]` or NaN.
/// * [`DomainError::NonPositiveShape`] if `a` or `b` is not a finite positive number.
pub fn beta_inc(x: f64, a: f64, b: f64) -> Result<f64, DomainError> {
    if !(0.0..=1.0).contains(&x) {
        return Err(DomainError::OutOfUnitInterval { x });
    }
    if !(a.is_finite() && b.is_finite() && a > 0.0 && b > 0.0) {
        return Err(DomainError::NonPositiveShape { a, b });
    }
    Ok(regularized(x, a, b))
}

fn regularized(x: f64, a: f64, b: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    if x == 1.0 {
        return 1.0;
    }

    // I_x(a,b) = 1 - I_{1-x}(b,a); the fraction converges fastest below the mean
    if x > (a + 1.0) / (a + b + 2.0) {
        return 1.0 - regularized(1.0 - x, b, a);
    }

    let ln_prefix = a * x.ln() + b * (-x).ln_1p() - ln_beta(a, b);
    let value = ln_prefix.exp() * continued_fraction(x, a, b) / a;
    value.clamp(0.0, 1.0)
}

/// ln B(a, b) = ln Γ(a) + ln Γ(b) − ln Γ(a+b).
fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Lanczos approximation (g = 7, n = 9), valid for x > 0.
pub(crate) fn ln_gamma(x: f64) -> f64 {
    #[allow(clippy::excessive_precision)]
    const COEFFICIENTS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    const G: f64 = 7.0;

    if x < 0.5 {
        // reflection: Γ(x)Γ(1−x) = π / sin(πx)
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut sum = COEFFICIENTS[0];
    for (i, &c) in COEFFICIENTS[1..].iter().enumerate() {
        sum += c / (x + i as f64 + 1.0);
    }

    let t = x + G + 0.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + sum.ln()
}

/// Modified Lentz evaluation of the incomplete beta continued fraction.
fn continued_fraction(x: f64, a: f64, b: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = nonzero(1.0 - qab * x / qap).recip();
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        // even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = nonzero(1.0 + aa * d).recip();
        c = nonzero(1.0 + aa / c);
        h *= d * c;

        // odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = nonzero(1.0 + aa * d).recip();
        c = nonzero(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() <= EPS {
            return h;
        }
    }

    log::warn!("incomplete beta fraction did not converge (x = {x}, a = {a}, b = {b})");
    h
}

#[inline]
fn nonzero(v: f64) -> f64 {
    if v.abs() < TINY { TINY } else { v }
}
