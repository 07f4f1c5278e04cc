//! Cumulative odds of reaching `r` successes, via the beta-function identity.

use crate::beta::{beta_inc, ln_gamma};
use crate::error::DomainError;

/// Largest window [`default_support`] will hand out.
pub const MAX_DEFAULT_SUPPORT: usize = 10_000_000;

/// Window used when the caller does not pass one: enough trials for the
/// curve to sit visibly at 1.0 on a chart. Not a tail guarantee.
///
/// # Errors
/// * [`DomainError::UnboundedSupport`] for `p == 0`, where no window saturates.
/// * [`DomainError::SupportTooLarge`] if `r + ceil(10/p)` exceeds
///   [`MAX_DEFAULT_SUPPORT`].
pub fn default_support(r: u32, p: f64) -> Result<usize, DomainError> {
    check_probability(p)?;
    if p == 0.0 {
        return Err(DomainError::UnboundedSupport);
    }
    let n = f64::from(r) + (10.0 / p).ceil();
    if n > MAX_DEFAULT_SUPPORT as f64 {
        return Err(DomainError::SupportTooLarge { n });
    }
    Ok(n as usize)
}

/// `P(at least r successes within k+1 trials)` for `k = 0..max_support`.
///
/// "At least `r` successes in `n` trials" equals I_p(r, n-r+1), so element `k`
/// is I_p(r, k-r+2). Entries with `k+1 < r` are structurally zero and never
/// reach the beta function. `max_support` defaults to [`default_support`].
///
/// # Errors
/// * [`DomainError::InvalidProbability`] if `p` is outside `[0, 1]` or NaN.
/// * [`DomainError::UnboundedSupport`] / [`DomainError::SupportTooLarge`] if no
///   window is given and [`default_support`] cannot pick one.
pub fn neg_binom_cdf(
    r: u32,
    p: f64,
    max_support: Option<usize>,
) -> Result<Vec<f64>, DomainError> {
    check_probability(p)?;
    let n = match max_support {
        Some(n) => n,
        None => default_support(r, p)?,
    };

    if r == 0 {
        return Ok(vec![1.0; n]);
    }

    let r = r as usize;
    let mut cdf = Vec::with_capacity(n);
    for k in 0..n {
        let trials = k + 1;
        let value = if trials < r || p == 0.0 {
            0.0
        } else if p == 1.0 {
            1.0
        } else {
            beta_inc(p, r as f64, (trials - r + 1) as f64)?
        };
        cdf.push(value);
    }
    Ok(cdf)
}

/// Probability that the `r`-th success lands exactly on trial `trials`:
/// C(trials-1, r-1) p^r (1-p)^(trials-r).
///
/// # Errors
/// [`DomainError::InvalidProbability`] if `p` is outside `[0, 1]` or NaN.
pub fn neg_binom_pmf(r: u32, p: f64, trials: usize) -> Result<f64, DomainError> {
    check_probability(p)?;
    let r = r as usize;
    if r == 0 {
        return Ok(if trials == 0 { 1.0 } else { 0.0 });
    }
    if trials < r {
        return Ok(0.0);
    }
    let failures = trials - r;
    if p == 1.0 {
        return Ok(if failures == 0 { 1.0 } else { 0.0 });
    }
    if p == 0.0 {
        return Ok(0.0);
    }
    let ln_choose = ln_gamma(trials as f64) - ln_gamma(r as f64) - ln_gamma(failures as f64 + 1.0);
    Ok((ln_choose + r as f64 * p.ln() + failures as f64 * (-p).ln_1p()).exp())
}

pub(crate) fn check_probability(p: f64) -> Result<(), DomainError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(DomainError::InvalidProbability { p })
    }
}
