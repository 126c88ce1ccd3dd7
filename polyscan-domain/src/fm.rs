#![forbid(unsafe_code)]

//! Fourier-Motzkin elimination over inequality systems.
//!
//! Every combined constraint is a rational consequence of its two parents,
//! so elimination never cuts away an integer point of the projection; it can
//! only over-approximate the integer shadow, which downstream loop bounds
//! tolerate (an over-approximated outer iteration simply runs an empty inner
//! loop).

use crate::domain::{dedupe, gcd, Constraint, ConstraintKind};
use crate::error::DomainError;

/// Eliminate variable `var` from a system of inequalities.
///
/// Constraints not mentioning `var` are kept as-is; every (lower, upper)
/// bound pair on `var` contributes one combined constraint. The input must
/// contain only `Ineq` constraints.
pub fn eliminate(ineqs: &[Constraint], var: usize) -> Result<Vec<Constraint>, DomainError> {
    let mut kept = Vec::new();
    let mut lowers = Vec::new();
    let mut uppers = Vec::new();

    for c in ineqs {
        debug_assert_eq!(c.kind, ConstraintKind::Ineq);
        match c.coeffs.get(var).copied().unwrap_or(0) {
            0 => kept.push(c.clone()),
            a if a > 0 => lowers.push(c),
            _ => uppers.push(c),
        }
    }

    for lo in &lowers {
        for up in &uppers {
            let combined = combine(lo, up, var)?;
            if !combined.is_trivially_true() {
                kept.push(combined);
            }
        }
    }

    Ok(dedupe(kept))
}

/// Add `(-up[var]) * lo + lo[var] * up`, cancelling `var`.
fn combine(lo: &Constraint, up: &Constraint, var: usize) -> Result<Constraint, DomainError> {
    let a = i128::from(lo.coeffs[var]);
    let b = i128::from(-up.coeffs[var]);
    debug_assert!(a > 0 && b > 0);

    let mut coeffs = Vec::with_capacity(lo.coeffs.len());
    for (l, u) in lo.coeffs.iter().zip(&up.coeffs) {
        coeffs.push(b * i128::from(*l) + a * i128::from(*u));
    }
    let constant = b * i128::from(lo.constant) + a * i128::from(up.constant);
    debug_assert_eq!(coeffs[var], 0);

    // Reduce in wide arithmetic before narrowing back to i64.
    let g = coeffs
        .iter()
        .fold(0i128, |acc, c| gcd_wide(acc, c.abs()));
    let (coeffs, constant) = if g > 1 {
        (
            coeffs.iter().map(|c| c / g).collect::<Vec<_>>(),
            constant.div_euclid(g),
        )
    } else {
        (coeffs, constant)
    };

    let mut narrow = Vec::with_capacity(coeffs.len());
    for c in coeffs {
        narrow.push(i64::try_from(c).map_err(|_| DomainError::CoefficientOverflow)?);
    }
    let constant = i64::try_from(constant).map_err(|_| DomainError::CoefficientOverflow)?;
    Ok(Constraint::ineq(narrow, constant))
}

fn gcd_wide(a: i128, b: i128) -> i128 {
    if a == 0 {
        return b;
    }
    if b == 0 {
        return a;
    }
    if let (Ok(a), Ok(b)) = (i64::try_from(a), i64::try_from(b)) {
        return i128::from(gcd(a, b));
    }
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
