#![forbid(unsafe_code)]

use crate::error::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintKind {
    /// `coeffs . x + constant = 0`
    Eq,
    /// `coeffs . x + constant >= 0`
    Ineq,
}

/// One affine constraint over the variables of a domain.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub coeffs: Vec<i64>,
    pub constant: i64,
}

impl Constraint {
    pub fn ineq(coeffs: Vec<i64>, constant: i64) -> Self {
        Self {
            kind: ConstraintKind::Ineq,
            coeffs,
            constant,
        }
    }

    pub fn eq(coeffs: Vec<i64>, constant: i64) -> Self {
        Self {
            kind: ConstraintKind::Eq,
            coeffs,
            constant,
        }
    }

    pub fn evaluate(&self, point: &[i64]) -> i64 {
        let dot: i64 = self
            .coeffs
            .iter()
            .zip(point)
            .map(|(c, p)| c * p)
            .sum();
        dot + self.constant
    }

    pub fn holds(&self, point: &[i64]) -> bool {
        let v = self.evaluate(point);
        match self.kind {
            ConstraintKind::Eq => v == 0,
            ConstraintKind::Ineq => v >= 0,
        }
    }

    /// Index of the highest variable with a nonzero coefficient, if any.
    pub fn highest_var(&self) -> Option<usize> {
        self.coeffs.iter().rposition(|c| *c != 0)
    }

    pub fn is_constant(&self) -> bool {
        self.highest_var().is_none()
    }

    /// A constant constraint that no point can satisfy.
    pub fn is_trivially_false(&self) -> bool {
        if !self.is_constant() {
            return false;
        }
        match self.kind {
            ConstraintKind::Eq => self.constant != 0,
            ConstraintKind::Ineq => self.constant < 0,
        }
    }

    /// A constant constraint that every point satisfies.
    pub fn is_trivially_true(&self) -> bool {
        if !self.is_constant() {
            return false;
        }
        match self.kind {
            ConstraintKind::Eq => self.constant == 0,
            ConstraintKind::Ineq => self.constant >= 0,
        }
    }

    /// Divide an inequality by the gcd of its coefficients, rounding the
    /// constant toward minus infinity. This keeps exactly the same set of
    /// integer solutions (and may tighten the rational relaxation).
    pub(crate) fn normalize_ineq(mut self) -> Self {
        debug_assert_eq!(self.kind, ConstraintKind::Ineq);
        let g = self.coeffs.iter().fold(0i64, |acc, c| gcd(acc, c.abs()));
        if g > 1 {
            for c in &mut self.coeffs {
                *c /= g;
            }
            self.constant = self.constant.div_euclid(g);
        }
        self
    }
}

pub(crate) fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// A set of integer points cut out of `Z^dim` by affine constraints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    dim: usize,
    constraints: Vec<Constraint>,
}

impl Domain {
    pub fn new(dim: usize, constraints: Vec<Constraint>) -> Result<Self, DomainError> {
        for c in &constraints {
            if c.coeffs.len() != dim {
                return Err(DomainError::BadConstraintArity {
                    dim,
                    found: c.coeffs.len(),
                });
            }
        }
        Ok(Self { dim, constraints })
    }

    pub fn universe(dim: usize) -> Self {
        Self {
            dim,
            constraints: Vec::new(),
        }
    }

    /// The hyperrectangle `{ x : low <= x_i <= high }`.
    pub fn cube(dim: usize, low: i64, high: i64) -> Self {
        let mut constraints = Vec::with_capacity(2 * dim);
        for i in 0..dim {
            let mut lower = vec![0i64; dim];
            lower[i] = 1;
            constraints.push(Constraint::ineq(lower, -low));
            let mut upper = vec![0i64; dim];
            upper[i] = -1;
            constraints.push(Constraint::ineq(upper, high));
        }
        Self { dim, constraints }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Intersect two domains of equal dimension, consuming both operands.
    pub fn intersect(self, other: Domain) -> Result<Domain, DomainError> {
        if self.dim != other.dim {
            return Err(DomainError::DimensionMismatch {
                expected: self.dim,
                found: other.dim,
            });
        }
        let mut constraints = self.constraints;
        constraints.extend(other.constraints);
        Ok(Domain {
            dim: self.dim,
            constraints,
        })
    }

    pub fn contains(&self, point: &[i64]) -> bool {
        point.len() == self.dim && self.constraints.iter().all(|c| c.holds(point))
    }

    /// Lower every constraint to inequalities (an equality becomes a `>=`
    /// and a `<=` pair), normalized by gcd, deduplicated, with trivially
    /// true constraints dropped.
    pub fn as_inequalities(&self) -> Vec<Constraint> {
        let mut out = Vec::with_capacity(self.constraints.len());
        for c in &self.constraints {
            match c.kind {
                ConstraintKind::Ineq => out.push(c.clone().normalize_ineq()),
                ConstraintKind::Eq => {
                    out.push(Constraint::ineq(c.coeffs.clone(), c.constant).normalize_ineq());
                    let neg: Vec<i64> = c.coeffs.iter().map(|v| -v).collect();
                    out.push(Constraint::ineq(neg, -c.constant).normalize_ineq());
                }
            }
        }
        dedupe(out)
    }
}

/// Sort, deduplicate, and drop trivially true constraints.
pub fn dedupe(mut constraints: Vec<Constraint>) -> Vec<Constraint> {
    constraints.retain(|c| !c.is_trivially_true());
    constraints.sort();
    constraints.dedup();
    constraints
}
