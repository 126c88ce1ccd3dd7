#![forbid(unsafe_code)]

use polyscan_domain::{fm, Domain};

use crate::error::CodegenError;
use crate::nest::{Affine, Bound, Level, LoopNest, StatementSkeleton};

/// Turn a finite domain plus a statement skeleton into a loop nest that
/// visits exactly the integer points of the domain, binding the skeleton's
/// parameter names in declared order.
///
/// Constraints whose highest variable is `d` become bounds of loop level
/// `d`; Fourier-Motzkin elimination then projects the system one variable
/// at a time so outer levels see the consequences of inner constraints.
pub fn generate(domain: &Domain, skeleton: &StatementSkeleton) -> Result<LoopNest, CodegenError> {
    let dim = domain.dim();
    if skeleton.params.len() != dim {
        return Err(CodegenError::ArityMismatch {
            dim,
            params: skeleton.params.len(),
        });
    }

    let mut current = domain.as_inequalities();
    let mut levels: Vec<Level> = Vec::with_capacity(dim);

    for d in (0..dim).rev() {
        if current.iter().any(|c| c.is_trivially_false()) {
            return Ok(LoopNest::Empty);
        }

        let mut lowers = Vec::new();
        let mut uppers = Vec::new();
        for c in current.iter().filter(|c| c.coeffs[d] != 0) {
            let a = c.coeffs[d];
            if a > 0 {
                // a*x + rest >= 0  =>  x >= ceild(-rest, a)
                lowers.push(Bound {
                    expr: Affine {
                        coeffs: c.coeffs[..d].iter().map(|v| -v).collect(),
                        constant: -c.constant,
                    },
                    div: a,
                });
            } else {
                // a*x + rest >= 0, a < 0  =>  x <= floord(rest, -a)
                uppers.push(Bound {
                    expr: Affine {
                        coeffs: c.coeffs[..d].to_vec(),
                        constant: c.constant,
                    },
                    div: -a,
                });
            }
        }

        if lowers.is_empty() || uppers.is_empty() {
            return Err(CodegenError::Unbounded {
                var: skeleton.params[d].clone(),
            });
        }

        levels.push(Level {
            var: skeleton.params[d].clone(),
            lowers,
            uppers,
        });
        current = fm::eliminate(&current, d)?;
    }

    // Only constant constraints survive full elimination.
    if current.iter().any(|c| c.is_trivially_false()) {
        return Ok(LoopNest::Empty);
    }

    levels.reverse();
    Ok(LoopNest::Loops {
        levels,
        skeleton: skeleton.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyscan_domain::Constraint;

    fn skeleton(dim: usize) -> StatementSkeleton {
        StatementSkeleton {
            macro_name: "S1".to_string(),
            params: (0..dim).map(|i| format!("p{i}")).collect(),
        }
    }

    fn brute_force(domain: &Domain, low: i64, high: i64) -> Vec<Vec<i64>> {
        let mut out = Vec::new();
        let mut point = vec![0i64; domain.dim()];
        scan(domain, low, high, 0, &mut point, &mut out);
        out
    }

    fn scan(
        domain: &Domain,
        low: i64,
        high: i64,
        d: usize,
        point: &mut Vec<i64>,
        out: &mut Vec<Vec<i64>>,
    ) {
        if d == domain.dim() {
            if domain.contains(point) {
                out.push(point.clone());
            }
            return;
        }
        for v in low..=high {
            point[d] = v;
            scan(domain, low, high, d + 1, point, out);
        }
    }

    #[test]
    fn half_line_in_a_cube_becomes_one_counted_loop() {
        let context = Domain::new(1, vec![Constraint::ineq(vec![1], 0)]).unwrap();
        let domain = context.intersect(Domain::cube(1, 0, 30)).unwrap();
        let nest = generate(&domain, &skeleton(1)).unwrap();
        let text = nest.print_c(0);
        assert!(text.contains("for (p0 = 0; p0 <= 30; p0++) {"));
        assert!(text.contains("S1(p0);"));
        let points = nest.enumerate();
        assert_eq!(points.len(), 31);
        assert_eq!(points.first(), Some(&vec![0]));
        assert_eq!(points.last(), Some(&vec![30]));
    }

    #[test]
    fn triangle_enumeration_matches_brute_force() {
        // p0 >= 0, p1 >= 0, p0 + p1 <= 4.
        let domain = Domain::new(
            2,
            vec![
                Constraint::ineq(vec![1, 0], 0),
                Constraint::ineq(vec![0, 1], 0),
                Constraint::ineq(vec![-1, -1], 4),
            ],
        )
        .unwrap();
        let nest = generate(&domain, &skeleton(2)).unwrap();
        let points = nest.enumerate();
        assert_eq!(points.len(), 15);
        assert_eq!(points, brute_force(&domain, -1, 6));
    }

    #[test]
    fn equality_pins_a_variable_to_one_iteration() {
        let domain = Domain::new(1, vec![Constraint::eq(vec![1], -2)]).unwrap();
        let nest = generate(&domain, &skeleton(1)).unwrap();
        assert_eq!(nest.enumerate(), vec![vec![2]]);
    }

    #[test]
    fn strided_lower_bound_uses_ceild() {
        // 2*p1 >= p0 inside a small box.
        let extra = Domain::new(2, vec![Constraint::ineq(vec![-1, 2], 0)]).unwrap();
        let domain = extra.intersect(Domain::cube(2, 0, 4)).unwrap();
        let nest = generate(&domain, &skeleton(2)).unwrap();
        let text = nest.print_c(0);
        assert!(text.contains("ceild(p0, 2)"), "{text}");
        assert_eq!(nest.enumerate(), brute_force(&domain, -1, 5));
    }

    #[test]
    fn contradictory_constraints_yield_an_empty_nest() {
        // p0 >= 1 and p0 <= 0.
        let domain = Domain::new(
            1,
            vec![
                Constraint::ineq(vec![1], -1),
                Constraint::ineq(vec![-1], 0),
            ],
        )
        .unwrap();
        let nest = generate(&domain, &skeleton(1)).unwrap();
        assert!(matches!(nest, LoopNest::Empty));
        assert!(nest.enumerate().is_empty());
        assert!(nest.print_c(0).contains("/* empty enumeration domain */"));
    }

    #[test]
    fn unbounded_domains_are_rejected() {
        let domain = Domain::new(1, vec![Constraint::ineq(vec![1], 0)]).unwrap();
        let err = generate(&domain, &skeleton(1)).unwrap_err();
        assert!(matches!(err, CodegenError::Unbounded { var } if var == "p0"));
    }

    #[test]
    fn zero_dimensional_domain_is_a_single_bare_call() {
        let nest = generate(&Domain::universe(0), &skeleton(0)).unwrap();
        assert_eq!(nest.print_c(0), "S1();\n");
        assert_eq!(nest.enumerate(), vec![Vec::<i64>::new()]);
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let err = generate(&Domain::cube(2, 0, 1), &skeleton(3)).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::ArityMismatch { dim: 2, params: 3 }
        ));
    }
}
