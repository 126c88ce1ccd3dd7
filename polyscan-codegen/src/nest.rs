#![forbid(unsafe_code)]

const INDENT: &str = "  ";

/// The synthetic single-statement program handed to the scanner: one macro
/// invocation per visited point, taking the named parameters in order.
#[derive(Clone, Debug)]
pub struct StatementSkeleton {
    pub macro_name: String,
    pub params: Vec<String>,
}

/// An affine expression over the loop variables enclosing one level,
/// `coeffs . (p0..p{k-1}) + constant`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affine {
    pub coeffs: Vec<i64>,
    pub constant: i64,
}

impl Affine {
    pub fn eval(&self, point: &[i64]) -> i64 {
        let dot: i64 = self.coeffs.iter().zip(point).map(|(c, p)| c * p).sum();
        dot + self.constant
    }

    fn render(&self, names: &[String]) -> String {
        let mut out = String::new();
        for (j, c) in self.coeffs.iter().enumerate() {
            if *c == 0 {
                continue;
            }
            push_term(&mut out, *c, Some(&names[j]));
        }
        if self.constant != 0 || out.is_empty() {
            push_term(&mut out, self.constant, None);
        }
        out
    }
}

fn push_term(out: &mut String, coeff: i64, name: Option<&str>) {
    if out.is_empty() {
        if coeff < 0 {
            out.push('-');
        }
    } else if coeff < 0 {
        out.push_str(" - ");
    } else {
        out.push_str(" + ");
    }
    let mag = coeff.abs();
    match name {
        Some(name) if mag == 1 => out.push_str(name),
        Some(name) => out.push_str(&format!("{mag}*{name}")),
        None => out.push_str(&mag.to_string()),
    }
}

/// One bound on a loop variable: `expr / div` rounded up (lower bounds) or
/// down (upper bounds). `div` is always positive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bound {
    pub expr: Affine,
    pub div: i64,
}

impl Bound {
    fn render(&self, names: &[String], rounding: &str) -> String {
        let expr = self.expr.render(names);
        if self.div == 1 {
            expr
        } else {
            format!("{rounding}({expr}, {})", self.div)
        }
    }
}

/// One loop level; the effective range is `max(lowers) ..= min(uppers)`.
#[derive(Clone, Debug)]
pub struct Level {
    pub var: String,
    pub lowers: Vec<Bound>,
    pub uppers: Vec<Bound>,
}

/// The generated loop nest: a perfect nest with one statement call at the
/// innermost point, or nothing at all for an empty domain.
#[derive(Clone, Debug)]
pub enum LoopNest {
    Empty,
    Loops {
        levels: Vec<Level>,
        skeleton: StatementSkeleton,
    },
}

impl LoopNest {
    /// Pretty-print as C. The emitted text relies on the `floord`, `ceild`,
    /// `min` and `max` macros of the surrounding harness file.
    pub fn print_c(&self, base_indent: usize) -> String {
        let mut out = String::new();
        match self {
            LoopNest::Empty => {
                indent_line(&mut out, base_indent);
                out.push_str("/* empty enumeration domain */\n");
            }
            LoopNest::Loops { levels, skeleton } => {
                let names = &skeleton.params;
                for (depth, level) in levels.iter().enumerate() {
                    let lb = fold_bounds(&level.lowers, names, "max", "ceild");
                    let ub = fold_bounds(&level.uppers, names, "min", "floord");
                    indent_line(&mut out, base_indent + depth);
                    out.push_str(&format!(
                        "for ({v} = {lb}; {v} <= {ub}; {v}++) {{\n",
                        v = level.var
                    ));
                }
                indent_line(&mut out, base_indent + levels.len());
                out.push_str(&format!(
                    "{}({});\n",
                    skeleton.macro_name,
                    names.join(", ")
                ));
                for depth in (0..levels.len()).rev() {
                    indent_line(&mut out, base_indent + depth);
                    out.push_str("}\n");
                }
            }
        }
        out
    }

    /// Walk the nest in Rust with the same rounding semantics as the C
    /// macros, yielding every visited point in loop order.
    pub fn enumerate(&self) -> Vec<Vec<i64>> {
        let mut out = Vec::new();
        if let LoopNest::Loops { levels, .. } = self {
            let mut point = Vec::with_capacity(levels.len());
            visit(levels, &mut point, &mut out);
        }
        out
    }
}

fn visit(levels: &[Level], point: &mut Vec<i64>, out: &mut Vec<Vec<i64>>) {
    let Some(level) = levels.first() else {
        out.push(point.clone());
        return;
    };
    let lb = level
        .lowers
        .iter()
        .map(|b| ceild(b.expr.eval(point), b.div))
        .max();
    let ub = level
        .uppers
        .iter()
        .map(|b| floord(b.expr.eval(point), b.div))
        .min();
    let (Some(lb), Some(ub)) = (lb, ub) else {
        return;
    };
    for v in lb..=ub {
        point.push(v);
        visit(&levels[1..], point, out);
        point.pop();
    }
}

fn fold_bounds(bounds: &[Bound], names: &[String], combiner: &str, rounding: &str) -> String {
    match bounds {
        [] => String::new(),
        [only] => only.render(names, rounding),
        [first, rest @ ..] => format!(
            "{combiner}({}, {})",
            first.render(names, rounding),
            fold_bounds(rest, names, combiner, rounding)
        ),
    }
}

fn indent_line(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

pub(crate) fn floord(n: i64, d: i64) -> i64 {
    debug_assert!(d > 0);
    n.div_euclid(d)
}

pub(crate) fn ceild(n: i64, d: i64) -> i64 {
    debug_assert!(d > 0);
    -(-n).div_euclid(d)
}
