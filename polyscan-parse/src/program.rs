#![forbid(unsafe_code)]

use polyscan_domain::Domain;

/// One parsed program description: the context (parameter legality)
/// constraints plus the statement domains the scanner would visit.
#[derive(Clone, Debug)]
pub struct Program {
    /// Target language tag from the input header (currently always `c`).
    pub language: char,
    /// Constraints over the parameters only.
    pub context: Domain,
    /// Parameter names, either read from the input or auto-generated.
    pub params: Vec<String>,
    pub statements: Vec<Statement>,
}

#[derive(Clone, Debug)]
pub struct Statement {
    /// Number of iterator dimensions; the statement domain spans
    /// `iterators + params` variables, iterators first.
    pub iterators: usize,
    pub domain: Domain,
}
