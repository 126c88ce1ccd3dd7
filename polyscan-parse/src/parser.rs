#![forbid(unsafe_code)]

use polyscan_domain::{Constraint, Domain};

use crate::error::ParseError;
use crate::program::{Program, Statement};
use crate::span_between;
use crate::token::{Token, TokenKind};
use crate::Span;

/// Reader for the textual program description format:
///
///   1. a language tag (`c`);
///   2. the context matrix: `nrows ncols`, then rows of `ncols` integers
///      (first column 1 = inequality, 0 = equality; last column the
///      constant; `ncols - 2` parameter columns in between);
///   3. a parameter-name flag: `1` followed by the names, or `0`;
///   4. the statement count, then per statement a domain count (always 1),
///      a domain matrix over `iterators + params` columns, and a reserved
///      `0 0 0` triple;
///   5. an optional trailing scattering count, which must be `0`.
pub struct Parser<'a> {
    tokens: &'a [Token],
    idx: usize,
    src_len: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], src_len: usize) -> Self {
        Self {
            tokens,
            idx: 0,
            src_len,
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let language = self.parse_language()?;
        let (context, nparams) = self.parse_context_matrix()?;
        let params = self.parse_param_names(nparams)?;
        let statements = self.parse_statements(nparams)?;
        self.parse_trailing_scattering()?;

        if let Some(tok) = self.tokens.get(self.idx) {
            return Err(ParseError {
                message: "trailing input after program description".to_string(),
                span: tok.span,
            });
        }

        Ok(Program {
            language,
            context,
            params,
            statements,
        })
    }

    fn parse_language(&mut self) -> Result<char, ParseError> {
        let (name, span) = self.next_ident("a language tag")?;
        if name != "c" {
            return Err(ParseError {
                message: format!("unsupported target language '{name}' (expected 'c')"),
                span,
            });
        }
        Ok('c')
    }

    fn parse_context_matrix(&mut self) -> Result<(Domain, usize), ParseError> {
        let (constraints, ncols) = self.parse_matrix("context", None)?;
        let nparams = ncols - 2;
        let context = Domain::new(nparams, constraints).map_err(|e| ParseError {
            message: format!("invalid context matrix: {e}"),
            span: self.previous_span(),
        })?;
        Ok((context, nparams))
    }

    fn parse_param_names(&mut self, nparams: usize) -> Result<Vec<String>, ParseError> {
        let (flag, span) = self.next_int("the parameter-name flag")?;
        match flag {
            0 => Ok((0..nparams).map(|i| format!("p{i}")).collect()),
            1 => {
                let mut names = Vec::with_capacity(nparams);
                for _ in 0..nparams {
                    names.push(self.next_ident("a parameter name")?.0);
                }
                Ok(names)
            }
            other => Err(ParseError {
                message: format!("parameter-name flag must be 0 or 1, found {other}"),
                span,
            }),
        }
    }

    fn parse_statements(&mut self, nparams: usize) -> Result<Vec<Statement>, ParseError> {
        let (count, _) = self.next_usize("the statement count")?;
        let mut statements = Vec::with_capacity(count);
        for _ in 0..count {
            let (ndomains, span) = self.next_int("the statement domain count")?;
            if ndomains != 1 {
                return Err(ParseError {
                    message: format!("expected one domain per statement, found {ndomains}"),
                    span,
                });
            }
            let (constraints, ncols) = self.parse_matrix("statement", Some(nparams))?;
            let iterators = ncols - 2 - nparams;
            let domain = Domain::new(iterators + nparams, constraints).map_err(|e| ParseError {
                message: format!("invalid statement matrix: {e}"),
                span: self.previous_span(),
            })?;
            for _ in 0..3 {
                let (v, span) = self.next_int("a reserved statement option")?;
                if v != 0 {
                    return Err(ParseError {
                        message: format!("reserved statement options must be 0, found {v}"),
                        span,
                    });
                }
            }
            statements.push(Statement { iterators, domain });
        }
        Ok(statements)
    }

    fn parse_trailing_scattering(&mut self) -> Result<(), ParseError> {
        // The scattering count is optional; when present it must be 0.
        if self.idx >= self.tokens.len() {
            return Ok(());
        }
        let (count, span) = self.next_int("the scattering count")?;
        if count != 0 {
            return Err(ParseError {
                message: "scattering functions are not supported".to_string(),
                span,
            });
        }
        Ok(())
    }

    /// Read `nrows ncols` then the rows. When `nparams` is given, the
    /// column count must leave room for it; either way it must cover the
    /// kind column and the constant column.
    fn parse_matrix(
        &mut self,
        what: &str,
        nparams: Option<usize>,
    ) -> Result<(Vec<Constraint>, usize), ParseError> {
        let (nrows, _) = self.next_usize(&format!("the {what} matrix row count"))?;
        let (ncols, cols_span) = self.next_usize(&format!("the {what} matrix column count"))?;
        let min_cols = 2 + nparams.unwrap_or(0);
        if ncols < min_cols {
            return Err(ParseError {
                message: format!(
                    "{what} matrix needs at least {min_cols} columns, found {ncols}"
                ),
                span: cols_span,
            });
        }

        let mut constraints = Vec::with_capacity(nrows);
        for _ in 0..nrows {
            let (kind, kind_span) = self.next_int("a constraint kind column")?;
            let mut coeffs = Vec::with_capacity(ncols - 2);
            for _ in 0..ncols - 2 {
                coeffs.push(self.next_int("a coefficient")?.0);
            }
            let (constant, _) = self.next_int("a constant")?;
            let constraint = match kind {
                0 => Constraint::eq(coeffs, constant),
                1 => Constraint::ineq(coeffs, constant),
                other => {
                    return Err(ParseError {
                        message: format!(
                            "constraint kind column must be 0 or 1, found {other}"
                        ),
                        span: kind_span,
                    });
                }
            };
            constraints.push(constraint);
        }

        Ok((constraints, ncols))
    }

    fn bump(&mut self, what: &str) -> Result<&'a Token, ParseError> {
        let Some(tok) = self.tokens.get(self.idx) else {
            return Err(ParseError {
                message: format!("unexpected end of input, expected {what}"),
                span: self.eof_span(),
            });
        };
        self.idx += 1;
        Ok(tok)
    }

    fn next_int(&mut self, what: &str) -> Result<(i64, Span), ParseError> {
        let tok = self.bump(what)?;
        match &tok.kind {
            TokenKind::Int(n) => Ok((*n, tok.span)),
            TokenKind::Ident(name) => Err(ParseError {
                message: format!("expected {what}, found identifier '{name}'"),
                span: tok.span,
            }),
        }
    }

    fn next_usize(&mut self, what: &str) -> Result<(usize, Span), ParseError> {
        let (n, span) = self.next_int(what)?;
        usize::try_from(n).map(|v| (v, span)).map_err(|_| ParseError {
            message: format!("expected a non-negative count for {what}, found {n}"),
            span,
        })
    }

    fn next_ident(&mut self, what: &str) -> Result<(String, Span), ParseError> {
        let tok = self.bump(what)?;
        match &tok.kind {
            TokenKind::Ident(name) => Ok((name.clone(), tok.span)),
            TokenKind::Int(n) => Err(ParseError {
                message: format!("expected {what}, found integer {n}"),
                span: tok.span,
            }),
        }
    }

    fn previous_span(&self) -> Span {
        self.tokens
            .get(self.idx.saturating_sub(1))
            .map(|t| t.span)
            .unwrap_or_else(|| self.eof_span())
    }

    fn eof_span(&self) -> Span {
        span_between(self.src_len, self.src_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_program;

    const ONE_PARAM: &str = "\
# one free parameter, context p0 >= 0
c

1 3
1 1 0

1
n

1
1
2 4
1  1 0  0
1 -1 1 -1
0 0 0

0
";

    #[test]
    fn parse_one_parameter_program() {
        let program = parse_program(ONE_PARAM).unwrap();
        assert_eq!(program.language, 'c');
        assert_eq!(program.context.dim(), 1);
        assert_eq!(program.params, vec!["n".to_string()]);
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.statements[0].iterators, 1);
        assert_eq!(program.statements[0].domain.dim(), 2);
        assert!(program.context.contains(&[0]));
        assert!(!program.context.contains(&[-1]));
    }

    #[test]
    fn auto_generated_parameter_names() {
        let src = "c  1 4  1 1 0 0  0  0  0";
        let program = parse_program(src).unwrap();
        assert_eq!(program.params, vec!["p0".to_string(), "p1".to_string()]);
    }

    #[test]
    fn scattering_count_may_be_omitted() {
        let src = "c  1 3  1 1 0  0  0";
        let program = parse_program(src).unwrap();
        assert!(program.statements.is_empty());
    }

    #[test]
    fn rejects_unknown_language() {
        let err = parse_program("f 0 2 0 0").unwrap_err();
        assert!(err.message.contains("unsupported target language"));
    }

    #[test]
    fn rejects_bad_constraint_kind_column() {
        let err = parse_program("c 1 3 2 1 0 0 0").unwrap_err();
        assert!(err.message.contains("kind column"));
    }

    #[test]
    fn rejects_truncated_matrix() {
        let err = parse_program("c 2 3 1 1").unwrap_err();
        assert!(err.message.contains("unexpected end of input"));
    }

    #[test]
    fn rejects_nonzero_scattering() {
        let err = parse_program("c 1 3 1 1 0 0 0 2").unwrap_err();
        assert!(err.message.contains("scattering"));
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = parse_program("c 1 3 1 1 0 0 0 0 7").unwrap_err();
        assert!(err.message.contains("trailing input"));
    }
}
