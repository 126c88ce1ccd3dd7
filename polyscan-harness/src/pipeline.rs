#![forbid(unsafe_code)]

use std::io;

use polyscan_codegen::{generate, LoopNest, StatementSkeleton};
use polyscan_domain::Domain;
use polyscan_parse::parse_program;

use crate::emit::emit;
use crate::error::HarnessError;
use crate::sizing::bound_range;

/// Parse one program description and keep only its context domain, the
/// constraints over the parameters. The parsed program is dropped here.
pub fn acquire_context(src: &str) -> Result<Domain, HarnessError> {
    let program = parse_program(src)?;
    Ok(program.context)
}

/// Intersect the context with the sizing cube `[0, range]^dim`. Both
/// operands are consumed; an empty result is a legitimate outcome.
pub fn bound_domain(context: Domain) -> Result<Domain, HarnessError> {
    let dim = context.dim();
    let cube = Domain::cube(dim, 0, bound_range(dim));
    Ok(context.intersect(cube)?)
}

/// Build the synthetic single-statement program over the bounded domain
/// (parameters named `p0..p{dim-1}`) and hand it to the scanner.
pub fn assemble(domain: &Domain) -> Result<(Vec<String>, LoopNest), HarnessError> {
    let params: Vec<String> = (0..domain.dim()).map(|i| format!("p{i}")).collect();
    let skeleton = StatementSkeleton {
        macro_name: "S1".to_string(),
        params: params.clone(),
    };
    let nest = generate(domain, &skeleton)?;
    Ok((params, nest))
}

/// Run the whole pipeline over one input, producing the harness source.
/// Any failure aborts before a single byte of C exists.
pub fn render(src: &str) -> Result<String, HarnessError> {
    let context = acquire_context(src)?;
    let bounded = bound_domain(context)?;
    let (params, nest) = assemble(&bounded)?;
    let mut out = String::new();
    emit(&mut out, &params, &nest);
    Ok(out)
}

/// [`render`] then write the result in one step, so a sink never sees a
/// partial harness when generation fails.
pub fn run(src: &str, out: &mut impl io::Write) -> Result<(), HarnessError> {
    let source = render(src)?;
    out.write_all(source.as_bytes())?;
    Ok(())
}
