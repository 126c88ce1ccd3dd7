#![forbid(unsafe_code)]

use std::fmt::Write;

use polyscan_codegen::LoopNest;

/// FNV-1a prime; the emitted `hash` function multiplies by this per byte.
pub const HASH_MULTIPLIER: u32 = 16777619;
/// FNV-1a offset basis; the accumulator is reset to this before each call.
pub const HASH_SEED: u32 = 2166136261;

const CALLBACKS: [&str; 2] = ["good", "test"];

const HEADER: &str = "\
#include <assert.h>
#include <stdio.h>

static unsigned h;

void hash(int v)
{
\tint i;
\tunion u {
\t\tint v;
\t\tunsigned char c[sizeof(int)];
\t} u;
\tu.v = v;
\tfor (i = 0; i < sizeof(int); ++i) {
\t\th *= 16777619;
\t\th ^= u.c[i];
\t}
}

";

const MAIN_OPEN: &str = "\
int main()
{
\tunsigned h_good, h_test;
";

const UTILITY_MACROS: &str = "\
/* Useful macros. */
#define floord(n,d) (((n)<0) ? -((-(n)+(d)-1)/(d)) : (n)/(d))
#define ceild(n,d) (((n)<0) ? -((-(n))/(d)) : ((n)+(d)-1)/(d))
#define max(x,y)    ((x) > (y) ? (x) : (y))
#define min(x,y)    ((x) < (y) ? (x) : (y))

";

const POSTAMBLE: &str = "\
\treturn 0;
}
";

/// Write the complete harness source: hash preamble, `good`/`test`
/// prototypes, per-parameter declarations, the `S1` macro driving both
/// callbacks through the shared accumulator, the utility macros, the loop
/// nest, and the closing postamble. Segment order is fixed.
pub fn emit(out: &mut String, params: &[String], nest: &LoopNest) {
    out.push_str(HEADER);

    for callback in CALLBACKS {
        let _ = write!(out, "void {callback}(");
        if params.is_empty() {
            out.push_str("void");
        } else {
            for (i, p) in params.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "int {p}");
            }
        }
        out.push_str(");\n");
    }
    out.push('\n');

    out.push_str(MAIN_OPEN);
    for p in params {
        let _ = writeln!(out, "\tint {p};");
    }

    let _ = write!(out, "#define S1({})", params.join(","));
    out.push_str(" do {");
    for callback in CALLBACKS {
        let _ = write!(out, " h = {HASH_SEED}u;");
        let _ = write!(out, " {callback}({});", params.join(", "));
        let _ = write!(out, " h_{callback} = h;");
    }
    out.push_str(" assert(h_good == h_test); } while (0)\n");

    out.push_str(UTILITY_MACROS);
    out.push_str(&nest.print_c(0));
    out.push_str(POSTAMBLE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyscan_codegen::{generate, StatementSkeleton};
    use polyscan_domain::Domain;

    fn emit_for(dim: usize) -> String {
        let params: Vec<String> = (0..dim).map(|i| format!("p{i}")).collect();
        let skeleton = StatementSkeleton {
            macro_name: "S1".to_string(),
            params: params.clone(),
        };
        let nest = generate(&Domain::cube(dim, 0, 2), &skeleton).unwrap();
        let mut out = String::new();
        emit(&mut out, &params, &nest);
        out
    }

    #[test]
    fn segments_appear_in_fixed_order() {
        let out = emit_for(2);
        let hash_at = out.find("void hash(int v)").unwrap();
        let proto_at = out.find("void good(int p0, int p1);").unwrap();
        let main_at = out.find("int main()").unwrap();
        let macro_at = out.find("#define S1(p0,p1)").unwrap();
        let util_at = out.find("#define floord").unwrap();
        let loop_at = out.find("for (p0 = 0; p0 <= 2; p0++)").unwrap();
        let ret_at = out.find("\treturn 0;").unwrap();
        assert!(hash_at < proto_at);
        assert!(proto_at < main_at);
        assert!(main_at < macro_at);
        assert!(macro_at < util_at);
        assert!(util_at < loop_at);
        assert!(loop_at < ret_at);
    }

    #[test]
    fn hash_constants_match_the_emitted_text() {
        let out = emit_for(1);
        assert!(out.contains(&HASH_MULTIPLIER.to_string()));
        assert!(out.contains(&format!("h = {HASH_SEED}u;")));
    }

    #[test]
    fn macro_resets_seed_captures_and_asserts() {
        let out = emit_for(1);
        assert!(out.contains(
            "#define S1(p0) do { h = 2166136261u; good(p0); h_good = h; \
             h = 2166136261u; test(p0); h_test = h; \
             assert(h_good == h_test); } while (0)"
        ));
    }

    #[test]
    fn declaration_count_tracks_dimension() {
        let out = emit_for(3);
        assert_eq!(out.matches("\tint p").count(), 3);
        assert!(out.contains("#define S1(p0,p1,p2)"));
    }

    #[test]
    fn zero_dimensional_harness_uses_void_prototypes() {
        let out = emit_for(0);
        assert!(out.contains("void good(void);"));
        assert!(out.contains("void test(void);"));
        assert!(out.contains("#define S1()"));
        assert!(out.contains("S1();"));
    }
}
