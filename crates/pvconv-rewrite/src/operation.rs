// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Layer operations, flat and `geom_and`-wrapped.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static FLAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bOPERATION\s+(\w+)\s+(\w+)\s+(\w+)\s+(\w+)\s*;").unwrap());

// The second operand may be quoted and may carry the statement's `;` inside
// the quotes: `"M2;"`, `"M2"`, `M2;` and `M2` are all accepted.
static GEOM_AND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bgeom_and\s*\(\s*OPERATION\s+(\w+)\s+(\w+)\s+("?\w+\s*;?"?)\s*;?\s*\)(?:[ \t]*;)?"#)
        .unwrap()
});

/// Rewrite flat `OPERATION` statements, then the `geom_and` form.
pub fn apply(input: &str) -> String {
    let text = FLAT.replace_all(input, "$2 = $1 ( $3 $4 ) ;");
    GEOM_AND
        .replace_all(&text, |caps: &Captures| {
            let operand = caps[3].trim_matches(|c: char| c == '"' || c == ';' || c.is_whitespace());
            format!("{} = AND ( {} {} ) ;", &caps[1], &caps[2], operand)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_operation() {
        assert_eq!(apply("OPERATION AND R1 M1 M2 ;"), "R1 = AND ( M1 M2 ) ;");
        assert_eq!(apply("OPERATION  NOT  R2  M1  M3;\n"), "R2 = NOT ( M1 M3 ) ;\n");
    }

    #[test]
    fn geom_and_quoted_operand_with_semicolon() {
        assert_eq!(apply(r#"geom_and ( OPERATION R1 M1 "M2;" )"#), "R1 = AND ( M1 M2 ) ;");
    }

    #[test]
    fn geom_and_operand_variants() {
        for src in [
            r#"geom_and ( OPERATION R1 M1 "M2" ; )"#,
            r#"geom_and(OPERATION R1 M1 M2;)"#,
            r#"geom_and ( OPERATION R1 M1 M2 ) ;"#,
        ] {
            assert_eq!(apply(src), "R1 = AND ( M1 M2 ) ;", "input: {}", src);
        }
    }

    #[test]
    fn flat_form_inside_geom_and_is_not_rewritten_first() {
        // Three words after OPERATION do not make a flat statement.
        let out = apply("geom_and ( OPERATION R1 M1 M2 ; )");
        assert_eq!(out, "R1 = AND ( M1 M2 ) ;");
    }

    #[test]
    fn operation_with_three_operands_is_left_alone() {
        let src = "OPERATION OR R M1 M2 M3 ;";
        assert_eq!(apply(src), src);
    }

    #[test]
    fn no_match_is_identity() {
        let src = "LAYER M1 ;\n";
        assert_eq!(apply(src), src);
    }
}
