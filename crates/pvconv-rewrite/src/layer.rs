// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Layer declarations, both spellings, to `LAYER <id> ;` on a line of its own.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// A match also consumes trailing blanks and one line break, so each
// declaration ends up on its own line and a second run changes nothing.
static KEYWORD_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bLAYER\s+(\w+)\s*;[ \t]*(\r?\n)?").unwrap());

static PAREN_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\blayer\s*\(\s*(\w+)\s*;\s*\)[ \t]*;?[ \t]*(\r?\n)?").unwrap());

/// Rewrite `LAYER id ;`, then `layer ( id ; )` on the result.
pub fn apply(input: &str) -> String {
    let text = KEYWORD_FORM.replace_all(input, canonical);
    PAREN_FORM.replace_all(&text, canonical).into_owned()
}

/// `LAYER id ;` ending with the matched line break, `\n` when there was none.
fn canonical(caps: &Captures) -> String {
    let eol = caps.get(2).map_or("\n", |m| m.as_str());
    format!("LAYER {} ;{}", &caps[1], eol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_form() {
        assert_eq!(apply("LAYER   M1;"), "LAYER M1 ;\n");
    }

    #[test]
    fn paren_form() {
        assert_eq!(apply("layer ( M2 ; )\n"), "LAYER M2 ;\n");
        assert_eq!(apply("layer(M3;);"), "LAYER M3 ;\n");
    }

    #[test]
    fn mixed_forms_keep_order_and_count() {
        let src = "LAYER A ;\nlayer ( B ; )\nLAYER C ;\nlayer ( D ; )\n";
        assert_eq!(apply(src), "LAYER A ;\nLAYER B ;\nLAYER C ;\nLAYER D ;\n");
    }

    #[test]
    fn same_line_paren_declarations_are_split() {
        assert_eq!(apply("layer ( A ; ) layer ( B ; )"), "LAYER A ;\nLAYER B ;\n");
    }

    #[test]
    fn crlf_line_endings_are_kept() {
        assert_eq!(
            apply("LAYER M1 ;\r\nPRECISION 1 ;\r\nlayer ( M2 ; )\r\n"),
            "LAYER M1 ;\r\nPRECISION 1 ;\r\nLAYER M2 ;\r\n"
        );
    }

    #[test]
    fn surrounding_text_preserved() {
        let src = "// metal\nLAYER M1 ;\nPRECISION 1000 ;\n";
        assert_eq!(apply(src), src);
    }

    #[test]
    fn lowercase_keyword_form_is_not_a_layer() {
        let src = "layer M1 ;";
        assert_eq!(apply(src), src);
    }

    #[test]
    fn idempotent() {
        let once = apply("LAYER M1;layer(M2;)");
        assert_eq!(once, "LAYER M1 ;\nLAYER M2 ;\n");
        assert_eq!(apply(&once), once);
    }
}
