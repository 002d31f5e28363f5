// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rule blocks: `RULE name { ... }` to `CHECK name ... END_CHECK`, then the
//! statements inside every check body.

use once_cell::sync::Lazy;
use pvconv_ast::INTERNAL_VAR;
use regex::{Captures, Regex};

// Body is everything up to the first closing brace.
static RULE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bRULE\s+(\w+)\s*\{([^}]*)\}").unwrap());

static CHECK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(\bCHECK\s+\w+)(.*?)(\bEND_CHECK\b)").unwrap());

static LAYOUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bLAYOUT\s+(\w+)\s*;").unwrap());

static SPACING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bSPACING\s*(<=|>=|==|<|>)\s*([0-9]+\.?[0-9]*|\.[0-9]+)\s*;").unwrap()
});

/// Wrap rule blocks as checks, then rewrite `LAYOUT`/`SPACING` statements
/// inside check bodies. Text outside checks is left alone.
pub fn apply(input: &str) -> String {
    let wrapped = RULE_BLOCK.replace_all(input, |caps: &Captures| {
        let body = caps[2].trim();
        if body.is_empty() {
            format!("CHECK {}\nEND_CHECK", &caps[1])
        } else {
            format!("CHECK {}\n{}\nEND_CHECK", &caps[1], body)
        }
    });
    CHECK_BLOCK
        .replace_all(&wrapped, |caps: &Captures| {
            format!("{}{}{}", &caps[1], rewrite_statements(&caps[2]), &caps[3])
        })
        .into_owned()
}

fn rewrite_statements(body: &str) -> String {
    let text = LAYOUT.replace_all(body, format!("{} = $1 ;", INTERNAL_VAR).as_str());
    SPACING
        .replace_all(&text, format!("SPACE ( {} ) $1 $2 ;", INTERNAL_VAR).as_str())
        .into_owned()
}
