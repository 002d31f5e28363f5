// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Header directives: `VERILOG` lines and the switch-segment markers.

use once_cell::sync::Lazy;
use regex::Regex;

static VERILOG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)(VERILOG\b[^\r\n]*)").unwrap());

static BEGIN_SWITCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/\*\s*==\s*begin\s+switch\s+unknow\s+segment\s*==\s*\*/").unwrap()
});

static END_SWITCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/\*\s*==\s*end\s+switch\s+unknow\s+segment\s*==\s*\*/").unwrap()
});

/// Comment out `VERILOG` directive lines and replace the switch-segment
/// markers with SVRF comments.
pub fn apply(input: &str) -> String {
    let text = VERILOG.replace_all(input, "$1// $2");
    let text = BEGIN_SWITCH.replace_all(&text, "// Begin SVRF section");
    END_SWITCH.replace_all(&text, "// End SVRF section").into_owned()
}
