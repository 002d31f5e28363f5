// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use pvconv_ast::token::TokenKind;

/// Get a hint for an "expected X" error based on context.
pub fn for_expected(expected: &str, found: TokenKind) -> Option<&'static str> {
    match (expected, found) {
        // Terminators
        ("';'", TokenKind::Eof) => Some("the last statement is missing its ';'"),
        ("';'", _) => Some("PVS statements end with ';'"),

        // Blocks
        ("'{'", _) => Some("rule bodies start with '{'"),
        ("'}'", TokenKind::Eof) => Some("add '}' to close the rule block"),
        ("'('", _) => Some("syntax: layer ( NAME ; )"),
        ("')'", TokenKind::Eof) => Some("add ')' to close the parenthesis"),
        ("')'", _) => None,

        // Names
        ("a name", TokenKind::Number) => Some("names can't start with a number"),
        ("a name", _) => Some("names start with a letter or '_'"),
        ("an operand", _) => Some("operands are layer names or quoted layer names"),
        ("'OPERATION'", _) => Some("syntax: geom_and ( OPERATION RESULT A B ; )"),

        // Spacing checks
        ("a comparison operator", _) => Some("use one of <, >, <=, >=, =="),
        ("a number", _) => Some("spacing thresholds are numbers like 0.5"),

        // Declarations
        ("declaration", _) => Some("start with 'LAYER', 'OPERATION', 'RULE', or a directive name"),
        ("statement", _) => Some("rule bodies hold 'LAYOUT', 'SPACING', or other directives"),

        _ => None,
    }
}
