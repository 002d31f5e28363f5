// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for PVS rule decks.
//!
//! Transforms a token stream into a [`pvconv_ast::RootNode`].

mod hints;
mod parser;

pub use parser::{ParseError, ParseResult, Parser};

/// Lex and parse in one go. Lex errors are not reported here.
pub fn parse_source(source: &str) -> ParseResult {
    let lex_result = pvconv_lexer::Lexer::new(source).tokenize();
    Parser::new(lex_result.tokens).parse()
}
