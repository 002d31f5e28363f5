// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions for the lexer.

use crate::Span;

/// A token produced by the lexer.
///
/// `line` is the global line: for decks pulled in through `INCLUDE` it is
/// offset by the lines of everything tokenized before it in the same job.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub span: Span,
}

impl Token {
    pub fn is_ident(&self, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.lexeme == word
    }
}

/// The kind of token.
///
/// PVS keywords are plain identifiers here; the parser decides what a word
/// means from its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    Ident,
    Number,
    /// String literal; the lexeme holds the text between the quotes.
    String,

    // Comparison operators
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    BangEq,

    Eq,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Colon,
    Minus,
    Plus,
    Star,
    Slash,
    Bang,
    Amp,
    Pipe,
    /// Any other printable character, e.g. the `.` in `top.v`. Only
    /// unrecognized constructs contain these.
    Other,

    Eof,
}

impl TokenKind {
    /// True for the operators a `SPACING` check accepts.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq | TokenKind::EqEq
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Ident => "a name",
            TokenKind::Number => "a number",
            TokenKind::String => "a string",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::Eq => "'='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Semi => "';'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Minus => "'-'",
            TokenKind::Plus => "'+'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Bang => "'!'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Other => "a symbol",
            TokenKind::Eof => "end of file",
        }
    }
}
