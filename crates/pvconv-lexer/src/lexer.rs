// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer implementation using logos.

use logos::{FilterResult, Logos};
use pvconv_ast::token::{Token, TokenKind};
use pvconv_ast::{LineMap, Span};

/// Raw token type for logos - lexemes are attached in a second pass.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    // === Operators (longer first) ===
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // === Comments (skipped) ===
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // === Literals ===
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    #[regex(r"\.[0-9]+")]
    Number,

    #[regex(r#""[^"\n]*""#)]
    String,

    /// A quote with no closing quote before the end of the line.
    #[regex(r#""[^"\n]*"#)]
    UnterminatedString,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    /// Any other printable character (`.`, `#`, `$`, `@`, ...). Lets
    /// directives like `VERILOG top.v` reach the parser as unknown constructs.
    #[regex(r#"[^ \t\r\n\fa-zA-Z0-9_"()\[\]{};,:<>=!+*/&|\-]"#)]
    Other,
}

/// Skip a block comment. PVS block comments do not nest.
fn block_comment(lexer: &mut logos::Lexer<RawToken>) -> FilterResult<(), ()> {
    match lexer.remainder().find("*/") {
        Some(end) => {
            lexer.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lexer.bump(lexer.remainder().len());
            FilterResult::Error(())
        }
    }
}

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// The lexer for PVS deck source.
pub struct Lexer<'a> {
    source: &'a str,
    line_offset: u32,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, line_offset: 0, errors: Vec::new() }
    }

    /// Number every token's line starting after `offset`.
    ///
    /// Used for included decks so line numbers stay unique across a job.
    pub fn with_line_offset(mut self, offset: u32) -> Self {
        self.line_offset = offset;
        self
    }

    /// Tokenize the entire source, collecting multiple errors.
    pub fn tokenize(&mut self) -> LexResult {
        let mut tokens = Vec::new();
        let line_map = LineMap::new(self.source);
        let mut logos_lexer = RawToken::lexer(self.source);

        while let Some(result) = logos_lexer.next() {
            if self.errors.len() >= MAX_ERRORS {
                break;
            }

            let span = logos_lexer.span();
            let slice = logos_lexer.slice();
            let line = self.line_offset + line_map.line_of(span.start);

            let raw = match result {
                Ok(RawToken::UnterminatedString) => {
                    self.errors.push(LexError::unterminated_string(span.start, span.end, line));
                    continue;
                }
                Ok(raw) => raw,
                Err(()) if slice.starts_with("/*") => {
                    self.errors.push(LexError::unterminated_comment(span.start, line));
                    continue;
                }
                Err(()) => {
                    let ch = slice.chars().next().unwrap_or('?');
                    self.errors.push(LexError::unexpected_char(ch, span.start, line));
                    continue;
                }
            };

            let (kind, lexeme) = convert_token(raw, slice);
            tokens.push(Token {
                kind,
                lexeme,
                line,
                span: Span::new(span.start, span.end),
            });
        }

        let eof_line = self.line_offset + line_map.line_of(self.source.len());
        tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line: eof_line,
            span: Span::new(self.source.len(), self.source.len()),
        });

        tracing::debug!(tokens = tokens.len(), errors = self.errors.len(), "tokenized deck");

        LexResult {
            tokens,
            errors: std::mem::take(&mut self.errors),
        }
    }
}

/// Convert a raw logos token to our TokenKind and its lexeme.
fn convert_token(raw: RawToken, slice: &str) -> (TokenKind, String) {
    let kind = match raw {
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semi => TokenKind::Semi,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,

        RawToken::Number => TokenKind::Number,
        RawToken::String => {
            // Remove quotes
            return (TokenKind::String, slice[1..slice.len() - 1].to_string());
        }
        RawToken::Ident => TokenKind::Ident,
        RawToken::Other => TokenKind::Other,

        // Skipped by logos or reported as errors before we get here
        RawToken::LineComment | RawToken::BlockComment | RawToken::UnterminatedString => {
            unreachable!("filtered before conversion")
        }
    };
    (kind, slice.to_string())
}

/// Result of lexing: tokens plus any errors found.
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexResult {
    /// Returns true if lexing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A lexer error with location and friendly message.
#[derive(Debug, Clone)]
pub struct LexError {
    pub span: Span,
    pub line: u32,
    pub message: String,
    pub hint: Option<String>,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for LexError {}

impl LexError {
    fn unexpected_char(ch: char, pos: usize, line: u32) -> Self {
        Self {
            span: Span::new(pos, pos + ch.len_utf8()),
            line,
            message: format!("Unexpected character '{}'", ch),
            hint: None,
        }
    }

    fn unterminated_string(start: usize, end: usize, line: u32) -> Self {
        Self {
            span: Span::new(start, end),
            line,
            message: "Unterminated string".to_string(),
            hint: Some("Add a closing '\"' on the same line".to_string()),
        }
    }

    fn unterminated_comment(pos: usize, line: u32) -> Self {
        Self {
            span: Span::new(pos, pos + 2),
            line,
            message: "Unterminated block comment".to_string(),
            hint: Some("Close the comment with '*/'".to_string()),
        }
    }
}
