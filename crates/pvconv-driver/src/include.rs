// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tokenizing a deck together with the decks it includes.
//!
//! A top-level `INCLUDE "path" ;` is replaced by the tokens of the named
//! file, resolved against the including file's directory. Every file is
//! numbered after the lines of all files tokenized before it in the job, so
//! token lines are unique across the expanded stream. Spans stay relative
//! to each token's own file.

use std::path::{Path, PathBuf};

use pvconv_ast::token::{Token, TokenKind};
use pvconv_ast::LineMap;
use pvconv_lexer::Lexer;

use crate::ConvertError;

/// How many files deep `INCLUDE` may nest. A deck that includes itself
/// stops here too.
pub const MAX_INCLUDE_DEPTH: usize = 32;

/// The last global line handed out so far in a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounter {
    last: u32,
}

impl LineCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    pub fn advance(&mut self, lines: u32) {
        self.last += lines;
    }

    pub fn reset(&mut self) {
        self.last = 0;
    }
}

pub(crate) struct IncludeExpander<'a> {
    lines: &'a mut LineCounter,
    files: usize,
}

impl<'a> IncludeExpander<'a> {
    pub(crate) fn new(lines: &'a mut LineCounter) -> Self {
        Self { lines, files: 0 }
    }

    /// Number of files read so far, the root deck included.
    pub(crate) fn files(&self) -> usize {
        self.files
    }

    /// Tokenize `path` and everything it includes. The returned stream has
    /// no `Eof` token.
    pub(crate) fn tokenize(&mut self, path: &Path) -> Result<Vec<Token>, ConvertError> {
        self.tokenize_at(path, 0)
    }

    fn tokenize_at(&mut self, path: &Path, depth: usize) -> Result<Vec<Token>, ConvertError> {
        if depth >= MAX_INCLUDE_DEPTH {
            return Err(ConvertError::IncludeDepth {
                path: path.to_path_buf(),
                limit: MAX_INCLUDE_DEPTH,
            });
        }

        let source = std::fs::read_to_string(path).map_err(|source| ConvertError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        self.files += 1;

        let offset = self.lines.last();
        let lexed = Lexer::new(&source).with_line_offset(offset).tokenize();
        if !lexed.is_ok() {
            return Err(ConvertError::Tokenize { path: path.to_path_buf(), errors: lexed.errors });
        }
        self.lines.advance(LineMap::new(&source).line_count(&source));
        tracing::debug!(
            file = %path.display(),
            depth,
            first_line = offset + 1,
            last_line = self.lines.last(),
            "tokenized deck file"
        );

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let mut tokens = lexed.tokens;
        tokens.retain(|t| t.kind != TokenKind::Eof);

        let mut out = Vec::with_capacity(tokens.len());
        let mut nesting = 0usize;
        let mut i = 0;
        while i < tokens.len() {
            match tokens[i].kind {
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => nesting += 1,
                TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => {
                    nesting = nesting.saturating_sub(1)
                }
                _ => {}
            }
            if nesting == 0 {
                if let Some((target, consumed)) = include_at(&tokens, i) {
                    let resolved = resolve(base, target);
                    out.extend(self.tokenize_at(&resolved, depth + 1)?);
                    i += consumed;
                    continue;
                }
            }
            out.push(tokens[i].clone());
            i += 1;
        }
        Ok(out)
    }
}

/// `INCLUDE "path"` with an optional `;`, starting at `i`. Returns the path
/// and how many tokens the directive spans.
fn include_at(tokens: &[Token], i: usize) -> Option<(&str, usize)> {
    if !tokens[i].is_ident("INCLUDE") {
        return None;
    }
    let target = tokens.get(i + 1).filter(|t| t.kind == TokenKind::String)?;
    let semi = tokens.get(i + 2).is_some_and(|t| t.kind == TokenKind::Semi);
    Some((target.lexeme.as_str(), if semi { 3 } else { 2 }))
}

fn resolve(base: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        base.join(target)
    }
}
