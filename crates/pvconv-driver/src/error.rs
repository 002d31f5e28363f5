// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Job failure kinds, one per stage.

use std::io;
use std::path::PathBuf;

use pvconv_lexer::LexError;
use pvconv_parser::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Cannot read PVS file {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to tokenize PVS file {} ({})", path.display(), count(errors.len()))]
    Tokenize { path: PathBuf, errors: Vec<LexError> },

    #[error("Failed to parse PVS tokens from {} ({})", path.display(), count(errors.len()))]
    Parse { path: PathBuf, errors: Vec<ParseError> },

    #[error("Cannot create SVRF file {}: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed writing SVRF file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("INCLUDE nested deeper than {limit} files at {}", path.display())]
    IncludeDepth { path: PathBuf, limit: usize },
}

impl ConvertError {
    /// Stage name for status output.
    pub fn stage(&self) -> &'static str {
        match self {
            ConvertError::ReadInput { .. } => "read",
            ConvertError::Tokenize { .. } | ConvertError::IncludeDepth { .. } => "tokenize",
            ConvertError::Parse { .. } => "parse",
            ConvertError::OutputOpen { .. } => "open output",
            ConvertError::OutputWrite { .. } => "write output",
        }
    }

    /// One line per underlying lex or parse error, hint included.
    pub fn details(&self) -> Vec<String> {
        match self {
            ConvertError::Tokenize { errors, .. } => errors
                .iter()
                .map(|e| detail_line(&e.to_string(), e.hint.as_deref()))
                .collect(),
            ConvertError::Parse { errors, .. } => errors
                .iter()
                .map(|e| detail_line(&e.to_string(), e.hint.as_deref()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn detail_line(message: &str, hint: Option<&str>) -> String {
    match hint {
        Some(hint) => format!("{} (hint: {})", message, hint),
        None => message.to_string(),
    }
}

fn count(n: usize) -> String {
    if n == 1 {
        "1 error".to_string()
    } else {
        format!("{} errors", n)
    }
}
