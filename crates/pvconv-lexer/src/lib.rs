// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for PVS rule decks.
//!
//! Tokenizes deck source into a stream of tokens for the parser.

mod lexer;

pub use lexer::{LexError, LexResult, Lexer};
