// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Syntax tree types for PVS rule decks.
//!
//! This crate defines the tokens and AST nodes shared between the lexer,
//! parser, and the SVRF generator.

pub mod span;
pub mod token;
pub mod node;
pub mod stmt;

pub use span::{LineMap, Span};
pub use node::{LayerDefinitionNode, LayerOperationNode, Node, RootNode, RuleCheckNode, UnknownNode};
pub use stmt::{Statement, INTERNAL_VAR};
