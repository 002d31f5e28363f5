// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statements inside a `RULE` block.

/// Name of the intermediate layer a `LAYOUT` statement binds in SVRF.
///
/// Every layout statement in a rule binds this same name; a second one
/// shadows the first.
pub const INTERNAL_VAR: &str = "INTERNAL1";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum Statement {
    /// `LAYOUT M1 ;`
    Layout { layer_name: String, line: u32 },
    /// `SPACING > 0.5 ;`
    Spacing {
        comparison_operator: String,
        /// Threshold exactly as written in the deck.
        threshold_value: String,
        line: u32,
    },
    Unknown { raw_kind_tag: String, line: u32 },
}

impl Statement {
    pub fn line(&self) -> u32 {
        match self {
            Statement::Layout { line, .. }
            | Statement::Spacing { line, .. }
            | Statement::Unknown { line, .. } => *line,
        }
    }
}
