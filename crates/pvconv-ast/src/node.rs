// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Top-level declaration nodes.

use crate::stmt::Statement;

/// The parsed deck. Owns every node for the lifetime of one conversion job.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RootNode {
    /// Declarations in source order.
    pub children: Vec<Node>,
}

impl RootNode {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum Node {
    /// `LAYER M1 ;` or `layer ( M1 ; )`
    LayerDefinition(LayerDefinitionNode),
    /// `OPERATION AND R1 M1 M2 ;`
    LayerOperation(LayerOperationNode),
    /// `RULE SP1 { ... }`
    RuleCheck(RuleCheckNode),
    /// Anything else; kept so the generator can leave a marker in the output.
    Unknown(UnknownNode),
}

impl Node {
    /// Source line the declaration starts on.
    pub fn line(&self) -> u32 {
        match self {
            Node::LayerDefinition(n) => n.line,
            Node::LayerOperation(n) => n.line,
            Node::RuleCheck(n) => n.line,
            Node::Unknown(n) => n.line,
        }
    }

    /// Short name of the variant, for logs and diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::LayerDefinition(_) => "layer definition",
            Node::LayerOperation(_) => "layer operation",
            Node::RuleCheck(_) => "rule check",
            Node::Unknown(n) => &n.raw_kind_tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayerDefinitionNode {
    pub name: String,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayerOperationNode {
    pub result_name: String,
    /// Operator as written in the deck (`AND`, `OR`, `NOT`, ...).
    pub operator_keyword: String,
    /// At least two operands, in source order.
    pub operand_names: Vec<String>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RuleCheckNode {
    pub name: String,
    pub statements: Vec<Statement>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnknownNode {
    /// Leading keyword of the construct the parser did not recognize.
    pub raw_kind_tag: String,
    pub line: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_node_reports_its_tag() {
        let node = Node::Unknown(UnknownNode { raw_kind_tag: "VERILOG".to_string(), line: 4 });
        assert_eq!(node.kind_name(), "VERILOG");
        assert_eq!(node.line(), 4);
    }

    #[test]
    fn rule_statements_keep_lines() {
        let rule = RuleCheckNode {
            name: "SP1".to_string(),
            statements: vec![
                Statement::Layout { layer_name: "M1".to_string(), line: 2 },
                Statement::Unknown { raw_kind_tag: "WIDTH".to_string(), line: 3 },
            ],
            line: 1,
        };
        let lines: Vec<u32> = rule.statements.iter().map(Statement::line).collect();
        assert_eq!(lines, vec![2, 3]);
        assert_eq!(Node::RuleCheck(rule).kind_name(), "rule check");
    }
}
