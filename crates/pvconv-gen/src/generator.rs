// SPDX-License-Identifier: (MIT OR Apache-2.0)

use pvconv_ast::*;

use crate::config::GenConfig;
use crate::{Generated, HEADER};

/// Whether an unhandled construct was a declaration or a rule statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructKind {
    Node,
    Statement,
}

/// A construct the generator had no SVRF form for. Not an error: the output
/// gets a comment line in its place and generation continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhandledConstruct {
    pub kind: ConstructKind,
    pub tag: String,
    pub line: u32,
}

impl std::fmt::Display for UnhandledConstruct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.kind {
            ConstructKind::Node => "declaration",
            ConstructKind::Statement => "rule statement",
        };
        write!(f, "line {}: unhandled {} '{}' left as a comment", self.line, what, self.tag)
    }
}

pub struct Generator<'a> {
    output: String,
    indent: usize,
    config: &'a GenConfig,
    unhandled: Vec<UnhandledConstruct>,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GenConfig) -> Self {
        let mut output = String::new();
        if config.emit_header {
            output.push_str(HEADER);
        }
        Self {
            output,
            indent: 0,
            config,
            unhandled: Vec::new(),
        }
    }

    pub fn finish(mut self) -> Generated {
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        Generated {
            text: self.output,
            unhandled: self.unhandled,
        }
    }

    // --- Helpers ---

    fn emit(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn emit_newline(&mut self) {
        self.output.push('\n');
    }

    fn emit_indent(&mut self) {
        let spaces = self.indent * self.config.indent_width;
        for _ in 0..spaces {
            self.output.push(' ');
        }
    }

    fn emit_line(&mut self, line: &str) {
        self.emit_indent();
        self.emit(line);
        self.emit_newline();
    }

    fn record_unhandled(&mut self, kind: ConstructKind, tag: &str, line: u32) {
        let construct = UnhandledConstruct { kind, tag: tag.to_string(), line };
        tracing::warn!("{}", construct);
        self.unhandled.push(construct);
    }

    // --- Declarations ---

    /// Emit every top-level declaration in source order.
    pub fn emit_root(&mut self, root: &RootNode) {
        for node in &root.children {
            self.emit_node(node);
        }
    }

    pub fn emit_node(&mut self, node: &Node) {
        match node {
            Node::LayerDefinition(layer) => self.emit_layer(layer),
            Node::LayerOperation(op) => self.emit_operation(op),
            Node::RuleCheck(rule) => self.emit_rule(rule),
            Node::Unknown(unknown) => {
                self.emit_line(&format!("// Unhandled node type: {}", unknown.raw_kind_tag));
                self.record_unhandled(ConstructKind::Node, &unknown.raw_kind_tag, unknown.line);
            }
        }
    }

    fn emit_layer(&mut self, layer: &LayerDefinitionNode) {
        self.emit_line(&format!("LAYER {} ;", layer.name));
    }

    fn emit_operation(&mut self, op: &LayerOperationNode) {
        self.emit_line(&format!(
            "{} = {} ( {} ) ;",
            op.result_name,
            op.operator_keyword,
            op.operand_names.join(" ")
        ));
    }

    fn emit_rule(&mut self, rule: &RuleCheckNode) {
        self.emit_line(&format!("CHECK {}", rule.name));
        self.indent += 1;
        for stmt in &rule.statements {
            self.emit_statement(stmt);
        }
        self.indent -= 1;
        self.emit_line("END_CHECK");
        self.emit_newline();
    }

    // --- Statements ---

    fn emit_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Layout { layer_name, .. } => {
                self.emit_line(&format!("{} = {} ;", INTERNAL_VAR, layer_name));
            }
            Statement::Spacing { comparison_operator, threshold_value, .. } => {
                self.emit_line(&format!(
                    "SPACE ( {} ) {} {} ;",
                    INTERNAL_VAR, comparison_operator, threshold_value
                ));
            }
            Statement::Unknown { raw_kind_tag, .. } => {
                self.emit_line(&format!("// Unhandled statement type: {}", raw_kind_tag));
                self.record_unhandled(ConstructKind::Statement, raw_kind_tag, stmt.line());
            }
        }
    }
}
