// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The parser implementation: recursive descent over the translated PVS subset.

use pvconv_ast::token::{Token, TokenKind};
use pvconv_ast::{
    LayerDefinitionNode, LayerOperationNode, Node, RootNode, RuleCheckNode, Span, Statement,
    UnknownNode,
};

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// Words that start a declaration the parser understands.
const DECL_KEYWORDS: &[&str] = &["LAYER", "layer", "OPERATION", "geom_and", "RULE"];

/// Words that start a rule statement the parser understands.
const STMT_KEYWORDS: &[&str] = &["LAYOUT", "SPACING"];

/// The parser for PVS deck tokens.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Collected errors during parsing
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
            let line = tokens.last().map(|t| t.line).unwrap_or(1);
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                line,
                span: Span::new(end, end),
            });
        }
        Self { tokens, pos: 0, errors: Vec::new() }
    }

    /// Record error, return if should continue.
    fn record_error(&mut self, error: ParseError) -> bool {
        self.errors.push(error);
        self.errors.len() < MAX_ERRORS
    }

    /// Skip to the next declaration after an error.
    fn synchronize(&mut self) {
        let mut depth = 0usize;

        while !self.at_end() {
            match self.current_kind() {
                TokenKind::LBrace | TokenKind::LParen => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::RBrace | TokenKind::RParen => {
                    self.advance();
                    if depth > 0 {
                        depth -= 1;
                        if depth == 0 {
                            self.match_token(TokenKind::Semi);
                            return;
                        }
                    }
                }
                TokenKind::Semi if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::Ident if depth == 0 && self.at_decl_keyword() => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        // `new` guarantees a trailing Eof, so the list is never empty.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    fn at_known_keyword(&self) -> bool {
        let tok = self.current();
        tok.kind == TokenKind::Ident
            && (DECL_KEYWORDS.contains(&tok.lexeme.as_str())
                || STMT_KEYWORDS.contains(&tok.lexeme.as_str())
                || tok.lexeme == "INCLUDE")
    }

    fn at_decl_keyword(&self) -> bool {
        let tok = self.current();
        tok.kind == TokenKind::Ident && DECL_KEYWORDS.contains(&tok.lexeme.as_str())
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if !self.at_end() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn check_ident(&self, word: &str) -> bool {
        self.current().is_ident(word)
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(kind.display_name(), self.current()).in_context(context))
        }
    }

    fn expect_ident(&mut self, context: &str) -> Result<String, ParseError> {
        if self.check(TokenKind::Ident) {
            Ok(self.advance().lexeme)
        } else {
            Err(ParseError::expected("a name", self.current()).in_context(context))
        }
    }

    fn expect_keyword(&mut self, word: &'static str) -> Result<Token, ParseError> {
        if self.check_ident(word) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(&format!("'{}'", word), self.current()))
        }
    }

    /// An operation operand: a layer name, or a quoted layer name whose
    /// quotes and stray ';' are dropped.
    fn expect_operand(&mut self) -> Result<String, ParseError> {
        match self.current_kind() {
            TokenKind::Ident => Ok(self.advance().lexeme),
            TokenKind::String => {
                let raw = self.advance().lexeme;
                Ok(raw.chars().filter(|c| *c != ';' && *c != '"').collect::<String>().trim().to_string())
            }
            _ => Err(ParseError::expected("an operand", self.current())),
        }
    }

    fn at_operand(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident | TokenKind::String)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Parse the whole token stream into a root node.
    pub fn parse(&mut self) -> ParseResult {
        let mut children = Vec::new();

        while !self.at_end() {
            let start = self.pos;
            match self.parse_decl() {
                Ok(node) => children.push(node),
                Err(e) => {
                    if !self.record_error(e) {
                        break;
                    }
                    if self.pos == start {
                        self.advance();
                    }
                    self.synchronize();
                }
            }
        }

        tracing::debug!(
            declarations = children.len(),
            errors = self.errors.len(),
            "parsed deck"
        );

        ParseResult {
            root: RootNode::new(children),
            errors: std::mem::take(&mut self.errors),
        }
    }

    fn parse_decl(&mut self) -> Result<Node, ParseError> {
        if !self.check(TokenKind::Ident) {
            return Err(ParseError::expected("declaration", self.current()));
        }

        match self.current().lexeme.as_str() {
            "LAYER" => self.parse_layer(),
            "layer" => self.parse_paren_layer(),
            "OPERATION" => self.parse_operation(),
            "geom_and" => self.parse_geom_and(),
            "RULE" => self.parse_rule(),
            _ => {
                let (raw_kind_tag, line) = self.skip_unknown()?;
                Ok(Node::Unknown(UnknownNode { raw_kind_tag, line }))
            }
        }
    }

    /// `LAYER <name> ;`
    fn parse_layer(&mut self) -> Result<Node, ParseError> {
        let line = self.advance().line;
        let name = self.expect_ident("after 'LAYER'")?;
        self.expect(TokenKind::Semi, "after layer name")?;
        Ok(Node::LayerDefinition(LayerDefinitionNode { name, line }))
    }

    /// `layer ( <name> ; )`
    fn parse_paren_layer(&mut self) -> Result<Node, ParseError> {
        let line = self.advance().line;
        self.expect(TokenKind::LParen, "after 'layer'")?;
        let name = self.expect_ident("in layer declaration")?;
        self.expect(TokenKind::Semi, "after layer name")?;
        self.expect(TokenKind::RParen, "to close layer declaration")?;
        self.match_token(TokenKind::Semi);
        Ok(Node::LayerDefinition(LayerDefinitionNode { name, line }))
    }

    /// `OPERATION <op> <result> <a> <b> ... ;`
    fn parse_operation(&mut self) -> Result<Node, ParseError> {
        let line = self.advance().line;
        let operator_keyword = self.expect_ident("for the operator")?;
        let result_name = self.expect_ident("for the result layer")?;

        let mut operand_names = Vec::new();
        while self.at_operand() {
            operand_names.push(self.expect_operand()?);
        }
        if operand_names.len() < 2 {
            return Err(ParseError::expected("an operand", self.current())
                .with_hint("operations take at least two operand layers"));
        }
        self.expect(TokenKind::Semi, "after operation")?;

        Ok(Node::LayerOperation(LayerOperationNode {
            result_name,
            operator_keyword,
            operand_names,
            line,
        }))
    }

    /// `geom_and ( OPERATION <result> <a> <b> ;? ) ;?`
    ///
    /// The wrapper fixes the operator to `AND`.
    fn parse_geom_and(&mut self) -> Result<Node, ParseError> {
        let line = self.advance().line;
        self.expect(TokenKind::LParen, "after 'geom_and'")?;
        self.expect_keyword("OPERATION")?;
        let result_name = self.expect_ident("for the result layer")?;
        let first = self.expect_operand()?;
        let second = self.expect_operand()?;
        self.match_token(TokenKind::Semi);
        self.expect(TokenKind::RParen, "to close 'geom_and'")?;
        self.match_token(TokenKind::Semi);

        Ok(Node::LayerOperation(LayerOperationNode {
            result_name,
            operator_keyword: "AND".to_string(),
            operand_names: vec![first, second],
            line,
        }))
    }

    /// `RULE <name> { <statement>* }`
    fn parse_rule(&mut self) -> Result<Node, ParseError> {
        let line = self.advance().line;
        let name = self.expect_ident("after 'RULE'")?;
        self.expect(TokenKind::LBrace, "to start the rule body")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) {
            if self.at_end() {
                return Err(ParseError::expected("'}'", self.current()));
            }
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace, "to close the rule body")?;
        self.match_token(TokenKind::Semi);

        Ok(Node::RuleCheck(RuleCheckNode { name, statements, line }))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if !self.check(TokenKind::Ident) {
            return Err(ParseError::expected("statement", self.current()));
        }

        match self.current().lexeme.as_str() {
            "LAYOUT" => {
                let line = self.advance().line;
                let layer_name = self.expect_ident("after 'LAYOUT'")?;
                self.expect(TokenKind::Semi, "after layout layer")?;
                Ok(Statement::Layout { layer_name, line })
            }
            "SPACING" => {
                let line = self.advance().line;
                if !self.current_kind().is_comparison() {
                    return Err(ParseError::expected("a comparison operator", self.current()));
                }
                let comparison_operator = self.advance().lexeme;
                let threshold_value = self.expect(TokenKind::Number, "for the spacing threshold")?.lexeme;
                self.expect(TokenKind::Semi, "after spacing check")?;
                Ok(Statement::Spacing { comparison_operator, threshold_value, line })
            }
            _ => {
                let (raw_kind_tag, line) = self.skip_unknown()?;
                Ok(Statement::Unknown { raw_kind_tag, line })
            }
        }
    }

    /// Consume an unrecognized construct: its leading word, then everything up
    /// to a `;` or a balanced `{ ... }` block at the same nesting level.
    ///
    /// Line-oriented directives such as `VERILOG top.v` have no `;`; they end
    /// at the end of input or where a later line starts a construct the
    /// parser knows.
    fn skip_unknown(&mut self) -> Result<(String, u32), ParseError> {
        let head = self.advance();
        let mut depth = 0usize;
        let mut last_line = head.line;

        loop {
            if depth == 0 && self.current().line > last_line && self.at_known_keyword() {
                break;
            }
            match self.current_kind() {
                TokenKind::Eof if depth > 0 => {
                    return Err(ParseError::expected("'}'", self.current())
                        .in_context(&format!("to close '{}'", head.lexeme)));
                }
                TokenKind::Eof => break,
                TokenKind::Semi if depth == 0 => {
                    self.advance();
                    break;
                }
                TokenKind::LBrace | TokenKind::LParen => {
                    depth += 1;
                    last_line = self.advance().line;
                }
                TokenKind::RBrace | TokenKind::RParen if depth == 0 => {
                    // Belongs to an enclosing block, e.g. the end of a rule body.
                    break;
                }
                TokenKind::RBrace => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        self.match_token(TokenKind::Semi);
                        break;
                    }
                }
                TokenKind::RParen => {
                    depth -= 1;
                    last_line = self.advance().line;
                }
                _ => {
                    last_line = self.advance().line;
                }
            }
        }

        Ok((head.lexeme, head.line))
    }
}

/// Result of parsing: the tree plus any errors found.
#[derive(Debug)]
pub struct ParseResult {
    pub root: RootNode,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A parser error with location and friendly message.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub span: Span,
    pub line: u32,
    pub message: String,
    pub hint: Option<String>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    fn expected(expected: &str, found: &Token) -> Self {
        let message = format_expected_message(expected, found);
        let hint = crate::hints::for_expected(expected, found.kind).map(String::from);
        Self { span: found.span, line: found.line, message, hint }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Append where the parser was when the error happened.
    fn in_context(mut self, context: &str) -> Self {
        self.message = format!("{} ({})", self.message, context);
        self
    }
}

/// Format a user-friendly "expected X, found Y" message.
fn format_expected_message(expected: &str, found: &Token) -> String {
    let found_name = match found.kind {
        TokenKind::Ident | TokenKind::Other => format!("'{}'", found.lexeme),
        other => other.display_name().to_string(),
    };
    match expected {
        "')'" if found.kind == TokenKind::Eof => "Unclosed '(' - missing ')'".to_string(),
        "'}'" if found.kind == TokenKind::Eof => "Unclosed '{' - missing '}'".to_string(),
        "declaration" => format!("Expected declaration, found {}", found_name),
        "statement" => format!("Expected rule statement, found {}", found_name),
        _ => format!("Expected {}, found {}", expected, found_name),
    }
}
