//! The grammar compiler: walks the AST the meta-grammar produced over grammar
//! text and emits the declaration table of the user's parser.

mod escape;
pub(crate) mod meta;

#[cfg(test)]
mod __tests__;

use crate::production::Production;
use crate::{
    AstNode, DeclKind, Declaration, DeclarationTable, GrammarCompiler, GrammarError, ParseCtx,
    Parser, SemanticError,
};
use once_cell::unsync::OnceCell;
use std::rc::Rc;

pub use meta::META_GRAMMAR;

impl GrammarCompiler {
    pub fn new() -> Self {
        Self {
            default_fail_msg: "Syntax Error".to_string(),
            warnings: Vec::new(),
            meta: OnceCell::new(),
        }
    }

    /// Compile BNF grammar text into a [Parser].
    ///
    /// The text is parsed with the built-in meta-grammar and the resulting
    /// AST is translated declaration by declaration. Recoverable oddities
    /// (no declarations, duplicate rule names) are recorded as
    /// [warnings](GrammarCompiler::warnings).
    pub fn compile(&mut self, grammar_text: &str) -> Result<Parser, GrammarError> {
        self.warnings.clear();
        let table = self.meta_table();
        let mut ctx = ParseCtx::new(grammar_text, Rc::clone(&table));
        let entry = table
            .get("declaration_set")
            .expect("the meta grammar declares declaration_set");
        let result = entry.evaluate(&mut ctx)?;

        let items = result.into_items();
        let root = match items.first() {
            Some(node) => node,
            None => {
                self.warnings.push("No declarations found".to_string());
                return Ok(Parser::new(Vec::new()));
            }
        };
        if root.name != "declaration_set" {
            return Err(self.error(root, "Expected declaration set".to_string()).into());
        }
        let declarations = self.declaration_set(root)?;
        Ok(Parser::new(declarations))
    }

    /// Warnings collected by the last [compile](GrammarCompiler::compile) call.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The meta-grammar declaration table, built once per compiler.
    fn meta_table(&self) -> Rc<DeclarationTable> {
        Rc::clone(self.meta.get_or_init(|| {
            Rc::new(DeclarationTable::with_declarations(
                meta::meta_declarations(),
            ))
        }))
    }

    fn error(&self, node: &AstNode, message: String) -> SemanticError {
        SemanticError::new(node.position, message)
    }

    fn warn(&mut self, node: &AstNode, message: String) {
        self.warnings.push(format!("{}: {}", node.position, message));
    }

    fn declaration_set(&mut self, node: &AstNode) -> Result<Vec<Declaration>, SemanticError> {
        let mut declarations: Vec<Declaration> = Vec::new();
        for child in &node.children {
            let decl = self.declaration(child)?;
            if declarations.iter().any(|d| d.name() == decl.name()) {
                self.warn(
                    child,
                    format!("Rule \"{}\" is declared more than once", decl.name()),
                );
            }
            declarations.push(decl);
        }
        Ok(declarations)
    }

    fn declaration(&mut self, node: &AstNode) -> Result<Declaration, SemanticError> {
        // The first child picks the declaration kind and carries the name.
        let head = node
            .children
            .first()
            .ok_or_else(|| self.error(node, "Empty declaration".to_string()))?;
        let (kind, name) = match head.name.as_str() {
            "name" => (DeclKind::Regular, head.text.clone()),
            "unreportedname" | "expandedname" => {
                let kind = if head.name == "unreportedname" {
                    DeclKind::Unreported
                } else {
                    DeclKind::Expanded
                };
                let inner = head
                    .get_child("name")
                    .ok_or_else(|| self.error(head, "Missing rule name".to_string()))?;
                (kind, inner.text.clone())
            }
            _ => {
                return Err(self.error(
                    head,
                    format!("Unrecognized rule name variant \"{}\"", head.name),
                ))
            }
        };

        let body = node
            .find_tree(&|n| n.name == "seq_group")
            .ok_or_else(|| self.error(node, format!("Missing rule body for \"{}\"", name)))?;
        let production = self.seq_group(body)?;
        Ok(Declaration::new(&name, kind, production))
    }

    /// An `error_on_fail` marker applies its message to every following
    /// production of the same sequence until another marker replaces it.
    fn seq_group(&mut self, node: &AstNode) -> Result<Production, SemanticError> {
        let mut productions: Vec<Production> = Vec::new();
        let mut error_msg: Option<String> = None;
        for child in &node.children {
            if child.name == "error_on_fail" {
                error_msg = Some(self.error_on_fail_value(child)?);
            } else {
                let mut production = self.group_production(child)?;
                if let Some(message) = &error_msg {
                    production = production.on_fail(message);
                }
                productions.push(production);
            }
        }
        if productions.len() == 1 {
            Ok(productions.swap_remove(0))
        } else {
            Ok(Production::sequence(productions))
        }
    }

    fn fo_group(&mut self, node: &AstNode) -> Result<Production, SemanticError> {
        // Only element_token children occur here; the grammar never nests one
        // fo_group directly inside another.
        let mut productions = Vec::new();
        for child in &node.children {
            if child.name == "element_token" {
                productions.push(self.element_token(child)?);
            }
        }
        Ok(Production::or_group(productions))
    }

    fn group_production(&mut self, node: &AstNode) -> Result<Production, SemanticError> {
        match node.name.as_str() {
            "seq_group" => self.seq_group(node),
            "fo_group" => self.fo_group(node),
            "element_token" => self.element_token(node),
            _ => Err(self.error(
                node,
                format!("Unexpected grammar element \"{}\"", node.name),
            )),
        }
    }

    fn element_token(&mut self, node: &AstNode) -> Result<Production, SemanticError> {
        let mut lookahead = false;
        let mut negate = false;
        let mut occurrence: Option<char> = None;
        let mut error_msg: Option<String> = None;
        let mut production: Option<Production> = None;

        for child in &node.children {
            match child.name.as_str() {
                "lookahead_indicator" => lookahead = true,
                "neg_indicator" => negate = true,
                "occurrence_indicator" => occurrence = child.text.chars().next(),
                "error_on_fail" => error_msg = Some(self.error_on_fail_value(child)?),
                _ => production = Some(self.element_production(child)?),
            }
        }

        let base = production
            .ok_or_else(|| self.error(node, "Element has no production".to_string()))?;

        // Negation combined with an occurrence suffix selects the dedicated
        // until-scanners; alone, each flag wraps the base production.
        let mut production = match (negate, occurrence) {
            (true, Some('?')) => Production::optional(Production::negate(base)),
            (true, Some('+')) => Production::one_or_more_until(base),
            (true, Some('*')) => Production::zero_or_more_until(base),
            (true, None) => Production::negate(base),
            (false, Some('?')) => Production::optional(base),
            (false, Some('+')) => Production::one_or_more(base),
            (false, Some('*')) => Production::zero_or_more(base),
            (false, None) => base,
            (_, Some(other)) => {
                return Err(self.error(
                    node,
                    format!("Unsupported occurrence indicator \"{}\"", other),
                ))
            }
        };
        if lookahead {
            production = Production::lookahead(production);
        }
        if let Some(message) = error_msg {
            production = production.on_fail(&message);
        }
        Ok(production)
    }

    fn element_production(&mut self, node: &AstNode) -> Result<Production, SemanticError> {
        match node.name.as_str() {
            "literal" => self.literal(node),
            "range" => self.range(node),
            "name" => Ok(Production::decl_ref(node.text.trim())),
            "seq_group" => self.seq_group(node),
            "fo_group" => self.fo_group(node),
            _ => Err(self.error(
                node,
                format!("Unexpected grammar element \"{}\"", node.name),
            )),
        }
    }

    fn literal(&mut self, node: &AstNode) -> Result<Production, SemanticError> {
        // The `c` decorator keeps escape sequences uninterpreted.
        let convert_escapes = node.get_child("literalDecorator").is_none();
        Ok(Production::literal(
            &self.literal_value(node, convert_escapes)?,
        ))
    }

    /// Walk a literal's AST, gathering the character stream in order.
    fn literal_value(&self, node: &AstNode, convert_escapes: bool) -> Result<String, SemanticError> {
        let mut value = String::new();
        for child in &node.children {
            match child.name.as_str() {
                "CHAR" | "CHAR_NO_SNGLQUOTE" | "CHAR_NO_DBLQUOTE" => value.push_str(&child.text),
                "ESCAPED_CHAR" if !convert_escapes => value.push_str(&child.text),
                "SPECIAL_ESCAPED_CHAR" if convert_escapes => {
                    match escape::special_escape(&child.text) {
                        Some(ch) => value.push(ch),
                        None => {
                            return Err(self.error(
                                child,
                                format!("Unknown escape sequence \"\\{}\"", child.text),
                            ))
                        }
                    }
                }
                "HEX_ESCAPED_CHAR" | "UNICODE_ESCAPED_CHAR_16" | "UNICODE_ESCAPED_CHAR_32"
                    if convert_escapes =>
                {
                    value.push(escape::decode_scalar(child, 16)?)
                }
                "OCTAL_ESCAPED_CHAR" if convert_escapes => {
                    value.push(escape::decode_scalar(child, 8)?)
                }
                _ => value.push_str(&self.literal_value(child, convert_escapes)?),
            }
        }
        Ok(value)
    }

    fn error_on_fail_value(&self, node: &AstNode) -> Result<String, SemanticError> {
        let mut message = String::new();
        for child in &node.children {
            message.push_str(&self.literal_value(child, true)?);
        }
        if message.is_empty() {
            Ok(self.default_fail_msg.clone())
        } else {
            Ok(message)
        }
    }

    fn range(&mut self, node: &AstNode) -> Result<Production, SemanticError> {
        let mut productions: Vec<Production> = Vec::new();
        let mut explicit_chars = String::new();

        for child in &node.children {
            if child.name == "CHARRANGE" {
                let (start, end) = match (child.children.first(), child.children.get(1)) {
                    (Some(lo), Some(hi)) => (self.class_char(lo)?, self.class_char(hi)?),
                    _ => return Err(self.error(child, "Malformed character range".to_string())),
                };
                productions.push(Production::char_range(start, end));
            } else {
                explicit_chars.push(self.class_char(child)?);
            }
        }

        // One plain character becomes a Literal, several become a OneOf, and
        // mixed classes are promoted to an OrGroup.
        match explicit_chars.chars().count() {
            0 => {}
            1 => productions.push(Production::literal(&explicit_chars)),
            _ => productions.push(Production::one_of(&explicit_chars)),
        }
        if productions.len() == 1 {
            Ok(productions.swap_remove(0))
        } else {
            Ok(Production::or_group(productions))
        }
    }

    /// A single character of a character class, escape-decoded where needed.
    fn class_char(&self, node: &AstNode) -> Result<char, SemanticError> {
        let value = if node.name == "ESCAPED_CHAR" {
            self.literal_value(node, true)?
        } else {
            node.text.clone()
        };
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(self.error(
                node,
                format!("Expected a single character, found \"{}\"", value),
            )),
        }
    }
}

impl Default for GrammarCompiler {
    fn default() -> Self {
        GrammarCompiler::new()
    }
}
