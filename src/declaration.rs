use crate::production::Production;
use crate::{AstNode, AstResult, DeclKind, Declaration, DeclarationTable, ParseCtx, ParsedResult};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

impl Declaration {
    pub fn new(name: &str, kind: DeclKind, production: Production) -> Self {
        Self {
            name: name.to_string(),
            kind,
            production,
        }
    }

    /// A rule that wraps its consumed span in an AST node.
    pub fn regular(name: &str, production: Production) -> Self {
        Declaration::new(name, DeclKind::Regular, production)
    }

    /// A rule that participates in recognition but emits nothing.
    pub fn unreported(name: &str, production: Production) -> Self {
        Declaration::new(name, DeclKind::Unreported, production)
    }

    /// A rule whose children are spliced into the parent without a wrapping node.
    pub fn expanded(name: &str, production: Production) -> Self {
        Declaration::new(name, DeclKind::Expanded, production)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DeclKind {
        self.kind
    }

    /// Evaluate the rule body and report it according to the declaration kind.
    pub fn evaluate(&self, ctx: &mut ParseCtx) -> ParsedResult {
        match self.kind {
            DeclKind::Regular => {
                let mut eval_ctx = ctx.clone();
                let result = self.production.evaluate(&mut eval_ctx)?;
                if !result.is_matched() {
                    return Ok(AstResult::unmatched());
                }
                let node = AstNode::new(
                    self.name.clone(),
                    ctx.get_text(&eval_ctx).to_string(),
                    ctx.position(),
                    result.into_items(),
                );
                ctx.update(&eval_ctx);
                Ok(AstResult::tree(node))
            }
            DeclKind::Unreported => {
                // The body commits its own consumption; only the nodes are dropped.
                let result = self.production.evaluate(ctx)?;
                if result.is_matched() {
                    Ok(AstResult::matched())
                } else {
                    Ok(AstResult::unmatched())
                }
            }
            DeclKind::Expanded => self.production.evaluate(ctx),
        }
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let ctor = match self.kind {
            DeclKind::Regular => "Decl",
            DeclKind::Unreported => "UnreportedDecl",
            DeclKind::Expanded => "ExpandedDecl",
        };
        write!(f, "{}(\"{}\", {})", ctor, self.name, self.production)
    }
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_declarations(declarations: Vec<Declaration>) -> Self {
        let mut table = DeclarationTable::new();
        for decl in declarations {
            table.add(decl);
        }
        table
    }

    /// Add a declaration, overwriting any earlier one with the same name.
    pub fn add(&mut self, decl: Declaration) {
        match self.index.get(decl.name()) {
            Some(slot) => self.entries[*slot] = decl,
            None => {
                self.index.insert(decl.name().to_string(), self.entries.len());
                self.entries.push(decl);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.index.get(name).map(|slot| &self.entries[*slot])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declarations in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }
}

impl Default for DeclarationTable {
    fn default() -> Self {
        DeclarationTable::new()
    }
}
