//! The production engine: the closed family of grammar rules and their
//! evaluation contract.
//!
//! A [Production] is one variant of a closed sum — terminals such as
//! [literal](Production::literal) and [char_range](Production::char_range),
//! combinators such as [sequence](Production::sequence) and
//! [or_group](Production::or_group), repetitions, lookahead and negation, and
//! by-name [references](Production::decl_ref) into the declaration table of
//! the evaluating [ParseCtx]. Every variant implements a single contract:
//! [evaluate](Production::evaluate) against a context returns an
//! [AstResult](crate::AstResult) whose success flag drives backtracking.
//!
//! Attaching a message with [on_fail](Production::on_fail) turns a local
//! mismatch of that production into a hard [ParseError] that bypasses all
//! enclosing alternatives.

mod display;
mod eval;


use crate::{ParseCtx, ParseError, ParsedResult};

/// A grammar rule unit: one variant of the closed production family plus an
/// optional hard-failure message.
pub struct Production {
    kind: ProductionKind,
    on_fail_msg: Option<String>,
}

enum ProductionKind {
    /// Matches only at end of input; never consumes.
    Eof,
    /// Consumes any single character; fails at end of input.
    Any,
    /// Matches an exact string.
    Literal(String),
    /// Matches one character out of a set.
    OneOf(String),
    /// Matches one character in an inclusive range.
    CharRange(char, char),
    /// Succeeds consuming one character where the inner production fails.
    Negate(Box<Production>),
    /// Matches the inner production or nothing.
    Optional(Box<Production>),
    /// Zero-width test of the inner production.
    Lookahead(Box<Production>),
    /// All items in order, on one shared clone.
    Sequence(Vec<Production>),
    /// Ordered choice; the first matching alternative wins.
    OrGroup(Vec<Production>),
    OneOrMore(Box<Production>),
    ZeroOrMore(Box<Production>),
    /// Consumes characters until the terminator matches, at least one.
    OneOrMoreUntil(Box<Production>),
    /// Consumes characters until the terminator matches, possibly none.
    ZeroOrMoreUntil(Box<Production>),
    /// By-name reference resolved through the context's declaration table.
    DeclRef(String),
    /// Unconditional hard failure.
    Fail(String),
    /// Transparent wrapper logging evaluation outcomes in debug builds.
    Trace(String, Box<Production>),
}

impl Production {
    fn from_kind(kind: ProductionKind) -> Self {
        Self {
            kind,
            on_fail_msg: None,
        }
    }

    pub fn eof() -> Self {
        Production::from_kind(ProductionKind::Eof)
    }

    pub fn any() -> Self {
        Production::from_kind(ProductionKind::Any)
    }

    pub fn literal(text: &str) -> Self {
        Production::from_kind(ProductionKind::Literal(text.to_string()))
    }

    pub fn one_of(chars: &str) -> Self {
        Production::from_kind(ProductionKind::OneOf(chars.to_string()))
    }

    pub fn char_range(start: char, end: char) -> Self {
        Production::from_kind(ProductionKind::CharRange(start, end))
    }

    pub fn negate(item: Production) -> Self {
        Production::from_kind(ProductionKind::Negate(Box::new(item)))
    }

    pub fn optional(item: Production) -> Self {
        Production::from_kind(ProductionKind::Optional(Box::new(item)))
    }

    pub fn lookahead(item: Production) -> Self {
        Production::from_kind(ProductionKind::Lookahead(Box::new(item)))
    }

    pub fn sequence(items: Vec<Production>) -> Self {
        Production::from_kind(ProductionKind::Sequence(items))
    }

    pub fn or_group(items: Vec<Production>) -> Self {
        Production::from_kind(ProductionKind::OrGroup(items))
    }

    pub fn one_or_more(item: Production) -> Self {
        Production::from_kind(ProductionKind::OneOrMore(Box::new(item)))
    }

    pub fn zero_or_more(item: Production) -> Self {
        Production::from_kind(ProductionKind::ZeroOrMore(Box::new(item)))
    }

    pub fn one_or_more_until(term: Production) -> Self {
        Production::from_kind(ProductionKind::OneOrMoreUntil(Box::new(term)))
    }

    pub fn zero_or_more_until(term: Production) -> Self {
        Production::from_kind(ProductionKind::ZeroOrMoreUntil(Box::new(term)))
    }

    pub fn decl_ref(name: &str) -> Self {
        Production::from_kind(ProductionKind::DeclRef(name.to_string()))
    }

    pub fn fail(message: &str) -> Self {
        Production::from_kind(ProductionKind::Fail(message.to_string()))
    }

    pub fn trace(label: &str, item: Production) -> Self {
        Production::from_kind(ProductionKind::Trace(label.to_string(), Box::new(item)))
    }

    /// Attach a hard-failure message, turning a mismatch of this production
    /// into a positioned [ParseError].
    pub fn on_fail(mut self, message: &str) -> Self {
        self.on_fail_msg = Some(message.to_string());
        self
    }

    pub fn has_fail_msg(&self) -> bool {
        self.on_fail_msg.is_some()
    }

    /// Evaluate this production against the context.
    ///
    /// A soft mismatch leaves `ctx` untouched. When a mismatch occurs and an
    /// `on_fail` message is attached, the mismatch is raised as a hard
    /// [ParseError] at the context's current position instead.
    pub fn evaluate(&self, ctx: &mut ParseCtx) -> ParsedResult {
        let result = self.eval_kind(ctx)?;
        if !result.is_matched() {
            if let Some(message) = &self.on_fail_msg {
                return Err(ParseError::new(ctx.position(), message.clone()));
            }
        }
        Ok(result)
    }
}
