//! bnf_pt is a library to compile a BNF-style grammar into a recursive descent
//! top-down parser and parse languages or text into an Abstract Syntax Tree ([AST](AstNode)).
//!
//! # Overview
//! Hand-writing a parser for every small language, configuration format or DSL quickly
//! becomes a maintenance burden. This library instead takes the grammar itself as input:
//! a set of declarations written in a compact PEG-flavored BNF surface language is
//! compiled at runtime by the [GrammarCompiler] into a tree of [production](crate::production::Production)
//! rules, and the resulting [Parser] evaluates that tree against target text to build an AST.
//!
//! The production engine is a backtracking recursive descent evaluator. Every rule that
//! may fail is evaluated on a clone of the [input context](ParseCtx); a success commits the
//! clone back with [update](ParseCtx::update), a failure leaves the caller's context
//! untouched. Ordered choice tries alternatives left to right and the first match wins.
//!
//! The compiler bootstraps itself: the BNF meta-grammar is a hand-built production tree
//! evaluated by the same engine, and the AST it produces is translated into the
//! declarations of the user's parser.
//!
//! # Grammar surface
//! - `rule := ...` or `rule ::= ...` declares a rule. `<rule>` declares an unreported
//!   rule (it participates in recognition but emits no AST node); `>rule<` declares an
//!   expanded rule (its children are spliced into the parent without a wrapping node).
//! - `,` sequences terms, `/` separates ordered alternatives and binds tighter than `,`.
//! - Suffixes `?`, `*`, `+` mark occurrence; prefix `?` is a non-consuming lookahead and
//!   prefix `-` negates a term.
//! - `'...'`/`"..."` are literals (prefix `c` keeps escape sequences uninterpreted),
//!   `[...]` is a character class, `(...)` groups without emitting a node.
//! - `!` or `! "message"` inside a sequence turns every following mismatch of that
//!   sequence into a hard, positioned [ParseError].
//! - A hash sign starts a comment running to the end of the line.
//!
//! # Example
//! ```
//! use bnf_pt::GrammarCompiler;
//!
//! let grammar = r"
//!     main     := ts, greeting, ts
//!     greeting := 'hello' / 'world'
//!     <ts>     := [ \t\r\n]*
//! ";
//!
//! let parser = GrammarCompiler::new().compile(grammar).unwrap();
//!
//! let result = parser.parse("main", "  hello ").unwrap();
//! assert!(result.is_matched());
//!
//! let main = &result.items()[0];
//! assert_eq!(main.name, "main");
//! assert_eq!(main.children[0].name, "greeting");
//! assert_eq!(main.children[0].text, "hello");
//!
//! let soft = parser.parse("main", "goodbye").unwrap();
//! assert!(!soft.is_matched());
//! ```
//!
//! # License
//! [bnf_pt](crate) is provided under the MIT or Apache-2.0 license.

mod ast_node;
mod ast_result;
mod bnf;
mod context;
mod declaration;
mod error;
pub mod examples;
mod parsing;
mod position;
pub mod production;

pub use crate::bnf::META_GRAMMAR;
use crate::production::Production;
use once_cell::unsync::OnceCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
/// The line and column of a code point, zero based.
///
/// Positions are kept zero based internally and surfaced one based by the
/// [Display](std::fmt::Display) implementation used in diagnostics.
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Clone, PartialEq, Eq)]
/// Abstract syntax tree node of a parsed input.
pub struct AstNode {
    /// Name of the declaration that produced this node.
    pub name: String,
    /// The exact substring of the input consumed by the declaration.
    pub text: String,
    /// Where consumption began.
    pub position: Position,
    /// Child nodes, in consumption order.
    pub children: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The value produced by every production evaluation: a success flag and the
/// ordered list of AST nodes the evaluation contributed.
///
/// An unmatched result is the normal backtracking signal and never carries
/// nodes. A matched result may carry zero nodes (unreported rules), one node
/// (regular declarations) or several (expanded rules, sequences).
pub struct AstResult {
    matched: bool,
    items: Vec<AstNode>,
}

/// A result returned from production evaluation.
///
/// Soft mismatches are `Ok` values with the success flag unset; hard failures
/// raised by `on_fail` messages or [Fail](crate::production::Production::fail)
/// productions are `Err` values and propagate through every enclosing
/// combinator up to the caller.
pub type ParsedResult = Result<AstResult, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A hard, positioned parse failure that aborts the parse.
pub struct ParseError {
    pub position: Position,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An error returned when a grammar AST is structurally invalid during compilation.
pub struct SemanticError {
    pub position: Position,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An error returned from [GrammarCompiler::compile]: either the grammar text
/// did not parse, or its AST did not translate.
pub enum GrammarError {
    Parse(ParseError),
    Semantic(SemanticError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a declaration reports itself in the AST.
pub enum DeclKind {
    /// Wraps the consumed span in a node carrying the rule name.
    Regular,
    /// Participates in recognition but emits nothing.
    Unreported,
    /// Emits its children without a wrapping node.
    Expanded,
}

/// A named rule: a declaration kind paired with the production body it owns.
#[derive(Debug)]
pub struct Declaration {
    name: String,
    kind: DeclKind,
    production: Production,
}

/// The name to [Declaration] mapping a parser evaluates against.
///
/// The table is built once, preserves declaration order, and is then shared
/// read-only by every [ParseCtx] through a reference-counted handle. Adding a
/// declaration under an existing name overwrites the earlier one in place.
#[derive(Debug)]
pub struct DeclarationTable {
    entries: Vec<Declaration>,
    index: HashMap<String, usize>,
}

#[derive(Clone)]
/// The input context a production tree is evaluated against.
///
/// Carries the input text, a byte cursor with its derived line/column, and the
/// declaration table handle used to resolve rule references. Cloning produces
/// an independent mutable copy sharing text and declarations by reference;
/// the clone/[update](ParseCtx::update) pair is the entire backtracking
/// mechanism of the engine.
pub struct ParseCtx {
    text: Rc<str>,
    pos: usize,
    line: usize,
    column: usize,
    declarations: Rc<DeclarationTable>,
}

/// A parser facade pairing a [DeclarationTable] with entry-point evaluation.
#[derive(Debug)]
pub struct Parser {
    declarations: Rc<DeclarationTable>,
}

/// Compiles BNF grammar text into a [Parser].
///
/// The compiler parses the grammar with the built-in meta-grammar, walks the
/// resulting AST and emits a new declaration table. Recoverable oddities are
/// collected as [warnings](GrammarCompiler::warnings); the first structural
/// problem aborts compilation with a [GrammarError].
pub struct GrammarCompiler {
    default_fail_msg: String,
    warnings: Vec<String>,
    meta: OnceCell<Rc<DeclarationTable>>,
}
