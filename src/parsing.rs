use crate::{Declaration, DeclarationTable, ParseCtx, ParseError, ParsedResult, Parser};
use std::fmt::{Display, Formatter};
use std::rc::Rc;

impl Parser {
    /// Create a parser from a set of declarations.
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self {
            declarations: Rc::new(DeclarationTable::with_declarations(declarations)),
        }
    }

    /// Evaluate the named entry rule against `text` from the start.
    ///
    /// A soft mismatch comes back as an unmatched [AstResult](crate::AstResult);
    /// hard failures surface as [ParseError]s.
    pub fn parse(&self, rule: &str, text: &str) -> ParsedResult {
        let mut ctx = ParseCtx::new(text, Rc::clone(&self.declarations));
        match self.declarations.get(rule) {
            Some(decl) => decl.evaluate(&mut ctx),
            None => Err(ParseError::new(
                ctx.position(),
                format!("Undefined rule \"{}\"", rule),
            )),
        }
    }

    /// The shared declaration table backing this parser.
    pub fn declarations(&self) -> Rc<DeclarationTable> {
        Rc::clone(&self.declarations)
    }
}

impl Display for Parser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, decl) in self.declarations.iter().enumerate() {
            if index != 0 {
                writeln!(f)?;
            }
            write!(f, "{}", decl)?;
        }
        Ok(())
    }
}
