use crate::{GrammarError, ParseError, Position, SemanticError};
use std::fmt::{Display, Formatter};

impl ParseError {
    pub fn new(position: Position, message: String) -> Self {
        Self { position, message }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

impl SemanticError {
    pub fn new(position: Position, message: String) -> Self {
        Self { position, message }
    }
}

impl Display for SemanticError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

impl From<ParseError> for GrammarError {
    fn from(err: ParseError) -> Self {
        GrammarError::Parse(err)
    }
}

impl From<SemanticError> for GrammarError {
    fn from(err: SemanticError) -> Self {
        GrammarError::Semantic(err)
    }
}

impl GrammarError {
    pub fn is_parse(&self) -> bool {
        match self {
            GrammarError::Parse(_) => true,
            GrammarError::Semantic(_) => false,
        }
    }
    pub fn is_semantic(&self) -> bool {
        !self.is_parse()
    }
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::Parse(err) => write!(f, "SyntaxError: {}", err),
            GrammarError::Semantic(err) => write!(f, "SemanticError: {}", err),
        }
    }
}
