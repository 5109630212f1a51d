use super::{Production, ProductionKind};
use std::fmt::{Debug, Display, Formatter};

fn write_items(f: &mut Formatter<'_>, items: &[Production]) -> std::fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index != 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for ProductionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductionKind::Eof => write!(f, "Eof()"),
            ProductionKind::Any => write!(f, "Any()"),
            ProductionKind::Literal(text) => write!(f, "Literal(\"{}\")", text),
            ProductionKind::OneOf(chars) => write!(f, "OneOf(\"{}\")", chars),
            ProductionKind::CharRange(start, end) => {
                write!(f, "CharRange(\"{}\",\"{}\")", start, end)
            }
            ProductionKind::Negate(item) => write!(f, "Negate({})", item),
            ProductionKind::Optional(item) => write!(f, "Optional({})", item),
            ProductionKind::Lookahead(item) => write!(f, "Lookahead({})", item),
            ProductionKind::Sequence(items) => {
                write!(f, "Sequence(")?;
                write_items(f, items)?;
                write!(f, ")")
            }
            ProductionKind::OrGroup(items) => {
                write!(f, "OrGroup(")?;
                write_items(f, items)?;
                write!(f, ")")
            }
            ProductionKind::OneOrMore(item) => write!(f, "OneOrMore({})", item),
            ProductionKind::ZeroOrMore(item) => write!(f, "ZeroOrMore({})", item),
            ProductionKind::OneOrMoreUntil(term) => write!(f, "OneOrMoreUntil({})", term),
            ProductionKind::ZeroOrMoreUntil(term) => write!(f, "ZeroOrMoreUntil({})", term),
            ProductionKind::DeclRef(name) => write!(f, "DeclRef(\"{}\")", name),
            ProductionKind::Fail(message) => write!(f, "Fail(\"{}\")", message),
            ProductionKind::Trace(label, item) => write!(f, "Trace(\"{}\", {})", label, item),
        }
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(message) = &self.on_fail_msg {
            write!(f, ".on_fail(\"{}\")", message)?;
        }
        Ok(())
    }
}

impl Debug for Production {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}
