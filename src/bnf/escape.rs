//! Decoding of literal escape sequences into Unicode scalars.

use crate::{AstNode, SemanticError};

/// The single-character escapes of the literal syntax.
pub(super) fn special_escape(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(match ch {
        '\\' => '\\',
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0C',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0B',
        '"' => '"',
        '\'' => '\'',
        _ => return None,
    })
}

/// Decode the digits of a numeric escape (`\xHH`, `\uHHHH`, `\UHHHHHHHH` in
/// base 16, `\NNN` in base 8) into the character they name.
pub(super) fn decode_scalar(node: &AstNode, radix: u32) -> Result<char, SemanticError> {
    let value = u32::from_str_radix(&node.text, radix).map_err(|_| {
        SemanticError::new(
            node.position,
            format!("Invalid escape value \"{}\"", node.text),
        )
    })?;
    char::from_u32(value).ok_or_else(|| {
        SemanticError::new(
            node.position,
            format!("Escape value \"{}\" is not a valid character", node.text),
        )
    })
}
