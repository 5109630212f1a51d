use crate::{DeclarationTable, ParseCtx, Position};
use std::rc::Rc;

impl ParseCtx {
    /// Create a context at the start of `text`, resolving rule references
    /// through `declarations`.
    pub fn new(text: &str, declarations: Rc<DeclarationTable>) -> Self {
        Self {
            text: Rc::from(text),
            pos: 0,
            line: 0,
            column: 0,
            declarations,
        }
    }

    /// Whether the cursor is at or past the end of the input.
    pub fn eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Whether fewer than `n` bytes of input remain at the cursor.
    pub fn eof_at(&self, n: usize) -> bool {
        self.pos + n > self.text.len()
    }

    /// Up to `n` bytes of input at the cursor, clamped to the end of text and
    /// to a character boundary.
    pub fn peek(&self, n: usize) -> &str {
        let mut end = (self.pos + n).min(self.text.len());
        while !self.text.is_char_boundary(end) {
            end -= 1;
        }
        &self.text[self.pos..end]
    }

    /// The character at the cursor, if any.
    pub fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Advance the cursor over up to `n` bytes of whole characters, keeping
    /// line and column consistent with the consumed text.
    pub fn next(&mut self, n: usize) {
        let mut end = (self.pos + n).min(self.text.len());
        while !self.text.is_char_boundary(end) {
            end -= 1;
        }
        let text = Rc::clone(&self.text);
        for ch in text[self.pos..end].chars() {
            self.bump(ch);
        }
        self.pos = end;
    }

    /// Consume exactly one character.
    pub fn next_char(&mut self) -> Option<char> {
        let text = Rc::clone(&self.text);
        let ch = text[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        self.bump(ch);
        Some(ch)
    }

    fn bump(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// Copy every field of `other` into this context, committing a clone's
    /// progress back to its caller.
    pub fn update(&mut self, other: &ParseCtx) {
        self.text = Rc::clone(&other.text);
        self.pos = other.pos;
        self.line = other.line;
        self.column = other.column;
        self.declarations = Rc::clone(&other.declarations);
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Byte offset of the cursor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The substring between this context's cursor and `end`'s cursor.
    pub fn get_text(&self, end: &ParseCtx) -> &str {
        &self.text[self.pos..end.pos]
    }

    /// A shared handle to the declaration table.
    pub fn declarations(&self) -> Rc<DeclarationTable> {
        Rc::clone(&self.declarations)
    }
}
