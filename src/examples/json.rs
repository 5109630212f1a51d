//! A JSON grammar for the BNF surface language.
//!
//! Punctuation is recognized by plain literals and therefore emits no AST
//! nodes; the character-level string rules are unreported so a `string` node
//! stays a leaf carrying the quoted text.

use crate::{GrammarCompiler, Parser};

pub const JSON_GRAMMAR: &str = r##"# JSON, entry rule "json".

json     :=  ts, value, ts

>value<  :=  object / array / string / number / keyword

object   :=  '{', ts, (member, (ts, ',', ts, member)*)?, ts, !'Expected closing "}"', '}'

member   :=  string, ts, !'Expected ":" following object key', ':', ts,
             !'Expected a value', value

array    :=  '[', ts, (value, (ts, ',', ts, value)*)?, ts, !'Expected closing "]"', ']'

string   :=  '"', (PLAIN / ESCAPE)*, !'Expected closing quote', '"'

<PLAIN>  :=  -["\\]+
<ESCAPE> :=  '\\', !'Invalid escape sequence in string',
             (["\\/bfnrt] / ('u', HEX, HEX, HEX, HEX))
<HEX>    :=  [0-9a-fA-F]

number   :=  '-'?, ('0' / ([1-9], [0-9]*)), ('.', [0-9]+)?, ([eE], [-+]?, [0-9]+)?

keyword  :=  'true' / 'false' / 'null'

<ts>     :=  [ \t\r\n]*
"##;

/// Compile the JSON grammar into a parser with entry rule `json`.
pub fn json_grammar() -> Parser {
    GrammarCompiler::new()
        .compile(JSON_GRAMMAR)
        .expect("the JSON grammar should compile")
}
