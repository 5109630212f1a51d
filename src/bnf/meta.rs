//! The hand-built meta-grammar: the production tree that recognizes the BNF
//! surface language itself.
//!
//! [META_GRAMMAR] is the same grammar written in its own surface syntax.
//! Parsing that text with these declarations reproduces it node for node, and
//! compiling it yields a parser that accepts the same language again.

use crate::production::Production;
use crate::Declaration;

fn ts() -> Production {
    Production::decl_ref("ts")
}

fn hexdigit() -> Production {
    Production::decl_ref("HEXDIGIT")
}

fn term_choice() -> Production {
    Production::or_group(vec![
        Production::decl_ref("error_on_fail"),
        Production::decl_ref("fo_group"),
        Production::decl_ref("element_token"),
    ])
}

pub(super) fn meta_declarations() -> Vec<Declaration> {
    use Production as P;
    vec![
        // declaration_set      :=  declaration+
        Declaration::regular("declaration_set", P::one_or_more(P::decl_ref("declaration"))),
        // declaration          :=  ts, (unreportedname/expandedname/name), ts, (':=' / '::='), seq_group
        Declaration::regular(
            "declaration",
            P::sequence(vec![
                ts(),
                P::or_group(vec![
                    P::decl_ref("unreportedname"),
                    P::decl_ref("expandedname"),
                    P::decl_ref("name"),
                ])
                .on_fail("Expected name, <unreported>, or >expanded< declaration"),
                ts(),
                P::or_group(vec![P::literal(":="), P::literal("::=")])
                    .on_fail("Expected := or ::= operator"),
                P::decl_ref("seq_group"),
            ]),
        ),
        // element_token        :=  lookahead_indicator?, ts, neg_indicator?, ts,
        //                          (literal/range/group/name), ts, occurrence_indicator?, ts,
        //                          error_on_fail?
        Declaration::regular(
            "element_token",
            P::sequence(vec![
                P::optional(P::decl_ref("lookahead_indicator")),
                ts(),
                P::optional(P::decl_ref("neg_indicator")),
                ts(),
                P::or_group(vec![
                    P::decl_ref("literal"),
                    P::decl_ref("range"),
                    P::decl_ref("group"),
                    P::decl_ref("name"),
                ]),
                ts(),
                P::optional(P::decl_ref("occurrence_indicator")),
                ts(),
                P::optional(P::decl_ref("error_on_fail")),
            ]),
        ),
        Declaration::regular("neg_indicator", P::literal("-")),
        Declaration::regular("lookahead_indicator", P::literal("?")),
        Declaration::regular("occurrence_indicator", P::one_of("+*?")),
        // error_on_fail        :=  '!', (ts, literal)?
        Declaration::regular(
            "error_on_fail",
            P::sequence(vec![
                P::literal("!"),
                P::optional(P::sequence(vec![ts(), P::decl_ref("literal")])),
            ]),
        ),
        // >group<              :=  '(', seq_group, ')'
        Declaration::expanded(
            "group",
            P::sequence(vec![
                P::literal("("),
                P::decl_ref("seq_group"),
                P::literal(")").on_fail("Expected closing \")\""),
            ]),
        ),
        // seq_group            :=  ts, (error_on_fail/fo_group/element_token),
        //                          (ts, seq_indicator, ts, (error_on_fail/fo_group/element_token))*, ts
        Declaration::regular(
            "seq_group",
            P::sequence(vec![
                ts(),
                term_choice().on_fail("Expected one or more terms in sequence"),
                P::zero_or_more(P::sequence(vec![
                    ts(),
                    P::decl_ref("seq_indicator"),
                    ts(),
                    term_choice(),
                ])),
                ts(),
            ]),
        ),
        // fo_group             :=  element_token, (ts, fo_indicator, ts, element_token)+
        Declaration::regular(
            "fo_group",
            P::sequence(vec![
                ts(),
                P::decl_ref("element_token"),
                P::one_or_more(P::sequence(vec![
                    ts(),
                    P::decl_ref("fo_indicator"),
                    ts(),
                    P::decl_ref("element_token"),
                ])),
            ]),
        ),
        Declaration::unreported("fo_indicator", P::literal("/")),
        Declaration::unreported("seq_indicator", P::literal(",")),
        // unreportedname       :=  '<', name, '>'
        Declaration::regular(
            "unreportedname",
            P::sequence(vec![
                P::literal("<"),
                P::decl_ref("name"),
                P::literal(">").on_fail("Expected closing \">\""),
            ]),
        ),
        // expandedname         :=  '>', name, '<'
        Declaration::regular(
            "expandedname",
            P::sequence(vec![
                P::literal(">"),
                P::decl_ref("name"),
                P::literal("<").on_fail("Expected closing \"<\""),
            ]),
        ),
        // name                 :=  [a-zA-Z_], [a-zA-Z0-9_]*
        Declaration::regular(
            "name",
            P::sequence(vec![
                P::or_group(vec![
                    P::char_range('a', 'z'),
                    P::char_range('A', 'Z'),
                    P::literal("_"),
                ]),
                P::zero_or_more(P::or_group(vec![
                    P::char_range('a', 'z'),
                    P::char_range('A', 'Z'),
                    P::char_range('0', '9'),
                    P::literal("_"),
                ])),
            ]),
        ),
        // <ts>                 :=  ([ \t-\r]+ / comment)*
        Declaration::unreported(
            "ts",
            P::zero_or_more(P::or_group(vec![
                P::one_or_more(P::or_group(vec![
                    P::literal(" "),
                    P::char_range('\t', '\r'),
                ])),
                P::decl_ref("comment"),
            ])),
        ),
        // >comment<            :=  comment_start, comment_text, eol
        Declaration::expanded(
            "comment",
            P::sequence(vec![
                P::decl_ref("comment_start"),
                P::decl_ref("comment_text"),
                P::decl_ref("eol"),
            ]),
        ),
        Declaration::regular("comment_text", P::zero_or_more_until(P::decl_ref("eol"))),
        Declaration::unreported("comment_start", P::literal("#")),
        Declaration::unreported("eol", P::or_group(vec![P::literal("\n"), P::eof()])),
        // literal              :=  literalDecorator?,
        //                          ("'", (CHAR_NO_SNGLQUOTE/ESCAPED_CHAR)*, "'")
        //                          / ('"', (CHAR_NO_DBLQUOTE/ESCAPED_CHAR)*, '"')
        Declaration::regular(
            "literal",
            P::sequence(vec![
                P::optional(P::decl_ref("literalDecorator")),
                P::or_group(vec![
                    P::sequence(vec![
                        P::literal("'"),
                        P::zero_or_more(P::or_group(vec![
                            P::decl_ref("CHAR_NO_SNGLQUOTE"),
                            P::decl_ref("ESCAPED_CHAR"),
                        ])),
                        P::literal("'").on_fail("Expected closing single-quote"),
                    ]),
                    P::sequence(vec![
                        P::literal("\""),
                        P::zero_or_more(P::or_group(vec![
                            P::decl_ref("CHAR_NO_DBLQUOTE"),
                            P::decl_ref("ESCAPED_CHAR"),
                        ])),
                        P::literal("\"").on_fail("Expected closing double-quote"),
                    ]),
                ]),
            ]),
        ),
        Declaration::regular("literalDecorator", P::literal("c")),
        // range                :=  '[', CHARBRACE?, CHARDASH?, (CHARRANGE/CHARNOBRACE)*, CHARDASH?, ']'
        Declaration::regular(
            "range",
            P::sequence(vec![
                P::literal("["),
                P::optional(P::decl_ref("CHARBRACE")),
                P::optional(P::decl_ref("CHARDASH")),
                P::zero_or_more(P::or_group(vec![
                    P::decl_ref("CHARRANGE"),
                    P::decl_ref("CHARNOBRACE"),
                ])),
                P::optional(P::decl_ref("CHARDASH")),
                P::literal("]").on_fail("Expected closing \"]\""),
            ]),
        ),
        Declaration::regular("CHARBRACE", P::literal("]")),
        Declaration::regular("CHARDASH", P::literal("-")),
        // CHARRANGE            :=  CHARNOBRACE, '-', CHARNOBRACE
        Declaration::regular(
            "CHARRANGE",
            P::sequence(vec![
                P::decl_ref("CHARNOBRACE"),
                P::literal("-"),
                P::decl_ref("CHARNOBRACE"),
            ]),
        ),
        // >CHARNOBRACE<        :=  ESCAPED_CHAR / CHAR
        Declaration::expanded(
            "CHARNOBRACE",
            P::or_group(vec![P::decl_ref("ESCAPED_CHAR"), P::decl_ref("CHAR")]),
        ),
        // CHAR                 :=  -']'
        Declaration::regular("CHAR", P::negate(P::literal("]"))),
        // ESCAPED_CHAR         :=  '\', (SPECIAL_ESCAPED_CHAR / ('x', HEX_ESCAPED_CHAR)
        //                          / ('u', UNICODE_ESCAPED_CHAR_16) / ('U', UNICODE_ESCAPED_CHAR_32)
        //                          / OCTAL_ESCAPED_CHAR)
        Declaration::regular(
            "ESCAPED_CHAR",
            P::sequence(vec![
                P::literal("\\"),
                P::or_group(vec![
                    P::decl_ref("SPECIAL_ESCAPED_CHAR"),
                    P::sequence(vec![
                        P::literal("x"),
                        P::decl_ref("HEX_ESCAPED_CHAR")
                            .on_fail("Expected two hex digits following \"\\x\""),
                    ]),
                    P::sequence(vec![
                        P::literal("u"),
                        P::decl_ref("UNICODE_ESCAPED_CHAR_16")
                            .on_fail("Expected four hex digits following \"\\u\""),
                    ]),
                    P::sequence(vec![
                        P::literal("U"),
                        P::decl_ref("UNICODE_ESCAPED_CHAR_32")
                            .on_fail("Expected eight hex digits following \"\\U\""),
                    ]),
                    P::decl_ref("OCTAL_ESCAPED_CHAR"),
                    P::fail("Expected escape sequence following \"\\\""),
                ]),
            ]),
        ),
        Declaration::regular("SPECIAL_ESCAPED_CHAR", P::one_of("\\abfnrtv\"'")),
        // OCTAL_ESCAPED_CHAR   :=  [0-7], [0-7]?, [0-7]?
        Declaration::regular(
            "OCTAL_ESCAPED_CHAR",
            P::sequence(vec![
                P::char_range('0', '7'),
                P::optional(P::char_range('0', '7')),
                P::optional(P::char_range('0', '7')),
            ]),
        ),
        Declaration::regular(
            "HEX_ESCAPED_CHAR",
            P::sequence(vec![hexdigit(), hexdigit()]),
        ),
        Declaration::unreported(
            "HEXDIGIT",
            P::or_group(vec![
                P::char_range('0', '9'),
                P::char_range('a', 'f'),
                P::char_range('A', 'F'),
            ]),
        ),
        // CHAR_NO_DBLQUOTE     :=  -[\"]+
        Declaration::regular(
            "CHAR_NO_DBLQUOTE",
            P::one_or_more_until(P::one_of("\\\"")),
        ),
        // CHAR_NO_SNGLQUOTE    :=  -[\']+
        Declaration::regular(
            "CHAR_NO_SNGLQUOTE",
            P::one_or_more_until(P::one_of("\\'")),
        ),
        Declaration::regular(
            "UNICODE_ESCAPED_CHAR_16",
            P::sequence(vec![hexdigit(), hexdigit(), hexdigit(), hexdigit()]),
        ),
        Declaration::regular(
            "UNICODE_ESCAPED_CHAR_32",
            P::sequence(vec![
                hexdigit(),
                hexdigit(),
                hexdigit(),
                hexdigit(),
                hexdigit(),
                hexdigit(),
                hexdigit(),
                hexdigit(),
            ]),
        ),
    ]
}

/// The meta-grammar in its own surface syntax.
pub const META_GRAMMAR: &str = r##"# The grammar language, written in itself.

declaration_set      :=  declaration+

declaration          :=  ts, !'Expected name, <unreported>, or >expanded< declaration',
                         (unreportedname / expandedname / name), ts,
                         !'Expected := or ::= operator', (':=' / '::='), seq_group

element_token        :=  lookahead_indicator?, ts, neg_indicator?, ts,
                         (literal / range / group / name), ts,
                         occurrence_indicator?, ts, error_on_fail?

neg_indicator        :=  '-'
lookahead_indicator  :=  '?'
occurrence_indicator :=  [+*?]
error_on_fail        :=  '!', (ts, literal)?

>group<              :=  '(', seq_group, !'Expected closing ")"', ')'

seq_group            :=  ts, !'Expected one or more terms in sequence',
                         (error_on_fail / fo_group / element_token),
                         (ts, seq_indicator, ts, (error_on_fail / fo_group / element_token))*, ts

fo_group             :=  ts, element_token, (ts, fo_indicator, ts, element_token)+

<fo_indicator>       :=  '/'
<seq_indicator>      :=  ','

unreportedname       :=  '<', name, !'Expected closing ">"', '>'
expandedname         :=  '>', name, !'Expected closing "<"', '<'

name                 :=  [a-zA-Z_], [a-zA-Z0-9_]*

<ts>                 :=  ([ \t-\r]+ / comment)*

>comment<            :=  comment_start, comment_text, eol
comment_text         :=  -eol*
<comment_start>      :=  '#'
<eol>                :=  '\n'

literal              :=  literalDecorator?,
                         ("'", (CHAR_NO_SNGLQUOTE / ESCAPED_CHAR)*, !'Expected closing single-quote', "'")
                         / ('"', (CHAR_NO_DBLQUOTE / ESCAPED_CHAR)*, !'Expected closing double-quote', '"')

literalDecorator     :=  'c'

range                :=  '[', CHARBRACE?, CHARDASH?, (CHARRANGE / CHARNOBRACE)*, CHARDASH?,
                         !'Expected closing "]"', ']'

CHARBRACE            :=  ']'
CHARDASH             :=  '-'
CHARRANGE            :=  CHARNOBRACE, '-', CHARNOBRACE
>CHARNOBRACE<        :=  ESCAPED_CHAR / CHAR
CHAR                 :=  -']'

ESCAPED_CHAR         :=  '\\', !'Expected escape sequence following "\\"',
                         (SPECIAL_ESCAPED_CHAR
                          / ('x', !'Expected two hex digits following "\\x"', HEX_ESCAPED_CHAR)
                          / ('u', !'Expected four hex digits following "\\u"', UNICODE_ESCAPED_CHAR_16)
                          / ('U', !'Expected eight hex digits following "\\U"', UNICODE_ESCAPED_CHAR_32)
                          / OCTAL_ESCAPED_CHAR)

SPECIAL_ESCAPED_CHAR :=  [\\abfnrtv"']

OCTAL_ESCAPED_CHAR   :=  [0-7], [0-7]?, [0-7]?

HEX_ESCAPED_CHAR     :=  HEXDIGIT, HEXDIGIT
<HEXDIGIT>           :=  [0-9a-fA-F]

CHAR_NO_DBLQUOTE     :=  -[\\"]+
CHAR_NO_SNGLQUOTE    :=  -[\\']+

UNICODE_ESCAPED_CHAR_16  :=  HEXDIGIT, HEXDIGIT, HEXDIGIT, HEXDIGIT
UNICODE_ESCAPED_CHAR_32  :=  HEXDIGIT, HEXDIGIT, HEXDIGIT, HEXDIGIT,
                             HEXDIGIT, HEXDIGIT, HEXDIGIT, HEXDIGIT
"##;
