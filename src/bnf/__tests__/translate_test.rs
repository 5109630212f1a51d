//! Tests for the AST-to-productions translation, checked through the
//! canonical dump form of the emitted production trees.

use crate::bnf::meta::{meta_declarations, META_GRAMMAR};
use crate::{AstNode, DeclarationTable, GrammarCompiler, GrammarError, ParseCtx};
use std::rc::Rc;

fn parse_rule(text: &str, rule: &str) -> AstNode {
    let table = Rc::new(DeclarationTable::with_declarations(meta_declarations()));
    let mut ctx = ParseCtx::new(text, Rc::clone(&table));
    let result = table.get(rule).unwrap().evaluate(&mut ctx).unwrap();
    assert!(result.is_matched(), "rule {:?} did not match {:?}", rule, text);
    let mut items = result.into_items();
    assert_eq!(items.len(), 1, "expected exactly one tree for {:?}", text);
    items.swap_remove(0)
}

#[test]
fn literal_value_test() {
    let compiler = GrammarCompiler::new();
    let cases = [
        (r#""hello world""#, "hello world"),
        ("'hello world'", "hello world"),
        (r#"c"hello world""#, "hello world"),
        ("c'hello world'", "hello world"),
        (r#""[-]""#, "[-]"),
        (r#""'""#, "'"),
        (r#"'"'"#, "\""),
        (r#"'\''"#, "'"),
        (r#""\"""#, "\""),
        (r#""\a\b\f\n\r\t\v""#, "\u{7}\u{8}\u{c}\n\r\t\u{b}"),
        (r#""foo\nbar\n""#, "foo\nbar\n"),
        (r#""\xAB""#, "\u{AB}"),
        (r#""\uABCD""#, "\u{ABCD}"),
        (r#""\U0000ABCD""#, "\u{ABCD}"),
        // Octal escapes decode base-8.
        (r#""\101\60""#, "A0"),
    ];
    for (code, expected) in cases {
        let ast = parse_rule(code, "literal");
        assert_eq!(
            compiler.literal_value(&ast, true).unwrap(),
            expected,
            "literal {:?}",
            code
        );
    }

    // Without escape interpretation the backslash sequences stay literal.
    let raw_cases = [
        ("c'foo\\r\\nbar'", "foo\\r\\nbar"),
        (r#""\xAB""#, r"\xAB"),
        (r#""\uABCD""#, r"\uABCD"),
        (r#""\U0000ABCD""#, r"\U0000ABCD"),
    ];
    for (code, expected) in raw_cases {
        let ast = parse_rule(code, "literal");
        assert_eq!(
            compiler.literal_value(&ast, false).unwrap(),
            expected,
            "raw literal {:?}",
            code
        );
    }
}

#[test]
fn invalid_scalar_test() {
    let mut compiler = GrammarCompiler::new();
    let ast = parse_rule(r#""\UFFFFFFFF""#, "literal");
    let err = compiler.literal(&ast).unwrap_err();
    assert_eq!(
        format!("{}", err),
        "(1, 4): Escape value \"FFFFFFFF\" is not a valid character"
    );
}

#[test]
fn process_literal_test() {
    let mut compiler = GrammarCompiler::new();

    let ast = parse_rule(r#""foobar""#, "literal");
    let production = compiler.literal(&ast).unwrap();
    assert_eq!(format!("{}", production), r#"Literal("foobar")"#);

    // The c decorator keeps the backslash sequence in the compiled value.
    let ast = parse_rule(r#"c"a\tb""#, "literal");
    let production = compiler.literal(&ast).unwrap();
    assert_eq!(format!("{}", production), r#"Literal("a\tb")"#);
}

#[test]
fn element_token_translation_test() {
    let cases = [
        (r#""foobar""#, r#"Literal("foobar")"#),
        ("-foobar", r#"Negate(DeclRef("foobar"))"#),
        ("?foobar", r#"Lookahead(DeclRef("foobar"))"#),
        ("?-foobar", r#"Lookahead(Negate(DeclRef("foobar")))"#),
        ("foobar?", r#"Optional(DeclRef("foobar"))"#),
        ("foobar*", r#"ZeroOrMore(DeclRef("foobar"))"#),
        ("foobar+", r#"OneOrMore(DeclRef("foobar"))"#),
        ("?foobar?", r#"Lookahead(Optional(DeclRef("foobar")))"#),
        ("?foobar*", r#"Lookahead(ZeroOrMore(DeclRef("foobar")))"#),
        ("?foobar+", r#"Lookahead(OneOrMore(DeclRef("foobar")))"#),
        ("?-foobar?", r#"Lookahead(Optional(Negate(DeclRef("foobar"))))"#),
        ("?-foobar*", r#"Lookahead(ZeroOrMoreUntil(DeclRef("foobar")))"#),
        ("?-foobar+", r#"Lookahead(OneOrMoreUntil(DeclRef("foobar")))"#),
        ("-foobar?", r#"Optional(Negate(DeclRef("foobar")))"#),
        ("-foobar*", r#"ZeroOrMoreUntil(DeclRef("foobar"))"#),
        ("-foobar+", r#"OneOrMoreUntil(DeclRef("foobar"))"#),
    ];
    let mut compiler = GrammarCompiler::new();
    for (code, expected) in cases {
        let ast = parse_rule(code, "element_token");
        let production = compiler.element_token(&ast).unwrap();
        assert_eq!(format!("{}", production), expected, "element {:?}", code);
    }
}

#[test]
fn element_token_error_on_fail_test() {
    let mut compiler = GrammarCompiler::new();

    // The message lands on the fully combined outer production.
    let ast = parse_rule("? foobar + !\"fail\"", "element_token");
    let production = compiler.element_token(&ast).unwrap();
    assert_eq!(
        format!("{}", production),
        r#"Lookahead(OneOrMore(DeclRef("foobar"))).on_fail("fail")"#
    );

    // A bare marker falls back to the default message.
    let ast = parse_rule("foobar !", "element_token");
    let production = compiler.element_token(&ast).unwrap();
    assert_eq!(
        format!("{}", production),
        r#"DeclRef("foobar").on_fail("Syntax Error")"#
    );
}

#[test]
fn range_translation_test() {
    let cases = [
        ("[a]", r#"Literal("a")"#),
        ("[-]", r#"Literal("-")"#),
        ("[]]", r#"Literal("]")"#),
        ("[abc]", r#"OneOf("abc")"#),
        ("[a-z]", r#"CharRange("a","z")"#),
        ("[]-]", r#"OneOf("]-")"#),
        ("[a-zA-Z]", r#"OrGroup(CharRange("a","z"),CharRange("A","Z"))"#),
        (
            "[-a-zA-Z_]",
            r#"OrGroup(CharRange("a","z"),CharRange("A","Z"),OneOf("-_"))"#,
        ),
        (
            "[-a-z.$A-Z_]",
            r#"OrGroup(CharRange("a","z"),CharRange("A","Z"),OneOf("-.$_"))"#,
        ),
        // Escapes inside a class are decoded before the productions are built.
        (r"[\t-\r ]", "OrGroup(CharRange(\"\t\",\"\r\"),Literal(\" \"))"),
        (r"[\x41-\x5A]", r#"CharRange("A","Z")"#),
    ];
    let mut compiler = GrammarCompiler::new();
    for (code, expected) in cases {
        let ast = parse_rule(code, "range");
        let production = compiler.range(&ast).unwrap();
        assert_eq!(format!("{}", production), expected, "range {:?}", code);
    }
}

#[test]
fn seq_group_translation_test() {
    let cases = [
        ("foobar", r#"DeclRef("foobar")"#),
        (
            "foo, bar, baz",
            r#"Sequence(DeclRef("foo"),DeclRef("bar"),DeclRef("baz"))"#,
        ),
        // An error marker applies to everything that follows it...
        (
            "! \"fail\", foo, bar",
            r#"Sequence(DeclRef("foo").on_fail("fail"),DeclRef("bar").on_fail("fail"))"#,
        ),
        // ...until the next marker replaces the message.
        (
            "! \"fail\", foo, !\"baz\", bar",
            r#"Sequence(DeclRef("foo").on_fail("fail"),DeclRef("bar").on_fail("baz"))"#,
        ),
    ];
    let mut compiler = GrammarCompiler::new();
    for (code, expected) in cases {
        let ast = parse_rule(code, "seq_group");
        let production = compiler.seq_group(&ast).unwrap();
        assert_eq!(format!("{}", production), expected, "seq_group {:?}", code);
    }
}

#[test]
fn fo_group_translation_test() {
    let mut compiler = GrammarCompiler::new();
    let ast = parse_rule("foo/ bar/ baz", "fo_group");
    let production = compiler.fo_group(&ast).unwrap();
    assert_eq!(
        format!("{}", production),
        r#"OrGroup(DeclRef("foo"),DeclRef("bar"),DeclRef("baz"))"#
    );
}

#[test]
fn declaration_translation_test() {
    let cases = [
        ("foo := bar", r#"Decl("foo", DeclRef("bar"))"#),
        ("<foo> := bar", r#"UnreportedDecl("foo", DeclRef("bar"))"#),
        (">foo< := bar", r#"ExpandedDecl("foo", DeclRef("bar"))"#),
    ];
    let mut compiler = GrammarCompiler::new();
    for (code, expected) in cases {
        let ast = parse_rule(code, "declaration");
        let declaration = compiler.declaration(&ast).unwrap();
        assert_eq!(format!("{}", declaration), expected, "declaration {:?}", code);
    }
}

#[test]
fn compile_test() {
    let mut compiler = GrammarCompiler::new();
    let parser = compiler
        .compile("myrule := foobar\notherrule := baz #comments")
        .unwrap();
    assert!(compiler.warnings().is_empty(), "{:?}", compiler.warnings());

    assert_eq!(
        format!("{}", parser),
        "Decl(\"myrule\", DeclRef(\"foobar\"))\nDecl(\"otherrule\", DeclRef(\"baz\"))"
    );
}

#[test]
fn compile_empty_test() {
    let mut compiler = GrammarCompiler::new();
    let parser = compiler.compile("").unwrap();
    assert_eq!(
        compiler.warnings(),
        &["No declarations found".to_string()]
    );
    assert!(parser.declarations().is_empty());
}

#[test]
fn compile_garbage_test() {
    let mut compiler = GrammarCompiler::new();
    let err = compiler.compile("12345").unwrap_err();
    match err {
        GrammarError::Parse(parse_err) => assert_eq!(
            format!("{}", parse_err),
            "(1, 1): Expected name, <unreported>, or >expanded< declaration"
        ),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn compile_semantic_error_test() {
    let mut compiler = GrammarCompiler::new();
    let err = compiler.compile("bad := '\\UFFFFFFFF'").unwrap_err();
    assert!(err.is_semantic());
    assert_eq!(
        format!("{}", err),
        "SemanticError: (1, 11): Escape value \"FFFFFFFF\" is not a valid character"
    );
}

#[test]
fn compile_duplicate_warning_test() {
    let mut compiler = GrammarCompiler::new();
    let parser = compiler.compile("rule := 'a'\nrule := 'b'").unwrap();
    assert_eq!(
        compiler.warnings(),
        &["(2, 1): Rule \"rule\" is declared more than once".to_string()]
    );
    // The later declaration wins.
    let result = parser.parse("rule", "b").unwrap();
    assert!(result.is_matched());
    let result = parser.parse("rule", "a").unwrap();
    assert!(!result.is_matched());
}

#[test]
fn compiled_parser_runs_test() {
    let mut compiler = GrammarCompiler::new();
    let parser = compiler
        .compile(
            r"
            number   := '-'?, digit+, ('.', !'Expected digits after the point', digit+)?
            <digit>  := [0-9]
            ",
        )
        .unwrap();

    let result = parser.parse("number", "-123.25").unwrap();
    assert!(result.is_matched());
    assert_eq!(result.items()[0].text, "-123.25");

    let err = parser.parse("number", "12.x").unwrap_err();
    assert_eq!(format!("{}", err), "(1, 4): Expected digits after the point");
}

#[test]
fn undefined_reference_test() {
    let mut compiler = GrammarCompiler::new();
    let parser = compiler.compile("myrule := missing").unwrap();
    let err = parser.parse("myrule", "anything").unwrap_err();
    assert_eq!(format!("{}", err), "(1, 1): Undefined rule \"missing\"");

    let err = parser.parse("nosuchrule", "anything").unwrap_err();
    assert_eq!(format!("{}", err), "(1, 1): Undefined rule \"nosuchrule\"");
}

#[test]
fn meta_grammar_self_parse_test() {
    let table = Rc::new(DeclarationTable::with_declarations(meta_declarations()));
    let mut ctx = ParseCtx::new(META_GRAMMAR, Rc::clone(&table));
    let result = table
        .get("declaration_set")
        .unwrap()
        .evaluate(&mut ctx)
        .unwrap();
    assert!(result.is_matched());
    assert!(ctx.eof(), "the meta grammar should be consumed entirely");

    // Concatenating the declaration spans reproduces the source text.
    let root = &result.items()[0];
    assert_eq!(root.text, META_GRAMMAR);
    let rebuilt: String = root
        .children
        .iter()
        .map(|decl| decl.text.as_str())
        .collect();
    assert_eq!(rebuilt, META_GRAMMAR);
}

#[test]
fn meta_grammar_self_host_test() {
    let mut compiler = GrammarCompiler::new();
    let parser = compiler.compile(META_GRAMMAR).unwrap();
    assert!(compiler.warnings().is_empty(), "{:?}", compiler.warnings());

    // The compiled meta parser accepts its own source text in full.
    let result = parser.parse("declaration_set", META_GRAMMAR).unwrap();
    assert!(result.is_matched());
    assert_eq!(result.items()[0].text, META_GRAMMAR);

    // Spot-check translated rules through their canonical dumps.
    let declarations = parser.declarations();
    assert_eq!(declarations.len(), meta_declarations().len());
    let dump = |name: &str| format!("{}", declarations.get(name).unwrap());
    assert_eq!(dump("neg_indicator"), r#"Decl("neg_indicator", Literal("-"))"#);
    assert_eq!(
        dump("occurrence_indicator"),
        r#"Decl("occurrence_indicator", OneOf("+*?"))"#
    );
    assert_eq!(
        dump("fo_indicator"),
        r#"UnreportedDecl("fo_indicator", Literal("/"))"#
    );
    assert_eq!(
        dump("comment"),
        r#"ExpandedDecl("comment", Sequence(DeclRef("comment_start"),DeclRef("comment_text"),DeclRef("eol")))"#
    );
    assert_eq!(
        dump("comment_text"),
        r#"Decl("comment_text", ZeroOrMoreUntil(DeclRef("eol")))"#
    );
    assert_eq!(
        dump("CHAR"),
        r#"Decl("CHAR", Negate(Literal("]")))"#
    );
    assert_eq!(
        dump("CHARNOBRACE"),
        r#"ExpandedDecl("CHARNOBRACE", OrGroup(DeclRef("ESCAPED_CHAR"),DeclRef("CHAR")))"#
    );
    assert_eq!(
        dump("group"),
        "ExpandedDecl(\"group\", Sequence(Literal(\"(\"),DeclRef(\"seq_group\"),Literal(\")\").on_fail(\"Expected closing \")\"\")))"
    );
}
