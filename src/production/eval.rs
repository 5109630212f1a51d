use super::{Production, ProductionKind};
use crate::{AstResult, ParseCtx, ParseError, ParsedResult};

impl Production {
    pub(super) fn eval_kind(&self, ctx: &mut ParseCtx) -> ParsedResult {
        match &self.kind {
            ProductionKind::Eof => Ok(if ctx.eof() {
                AstResult::matched()
            } else {
                AstResult::unmatched()
            }),
            ProductionKind::Any => Ok(eval_any(ctx)),
            ProductionKind::Literal(text) => Ok(eval_literal(ctx, text)),
            ProductionKind::OneOf(chars) => Ok(eval_one_of(ctx, chars)),
            ProductionKind::CharRange(start, end) => Ok(eval_char_range(ctx, *start, *end)),
            ProductionKind::Negate(item) => eval_negate(ctx, item),
            ProductionKind::Optional(item) => eval_optional(ctx, item),
            ProductionKind::Lookahead(item) => eval_lookahead(ctx, item),
            ProductionKind::Sequence(items) => eval_sequence(ctx, items),
            ProductionKind::OrGroup(items) => eval_or_group(ctx, items),
            ProductionKind::OneOrMore(item) => eval_one_or_more(ctx, item),
            ProductionKind::ZeroOrMore(item) => eval_zero_or_more(ctx, item),
            ProductionKind::OneOrMoreUntil(term) => eval_one_or_more_until(ctx, term),
            ProductionKind::ZeroOrMoreUntil(term) => eval_zero_or_more_until(ctx, term),
            ProductionKind::DeclRef(name) => eval_decl_ref(ctx, name),
            ProductionKind::Fail(message) => {
                Err(ParseError::new(ctx.position(), message.clone()))
            }
            ProductionKind::Trace(label, item) => eval_trace(ctx, label, item),
        }
    }
}

fn eval_any(ctx: &mut ParseCtx) -> AstResult {
    if ctx.eof() {
        return AstResult::unmatched();
    }
    ctx.next_char();
    AstResult::matched()
}

fn eval_literal(ctx: &mut ParseCtx, text: &str) -> AstResult {
    if ctx.eof_at(text.len()) {
        return AstResult::unmatched();
    }
    if ctx.peek(text.len()) == text {
        ctx.next(text.len());
        AstResult::matched()
    } else {
        AstResult::unmatched()
    }
}

fn eval_one_of(ctx: &mut ParseCtx, chars: &str) -> AstResult {
    match ctx.peek_char() {
        Some(ch) if chars.contains(ch) => {
            ctx.next_char();
            AstResult::matched()
        }
        _ => AstResult::unmatched(),
    }
}

fn eval_char_range(ctx: &mut ParseCtx, start: char, end: char) -> AstResult {
    match ctx.peek_char() {
        Some(ch) if start <= ch && ch <= end => {
            ctx.next_char();
            AstResult::matched()
        }
        _ => AstResult::unmatched(),
    }
}

fn eval_negate(ctx: &mut ParseCtx, item: &Production) -> ParsedResult {
    if ctx.eof() {
        return Ok(AstResult::unmatched());
    }
    let mut eval_ctx = ctx.clone();
    if item.evaluate(&mut eval_ctx)?.is_matched() {
        Ok(AstResult::unmatched())
    } else {
        ctx.next_char();
        Ok(AstResult::matched())
    }
}

fn eval_optional(ctx: &mut ParseCtx, item: &Production) -> ParsedResult {
    if ctx.eof() {
        return Ok(AstResult::matched());
    }
    let mut eval_ctx = ctx.clone();
    let result = item.evaluate(&mut eval_ctx)?;
    if result.is_matched() {
        ctx.update(&eval_ctx);
        Ok(result)
    } else {
        Ok(AstResult::matched())
    }
}

fn eval_lookahead(ctx: &mut ParseCtx, item: &Production) -> ParsedResult {
    let mut eval_ctx = ctx.clone();
    if item.evaluate(&mut eval_ctx)?.is_matched() {
        Ok(AstResult::matched())
    } else {
        Ok(AstResult::unmatched())
    }
}

fn eval_sequence(ctx: &mut ParseCtx, items: &[Production]) -> ParsedResult {
    let mut eval_ctx = ctx.clone();
    let mut result = AstResult::matched();
    for item in items {
        let eval_result = item.evaluate(&mut eval_ctx)?;
        if !eval_result.is_matched() {
            return Ok(AstResult::unmatched());
        }
        result.combine(eval_result);
    }
    ctx.update(&eval_ctx);
    Ok(result)
}

fn eval_or_group(ctx: &mut ParseCtx, items: &[Production]) -> ParsedResult {
    for item in items {
        let mut eval_ctx = ctx.clone();
        let result = item.evaluate(&mut eval_ctx)?;
        if result.is_matched() {
            ctx.update(&eval_ctx);
            return Ok(result);
        }
    }
    Ok(AstResult::unmatched())
}

fn eval_one_or_more(ctx: &mut ParseCtx, item: &Production) -> ParsedResult {
    if ctx.eof() {
        return Ok(AstResult::unmatched());
    }
    let mut eval_ctx = ctx.clone();
    let mut result = item.evaluate(&mut eval_ctx)?;
    if !result.is_matched() {
        return Ok(AstResult::unmatched());
    }
    ctx.update(&eval_ctx);
    while !ctx.eof() {
        let mut eval_ctx = ctx.clone();
        let eval_result = item.evaluate(&mut eval_ctx)?;
        if !eval_result.is_matched() {
            break;
        }
        ctx.update(&eval_ctx);
        result.combine(eval_result);
    }
    Ok(result)
}

fn eval_zero_or_more(ctx: &mut ParseCtx, item: &Production) -> ParsedResult {
    let mut result = AstResult::matched();
    while !ctx.eof() {
        let mut eval_ctx = ctx.clone();
        let eval_result = item.evaluate(&mut eval_ctx)?;
        if !eval_result.is_matched() {
            break;
        }
        ctx.update(&eval_ctx);
        result.combine(eval_result);
    }
    Ok(result)
}

fn eval_one_or_more_until(ctx: &mut ParseCtx, term: &Production) -> ParsedResult {
    if ctx.eof() {
        return Ok(AstResult::unmatched());
    }
    let mut eval_ctx = ctx.clone();
    if term.evaluate(&mut eval_ctx)?.is_matched() {
        return Ok(AstResult::unmatched());
    }
    loop {
        ctx.next_char();
        let mut eval_ctx = ctx.clone();
        // The terminator is probed before the end test so a terminator that
        // matches at end of input still stops the scan.
        if term.evaluate(&mut eval_ctx)?.is_matched() {
            break;
        } else if eval_ctx.eof() {
            return Ok(AstResult::unmatched());
        }
    }
    Ok(AstResult::matched())
}

fn eval_zero_or_more_until(ctx: &mut ParseCtx, term: &Production) -> ParsedResult {
    if ctx.eof() {
        return Ok(AstResult::matched());
    }
    let mut eval_ctx = ctx.clone();
    loop {
        if term.evaluate(&mut eval_ctx)?.is_matched() {
            break;
        } else if eval_ctx.eof() {
            return Ok(AstResult::unmatched());
        }
        ctx.next_char();
        eval_ctx = ctx.clone();
    }
    Ok(AstResult::matched())
}

fn eval_decl_ref(ctx: &mut ParseCtx, name: &str) -> ParsedResult {
    let declarations = ctx.declarations();
    match declarations.get(name) {
        Some(decl) => decl.evaluate(ctx),
        None => Err(ParseError::new(
            ctx.position(),
            format!("Undefined rule \"{}\"", name),
        )),
    }
}

fn eval_trace(ctx: &mut ParseCtx, _label: &str, item: &Production) -> ParsedResult {
    let result = item.evaluate(ctx);
    #[cfg(debug_assertions)]
    match &result {
        Ok(data) if data.is_matched() => {
            println!("Parsing success for '{}': at {}.", _label, ctx.position())
        }
        Ok(_) => println!("Unparsed production '{}': at {}.", _label, ctx.position()),
        Err(err) => println!(
            "Hard failure for '{}': at {}. {}",
            _label, err.position, err.message
        ),
    }
    result
}
