//! The reactivity predicate: lexical, not semantic. An expression is
//! reactive iff its source text contains a call to a known signal or memo
//! getter — a word-boundary regex match, not a type-checked data-flow
//! analysis. A bare prop reference is never reactive on its own.
//!
//! The per-getter pattern can't be a plain `lazy_static!` the way
//! `text.rs`'s fixed patterns are, since the identifier is only known once
//! `signals`/`memos` are loaded — so `Context` compiles each getter's
//! pattern once, at construction, and this module just matches against the
//! cached `Regex`es instead of re-parsing one per call site checked.

use regex::Regex;

use crate::context::Context;

pub fn reactive(source: &str, ctx: &Context) -> bool {
    ctx.signals()
        .iter()
        .zip(ctx.signal_patterns())
        .any(|(s, re)| !ctx.is_shadowed(&s.getter_name) && re.is_match(source))
        || ctx
            .memos()
            .iter()
            .zip(ctx.memo_patterns())
            .any(|(m, re)| !ctx.is_shadowed(&m.getter_name) && re.is_match(source))
}

/// Compiles the word-boundary call pattern for one getter identifier. Called
/// once per declared signal/memo from `Context::new`, not per reactivity
/// check.
pub(crate) fn compile_call_pattern(identifier: &str) -> Regex {
    let pattern = format!(r"\b{}\s*\(", regex::escape(identifier));
    Regex::new(&pattern).expect("escaped identifier call pattern is always valid regex")
}
