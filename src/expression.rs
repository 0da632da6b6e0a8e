//! The Expression Classifier: decides whether an embedded `{expression}` is
//! a plain value, or normalizes a ternary/`&&`/`||` into a `Conditional`
//! node. List extraction is intercepted one layer up, in the element
//! builder, before an expression ever reaches here.

use oxc_ast::ast::*;
use oxc_span::GetSpan;

use crate::ast_util::{source_text, unwrap_parens};
use crate::context::Context;
use crate::dispatcher;
use crate::ir::*;
use crate::list::is_map_call;
use crate::reactive::reactive;

/// `None` only for child-position-only shapes (spreads) that never reach
/// this function through the dispatcher; kept `Option` for symmetry with
/// the rest of the builders.
pub fn classify<'a>(expr: &Expression<'a>, ctx: &mut Context, source: &str) -> Option<IRNode> {
    let expr = unwrap_parens(expr);

    if let Expression::ConditionalExpression(cond) = expr {
        return Some(classify_ternary(cond, ctx, source));
    }

    if let Expression::LogicalExpression(logical) = expr {
        match logical.operator {
            LogicalOperator::And => {
                if let Some(node) = classify_logical_and(logical, ctx, source) {
                    return Some(node);
                }
            }
            LogicalOperator::Or => {
                if let Some(node) = classify_logical_or(logical, ctx, source) {
                    return Some(node);
                }
            }
            LogicalOperator::Coalesce => {}
        }
    }

    // A `.map()` call reaching the classifier directly (outside of element
    // children, where the List Extractor would otherwise have intercepted
    // it) degrades to an opaque dynamic placeholder.
    if is_map_call(expr) {
        let src = source_text(expr.span(), source).to_string();
        return Some(IRNode::Expression(ExpressionNode {
            source: src,
            is_dynamic: true,
        }));
    }

    Some(classify_branch(expr, ctx, source))
}

fn classify_branch<'a>(expr: &Expression<'a>, ctx: &mut Context, source: &str) -> IRNode {
    match expr {
        Expression::JSXElement(el) => dispatcher::dispatch_element(el, ctx, source),
        Expression::JSXFragment(frag) => dispatcher::dispatch_fragment(frag, ctx, source),
        other => {
            let src = source_text(other.span(), source).to_string();
            let is_dynamic = is_dynamic_leaf(&src, ctx);
            IRNode::Expression(ExpressionNode {
                source: src,
                is_dynamic,
            })
        }
    }
}

/// `children` is special-cased as always dynamic: a component may re-render
/// its slot even though `children` itself is never a signal/memo getter
/// call.
fn is_dynamic_leaf(src: &str, ctx: &Context) -> bool {
    src.trim() == "children" || reactive(src, ctx)
}

fn classify_ternary<'a>(cond: &ConditionalExpression<'a>, ctx: &mut Context, source: &str) -> IRNode {
    let condition = source_text(cond.test.span(), source).to_string();
    let condition_is_reactive = reactive(&condition, ctx);

    let consequent = unwrap_parens(&cond.consequent);
    let alternate = unwrap_parens(&cond.alternate);

    let when_true = classify_branch(consequent, ctx, source);
    let when_false = classify_branch(alternate, ctx, source);

    let alternate_is_null = matches!(alternate, Expression::NullLiteral(_));
    let either_is_jsx = is_jsx_node(&when_true) || is_jsx_node(&when_false);

    let slot_id = if condition_is_reactive && (either_is_jsx || alternate_is_null) {
        Some(ctx.next_slot_id())
    } else {
        None
    };

    IRNode::Conditional(ConditionalNode {
        slot_id,
        condition,
        when_true: Box::new(when_true),
        when_false: Box::new(when_false),
    })
}

fn classify_logical_and<'a>(logical: &LogicalExpression<'a>, ctx: &mut Context, source: &str) -> Option<IRNode> {
    let rhs = unwrap_parens(&logical.right);
    if !is_jsx_expr(rhs) {
        return None;
    }
    let condition = source_text(logical.left.span(), source).to_string();
    let condition_is_reactive = reactive(&condition, ctx);
    let when_true = classify_branch(rhs, ctx, source);
    let slot_id = condition_is_reactive.then(|| ctx.next_slot_id());

    Some(IRNode::Conditional(ConditionalNode {
        slot_id,
        condition,
        when_true: Box::new(when_true),
        when_false: Box::new(null_leaf()),
    }))
}

fn classify_logical_or<'a>(logical: &LogicalExpression<'a>, ctx: &mut Context, source: &str) -> Option<IRNode> {
    let rhs = unwrap_parens(&logical.right);
    if !is_jsx_expr(rhs) {
        return None;
    }
    let left_source = source_text(logical.left.span(), source).to_string();
    let condition_is_reactive = reactive(&left_source, ctx);
    let when_true = classify_branch(rhs, ctx, source);
    let slot_id = condition_is_reactive.then(|| ctx.next_slot_id());

    Some(IRNode::Conditional(ConditionalNode {
        slot_id,
        condition: format!("!({left_source})"),
        when_true: Box::new(when_true),
        when_false: Box::new(null_leaf()),
    }))
}

fn null_leaf() -> IRNode {
    IRNode::Expression(ExpressionNode {
        source: "null".to_string(),
        is_dynamic: false,
    })
}

fn is_jsx_expr(expr: &Expression) -> bool {
    matches!(expr, Expression::JSXElement(_) | Expression::JSXFragment(_))
}

fn is_jsx_node(node: &IRNode) -> bool {
    matches!(node, IRNode::Element(_) | IRNode::Fragment(_))
}
