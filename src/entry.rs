//! The Entry Finder: locates the top-level component function whose JSX
//! return value becomes the root of the IR forest.

use oxc_ast::ast::*;
use oxc_span::GetSpan;

use crate::ast_util::{is_pascal_case, source_text, unwrap_parens};
use crate::context::Context;
use crate::dispatcher;
use crate::ir::{ExpressionNode, IRNode};
use crate::reactive::reactive;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryOptions {
    pub target_component_name: Option<String>,
}

/// Walks top-level `function Foo() { ... }` declarations in document order,
/// looking for a PascalCase name whose body's first JSX-returning
/// `return` statement can serve as the IR root.
///
/// With a `target_component_name` set: the function with that exact name
/// wins immediately; absent a match, the first PascalCase function found
/// with a JSX return is used as a fallback. With no target set, the first
/// PascalCase function with a JSX return wins outright.
pub fn find_entry<'a>(
    program: &Program<'a>,
    options: &EntryOptions,
    ctx: &mut Context,
    source: &str,
) -> Option<IRNode> {
    let mut fallback: Option<IRNode> = None;

    for stmt in &program.body {
        let Statement::FunctionDeclaration(func) = stmt else {
            continue;
        };
        let Some(id) = &func.id else {
            continue;
        };
        let name = id.name.to_string();
        if !is_pascal_case(&name) {
            continue;
        }
        let Some(body) = &func.body else {
            continue;
        };
        let Some(jsx_root) = find_jsx_return(body) else {
            continue;
        };

        match &options.target_component_name {
            Some(target) if *target == name => {
                return Some(build_root(jsx_root, ctx, source));
            }
            Some(_) => {
                if fallback.is_none() {
                    fallback = Some(build_root(jsx_root, ctx, source));
                }
            }
            None => {
                return Some(build_root(jsx_root, ctx, source));
            }
        }
    }

    fallback
}

fn build_root<'a>(expr: &Expression<'a>, ctx: &mut Context, source: &str) -> IRNode {
    match expr {
        Expression::JSXElement(el) => dispatcher::dispatch_element(el, ctx, source),
        Expression::JSXFragment(frag) => dispatcher::dispatch_fragment(frag, ctx, source),
        other => {
            let src = source_text(other.span(), source).to_string();
            let is_dynamic = reactive(&src, ctx);
            IRNode::Expression(ExpressionNode {
                source: src,
                is_dynamic,
            })
        }
    }
}

/// The first `return` statement whose argument — after recursively
/// unwrapping parens — is JSX. A `return` of anything else contributes
/// nothing and is skipped, not treated as a failure.
fn find_jsx_return<'a, 'b>(body: &'b FunctionBody<'a>) -> Option<&'b Expression<'a>> {
    for stmt in &body.statements {
        let Statement::ReturnStatement(ret) = stmt else {
            continue;
        };
        let Some(arg) = &ret.argument else {
            continue;
        };
        let arg = unwrap_parens(arg);
        if matches!(arg, Expression::JSXElement(_) | Expression::JSXFragment(_)) {
            return Some(arg);
        }
    }
    None
}
