//! The List Extractor. Recognizes `{array.map((item, index) => <jsx/>)}`
//! shaped children and promotes them into an element's `list_info` instead
//! of leaving them as an opaque `Expression` child.

use oxc_ast::ast::*;
use oxc_span::GetSpan;

use crate::ast_util::{attribute_name, source_text, unwrap_parens};
use crate::context::Context;
use crate::diagnostics::Warning;
use crate::dispatcher;
use crate::ir::*;

/// The `X.map(cb)` call shape, minus any judgment on `cb`'s body: one
/// argument, a `.map` static member callee.
fn map_shape<'a, 'b>(
    expr: &'b Expression<'a>,
) -> Option<(&'b StaticMemberExpression<'a>, &'b ArrowFunctionExpression<'a>)> {
    let Expression::CallExpression(call) = expr else {
        return None;
    };
    if call.arguments.len() != 1 {
        return None;
    }
    let Expression::StaticMemberExpression(member) = &call.callee else {
        return None;
    };
    if member.property.name != "map" {
        return None;
    }
    let Argument::ArrowFunctionExpression(callback) = &call.arguments[0] else {
        return None;
    };
    Some((member, callback))
}

/// Shape test only — no mutation, usable from the expression classifier to
/// recognize a `.map()` call that escaped element-children position. Per
/// spec §4.4 item 1, this must agree with the List Extractor on what counts
/// as a list: a `.map()` whose callback body (after unwrapping parens) isn't
/// JSX is just a plain array transform and falls through to the lexical
/// `reactive()` check like any other expression.
pub fn is_map_call(expr: &Expression) -> bool {
    let Some((_, callback)) = map_shape(expr) else {
        return false;
    };
    let Some(body_expr) = arrow_body_expression(callback) else {
        return false;
    };
    matches!(unwrap_parens(body_expr), Expression::JSXElement(_))
}

/// Returns `None` when the shape doesn't match, leaving the caller (the
/// element builder) to dispatch the expression normally.
pub fn try_extract<'a>(expr: &Expression<'a>, ctx: &mut Context, source: &str) -> Option<ListInfo> {
    let (member, callback) = map_shape(expr)?;

    let body_expr = arrow_body_expression(callback)?;
    let body_expr = unwrap_parens(body_expr);
    let Expression::JSXElement(root) = body_expr else {
        return None;
    };

    let array_source = source_text(member.object.span(), source).to_string();
    let param_name = binding_name(&callback.params.items.first()?.pattern)?;
    let index_param_name = callback
        .params
        .items
        .get(1)
        .and_then(|p| binding_name(&p.pattern));

    ctx.push_non_reactive(param_name.clone());
    if let Some(idx) = &index_param_name {
        ctx.push_non_reactive(idx.clone());
    }

    let key_expression = extract_key(root, index_param_name.as_deref(), source);
    if key_expression.is_none() {
        ctx.warn(Warning::ListNoKey {
            array_source: array_source.clone(),
        });
    }

    let item_ir = Some(Box::new(dispatcher::dispatch_element(root, ctx, source)));

    if index_param_name.is_some() {
        ctx.pop_non_reactive();
    }
    ctx.pop_non_reactive();

    let (item_template, item_events) =
        ctx.template_generator()
            .generate(root, &param_name, ctx.components());

    Some(ListInfo {
        array_source,
        param_name,
        index_param_name,
        key_expression,
        item_ir,
        item_template,
        item_events,
    })
}

fn arrow_body_expression<'a, 'b>(callback: &'b ArrowFunctionExpression<'a>) -> Option<&'b Expression<'a>> {
    if !callback.expression {
        // block-bodied callback: not the "arrow returning a bare JSX
        // expression" shape this step requires.
        return None;
    }
    match callback.body.statements.first()? {
        Statement::ExpressionStatement(stmt) => Some(&stmt.expression),
        _ => None,
    }
}

fn binding_name(pattern: &BindingPattern) -> Option<String> {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(id) => Some(id.name.to_string()),
        _ => None,
    }
}

fn extract_key<'a>(root: &JSXElement<'a>, index_param_name: Option<&str>, source: &str) -> Option<String> {
    for item in &root.opening_element.attributes {
        let JSXAttributeItem::Attribute(attr) = item else {
            continue;
        };
        if attribute_name(&attr.name) != "key" {
            continue;
        }
        let Some(JSXAttributeValue::ExpressionContainer(container)) = &attr.value else {
            return None;
        };
        let expr = container.expression.as_expression()?;
        let src = source_text(expr.span(), source).to_string();
        if index_param_name.is_some_and(|idx| src.trim() == idx) {
            return Some("__index".to_string());
        }
        return Some(src);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::NullTemplateGenerator;
    use crate::context::ComponentRegistry;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;
    use std::collections::HashSet;

    fn find_first_map_container<'a>(program: &'a Program<'a>) -> &'a JSXExpressionContainer<'a> {
        fn walk<'a>(el: &'a JSXElement<'a>) -> Option<&'a JSXExpressionContainer<'a>> {
            for child in &el.children {
                if let JSXChild::ExpressionContainer(c) = child {
                    return Some(c);
                }
            }
            None
        }
        for stmt in &program.body {
            if let Statement::FunctionDeclaration(func) = stmt {
                if let Some(body) = &func.body {
                    for s in &body.statements {
                        if let Statement::ReturnStatement(ret) = s {
                            if let Some(Expression::JSXElement(el)) = &ret.argument {
                                if let Some(c) = walk(el) {
                                    return c;
                                }
                            }
                        }
                    }
                }
            }
        }
        panic!("no map expression container found");
    }

    #[test]
    fn extracts_array_param_and_key() {
        let source = r#"
            function List() {
                return <ul>{items.map((item, index) => <li key={item.id}>{item.name}</li>)}</ul>;
            }
        "#;
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_typescript(true).with_jsx(true);
        let parsed = Parser::new(&allocator, source, source_type).parse();
        let container = find_first_map_container(&parsed.program);
        let expr = container.expression.as_expression().unwrap();

        let gen = NullTemplateGenerator;
        let mut ctx = Context::new(
            "List",
            vec![],
            vec![],
            ComponentRegistry::new(),
            HashSet::new(),
            &gen,
        );
        let info = try_extract(expr, &mut ctx, source).expect("should match map shape");
        assert_eq!(info.array_source, "items");
        assert_eq!(info.param_name, "item");
        assert_eq!(info.index_param_name.as_deref(), Some("index"));
        assert_eq!(info.key_expression.as_deref(), Some("item.id"));
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn missing_key_is_warned() {
        let source = r#"
            function List() {
                return <ul>{items.map((item) => <li>{item.name}</li>)}</ul>;
            }
        "#;
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_typescript(true).with_jsx(true);
        let parsed = Parser::new(&allocator, source, source_type).parse();
        let container = find_first_map_container(&parsed.program);
        let expr = container.expression.as_expression().unwrap();

        let gen = NullTemplateGenerator;
        let mut ctx = Context::new(
            "List",
            vec![],
            vec![],
            ComponentRegistry::new(),
            HashSet::new(),
            &gen,
        );
        let info = try_extract(expr, &mut ctx, source).expect("should match map shape");
        assert_eq!(info.key_expression, None);
        assert_eq!(ctx.warnings().len(), 1);
    }

    #[test]
    fn non_jsx_callback_body_is_not_a_map_call() {
        let source = r#"
            function List() {
                return <ul>{items.map(item => item.label)}</ul>;
            }
        "#;
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_typescript(true).with_jsx(true);
        let parsed = Parser::new(&allocator, source, source_type).parse();
        let container = find_first_map_container(&parsed.program);
        let expr = container.expression.as_expression().unwrap();

        assert!(!is_map_call(expr));

        let gen = NullTemplateGenerator;
        let mut ctx = Context::new(
            "List",
            vec![],
            vec![],
            ComponentRegistry::new(),
            HashSet::new(),
            &gen,
        );
        assert!(try_extract(expr, &mut ctx, source).is_none());
    }
}
