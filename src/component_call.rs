//! The Component Call Builder: turns a PascalCase JSX element that resolved
//! against the component registry into a `Component` IR node — splitting
//! props from spreads, deciding `has_lazy_children`, and synthesizing a
//! `child_init` when the callee declares its own props.

use oxc_ast::ast::*;
use oxc_span::GetSpan;

use crate::ast_util::{attribute_name, source_text, tag_name};
use crate::context::Context;
use crate::dispatcher;
use crate::ir::*;
use crate::reactive::reactive;

pub fn build<'a>(el: &JSXElement<'a>, ctx: &mut Context, source: &str) -> IRNode {
    let name = tag_name(&el.opening_element.name);

    let mut props = Vec::new();
    let mut spread_props = Vec::new();

    for item in &el.opening_element.attributes {
        match item {
            JSXAttributeItem::SpreadAttribute(spread) => {
                spread_props.push(source_text(spread.argument.span(), source).to_string());
            }
            JSXAttributeItem::Attribute(attr) => {
                if attribute_name(&attr.name) == "key" {
                    // consumed by the List Extractor on the item's root element.
                    continue;
                }
                props.push(build_prop(attr, ctx, source));
            }
        }
    }

    let children: Vec<IRNode> = el
        .children
        .iter()
        .filter_map(|c| dispatcher::dispatch_child(c, ctx, source))
        .collect();

    let has_lazy_children = children
        .iter()
        .any(|c| matches!(c, IRNode::Expression(e) if e.is_dynamic));

    let child_init = ctx.components().get(&name).and_then(|summary| {
        if summary.props.is_empty() || props.is_empty() {
            None
        } else {
            let body = props
                .iter()
                .map(|p| format!("{}: {}", p.name, p.source))
                .collect::<Vec<_>>()
                .join(", ");
            Some(ChildInit {
                name: name.clone(),
                props_struct_source: format!("{{ {body} }}"),
            })
        }
    });

    IRNode::Component(ComponentNode {
        name,
        props,
        spread_props,
        children,
        child_init,
        has_lazy_children,
    })
}

fn build_prop<'a>(attr: &JSXAttribute<'a>, ctx: &mut Context, source: &str) -> PropAssign {
    let name = attribute_name(&attr.name);
    match &attr.value {
        Some(JSXAttributeValue::ExpressionContainer(container)) => {
            match container.expression.as_expression() {
                Some(expr) => {
                    let src = source_text(expr.span(), source).to_string();
                    let is_dynamic = reactive(&src, ctx);
                    PropAssign {
                        name,
                        source: src,
                        is_dynamic,
                    }
                }
                None => PropAssign {
                    name,
                    source: "undefined".to_string(),
                    is_dynamic: false,
                },
            }
        }
        Some(JSXAttributeValue::StringLiteral(s)) => PropAssign {
            name,
            source: format!("{:?}", s.value.as_str()),
            is_dynamic: false,
        },
        Some(JSXAttributeValue::Element(inner)) => PropAssign {
            name,
            source: source_text(inner.span(), source).to_string(),
            is_dynamic: false,
        },
        Some(JSXAttributeValue::Fragment(frag)) => PropAssign {
            name,
            source: source_text(frag.span(), source).to_string(),
            is_dynamic: false,
        },
        None => PropAssign {
            name,
            source: "true".to_string(),
            is_dynamic: false,
        },
    }
}
