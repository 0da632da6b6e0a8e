//! The Element Builder: classifies an HTML element's attributes into
//! static/dynamic/spread/ref/event buckets, processes its children (running
//! the List Extractor over each child expression first), and decides
//! whether the element needs a slot id.

use oxc_ast::ast::*;
use oxc_span::GetSpan;

use crate::ast_util::{attribute_name, source_text, tag_name};
use crate::context::Context;
use crate::diagnostics::Warning;
use crate::dispatcher;
use crate::ir::*;
use crate::list;
use crate::reactive::reactive;

/// Attributes whose effect can change at runtime even when written as a
/// plain non-reactive-looking expression; these always land in
/// `dynamic_attrs` rather than `static_attrs` even when their expression
/// isn't otherwise reactive.
const DYNAMIC_ATTR_TARGETS: [&str; 8] = [
    "class",
    "className",
    "style",
    "disabled",
    "value",
    "checked",
    "hidden",
    "data-key",
];

pub fn build<'a>(el: &JSXElement<'a>, ctx: &mut Context, source: &str) -> IRNode {
    let tag = tag_name(&el.opening_element.name);

    let mut static_attrs = Vec::new();
    let mut dynamic_attrs = Vec::new();
    let mut spread_attrs = Vec::new();
    let mut ref_expr = None;
    let mut events = Vec::new();

    for item in &el.opening_element.attributes {
        classify_attribute(
            item,
            ctx,
            source,
            &mut static_attrs,
            &mut dynamic_attrs,
            &mut spread_attrs,
            &mut ref_expr,
            &mut events,
        );
    }

    let (children, list_info) = build_children(&tag, &el.children, ctx, source);
    let dynamic_content = compute_dynamic_content(&children, ctx);

    let needs_slot = !events.is_empty()
        || !dynamic_attrs.is_empty()
        || ref_expr.is_some()
        || list_info.is_some()
        || dynamic_content.is_some();

    let slot_id = needs_slot.then(|| ctx.next_slot_id());

    IRNode::Element(ElementNode {
        tag,
        slot_id,
        static_attrs,
        dynamic_attrs,
        spread_attrs,
        ref_expr,
        events,
        children,
        list_info,
        dynamic_content,
    })
}

#[allow(clippy::too_many_arguments)]
fn classify_attribute<'a>(
    item: &JSXAttributeItem<'a>,
    ctx: &mut Context,
    source: &str,
    static_attrs: &mut Vec<(String, String)>,
    dynamic_attrs: &mut Vec<(String, String)>,
    spread_attrs: &mut Vec<String>,
    ref_expr: &mut Option<String>,
    events: &mut Vec<Event>,
) {
    let attr = match item {
        JSXAttributeItem::Attribute(attr) => attr,
        JSXAttributeItem::SpreadAttribute(spread) => {
            spread_attrs.push(source_text(spread.argument.span(), source).to_string());
            return;
        }
    };

    let name = attribute_name(&attr.name);
    if name == "key" {
        // consumed by the List Extractor on the item's root element.
        return;
    }

    match &attr.value {
        Some(JSXAttributeValue::ExpressionContainer(container)) => {
            let Some(expr) = container.expression.as_expression() else {
                ctx.warn(Warning::AttrMalformed {
                    name,
                    reason: "expression container has no expression".to_string(),
                });
                return;
            };
            let expr_source = source_text(expr.span(), source).to_string();

            if name == "ref" {
                *ref_expr = Some(expr_source);
                return;
            }
            if let Some(event_name) = event_name(&name) {
                events.push(Event {
                    attr_name: name,
                    event_name,
                    handler_source: expr_source,
                });
                return;
            }
            if DYNAMIC_ATTR_TARGETS.contains(&name.as_str()) || reactive(&expr_source, ctx) {
                dynamic_attrs.push((name, expr_source));
            } else {
                static_attrs.push((name, expr_source));
            }
        }
        Some(JSXAttributeValue::StringLiteral(s)) => {
            static_attrs.push((name, s.value.to_string()));
        }
        Some(JSXAttributeValue::Element(inner)) => {
            static_attrs.push((name, source_text(inner.span(), source).to_string()));
        }
        Some(JSXAttributeValue::Fragment(frag)) => {
            static_attrs.push((name, source_text(frag.span(), source).to_string()));
        }
        None => {
            // bare boolean attribute, e.g. `<input disabled />`.
            static_attrs.push((name, String::new()));
        }
    }
}

fn event_name(attr_name: &str) -> Option<String> {
    if attr_name.len() > 2 && attr_name.starts_with("on") {
        Some(attr_name[2..].to_lowercase())
    } else {
        None
    }
}

fn build_children<'a>(
    tag: &str,
    raw_children: &[JSXChild<'a>],
    ctx: &mut Context,
    source: &str,
) -> (Vec<IRNode>, Option<ListInfo>) {
    let mut children = Vec::new();
    let mut list_info = None;

    for child in raw_children {
        if let JSXChild::ExpressionContainer(container) = child {
            if let Some(expr) = container.expression.as_expression() {
                if let Some(info) = list::try_extract(expr, ctx, source) {
                    if list_info.is_some() {
                        ctx.warn(Warning::ListDup {
                            tag: tag.to_string(),
                        });
                        let is_dynamic = true;
                        children.push(IRNode::Expression(ExpressionNode {
                            source: source_text(expr.span(), source).to_string(),
                            is_dynamic,
                        }));
                    } else {
                        list_info = Some(info);
                    }
                    continue;
                }
            }
        }
        if let Some(node) = dispatcher::dispatch_child(child, ctx, source) {
            children.push(node);
        }
    }

    (children, list_info)
}

enum ContentPart {
    Text(String),
    Expr(String, bool),
}

/// Computed from the surviving children whenever at least one direct child
/// is dynamic text — a dynamic `Expression`, or a `Conditional`
/// whose condition is reactive, both branches textual, and which therefore
/// did not itself receive a slot id. Any non-textual sibling (an `Element`,
/// `Fragment`, `Component`, or slotted `Conditional`) means the children
/// aren't purely textual and this descriptor doesn't apply.
fn compute_dynamic_content(children: &[IRNode], ctx: &Context) -> Option<DynamicContent> {
    let mut parts = Vec::new();
    let mut trigger: Option<String> = None;

    for child in children {
        match child {
            IRNode::Text(t) => parts.push(ContentPart::Text(t.content.clone())),
            IRNode::Expression(e) => {
                parts.push(ContentPart::Expr(e.source.clone(), e.is_dynamic));
                if e.is_dynamic && trigger.is_none() {
                    trigger = Some(e.source.clone());
                }
            }
            IRNode::Conditional(c) if c.slot_id.is_none() => {
                let is_trigger = reactive(&c.condition, ctx);
                let reconstructed = format!(
                    "{} ? {} : {}",
                    c.condition,
                    textual_source(&c.when_true),
                    textual_source(&c.when_false)
                );
                parts.push(ContentPart::Expr(reconstructed, is_trigger));
                if is_trigger && trigger.is_none() {
                    trigger = Some(c.condition.clone());
                }
            }
            _ => return None,
        }
    }

    let trigger = trigger?;

    let only_dynamic_expr = parts.len() == 1
        && matches!(parts.first(), Some(ContentPart::Expr(_, true)));

    let full_content = if only_dynamic_expr {
        match &parts[0] {
            ContentPart::Expr(s, true) => s.clone(),
            _ => unreachable!(),
        }
    } else {
        parts
            .iter()
            .map(|p| match p {
                ContentPart::Text(t) => format!("{t:?}"),
                ContentPart::Expr(s, _) => format!("String({s})"),
            })
            .collect::<Vec<_>>()
            .join(" + ")
    };

    Some(DynamicContent {
        expression: trigger,
        full_content,
    })
}

fn textual_source(node: &IRNode) -> String {
    match node {
        IRNode::Text(t) => format!("{:?}", t.content),
        IRNode::Expression(e) => e.source.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::NullTemplateGenerator;
    use crate::context::{ComponentRegistry, SignalDecl};
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;
    use std::collections::HashSet;

    fn first_return_jsx<'a>(program: &'a Program<'a>) -> &'a JSXElement<'a> {
        for stmt in &program.body {
            if let Statement::FunctionDeclaration(func) = stmt {
                if let Some(body) = &func.body {
                    for s in &body.statements {
                        if let Statement::ReturnStatement(ret) = s {
                            if let Some(Expression::JSXElement(el)) = &ret.argument {
                                return el;
                            }
                        }
                    }
                }
            }
        }
        panic!("no jsx return found");
    }

    #[test]
    fn onclick_handler_gets_a_slot() {
        let source = r#"
            function Widget() {
                return <button onClick={() => setCount(count() + 1)}>Go</button>;
            }
        "#;
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_typescript(true).with_jsx(true);
        let parsed = Parser::new(&allocator, source, source_type).parse();
        let el = first_return_jsx(&parsed.program);

        let gen = NullTemplateGenerator;
        let mut ctx = Context::new(
            "Widget",
            vec![],
            vec![],
            ComponentRegistry::new(),
            HashSet::new(),
            &gen,
        );
        let node = build(el, &mut ctx, source);
        match node {
            IRNode::Element(e) => {
                assert_eq!(e.events.len(), 1);
                assert_eq!(e.events[0].event_name, "click");
                assert!(e.slot_id.is_some());
            }
            _ => panic!("expected Element"),
        }
    }

    #[test]
    fn reactive_text_child_becomes_dynamic_content() {
        let source = r#"
            function Widget() {
                return <span>Count: {count()}</span>;
            }
        "#;
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_typescript(true).with_jsx(true);
        let parsed = Parser::new(&allocator, source, source_type).parse();
        let el = first_return_jsx(&parsed.program);

        let signals = vec![SignalDecl {
            getter_name: "count".to_string(),
            setter_name: "setCount".to_string(),
            initial_literal: "0".to_string(),
        }];
        let gen = NullTemplateGenerator;
        let mut ctx = Context::new(
            "Widget",
            signals,
            vec![],
            ComponentRegistry::new(),
            HashSet::new(),
            &gen,
        );
        let node = build(el, &mut ctx, source);
        match node {
            IRNode::Element(e) => {
                let dc = e.dynamic_content.expect("expected dynamic_content");
                assert_eq!(dc.expression, "count()");
                assert!(e.slot_id.is_some());
            }
            _ => panic!("expected Element"),
        }
    }

    #[test]
    fn static_attribute_stays_static() {
        let source = r#"
            function Widget() {
                return <div class="card">Hi</div>;
            }
        "#;
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_typescript(true).with_jsx(true);
        let parsed = Parser::new(&allocator, source, source_type).parse();
        let el = first_return_jsx(&parsed.program);

        let gen = NullTemplateGenerator;
        let mut ctx = Context::new(
            "Widget",
            vec![],
            vec![],
            ComponentRegistry::new(),
            HashSet::new(),
            &gen,
        );
        let node = build(el, &mut ctx, source);
        match node {
            IRNode::Element(e) => {
                assert_eq!(e.static_attrs, vec![("class".to_string(), "card".to_string())]);
                assert!(e.slot_id.is_none());
            }
            _ => panic!("expected Element"),
        }
    }
}
