//! The Dispatcher: the single routing point every child-position AST node
//! passes through. Element Builder, Expression Classifier, Text
//! normalization and the Component Call Builder are all reached only from
//! here (or recursively from each other via this module), never directly.

use oxc_ast::ast::*;

use crate::ast_util::{is_pascal_case, tag_name};
use crate::component_call;
use crate::context::Context;
use crate::diagnostics::Warning;
use crate::element;
use crate::expression;
use crate::ir::{FragmentNode, IRNode};
use crate::text;

/// Returns `None` for children that contribute no IR (discarded whitespace,
/// bare spreads in child position).
pub fn dispatch_child<'a>(child: &JSXChild<'a>, ctx: &mut Context, source: &str) -> Option<IRNode> {
    match child {
        JSXChild::Text(text_node) => text::normalize_text(text_node.value.as_str()),
        JSXChild::Element(el) => Some(dispatch_element(el, ctx, source)),
        JSXChild::Fragment(frag) => Some(dispatch_fragment(frag, ctx, source)),
        JSXChild::ExpressionContainer(container) => {
            let expr = container.expression.as_expression()?;
            expression::classify(expr, ctx, source)
        }
        JSXChild::Spread(_) => None,
    }
}

/// Routes a JSX element to the Component Call Builder when its tag is
/// PascalCase and resolves against the component registry; otherwise to the
/// Element Builder. A PascalCase tag with no registered summary downgrades to
/// a plain element, with a warning recorded so the caller can tell a genuine
/// HTML tag apart from a component reference that simply never got resolved.
pub fn dispatch_element<'a>(el: &JSXElement<'a>, ctx: &mut Context, source: &str) -> IRNode {
    let tag = tag_name(&el.opening_element.name);
    if is_pascal_case(&tag) {
        if ctx.components().get(&tag).is_some() {
            return component_call::build(el, ctx, source);
        }
        ctx.warn(Warning::ComponentUnresolved { name: tag.clone() });
    }
    element::build(el, ctx, source)
}

pub fn dispatch_fragment<'a>(frag: &JSXFragment<'a>, ctx: &mut Context, source: &str) -> IRNode {
    let children = frag
        .children
        .iter()
        .filter_map(|c| dispatch_child(c, ctx, source))
        .collect();
    IRNode::Fragment(FragmentNode { children })
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

    #[test]
    fn unregistered_pascal_tag_downgrades_to_element() {
        let source = r#"
            function Page() {
                return <Unknown />;
            }
        "#;
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_typescript(true).with_jsx(true);
        let parsed = Parser::new(&allocator, source, source_type).parse();
        let Statement::FunctionDeclaration(func) = &parsed.program.body[0] else {
            panic!("expected function");
        };
        let Statement::ReturnStatement(ret) = &func.body.as_ref().unwrap().statements[0] else {
            panic!("expected return");
        };
        let Some(Expression::JSXElement(el)) = &ret.argument else {
            panic!("expected jsx");
        };

        let gen = NullTemplateGenerator;
        let mut ctx = Context::new(
            "Page",
            vec![],
            vec![],
            ComponentRegistry::new(),
            HashSet::new(),
            &gen,
        );
        let node = dispatch_element(el, &mut ctx, source);
        assert!(matches!(node, IRNode::Element(_)));
        assert_eq!(ctx.warnings().len(), 1);
        assert!(matches!(
            ctx.warnings()[0],
            Warning::ComponentUnresolved { .. }
        ));
    }
}
