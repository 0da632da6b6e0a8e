//! Small AST helpers shared by the dispatcher, element builder, expression
//! classifier, list extractor and component-call builder.

use oxc_ast::ast::*;
use oxc_span::{GetSpan, Span};

/// Raw source text for a span. Every IR field that stores "source text"
/// goes through this.
pub fn source_text<'s>(span: Span, source: &'s str) -> &'s str {
    span.source_text(source)
}

/// Recursively unwrap a parenthesized expression. Used anywhere an
/// expression is inspected for JSX-ness — ternary branches, `&&`/`||`
/// right-hand sides, return statements, map-callback bodies.
pub fn unwrap_parens<'a, 'b>(expr: &'b Expression<'a>) -> &'b Expression<'a> {
    match expr {
        Expression::ParenthesizedExpression(inner) => unwrap_parens(&inner.expression),
        _ => expr,
    }
}

pub fn tag_name(name: &JSXElementName) -> String {
    match name {
        JSXElementName::Identifier(id) => id.name.to_string(),
        JSXElementName::IdentifierReference(id) => id.name.to_string(),
        JSXElementName::NamespacedName(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
        JSXElementName::MemberExpression(me) => member_name(me),
        JSXElementName::ThisExpression(_) => "this".to_string(),
    }
}

fn member_name(me: &JSXMemberExpression) -> String {
    let object = match &me.object {
        JSXMemberExpressionObject::IdentifierReference(id) => id.name.to_string(),
        JSXMemberExpressionObject::MemberExpression(inner) => member_name(inner),
        _ => "unknown".to_string(),
    };
    format!("{}.{}", object, me.property.name)
}

pub fn attribute_name(name: &JSXAttributeName) -> String {
    match name {
        JSXAttributeName::Identifier(id) => id.name.to_string(),
        JSXAttributeName::NamespacedName(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
    }
}

/// A PascalCase tag names a component reference; lowercase/kebab names an
/// HTML element.
pub fn is_pascal_case(name: &str) -> bool {
    name.chars()
        .next()
        .map(|c| c.is_ascii_uppercase())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_detection() {
        assert!(is_pascal_case("Button"));
        assert!(is_pascal_case("HeroSection"));
        assert!(!is_pascal_case("div"));
        assert!(!is_pascal_case("span"));
        assert!(!is_pascal_case(""));
    }
}
