//! External collaborator boundaries. This pass only needs their call shape,
//! not their implementation — the real template generator and symbol
//! collector live downstream / upstream of this crate.

use oxc_ast::ast::JSXElement;

use crate::context::ComponentRegistry;
use crate::ir::Event;

/// `jsx_to_template`: turns a list item's JSX body into the emitter-facing
/// template string plus the events bound within it. Its grammar is out of
/// scope here; this trait only captures the boundary so the List Extractor
/// can be exercised without the real emitter.
pub trait TemplateGenerator {
    fn generate<'a>(
        &self,
        body: &JSXElement<'a>,
        param_name: &str,
        components: &ComponentRegistry,
    ) -> (String, Vec<Event>);
}

/// Stand-in used in tests and wherever the real emitter isn't wired in.
pub struct NullTemplateGenerator;

impl TemplateGenerator for NullTemplateGenerator {
    fn generate<'a>(
        &self,
        _body: &JSXElement<'a>,
        _param_name: &str,
        _components: &ComponentRegistry,
    ) -> (String, Vec<Event>) {
        (String::new(), Vec::new())
    }
}
