//! Front end of a JSX-augmented-dialect compiler: lowers a parsed JSX/
//! TypeScript AST into an `IRNode` forest consumed by two downstream
//! emitters (a server-side HTML/string generator and a client hydration
//! module). This crate owns exactly one pass: entry finding, dispatch,
//! element/expression/list building and component-call linkage. Parsing,
//! symbol collection and both emitters live outside it.
//!
//! The pass is single-threaded and cooperative per [`Context`] — callers
//! compiling multiple independent components may fan the work out across
//! threads (see [`compile_components`]) provided each gets its own
//! `Context`; nothing here is shared mutable state.

#[cfg(feature = "napi")]
use napi_derive::napi;

pub mod ast_util;
pub mod collaborators;
pub mod component_call;
pub mod context;
pub mod diagnostics;
pub mod dispatcher;
pub mod element;
pub mod entry;
pub mod expression;
pub mod ir;
pub mod list;
pub mod reactive;
pub mod text;

use oxc_ast::ast::Program;

use collaborators::{NullTemplateGenerator, TemplateGenerator};
use context::{ComponentRegistry, Context, MemoDecl, SignalDecl};
use diagnostics::Warning;
use entry::EntryOptions;
use ir::IRNode;

/// Everything the pass produces for one component: the IR root (`None` if
/// no matching entry was found — the pass never aborts, it just has nothing
/// to return), the accumulated warning sink, and the number of slot ids
/// issued.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CompileOutput {
    pub root: Option<IRNode>,
    pub warnings: Vec<Warning>,
    pub slot_count: u32,
}

/// Everything needed to lower one component: its parsed AST, the original
/// source text (for span-to-text extraction), and the symbol-collector
/// output this component was resolved against.
pub struct CompileJob<'a, 'p> {
    pub program: &'p Program<'a>,
    pub source: &'a str,
    pub component_name: String,
    pub signals: Vec<SignalDecl>,
    pub memos: Vec<MemoDecl>,
    pub components: ComponentRegistry,
    pub value_props: std::collections::HashSet<String>,
    pub entry_options: EntryOptions,
}

/// Lowers a single component's AST into an `IRNode` forest.
pub fn compile_component<'a>(
    program: &Program<'a>,
    source: &str,
    component_name: impl Into<String>,
    signals: Vec<SignalDecl>,
    memos: Vec<MemoDecl>,
    components: ComponentRegistry,
    value_props: std::collections::HashSet<String>,
    entry_options: EntryOptions,
    template_generator: &dyn TemplateGenerator,
) -> CompileOutput {
    let mut ctx = Context::new(
        component_name,
        signals,
        memos,
        components,
        value_props,
        template_generator,
    );
    let root = entry::find_entry(program, &entry_options, &mut ctx, source);
    let slot_count = ctx.slot_count();
    CompileOutput {
        root,
        warnings: ctx.into_warnings(),
        slot_count,
    }
}

/// Fans a batch of independent component compilations out across a rayon
/// thread pool. Each job builds its own `Context`, so there is no shared
/// mutable state to synchronize.
pub fn compile_components<'a, 'p>(
    jobs: Vec<CompileJob<'a, 'p>>,
    template_generator: &(dyn TemplateGenerator + Sync),
) -> Vec<CompileOutput>
where
    'a: 'p,
{
    use rayon::prelude::*;

    jobs.into_par_iter()
        .map(|job| {
            compile_component(
                job.program,
                job.source,
                job.component_name,
                job.signals,
                job.memos,
                job.components,
                job.value_props,
                job.entry_options,
                template_generator,
            )
        })
        .collect()
}

/// Wire-format options for the napi bridge, deserialized from a JSON string
/// rather than modeled as a nested `#[napi(object)]` — the same trick the
/// rest of this codebase uses for `ParseFullOptions`, to sidestep napi's
/// `undefined`-vs-`null` edge cases on deeply nested option structs.
#[cfg(feature = "napi")]
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LowerOptions {
    pub component_name: String,
    #[serde(default)]
    pub signals: Vec<SignalDecl>,
    #[serde(default)]
    pub memos: Vec<MemoDecl>,
    #[serde(default)]
    pub components: Vec<context::ComponentSummary>,
    #[serde(default)]
    pub value_props: Vec<String>,
    #[serde(default)]
    pub target_component_name: Option<String>,
}

/// Parses `source` (the only place this crate touches the parser, purely to
/// bridge the FFI boundary — the pass itself never drives parsing) and runs
/// the lowering pass, returning the `CompileOutput` as a JSON string.
#[cfg(feature = "napi")]
#[napi]
pub fn lower_jsx_to_ir(source: String, options_json: String) -> napi::Result<String> {
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    let options: LowerOptions = serde_json::from_str(&options_json)
        .map_err(|e| napi::Error::from_reason(format!("options parse error: {e}")))?;

    let allocator = Allocator::default();
    let source_type = SourceType::default().with_typescript(true).with_jsx(true);
    let parsed = Parser::new(&allocator, &source, source_type).parse();

    let mut registry = ComponentRegistry::new();
    for summary in options.components {
        registry.insert(summary);
    }

    let value_props: std::collections::HashSet<String> = options.value_props.into_iter().collect();
    let entry_options = EntryOptions {
        target_component_name: options.target_component_name,
    };
    let generator = NullTemplateGenerator;

    let output = compile_component(
        &parsed.program,
        &source,
        options.component_name,
        options.signals,
        options.memos,
        registry,
        value_props,
        entry_options,
        &generator,
    );

    serde_json::to_string(&output)
        .map_err(|e| napi::Error::from_reason(format!("failed to serialize compile output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    #[test]
    fn compiles_a_simple_component_end_to_end() {
        let source = r#"
            function Counter() {
                return (
                    <div>
                        <span>Count: {count()}</span>
                        <button onClick={() => setCount(count() + 1)}>+1</button>
                    </div>
                );
            }
        "#;
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_typescript(true).with_jsx(true);
        let parsed = Parser::new(&allocator, source, source_type).parse();

        let signals = vec![SignalDecl {
            getter_name: "count".to_string(),
            setter_name: "setCount".to_string(),
            initial_literal: "0".to_string(),
        }];
        let generator = NullTemplateGenerator;

        let output = compile_component(
            &parsed.program,
            source,
            "Counter",
            signals,
            vec![],
            ComponentRegistry::new(),
            std::collections::HashSet::new(),
            EntryOptions::default(),
            &generator,
        );

        let root = output.root.expect("expected a root node");
        match root {
            IRNode::Element(e) => {
                assert_eq!(e.tag, "div");
                assert_eq!(e.children.len(), 2);
            }
            _ => panic!("expected element root"),
        }
        assert_eq!(output.slot_count, 2);
    }

    #[test]
    fn missing_entry_compiles_to_none_not_a_panic() {
        let source = "function notAComponent() { return 1; }";
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_typescript(true).with_jsx(true);
        let parsed = Parser::new(&allocator, source, source_type).parse();
        let generator = NullTemplateGenerator;

        let output = compile_component(
            &parsed.program,
            source,
            "Missing",
            vec![],
            vec![],
            ComponentRegistry::new(),
            std::collections::HashSet::new(),
            EntryOptions::default(),
            &generator,
        );
        assert!(output.root.is_none());
        assert!(output.warnings.is_empty());
    }
}
