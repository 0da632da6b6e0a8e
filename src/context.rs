//! `Context` is threaded through every builder call by reference — never
//! stashed behind module-level statics — so that independent components can
//! be compiled in parallel, each with their own `Context`.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::collaborators::TemplateGenerator;
use crate::diagnostics::Warning;
use crate::reactive::compile_call_pattern;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDecl {
    pub getter_name: String,
    pub setter_name: String,
    pub initial_literal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoDecl {
    pub getter_name: String,
    pub computation_source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub name: String,
    pub signals: Vec<SignalDecl>,
    pub props: Vec<String>,
}

impl ComponentSummary {
    pub fn new(name: impl Into<String>) -> Self {
        ComponentSummary {
            name: name.into(),
            signals: Vec::new(),
            props: Vec::new(),
        }
    }
}

/// The symbol collector's output: a name-keyed table of sibling/ancestor
/// components available for inter-component linkage.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: std::collections::HashMap<String, ComponentSummary>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        ComponentRegistry::default()
    }

    pub fn insert(&mut self, summary: ComponentSummary) {
        self.components.insert(summary.name.clone(), summary);
    }

    pub fn get(&self, name: &str) -> Option<&ComponentSummary> {
        self.components.get(name)
    }
}

/// Gapless decimal-string slot ids, issued strictly in document order.
#[derive(Debug, Default)]
struct SlotIdGenerator {
    next: u32,
}

impl SlotIdGenerator {
    fn next_slot_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

/// Single-threaded, per-component lowering state. Safe to build one per
/// thread and fan out across independent components; never shared mutably
/// across threads.
pub struct Context<'g> {
    pub current_component_name: String,
    signals: Vec<SignalDecl>,
    memos: Vec<MemoDecl>,
    /// Compiled once, in getter-declaration order matching `signals`/`memos`
    /// — see `reactive.rs` for why these can't just be a `lazy_static!`.
    signal_patterns: Vec<Regex>,
    memo_patterns: Vec<Regex>,
    components: ComponentRegistry,
    value_props: HashSet<String>,
    slot_ids: SlotIdGenerator,
    warnings: Vec<Warning>,
    /// Names shadowed by an enclosing list-item binding: excluded from the
    /// reactivity predicate even if they collide with a signal/memo getter
    /// name.
    shadowed: Vec<String>,
    template_generator: &'g (dyn TemplateGenerator + 'g),
}

impl<'g> Context<'g> {
    pub fn new(
        current_component_name: impl Into<String>,
        signals: Vec<SignalDecl>,
        memos: Vec<MemoDecl>,
        components: ComponentRegistry,
        value_props: HashSet<String>,
        template_generator: &'g (dyn TemplateGenerator + 'g),
    ) -> Self {
        let signal_patterns = signals.iter().map(|s| compile_call_pattern(&s.getter_name)).collect();
        let memo_patterns = memos.iter().map(|m| compile_call_pattern(&m.getter_name)).collect();
        Context {
            current_component_name: current_component_name.into(),
            signals,
            memos,
            signal_patterns,
            memo_patterns,
            components,
            value_props,
            slot_ids: SlotIdGenerator::default(),
            warnings: Vec::new(),
            shadowed: Vec::new(),
            template_generator,
        }
    }

    pub fn next_slot_id(&mut self) -> String {
        self.slot_ids.next_slot_id()
    }

    pub fn slot_count(&self) -> u32 {
        self.slot_ids.next
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    pub fn signals(&self) -> &[SignalDecl] {
        &self.signals
    }

    pub fn memos(&self) -> &[MemoDecl] {
        &self.memos
    }

    pub fn signal_patterns(&self) -> &[Regex] {
        &self.signal_patterns
    }

    pub fn memo_patterns(&self) -> &[Regex] {
        &self.memo_patterns
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn value_props(&self) -> &HashSet<String> {
        &self.value_props
    }

    pub fn push_non_reactive(&mut self, name: String) {
        self.shadowed.push(name);
    }

    pub fn pop_non_reactive(&mut self) {
        self.shadowed.pop();
    }

    pub fn is_shadowed(&self, name: &str) -> bool {
        self.shadowed.iter().any(|s| s == name)
    }

    pub fn template_generator(&self) -> &'g (dyn TemplateGenerator + 'g) {
        self.template_generator
    }
}
