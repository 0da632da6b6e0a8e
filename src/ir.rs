//! The intermediate representation produced by the lowering pass.
//!
//! `IRNode` is a tagged-variant sum type rather than a dynamic-type-checked
//! tree: every consumer (the two downstream emitters) matches on a closed
//! set of six variants instead of probing node kind at runtime. The aux
//! records below (`Event`, `ListInfo`, `DynamicContent`, `PropAssign`,
//! `ChildInit`) carry the extra facts each variant needs without widening
//! the variant set itself.
//!
//! Invariants (see component.rs / validate.rs in the wider crate history for
//! the closest prior art to this shape):
//! 1. Slot ids, where present, are gapless decimal strings assigned in
//!    document order.
//! 2. A node only carries a slot id if something about it is dynamic:
//!    events, dynamic attributes, a ref, list info, or dynamic content.
//! 3. `Text` nodes never carry a slot id.
//! 4. `Conditional.when_true` / `when_false` are always present, even when
//!    one side is a synthesized `null` expression.
//! 5. `ListInfo.item_ir` is built under a reactivity scope where the item
//!    (and index, if bound) are not reactive even if they shadow a
//!    signal/memo getter name.
//! 6. `is_dynamic` flags are computed solely from explicit signal/memo
//!    getter calls (plus the special-cased bare `children` identifier) —
//!    never from prop identifiers alone.
//! 7. A `Component` node's prop list and its spread-prop sources are kept
//!    separate; the split is decided per-attribute, not per-element.
//! 8. Every builder is total: it always returns an `IRNode` (or `None` only
//!    when the input contributes no IR at all, e.g. discarded whitespace).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IRNode {
    Text(TextNode),
    Expression(ExpressionNode),
    Element(ElementNode),
    Fragment(FragmentNode),
    Component(ComponentNode),
    Conditional(ConditionalNode),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextNode {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpressionNode {
    pub source: String,
    pub is_dynamic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    pub tag: String,
    pub slot_id: Option<String>,
    pub static_attrs: Vec<(String, String)>,
    pub dynamic_attrs: Vec<(String, String)>,
    pub spread_attrs: Vec<String>,
    pub ref_expr: Option<String>,
    pub events: Vec<Event>,
    pub children: Vec<IRNode>,
    pub list_info: Option<ListInfo>,
    pub dynamic_content: Option<DynamicContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FragmentNode {
    pub children: Vec<IRNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentNode {
    pub name: String,
    pub props: Vec<PropAssign>,
    pub spread_props: Vec<String>,
    pub children: Vec<IRNode>,
    pub child_init: Option<ChildInit>,
    pub has_lazy_children: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionalNode {
    pub slot_id: Option<String>,
    pub condition: String,
    pub when_true: Box<IRNode>,
    pub when_false: Box<IRNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub attr_name: String,
    pub event_name: String,
    pub handler_source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListInfo {
    pub array_source: String,
    pub param_name: String,
    pub index_param_name: Option<String>,
    pub key_expression: Option<String>,
    pub item_ir: Option<Box<IRNode>>,
    pub item_template: String,
    pub item_events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DynamicContent {
    pub expression: String,
    pub full_content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropAssign {
    pub name: String,
    pub source: String,
    pub is_dynamic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildInit {
    pub name: String,
    pub props_struct_source: String,
}

impl IRNode {
    pub fn slot_id(&self) -> Option<&str> {
        match self {
            IRNode::Element(e) => e.slot_id.as_deref(),
            IRNode::Conditional(c) => c.slot_id.as_deref(),
            _ => None,
        }
    }
}
