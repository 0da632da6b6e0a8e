//! The pass's flat diagnostic taxonomy: structural malformation, lookup
//! miss, ambiguity, context violation. Every `Warning` is a recoverable note
//! appended to a `Context`'s sink — nothing in this crate is fatal.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "code", rename_all = "kebab-case")]
pub enum Warning {
    #[serde(rename = "W-LIST-DUP")]
    ListDup { tag: String },
    #[serde(rename = "W-LIST-NOKEY")]
    ListNoKey { array_source: String },
    #[serde(rename = "W-COMPONENT-UNRESOLVED")]
    ComponentUnresolved { name: String },
    #[serde(rename = "W-ATTR-MALFORMED")]
    AttrMalformed { name: String, reason: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::ListDup { tag } => write!(
                f,
                "multiple .map() lists found as children of <{tag}>; only the first was promoted to list_info"
            ),
            Warning::ListNoKey { array_source } => write!(
                f,
                "list over `{array_source}` has no key attribute on its root item"
            ),
            Warning::ComponentUnresolved { name } => write!(
                f,
                "`{name}` looks like a component reference but has no registered summary; lowered as a plain element"
            ),
            Warning::AttrMalformed { name, reason } => {
                write!(f, "attribute `{name}` could not be classified: {reason}")
            }
        }
    }
}
