//! Graph payload and attribute declarations.

use crate::model::{Edge, Node};
use crate::scalar::{AttributeClass, EdgeType, GraphMode, IdType};

/// The graph payload of a document.
///
/// The enumerated attributes are `Option` because the codec never defaults
/// them: an attribute absent from markup decodes to `None`, and interpreting
/// that against the conventional defaults (`static`, `string`, `directed`)
/// is the consumer's job.
///
/// The collection fields are tri-state: `None` means the wrapping element is
/// absent from markup, `Some(vec![])` means it is present with no children,
/// and both states survive a round-trip unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub mode: Option<GraphMode>,
    pub id_type: Option<IdType>,
    pub default_edge_type: Option<EdgeType>,
    pub attributes: Option<AttributeBlock>,
    pub nodes: Option<Vec<Node>>,
    pub edges: Option<Vec<Edge>>,
}

/// Declares typed attribute slots for one element class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBlock {
    pub class: AttributeClass,
    pub attributes: Vec<AttributeDef>,
}

/// One named, typed attribute slot.
///
/// `value_type` is free-form text ("string", "float", "boolean", ...); the
/// codec does not constrain it, and values assigned through [`AttValue`] are
/// never coerced against it.
///
/// [`AttValue`]: crate::model::AttValue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeDef {
    pub id: String,
    pub title: String,
    pub value_type: String,
    /// Default value, emitted as a `<default>` child element when set.
    pub default: Option<String>,
}
