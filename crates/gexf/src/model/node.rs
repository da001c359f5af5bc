//! Nodes, attribute-value assignments, parent references and viz styling.

/// A graph vertex.
///
/// `attvalues` and `parents` are tri-state collections like the graph-level
/// ones. The styling fields belong to the secondary viz namespace
/// ([`crate::NS_VIZ`]) and are each independently optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// Identifier, unique within the document by convention (not enforced).
    pub id: String,
    pub label: Option<String>,
    pub attvalues: Option<Vec<AttValue>>,
    pub parents: Option<Vec<Parent>>,
    pub size: Option<Size>,
    pub position: Option<Position>,
    pub color: Option<Color>,
}

/// Assigns a raw string value to one attribute definition.
///
/// Duplicates with the same `for` are preserved in order, never merged, and
/// the reference is not validated against declared definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttValue {
    /// The `for` attribute: id of the attribute definition being assigned.
    pub for_: String,
    pub value: String,
}

/// A back-reference to an ancestor node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parent {
    /// The `for` attribute: id of the ancestor node (not validated).
    pub for_: String,
}

/// Node display size (viz namespace).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Size {
    pub value: f64,
}

/// Node display position (viz namespace).
///
/// `z` decodes to `0.0` when absent from markup; all three coordinates are
/// always emitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Node display color as an RGB triple (viz namespace).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
