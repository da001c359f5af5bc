//! Core data types for GEXF documents.
//!
//! The model is pure field layout: construction and field access only, no
//! validation. All codec logic lives in [`crate::codec`] and all text
//! conversions in [`crate::scalar`].

pub mod document;
pub mod edge;
pub mod graph;
pub mod node;

pub use document::{Document, Meta};
pub use edge::Edge;
pub use graph::{AttributeBlock, AttributeDef, Graph};
pub use node::{AttValue, Color, Node, Parent, Position, Size};
