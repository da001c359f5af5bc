//! GEXF 1.2: XML interchange format for property graphs.
//!
//! This crate provides a lossless codec for the GEXF 1.2 draft format as
//! published by the Gephi project, covering the graph topology, declared
//! attributes, hierarchy parents and the viz styling extension.
//!
//! # Overview
//!
//! The codec is built around three rules:
//! - **Canonical output**: encoding always produces one deterministic
//!   byte sequence for a given document, with a fixed attribute and child
//!   order and indentation-per-depth layout
//! - **Lenient input**: unknown elements and attributes from other GEXF
//!   extensions are skipped, and absent optional markup decodes to absent
//!   model fields rather than invented defaults
//! - **Tri-state collections**: an absent `<nodes>` element and an empty
//!   `<nodes></nodes>` element are different documents, and both survive a
//!   decode/encode round trip
//!
//! # Quick Start
//!
//! ```rust
//! use gexf::{decode_document, encode_document, Date, Document, Edge, Node};
//!
//! let mut doc = Document::new(Date::new(2009, 3, 20).unwrap());
//! doc.meta.creator = Some("Gephi.org".to_string());
//! doc.graph.nodes = Some(vec![
//!     Node {
//!         id: "0".to_string(),
//!         label: Some("Hello".to_string()),
//!         ..Node::default()
//!     },
//!     Node {
//!         id: "1".to_string(),
//!         label: Some("World".to_string()),
//!         ..Node::default()
//!     },
//! ]);
//! doc.graph.edges = Some(vec![Edge {
//!     id: "0".to_string(),
//!     source: "0".to_string(),
//!     target: "1".to_string(),
//!     ..Edge::default()
//! }]);
//!
//! // Encode to canonical XML
//! let bytes = encode_document(&doc).unwrap();
//!
//! // Decode back
//! let decoded = decode_document(&bytes).unwrap();
//! assert_eq!(decoded, doc);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Document, Graph, Node, Edge, viz styling)
//! - [`codec`]: XML encoding/decoding
//! - [`scalar`]: Leaf value types (Date, closed enumerations, color channels)
//! - [`error`]: Error types
//!
//! # Untrusted input
//!
//! The decoder is namespace-aware and safe on arbitrary input: structural
//! XML errors, out-of-domain dates, unknown enumeration tokens and color
//! channels outside `0..=255` are all rejected with descriptive errors
//! rather than clamped or guessed at.

pub mod codec;
pub mod error;
pub mod model;
pub mod scalar;

// Re-export commonly used types at crate root
pub use codec::{decode_document, encode_document, encode_document_with_options, EncodeOptions};
pub use error::{DecodeError, EncodeError, ErrorKind};
pub use model::{
    AttValue, AttributeBlock, AttributeDef, Color, Document, Edge, Graph, Meta, Node, Parent,
    Position, Size,
};
pub use scalar::{AttributeClass, Date, EdgeType, GraphMode, IdType};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// GEXF format version this crate reads and writes.
pub const FORMAT_VERSION: &str = "1.2";

/// Local name of the document root element.
pub const ROOT_LOCAL: &str = "gexf";

/// Primary document namespace.
pub const NS_GEXF: &str = "http://www.gexf.net/1.2draft";

/// Secondary namespace for node styling elements.
pub const NS_VIZ: &str = "http://www.gexf.net/1.2draft/viz";
