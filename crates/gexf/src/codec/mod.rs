//! XML encoding/decoding for GEXF documents.

pub mod decode;
pub mod encode;

pub use decode::decode_document;
pub use encode::{encode_document, encode_document_with_options, EncodeOptions};
