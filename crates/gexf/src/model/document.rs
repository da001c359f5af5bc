//! Document root and metadata header.

use crate::model::Graph;
use crate::scalar::Date;

/// A complete GEXF document.
///
/// The root element identity (namespace, local name) and the format version
/// are fixed by [`crate::NS_GEXF`], [`crate::ROOT_LOCAL`] and
/// [`crate::FORMAT_VERSION`]; they are not document state.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub meta: Meta,
    pub graph: Graph,
}

impl Document {
    /// Creates a document with the given last-modified date and an empty graph.
    pub fn new(last_modified: Date) -> Self {
        Self {
            meta: Meta::new(last_modified),
            graph: Graph::default(),
        }
    }
}

/// Descriptive header of a document.
///
/// `last_modified` is the only required field; the optional text fields are
/// omitted from markup when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    pub last_modified: Date,
    pub creator: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
}

impl Meta {
    /// Creates a header with only the required last-modified date set.
    pub fn new(last_modified: Date) -> Self {
        Self {
            last_modified,
            creator: None,
            keywords: None,
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new(Date::new(2009, 3, 20).unwrap());
        assert_eq!(doc.meta.last_modified, Date::new(2009, 3, 20).unwrap());
        assert!(doc.meta.creator.is_none());
        assert!(doc.meta.keywords.is_none());
        assert!(doc.meta.description.is_none());
        assert_eq!(doc.graph, Graph::default());
    }
}
