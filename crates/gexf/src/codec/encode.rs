//! Canonical XML emission for GEXF documents.
//!
//! Output layout mirrors the reference encoder: childless elements render as
//! `<tag ...></tag>` on one line, text leaves as `<tag>text</tag>`, every
//! other child on its own indented line. No self-closing tags, no XML
//! declaration, no trailing newline. Indentation is presentation only and
//! never affects decoding.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::EncodeError;
use crate::model::{AttValue, AttributeBlock, AttributeDef, Document, Edge, Meta, Node, Parent};
use crate::{FORMAT_VERSION, NS_GEXF, NS_VIZ, ROOT_LOCAL};

/// Encoding options.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Indent unit emitted per nesting level.
    pub indent: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}

impl EncodeOptions {
    /// Creates options with the default two-space indent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with the given indent unit.
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }
}

/// Encodes a document to markup bytes with the default options.
pub fn encode_document(doc: &Document) -> Result<Vec<u8>, EncodeError> {
    encode_document_with_options(doc, &EncodeOptions::default())
}

/// Encodes a document to markup bytes.
pub fn encode_document_with_options(
    doc: &Document,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let mut em = Emitter::new(&options.indent);

    let mut root = BytesStart::new(ROOT_LOCAL);
    root.push_attribute(("xmlns", NS_GEXF));
    root.push_attribute(("version", FORMAT_VERSION));
    em.open(root)?;
    write_meta(&mut em, &doc.meta)?;
    write_graph(&mut em, doc)?;
    em.close(ROOT_LOCAL)?;

    Ok(em.finish())
}

struct Emitter<'a> {
    writer: Writer<Vec<u8>>,
    indent: &'a str,
    depth: usize,
}

impl<'a> Emitter<'a> {
    fn new(indent: &'a str) -> Self {
        Self {
            writer: Writer::new(Vec::new()),
            indent,
            depth: 0,
        }
    }

    fn emit(&mut self, event: Event<'_>) -> Result<(), EncodeError> {
        self.writer
            .write_event(event)
            .map_err(|e| EncodeError::Write(e.to_string()))
    }

    /// Starts a new line at the current depth.
    fn line(&mut self) -> Result<(), EncodeError> {
        let mut text = String::with_capacity(1 + self.indent.len() * self.depth);
        text.push('\n');
        for _ in 0..self.depth {
            text.push_str(self.indent);
        }
        self.emit(Event::Text(BytesText::from_escaped(text)))
    }

    fn open(&mut self, start: BytesStart<'_>) -> Result<(), EncodeError> {
        self.emit(Event::Start(start))?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), EncodeError> {
        self.depth -= 1;
        self.line()?;
        self.emit(Event::End(BytesEnd::new(name)))
    }

    /// A childless element on a single line: `<tag ...></tag>`.
    fn leaf(&mut self, name: &str, start: BytesStart<'_>) -> Result<(), EncodeError> {
        self.emit(Event::Start(start))?;
        self.emit(Event::End(BytesEnd::new(name)))
    }

    /// A text-only element on a single line: `<tag>text</tag>`.
    fn text_leaf(&mut self, name: &str, text: &str) -> Result<(), EncodeError> {
        self.emit(Event::Start(BytesStart::new(name)))?;
        self.emit(Event::Text(BytesText::new(text)))?;
        self.emit(Event::End(BytesEnd::new(name)))
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn write_meta(em: &mut Emitter<'_>, meta: &Meta) -> Result<(), EncodeError> {
    let date = meta.last_modified.format()?;
    let mut start = BytesStart::new("meta");
    start.push_attribute(("lastmodifieddate", date.as_str()));

    em.line()?;
    if meta.creator.is_none() && meta.keywords.is_none() && meta.description.is_none() {
        return em.leaf("meta", start);
    }
    em.open(start)?;
    if let Some(creator) = &meta.creator {
        em.line()?;
        em.text_leaf("creator", creator)?;
    }
    if let Some(keywords) = &meta.keywords {
        em.line()?;
        em.text_leaf("keywords", keywords)?;
    }
    if let Some(description) = &meta.description {
        em.line()?;
        em.text_leaf("description", description)?;
    }
    em.close("meta")
}

fn write_graph(em: &mut Emitter<'_>, doc: &Document) -> Result<(), EncodeError> {
    let graph = &doc.graph;
    let mut start = BytesStart::new("graph");
    // Enumerated attributes equal to their conventional default are omitted.
    if let Some(mode) = graph.mode {
        if mode != Default::default() {
            start.push_attribute(("mode", mode.as_token()));
        }
    }
    if let Some(id_type) = graph.id_type {
        if id_type != Default::default() {
            start.push_attribute(("idtype", id_type.as_token()));
        }
    }
    if let Some(edge_type) = graph.default_edge_type {
        if edge_type != Default::default() {
            start.push_attribute(("defaultedgetype", edge_type.as_token()));
        }
    }

    em.line()?;
    if graph.attributes.is_none() && graph.nodes.is_none() && graph.edges.is_none() {
        return em.leaf("graph", start);
    }
    em.open(start)?;
    if let Some(block) = &graph.attributes {
        write_attribute_block(em, block)?;
    }
    if let Some(nodes) = &graph.nodes {
        write_collection(em, "nodes", nodes, write_node)?;
    }
    if let Some(edges) = &graph.edges {
        write_collection(em, "edges", edges, write_edge)?;
    }
    em.close("graph")
}

/// Writes a tri-state wrapper that is known to be present: empty sequences
/// become `<name></name>` on one line, populated ones one child per line.
fn write_collection<T>(
    em: &mut Emitter<'_>,
    name: &str,
    items: &[T],
    write_item: fn(&mut Emitter<'_>, &T) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    em.line()?;
    if items.is_empty() {
        return em.leaf(name, BytesStart::new(name));
    }
    em.open(BytesStart::new(name))?;
    for item in items {
        write_item(em, item)?;
    }
    em.close(name)
}

fn write_attribute_block(em: &mut Emitter<'_>, block: &AttributeBlock) -> Result<(), EncodeError> {
    let mut start = BytesStart::new("attributes");
    start.push_attribute(("class", block.class.as_token()));

    em.line()?;
    if block.attributes.is_empty() {
        return em.leaf("attributes", start);
    }
    em.open(start)?;
    for def in &block.attributes {
        write_attribute_def(em, def)?;
    }
    em.close("attributes")
}

fn write_attribute_def(em: &mut Emitter<'_>, def: &AttributeDef) -> Result<(), EncodeError> {
    let mut start = BytesStart::new("attribute");
    start.push_attribute(("id", def.id.as_str()));
    start.push_attribute(("title", def.title.as_str()));
    start.push_attribute(("type", def.value_type.as_str()));

    em.line()?;
    match &def.default {
        None => em.leaf("attribute", start),
        Some(default) => {
            em.open(start)?;
            em.line()?;
            em.text_leaf("default", default)?;
            em.close("attribute")
        }
    }
}

fn write_node(em: &mut Emitter<'_>, node: &Node) -> Result<(), EncodeError> {
    let mut start = BytesStart::new("node");
    start.push_attribute(("id", node.id.as_str()));
    if let Some(label) = &node.label {
        start.push_attribute(("label", label.as_str()));
    }

    em.line()?;
    let childless = node.attvalues.is_none()
        && node.parents.is_none()
        && node.size.is_none()
        && node.position.is_none()
        && node.color.is_none();
    if childless {
        return em.leaf("node", start);
    }
    em.open(start)?;
    if let Some(values) = &node.attvalues {
        write_collection(em, "attvalues", values, write_attvalue)?;
    }
    if let Some(parents) = &node.parents {
        write_collection(em, "parents", parents, write_parent)?;
    }
    if let Some(size) = &node.size {
        let mut viz = viz_start("size");
        viz.push_attribute(("value", size.value.to_string().as_str()));
        em.line()?;
        em.leaf("size", viz)?;
    }
    if let Some(position) = &node.position {
        let mut viz = viz_start("position");
        viz.push_attribute(("x", position.x.to_string().as_str()));
        viz.push_attribute(("y", position.y.to_string().as_str()));
        viz.push_attribute(("z", position.z.to_string().as_str()));
        em.line()?;
        em.leaf("position", viz)?;
    }
    if let Some(color) = &node.color {
        let mut viz = viz_start("color");
        viz.push_attribute(("r", color.r.to_string().as_str()));
        viz.push_attribute(("g", color.g.to_string().as_str()));
        viz.push_attribute(("b", color.b.to_string().as_str()));
        em.line()?;
        em.leaf("color", viz)?;
    }
    em.close("node")
}

/// A styling element carrying its namespace declaration locally.
fn viz_start(name: &'static str) -> BytesStart<'static> {
    let mut start = BytesStart::new(name);
    start.push_attribute(("xmlns", NS_VIZ));
    start
}

fn write_attvalue(em: &mut Emitter<'_>, value: &AttValue) -> Result<(), EncodeError> {
    let mut start = BytesStart::new("attvalue");
    start.push_attribute(("for", value.for_.as_str()));
    start.push_attribute(("value", value.value.as_str()));
    em.line()?;
    em.leaf("attvalue", start)
}

fn write_parent(em: &mut Emitter<'_>, parent: &Parent) -> Result<(), EncodeError> {
    let mut start = BytesStart::new("parent");
    start.push_attribute(("for", parent.for_.as_str()));
    em.line()?;
    em.leaf("parent", start)
}

fn write_edge(em: &mut Emitter<'_>, edge: &Edge) -> Result<(), EncodeError> {
    let mut start = BytesStart::new("edge");
    start.push_attribute(("id", edge.id.as_str()));
    if let Some(label) = &edge.label {
        start.push_attribute(("label", label.as_str()));
    }
    if let Some(edge_type) = edge.edge_type {
        if edge_type != Default::default() {
            start.push_attribute(("type", edge_type.as_token()));
        }
    }
    start.push_attribute(("source", edge.source.as_str()));
    start.push_attribute(("target", edge.target.as_str()));
    if let Some(weight) = edge.weight {
        start.push_attribute(("weight", weight.to_string().as_str()));
    }

    em.line()?;
    match &edge.attvalues {
        None => em.leaf("edge", start),
        Some(values) => {
            em.open(start)?;
            write_collection(em, "attvalues", values, write_attvalue)?;
            em.close("edge")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Graph;
    use crate::scalar::Date;

    fn empty_doc() -> Document {
        Document::new(Date::new(2009, 3, 20).unwrap())
    }

    #[test]
    fn test_minimal_document_layout() {
        let out = encode_document(&empty_doc()).unwrap();
        assert_eq!(
            std::str::from_utf8(&out).unwrap(),
            "<gexf xmlns=\"http://www.gexf.net/1.2draft\" version=\"1.2\">\n  \
             <meta lastmodifieddate=\"2009-03-20\"></meta>\n  \
             <graph></graph>\n\
             </gexf>"
        );
    }

    #[test]
    fn test_indent_option() {
        let out =
            encode_document_with_options(&empty_doc(), &EncodeOptions::with_indent("\t")).unwrap();
        let text = std::str::from_utf8(&out).unwrap();
        assert!(text.contains("\n\t<meta"));
        assert!(!text.contains("  <meta"));
    }

    #[test]
    fn test_meta_children_in_declaration_order() {
        let mut doc = empty_doc();
        doc.meta.creator = Some("Gephi.org".to_string());
        doc.meta.keywords = Some("graph, test".to_string());
        doc.meta.description = Some("example".to_string());
        let out = encode_document(&doc).unwrap();
        let text = std::str::from_utf8(&out).unwrap();
        let creator = text.find("<creator>").unwrap();
        let keywords = text.find("<keywords>").unwrap();
        let description = text.find("<description>").unwrap();
        assert!(creator < keywords && keywords < description);
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut doc = empty_doc();
        doc.graph.nodes = Some(vec![Node {
            id: "0".to_string(),
            label: Some("a & \"b\" < c".to_string()),
            ..Node::default()
        }]);
        let out = encode_document(&doc).unwrap();
        let text = std::str::from_utf8(&out).unwrap();
        assert!(text.contains("&amp;"));
        assert!(text.contains("&lt;"));
        assert!(!text.contains("< c"));
    }

    #[test]
    fn test_encode_rejects_out_of_domain_date() {
        let mut doc = empty_doc();
        doc.meta.last_modified.month = 13;
        assert!(matches!(
            encode_document(&doc),
            Err(EncodeError::Date(_))
        ));
    }

    #[test]
    fn test_graph_default_is_one_line() {
        let mut doc = empty_doc();
        doc.graph = Graph::default();
        let out = encode_document(&doc).unwrap();
        assert!(std::str::from_utf8(&out).unwrap().contains("<graph></graph>"));
    }
}
