//! Namespace-aware XML parsing for GEXF documents.
//!
//! Decoding is a single streaming pass over resolved events. Structural
//! elements are matched by local name in the primary namespace, styling
//! elements strictly by the viz (namespace, local name) pair, so prefix
//! choice and sibling order across namespaces never matter. Unknown elements
//! and attributes are skipped. Character data inside text leaves is taken
//! verbatim; whitespace between elements is ignored.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, QName, ResolveResult};

use crate::error::DecodeError;
use crate::model::{
    AttValue, AttributeBlock, AttributeDef, Color, Document, Edge, Graph, Meta, Node, Parent,
    Position, Size,
};
use crate::scalar::{channel_from_text, AttributeClass, Date, EdgeType, GraphMode, IdType};
use crate::{FORMAT_VERSION, NS_GEXF, NS_VIZ, ROOT_LOCAL};

type Rd<'a> = NsReader<&'a [u8]>;

/// Which of the two contractual namespaces an element resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ns {
    Gexf,
    Viz,
    None,
    Other,
}

impl Ns {
    /// Primary-tree elements: bound to the GEXF namespace, or unprefixed in
    /// a document without a default namespace.
    fn is_primary(self) -> bool {
        matches!(self, Ns::Gexf | Ns::None)
    }
}

fn classify(resolve: &ResolveResult<'_>) -> Ns {
    match resolve {
        ResolveResult::Bound(Namespace(ns)) if *ns == NS_GEXF.as_bytes() => Ns::Gexf,
        ResolveResult::Bound(Namespace(ns)) if *ns == NS_VIZ.as_bytes() => Ns::Viz,
        ResolveResult::Unbound => Ns::None,
        _ => Ns::Other,
    }
}

/// Decodes one GEXF document from markup bytes.
pub fn decode_document(input: &[u8]) -> Result<Document, DecodeError> {
    let mut reader = NsReader::from_reader(input);

    let mut buf = Vec::new();
    loop {
        match read_event(&mut reader, &mut buf)? {
            (ns, Event::Start(e)) => return decode_root(&mut reader, ns, &e, true),
            (ns, Event::Empty(e)) => return decode_root(&mut reader, ns, &e, false),
            (_, Event::Eof) => {
                return Err(DecodeError::MalformedXml {
                    message: "no root element".to_string(),
                });
            }
            _ => {}
        }
        buf.clear();
    }
}

fn read_event<'a, 'b>(
    reader: &mut Rd<'a>,
    buf: &'b mut Vec<u8>,
) -> Result<(Ns, Event<'b>), DecodeError> {
    match reader.read_resolved_event_into(buf) {
        Ok((resolve, event)) => Ok((classify(&resolve), event)),
        Err(e) => Err(DecodeError::MalformedXml {
            message: format!(
                "XML parse error at position {}: {e}",
                reader.error_position()
            ),
        }),
    }
}

fn unexpected_eof() -> DecodeError {
    DecodeError::MalformedXml {
        message: "unexpected end of input".to_string(),
    }
}

/// Consumes everything up to and including the end tag of `start`.
fn skip_element(reader: &mut Rd<'_>, start: &BytesStart<'_>) -> Result<(), DecodeError> {
    let name = start.name().as_ref().to_vec();
    let mut sink = Vec::new();
    reader
        .read_to_end_into(QName(&name), &mut sink)
        .map_err(|e| DecodeError::MalformedXml {
            message: format!(
                "XML parse error at position {}: {e}",
                reader.error_position()
            ),
        })?;
    Ok(())
}

/// Looks up an attribute by local name, unescaping its value.
fn attr(start: &BytesStart<'_>, name: &str) -> Result<Option<String>, DecodeError> {
    for item in start.attributes() {
        let item = item.map_err(|e| DecodeError::MalformedXml {
            message: format!("malformed attribute: {e}"),
        })?;
        if item.key.local_name().as_ref() == name.as_bytes() {
            let value = item.unescape_value().map_err(|e| DecodeError::MalformedXml {
                message: format!("malformed attribute value: {e}"),
            })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn require_attr(
    start: &BytesStart<'_>,
    element: &'static str,
    name: &'static str,
) -> Result<String, DecodeError> {
    attr(start, name)?.ok_or(DecodeError::MissingAttribute {
        element,
        attribute: name,
    })
}

fn float_attr(
    start: &BytesStart<'_>,
    element: &'static str,
    name: &'static str,
) -> Result<Option<f64>, DecodeError> {
    match attr(start, name)? {
        None => Ok(None),
        Some(text) => match text.parse::<f64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(DecodeError::InvalidNumber {
                element,
                attribute: name,
                value: text,
            }),
        },
    }
}

/// Accumulates the text content of the current element up to its end tag.
fn read_text(reader: &mut Rd<'_>) -> Result<String, DecodeError> {
    let mut out = String::new();
    let mut buf = Vec::new();
    loop {
        match read_event(reader, &mut buf)? {
            (_, Event::Text(t)) => {
                let text = t.unescape().map_err(|e| DecodeError::MalformedXml {
                    message: format!("malformed text: {e}"),
                })?;
                out.push_str(&text);
            }
            (_, Event::CData(t)) => {
                let text =
                    std::str::from_utf8(&t).map_err(|e| DecodeError::MalformedXml {
                        message: format!("malformed CDATA: {e}"),
                    })?;
                out.push_str(text);
            }
            (_, Event::Start(e)) => skip_element(reader, &e)?,
            (_, Event::End(_)) => break,
            (_, Event::Eof) => return Err(unexpected_eof()),
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

fn decode_root(
    reader: &mut Rd<'_>,
    ns: Ns,
    start: &BytesStart<'_>,
    has_children: bool,
) -> Result<Document, DecodeError> {
    if ns != Ns::Gexf || start.local_name().as_ref() != ROOT_LOCAL.as_bytes() {
        return Err(DecodeError::UnexpectedRoot {
            found: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        });
    }
    let version = require_attr(start, ROOT_LOCAL, "version")?;
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion { found: version });
    }

    let mut meta = None;
    let mut graph = None;
    if has_children {
        let mut buf = Vec::new();
        loop {
            match read_event(reader, &mut buf)? {
                (ns, Event::Start(e)) if ns.is_primary() => match e.local_name().as_ref() {
                    b"meta" => meta = Some(decode_meta(reader, &e, true)?),
                    b"graph" => graph = Some(decode_graph(reader, &e, true)?),
                    _ => skip_element(reader, &e)?,
                },
                (ns, Event::Empty(e)) if ns.is_primary() => match e.local_name().as_ref() {
                    b"meta" => meta = Some(decode_meta(reader, &e, false)?),
                    b"graph" => graph = Some(decode_graph(reader, &e, false)?),
                    _ => {}
                },
                (_, Event::Start(e)) => skip_element(reader, &e)?,
                (_, Event::End(_)) => break,
                (_, Event::Eof) => return Err(unexpected_eof()),
                _ => {}
            }
            buf.clear();
        }
    }

    let meta = meta.ok_or(DecodeError::MissingElement {
        parent: ROOT_LOCAL,
        element: "meta",
    })?;
    Ok(Document {
        meta,
        graph: graph.unwrap_or_default(),
    })
}

fn decode_meta(
    reader: &mut Rd<'_>,
    start: &BytesStart<'_>,
    has_children: bool,
) -> Result<Meta, DecodeError> {
    let text = require_attr(start, "meta", "lastmodifieddate")?;
    let mut meta = Meta::new(Date::parse(&text)?);

    if has_children {
        let mut buf = Vec::new();
        loop {
            match read_event(reader, &mut buf)? {
                (ns, Event::Start(e)) if ns.is_primary() => match e.local_name().as_ref() {
                    b"creator" => meta.creator = Some(read_text(reader)?),
                    b"keywords" => meta.keywords = Some(read_text(reader)?),
                    b"description" => meta.description = Some(read_text(reader)?),
                    _ => skip_element(reader, &e)?,
                },
                (ns, Event::Empty(e)) if ns.is_primary() => match e.local_name().as_ref() {
                    b"creator" => meta.creator = Some(String::new()),
                    b"keywords" => meta.keywords = Some(String::new()),
                    b"description" => meta.description = Some(String::new()),
                    _ => {}
                },
                (_, Event::Start(e)) => skip_element(reader, &e)?,
                (_, Event::End(_)) => break,
                (_, Event::Eof) => return Err(unexpected_eof()),
                _ => {}
            }
            buf.clear();
        }
    }
    Ok(meta)
}

fn decode_graph(
    reader: &mut Rd<'_>,
    start: &BytesStart<'_>,
    has_children: bool,
) -> Result<Graph, DecodeError> {
    let mut graph = Graph::default();
    if let Some(token) = attr(start, "mode")? {
        graph.mode = Some(GraphMode::from_token(&token)?);
    }
    if let Some(token) = attr(start, "idtype")? {
        graph.id_type = Some(IdType::from_token(&token)?);
    }
    if let Some(token) = attr(start, "defaultedgetype")? {
        graph.default_edge_type = Some(EdgeType::from_token(&token)?);
    }

    if has_children {
        let mut buf = Vec::new();
        loop {
            match read_event(reader, &mut buf)? {
                (ns, Event::Start(e)) if ns.is_primary() => match e.local_name().as_ref() {
                    b"attributes" => {
                        graph.attributes = Some(decode_attribute_block(reader, &e, true)?);
                    }
                    b"nodes" => graph.nodes = Some(decode_nodes(reader)?),
                    b"edges" => graph.edges = Some(decode_edges(reader)?),
                    _ => skip_element(reader, &e)?,
                },
                (ns, Event::Empty(e)) if ns.is_primary() => match e.local_name().as_ref() {
                    b"attributes" => {
                        graph.attributes = Some(decode_attribute_block(reader, &e, false)?);
                    }
                    b"nodes" => graph.nodes = Some(Vec::new()),
                    b"edges" => graph.edges = Some(Vec::new()),
                    _ => {}
                },
                (_, Event::Start(e)) => skip_element(reader, &e)?,
                (_, Event::End(_)) => break,
                (_, Event::Eof) => return Err(unexpected_eof()),
                _ => {}
            }
            buf.clear();
        }
    }
    Ok(graph)
}

fn decode_attribute_block(
    reader: &mut Rd<'_>,
    start: &BytesStart<'_>,
    has_children: bool,
) -> Result<AttributeBlock, DecodeError> {
    let class = match attr(start, "class")? {
        Some(token) => AttributeClass::from_token(&token)?,
        None => AttributeClass::default(),
    };

    let mut attributes = Vec::new();
    if has_children {
        let mut buf = Vec::new();
        loop {
            match read_event(reader, &mut buf)? {
                (ns, Event::Start(e))
                    if ns.is_primary() && e.local_name().as_ref() == b"attribute" =>
                {
                    attributes.push(decode_attribute_def(reader, &e, true)?);
                }
                (ns, Event::Empty(e))
                    if ns.is_primary() && e.local_name().as_ref() == b"attribute" =>
                {
                    attributes.push(decode_attribute_def(reader, &e, false)?);
                }
                (_, Event::Start(e)) => skip_element(reader, &e)?,
                (_, Event::End(_)) => break,
                (_, Event::Eof) => return Err(unexpected_eof()),
                _ => {}
            }
            buf.clear();
        }
    }
    Ok(AttributeBlock { class, attributes })
}

fn decode_attribute_def(
    reader: &mut Rd<'_>,
    start: &BytesStart<'_>,
    has_children: bool,
) -> Result<AttributeDef, DecodeError> {
    let mut def = AttributeDef {
        id: attr(start, "id")?.unwrap_or_default(),
        title: attr(start, "title")?.unwrap_or_default(),
        value_type: attr(start, "type")?.unwrap_or_default(),
        default: None,
    };

    if has_children {
        let mut buf = Vec::new();
        loop {
            match read_event(reader, &mut buf)? {
                (ns, Event::Start(e))
                    if ns.is_primary() && e.local_name().as_ref() == b"default" =>
                {
                    def.default = Some(read_text(reader)?);
                }
                (ns, Event::Empty(e))
                    if ns.is_primary() && e.local_name().as_ref() == b"default" =>
                {
                    def.default = Some(String::new());
                }
                (_, Event::Start(e)) => skip_element(reader, &e)?,
                (_, Event::End(_)) => break,
                (_, Event::Eof) => return Err(unexpected_eof()),
                _ => {}
            }
            buf.clear();
        }
    }
    Ok(def)
}

fn decode_nodes(reader: &mut Rd<'_>) -> Result<Vec<Node>, DecodeError> {
    let mut nodes = Vec::new();
    let mut buf = Vec::new();
    loop {
        match read_event(reader, &mut buf)? {
            (ns, Event::Start(e)) if ns.is_primary() && e.local_name().as_ref() == b"node" => {
                nodes.push(decode_node(reader, &e, true)?);
            }
            (ns, Event::Empty(e)) if ns.is_primary() && e.local_name().as_ref() == b"node" => {
                nodes.push(decode_node(reader, &e, false)?);
            }
            (_, Event::Start(e)) => skip_element(reader, &e)?,
            (_, Event::End(_)) => break,
            (_, Event::Eof) => return Err(unexpected_eof()),
            _ => {}
        }
        buf.clear();
    }
    Ok(nodes)
}

fn decode_node(
    reader: &mut Rd<'_>,
    start: &BytesStart<'_>,
    has_children: bool,
) -> Result<Node, DecodeError> {
    let mut node = Node {
        id: attr(start, "id")?.unwrap_or_default(),
        label: attr(start, "label")?,
        ..Node::default()
    };

    if has_children {
        let mut buf = Vec::new();
        loop {
            match read_event(reader, &mut buf)? {
                (ns, Event::Start(e)) if ns.is_primary() => match e.local_name().as_ref() {
                    b"attvalues" => node.attvalues = Some(decode_attvalues(reader)?),
                    b"parents" => node.parents = Some(decode_parents(reader)?),
                    _ => skip_element(reader, &e)?,
                },
                (ns, Event::Empty(e)) if ns.is_primary() => match e.local_name().as_ref() {
                    b"attvalues" => node.attvalues = Some(Vec::new()),
                    b"parents" => node.parents = Some(Vec::new()),
                    _ => {}
                },
                (Ns::Viz, Event::Start(e)) => {
                    decode_viz(&mut node, &e)?;
                    skip_element(reader, &e)?;
                }
                (Ns::Viz, Event::Empty(e)) => decode_viz(&mut node, &e)?,
                (_, Event::Start(e)) => skip_element(reader, &e)?,
                (_, Event::End(_)) => break,
                (_, Event::Eof) => return Err(unexpected_eof()),
                _ => {}
            }
            buf.clear();
        }
    }
    Ok(node)
}

/// Maps one viz-namespace styling element onto the node.
fn decode_viz(node: &mut Node, start: &BytesStart<'_>) -> Result<(), DecodeError> {
    match start.local_name().as_ref() {
        b"size" => {
            node.size = Some(Size {
                value: float_attr(start, "size", "value")?.unwrap_or(0.0),
            });
        }
        b"position" => {
            node.position = Some(Position {
                x: float_attr(start, "position", "x")?.unwrap_or(0.0),
                y: float_attr(start, "position", "y")?.unwrap_or(0.0),
                z: float_attr(start, "position", "z")?.unwrap_or(0.0),
            });
        }
        b"color" => {
            node.color = Some(Color {
                r: color_channel(start, "r")?,
                g: color_channel(start, "g")?,
                b: color_channel(start, "b")?,
            });
        }
        _ => {}
    }
    Ok(())
}

fn color_channel(start: &BytesStart<'_>, channel: &'static str) -> Result<u8, DecodeError> {
    match attr(start, channel)? {
        None => Ok(0),
        Some(text) => Ok(channel_from_text(channel, &text)?),
    }
}

fn decode_attvalues(reader: &mut Rd<'_>) -> Result<Vec<AttValue>, DecodeError> {
    let mut values = Vec::new();
    let mut buf = Vec::new();
    loop {
        match read_event(reader, &mut buf)? {
            (ns, Event::Start(e)) if ns.is_primary() && e.local_name().as_ref() == b"attvalue" => {
                values.push(decode_attvalue(&e)?);
                skip_element(reader, &e)?;
            }
            (ns, Event::Empty(e)) if ns.is_primary() && e.local_name().as_ref() == b"attvalue" => {
                values.push(decode_attvalue(&e)?);
            }
            (_, Event::Start(e)) => skip_element(reader, &e)?,
            (_, Event::End(_)) => break,
            (_, Event::Eof) => return Err(unexpected_eof()),
            _ => {}
        }
        buf.clear();
    }
    Ok(values)
}

fn decode_attvalue(start: &BytesStart<'_>) -> Result<AttValue, DecodeError> {
    Ok(AttValue {
        for_: attr(start, "for")?.unwrap_or_default(),
        value: attr(start, "value")?.unwrap_or_default(),
    })
}

fn decode_parents(reader: &mut Rd<'_>) -> Result<Vec<Parent>, DecodeError> {
    let mut parents = Vec::new();
    let mut buf = Vec::new();
    loop {
        match read_event(reader, &mut buf)? {
            (ns, Event::Start(e)) if ns.is_primary() && e.local_name().as_ref() == b"parent" => {
                parents.push(Parent {
                    for_: attr(&e, "for")?.unwrap_or_default(),
                });
                skip_element(reader, &e)?;
            }
            (ns, Event::Empty(e)) if ns.is_primary() && e.local_name().as_ref() == b"parent" => {
                parents.push(Parent {
                    for_: attr(&e, "for")?.unwrap_or_default(),
                });
            }
            (_, Event::Start(e)) => skip_element(reader, &e)?,
            (_, Event::End(_)) => break,
            (_, Event::Eof) => return Err(unexpected_eof()),
            _ => {}
        }
        buf.clear();
    }
    Ok(parents)
}

fn decode_edges(reader: &mut Rd<'_>) -> Result<Vec<Edge>, DecodeError> {
    let mut edges = Vec::new();
    let mut buf = Vec::new();
    loop {
        match read_event(reader, &mut buf)? {
            (ns, Event::Start(e)) if ns.is_primary() && e.local_name().as_ref() == b"edge" => {
                edges.push(decode_edge(reader, &e, true)?);
            }
            (ns, Event::Empty(e)) if ns.is_primary() && e.local_name().as_ref() == b"edge" => {
                edges.push(decode_edge(reader, &e, false)?);
            }
            (_, Event::Start(e)) => skip_element(reader, &e)?,
            (_, Event::End(_)) => break,
            (_, Event::Eof) => return Err(unexpected_eof()),
            _ => {}
        }
        buf.clear();
    }
    Ok(edges)
}

fn decode_edge(
    reader: &mut Rd<'_>,
    start: &BytesStart<'_>,
    has_children: bool,
) -> Result<Edge, DecodeError> {
    let mut edge = Edge {
        id: attr(start, "id")?.unwrap_or_default(),
        label: attr(start, "label")?,
        edge_type: match attr(start, "type")? {
            Some(token) => Some(EdgeType::from_token(&token)?),
            None => None,
        },
        source: attr(start, "source")?.unwrap_or_default(),
        target: attr(start, "target")?.unwrap_or_default(),
        weight: float_attr(start, "edge", "weight")?,
        attvalues: None,
    };

    if has_children {
        let mut buf = Vec::new();
        loop {
            match read_event(reader, &mut buf)? {
                (ns, Event::Start(e))
                    if ns.is_primary() && e.local_name().as_ref() == b"attvalues" =>
                {
                    edge.attvalues = Some(decode_attvalues(reader)?);
                }
                (ns, Event::Empty(e))
                    if ns.is_primary() && e.local_name().as_ref() == b"attvalues" =>
                {
                    edge.attvalues = Some(Vec::new());
                }
                (_, Event::Start(e)) => skip_element(reader, &e)?,
                (_, Event::End(_)) => break,
                (_, Event::Eof) => return Err(unexpected_eof()),
                _ => {}
            }
            buf.clear();
        }
    }
    Ok(edge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_z_defaults_to_zero() {
        let markup = br#"<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">
<meta lastmodifieddate="2009-03-20"/>
<graph><nodes><node id="0">
<position xmlns="http://www.gexf.net/1.2draft/viz" x="1.5" y="-3.4"/>
</node></nodes></graph>
</gexf>"#;
        let doc = decode_document(markup).unwrap();
        let nodes = doc.graph.nodes.unwrap();
        assert_eq!(
            nodes[0].position,
            Some(Position {
                x: 1.5,
                y: -3.4,
                z: 0.0
            })
        );
    }

    #[test]
    fn test_missing_scalar_attributes_decode_to_empty_values() {
        let markup = br#"<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">
<meta lastmodifieddate="2009-03-20"/>
<graph>
<nodes><node/></nodes>
<edges><edge/></edges>
</graph>
</gexf>"#;
        let doc = decode_document(markup).unwrap();
        let nodes = doc.graph.nodes.unwrap();
        assert_eq!(nodes[0].id, "");
        assert_eq!(nodes[0].label, None);
        let edges = doc.graph.edges.unwrap();
        assert_eq!(edges[0].source, "");
        assert_eq!(edges[0].target, "");
        assert_eq!(edges[0].weight, None);
        assert_eq!(edges[0].edge_type, None);
    }

    #[test]
    fn test_invalid_weight_is_rejected() {
        let markup = br#"<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">
<meta lastmodifieddate="2009-03-20"/>
<graph><edges><edge id="0" source="0" target="1" weight="heavy"/></edges></graph>
</gexf>"#;
        let err = decode_document(markup).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidNumber {
                element: "edge",
                attribute: "weight",
                ..
            }
        ));
    }
}
