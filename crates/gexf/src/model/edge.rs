//! Edges between nodes.

use crate::model::AttValue;
use crate::scalar::EdgeType;

/// A graph connection.
///
/// An unset `edge_type` means the edge follows the graph's default edge
/// type; the codec leaves that interpretation to the consumer and never
/// fills the field in on decode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Edge {
    pub id: String,
    pub label: Option<String>,
    pub edge_type: Option<EdgeType>,
    /// Source node id (existence not validated).
    pub source: String,
    /// Target node id (existence not validated).
    pub target: String,
    pub weight: Option<f64>,
    pub attvalues: Option<Vec<AttValue>>,
}
