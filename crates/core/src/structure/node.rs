//! Structure tree nodes.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::layer::{Category, Layer};

/// Opaque per-instance identifier of a node.
///
/// Used to keep list identity stable while rendering. It never takes part in
/// equality of node content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Any element placeable in a company's structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum StructuralNode {
    Layer(Layer),
    Row(Row),
}

impl StructuralNode {
    pub fn id(&self) -> NodeId {
        match self {
            StructuralNode::Layer(layer) => layer.id,
            StructuralNode::Row(row) => row.id,
        }
    }

    pub fn as_layer(&self) -> Option<&Layer> {
        match self {
            StructuralNode::Layer(layer) => Some(layer),
            StructuralNode::Row(_) => None,
        }
    }

    pub fn as_row(&self) -> Option<&Row> {
        match self {
            StructuralNode::Row(row) => Some(row),
            StructuralNode::Layer(_) => None,
        }
    }

    /// Depth-first iterator over every layer below (and including) this node.
    pub fn layers(&self) -> Box<dyn Iterator<Item = &Layer> + '_> {
        match self {
            StructuralNode::Layer(layer) => Box::new(std::iter::once(layer)),
            StructuralNode::Row(row) => Box::new(row.children.iter().flat_map(|child| child.layers())),
        }
    }

    /// Whether any layer below this node belongs to `category`.
    pub fn contains_category(&self, category: Category) -> bool {
        self.layers().any(|layer| layer.category() == category)
    }
}

impl From<Layer> for StructuralNode {
    fn from(layer: Layer) -> Self {
        StructuralNode::Layer(layer)
    }
}

impl From<Row> for StructuralNode {
    fn from(row: Row) -> Self {
        StructuralNode::Row(row)
    }
}

/// Horizontal grouping of nodes rendered on the same structural level.
///
/// Children keep their declaration order, which is the left-to-right render
/// order. A row has no liability of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub id: NodeId,
    pub children: Vec<StructuralNode>,
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children
    }
}

impl Row {
    pub fn new(children: Vec<StructuralNode>) -> Self {
        Self {
            id: NodeId::new(),
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{CapitalType, Layer, ManagementType, ShareholderType};

    #[test]
    fn identifiers_are_fresh_per_construction() {
        let a = Layer::supervisory_board();
        let b = Layer::supervisory_board();
        assert_ne!(a.id, b.id);
        assert_ne!(Row::new(Vec::new()).id, Row::new(Vec::new()).id);
    }

    #[test]
    fn rows_compare_by_children_only() {
        let make = || {
            Row::new(vec![
                Layer::management(ManagementType::Board).into(),
                Layer::shareholder(ShareholderType::Stockholder).into(),
            ])
        };
        let first = make();
        let second = make();
        assert_ne!(first.id, second.id);
        assert_eq!(first, second);
    }

    #[test]
    fn layer_iteration_descends_into_rows() {
        let node: StructuralNode = Row::new(vec![
            Row::new(vec![Layer::shareholder(ShareholderType::ClubMember).into()]).into(),
            Layer::capital(CapitalType::Capital).into(),
        ])
        .into();

        let titles: Vec<_> = node.layers().map(|layer| layer.variant_title()).collect();
        assert_eq!(titles, ["Club Member", "Capital"]);
        assert!(node.contains_category(Category::Shareholder));
        assert!(!node.contains_category(Category::Management));
        assert!(node.as_row().is_some());
        assert!(node.as_layer().is_none());
    }
}
