//! Assembling structure trees from declaration lists.
//!
//! A declaration is a list of [`Item`]s. Single nodes are kept as they are,
//! collections are spliced in place, so the result is always one flat ordered
//! sequence per nesting level:
//!
//! ```
//! use rechtsform_core::{row, structure};
//! use rechtsform_core::structure::{Layer, ManagementType, ShareholderType, CapitalType};
//!
//! let nodes = structure![
//!     Layer::supervisory_board(),
//!     row![
//!         Layer::management(ManagementType::Board).with_unlimited_liability(),
//!         Layer::shareholder(ShareholderType::Stockholder).with_limited_liability(),
//!     ],
//!     Layer::capital(CapitalType::Capital),
//! ];
//! assert_eq!(nodes.len(), 3);
//! ```

use super::node::{Row, StructuralNode};

/// One entry of a declaration list.
#[derive(Debug, Clone)]
pub enum Item {
    /// A single node, inserted as-is.
    Node(StructuralNode),
    /// A generated sequence, spliced in place.
    Splice(Vec<StructuralNode>),
}

impl From<StructuralNode> for Item {
    fn from(node: StructuralNode) -> Self {
        Item::Node(node)
    }
}

impl From<super::layer::Layer> for Item {
    fn from(layer: super::layer::Layer) -> Self {
        Item::Node(layer.into())
    }
}

impl From<Row> for Item {
    fn from(row: Row) -> Self {
        Item::Node(row.into())
    }
}

impl<T> From<Vec<T>> for Item
where
    T: Into<StructuralNode>,
{
    fn from(nodes: Vec<T>) -> Self {
        Item::Splice(nodes.into_iter().map(Into::into).collect())
    }
}

/// Splice any iterator of nodes into a declaration, e.g. one layer per enum variant.
pub fn splice<I, T>(nodes: I) -> Item
where
    I: IntoIterator<Item = T>,
    T: Into<StructuralNode>,
{
    Item::Splice(nodes.into_iter().map(Into::into).collect())
}

/// Flatten a declaration list into an ordered node sequence.
pub fn build<I>(items: I) -> Vec<StructuralNode>
where
    I: IntoIterator<Item = Item>,
{
    let mut nodes = Vec::new();
    for item in items {
        match item {
            Item::Node(node) => nodes.push(node),
            Item::Splice(many) => nodes.extend(many),
        }
    }
    nodes
}

/// Declare a top-level structure: `structure![layer, row![..], vec_of_layers]`.
#[macro_export]
macro_rules! structure {
    ($($item:expr),* $(,)?) => {
        $crate::structure::build(::std::vec![$($crate::structure::Item::from($item)),*])
    };
}

/// Declare a row whose children are flattened independently of its parent.
#[macro_export]
macro_rules! row {
    ($($item:expr),* $(,)?) => {
        $crate::structure::Row::new($crate::structure![$($item),*])
    };
}
