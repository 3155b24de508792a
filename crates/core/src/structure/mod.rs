//! Company structure trees: nodes, layer kinds, liability and the builder.

pub mod builder;
pub mod layer;
pub mod liability;
pub mod node;

pub use builder::{build, splice, Item};
pub use layer::{
    euro, min_euro, plus, CapitalType, Category, CompanyRole, Layer, LayerKind, ManagementType,
    ShareholderType,
};
pub use liability::Liability;
pub use node::{NodeId, Row, StructuralNode};
