#![warn(clippy::all)]

//! Core domain logic for the German legal forms guide.
//!
//! This crate hosts the structure model (layers, rows, liability), the
//! static company catalog, alternate-structure resolution, the mixed-form
//! composer and configuration handling used by the terminal UI and any
//! future frontends.

pub mod catalog;
pub mod company;
pub mod config;
pub mod error;
pub mod mixed;
pub mod statistics;
pub mod structure;
pub mod variants;

pub use catalog::{catalog, Catalog, Section, SectionKind};
pub use company::Company;
pub use config::AppConfig;
pub use error::{CandidateSlot, CatalogError};
pub use mixed::{compose_mixed_form, MixedFormCandidates};
pub use structure::{
    CapitalType, Category, CompanyRole, Layer, LayerKind, Liability, ManagementType, NodeId, Row,
    ShareholderType, StructuralNode,
};
pub use variants::{expand_with_variants, filter_companies, AlternateRegistry};
