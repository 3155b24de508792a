//! Errors for catalog lookups.

use std::fmt;

use thiserror::Error;

/// Which picker of the mixed-forms builder a key was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSlot {
    Base,
    Insertion,
}

impl fmt::Display for CandidateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateSlot::Base => f.write_str("base"),
            CandidateSlot::Insertion => f.write_str("insertion"),
        }
    }
}

/// Lookup failures against the static catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown company: {0}")]
    UnknownCompany(String),

    #[error("{key} is not a {slot} candidate of the mixed-forms builder")]
    NotAMixedFormCandidate { key: String, slot: CandidateSlot },
}
