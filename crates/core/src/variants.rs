//! Alternate structures and variant expansion.
//!
//! Some forms come with exactly one alternate structure, e.g. a nonprofit
//! variant. The registry pairs each base with its alternate; it is keyed by
//! the base only, so an alternate never resolves to anything.

use crate::{catalog, company::Company};

/// Closed mapping from a base company to its single alternate.
#[derive(Debug, Clone, Default)]
pub struct AlternateRegistry {
    pairs: Vec<(Company, Company)>,
}

impl AlternateRegistry {
    pub fn new(pairs: Vec<(Company, Company)>) -> Self {
        Self { pairs }
    }

    /// The `(base, alternate)` pair registered for `key`.
    pub fn pair_for(&self, key: &str) -> Option<(&Company, &Company)> {
        self.pairs
            .iter()
            .find(|(base, _)| base.key == key)
            .map(|(base, alternate)| (base, alternate))
    }

    pub fn alternate_for(&self, key: &str) -> Option<&Company> {
        self.pair_for(key).map(|(_, alternate)| alternate)
    }

    /// Whether `company` is registered as a base.
    pub fn is_base(&self, company: &Company) -> bool {
        self.pair_for(&company.key).is_some()
    }

    /// Pair for `company` when `enabled`; always `None` when disabled.
    pub fn resolve(&self, company: &Company, enabled: bool) -> Option<(&Company, &Company)> {
        if !enabled {
            return None;
        }
        self.pair_for(&company.key)
    }

    /// Copy of `companies` with every base followed directly by its alternate.
    ///
    /// Each occurrence of a base gets its own alternate. The input is left
    /// untouched; when `enabled` is false the copy is identical to it.
    pub fn expand_with_variants(&self, companies: &[Company], enabled: bool) -> Vec<Company> {
        if !enabled {
            return companies.to_vec();
        }
        let mut expanded = Vec::with_capacity(companies.len() + self.pairs.len());
        for company in companies {
            expanded.push(company.clone());
            if let Some(alternate) = self.alternate_for(&company.key) {
                expanded.push(alternate.clone());
            }
        }
        expanded
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Company, &Company)> {
        self.pairs.iter().map(|(base, alternate)| (base, alternate))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Company {
    /// The `(base, alternate)` pair of this company from the catalog registry.
    pub fn resolve_alternate(&self, enabled: bool) -> Option<(&'static Company, &'static Company)> {
        catalog::catalog().alternates().resolve(self, enabled)
    }
}

/// [`AlternateRegistry::expand_with_variants`] over the catalog registry.
pub fn expand_with_variants(companies: &[Company], enabled: bool) -> Vec<Company> {
    catalog::catalog()
        .alternates()
        .expand_with_variants(companies, enabled)
}

/// Keep the companies matching `query`; a blank query keeps all of them.
pub fn filter_companies(
    registry: &AlternateRegistry,
    companies: Vec<Company>,
    query: &str,
    include_alternate: bool,
) -> Vec<Company> {
    let query = query.trim();
    if query.is_empty() {
        return companies;
    }
    companies
        .into_iter()
        .filter(|company| company.matches_search_in(registry, query, include_alternate))
        .collect()
}
