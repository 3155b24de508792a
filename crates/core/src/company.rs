//! The company entity.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{catalog, structure::StructuralNode, variants::AlternateRegistry};

const LIMITED_LIABILITY_SUFFIX: &str = " (haftungsbeschränkt)";

/// A German legal form of company, e.g. a GmbH, together with its structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Stable identifier, unique within the catalog (e.g. `gmbh`).
    pub key: String,
    /// Official abbreviation, if the form has one.
    pub abbreviation: Option<String>,
    /// Official German name.
    pub german_name: String,
    pub english_translation: String,
    /// Purpose or objective of the company, if restricted.
    pub reason: Option<String>,
    /// Supplementary fact worth knowing.
    pub tidbit: Option<String>,
    /// Top-level nodes, in render order.
    pub structure: Vec<StructuralNode>,
}

impl PartialEq for Company {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Company {}

impl Hash for Company {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Company {
    pub fn new(
        key: impl Into<String>,
        german_name: impl Into<String>,
        english_translation: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            abbreviation: None,
            german_name: german_name.into(),
            english_translation: english_translation.into(),
            reason: None,
            tidbit: None,
            structure: Vec::new(),
        }
    }

    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = Some(abbreviation.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_tidbit(mut self, tidbit: impl Into<String>) -> Self {
        self.tidbit = Some(tidbit.into());
        self
    }

    pub fn with_structure(mut self, structure: Vec<StructuralNode>) -> Self {
        self.structure = structure;
        self
    }

    /// Title of the graphic: the abbreviation, or the German name without one.
    pub fn title(&self) -> &str {
        self.abbreviation.as_deref().unwrap_or(&self.german_name)
    }

    /// Title without lengthy qualifiers. Not suitable where the exact
    /// abbreviation matters.
    pub fn shortened_title(&self) -> String {
        match self.abbreviation.as_deref() {
            Some(abbreviation) => abbreviation.replace(LIMITED_LIABILITY_SUFFIX, ""),
            None => self.german_name.clone(),
        }
    }

    /// The German name, shown only when the title is an abbreviation.
    pub fn subtitle(&self) -> Option<&str> {
        self.abbreviation.as_ref().map(|_| self.german_name.as_str())
    }

    /// Name for list views, either German or translated.
    pub fn display_name(&self, translate: bool) -> &str {
        if translate {
            &self.english_translation
        } else {
            &self.german_name
        }
    }

    /// Case-insensitive substring search over the descriptive fields, optionally
    /// including the registered alternate of this company.
    ///
    /// Callers treat an empty query as matching everything and skip this check.
    pub fn matches_search(&self, query: &str, include_alternate: bool) -> bool {
        self.matches_search_in(catalog::catalog().alternates(), query, include_alternate)
    }

    /// [`Company::matches_search`] against an explicit registry.
    pub fn matches_search_in(
        &self,
        registry: &AlternateRegistry,
        query: &str,
        include_alternate: bool,
    ) -> bool {
        let needle = query.to_lowercase();
        if self.search_fields().any(|field| contains(field, &needle)) {
            return true;
        }
        if !include_alternate {
            return false;
        }
        registry.alternate_for(&self.key).is_some_and(|alternate| {
            alternate
                .search_fields()
                .chain(std::iter::once(alternate.title()))
                .any(|field| contains(field, &needle))
        })
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.german_name.as_str()),
            self.abbreviation.as_deref(),
            Some(self.english_translation.as_str()),
            self.reason.as_deref(),
            self.tidbit.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gmbh() -> Company {
        Company::new(
            "gmbh",
            "Gesellschaft mit beschränkter Haftung",
            "Limited Liability Partnership",
        )
        .with_abbreviation("GmbH")
    }

    fn ggmbh() -> Company {
        Company::new(
            "ggmbh",
            "Gemeinnützige Gesellschaft mit beschränkter Haftung",
            "Nonprofit Limited Liability Partnership",
        )
        .with_abbreviation("gGmbH")
        .with_reason("Charitable purpose")
    }

    #[test]
    fn title_prefers_abbreviation() {
        let company = gmbh();
        assert_eq!(company.title(), "GmbH");
        assert_eq!(company.subtitle(), Some("Gesellschaft mit beschränkter Haftung"));

        let sole = Company::new("eu", "Einzelunternehmen", "Sole Proprietor");
        assert_eq!(sole.title(), "Einzelunternehmen");
        assert_eq!(sole.subtitle(), None);
        assert_eq!(sole.shortened_title(), "Einzelunternehmen");
    }

    #[test]
    fn shortened_title_drops_qualifier() {
        let ug = Company::new(
            "ug",
            "Unternehmergesellschaft (haftungsbeschränkt)",
            "Entrepreneurial Company at Limited Liability",
        )
        .with_abbreviation("UG (haftungsbeschränkt)");
        assert_eq!(ug.shortened_title(), "UG");
        assert_eq!(ug.title(), "UG (haftungsbeschränkt)");
    }

    #[test]
    fn display_name_switches_language() {
        let company = gmbh();
        assert_eq!(company.display_name(false), "Gesellschaft mit beschränkter Haftung");
        assert_eq!(company.display_name(true), "Limited Liability Partnership");
    }

    #[test]
    fn equality_uses_key() {
        let mut renamed = gmbh();
        renamed.german_name = "Something else".to_string();
        assert_eq!(renamed, gmbh());
        assert_ne!(gmbh(), ggmbh());
    }

    #[test]
    fn search_is_case_insensitive() {
        let registry = AlternateRegistry::default();
        let company = gmbh();
        assert!(company.matches_search_in(&registry, "gmbh", false));
        assert!(company.matches_search_in(&registry, "LIABILITY", false));
        assert!(company.matches_search_in(&registry, "beschränkter", false));
        assert!(!company.matches_search_in(&registry, "charitable", false));
    }

    #[test]
    fn search_can_include_alternate() {
        let registry = AlternateRegistry::new(vec![(gmbh(), ggmbh())]);
        let company = gmbh();
        assert!(!company.matches_search_in(&registry, "charitable", false));
        assert!(company.matches_search_in(&registry, "charitable", true));
        assert!(company.matches_search_in(&registry, "nonprofit", true));
    }

    #[test]
    fn alternates_do_not_search_their_base() {
        let sole = Company::new("eu", "Einzelunternehmen", "Sole Proprietor");
        let merchant = Company::new("ek", "Eingetragener Kaufmann", "Registered Merchant")
            .with_abbreviation("e. K.");
        let registry = AlternateRegistry::new(vec![(sole.clone(), merchant.clone())]);

        assert!(sole.matches_search_in(&registry, "e. k.", true));
        assert!(!merchant.matches_search_in(&registry, "sole", true));
    }
}
