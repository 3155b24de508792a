//! The static catalog of legal forms and the alternate-structure registry.

pub mod forms;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    company::Company,
    error::CatalogError,
    variants::{filter_companies, AlternateRegistry},
};

/// Named groups the catalog is organized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Partnerships,
    Corporations,
    Cooperatives,
    Other,
    MixedForms,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Partnerships => "Partnerships",
            SectionKind::Corporations => "Corporations",
            SectionKind::Cooperatives => "Cooperatives",
            SectionKind::Other => "Other",
            SectionKind::MixedForms => "Mixed Forms (Examples)",
        }
    }

    pub fn footer(self) -> Option<&'static str> {
        match self {
            SectionKind::Partnerships => Some("Partnerships are companies, where the focus lies on the partner’s connection and their respective liability."),
            SectionKind::Corporations => Some("Corporations are structured around their capital (which may be divided into stocks)."),
            SectionKind::Cooperatives => Some("Cooperatives are a union of people, who have a joint economic business operation that support the member’s aims."),
            SectionKind::Other => None,
            SectionKind::MixedForms => Some("Companies can act as manager or shareholder of another company. For instance, at a GmbH & Co. KG, a GmbH is the complementary of the KG. This enables the benefits of a KG without a person having unlimited liability."),
        }
    }
}

/// One group of companies as listed by frontends.
#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub companies: Vec<Company>,
}

impl Section {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn footer(&self) -> Option<&'static str> {
        self.kind.footer()
    }

    /// Companies to list for the current search and variant settings.
    ///
    /// With variants shown, alternates appear as list entries of their own.
    /// Otherwise the search also looks into each company's alternate, since
    /// the alternate is only reachable through its base.
    pub fn visible_companies(
        &self,
        registry: &AlternateRegistry,
        query: &str,
        show_variants: bool,
    ) -> Vec<Company> {
        let companies = registry.expand_with_variants(&self.companies, show_variants);
        filter_companies(registry, companies, query, !show_variants)
    }
}

/// Every predefined company, grouped, plus the alternate registry.
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<Section>,
    alternates: AlternateRegistry,
}

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::build);

/// The process-wide catalog, built on first use and never mutated.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

impl Catalog {
    /// Build a fresh catalog from the form definitions.
    pub fn build() -> Self {
        use forms::*;

        let sections = vec![
            Section {
                kind: SectionKind::Partnerships,
                companies: vec![eu(), sg(), pr(), partg(), gbr(), ohg(), kg(), ewiv()],
            },
            Section {
                kind: SectionKind::Corporations,
                companies: vec![ug(), gmbh(), kgaa(), ag(), inv_ag(), reit_ag(), se()],
            },
            Section {
                kind: SectionKind::Cooperatives,
                companies: vec![eg(), sce()],
            },
            Section {
                kind: SectionKind::Other,
                companies: vec![stiftung(), verein(), ev(), vvag()],
            },
            Section {
                kind: SectionKind::MixedForms,
                companies: vec![
                    ag_co_ohg(),
                    gmbh_co_kg(),
                    eg_co_kg(),
                    kgaa_co_kg(),
                    stiftung_gmbh_co_kg(),
                    se_co_kgaa(),
                    gmbh_co_kg_co_kgaa(),
                ],
            },
        ];

        let alternates = AlternateRegistry::new(vec![
            (eu(), ek()),
            (partg(), partg_mbb()),
            (ug(), gug()),
            (gmbh(), ggmbh()),
            (ag(), gag()),
            (inv_ag(), inv_ag_internal()),
            (se(), se_monistic()),
            (eg(), eg_limited()),
            (sce(), sce_mbh()),
            (ev(), wv()),
        ]);

        let catalog = Self {
            sections,
            alternates,
        };
        debug!(
            sections = catalog.sections.len(),
            companies = catalog.companies().count(),
            alternates = catalog.alternates.len(),
            "catalog built"
        );
        catalog
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    pub fn alternates(&self) -> &AlternateRegistry {
        &self.alternates
    }

    /// Listed companies, in section order. Alternates are not included.
    pub fn companies(&self) -> impl Iterator<Item = &Company> {
        self.sections
            .iter()
            .flat_map(|section| section.companies.iter())
    }

    /// Look up any company, listed or alternate, by its key.
    pub fn find(&self, key: &str) -> Result<&Company, CatalogError> {
        self.companies()
            .chain(self.alternates.iter().map(|(_, alternate)| alternate))
            .find(|company| company.key == key)
            .ok_or_else(|| CatalogError::UnknownCompany(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::structure::{Category, Liability};

    #[test]
    fn keys_are_unique() {
        let catalog = catalog();
        let mut seen = HashSet::new();
        for company in catalog
            .companies()
            .chain(catalog.alternates().iter().map(|(_, alternate)| alternate))
        {
            assert!(seen.insert(company.key.clone()), "duplicate key {}", company.key);
        }
        assert_eq!(seen.len(), 38);
    }

    #[test]
    fn sections_keep_their_order() {
        let kinds: Vec<_> = catalog().sections().iter().map(|section| section.kind).collect();
        assert_eq!(
            kinds,
            [
                SectionKind::Partnerships,
                SectionKind::Corporations,
                SectionKind::Cooperatives,
                SectionKind::Other,
                SectionKind::MixedForms
            ]
        );
        assert_eq!(SectionKind::Other.footer(), None);
    }

    #[test]
    fn registry_bases_are_listed_and_alternates_are_not() {
        let catalog = catalog();
        let listed: HashSet<_> = catalog.companies().map(|company| company.key.as_str()).collect();
        for (base, alternate) in catalog.alternates().iter() {
            assert!(listed.contains(base.key.as_str()), "{} not listed", base.key);
            assert!(!listed.contains(alternate.key.as_str()), "{} listed", alternate.key);
        }
    }

    #[test]
    fn find_reports_unknown_keys() -> anyhow::Result<()> {
        let catalog = catalog();
        assert_eq!(catalog.find("gmbh")?.title(), "GmbH");
        assert_eq!(catalog.find("se-monistic")?.title(), "SE");
        assert_eq!(
            catalog.find("llc"),
            Err(CatalogError::UnknownCompany("llc".to_string()))
        );
        Ok(())
    }

    #[test]
    fn resolve_alternate_uses_registry() -> anyhow::Result<()> {
        let catalog = catalog();
        let gmbh = catalog.find("gmbh")?;
        let (base, alternate) = gmbh.resolve_alternate(true).expect("gmbh has an alternate");
        assert_eq!(base, gmbh);
        assert_eq!(alternate.title(), "gGmbH");
        assert!(gmbh.resolve_alternate(false).is_none());
        assert!(alternate.resolve_alternate(true).is_none());
        assert!(catalog.find("kg")?.resolve_alternate(true).is_none());
        Ok(())
    }

    #[test]
    fn variant_expansion_grows_by_listed_bases() -> anyhow::Result<()> {
        let catalog = catalog();
        let corporations = &catalog
            .section(SectionKind::Corporations)
            .expect("corporations section")
            .companies;
        let expanded = crate::variants::expand_with_variants(corporations, true);
        let bases = corporations
            .iter()
            .filter(|company| catalog.alternates().is_base(company))
            .count();
        assert_eq!(bases, 5);
        assert_eq!(expanded.len(), corporations.len() + bases);

        let position = expanded
            .iter()
            .position(|company| company.key == "gmbh")
            .expect("gmbh listed");
        assert_eq!(expanded[position + 1].key, "ggmbh");
        Ok(())
    }

    #[test]
    fn section_search_reaches_hidden_alternates() -> anyhow::Result<()> {
        let catalog = catalog();
        let registry = catalog.alternates();
        let others = catalog.section(SectionKind::Other).expect("other section");

        let hidden: Vec<_> = others
            .visible_companies(registry, "wirtschaftlich", false)
            .into_iter()
            .map(|company| company.key)
            .collect();
        assert_eq!(hidden, ["ev"]);

        let shown: Vec<_> = others
            .visible_companies(registry, "wirtschaftlich", true)
            .into_iter()
            .map(|company| company.key)
            .collect();
        assert_eq!(shown, ["wv"]);

        assert_eq!(others.visible_companies(registry, "", true).len(), 5);
        Ok(())
    }

    #[test]
    fn mixed_examples_embed_companies() {
        let mixed = catalog()
            .section(SectionKind::MixedForms)
            .expect("mixed section");
        for company in &mixed.companies {
            let inserted: Vec<_> = company
                .structure
                .iter()
                .flat_map(|node| node.layers())
                .filter(|layer| layer.category() == Category::InsertedCompany)
                .collect();
            assert!(!inserted.is_empty(), "{} embeds nothing", company.key);
            assert!(inserted
                .iter()
                .all(|layer| layer.liability != Liability::None));
        }
    }
}
