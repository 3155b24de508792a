//! Mixed forms: one company acting as management or shareholder of another.
//!
//! Composing `insertion & Co. base` copies the base structure and replaces the
//! first eligible management (or shareholder) layer with an inserted-company
//! layer that keeps the liability of the layer it replaces.

use tracing::debug;

use crate::{
    catalog::Catalog,
    company::Company,
    error::{CandidateSlot, CatalogError},
    structure::{Category, CompanyRole, Layer, Liability, StructuralNode},
};

/// Bases without a separate management layer; their shareholders manage the
/// company, so an inserted company takes a shareholder slot.
pub const SHAREHOLDER_MANAGED_BASES: [&str; 5] = ["ohg", "ug", "gug", "gmbh", "ggmbh"];

/// Role the insertion takes in `base`.
pub fn insertion_role(base: &Company) -> CompanyRole {
    if SHAREHOLDER_MANAGED_BASES.contains(&base.key.as_str()) {
        CompanyRole::Shareholder
    } else {
        CompanyRole::Management
    }
}

/// Derive the mixed form `insertion & Co. base`.
///
/// Neither input is modified. When the base has no eligible layer the result
/// carries an unchanged copy of the base structure.
pub fn compose_mixed_form(base: &Company, insertion: &Company) -> Company {
    let role = insertion_role(base);
    let mut structure = base.structure.clone();

    match substitute_first(&mut structure, role, insertion) {
        Some(depth) => debug!(
            base = %base.key,
            insertion = %insertion.key,
            ?role,
            depth,
            "inserted company into base structure"
        ),
        None => debug!(
            base = %base.key,
            insertion = %insertion.key,
            ?role,
            "no eligible layer; structure left unchanged"
        ),
    }

    let mut composed = Company::new(
        format!("{}-co-{}", insertion.key, base.key),
        format!("{} & Co. {}", insertion.german_name, base.german_name),
        format!(
            "{} & Co. {}",
            insertion.english_translation, base.english_translation
        ),
    )
    .with_abbreviation(format!("{} & Co. {}", insertion.title(), base.title()))
    .with_structure(structure);
    composed.reason = base.reason.clone();
    composed
}

/// Replace the first eligible layer at the top level or directly inside a
/// row. Returns the depth of the replacement (0 or 1).
fn substitute_first(
    nodes: &mut [StructuralNode],
    role: CompanyRole,
    insertion: &Company,
) -> Option<usize> {
    for node in nodes.iter_mut() {
        match node {
            StructuralNode::Layer(layer) => {
                if let Some(replacement) = replacement_for(layer, role, insertion) {
                    *layer = replacement;
                    return Some(0);
                }
            }
            StructuralNode::Row(row) => {
                for child in row.children.iter_mut() {
                    let StructuralNode::Layer(layer) = child else {
                        continue;
                    };
                    if let Some(replacement) = replacement_for(layer, role, insertion) {
                        *layer = replacement;
                        return Some(1);
                    }
                }
            }
        }
    }
    None
}

fn replacement_for(layer: &Layer, role: CompanyRole, insertion: &Company) -> Option<Layer> {
    let category = layer.category();
    if category == Category::SupervisoryBoard {
        return None;
    }
    if category != role.category() || layer.liability == Liability::None {
        return None;
    }
    Some(Layer::inserted(insertion.clone(), role).with_liability(layer.liability))
}

/// The fixed candidate lists offered by the mixed-forms builder.
#[derive(Debug, Clone)]
pub struct MixedFormCandidates {
    pub bases: Vec<Company>,
    pub insertions: Vec<Company>,
}

pub const BASE_CANDIDATES: [&str; 10] = [
    "ohg", "kg", "ug", "gug", "gmbh", "ggmbh", "kgaa", "ag", "gag", "se",
];

pub const INSERTION_CANDIDATES: [&str; 15] = [
    "kg",
    "ewiv",
    "ug",
    "gug",
    "gmbh",
    "ggmbh",
    "gmbh-co-kg",
    "kgaa",
    "ag",
    "gag",
    "se",
    "eg",
    "sce",
    "stiftung",
    "ev",
];

/// The most common mixed form, GmbH & Co. KG, is the builder's default.
pub const DEFAULT_BASE: &str = "kg";
pub const DEFAULT_INSERTION: &str = "gmbh";

impl MixedFormCandidates {
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, CatalogError> {
        let collect = |keys: &[&str]| -> Result<Vec<Company>, CatalogError> {
            keys.iter()
                .map(|key| catalog.find(key).cloned())
                .collect()
        };
        Ok(Self {
            bases: collect(&BASE_CANDIDATES)?,
            insertions: collect(&INSERTION_CANDIDATES)?,
        })
    }

    pub fn base_index(&self, key: &str) -> Result<usize, CatalogError> {
        position(&self.bases, key, CandidateSlot::Base)
    }

    pub fn insertion_index(&self, key: &str) -> Result<usize, CatalogError> {
        position(&self.insertions, key, CandidateSlot::Insertion)
    }

    /// Compose the candidates at the given positions.
    pub fn compose(&self, base: usize, insertion: usize) -> Option<Company> {
        Some(compose_mixed_form(
            self.bases.get(base)?,
            self.insertions.get(insertion)?,
        ))
    }
}

fn position(companies: &[Company], key: &str, slot: CandidateSlot) -> Result<usize, CatalogError> {
    companies
        .iter()
        .position(|company| company.key == key)
        .ok_or_else(|| CatalogError::NotAMixedFormCandidate {
            key: key.to_string(),
            slot,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::catalog,
        row, structure,
        structure::{CapitalType, Layer, ManagementType, ShareholderType, StructuralNode},
    };

    fn limited_company() -> Company {
        Company::new(
            "gmbh",
            "Gesellschaft mit beschränkter Haftung",
            "Limited Liability Partnership",
        )
        .with_abbreviation("GmbH")
        .with_structure(structure![
            Layer::supervisory_board_labeled("From 500 employees"),
            Layer::shareholder_min(ShareholderType::Shareholder, None, 1).with_limited_liability(),
            Layer::capital_min(25_000),
        ])
    }

    fn limited_partnership() -> Company {
        Company::new("kg", "Kommanditgesellschaft", "Limited Partnership")
            .with_abbreviation("KG")
            .with_reason("Trade")
            .with_tidbit("A tidbit that must not survive composition.")
            .with_structure(structure![
                row![
                    Layer::management_min(ManagementType::Complementary, 1)
                        .with_unlimited_liability(),
                    Layer::shareholder_min(ShareholderType::LimitedPartner, None, 1)
                        .with_limited_liability(),
                ],
                Layer::capital(CapitalType::Capital),
            ])
    }

    fn layer(node: &StructuralNode) -> &Layer {
        node.as_layer().expect("expected a layer")
    }

    #[test]
    fn replaces_management_inside_row() {
        let base = limited_partnership();
        let insertion = limited_company();
        let composed = compose_mixed_form(&base, &insertion);

        assert_eq!(composed.abbreviation.as_deref(), Some("GmbH & Co. KG"));
        assert_eq!(
            composed.german_name,
            "Gesellschaft mit beschränkter Haftung & Co. Kommanditgesellschaft"
        );
        assert_eq!(
            composed.english_translation,
            "Limited Liability Partnership & Co. Limited Partnership"
        );
        assert_eq!(composed.reason.as_deref(), Some("Trade"));
        assert_eq!(composed.tidbit, None);

        let row = composed.structure[0].as_row().expect("row survives");
        let inserted = layer(&row.children[0]);
        assert_eq!(inserted.category(), Category::InsertedCompany);
        assert_eq!(inserted.role(), Some(CompanyRole::Management));
        assert_eq!(inserted.liability, Liability::Unlimited);
        assert_eq!(inserted.embedded_company(), Some(&insertion));
        assert_eq!(inserted.label, "GmbH");

        let base_row = base.structure[0].as_row().expect("base row");
        assert_eq!(row.children[1], base_row.children[1]);
        assert_eq!(composed.structure[1], base.structure[1]);
        assert_eq!(composed.structure.len(), base.structure.len());
    }

    #[test]
    fn base_is_left_untouched() {
        let base = limited_partnership();
        let before = base.clone();
        let _ = compose_mixed_form(&base, &limited_company());
        assert_eq!(base.structure, before.structure);
        assert_eq!(base.tidbit, before.tidbit);
    }

    #[test]
    fn shareholder_managed_bases_take_shareholder_slot() {
        let base = limited_company();
        assert_eq!(insertion_role(&base), CompanyRole::Shareholder);
        assert_eq!(insertion_role(&limited_partnership()), CompanyRole::Management);

        let composed = compose_mixed_form(&base, &limited_partnership());
        assert_eq!(layer(&composed.structure[0]).category(), Category::SupervisoryBoard);
        let inserted = layer(&composed.structure[1]);
        assert_eq!(inserted.role(), Some(CompanyRole::Shareholder));
        assert_eq!(inserted.liability, Liability::Limited);
        assert_eq!(composed.title(), "KG & Co. GmbH");
    }

    #[test]
    fn layers_without_liability_are_skipped() {
        let base = Company::new("verein", "Nicht eingetragener Verein", "Unregistered Club")
            .with_structure(structure![
                Layer::management(ManagementType::Board),
                row![
                    Layer::supervisory_board(),
                    Layer::management_min(ManagementType::Board, 2).with_limited_liability(),
                ],
                Layer::management(ManagementType::Management).with_unlimited_liability(),
            ]);
        let composed = compose_mixed_form(&base, &limited_company());

        assert_eq!(composed.structure[0], base.structure[0]);
        let row = composed.structure[1].as_row().expect("row");
        assert_eq!(layer(&row.children[0]).category(), Category::SupervisoryBoard);
        assert_eq!(layer(&row.children[1]).liability, Liability::Limited);
        assert_eq!(layer(&row.children[1]).category(), Category::InsertedCompany);
        // first match wins, later siblings stay as they were
        assert_eq!(composed.structure[2], base.structure[2]);
    }

    #[test]
    fn supervisory_board_is_never_replaced() {
        let base = Company::new("ag", "Aktiengesellschaft", "Joint-Stock Company")
            .with_abbreviation("AG")
            .with_structure(structure![
                Layer::supervisory_board().with_unlimited_liability(),
                Layer::management(ManagementType::Board).with_unlimited_liability(),
            ]);
        let composed = compose_mixed_form(&base, &limited_company());
        assert_eq!(layer(&composed.structure[0]).category(), Category::SupervisoryBoard);
        assert_eq!(layer(&composed.structure[1]).category(), Category::InsertedCompany);
    }

    #[test]
    fn nothing_eligible_returns_a_copy() {
        let base = Company::new("stiftung", "Stiftung", "Foundation").with_structure(structure![
            Layer::shareholder(ShareholderType::Shareholder).with_unlimited_liability(),
            row![Layer::capital(CapitalType::FoundationCapital), Layer::stocks_min(1)],
        ]);
        let composed = compose_mixed_form(&base, &limited_company());
        assert_eq!(composed.structure, base.structure);
    }

    #[test]
    fn does_not_descend_below_one_row() {
        let base = Company::new("deep", "Tief", "Deep").with_structure(structure![row![row![
            Layer::management(ManagementType::Board).with_unlimited_liability()
        ]]]);
        let composed = compose_mixed_form(&base, &limited_company());
        assert_eq!(composed.structure, base.structure);
    }

    #[test]
    fn candidates_come_from_catalog() -> anyhow::Result<()> {
        let candidates = MixedFormCandidates::from_catalog(catalog())?;
        assert_eq!(candidates.bases.len(), BASE_CANDIDATES.len());
        assert_eq!(candidates.insertions.len(), INSERTION_CANDIDATES.len());

        let base = candidates.base_index(DEFAULT_BASE)?;
        let insertion = candidates.insertion_index(DEFAULT_INSERTION)?;
        let composed = candidates
            .compose(base, insertion)
            .expect("indices are in range");
        assert_eq!(composed.title(), "GmbH & Co. KG");

        assert!(matches!(
            candidates.base_index("ewiv"),
            Err(CatalogError::NotAMixedFormCandidate {
                slot: CandidateSlot::Base,
                ..
            })
        ));
        assert!(candidates.compose(99, 0).is_none());
        Ok(())
    }

    #[test]
    fn catalog_ag_becomes_general_partner_of_ohg() -> anyhow::Result<()> {
        let catalog = catalog();
        let composed = compose_mixed_form(catalog.find("ohg")?, catalog.find("ag")?);
        let inserted = layer(&composed.structure[0]);
        assert_eq!(inserted.role(), Some(CompanyRole::Shareholder));
        assert_eq!(inserted.liability, Liability::Unlimited);
        assert_eq!(composed.reason.as_deref(), Some("Trade"));
        Ok(())
    }
}
