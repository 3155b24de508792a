//! The finite set of layer kinds a company structure is made of.

use serde::{Deserialize, Serialize};

use super::{liability::Liability, node::NodeId};
use crate::company::Company;

/// Top-level classification of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SupervisoryBoard,
    Management,
    Shareholder,
    Capital,
    Stocks,
    Ship,
    InsertedCompany,
}

impl Category {
    /// Every category, in the order the graphic legend lists them.
    pub const ALL: [Category; 7] = [
        Category::SupervisoryBoard,
        Category::Management,
        Category::Shareholder,
        Category::Capital,
        Category::Stocks,
        Category::Ship,
        Category::InsertedCompany,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::SupervisoryBoard => "Supervisory Board",
            Category::Management => "Management",
            Category::Shareholder => "Shareholder",
            Category::Capital => "Capital",
            Category::Stocks => "Stocks",
            Category::Ship => "Ship",
            Category::InsertedCompany => "Company",
        }
    }
}

/// The specific type of management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagementType {
    #[default]
    Management,
    Complementary,
    Board,
    BoardOfDirectors,
}

impl ManagementType {
    pub const ALL: [ManagementType; 4] = [
        ManagementType::Management,
        ManagementType::Complementary,
        ManagementType::Board,
        ManagementType::BoardOfDirectors,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ManagementType::Management => "Management",
            ManagementType::Complementary => "Complementary",
            ManagementType::Board => "Board",
            ManagementType::BoardOfDirectors => "Board of Directors",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            ManagementType::Management => "The management manages and represents the company.",
            ManagementType::Complementary => {
                "A complementary is an unlimited liable shareholder of a KG or KGaA that manages the company."
            }
            ManagementType::Board => "The board manages and represents the company.",
            ManagementType::BoardOfDirectors => {
                "The board of directors manages and represents the company on their own responsibility."
            }
        }
    }
}

/// The specific type of shareholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareholderType {
    #[default]
    Shareholder,
    LimitedPartner,
    Stockholder,
    CooperativeMember,
    ClubMember,
    Policyholder,
}

impl ShareholderType {
    pub const ALL: [ShareholderType; 6] = [
        ShareholderType::Shareholder,
        ShareholderType::LimitedPartner,
        ShareholderType::Stockholder,
        ShareholderType::CooperativeMember,
        ShareholderType::ClubMember,
        ShareholderType::Policyholder,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ShareholderType::Shareholder => "Shareholder",
            ShareholderType::LimitedPartner => "Limited Partner",
            ShareholderType::Stockholder => "Stockholder",
            ShareholderType::CooperativeMember => "Cooperative Member",
            ShareholderType::ClubMember => "Club Member",
            ShareholderType::Policyholder => "Policyholder",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            ShareholderType::Shareholder => "A shareholder owns equity in a company.",
            ShareholderType::LimitedPartner => {
                "A limited partner is only liable with their deposits. However, they have no right to manage the company."
            }
            ShareholderType::Stockholder => {
                "A stockholder is a shareholder of a company, which’s capital is divided into stocks. The whole of stockholders form the general assembly."
            }
            ShareholderType::CooperativeMember => "A person that provides assets to a cooperative.",
            ShareholderType::ClubMember => "A person that holds membership of a club.",
            ShareholderType::Policyholder => "A person that gains insurance.",
        }
    }
}

/// The specific type of capital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalType {
    NoCompulsoryCapital,
    #[default]
    Capital,
    PrivateAssets,
    PrivateDeposits,
    FoundationCapital,
    ClubCapital,
}

impl CapitalType {
    pub const ALL: [CapitalType; 6] = [
        CapitalType::NoCompulsoryCapital,
        CapitalType::Capital,
        CapitalType::PrivateAssets,
        CapitalType::PrivateDeposits,
        CapitalType::FoundationCapital,
        CapitalType::ClubCapital,
    ];

    pub fn title(self) -> &'static str {
        match self {
            CapitalType::NoCompulsoryCapital => "No Compulsory Capital",
            CapitalType::Capital => "Capital",
            CapitalType::PrivateAssets => "Private Assets",
            CapitalType::PrivateDeposits => "Private Deposits",
            CapitalType::FoundationCapital => "Foundation Capital",
            CapitalType::ClubCapital => "Club Capital",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            CapitalType::NoCompulsoryCapital => "The company is not obligated to have capital.",
            CapitalType::Capital => {
                "The capital is the money, securities, and assets a company owns."
            }
            CapitalType::PrivateAssets => "The money, securities, and assets of a person.",
            CapitalType::PrivateDeposits => {
                "Deposits are values that a person inserted into a company, i.e., money, securities, or assets."
            }
            CapitalType::FoundationCapital => {
                "The capital of a foundation. It has been gifted by a founder/donor and may only be used for the foundation’s purpose."
            }
            CapitalType::ClubCapital => "The capital the club owns.",
        }
    }
}

/// The role an inserted company performs in the company it is embedded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyRole {
    /// The inserted company manages the base company.
    Management,
    /// The inserted company is a shareholder of the base company.
    Shareholder,
}

impl CompanyRole {
    /// The category whose slot the inserted company takes over.
    pub fn category(self) -> Category {
        match self {
            CompanyRole::Management => Category::Management,
            CompanyRole::Shareholder => Category::Shareholder,
        }
    }
}

/// Category plus the typed sub-variant of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "variant", rename_all = "snake_case")]
pub enum LayerKind {
    SupervisoryBoard,
    Management(ManagementType),
    Shareholder(ShareholderType),
    Capital(CapitalType),
    Stocks,
    Ship,
    InsertedCompany {
        company: Box<Company>,
        role: CompanyRole,
    },
}

impl LayerKind {
    pub fn category(&self) -> Category {
        match self {
            LayerKind::SupervisoryBoard => Category::SupervisoryBoard,
            LayerKind::Management(_) => Category::Management,
            LayerKind::Shareholder(_) => Category::Shareholder,
            LayerKind::Capital(_) => Category::Capital,
            LayerKind::Stocks => Category::Stocks,
            LayerKind::Ship => Category::Ship,
            LayerKind::InsertedCompany { .. } => Category::InsertedCompany,
        }
    }
}

const SUPERVISORY_BOARD_INFO: &str = "The supervisory board elects and controls the board.";
const STOCKS_INFO: &str =
    "The capital of the company is divided into stocks. The stocks may be traded on an exchange.";
const SHIP_INFO: &str = "A partner shipping company is based and dependent on a ship, used specifically for seafaring. The company is dissolved when the ship is lost.";

/// A leaf of the structure tree: one structural concern of a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub id: NodeId,
    /// Text shown inside the graphic; may differ from [`Layer::variant_title`].
    pub label: String,
    pub kind: LayerKind,
    pub liability: Liability,
}

impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.kind == other.kind && self.liability == other.liability
    }
}

impl Layer {
    /// Build a layer with a fresh identifier and no liability.
    pub fn new(kind: LayerKind, label: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            label: label.into(),
            kind,
            liability: Liability::None,
        }
    }

    pub fn supervisory_board() -> Self {
        Self::new(LayerKind::SupervisoryBoard, Category::SupervisoryBoard.title())
    }

    /// A supervisory board with a custom label, e.g. `"From 500 employees"`.
    pub fn supervisory_board_labeled(label: impl Into<String>) -> Self {
        Self::new(LayerKind::SupervisoryBoard, label)
    }

    pub fn management(kind: ManagementType) -> Self {
        Self::new(LayerKind::Management(kind), kind.title())
    }

    pub fn management_labeled(kind: ManagementType, label: impl Into<String>) -> Self {
        Self::new(LayerKind::Management(kind), label)
    }

    /// Management with an exact number of members.
    pub fn management_fixed(kind: ManagementType, label: Option<&str>, amount: u32) -> Self {
        Self::new(LayerKind::Management(kind), fixed_label(label, amount))
    }

    /// Management with a minimum number of members.
    pub fn management_min(kind: ManagementType, min: u32) -> Self {
        Self::new(LayerKind::Management(kind), plus(min))
    }

    pub fn shareholder(kind: ShareholderType) -> Self {
        Self::new(LayerKind::Shareholder(kind), kind.title())
    }

    pub fn shareholder_labeled(kind: ShareholderType, label: impl Into<String>) -> Self {
        Self::new(LayerKind::Shareholder(kind), label)
    }

    pub fn shareholder_fixed(kind: ShareholderType, label: Option<&str>, amount: u32) -> Self {
        Self::new(LayerKind::Shareholder(kind), fixed_label(label, amount))
    }

    pub fn shareholder_min(kind: ShareholderType, label: Option<&str>, min: u32) -> Self {
        let text = match label {
            Some(label) => format!("{label} ({})", plus(min)),
            None => plus(min),
        };
        Self::new(LayerKind::Shareholder(kind), text)
    }

    pub fn capital(kind: CapitalType) -> Self {
        Self::new(LayerKind::Capital(kind), kind.title())
    }

    pub fn capital_labeled(kind: CapitalType, label: impl Into<String>) -> Self {
        Self::new(LayerKind::Capital(kind), label)
    }

    /// Capital with a minimum amount in euro.
    pub fn capital_min(min: u64) -> Self {
        Self::new(LayerKind::Capital(CapitalType::Capital), euro(min))
    }

    /// Capital bounded by a minimum and maximum amount in euro.
    pub fn capital_range(min: u64, max: u64) -> Self {
        Self::new(
            LayerKind::Capital(CapitalType::Capital),
            format!("{} – {}", euro(min), euro(max)),
        )
    }

    /// Stocks with a minimum total value in euro.
    pub fn stocks_min(min: u64) -> Self {
        Self::new(LayerKind::Stocks, min_euro(min))
    }

    pub fn stocks_labeled(label: &str, min: u64) -> Self {
        Self::new(LayerKind::Stocks, format!("{label} ({})", min_euro(min)))
    }

    pub fn ship() -> Self {
        Self::new(LayerKind::Ship, "One Ship")
    }

    /// Embed a full company as management or shareholder.
    pub fn inserted(company: Company, role: CompanyRole) -> Self {
        let label = company.title().to_string();
        Self::new(
            LayerKind::InsertedCompany {
                company: Box::new(company),
                role,
            },
            label,
        )
    }

    /// Embed a company that fills the role at least `min` times.
    pub fn inserted_min(company: Company, role: CompanyRole, min: u32) -> Self {
        let label = format!("{} ({})", company.title(), plus(min));
        Self::new(
            LayerKind::InsertedCompany {
                company: Box::new(company),
                role,
            },
            label,
        )
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Title of the specific sub-kind, e.g. `"Complementary"` for a management layer.
    pub fn variant_title(&self) -> &str {
        match &self.kind {
            LayerKind::SupervisoryBoard => Category::SupervisoryBoard.title(),
            LayerKind::Management(kind) => kind.title(),
            LayerKind::Shareholder(kind) => kind.title(),
            LayerKind::Capital(kind) => kind.title(),
            LayerKind::Stocks => Category::Stocks.title(),
            LayerKind::Ship => Category::Ship.title(),
            LayerKind::InsertedCompany { company, .. } => company.title(),
        }
    }

    pub fn explanation(&self) -> &'static str {
        match &self.kind {
            LayerKind::SupervisoryBoard => SUPERVISORY_BOARD_INFO,
            LayerKind::Management(kind) => kind.explanation(),
            LayerKind::Shareholder(kind) => kind.explanation(),
            LayerKind::Capital(kind) => kind.explanation(),
            LayerKind::Stocks => STOCKS_INFO,
            LayerKind::Ship => SHIP_INFO,
            LayerKind::InsertedCompany { role, .. } => match role {
                CompanyRole::Management => "A company that manages this company.",
                CompanyRole::Shareholder => "A company that is a shareholder of this company.",
            },
        }
    }

    /// The embedded company of an inserted-company layer.
    pub fn embedded_company(&self) -> Option<&Company> {
        match &self.kind {
            LayerKind::InsertedCompany { company, .. } => Some(company),
            _ => None,
        }
    }

    /// The role of an inserted-company layer.
    pub fn role(&self) -> Option<CompanyRole> {
        match &self.kind {
            LayerKind::InsertedCompany { role, .. } => Some(*role),
            _ => None,
        }
    }
}

fn fixed_label(label: Option<&str>, amount: u32) -> String {
    match label {
        Some(label) => format!("{label} ({amount})"),
        None => amount.to_string(),
    }
}

/// `3` becomes `"3+"`, meaning "three or more".
pub fn plus(value: u32) -> String {
    format!("{value}+")
}

/// Format a whole euro amount as `€12,345.00`.
pub fn euro(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("€{grouped}.00")
}

pub fn min_euro(amount: u64) -> String {
    format!("min. {}", euro(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euro_groups_thousands() {
        assert_eq!(euro(1), "€1.00");
        assert_eq!(euro(999), "€999.00");
        assert_eq!(euro(25_000), "€25,000.00");
        assert_eq!(euro(15_000_000), "€15,000,000.00");
        assert_eq!(min_euro(50_000), "min. €50,000.00");
    }

    #[test]
    fn labels_follow_counts() {
        assert_eq!(Layer::management_min(ManagementType::Complementary, 1).label, "1+");
        assert_eq!(
            Layer::management_fixed(ManagementType::Management, Some("Proprietor"), 1).label,
            "Proprietor (1)"
        );
        assert_eq!(
            Layer::shareholder_fixed(ShareholderType::LimitedPartner, None, 2).label,
            "2"
        );
        assert_eq!(
            Layer::shareholder_min(ShareholderType::Shareholder, Some("Mariner"), 2).label,
            "Mariner (2+)"
        );
        assert_eq!(Layer::capital_range(1, 24_999).label, "€1.00 – €24,999.00");
        assert_eq!(
            Layer::stocks_labeled("External capital managment", 125_000).label,
            "External capital managment (min. €125,000.00)"
        );
    }

    #[test]
    fn derived_titles_and_categories() {
        let layer = Layer::management_min(ManagementType::Complementary, 1);
        assert_eq!(layer.category(), Category::Management);
        assert_eq!(layer.variant_title(), "Complementary");
        assert!(layer.explanation().contains("unlimited liable"));

        let board = Layer::supervisory_board_labeled("From 500 employees");
        assert_eq!(board.variant_title(), "Supervisory Board");
        assert_eq!(board.label, "From 500 employees");
        assert_eq!(Layer::ship().category(), Category::Ship);
    }

    #[test]
    fn inserted_layer_wraps_company() {
        let gmbh = Company::new("gmbh", "Gesellschaft mit beschränkter Haftung", "Limited Liability Partnership")
            .with_abbreviation("GmbH");
        let layer = Layer::inserted_min(gmbh.clone(), CompanyRole::Management, 2);

        assert_eq!(layer.category(), Category::InsertedCompany);
        assert_eq!(layer.label, "GmbH (2+)");
        assert_eq!(layer.variant_title(), "GmbH");
        assert_eq!(layer.role(), Some(CompanyRole::Management));
        assert_eq!(layer.embedded_company(), Some(&gmbh));
        assert_eq!(layer.liability, Liability::None);
        assert_eq!(CompanyRole::Shareholder.category(), Category::Shareholder);
    }

    #[test]
    fn equality_ignores_identifiers() {
        let first = Layer::capital(CapitalType::PrivateAssets);
        let second = Layer::capital(CapitalType::PrivateAssets);
        assert_ne!(first.id, second.id);
        assert_eq!(first, second);
        assert_ne!(first, Layer::capital(CapitalType::PrivateDeposits));
    }

    #[test]
    fn kind_serializes_with_category_tag() -> anyhow::Result<()> {
        let layer = Layer::management(ManagementType::BoardOfDirectors).with_unlimited_liability();
        let value = serde_json::to_value(&layer)?;
        assert_eq!(value["kind"]["category"], "management");
        assert_eq!(value["kind"]["variant"], "board_of_directors");
        assert_eq!(value["liability"], "unlimited");

        let parsed: Layer = serde_json::from_value(value)?;
        assert_eq!(parsed, layer);
        assert_eq!(parsed.id, layer.id);
        Ok(())
    }
}
