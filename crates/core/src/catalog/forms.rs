//! Definitions of the individual legal forms.
//!
//! Every function builds a fresh value, so nodes never share identifiers
//! between two constructions of the same form.

use crate::{
    company::Company,
    row, structure,
    structure::{CapitalType, CompanyRole, Layer, ManagementType, ShareholderType},
};

const CHARITABLE: &str = "Charitable purpose";
const COOPERATIVE_REASON: &str = "Joint economic business operation";
const FROM_500_EMPLOYEES: &str = "From 500 employees";

// Partnerships

pub fn eu() -> Company {
    Company::new("eu", "Einzelunternehmen", "Sole Proprietor")
        .with_tidbit("Sole proprietor is the most common form of company in Germany.")
        .with_structure(structure![
            Layer::shareholder_min(ShareholderType::Shareholder, Some("Proprietor"), 1)
                .with_unlimited_liability(),
            Layer::capital(CapitalType::PrivateAssets),
        ])
}

pub fn sg() -> Company {
    Company::new("sg", "Stille Gesellschaft", "Silent Partnership")
        .with_tidbit("A silent partnership exist when a person invests in a company with a deposit. It is only an inside company and does not have to be disclosed, except for AGs.")
        .with_structure(structure![
            row![
                Layer::management_fixed(ManagementType::Management, Some("Proprietor"), 1)
                    .with_unlimited_liability(),
                Layer::shareholder_fixed(ShareholderType::LimitedPartner, Some("Investor"), 1)
                    .with_limited_liability(),
            ],
            row![
                Layer::capital(CapitalType::PrivateAssets),
                Layer::capital(CapitalType::PrivateDeposits),
            ],
        ])
}

pub fn pr() -> Company {
    Company::new("pr", "Partenreederei", "Partner Shipping Company")
        .with_reason("Seafaring")
        .with_tidbit("Since 2013, partner shipping companies cannot be created anymore.")
        .with_structure(structure![
            Layer::shareholder_min(ShareholderType::Shareholder, Some("Mariner"), 2)
                .with_unlimited_liability(),
            Layer::ship(),
        ])
}

pub fn ek() -> Company {
    Company::new(
        "ek",
        "Eingetragener Kaufmann (e. Kfm.) / Eingetragene Kauffrau (e. Kfr.)",
        "Registered Merchant",
    )
    .with_abbreviation("e. K.")
    .with_reason("Trade")
    .with_structure(structure![
        Layer::shareholder_min(ShareholderType::Shareholder, Some("Merchant"), 1)
            .with_unlimited_liability(),
        Layer::capital(CapitalType::PrivateAssets),
    ])
}

pub fn partg() -> Company {
    Company::new("partg", "Partnerschaftsgesellschaft", "Partnership Company")
        .with_abbreviation("PartG")
        .with_structure(structure![
            Layer::shareholder_min(ShareholderType::Shareholder, Some("Freelancer"), 2)
                .with_unlimited_liability(),
            Layer::capital(CapitalType::PrivateAssets),
        ])
}

pub fn partg_mbb() -> Company {
    Company::new(
        "partg-mbb",
        "Partnerschaftsgesellschaft mit beschränkter Berufshaftung",
        "Partnership Company with Limited Professional Liability",
    )
    .with_abbreviation("PartG mbB")
    .with_tidbit("Only freelancers with professional indemnity insurance can found a PartG mbB.")
    .with_structure(structure![
        Layer::shareholder_min(ShareholderType::Shareholder, Some("Freelancer"), 2)
            .with_limited_liability(),
        Layer::capital(CapitalType::PrivateAssets),
    ])
}

pub fn gbr() -> Company {
    Company::new("gbr", "Gesellschaft bürgerlichen Rechts", "Civil Law Partnership")
        .with_abbreviation("GbR")
        .with_tidbit("When a GbR is involved in trade, it converts to an OHG.")
        .with_structure(structure![
            Layer::shareholder_min(ShareholderType::Shareholder, None, 2).with_unlimited_liability(),
            Layer::capital(CapitalType::PrivateAssets),
        ])
}

pub fn ohg() -> Company {
    Company::new("ohg", "Offene Handelsgesellschaft", "General Partnership")
        .with_abbreviation("OHG")
        .with_reason("Trade")
        .with_structure(structure![
            Layer::shareholder_min(ShareholderType::Shareholder, None, 2).with_unlimited_liability(),
            Layer::capital(CapitalType::PrivateAssets),
        ])
}

pub fn kg() -> Company {
    Company::new("kg", "Kommanditgesellschaft", "Limited Partnership")
        .with_abbreviation("KG")
        .with_structure(structure![
            row![
                Layer::management_min(ManagementType::Complementary, 1).with_unlimited_liability(),
                Layer::shareholder_min(ShareholderType::LimitedPartner, None, 1)
                    .with_limited_liability(),
            ],
            Layer::capital(CapitalType::Capital),
        ])
}

pub fn ewiv() -> Company {
    Company::new(
        "ewiv",
        "Europäische wirtschaftliche Interessenvereinigung",
        "European Economic Interest Grouping (EEIG)",
    )
    .with_abbreviation("EWIV")
    .with_tidbit("The shareholders of an EWIV have to be from at least two countries of the European Economic Area. An EWIV can employ a maximum of 500 people.")
    .with_structure(structure![
        Layer::shareholder_min(ShareholderType::Shareholder, None, 2).with_unlimited_liability(),
        Layer::capital(CapitalType::NoCompulsoryCapital),
    ])
}

// Corporations

pub fn ug() -> Company {
    Company::new(
        "ug",
        "Unternehmergesellschaft (haftungsbeschränkt)",
        "Entrepreneurial Company at Limited Liability",
    )
    .with_abbreviation("UG (haftungsbeschränkt)")
    .with_tidbit("The UG (haftungsbeschränkt) is not a separate type of company, but a variation of the GmbH with lower capital.")
    .with_structure(structure![
        Layer::shareholder_min(ShareholderType::Shareholder, None, 1).with_limited_liability(),
        Layer::capital_range(1, 24_999),
    ])
}

pub fn gug() -> Company {
    Company::new(
        "gug",
        "Gemeinnützige Unternehmergesellschaft (haftungsbeschränkt)",
        "Nonprofit Entrepreneurial Company at Limited Liability",
    )
    .with_abbreviation("gUG (haftungsbeschränkt)")
    .with_reason(CHARITABLE)
    .with_tidbit("The gUG (haftungsbeschränkt) is not a separate type of company, but a variant of the gGmbH with lower capital.")
    .with_structure(structure![
        Layer::shareholder_min(ShareholderType::Shareholder, None, 1).with_limited_liability(),
        Layer::capital_range(1, 24_999),
    ])
}

pub fn gmbh() -> Company {
    Company::new(
        "gmbh",
        "Gesellschaft mit beschränkter Haftung",
        "Limited Liability Partnership",
    )
    .with_abbreviation("GmbH")
    .with_structure(structure![
        Layer::supervisory_board_labeled(FROM_500_EMPLOYEES),
        Layer::shareholder_min(ShareholderType::Shareholder, None, 1).with_limited_liability(),
        Layer::capital_min(25_000),
    ])
}

pub fn ggmbh() -> Company {
    Company::new(
        "ggmbh",
        "Gemeinnützige Gesellschaft mit beschränkter Haftung",
        "Nonprofit Limited Liability Partnership",
    )
    .with_abbreviation("gGmbH")
    .with_reason(CHARITABLE)
    .with_structure(structure![
        Layer::supervisory_board_labeled(FROM_500_EMPLOYEES),
        Layer::shareholder_min(ShareholderType::Shareholder, None, 1).with_unlimited_liability(),
        Layer::capital_min(25_000),
    ])
}

pub fn kgaa() -> Company {
    Company::new("kgaa", "Kommanditgesellschaft auf Aktien", "Limited Partnership on Stocks")
        .with_abbreviation("KGaA")
        .with_structure(structure![
            row![
                Layer::management_min(ManagementType::Complementary, 1).with_unlimited_liability(),
                Layer::shareholder_min(ShareholderType::LimitedPartner, None, 1)
                    .with_limited_liability(),
            ],
            row![
                Layer::capital(CapitalType::PrivateDeposits),
                Layer::stocks_min(50_000),
            ],
        ])
}

/// Board and stockholders shared by every stock corporation.
fn stock_corporation_row(management: ManagementType) -> crate::structure::Row {
    row![
        Layer::management(management).with_unlimited_liability(),
        Layer::shareholder(ShareholderType::Stockholder).with_limited_liability(),
    ]
}

pub fn ag() -> Company {
    Company::new("ag", "Aktiengesellschaft", "Joint-Stock Company")
        .with_abbreviation("AG")
        .with_structure(structure![
            Layer::supervisory_board(),
            stock_corporation_row(ManagementType::Board),
            Layer::stocks_min(50_000),
        ])
}

pub fn gag() -> Company {
    Company::new("gag", "Gemeinnützige Aktiengesellschaft", "Nonprofit Joint-Stock Company")
        .with_abbreviation("gAG")
        .with_reason(CHARITABLE)
        .with_structure(structure![
            Layer::supervisory_board(),
            stock_corporation_row(ManagementType::Board),
            Layer::stocks_min(50_000),
        ])
}

pub fn inv_ag() -> Company {
    Company::new("inv-ag", "Investment-Aktiengesellschaft", "Investment Joint-Stock Company")
        .with_abbreviation("Inv-AG")
        .with_reason("Management of special assets")
        .with_structure(structure![
            Layer::supervisory_board(),
            stock_corporation_row(ManagementType::Board),
            Layer::stocks_labeled("External capital managment", 125_000),
        ])
}

pub fn inv_ag_internal() -> Company {
    Company::new(
        "inv-ag-internal",
        "Investment-Aktiengesellschaft",
        "Investment Joint-Stock Company",
    )
    .with_abbreviation("Inv-AG")
    .with_reason("Management of special assets")
    .with_structure(structure![
        Layer::supervisory_board(),
        stock_corporation_row(ManagementType::Board),
        Layer::stocks_labeled("Internal capital managment", 300_000),
    ])
}

pub fn reit_ag() -> Company {
    Company::new(
        "reit-ag",
        "Real-Estate-Investment-Trust-Aktiengesellschaft",
        "Real-Estate-Investment-Trust Joint-Stock Company",
    )
    .with_abbreviation("REIT-AG")
    .with_reason("Property management and investments (min. 75% of capital)")
    .with_tidbit("REIT-AGs have strict guidelines vis-à-vis their investments and their capital structure. For instance, at least 90% of profits have to be distributed to the shareholders. They must be listed on an exchange.")
    .with_structure(structure![
        Layer::supervisory_board(),
        stock_corporation_row(ManagementType::Board),
        Layer::stocks_min(15_000_000),
    ])
}

const SE_TIDBIT: &str = "An SE can be managed by a dualistic system with board and supervisory board (common in Germany) or the monistic system with only a board of directors (common in countries like the UK or the US).";

pub fn se() -> Company {
    Company::new(
        "se",
        "Societas Europaea (Europäische Gesellschaft)",
        "Societas Europaea (European Company)",
    )
    .with_abbreviation("SE")
    .with_tidbit(SE_TIDBIT)
    .with_structure(structure![
        Layer::supervisory_board(),
        stock_corporation_row(ManagementType::Board),
        Layer::stocks_min(125_000),
    ])
}

pub fn se_monistic() -> Company {
    Company::new(
        "se-monistic",
        "Societas Europaea (Europäische Gesellschaft)",
        "Societas Europaea (European Company)",
    )
    .with_abbreviation("SE")
    .with_tidbit(SE_TIDBIT)
    .with_structure(structure![
        stock_corporation_row(ManagementType::BoardOfDirectors),
        Layer::stocks_min(125_000),
    ])
}

// Cooperatives

const COOPERATIVE_TIDBIT: &str = "A cooperative can determine in their statute, whether cooperative members have limited or unlimited liability.";
const SCE_TIDBIT: &str = "The cooperative members of an SCE have to be from at least two countries of the European Economic Area.";

fn cooperative(key: &str, german_name: &str, translation: &str, abbreviation: &str) -> Company {
    Company::new(key, german_name, translation)
        .with_abbreviation(abbreviation)
        .with_reason(COOPERATIVE_REASON)
}

pub fn eg() -> Company {
    cooperative("eg", "Eingetragene Genossenschaft", "Registered Cooperative", "e. G.")
        .with_tidbit(COOPERATIVE_TIDBIT)
        .with_structure(structure![
            row![Layer::management(ManagementType::Board), Layer::supervisory_board()],
            Layer::shareholder_min(ShareholderType::CooperativeMember, None, 3)
                .with_unlimited_liability(),
            Layer::capital(CapitalType::NoCompulsoryCapital),
        ])
}

pub fn eg_limited() -> Company {
    cooperative(
        "eg-limited",
        "Eingetragene Genossenschaft mit beschränkter Haftung",
        "Registered Cooperative with Limited Liability",
        "e. G.",
    )
    .with_tidbit(COOPERATIVE_TIDBIT)
    .with_structure(structure![
        row![Layer::management(ManagementType::Board), Layer::supervisory_board()],
        Layer::shareholder_min(ShareholderType::CooperativeMember, None, 3)
            .with_limited_liability(),
        Layer::capital(CapitalType::NoCompulsoryCapital),
    ])
}

pub fn sce() -> Company {
    cooperative(
        "sce",
        "Societas Cooperativa Europaea (Europäische Genossenschaft)",
        "Societas Cooperativa Europaea (European Cooperative Society)",
        "SCE",
    )
    .with_tidbit(SCE_TIDBIT)
    .with_structure(structure![
        row![Layer::management(ManagementType::Board), Layer::supervisory_board()],
        Layer::shareholder_min(ShareholderType::CooperativeMember, None, 5)
            .with_unlimited_liability(),
        Layer::capital(CapitalType::NoCompulsoryCapital),
    ])
}

pub fn sce_mbh() -> Company {
    cooperative(
        "sce-mbh",
        "Societas Cooperativa Europaea (Europäische Genossenschaft) mit beschränkter Haftung",
        "Societas Cooperativa Europaea (European Cooperative Society) with Limited Liability",
        "SCE mbH",
    )
    .with_tidbit(SCE_TIDBIT)
    .with_structure(structure![
        row![Layer::management(ManagementType::Board), Layer::supervisory_board()],
        Layer::shareholder_min(ShareholderType::CooperativeMember, None, 5)
            .with_limited_liability(),
        Layer::capital(CapitalType::NoCompulsoryCapital),
    ])
}

// Other

pub fn stiftung() -> Company {
    Company::new(
        "stiftung",
        "Rechtsfähige Stiftung des privaten/bürgerlichen Rechts",
        "Legal Foundation of Private/Civil Law",
    )
    .with_abbreviation("Stiftung")
    .with_reason("Foundation purpose")
    .with_tidbit("The foundation capital was designated by the founder for a specific purpose. A foundation has no shareholders.")
    .with_structure(structure![
        Layer::management(ManagementType::Board).with_unlimited_liability(),
        Layer::capital(CapitalType::FoundationCapital),
    ])
}

pub fn verein() -> Company {
    Company::new("verein", "Nicht eingetragener Verein", "Unregistered Club")
        .with_abbreviation("Verein")
        .with_reason("Club purpose (not economic)")
        .with_structure(structure![
            Layer::management(ManagementType::Board),
            Layer::shareholder_min(ShareholderType::ClubMember, None, 2).with_unlimited_liability(),
            Layer::capital(CapitalType::ClubCapital),
        ])
}

pub fn ev() -> Company {
    Company::new("ev", "Eingetragener Verein", "Registered Club")
        .with_abbreviation("e. V.")
        .with_reason("Club purpose (not economic)")
        .with_structure(structure![
            Layer::management(ManagementType::Board),
            Layer::shareholder_min(ShareholderType::ClubMember, None, 7).with_limited_liability(),
            Layer::capital(CapitalType::ClubCapital),
        ])
}

pub fn wv() -> Company {
    Company::new("wv", "Wirtschaftlicher Verein", "Economic Club")
        .with_abbreviation("w. V.")
        .with_reason("Club purpose (economic)")
        .with_structure(structure![
            Layer::management(ManagementType::Board),
            Layer::shareholder_min(ShareholderType::ClubMember, None, 7).with_limited_liability(),
            Layer::capital(CapitalType::ClubCapital),
        ])
}

pub fn vvag() -> Company {
    Company::new("vvag", "Versicherungsverein auf Gegenseitigkeit", "Mutual Insurance Association")
        .with_abbreviation("VVaG")
        .with_reason("Insurance")
        .with_structure(structure![
            row![
                Layer::supervisory_board(),
                Layer::management_min(ManagementType::Board, 2),
            ],
            Layer::shareholder(ShareholderType::Policyholder).with_limited_liability(),
            Layer::capital(CapitalType::ClubCapital),
        ])
}

// Mixed forms

pub fn ag_co_ohg() -> Company {
    Company::new(
        "ag-co-ohg",
        "Aktiengesellschaft & Co. Offene Handelsgesellschaft",
        "Joint-Stock Company & Co. General Partnership",
    )
    .with_abbreviation("AG & Co. OHG")
    .with_reason("Trade")
    .with_structure(structure![
        Layer::inserted_min(ag(), CompanyRole::Management, 2).with_unlimited_liability(),
        Layer::capital(CapitalType::PrivateAssets),
    ])
}

/// `<general partner> & Co. KG` with natural persons as limited partners.
fn limited_partnership_with(
    key: &str,
    german_name: &str,
    translation: &str,
    abbreviation: &str,
    general_partner: Company,
) -> Company {
    Company::new(key, german_name, translation)
        .with_abbreviation(abbreviation)
        .with_structure(structure![
            row![
                Layer::inserted(general_partner, CompanyRole::Management).with_unlimited_liability(),
                Layer::shareholder_min(ShareholderType::LimitedPartner, None, 1)
                    .with_limited_liability(),
            ],
            Layer::capital(CapitalType::Capital),
        ])
}

pub fn gmbh_co_kg() -> Company {
    limited_partnership_with(
        "gmbh-co-kg",
        "Gesellschaft mit beschränkter Haftung & Co. Kommanditgesellschaft",
        "Limited Liability Partnership & Co. Limited Partnership",
        "GmbH & Co. KG",
        gmbh(),
    )
}

pub fn eg_co_kg() -> Company {
    limited_partnership_with(
        "eg-co-kg",
        "Eingetragene Genossenschaft & Co. Kommanditgesellschaft",
        "Registered Cooperative & Co. Limited Partnership",
        "e. G. & Co. KG",
        eg(),
    )
}

pub fn kgaa_co_kg() -> Company {
    limited_partnership_with(
        "kgaa-co-kg",
        "Kommanditgesellschaft auf Aktien & Co. Kommanditgesellschaft",
        "Limited Partnership on Stocks & Co. Limited Partnership",
        "KGaA & Co. KG",
        kgaa(),
    )
}

pub fn stiftung_gmbh_co_kg() -> Company {
    Company::new(
        "stiftung-gmbh-co-kg",
        "Stiftung, Gesellschaft mit beschränkter Haftung & Co. Kommanditgesellschaft",
        "Foundation, Limited Liability Partnership & Co. Limited Partnership",
    )
    .with_abbreviation("Stiftung GmbH & Co. KG")
    .with_structure(structure![
        row![
            Layer::inserted(gmbh(), CompanyRole::Management).with_unlimited_liability(),
            Layer::inserted(stiftung(), CompanyRole::Shareholder).with_limited_liability(),
        ],
        Layer::capital(CapitalType::Capital),
    ])
}

/// `<general partner> & Co. KGaA` with supervisory board and stocks.
fn kgaa_with(
    key: &str,
    german_name: &str,
    translation: &str,
    abbreviation: &str,
    general_partner: Company,
) -> Company {
    Company::new(key, german_name, translation)
        .with_abbreviation(abbreviation)
        .with_structure(structure![
            Layer::supervisory_board(),
            row![
                Layer::inserted(general_partner, CompanyRole::Management).with_unlimited_liability(),
                Layer::shareholder_min(ShareholderType::LimitedPartner, None, 1)
                    .with_limited_liability(),
            ],
            row![
                Layer::capital(CapitalType::PrivateDeposits),
                Layer::stocks_min(50_000),
            ],
        ])
}

pub fn se_co_kgaa() -> Company {
    kgaa_with(
        "se-co-kgaa",
        "Societas Europaea & Co. Kommanditgesellschaft auf Aktien",
        "Societas Europaea & Co. Limited Partnership on Stocks",
        "SE & Co. KGaA",
        se(),
    )
}

pub fn gmbh_co_kg_co_kgaa() -> Company {
    kgaa_with(
        "gmbh-co-kg-co-kgaa",
        "(Gesellschaft mit beschränkter Haftung & Co. Kommanditgesellschaft) & Co. Kommanditgesellschaft auf Aktien",
        "(Limited Liability Partnership & Co. Limited Partnership) & Co. Limited Partnership on Stocks",
        "(GmbH & Co. KG) & Co. KGaA",
        gmbh_co_kg(),
    )
}
