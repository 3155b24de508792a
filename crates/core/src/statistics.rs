//! Prevalence of company forms in Germany.

use serde::Serialize;

/// One bar of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Share {
    pub label: &'static str,
    /// Share in percent (0–100).
    pub percent: f64,
}

/// A static dataset with its source attribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub title: &'static str,
    pub source: &'static str,
    pub note: Option<&'static str>,
    pub shares: Vec<Share>,
}

impl Dataset {
    /// Shares ordered from largest to smallest.
    pub fn sorted(&self) -> Vec<Share> {
        let mut shares = self.shares.clone();
        shares.sort_by(|a, b| b.percent.total_cmp(&a.percent));
        shares
    }

    pub fn largest(&self) -> Option<Share> {
        self.sorted().first().copied()
    }
}

const fn share(label: &'static str, percent: f64) -> Share {
    Share { label, percent }
}

/// Share of company types among all companies.
pub fn company_types() -> Dataset {
    Dataset {
        title: "Company Types",
        source: "Statistisches Bundesamt (as of 2021)",
        note: None,
        shares: vec![
            share("Sole Proprietor", 59.2),
            share("Corporations", 23.2),
            share("Partnerships", 12.1),
            share("Other", 5.4),
        ],
    }
}

/// Share of legal forms among companies in the trade register.
pub fn trade_register() -> Dataset {
    Dataset {
        title: "Companies in the Trade Register",
        source: "Listflix (as of 2023)",
        note: Some("* Körperschaft des öffentlichen Rechts (Corporation of Public Law)"),
        shares: vec![
            share("GmbH", 79.0),
            share("UG (haftungsbeschränkt)", 9.5),
            share("e. K.", 6.4),
            share("KG", 1.5),
            share("PartG", 1.1),
            share("OHG", 1.1),
            share("AG, SE, KGaA", 0.9),
            share("e. G.", 0.5),
            share("Foundation", 0.05),
            share("EWIV", 0.02),
            share("KöR*", 0.02),
        ],
    }
}

pub fn datasets() -> Vec<Dataset> {
    vec![company_types(), trade_register()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_is_descending_and_stable_for_ties() {
        let sorted = trade_register().sorted();
        assert!(sorted.windows(2).all(|pair| pair[0].percent >= pair[1].percent));
        let labels: Vec<_> = sorted.iter().map(|share| share.label).collect();
        assert_eq!(labels[0], "GmbH");
        assert_eq!(labels[4..6], ["PartG", "OHG"]);
        assert_eq!(labels[9..], ["EWIV", "KöR*"]);
    }

    #[test]
    fn company_types_cover_everything() {
        let dataset = company_types();
        let total: f64 = dataset.shares.iter().map(|share| share.percent).sum();
        assert!((total - 99.9).abs() < 1e-9);
        assert_eq!(dataset.largest().map(|share| share.label), Some("Sole Proprietor"));
        assert_eq!(datasets().len(), 2);
    }
}
