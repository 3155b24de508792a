//! Liability attached to a structural layer.

use serde::{Deserialize, Serialize};

use super::layer::Layer;

/// How a layer is liable for the obligations of the company.
///
/// `None` means the layer carries no liability semantics at all and the graphic
/// renders no marker for it. `Unlimited` renders a filled marker, `Limited` an
/// unfilled one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Liability {
    /// Liable with the deposited capital and private assets.
    Unlimited,
    /// Liable only with the deposited capital.
    Limited,
    /// No liability information.
    #[default]
    None,
}

impl Liability {
    /// Whether the layer shows a liability marker.
    pub fn is_present(self) -> bool {
        !matches!(self, Liability::None)
    }

    /// Title shown next to the marker, if any.
    pub fn title(self) -> Option<&'static str> {
        match self {
            Liability::Unlimited => Some("Unlimited Liability"),
            Liability::Limited => Some("Limited Liability"),
            Liability::None => None,
        }
    }

    /// Explanation of the liability regime, if any.
    pub fn explanation(self) -> Option<&'static str> {
        match self {
            Liability::Unlimited => Some(
                "The shareholder is liable with the capital they put in the company and their private assets.",
            ),
            Liability::Limited => {
                Some("The shareholder is only liable with the capital they put in the company.")
            }
            Liability::None => None,
        }
    }
}

impl Layer {
    /// The layer has unlimited liability.
    pub fn with_unlimited_liability(self) -> Self {
        self.with_liability(Liability::Unlimited)
    }

    /// The layer has limited liability.
    pub fn with_limited_liability(self) -> Self {
        self.with_liability(Liability::Limited)
    }

    /// Replace the liability, leaving every other field untouched.
    ///
    /// Prefer the two named setters for hand-written structures; this one is
    /// meant for structures derived programmatically.
    pub fn with_liability(mut self, liability: Liability) -> Self {
        self.liability = liability;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Layer, ShareholderType};

    #[test]
    fn fresh_layers_have_no_liability() {
        let layer = Layer::shareholder(ShareholderType::Shareholder);
        assert_eq!(layer.liability, Liability::None);
        assert!(!layer.liability.is_present());
    }

    #[test]
    fn last_setter_wins() {
        let original = Layer::shareholder_min(ShareholderType::LimitedPartner, None, 1);
        let changed = original
            .clone()
            .with_limited_liability()
            .with_unlimited_liability();

        assert_eq!(changed.liability, Liability::Unlimited);
        assert_eq!(changed.id, original.id);
        assert_eq!(changed.label, original.label);
        assert_eq!(changed.kind, original.kind);
        assert_eq!(changed.with_liability(Liability::None), original);
    }

    #[test]
    fn serializes_as_snake_case() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_value(Liability::Unlimited)?, "unlimited");
        assert_eq!(serde_json::to_value(Liability::None)?, "none");
        let parsed: Liability = serde_json::from_str("\"limited\"")?;
        assert_eq!(parsed, Liability::Limited);
        Ok(())
    }

    #[test]
    fn only_present_liability_is_described() {
        assert_eq!(Liability::Limited.title(), Some("Limited Liability"));
        assert!(Liability::Unlimited
            .explanation()
            .is_some_and(|text| text.contains("private assets")));
        assert_eq!(Liability::None.title(), None);
        assert_eq!(Liability::None.explanation(), None);
    }
}
