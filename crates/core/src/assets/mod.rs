//! Fixed asset register.

use chrono::{DateTime, Utc};
use ledgerline_shared::types::AssetId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status value of assets still in service.
pub const ACTIVE_STATUS: &str = "Active";

/// A fixed asset register entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAsset {
    /// Asset ID.
    pub id: AssetId,
    /// Asset name.
    pub name: String,
    /// Asset category (e.g. "Vehicles").
    #[serde(default)]
    pub category: Option<String>,
    /// Register status (e.g. "Active", "Disposed").
    pub status: String,
    /// Original cost.
    pub purchase_price: Decimal,
    /// Carrying value.
    pub current_value: Decimal,
    /// When the asset was registered.
    pub created_at: DateTime<Utc>,
}

impl FixedAsset {
    /// Creates an active asset.
    #[must_use]
    pub fn new(name: impl Into<String>, purchase_price: Decimal, current_value: Decimal) -> Self {
        Self {
            id: AssetId::new(),
            name: name.into(),
            category: None,
            status: ACTIVE_STATUS.to_string(),
            purchase_price,
            current_value,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Returns true if the asset is still in service.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case(ACTIVE_STATUS)
    }

    /// Accumulated depreciation: `purchase_price - current_value`, floored at zero.
    #[must_use]
    pub fn depreciation(&self) -> Decimal {
        (self.purchase_price - self.current_value).max(Decimal::ZERO)
    }
}

/// Aggregate carrying value and depreciation of a set of assets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAssetTotals {
    /// Sum of carrying values.
    pub current_value: Decimal,
    /// Sum of accumulated depreciation.
    pub depreciation: Decimal,
}

impl FixedAssetTotals {
    /// Totals over the given assets.
    pub fn of<'a>(assets: impl IntoIterator<Item = &'a FixedAsset>) -> Self {
        assets.into_iter().fold(Self::default(), |acc, asset| Self {
            current_value: acc.current_value + asset.current_value,
            depreciation: acc.depreciation + asset.depreciation(),
        })
    }

    /// Gross cost: carrying value plus depreciation.
    #[must_use]
    pub fn gross(&self) -> Decimal {
        self.current_value + self.depreciation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_depreciation_is_never_negative() {
        let depreciated = FixedAsset::new("Van", dec!(20000), dec!(15000));
        let appreciated = FixedAsset::new("Land", dec!(50000), dec!(65000));

        assert_eq!(depreciated.depreciation(), dec!(5000));
        assert_eq!(appreciated.depreciation(), dec!(0));
    }

    #[test]
    fn test_active_status_is_case_insensitive() {
        assert!(FixedAsset::new("Desk", dec!(1), dec!(1)).is_active());
        assert!(FixedAsset::new("Desk", dec!(1), dec!(1)).with_status("active").is_active());
        assert!(!FixedAsset::new("Desk", dec!(1), dec!(1)).with_status("Disposed").is_active());
    }

    #[test]
    fn test_totals() {
        let assets = [
            FixedAsset::new("Van", dec!(20000), dec!(15000)),
            FixedAsset::new("Laptop", dec!(2000), dec!(1200)),
        ];
        let totals = FixedAssetTotals::of(&assets);

        assert_eq!(totals.current_value, dec!(16200));
        assert_eq!(totals.depreciation, dec!(5800));
        assert_eq!(totals.gross(), dec!(22000));
    }
}
