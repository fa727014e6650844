//! Organization settings.
//!
//! There is exactly one settings record, stored under
//! [`OrganizationSettings::SINGLETON_ID`]. Saves are partial updates merged
//! onto the stored record (or the defaults) and upserted on that id.

mod error;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::SettingsError;

/// The organization's settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSettings {
    /// Always [`OrganizationSettings::SINGLETON_ID`].
    pub id: u32,
    /// Legal or trading name.
    pub company_name: String,
    /// ISO 4217 currency code.
    pub base_currency: String,
    /// Month the fiscal year starts (1 = January).
    pub fiscal_year_start_month: u32,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Tax registration number.
    #[serde(default)]
    pub tax_id: Option<String>,
    /// When the record was last saved.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrganizationSettings {
    /// Well-known identifier of the settings record.
    pub const SINGLETON_ID: u32 = 1;
}

impl Default for OrganizationSettings {
    fn default() -> Self {
        Self {
            id: Self::SINGLETON_ID,
            company_name: "My Company".to_string(),
            base_currency: "USD".to_string(),
            fiscal_year_start_month: 1,
            address: None,
            tax_id: None,
            updated_at: None,
        }
    }
}

/// A partial settings update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsUpdate {
    /// New company name.
    pub company_name: Option<String>,
    /// New base currency.
    pub base_currency: Option<String>,
    /// New fiscal year start month.
    pub fiscal_year_start_month: Option<u32>,
    /// New address.
    pub address: Option<String>,
    /// New tax id.
    pub tax_id: Option<String>,
}

impl SettingsUpdate {
    /// Merges the update onto `current`, producing the record to upsert.
    ///
    /// The result always carries the singleton id.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a supplied value is invalid.
    pub fn merge(
        self,
        current: OrganizationSettings,
        now: DateTime<Utc>,
    ) -> Result<OrganizationSettings, SettingsError> {
        let company_name = match self.company_name {
            Some(name) if name.trim().is_empty() => return Err(SettingsError::EmptyCompanyName),
            Some(name) => name.trim().to_string(),
            None => current.company_name,
        };

        let base_currency = match self.base_currency {
            Some(code) => {
                let code = code.trim().to_uppercase();
                if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(SettingsError::InvalidCurrency(code));
                }
                code
            }
            None => current.base_currency,
        };

        let fiscal_year_start_month = match self.fiscal_year_start_month {
            Some(month) if !(1..=12).contains(&month) => {
                return Err(SettingsError::InvalidFiscalMonth(month));
            }
            Some(month) => month,
            None => current.fiscal_year_start_month,
        };

        Ok(OrganizationSettings {
            id: OrganizationSettings::SINGLETON_ID,
            company_name,
            base_currency,
            fiscal_year_start_month,
            address: self.address.or(current.address),
            tax_id: self.tax_id.or(current.tax_id),
            updated_at: Some(now),
        })
    }
}
