//! Inventory error types.

use ledgerline_shared::AppError;
use ledgerline_shared::types::InventoryItemId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::MovementType;

/// Errors that can occur while preparing or applying a stock movement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// `in`/`out` movements need a strictly positive quantity.
    #[error("{movement_type} movement requires a positive quantity, got {quantity}")]
    NonPositiveQuantity {
        /// Movement type.
        movement_type: MovementType,
        /// Quantity supplied.
        quantity: Decimal,
    },

    /// An adjustment of zero changes nothing.
    #[error("Adjustment quantity must not be zero")]
    ZeroAdjustment,

    /// The movement targets an item that does not exist.
    #[error("Inventory item not found: {0}")]
    ItemNotFound(InventoryItemId),
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NonPositiveQuantity { .. } | InventoryError::ZeroAdjustment => {
                Self::Validation(err.to_string())
            }
            InventoryError::ItemNotFound(_) => Self::NotFound(err.to_string()),
        }
    }
}
