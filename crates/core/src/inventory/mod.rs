//! Inventory items and stock movements.
//!
//! A movement and the quantity change it causes form one logical operation.
//! [`InventoryService::prepare_movement`] validates a request and produces a
//! single [`ApplyMovement`] command; the persistence layer applies it
//! atomically with [`ApplyMovement::apply_to`].

mod error;

use std::fmt;

use chrono::{DateTime, Utc};
use ledgerline_shared::types::{InventoryItemId, MovementId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use error::InventoryError;

/// Kind of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Stock received.
    In,
    /// Stock issued.
    Out,
    /// Signed correction.
    Adjustment,
}

impl MovementType {
    /// Lowercase name as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Adjustment => "adjustment",
        }
    }

    /// Quantity change for a movement of this type.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::NonPositiveQuantity` for a non-positive
    /// `in`/`out` quantity and `InventoryError::ZeroAdjustment` for a zero
    /// adjustment.
    pub fn signed_delta(self, quantity: Decimal) -> Result<Decimal, InventoryError> {
        match self {
            Self::In | Self::Out if quantity <= Decimal::ZERO => {
                Err(InventoryError::NonPositiveQuantity {
                    movement_type: self,
                    quantity,
                })
            }
            Self::In => Ok(quantity),
            Self::Out => Ok(-quantity),
            Self::Adjustment if quantity.is_zero() => Err(InventoryError::ZeroAdjustment),
            Self::Adjustment => Ok(quantity),
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stock-keeping item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Item ID.
    pub id: InventoryItemId,
    /// Item name.
    pub name: String,
    /// Stock-keeping unit code.
    #[serde(default)]
    pub sku: Option<String>,
    /// Item category.
    #[serde(default)]
    pub category: Option<String>,
    /// Quantity on hand.
    #[serde(default)]
    pub quantity: Decimal,
    /// When the quantity last changed.
    pub last_updated: DateTime<Utc>,
}

impl InventoryItem {
    /// Creates an item with the given quantity on hand.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            id: InventoryItemId::new(),
            name: name.into(),
            sku: None,
            category: None,
            quantity,
            last_updated: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// A recorded stock movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryMovement {
    /// Movement ID.
    pub id: MovementId,
    /// Item moved.
    pub item_id: InventoryItemId,
    /// In, out or adjustment.
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    /// Quantity as entered.
    pub quantity: Decimal,
    /// Free-text reference (delivery note, count sheet).
    #[serde(default)]
    pub reference: Option<String>,
    /// When the movement was recorded.
    pub created_at: DateTime<Utc>,
}

/// A request to record a stock movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRequest {
    /// Item to move.
    pub item_id: InventoryItemId,
    /// In, out or adjustment.
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    /// Quantity as entered.
    pub quantity: Decimal,
    /// Free-text reference.
    #[serde(default)]
    pub reference: Option<String>,
}

/// "Insert movement + adjust quantity" as one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyMovement {
    /// Movement to insert.
    pub movement: InventoryMovement,
    /// Signed change to the item's quantity.
    pub delta: Decimal,
}

impl ApplyMovement {
    /// The item after the movement.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::ItemNotFound` if `item` is not the movement's target.
    pub fn apply_to(&self, item: &InventoryItem) -> Result<InventoryItem, InventoryError> {
        if item.id != self.movement.item_id {
            return Err(InventoryError::ItemNotFound(self.movement.item_id));
        }
        Ok(InventoryItem {
            quantity: item.quantity + self.delta,
            last_updated: self.movement.created_at,
            ..item.clone()
        })
    }
}

/// Stock movement preparation.
pub struct InventoryService;

impl InventoryService {
    /// Validates a request and builds the command that records it.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError` if the quantity is invalid for the movement type.
    pub fn prepare_movement(
        request: MovementRequest,
        now: DateTime<Utc>,
    ) -> Result<ApplyMovement, InventoryError> {
        let delta = request.movement_type.signed_delta(request.quantity)?;
        Ok(ApplyMovement {
            movement: InventoryMovement {
                id: MovementId::new(),
                item_id: request.item_id,
                movement_type: request.movement_type,
                quantity: request.quantity,
                reference: request.reference,
                created_at: now,
            },
            delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn request(item: InventoryItemId, movement_type: MovementType, quantity: Decimal) -> MovementRequest {
        MovementRequest {
            item_id: item,
            movement_type,
            quantity,
            reference: None,
        }
    }

    #[rstest]
    #[case(MovementType::In, dec!(5), dec!(5))]
    #[case(MovementType::Out, dec!(5), dec!(-5))]
    #[case(MovementType::Adjustment, dec!(-3), dec!(-3))]
    #[case(MovementType::Adjustment, dec!(2.5), dec!(2.5))]
    fn test_signed_delta(#[case] kind: MovementType, #[case] qty: Decimal, #[case] expected: Decimal) {
        assert_eq!(kind.signed_delta(qty).unwrap(), expected);
    }

    #[rstest]
    #[case(MovementType::In, dec!(0))]
    #[case(MovementType::In, dec!(-1))]
    #[case(MovementType::Out, dec!(0))]
    #[case(MovementType::Out, dec!(-4))]
    fn test_in_out_need_positive_quantity(#[case] kind: MovementType, #[case] qty: Decimal) {
        assert_eq!(
            kind.signed_delta(qty),
            Err(InventoryError::NonPositiveQuantity {
                movement_type: kind,
                quantity: qty
            })
        );
    }

    #[test]
    fn test_zero_adjustment_is_rejected() {
        assert_eq!(
            MovementType::Adjustment.signed_delta(Decimal::ZERO),
            Err(InventoryError::ZeroAdjustment)
        );
    }

    #[test]
    fn test_prepare_and_apply() {
        let item = InventoryItem::new("Widget", dec!(10));
        let now = Utc::now();

        let cmd = InventoryService::prepare_movement(request(item.id, MovementType::Out, dec!(4)), now)
            .unwrap();
        let updated = cmd.apply_to(&item).unwrap();

        assert_eq!(cmd.movement.quantity, dec!(4));
        assert_eq!(cmd.delta, dec!(-4));
        assert_eq!(updated.quantity, dec!(6));
        assert_eq!(updated.last_updated, now);
        assert_eq!(updated.name, "Widget");
    }

    #[test]
    fn test_apply_to_wrong_item() {
        let item = InventoryItem::new("Widget", dec!(10));
        let other = InventoryItemId::new();
        let cmd = InventoryService::prepare_movement(request(other, MovementType::In, dec!(1)), Utc::now())
            .unwrap();

        assert_eq!(cmd.apply_to(&item), Err(InventoryError::ItemNotFound(other)));
    }

    #[test]
    fn test_movement_type_serde() {
        let json = r#"{"item_id":"0190c6a0-0000-7000-8000-000000000009","type":"adjustment","quantity":"-2"}"#;
        let req: MovementRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.movement_type, MovementType::Adjustment);
        assert_eq!(req.quantity, dec!(-2));
        assert!(req.reference.is_none());
    }
}
