use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemId, OrderId, SupplierId};

/// Purchase order status lifecycle.
///
/// Legal transitions are pending→received and pending→cancelled; received
/// and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Received,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Received | OrderStatus::Cancelled)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OrderStatus::Pending => f.write_str("pending"),
            OrderStatus::Received => f.write_str("received"),
            OrderStatus::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// A purchase order referencing a supplier and a stock item by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: OrderId,
    pub supplier_id: SupplierId,
    pub item_id: ItemId,
    pub quantity: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl PurchaseOrder {
    pub fn new(supplier_id: SupplierId, item_id: ItemId, quantity: i64) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation("order quantity must be positive"));
        }
        Ok(Self {
            id: OrderId::new(),
            supplier_id,
            item_id,
            quantity,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Whether this order still blocks deletion of the records it references.
    ///
    /// Only cancelled orders release their references.
    pub fn restricts_references(&self) -> bool {
        self.status != OrderStatus::Cancelled
    }

    /// Move the order to `next`.
    ///
    /// Terminal states are immutable; everything except pending→received and
    /// pending→cancelled is a conflict.
    pub fn transition(&mut self, next: OrderStatus) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::conflict(format!(
                "order is {} and cannot change status",
                self.status
            )));
        }
        match (self.status, next) {
            (OrderStatus::Pending, OrderStatus::Received)
            | (OrderStatus::Pending, OrderStatus::Cancelled) => {
                self.status = next;
                Ok(())
            }
            (from, to) => Err(DomainError::conflict(format!(
                "illegal status transition {from} -> {to}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_order() -> PurchaseOrder {
        PurchaseOrder::new(SupplierId::new(), ItemId::new(), 5).unwrap()
    }

    #[test]
    fn zero_or_negative_quantity_is_rejected() {
        assert!(PurchaseOrder::new(SupplierId::new(), ItemId::new(), 0).is_err());
        assert!(PurchaseOrder::new(SupplierId::new(), ItemId::new(), -3).is_err());
    }

    #[test]
    fn pending_can_be_received_or_cancelled() {
        let mut order = pending_order();
        order.transition(OrderStatus::Received).unwrap();
        assert_eq!(order.status, OrderStatus::Received);

        let mut order = pending_order();
        order.transition(OrderStatus::Cancelled).unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[test]
    fn terminal_states_are_immutable() {
        let mut order = pending_order();
        order.transition(OrderStatus::Received).unwrap();

        for next in [
            OrderStatus::Pending,
            OrderStatus::Received,
            OrderStatus::Cancelled,
        ] {
            let err = order.transition(next).unwrap_err();
            assert!(matches!(err, DomainError::Conflict(_)), "allowed {next}");
        }
        assert_eq!(order.status, OrderStatus::Received);
    }

    #[test]
    fn pending_to_pending_is_a_conflict() {
        let mut order = pending_order();
        let err = order.transition(OrderStatus::Pending).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn cancelled_orders_release_references() {
        let mut order = pending_order();
        assert!(order.restricts_references());

        order.transition(OrderStatus::Cancelled).unwrap();
        assert!(!order.restricts_references());
    }

    #[test]
    fn received_orders_still_restrict_references() {
        let mut order = pending_order();
        order.transition(OrderStatus::Received).unwrap();
        assert!(order.restricts_references());
    }
}
