//! `stockroom-ledger` — purchase orders.
//!
//! Append-mostly record of orders and their status lifecycle. Orders hold
//! non-owning references (ids) to suppliers and stock items; referential
//! integrity is enforced by the store at deletion time.

pub mod order;

pub use order::{OrderStatus, PurchaseOrder};
