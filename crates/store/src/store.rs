use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use stockroom_auth::{PasswordHash, Role, UserRecord};
use stockroom_catalog::{ItemFilter, ItemPatch, StockItem, Supplier, SupplierPatch};
use stockroom_core::{AuthError, DomainError, DomainResult, ItemId, OrderId, SupplierId, UserId};
use stockroom_ledger::{OrderStatus, PurchaseOrder};

use crate::audit::AuditEntry;

/// Default low-stock threshold, matching the reorder report's convention.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: HashMap<UserId, UserRecord>,
    pub(crate) items: HashMap<ItemId, StockItem>,
    pub(crate) suppliers: HashMap<SupplierId, Supplier>,
    pub(crate) orders: HashMap<OrderId, PurchaseOrder>,
    pub(crate) audit: Vec<AuditEntry>,
}

/// Embedded backing store.
///
/// One `RwLock` guards all tables. Every mutating operation takes the write
/// lock once and performs its checks and writes inside that critical
/// section, so each logical operation is atomic and isolated; there are no
/// long-lived locks and no background work. A poisoned lock surfaces as
/// [`DomainError::Unavailable`], the transient class.
#[derive(Debug, Default)]
pub struct Store {
    pub(crate) tables: RwLock<Tables>,
}

/// Aggregate counts for the overview report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_items: usize,
    pub low_stock_items: usize,
    pub pending_orders: usize,
    pub total_inventory_value: f64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> DomainResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| DomainError::unavailable("lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| DomainError::unavailable("lock poisoned"))
    }

    // ── users ────────────────────────────────────────────────────────────

    pub fn insert_user(&self, user: UserRecord) -> DomainResult<UserId> {
        let mut t = self.write()?;
        if t.users.values().any(|u| u.username == user.username) {
            return Err(AuthError::DuplicateUsername.into());
        }
        let id = user.id;
        t.users.insert(id, user);
        Ok(id)
    }

    pub fn user(&self, id: UserId) -> DomainResult<UserRecord> {
        self.read()?
            .users
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    pub fn user_by_username(&self, username: &str) -> DomainResult<Option<UserRecord>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    pub fn users(&self) -> DomainResult<Vec<UserRecord>> {
        let t = self.read()?;
        let mut users: Vec<_> = t.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    pub fn user_count(&self) -> DomainResult<usize> {
        Ok(self.read()?.users.len())
    }

    pub fn set_password_hash(&self, id: UserId, hash: PasswordHash) -> DomainResult<()> {
        let mut t = self.write()?;
        let user = t.users.get_mut(&id).ok_or(DomainError::NotFound)?;
        user.password_hash = hash;
        Ok(())
    }

    /// Change a user's role.
    ///
    /// At least one admin must remain; demoting the only admin is a conflict.
    pub fn set_role(&self, id: UserId, role: Role) -> DomainResult<()> {
        let mut t = self.write()?;
        let admins = t.users.values().filter(|u| u.role.is_admin()).count();
        let user = t.users.get_mut(&id).ok_or(DomainError::NotFound)?;
        if user.role.is_admin() && !role.is_admin() && admins <= 1 {
            return Err(DomainError::conflict("cannot demote the only admin"));
        }
        user.role = role;
        Ok(())
    }

    // ── stock items ──────────────────────────────────────────────────────

    pub fn add_item(&self, item: StockItem) -> DomainResult<ItemId> {
        let mut t = self.write()?;
        let id = item.id;
        t.items.insert(id, item);
        Ok(id)
    }

    pub fn item(&self, id: ItemId) -> DomainResult<StockItem> {
        self.read()?
            .items
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    pub fn update_item(&self, id: ItemId, patch: ItemPatch) -> DomainResult<()> {
        let mut t = self.write()?;
        let item = t.items.get_mut(&id).ok_or(DomainError::NotFound)?;
        item.apply(patch)
    }

    /// Adjust an item's quantity by a signed delta; returns the new quantity.
    pub fn adjust_item_quantity(&self, id: ItemId, delta: i64) -> DomainResult<i64> {
        let mut t = self.write()?;
        let item = t.items.get_mut(&id).ok_or(DomainError::NotFound)?;
        item.adjust_quantity(delta)?;
        Ok(item.quantity)
    }

    /// Delete an item.
    ///
    /// Restrict-on-delete: fails while any purchase order with status other
    /// than cancelled still references the item.
    pub fn delete_item(&self, id: ItemId) -> DomainResult<()> {
        let mut t = self.write()?;
        if !t.items.contains_key(&id) {
            return Err(DomainError::NotFound);
        }
        if t.orders
            .values()
            .any(|o| o.item_id == id && o.restricts_references())
        {
            return Err(DomainError::conflict(
                "item is referenced by a non-cancelled purchase order",
            ));
        }
        t.items.remove(&id);
        Ok(())
    }

    /// List items matching `filter`, name-sorted.
    ///
    /// Each call re-runs the scan over current state; the result is a finite
    /// snapshot, not a live cursor.
    pub fn list_items(&self, filter: &ItemFilter) -> DomainResult<Vec<StockItem>> {
        let t = self.read()?;
        let mut items: Vec<_> = t
            .items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    /// Items whose quantity is strictly below `threshold`.
    pub fn low_stock(&self, threshold: i64) -> DomainResult<Vec<StockItem>> {
        let t = self.read()?;
        let mut items: Vec<_> = t
            .items
            .values()
            .filter(|item| item.quantity < threshold)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    // ── suppliers ────────────────────────────────────────────────────────

    pub fn add_supplier(&self, supplier: Supplier) -> DomainResult<SupplierId> {
        let mut t = self.write()?;
        let id = supplier.id;
        t.suppliers.insert(id, supplier);
        Ok(id)
    }

    pub fn supplier(&self, id: SupplierId) -> DomainResult<Supplier> {
        self.read()?
            .suppliers
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    pub fn update_supplier(&self, id: SupplierId, patch: SupplierPatch) -> DomainResult<()> {
        let mut t = self.write()?;
        let supplier = t.suppliers.get_mut(&id).ok_or(DomainError::NotFound)?;
        supplier.apply(patch)
    }

    /// Delete a supplier. Restricted exactly like item deletion.
    pub fn delete_supplier(&self, id: SupplierId) -> DomainResult<()> {
        let mut t = self.write()?;
        if !t.suppliers.contains_key(&id) {
            return Err(DomainError::NotFound);
        }
        if t.orders
            .values()
            .any(|o| o.supplier_id == id && o.restricts_references())
        {
            return Err(DomainError::conflict(
                "supplier is referenced by a non-cancelled purchase order",
            ));
        }
        t.suppliers.remove(&id);
        Ok(())
    }

    pub fn list_suppliers(&self) -> DomainResult<Vec<Supplier>> {
        let t = self.read()?;
        let mut suppliers: Vec<_> = t.suppliers.values().cloned().collect();
        suppliers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(suppliers)
    }

    // ── purchase orders ──────────────────────────────────────────────────

    /// Create a pending order. Supplier and item existence are checked in
    /// the same critical section that inserts the order.
    pub fn create_order(
        &self,
        supplier_id: SupplierId,
        item_id: ItemId,
        quantity: i64,
    ) -> DomainResult<OrderId> {
        let order = PurchaseOrder::new(supplier_id, item_id, quantity)?;
        let mut t = self.write()?;
        if !t.suppliers.contains_key(&supplier_id) {
            return Err(DomainError::NotFound);
        }
        if !t.items.contains_key(&item_id) {
            return Err(DomainError::NotFound);
        }
        let id = order.id;
        t.orders.insert(id, order);
        Ok(id)
    }

    pub fn order(&self, id: OrderId) -> DomainResult<PurchaseOrder> {
        self.read()?
            .orders
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    pub fn list_orders(&self, status: Option<OrderStatus>) -> DomainResult<Vec<PurchaseOrder>> {
        let t = self.read()?;
        let mut orders: Vec<_> = t
            .orders
            .values()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    /// Transition an order's status.
    ///
    /// Receiving an order also increments the referenced item's quantity by
    /// the order quantity. The transition is staged on a copy and validated
    /// end to end before either table is written, so both halves land or
    /// neither does.
    pub fn update_order_status(&self, id: OrderId, next: OrderStatus) -> DomainResult<()> {
        let mut t = self.write()?;
        let mut staged = t.orders.get(&id).ok_or(DomainError::NotFound)?.clone();
        staged.transition(next)?;

        if next == OrderStatus::Received {
            let item = t
                .items
                .get_mut(&staged.item_id)
                .ok_or(DomainError::NotFound)?;
            item.adjust_quantity(staged.quantity)?;
        }

        t.orders.insert(id, staged);
        Ok(())
    }

    // ── audit & reports ──────────────────────────────────────────────────

    pub fn record_audit(&self, actor: &str, action: impl Into<String>) -> DomainResult<()> {
        let mut t = self.write()?;
        t.audit.push(AuditEntry::new(actor, action));
        Ok(())
    }

    pub fn audit_entries(&self) -> DomainResult<Vec<AuditEntry>> {
        Ok(self.read()?.audit.clone())
    }

    pub fn dashboard(&self, low_stock_threshold: i64) -> DomainResult<DashboardSummary> {
        let t = self.read()?;
        Ok(DashboardSummary {
            total_items: t.items.len(),
            low_stock_items: t
                .items
                .values()
                .filter(|i| i.quantity < low_stock_threshold)
                .count(),
            pending_orders: t
                .orders
                .values()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            total_inventory_value: t.items.values().map(|i| i.value()).sum(),
        })
    }
}
