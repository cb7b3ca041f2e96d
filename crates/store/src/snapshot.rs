//! Whole-store snapshots for embedded persistence.
//!
//! A snapshot is a serde view of every table. Writing it to disk (JSON) is
//! the persistence story of this store; when and where the file lives is the
//! embedding application's concern.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use stockroom_auth::UserRecord;
use stockroom_catalog::{StockItem, Supplier};
use stockroom_core::DomainResult;
use stockroom_ledger::PurchaseOrder;

use crate::audit::AuditEntry;
use crate::store::{Store, Tables};

/// Serializable view of every table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<UserRecord>,
    pub items: Vec<StockItem>,
    pub suppliers: Vec<Supplier>,
    pub orders: Vec<PurchaseOrder>,
    pub audit: Vec<AuditEntry>,
}

impl Store {
    /// Capture the current contents of all tables.
    pub fn snapshot(&self) -> DomainResult<Snapshot> {
        let t = self.read()?;

        let mut snapshot = Snapshot {
            users: t.users.values().cloned().collect(),
            items: t.items.values().cloned().collect(),
            suppliers: t.suppliers.values().cloned().collect(),
            orders: t.orders.values().cloned().collect(),
            audit: t.audit.clone(),
        };
        // Deterministic output regardless of map iteration order.
        snapshot.users.sort_by(|a, b| a.username.cmp(&b.username));
        snapshot.items.sort_by(|a, b| a.id.as_uuid().cmp(b.id.as_uuid()));
        snapshot
            .suppliers
            .sort_by(|a, b| a.id.as_uuid().cmp(b.id.as_uuid()));
        snapshot.orders.sort_by_key(|o| o.created_at);
        Ok(snapshot)
    }

    /// Rebuild a store from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let tables = Tables {
            users: snapshot.users.into_iter().map(|u| (u.id, u)).collect(),
            items: snapshot.items.into_iter().map(|i| (i.id, i)).collect(),
            suppliers: snapshot
                .suppliers
                .into_iter()
                .map(|s| (s.id, s))
                .collect::<HashMap<_, _>>(),
            orders: snapshot.orders.into_iter().map(|o| (o.id, o)).collect(),
            audit: snapshot.audit,
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Serialize the current snapshot to a JSON file.
    pub fn save_to_path(&self, path: &Path) -> anyhow::Result<()> {
        let snapshot = self.snapshot()?;
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json).with_context(|| format!("writing snapshot to {}", path.display()))?;
        Ok(())
    }

    /// Load a store from a JSON snapshot file.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading snapshot from {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&json)?;
        Ok(Self::from_snapshot(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_auth::{PasswordHasher, Role, Sha256PasswordHasher};
    use stockroom_catalog::{ContactInfo, NewItem, NewSupplier};

    fn populated_store() -> Store {
        let store = Store::new();
        store
            .insert_user(
                UserRecord::new("root", Sha256PasswordHasher.hash("pw1"), Role::Admin).unwrap(),
            )
            .unwrap();
        let item_id = store
            .add_item(
                StockItem::new(NewItem {
                    name: "Widget".to_string(),
                    quantity: 10,
                    unit_price: 1.5,
                    location: "warehouse".to_string(),
                    expiry_date: None,
                })
                .unwrap(),
            )
            .unwrap();
        let supplier_id = store
            .add_supplier(
                Supplier::new(NewSupplier {
                    name: "Acme".to_string(),
                    contact: ContactInfo::default(),
                })
                .unwrap(),
            )
            .unwrap();
        store.create_order(supplier_id, item_id, 3).unwrap();
        store.record_audit("root", "seeded store").unwrap();
        store
    }

    #[test]
    fn snapshot_round_trip_preserves_all_tables() {
        let store = populated_store();
        let snapshot = store.snapshot().unwrap();

        let restored = Store::from_snapshot(snapshot.clone());
        assert_eq!(restored.snapshot().unwrap(), snapshot);
    }

    #[test]
    fn json_round_trip_preserves_snapshot() {
        let snapshot = populated_store().snapshot().unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
