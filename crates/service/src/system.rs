use stockroom_auth::{
    Action, PasswordHasher, Role, Session, Sha256PasswordHasher, UserRecord, authorize,
    verify_password,
};
use stockroom_catalog::{
    ItemFilter, ItemPatch, NewItem, NewSupplier, StockItem, Supplier, SupplierPatch,
};
use stockroom_core::{AuthError, DomainError, DomainResult, ItemId, OrderId, SupplierId, UserId};
use stockroom_ledger::{OrderStatus, PurchaseOrder};
use stockroom_store::{AuditEntry, DashboardSummary, Store};

/// The record-keeping core behind its access gate.
///
/// Every mutating call authorizes the session first; on denial nothing is
/// touched. Successful mutations are appended to the audit log under the
/// session's username.
pub struct StockSystem<H = Sha256PasswordHasher> {
    store: Store,
    hasher: H,
}

impl StockSystem<Sha256PasswordHasher> {
    pub fn new() -> Self {
        Self::with_hasher(Store::new(), Sha256PasswordHasher)
    }
}

impl Default for StockSystem<Sha256PasswordHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: PasswordHasher> StockSystem<H> {
    /// Assemble the system from a store and a hashing capability.
    ///
    /// The hasher is the external one-way primitive; it is never
    /// reimplemented here.
    pub fn with_hasher(store: Store, hasher: H) -> Self {
        Self { store, hasher }
    }

    /// Direct access to the backing store, for snapshot persistence.
    pub fn store(&self) -> &Store {
        &self.store
    }

    // ── credential store ─────────────────────────────────────────────────

    /// Provision the first admin account.
    ///
    /// Only valid while the users table is empty; this seeds the invariant
    /// that at least one admin always exists.
    pub fn bootstrap_admin(&self, username: &str, password: &str) -> DomainResult<UserId> {
        if self.store.user_count()? > 0 {
            return Err(DomainError::conflict("users already provisioned"));
        }
        let user = UserRecord::new(username, self.hasher.hash(password), Role::Admin)?;
        let id = self.store.insert_user(user)?;
        tracing::info!("bootstrapped initial admin '{username}'");
        self.store.record_audit(username, "bootstrapped admin account")?;
        Ok(id)
    }

    /// Verify credentials and issue a session.
    ///
    /// Unknown usernames and wrong passwords return the identical error, and
    /// both paths hash the supplied password, so neither the error nor the
    /// timing leaks which usernames exist.
    pub fn authenticate(&self, username: &str, password: &str) -> DomainResult<Session> {
        let Some(user) = self.store.user_by_username(username)? else {
            let _ = self.hasher.hash(password);
            tracing::warn!("failed login attempt for unknown username");
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(&self.hasher, &user.password_hash, password) {
            tracing::warn!("failed login attempt for '{}'", user.username);
            return Err(AuthError::InvalidCredentials.into());
        }
        Ok(Session::issue(user.id, user.username, user.role))
    }

    pub fn create_user(
        &self,
        session: &Session,
        username: &str,
        password: &str,
        role: Role,
    ) -> DomainResult<UserId> {
        authorize(session, Action::ManageUsers)?;
        let user = UserRecord::new(username, self.hasher.hash(password), role)?;
        let id = self.store.insert_user(user)?;
        tracing::info!("user '{username}' ({role}) created by '{}'", session.username);
        self.store
            .record_audit(&session.username, format!("created user {username} ({role})"))?;
        Ok(id)
    }

    pub fn set_user_password(
        &self,
        session: &Session,
        user_id: UserId,
        new_password: &str,
    ) -> DomainResult<()> {
        authorize(session, Action::ManageUsers)?;
        self.store
            .set_password_hash(user_id, self.hasher.hash(new_password))?;
        self.store
            .record_audit(&session.username, format!("reset password for user {user_id}"))?;
        Ok(())
    }

    pub fn set_user_role(&self, session: &Session, user_id: UserId, role: Role) -> DomainResult<()> {
        authorize(session, Action::ManageUsers)?;
        self.store.set_role(user_id, role)?;
        self.store
            .record_audit(&session.username, format!("set role of user {user_id} to {role}"))?;
        Ok(())
    }

    pub fn users(&self, session: &Session) -> DomainResult<Vec<UserRecord>> {
        authorize(session, Action::ManageUsers)?;
        self.store.users()
    }

    // ── catalog: items ───────────────────────────────────────────────────

    pub fn add_item(&self, session: &Session, new: NewItem) -> DomainResult<ItemId> {
        authorize(session, Action::MutateCatalog)?;
        let item = StockItem::new(new)?;
        let name = item.name.clone();
        let id = self.store.add_item(item)?;
        tracing::info!("item '{name}' added by '{}'", session.username);
        self.store
            .record_audit(&session.username, format!("added item {name}"))?;
        Ok(id)
    }

    pub fn item(&self, session: &Session, id: ItemId) -> DomainResult<StockItem> {
        authorize(session, Action::ReadCatalog)?;
        self.store.item(id)
    }

    pub fn update_item(&self, session: &Session, id: ItemId, patch: ItemPatch) -> DomainResult<()> {
        authorize(session, Action::MutateCatalog)?;
        self.store.update_item(id, patch)?;
        self.store
            .record_audit(&session.username, format!("updated item {id}"))?;
        Ok(())
    }

    /// Signed stock correction (receiving desk, scan-out, recount).
    pub fn adjust_item_quantity(
        &self,
        session: &Session,
        id: ItemId,
        delta: i64,
    ) -> DomainResult<i64> {
        authorize(session, Action::MutateCatalog)?;
        let quantity = self.store.adjust_item_quantity(id, delta)?;
        tracing::info!("item {id} adjusted by {delta} to {quantity}");
        self.store
            .record_audit(&session.username, format!("adjusted item {id} by {delta}"))?;
        Ok(quantity)
    }

    pub fn delete_item(&self, session: &Session, id: ItemId) -> DomainResult<()> {
        authorize(session, Action::DeleteCatalogEntry)?;
        self.store.delete_item(id)?;
        tracing::info!("item {id} deleted by '{}'", session.username);
        self.store
            .record_audit(&session.username, format!("deleted item {id}"))?;
        Ok(())
    }

    pub fn list_items(&self, session: &Session, filter: &ItemFilter) -> DomainResult<Vec<StockItem>> {
        authorize(session, Action::ReadCatalog)?;
        self.store.list_items(filter)
    }

    pub fn low_stock(&self, session: &Session, threshold: i64) -> DomainResult<Vec<StockItem>> {
        authorize(session, Action::ReadCatalog)?;
        self.store.low_stock(threshold)
    }

    // ── catalog: suppliers ───────────────────────────────────────────────

    pub fn add_supplier(&self, session: &Session, new: NewSupplier) -> DomainResult<SupplierId> {
        authorize(session, Action::MutateCatalog)?;
        let supplier = Supplier::new(new)?;
        let name = supplier.name.clone();
        let id = self.store.add_supplier(supplier)?;
        self.store
            .record_audit(&session.username, format!("added supplier {name}"))?;
        Ok(id)
    }

    pub fn supplier(&self, session: &Session, id: SupplierId) -> DomainResult<Supplier> {
        authorize(session, Action::ReadCatalog)?;
        self.store.supplier(id)
    }

    pub fn update_supplier(
        &self,
        session: &Session,
        id: SupplierId,
        patch: SupplierPatch,
    ) -> DomainResult<()> {
        authorize(session, Action::MutateCatalog)?;
        self.store.update_supplier(id, patch)?;
        self.store
            .record_audit(&session.username, format!("updated supplier {id}"))?;
        Ok(())
    }

    pub fn delete_supplier(&self, session: &Session, id: SupplierId) -> DomainResult<()> {
        authorize(session, Action::DeleteCatalogEntry)?;
        self.store.delete_supplier(id)?;
        tracing::info!("supplier {id} deleted by '{}'", session.username);
        self.store
            .record_audit(&session.username, format!("deleted supplier {id}"))?;
        Ok(())
    }

    pub fn list_suppliers(&self, session: &Session) -> DomainResult<Vec<Supplier>> {
        authorize(session, Action::ReadCatalog)?;
        self.store.list_suppliers()
    }

    // ── order ledger ─────────────────────────────────────────────────────

    pub fn create_order(
        &self,
        session: &Session,
        supplier_id: SupplierId,
        item_id: ItemId,
        quantity: i64,
    ) -> DomainResult<OrderId> {
        authorize(session, Action::MutateCatalog)?;
        let id = self.store.create_order(supplier_id, item_id, quantity)?;
        tracing::info!(
            "order {id} created for item {item_id}, supplier {supplier_id}, quantity {quantity}"
        );
        self.store.record_audit(
            &session.username,
            format!("created order {id} for item {item_id} x{quantity}"),
        )?;
        Ok(id)
    }

    pub fn order(&self, session: &Session, id: OrderId) -> DomainResult<PurchaseOrder> {
        authorize(session, Action::ReadCatalog)?;
        self.store.order(id)
    }

    pub fn list_orders(
        &self,
        session: &Session,
        status: Option<OrderStatus>,
    ) -> DomainResult<Vec<PurchaseOrder>> {
        authorize(session, Action::ReadCatalog)?;
        self.store.list_orders(status)
    }

    /// Transition an order; receiving it also books the stock in, atomically.
    pub fn update_order_status(
        &self,
        session: &Session,
        id: OrderId,
        next: OrderStatus,
    ) -> DomainResult<()> {
        authorize(session, Action::MutateCatalog)?;
        self.store.update_order_status(id, next)?;
        tracing::info!("order {id} moved to {next}");
        self.store
            .record_audit(&session.username, format!("order {id} marked {next}"))?;
        Ok(())
    }

    // ── reports ──────────────────────────────────────────────────────────

    pub fn dashboard(&self, session: &Session, low_stock_threshold: i64) -> DomainResult<DashboardSummary> {
        authorize(session, Action::ReadCatalog)?;
        self.store.dashboard(low_stock_threshold)
    }

    pub fn audit_log(&self, session: &Session) -> DomainResult<Vec<AuditEntry>> {
        authorize(session, Action::ManageUsers)?;
        self.store.audit_entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system_with_admin() -> (StockSystem, Session) {
        let system = StockSystem::new();
        system.bootstrap_admin("root", "pw1").unwrap();
        let session = system.authenticate("root", "pw1").unwrap();
        (system, session)
    }

    #[test]
    fn bootstrap_only_works_once() {
        let system = StockSystem::new();
        system.bootstrap_admin("root", "pw1").unwrap();
        let err = system.bootstrap_admin("root2", "pw2").unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn unknown_user_and_wrong_password_are_indistinguishable() {
        let (system, _) = system_with_admin();

        let wrong_password = system.authenticate("root", "nope").unwrap_err();
        let unknown_user = system.authenticate("ghost", "nope").unwrap_err();
        assert_eq!(wrong_password, unknown_user);
        assert_eq!(
            wrong_password,
            DomainError::Auth(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn session_carries_assigned_role() {
        let (system, admin) = system_with_admin();
        system.create_user(&admin, "joe", "pw2", Role::Staff).unwrap();

        let joe = system.authenticate("joe", "pw2").unwrap();
        assert_eq!(joe.role, Role::Staff);
        assert_eq!(joe.username, "joe");
    }

    #[test]
    fn staff_cannot_manage_users() {
        let (system, admin) = system_with_admin();
        system.create_user(&admin, "joe", "pw2", Role::Staff).unwrap();
        let joe = system.authenticate("joe", "pw2").unwrap();

        let err = system
            .create_user(&joe, "eve", "pw3", Role::Staff)
            .unwrap_err();
        assert_eq!(err, DomainError::Auth(AuthError::Forbidden));
        // Denied call left no trace: the user was never created.
        assert!(system.authenticate("eve", "pw3").is_err());
    }

    #[test]
    fn denied_delete_leaves_catalog_untouched() {
        let (system, admin) = system_with_admin();
        system.create_user(&admin, "joe", "pw2", Role::Staff).unwrap();
        let joe = system.authenticate("joe", "pw2").unwrap();

        let item_id = system
            .add_item(
                &joe,
                NewItem {
                    name: "Widget".to_string(),
                    quantity: 1,
                    unit_price: 1.0,
                    location: "warehouse".to_string(),
                    expiry_date: None,
                },
            )
            .unwrap();

        let err = system.delete_item(&joe, item_id).unwrap_err();
        assert_eq!(err, DomainError::Auth(AuthError::Forbidden));
        assert!(system.item(&joe, item_id).is_ok());
    }

    #[test]
    fn audit_log_is_admin_only_and_records_actors() {
        let (system, admin) = system_with_admin();
        system.create_user(&admin, "joe", "pw2", Role::Staff).unwrap();
        let joe = system.authenticate("joe", "pw2").unwrap();

        assert_eq!(
            system.audit_log(&joe).unwrap_err(),
            DomainError::Auth(AuthError::Forbidden)
        );

        let entries = system.audit_log(&admin).unwrap();
        assert!(entries.iter().any(|e| e.actor == "root"));
    }
}
