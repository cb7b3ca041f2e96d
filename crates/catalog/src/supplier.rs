use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, SupplierId};

/// Contact information for a supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A supplier the business orders from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact: ContactInfo,
}

/// Field values for a new supplier, validated on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSupplier {
    pub name: String,
    pub contact: ContactInfo,
}

/// Partial update: `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub contact: Option<ContactInfo>,
}

impl Supplier {
    pub fn new(new: NewSupplier) -> DomainResult<Self> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation("supplier name cannot be empty"));
        }
        Ok(Self {
            id: SupplierId::new(),
            name: new.name,
            contact: new.contact,
        })
    }

    pub fn apply(&mut self, patch: SupplierPatch) -> DomainResult<()> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("supplier name cannot be empty"));
            }
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(contact) = patch.contact {
            self.contact = contact;
        }
        Ok(())
    }
}
