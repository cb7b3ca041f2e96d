use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemId};

/// A stocked item.
///
/// `quantity` never goes negative; mutation paths validate before writing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub location: String,
    pub expiry_date: Option<NaiveDate>,
}

/// Field values for a new item, validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub location: String,
    pub expiry_date: Option<NaiveDate>,
}

/// Partial update: `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub location: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl StockItem {
    pub fn new(new: NewItem) -> DomainResult<Self> {
        validate_name(&new.name)?;
        validate_quantity(new.quantity)?;
        validate_price(new.unit_price)?;
        Ok(Self {
            id: ItemId::new(),
            name: new.name,
            quantity: new.quantity,
            unit_price: new.unit_price,
            location: new.location,
            expiry_date: new.expiry_date,
        })
    }

    /// Apply a partial update.
    ///
    /// All patched values are validated before any field is written, so a
    /// rejected patch leaves the record untouched.
    pub fn apply(&mut self, patch: ItemPatch) -> DomainResult<()> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(quantity) = patch.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(price) = patch.unit_price {
            validate_price(price)?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = patch.unit_price {
            self.unit_price = price;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(expiry) = patch.expiry_date {
            self.expiry_date = Some(expiry);
        }
        Ok(())
    }

    /// Adjust quantity by a signed delta (receiving, scan-out, corrections).
    pub fn adjust_quantity(&mut self, delta: i64) -> DomainResult<()> {
        if delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }
        let next = self
            .quantity
            .checked_add(delta)
            .ok_or_else(|| DomainError::validation("quantity overflow"))?;
        if next < 0 {
            return Err(DomainError::validation("quantity cannot go negative"));
        }
        self.quantity = next;
        Ok(())
    }

    /// Current stock value of this item.
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Listing filter; the empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    /// Exact location, case-insensitive.
    pub location: Option<String>,
    /// Items whose expiry date is strictly before this date. Items without
    /// an expiry date never match.
    pub expires_before: Option<NaiveDate>,
    /// Case-insensitive substring of the item name.
    pub name_contains: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &StockItem) -> bool {
        if let Some(location) = &self.location {
            if !item.location.eq_ignore_ascii_case(location) {
                return false;
            }
        }
        if let Some(before) = self.expires_before {
            match item.expiry_date {
                Some(expiry) if expiry < before => {}
                _ => return false,
            }
        }
        if let Some(fragment) = &self.name_contains {
            if !item
                .name
                .to_lowercase()
                .contains(&fragment.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

fn validate_quantity(quantity: i64) -> DomainResult<()> {
    if quantity < 0 {
        return Err(DomainError::validation("quantity cannot be negative"));
    }
    Ok(())
}

fn validate_price(price: f64) -> DomainResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::validation("unit price must be non-negative"));
    }
    Ok(())
}
