//! `stockroom-catalog` — stock items and suppliers.
//!
//! Pure domain records with their validation rules; storage lives in
//! `stockroom-store`.

pub mod item;
pub mod supplier;

pub use item::{ItemFilter, ItemPatch, NewItem, StockItem};
pub use supplier::{ContactInfo, NewSupplier, Supplier, SupplierPatch};
