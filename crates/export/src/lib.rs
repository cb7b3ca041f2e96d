//! `stockroom-export` — CSV/JSON projections of catalog and order listings.
//!
//! Export is a pure read-side projection: these functions consume listing
//! results and never touch the backing store. Item exports round-trip
//! (`items_to_csv` / `items_from_csv`, likewise for JSON) so a listing can
//! be re-imported and compared.

use thiserror::Error;

use stockroom_catalog::StockItem;
use stockroom_ledger::PurchaseOrder;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid utf-8 in export buffer: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub fn items_to_csv(items: &[StockItem]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for item in items {
        writer.serialize(item)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn items_from_csv(data: &str) -> Result<Vec<StockItem>, ExportError> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut items = Vec::new();
    for row in reader.deserialize() {
        items.push(row?);
    }
    Ok(items)
}

pub fn items_to_json(items: &[StockItem]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(items)?)
}

pub fn items_from_json(data: &str) -> Result<Vec<StockItem>, ExportError> {
    Ok(serde_json::from_str(data)?)
}

pub fn orders_to_csv(orders: &[PurchaseOrder]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for order in orders {
        writer.serialize(order)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn orders_to_json(orders: &[PurchaseOrder]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(orders)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use stockroom_catalog::NewItem;
    use stockroom_core::{ItemId, SupplierId};

    fn sample_items() -> Vec<StockItem> {
        vec![
            StockItem::new(NewItem {
                name: "Widget".to_string(),
                quantity: 10,
                unit_price: 2.5,
                location: "warehouse".to_string(),
                expiry_date: None,
            })
            .unwrap(),
            StockItem::new(NewItem {
                name: "Milk".to_string(),
                quantity: 6,
                unit_price: 1.2,
                location: "store".to_string(),
                expiry_date: NaiveDate::from_ymd_opt(2026, 9, 1),
            })
            .unwrap(),
        ]
    }

    fn sorted(mut items: Vec<StockItem>) -> Vec<StockItem> {
        items.sort_by(|a, b| a.id.as_uuid().cmp(b.id.as_uuid()));
        items
    }

    #[test]
    fn csv_round_trip_preserves_items() {
        let items = sample_items();
        let csv = items_to_csv(&items).unwrap();
        let parsed = items_from_csv(&csv).unwrap();
        assert_eq!(sorted(parsed), sorted(items));
    }

    #[test]
    fn json_round_trip_preserves_items() {
        let items = sample_items();
        let json = items_to_json(&items).unwrap();
        let parsed = items_from_json(&json).unwrap();
        assert_eq!(sorted(parsed), sorted(items));
    }

    #[test]
    fn empty_listing_round_trips() {
        let csv = items_to_csv(&[]).unwrap();
        assert!(items_from_csv(&csv).unwrap().is_empty());
    }

    #[test]
    fn orders_export_carries_status_and_references() {
        let order = PurchaseOrder::new(SupplierId::new(), ItemId::new(), 4).unwrap();
        let csv = orders_to_csv(std::slice::from_ref(&order)).unwrap();
        assert!(csv.contains("pending"));
        assert!(csv.contains(&order.supplier_id.to_string()));

        let json = orders_to_json(std::slice::from_ref(&order)).unwrap();
        assert!(json.contains("\"status\": \"pending\""));
    }

    fn arb_item() -> impl Strategy<Value = StockItem> {
        (
            "[A-Za-z][A-Za-z0-9 ]{0,16}",
            0i64..100_000,
            0u32..10_000_000,
            "[a-z]{1,10}",
            proptest::option::of((2024i32..2032, 1u32..13, 1u32..29)),
        )
            .prop_map(|(name, quantity, cents, location, expiry)| {
                StockItem::new(NewItem {
                    name,
                    quantity,
                    unit_price: f64::from(cents) / 100.0,
                    location,
                    expiry_date: expiry
                        .map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
                })
                .unwrap()
            })
    }

    proptest! {
        #[test]
        fn any_item_listing_round_trips_through_csv(
            items in proptest::collection::vec(arb_item(), 0..8)
        ) {
            let csv = items_to_csv(&items).unwrap();
            let parsed = items_from_csv(&csv).unwrap();
            prop_assert_eq!(sorted(parsed), sorted(items));
        }

        #[test]
        fn any_item_listing_round_trips_through_json(
            items in proptest::collection::vec(arb_item(), 0..8)
        ) {
            let json = items_to_json(&items).unwrap();
            let parsed = items_from_json(&json).unwrap();
            prop_assert_eq!(sorted(parsed), sorted(items));
        }
    }
}
