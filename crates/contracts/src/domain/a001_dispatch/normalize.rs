//! Fills in product data missing from fetched dispatch items.
//!
//! Defaults are derived only from the item id and `today`, so normalizing is
//! deterministic, and an already normalized item is returned unchanged.

use super::aggregate::{Dispatch, DispatchItem, ProductInfo};
use chrono::{Duration, NaiveDate};

/// Length of the id prefix used for placeholder labels and codes.
pub const ID_PREFIX_LEN: usize = 8;

/// Days from today used as the default expiration date.
pub const DEFAULT_EXPIRATION_DAYS: i64 = 30;

fn id_prefix(id: &str) -> &str {
    match id.char_indices().nth(ID_PREFIX_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

pub fn placeholder_name(item_id: &str) -> String {
    format!("Product {}", id_prefix(item_id))
}

pub fn placeholder_code(item_id: &str) -> String {
    format!("PRD-{}", id_prefix(item_id).to_uppercase())
}

pub fn default_expiration(today: NaiveDate) -> NaiveDate {
    today + Duration::days(DEFAULT_EXPIRATION_DAYS)
}

/// Returns the item with a complete product record. Present fields are kept
/// as they are; only missing ones get defaults.
pub fn normalize_item(item: &DispatchItem, today: NaiveDate) -> DispatchItem {
    let product = item.product.clone().unwrap_or_default();
    let product = ProductInfo {
        id: product.id.or_else(|| Some(item.id.clone())),
        name: product.name.or_else(|| Some(placeholder_name(&item.id))),
        code: product.code.or_else(|| Some(placeholder_code(&item.id))),
        expiration_date: product
            .expiration_date
            .or_else(|| Some(default_expiration(today))),
    };

    DispatchItem {
        id: item.id.clone(),
        quantity: item.quantity,
        product: Some(product),
    }
}

pub fn normalize_dispatch(dispatch: &Dispatch, today: NaiveDate) -> Dispatch {
    Dispatch {
        items: dispatch
            .items
            .iter()
            .map(|item| normalize_item(item, today))
            .collect(),
        ..dispatch.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn bare(id: &str) -> DispatchItem {
        DispatchItem {
            id: id.to_string(),
            quantity: 3.0,
            product: None,
        }
    }

    #[test]
    fn test_absent_product_is_synthesized() {
        let item = normalize_item(&bare("a1b2c3d4-e5f6-7890"), today());
        let product = item.product.unwrap();
        assert_eq!(product.id.as_deref(), Some("a1b2c3d4-e5f6-7890"));
        assert_eq!(product.name.as_deref(), Some("Product a1b2c3d4"));
        assert_eq!(product.code.as_deref(), Some("PRD-A1B2C3D4"));
        assert_eq!(
            product.expiration_date,
            NaiveDate::from_ymd_opt(2024, 7, 1)
        );
    }

    #[test]
    fn test_normalize_is_deterministic_and_idempotent() {
        let raw = bare("ff00ee11dd22");
        let once = normalize_item(&raw, today());
        let again = normalize_item(&raw, today());
        assert_eq!(once, again);

        let twice = normalize_item(&once, today());
        assert_eq!(once, twice);

        // a later "today" must not move an already filled date
        let later = normalize_item(&once, today() + Duration::days(5));
        assert_eq!(once, later);
    }

    #[test]
    fn test_partial_product_keeps_present_fields() {
        let item = DispatchItem {
            id: "12345678abcdef".to_string(),
            quantity: 1.0,
            product: Some(ProductInfo {
                id: Some("prod-9".to_string()),
                name: Some("Canned beans".to_string()),
                code: None,
                expiration_date: None,
            }),
        };
        let product = normalize_item(&item, today()).product.unwrap();
        assert_eq!(product.id.as_deref(), Some("prod-9"));
        assert_eq!(product.name.as_deref(), Some("Canned beans"));
        assert_eq!(product.code.as_deref(), Some("PRD-12345678"));
        assert_eq!(product.expiration_date, Some(default_expiration(today())));
    }

    #[test]
    fn test_short_and_multibyte_ids() {
        assert_eq!(placeholder_code("ab"), "PRD-AB");
        assert_eq!(placeholder_name("ёжик-ёжик-ёжик"), "Product ёжик-ёжи");
    }

    #[test]
    fn test_normalize_dispatch_touches_every_item() {
        let dispatch = Dispatch {
            id: "d-1".to_string(),
            status: super::super::DispatchStatus::Pending,
            supplier_id: "s".to_string(),
            supplier_name: None,
            buyer_name: None,
            warehouse_location: None,
            requested_at: today(),
            decided_at: None,
            notes: None,
            items: vec![bare("one"), bare("two")],
        };
        let normalized = normalize_dispatch(&dispatch, today());
        assert!(normalized.items.iter().all(|i| i.product.is_some()));
        assert_eq!(normalized.id, dispatch.id);
        assert_eq!(normalize_dispatch(&normalized, today()), normalized);
    }
}
