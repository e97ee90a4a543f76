//! One-time example data for an empty store.
//!
//! The two fixture receipts mirror real Austrian grocery receipts and only
//! exist so a fresh install has something to show. Seeding is idempotent:
//! a store that already holds any receipt is never touched again.

use rust_decimal::Decimal;

use accounting_types::{Item, Receipt, ReceiptInfo, ReceiptRepository, RepoError, Store, Totals};

/// Seeds the fixture receipts if and only if the store is empty.
///
/// Returns `true` when the fixtures were written.
pub async fn seed_if_empty<R: ReceiptRepository>(repo: &R) -> Result<bool, RepoError> {
    if repo.count().await? > 0 {
        tracing::debug!("store already populated, skipping seed");
        return Ok(false);
    }

    for receipt in fixture_receipts() {
        repo.create(receipt).await?;
    }

    tracing::info!("seeded example receipts into empty store");
    Ok(true)
}

/// The fixed example receipts.
pub fn fixture_receipts() -> Vec<Receipt> {
    vec![
        Receipt {
            id: None,
            store: Some(Store {
                name: Some("Billa AG".into()),
                address: Some("3400 KLOSTERNEUBURG, AUFELDGASSE 45-49".into()),
            }),
            receipt_info: Some(ReceiptInfo {
                date: Some("2025-07-25".into()),
            }),
            items: vec![
                fixture_item("Billa Bio Zitronen 500g", 249),
                fixture_item("Ja! Bio Knoblauch 150g", 299),
                fixture_item("Ja!Bio RoggenPurWeck", 109),
                fixture_item("Ja! Bio Wachauer", 135),
            ],
            totals: Some(Totals {
                total: Some(Decimal::new(792, 2)),
            }),
        },
        Receipt {
            id: None,
            store: Some(Store {
                name: Some("SPAR".into()),
                address: Some("1010 WIEN, STEPHANSPLATZ 3".into()),
            }),
            receipt_info: Some(ReceiptInfo {
                date: Some("2025-07-26".into()),
            }),
            items: vec![
                fixture_item("SPAR Milch 1L", 129),
                fixture_item("SPAR Brot 500g", 249),
                fixture_item("SPAR Butter 250g", 399),
                fixture_item("SPAR Käse 150g", 279),
            ],
            totals: Some(Totals {
                total: Some(Decimal::new(1056, 2)),
            }),
        },
    ]
}

fn fixture_item(name: &str, cents: i64) -> Item {
    Item {
        id: None,
        name: Some(name.into()),
        price: Some(Decimal::new(cents, 2)),
    }
}
