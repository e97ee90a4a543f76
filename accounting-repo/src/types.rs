//! Database row structs and their mapping into domain types.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::FromRow;

use accounting_types::{Item, ItemId, ReceiptId, RepoError};

/// Receipt root row.
#[derive(FromRow)]
pub struct DbReceipt {
    pub id: String,
}

/// Store row (at most one per receipt).
#[derive(FromRow)]
pub struct DbStore {
    pub receipt_id: String,
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Receipt metadata row (at most one per receipt).
#[derive(FromRow)]
pub struct DbReceiptInfo {
    pub receipt_id: String,
    pub date: Option<String>,
}

/// Totals row (at most one per receipt).
#[derive(FromRow)]
pub struct DbTotals {
    pub receipt_id: String,
    pub total: Option<String>,
}

/// Line item row. Position is only used for ordering in the query itself.
#[derive(FromRow)]
pub struct DbItem {
    pub id: String,
    pub receipt_id: String,
    pub name: Option<String>,
    pub price: Option<String>,
}

impl DbItem {
    pub fn into_domain(self) -> Result<Item, RepoError> {
        Ok(Item {
            id: Some(parse_item_id(&self.id)?),
            name: self.name,
            price: self.price.as_deref().map(parse_decimal).transpose()?,
        })
    }
}

pub fn parse_receipt_id(s: &str) -> Result<ReceiptId, RepoError> {
    ReceiptId::from_str(s).map_err(|e| RepoError::Database(format!("invalid receipt id: {e}")))
}

pub fn parse_item_id(s: &str) -> Result<ItemId, RepoError> {
    ItemId::from_str(s).map_err(|e| RepoError::Database(format!("invalid item id: {e}")))
}

/// Decimals are persisted as TEXT; anything unparseable is a corrupt row.
pub fn parse_decimal(s: &str) -> Result<Decimal, RepoError> {
    Decimal::from_str(s).map_err(|e| RepoError::Database(format!("invalid decimal {s:?}: {e}")))
}
