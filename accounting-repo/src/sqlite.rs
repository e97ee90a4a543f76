//! SQLite repository adapter.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use accounting_types::{
    Item, ItemId, Receipt, ReceiptId, ReceiptInfo, ReceiptRepository, RepoError, Store, Totals,
};

use crate::types::{DbItem, DbReceipt, DbReceiptInfo, DbStore, DbTotals, parse_decimal};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file
        let ddl = include_str!("../migrations/0001_create_receipts.sql");
        sqlx::raw_sql(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ReceiptRepository for SqliteRepo {
    async fn create(&self, receipt: Receipt) -> Result<Receipt, RepoError> {
        // Caller-supplied identifiers are never honored.
        let receipt = receipt.without_ids();

        let id = ReceiptId::new();
        let id_str = id.to_string();
        let created_at = chrono::Utc::now().to_rfc3339();

        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        sqlx::query(r#"INSERT INTO receipts (id, created_at) VALUES (?, ?)"#)
            .bind(&id_str)
            .bind(&created_at)
            .execute(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        if let Some(store) = &receipt.store {
            sqlx::query(r#"INSERT INTO receipt_stores (receipt_id, name, address) VALUES (?, ?, ?)"#)
                .bind(&id_str)
                .bind(&store.name)
                .bind(&store.address)
                .execute(&mut *db_tx)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;
        }

        if let Some(info) = &receipt.receipt_info {
            sqlx::query(r#"INSERT INTO receipt_infos (receipt_id, date) VALUES (?, ?)"#)
                .bind(&id_str)
                .bind(&info.date)
                .execute(&mut *db_tx)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;
        }

        if let Some(totals) = &receipt.totals {
            sqlx::query(r#"INSERT INTO receipt_totals (receipt_id, total) VALUES (?, ?)"#)
                .bind(&id_str)
                .bind(totals.total.map(|t| t.to_string()))
                .execute(&mut *db_tx)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;
        }

        // Positions record submission order; it is part of the read contract.
        let mut stored_items = Vec::with_capacity(receipt.items.len());
        for (position, item) in receipt.items.iter().enumerate() {
            let item_id = ItemId::new();

            sqlx::query(
                r#"INSERT INTO receipt_items (id, receipt_id, position, name, price)
                   VALUES (?, ?, ?, ?, ?)"#,
            )
            .bind(item_id.to_string())
            .bind(&id_str)
            .bind(position as i64)
            .bind(&item.name)
            .bind(item.price.map(|p| p.to_string()))
            .execute(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

            stored_items.push(Item {
                id: Some(item_id),
                name: item.name.clone(),
                price: item.price,
            });
        }

        db_tx
            .commit()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        Ok(Receipt {
            id: Some(id),
            store: receipt.store,
            receipt_info: receipt.receipt_info,
            items: stored_items,
            totals: receipt.totals,
        })
    }

    async fn list_all(&self) -> Result<Vec<Receipt>, RepoError> {
        let roots: Vec<DbReceipt> =
            sqlx::query_as(r#"SELECT id FROM receipts ORDER BY created_at ASC, rowid ASC"#)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        let stores: Vec<DbStore> =
            sqlx::query_as(r#"SELECT receipt_id, name, address FROM receipt_stores"#)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        let infos: Vec<DbReceiptInfo> =
            sqlx::query_as(r#"SELECT receipt_id, date FROM receipt_infos"#)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        let totals: Vec<DbTotals> =
            sqlx::query_as(r#"SELECT receipt_id, total FROM receipt_totals"#)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        let items: Vec<DbItem> = sqlx::query_as(
            r#"SELECT id, receipt_id, name, price
               FROM receipt_items ORDER BY receipt_id, position ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let mut store_by_receipt: HashMap<String, Store> = stores
            .into_iter()
            .map(|s| {
                (
                    s.receipt_id,
                    Store {
                        name: s.name,
                        address: s.address,
                    },
                )
            })
            .collect();

        let mut info_by_receipt: HashMap<String, ReceiptInfo> = infos
            .into_iter()
            .map(|i| (i.receipt_id, ReceiptInfo { date: i.date }))
            .collect();

        let mut totals_by_receipt: HashMap<String, Totals> = HashMap::new();
        for t in totals {
            let total = t.total.as_deref().map(parse_decimal).transpose()?;
            totals_by_receipt.insert(t.receipt_id, Totals { total });
        }

        let mut items_by_receipt: HashMap<String, Vec<Item>> = HashMap::new();
        for item in items {
            let receipt_id = item.receipt_id.clone();
            items_by_receipt
                .entry(receipt_id)
                .or_default()
                .push(item.into_domain()?);
        }

        roots
            .into_iter()
            .map(|root| {
                let id = crate::types::parse_receipt_id(&root.id)?;
                Ok(Receipt {
                    id: Some(id),
                    store: store_by_receipt.remove(&root.id),
                    receipt_info: info_by_receipt.remove(&root.id),
                    items: items_by_receipt.remove(&root.id).unwrap_or_default(),
                    totals: totals_by_receipt.remove(&root.id),
                })
            })
            .collect()
    }

    async fn count(&self) -> Result<i64, RepoError> {
        let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM receipts"#)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(count)
    }
}
