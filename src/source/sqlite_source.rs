use async_trait::async_trait;
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    domain::Collection,
    error::{AppError, Result},
    source::{PageOptions, RawPage, RecordSource, SourceFilter},
};

/// Local stand-in for the data service: one JSON document per row, paged in
/// insertion order.
pub struct SqliteRecordSource {
    pool: SqlitePool,
}

impl SqliteRecordSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert or replace a document keyed by its `_id`. Replacing keeps the
    /// original position.
    pub async fn insert(&self, collection: Collection, record: &Value) -> Result<()> {
        let id = record
            .get("_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                AppError::Validation(format!("{} record without _id", collection.as_str()))
            })?;
        let data = record.to_string();

        sqlx::query(
            r#"
            INSERT INTO records (collection, id, position, data)
            VALUES (?, ?, (SELECT COALESCE(MAX(position), -1) + 1 FROM records WHERE collection = ?), ?)
            ON CONFLICT (collection, id)
            DO UPDATE SET data = excluded.data, updated_at = CURRENT_TIMESTAMP
            "#
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(collection.as_str())
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    pub async fn count(&self, collection: Collection) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM records WHERE collection = ?")
            .bind(collection.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }

    pub async fn clear(&self, collection: Collection) -> Result<()> {
        sqlx::query("DELETE FROM records WHERE collection = ?")
            .bind(collection.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    fn parse_document(data: &str) -> Result<Value> {
        serde_json::from_str(data).map_err(|e| AppError::Database(format!("Corrupt record: {}", e)))
    }
}

#[async_trait]
impl RecordSource for SqliteRecordSource {
    async fn fetch_page(
        &self,
        collection: Collection,
        filter: &SourceFilter,
        options: PageOptions,
    ) -> Result<RawPage> {
        filter.validate()?;
        let skip = i64::try_from(options.skip)
            .map_err(|_| AppError::BadRequest(format!("skip {} is out of range", options.skip)))?;
        // One extra row tells us whether another page exists.
        let fetch_limit = i64::try_from(options.limit)
            .ok()
            .and_then(|limit| limit.checked_add(1))
            .ok_or_else(|| AppError::BadRequest(format!("limit {} is out of range", options.limit)))?;

        let mut query = QueryBuilder::<Sqlite>::new("SELECT data FROM records WHERE collection = ");
        query.push_bind(collection.as_str());
        for (field, value) in filter.fields() {
            query
                .push(" AND json_extract(data, ")
                .push_bind(format!("$.{}", field))
                .push(") = json_extract(")
                .push_bind(value.to_string())
                .push(", '$')");
        }
        query
            .push(" ORDER BY position ASC, id ASC LIMIT ")
            .push_bind(fetch_limit)
            .push(" OFFSET ")
            .push_bind(skip);

        let rows: Vec<(String,)> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let has_next = rows.len() as u64 > options.limit;
        let items = rows
            .iter()
            .take(options.limit as usize)
            .map(|(data,)| Self::parse_document(data))
            .collect::<Result<Vec<_>>>()?;
        let next_skip = if has_next {
            options.skip.checked_add(items.len() as u64)
        } else {
            None
        };
        let has_next = next_skip.is_some();

        tracing::debug!(
            "Fetched {} {} records (skip {}, has_next {})",
            items.len(),
            collection.as_str(),
            options.skip,
            has_next
        );

        Ok(RawPage {
            items,
            has_next,
            next_skip,
        })
    }

    async fn fetch_by_id(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT data
            FROM records
            WHERE collection = ? AND id = ?
            "#
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some((data,)) => Ok(Some(Self::parse_document(&data)?)),
            None => Ok(None),
        }
    }
}
