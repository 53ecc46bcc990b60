//! PostgreSQL listing store.

use async_trait::async_trait;
use sqlx::PgPool;

use bazaar_core::error::AppError;
use bazaar_core::result::AppResult;
use bazaar_core::types::{AccountId, ListingId, PriceFilter};
use bazaar_entity::listing::Listing;

use crate::store::{ListingQuery, ListingStore};

/// Unique index on `(owner_id, md5(title), md5(body))`.
const CONTENT_CONSTRAINT: &str = "listings_owner_title_body_key";

const COLUMNS: &str = "id, title, body, image_url, price, owner_id, created_at";

/// Listing store backed by the `listings` table.
#[derive(Debug, Clone)]
pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn query_page(
        &self,
        owner_id: Option<AccountId>,
        query: &ListingQuery,
    ) -> AppResult<(Vec<Listing>, u64)> {
        let (where_clause, param_idx) = where_clause(owner_id.is_some(), &query.filter);

        let count_sql = format!("SELECT COUNT(*) FROM listings {where_clause}");
        let select_sql = format!(
            "SELECT {COLUMNS} FROM listings {where_clause} ORDER BY {}, id ASC LIMIT ${param_idx} OFFSET ${}",
            query.sort.to_sql(),
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Listing>(&select_sql);

        if let Some(owner_id) = owner_id {
            count_query = count_query.bind(owner_id);
            select_query = select_query.bind(owner_id);
        }
        if let Some(min) = query.filter.min_price {
            count_query = count_query.bind(min);
            select_query = select_query.bind(min);
        }
        if let Some(max) = query.filter.max_price {
            count_query = count_query.bind(max);
            select_query = select_query.bind(max);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::store("Failed to count listings", e))?;

        let rows = select_query
            .bind(query.page.limit() as i64)
            .bind(query.page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::store("Failed to list listings", e))?;

        Ok((rows, total.max(0) as u64))
    }
}

/// Build the `WHERE` clause and return the next free parameter index.
///
/// Parameters are numbered in bind order: owner, min price, max price.
fn where_clause(by_owner: bool, filter: &PriceFilter) -> (String, u32) {
    let mut conditions = Vec::new();
    let mut param_idx = 1u32;

    if by_owner {
        conditions.push(format!("owner_id = ${param_idx}"));
        param_idx += 1;
    }
    if filter.min_price.is_some() {
        conditions.push(format!("price >= ${param_idx}"));
        param_idx += 1;
    }
    if filter.max_price.is_some() {
        conditions.push(format!("price <= ${param_idx}"));
        param_idx += 1;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, param_idx)
}

fn map_write_error(e: sqlx::Error, listing: &Listing, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(CONTENT_CONSTRAINT) => {
            AppError::conflict(format!(
                "A listing titled '{}' with the same description already exists",
                listing.title
            ))
        }
        _ => AppError::store(format!("Failed to {action} listing"), e),
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn insert(&self, listing: &Listing) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO listings (id, title, body, image_url, price, owner_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(listing.id)
        .bind(&listing.title)
        .bind(&listing.body)
        .bind(&listing.image_url)
        .bind(listing.price)
        .bind(listing.owner_id)
        .bind(listing.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, listing, "insert"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: ListingId) -> AppResult<Option<Listing>> {
        sqlx::query_as::<_, Listing>(&format!("SELECT {COLUMNS} FROM listings WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::store("Failed to find listing by id", e))
    }

    async fn find_by_title_and_body(
        &self,
        owner_id: AccountId,
        title: &str,
        body: &str,
    ) -> AppResult<Option<Listing>> {
        sqlx::query_as::<_, Listing>(&format!(
            "SELECT {COLUMNS} FROM listings WHERE owner_id = $1 AND title = $2 AND body = $3 LIMIT 1"
        ))
        .bind(owner_id)
        .bind(title)
        .bind(body)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::store("Failed to look up listing by content", e))
    }

    async fn update(&self, listing: &Listing) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE listings SET title = $2, body = $3, image_url = $4, price = $5 WHERE id = $1",
        )
        .bind(listing.id)
        .bind(&listing.title)
        .bind(&listing.body)
        .bind(&listing.image_url)
        .bind(listing.price)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, listing, "update"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Listing {} not found",
                listing.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: ListingId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::store("Failed to delete listing", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Listing {id} not found")));
        }
        Ok(())
    }

    async fn list_page(&self, query: &ListingQuery) -> AppResult<(Vec<Listing>, u64)> {
        self.query_page(None, query).await
    }

    async fn list_page_by_owner(
        &self,
        owner_id: AccountId,
        query: &ListingQuery,
    ) -> AppResult<(Vec<Listing>, u64)> {
        self.query_page(Some(owner_id), query).await
    }
}
