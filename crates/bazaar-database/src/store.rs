//! Store contracts consumed by the service layer.
//!
//! Lookups used as existence checks return `Ok(None)` instead of an
//! error. Mutations of a missing row fail with `NotFound`, uniqueness
//! violations with `Conflict`, and anything else with `Store`.

use async_trait::async_trait;

use bazaar_core::result::AppResult;
use bazaar_core::types::{AccountId, ListingId, ListingSort, PageRequest, PriceFilter};
use bazaar_entity::account::Account;
use bazaar_entity::listing::Listing;

/// Persistence for account records.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Insert a new account. `Conflict` if the handle is taken.
    async fn insert(&self, account: &Account) -> AppResult<()>;

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Exact, case-sensitive handle lookup.
    async fn find_by_handle(&self, handle: &str) -> AppResult<Option<Account>>;

    /// Overwrite handle and password hash. `Conflict` if the new handle is taken.
    async fn update(&self, account: &Account) -> AppResult<()>;

    async fn delete(&self, id: AccountId) -> AppResult<()>;
}

/// Filter, order and page of a listing query.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListingQuery {
    pub filter: PriceFilter,
    pub sort: ListingSort,
    pub page: PageRequest,
}

/// Persistence for listing records.
#[async_trait]
pub trait ListingStore: Send + Sync + 'static {
    /// Insert a new listing. `Conflict` if the owner already has one with
    /// the same title and body.
    async fn insert(&self, listing: &Listing) -> AppResult<()>;

    async fn find_by_id(&self, id: ListingId) -> AppResult<Option<Listing>>;

    /// Look up an existing listing of `owner_id` with exactly this title and body.
    async fn find_by_title_and_body(
        &self,
        owner_id: AccountId,
        title: &str,
        body: &str,
    ) -> AppResult<Option<Listing>>;

    /// Overwrite the mutable fields of an existing listing.
    async fn update(&self, listing: &Listing) -> AppResult<()>;

    async fn delete(&self, id: ListingId) -> AppResult<()>;

    /// One page of listings plus the number of rows matching the filter.
    async fn list_page(&self, query: &ListingQuery) -> AppResult<(Vec<Listing>, u64)>;

    /// Like [`ListingStore::list_page`], restricted to one owner.
    async fn list_page_by_owner(
        &self,
        owner_id: AccountId,
        query: &ListingQuery,
    ) -> AppResult<(Vec<Listing>, u64)>;
}
