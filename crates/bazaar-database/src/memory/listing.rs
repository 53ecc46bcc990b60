//! In-memory listing store.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use bazaar_core::error::AppError;
use bazaar_core::result::AppResult;
use bazaar_core::types::{AccountId, ListingId, ListingSort, SortDirection, SortField};
use bazaar_entity::listing::Listing;

use crate::store::{ListingQuery, ListingStore};

/// Listing store holding every record in a shared map.
#[derive(Debug, Clone, Default)]
pub struct MemoryListingStore {
    listings: Arc<Mutex<HashMap<ListingId, Listing>>>,
}

impl MemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored listings.
    pub async fn len(&self) -> usize {
        self.listings.lock().await.len()
    }

    fn page(
        listings: &HashMap<ListingId, Listing>,
        owner_id: Option<AccountId>,
        query: &ListingQuery,
    ) -> (Vec<Listing>, u64) {
        let mut matching: Vec<&Listing> = listings
            .values()
            .filter(|l| owner_id.is_none_or(|owner| l.owner_id == owner))
            .filter(|l| query.filter.matches(l.price))
            .collect();
        matching.sort_by(|a, b| compare(a, b, &query.sort));

        let total = matching.len() as u64;
        let rows = matching
            .into_iter()
            .skip(query.page.offset() as usize)
            .take(query.page.limit() as usize)
            .cloned()
            .collect();
        (rows, total)
    }
}

/// Same order as `ORDER BY <field> <dir>, id ASC`.
fn compare(a: &Listing, b: &Listing, sort: &ListingSort) -> Ordering {
    let by_field = match sort.field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Price => a.price.total_cmp(&b.price),
    };
    let by_field = match sort.direction {
        SortDirection::Asc => by_field,
        SortDirection::Desc => by_field.reverse(),
    };
    by_field.then_with(|| a.id.cmp(&b.id))
}

fn duplicate_of<'a>(
    listings: &'a HashMap<ListingId, Listing>,
    candidate: &Listing,
) -> Option<&'a Listing> {
    listings.values().find(|l| {
        l.id != candidate.id
            && l.owner_id == candidate.owner_id
            && l.title == candidate.title
            && l.body == candidate.body
    })
}

fn duplicate_error(listing: &Listing) -> AppError {
    AppError::conflict(format!(
        "A listing titled '{}' with the same description already exists",
        listing.title
    ))
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn insert(&self, listing: &Listing) -> AppResult<()> {
        let mut listings = self.listings.lock().await;
        if listings.contains_key(&listing.id) {
            return Err(AppError::conflict(format!(
                "Listing {} already exists",
                listing.id
            )));
        }
        if duplicate_of(&listings, listing).is_some() {
            return Err(duplicate_error(listing));
        }
        listings.insert(listing.id, listing.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ListingId) -> AppResult<Option<Listing>> {
        Ok(self.listings.lock().await.get(&id).cloned())
    }

    async fn find_by_title_and_body(
        &self,
        owner_id: AccountId,
        title: &str,
        body: &str,
    ) -> AppResult<Option<Listing>> {
        Ok(self
            .listings
            .lock()
            .await
            .values()
            .find(|l| l.owner_id == owner_id && l.title == title && l.body == body)
            .cloned())
    }

    async fn update(&self, listing: &Listing) -> AppResult<()> {
        let mut listings = self.listings.lock().await;
        if !listings.contains_key(&listing.id) {
            return Err(AppError::not_found(format!(
                "Listing {} not found",
                listing.id
            )));
        }
        if duplicate_of(&listings, listing).is_some() {
            return Err(duplicate_error(listing));
        }
        if let Some(stored) = listings.get_mut(&listing.id) {
            stored.title = listing.title.clone();
            stored.body = listing.body.clone();
            stored.image_url = listing.image_url.clone();
            stored.price = listing.price;
        }
        Ok(())
    }

    async fn delete(&self, id: ListingId) -> AppResult<()> {
        self.listings
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Listing {id} not found")))
    }

    async fn list_page(&self, query: &ListingQuery) -> AppResult<(Vec<Listing>, u64)> {
        let listings = self.listings.lock().await;
        Ok(Self::page(&listings, None, query))
    }

    async fn list_page_by_owner(
        &self,
        owner_id: AccountId,
        query: &ListingQuery,
    ) -> AppResult<(Vec<Listing>, u64)> {
        let listings = self.listings.lock().await;
        Ok(Self::page(&listings, Some(owner_id), query))
    }
}
