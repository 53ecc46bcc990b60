//! Listing lifecycle and the paginated, sorted, filtered query path.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use bazaar_core::error::{AppError, ErrorKind};
use bazaar_core::types::{
    AccountId, ListingId, ListingSort, PageRequest, PageResponse, PriceFilter,
};
use bazaar_database::store::{ListingQuery, ListingStore};
use bazaar_entity::listing::{Listing, ListingPatch, ListingView, NewListing};

use crate::account::AccountDirectory;
use crate::context::RequestContext;

/// Owns listings. Resolves owner handles through the [`AccountDirectory`].
///
/// Duplicate content is checked before every insert and content edit; the
/// store rejects whatever slips past the check with `Conflict`.
#[derive(Clone)]
pub struct ListingEngine {
    listings: Arc<dyn ListingStore>,
    directory: Arc<AccountDirectory>,
}

impl std::fmt::Debug for ListingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingEngine").finish_non_exhaustive()
    }
}

impl ListingEngine {
    /// Creates a new listing engine.
    pub fn new(listings: Arc<dyn ListingStore>, directory: Arc<AccountDirectory>) -> Self {
        Self {
            listings,
            directory,
        }
    }

    /// Publishes a listing owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: NewListing,
    ) -> Result<ListingView, AppError> {
        let owner = self.directory.get(ctx.account_id).await?;

        let listing = input.into_listing(owner.id);
        listing.validate()?;
        self.ensure_unique(&listing).await?;

        self.listings.insert(&listing).await?;
        info!(listing_id = %listing.id, account_id = %owner.id, "Listing created");

        Ok(ListingView::new(listing, owner.handle, Some(ctx.account_id)))
    }

    /// Fetches one listing with its owner's handle.
    pub async fn get(
        &self,
        id: ListingId,
        caller: Option<AccountId>,
    ) -> Result<ListingView, AppError> {
        let listing = self.find(id).await?;
        let mut handles = HashMap::new();
        self.enrich(listing, caller, &mut handles).await
    }

    /// Applies the supplied fields of `patch` to a listing the caller owns.
    pub async fn edit(
        &self,
        ctx: &RequestContext,
        id: ListingId,
        patch: ListingPatch,
    ) -> Result<ListingView, AppError> {
        let mut listing = self.find(id).await?;
        ensure_owner(ctx, &listing)?;
        if patch.is_empty() {
            return Err(AppError::invalid_input(
                "nothing to update: supply a title, body, image_url or price",
            ));
        }

        let replaces_content = patch.replaces_content();
        patch.apply_to(&mut listing);

        if replaces_content {
            self.ensure_unique(&listing).await?;
        }
        listing.validate()?;

        self.listings.update(&listing).await?;
        info!(listing_id = %listing.id, account_id = %ctx.account_id, "Listing updated");

        let mut handles = HashMap::new();
        self.enrich(listing, Some(ctx.account_id), &mut handles)
            .await
    }

    /// Removes a listing the caller owns.
    pub async fn delete(&self, ctx: &RequestContext, id: ListingId) -> Result<(), AppError> {
        let listing = self.find(id).await?;
        ensure_owner(ctx, &listing)?;

        self.listings.delete(id).await?;
        info!(listing_id = %id, account_id = %ctx.account_id, "Listing deleted");
        Ok(())
    }

    /// Lists all listings matching `filter`, ordered by `sort`.
    ///
    /// `page` must already be validated as positive. `sort` is empty or
    /// `"<created_at|price> <asc|desc>"`; only `min_price` and `max_price`
    /// are read from `filter`.
    pub async fn list(
        &self,
        page: PageRequest,
        sort: &str,
        filter: &HashMap<String, String>,
        caller: Option<AccountId>,
    ) -> Result<PageResponse<ListingView>, AppError> {
        let query = build_query(page, sort, filter)?;
        let (rows, total) = self.listings.list_page(&query).await?;
        debug!(total, returned = rows.len(), sort = %query.sort, "Listed listings");
        self.enrich_page(rows, total, page, caller).await
    }

    /// Like [`ListingEngine::list`], restricted to one owner, who must exist.
    pub async fn list_by_owner(
        &self,
        owner_id: AccountId,
        page: PageRequest,
        sort: &str,
        filter: &HashMap<String, String>,
        caller: Option<AccountId>,
    ) -> Result<PageResponse<ListingView>, AppError> {
        let query = build_query(page, sort, filter)?;
        self.directory.get(owner_id).await?;

        let (rows, total) = self.listings.list_page_by_owner(owner_id, &query).await?;
        debug!(%owner_id, total, returned = rows.len(), "Listed listings by owner");
        self.enrich_page(rows, total, page, caller).await
    }

    async fn find(&self, id: ListingId) -> Result<Listing, AppError> {
        self.listings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Listing {id} not found")))
    }

    async fn ensure_unique(&self, listing: &Listing) -> Result<(), AppError> {
        let existing = self
            .listings
            .find_by_title_and_body(listing.owner_id, &listing.title, &listing.body)
            .await?;
        match existing {
            Some(other) if other.id != listing.id => Err(AppError::conflict(format!(
                "A listing titled '{}' with the same description already exists",
                listing.title
            ))),
            _ => Ok(()),
        }
    }

    async fn enrich_page(
        &self,
        rows: Vec<Listing>,
        total: u64,
        page: PageRequest,
        caller: Option<AccountId>,
    ) -> Result<PageResponse<ListingView>, AppError> {
        let mut handles = HashMap::new();
        let mut items = Vec::with_capacity(rows.len());
        for listing in rows {
            items.push(self.enrich(listing, caller, &mut handles).await?);
        }
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    /// Attach the owner's handle, looking each owner up once per call.
    async fn enrich(
        &self,
        listing: Listing,
        caller: Option<AccountId>,
        handles: &mut HashMap<AccountId, String>,
    ) -> Result<ListingView, AppError> {
        let owner_id = listing.owner_id;
        let handle = match handles.get(&owner_id) {
            Some(handle) => handle.clone(),
            None => {
                let owner = self.directory.get(owner_id).await.map_err(|e| {
                    if e.kind == ErrorKind::NotFound {
                        warn!(listing_id = %listing.id, %owner_id, "Listing owner is missing");
                        e.wrap(
                            ErrorKind::NotFound,
                            format!("Owner {owner_id} of listing {} not found", listing.id),
                        )
                    } else {
                        e
                    }
                })?;
                handles.insert(owner_id, owner.handle.clone());
                owner.handle
            }
        };
        Ok(ListingView::new(listing, handle, caller))
    }
}

fn build_query(
    page: PageRequest,
    sort: &str,
    filter: &HashMap<String, String>,
) -> Result<ListingQuery, AppError> {
    Ok(ListingQuery {
        filter: PriceFilter::from_params(filter)?,
        sort: ListingSort::parse(sort)?,
        page,
    })
}

fn ensure_owner(ctx: &RequestContext, listing: &Listing) -> Result<(), AppError> {
    if !listing.is_owned_by(ctx.account_id) {
        warn!(
            listing_id = %listing.id,
            caller = %ctx.account_id,
            "Rejected change to a listing owned by another account"
        );
        return Err(AppError::forbidden("you do not own this listing"));
    }
    Ok(())
}
