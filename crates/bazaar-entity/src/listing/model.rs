//! Listing entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bazaar_core::error::AppError;
use bazaar_core::types::{AccountId, ListingId};

use super::validation;

/// A marketplace post owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Listing {
    /// Unique listing identifier.
    pub id: ListingId,
    /// Short headline, 5 to 100 characters.
    pub title: String,
    /// Description, 10 to 1000 characters.
    pub body: String,
    /// Absolute URL of a PNG or JPEG image.
    pub image_url: String,
    /// Asking price, strictly positive and at most 1,000,000.
    pub price: f64,
    /// Owning account.
    pub owner_id: AccountId,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Check every field against the listing rules.
    pub fn validate(&self) -> Result<(), AppError> {
        validation::validate_title(&self.title)?;
        validation::validate_body(&self.body)?;
        validation::validate_image_url(&self.image_url)?;
        validation::validate_price(self.price)?;
        Ok(())
    }

    pub fn is_owned_by(&self, account_id: AccountId) -> bool {
        self.owner_id == account_id
    }
}

/// Fields supplied when creating a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub body: String,
    pub image_url: String,
    pub price: f64,
}

impl NewListing {
    /// Materialize the listing with a fresh ID and the current time.
    pub fn into_listing(self, owner_id: AccountId) -> Listing {
        Listing {
            id: ListingId::new(),
            title: self.title,
            body: self.body,
            image_url: self.image_url,
            price: self.price,
            owner_id,
            created_at: Utc::now(),
        }
    }
}

/// Partial update of a listing. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
}

impl ListingPatch {
    /// Whether no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.image_url.is_none() && self.price.is_none()
    }

    /// Whether both title and body are supplied together.
    pub fn replaces_content(&self) -> bool {
        self.title.is_some() && self.body.is_some()
    }

    /// Copy every supplied field onto `listing`.
    pub fn apply_to(self, listing: &mut Listing) {
        if let Some(title) = self.title {
            listing.title = title;
        }
        if let Some(body) = self.body {
            listing.body = body;
        }
        if let Some(image_url) = self.image_url {
            listing.image_url = image_url;
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
    }
}

/// A listing enriched with request-scoped, non-persisted fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingView {
    pub id: ListingId,
    pub title: String,
    pub body: String,
    pub image_url: String,
    pub price: f64,
    pub owner_id: AccountId,
    /// Handle of the owning account.
    pub owner_handle: String,
    /// Whether the caller owns this listing. Always false for anonymous callers.
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
}

impl ListingView {
    pub fn new(listing: Listing, owner_handle: String, caller: Option<AccountId>) -> Self {
        let is_owner = caller.is_some_and(|caller| listing.is_owned_by(caller));
        Self {
            id: listing.id,
            title: listing.title,
            body: listing.body,
            image_url: listing.image_url,
            price: listing.price,
            owner_id: listing.owner_id,
            owner_handle,
            is_owner,
            created_at: listing.created_at,
        }
    }
}
