//! Request DTOs with validation.
//!
//! The rules here only check shape; business rules live in the entities
//! and services.

use serde::{Deserialize, Serialize};
use validator::Validate;

use bazaar_entity::listing::{ListingPatch, NewListing};
use bazaar_service::AccountUpdate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "handle is required"))]
    pub handle: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "handle is required"))]
    pub handle: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Account update body. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    pub handle: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateAccountRequest> for AccountUpdate {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            handle: req.handle,
            password: req.password,
        }
    }
}

/// Listing creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateListingRequest {
    #[validate(length(max = 100, message = "title must be at most 100 characters"))]
    pub title: String,
    #[validate(length(max = 1000, message = "body must be at most 1000 characters"))]
    pub body: String,
    #[validate(length(min = 1, message = "image_url is required"))]
    pub image_url: String,
    pub price: f64,
}

impl From<CreateListingRequest> for NewListing {
    fn from(req: CreateListingRequest) -> Self {
        Self {
            title: req.title,
            body: req.body,
            image_url: req.image_url,
            price: req.price,
        }
    }
}

/// Listing edit body. Every supplied field is applied, then the result is
/// validated as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateListingRequest {
    #[validate(length(max = 100, message = "title must be at most 100 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 1000, message = "body must be at most 1000 characters"))]
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
}

impl From<UpdateListingRequest> for ListingPatch {
    fn from(req: UpdateListingRequest) -> Self {
        Self {
            title: req.title,
            body: req.body,
            image_url: req.image_url,
            price: req.price,
        }
    }
}
