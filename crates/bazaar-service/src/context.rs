//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::types::AccountId;

/// The authenticated caller of one request.
///
/// Built by the HTTP layer after the authentication gate and passed to
/// every service method that acts on the caller's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account.
    pub account_id: AccountId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            request_time: Utc::now(),
        }
    }
}
