//! Caller identity passed explicitly to every account-scoped operation.

use serde::{Deserialize, Serialize};

/// The authenticated caller of a trade or valuation request.
///
/// The server resolves this from a bearer token; core services never look
/// up the current user on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub user_id: String,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
