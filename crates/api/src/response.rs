//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Confirmation returned by `DELETE` endpoints, carrying the removed record.
///
/// ```ignore
/// Ok(Json(DeletedResponse::new("Client deleted", client)))
/// ```
#[derive(Debug, Serialize)]
pub struct DeletedResponse<T: Serialize> {
    pub message: String,
    pub deleted: T,
}

impl<T: Serialize> DeletedResponse<T> {
    pub fn new(message: impl Into<String>, deleted: T) -> Self {
        Self {
            message: message.into(),
            deleted,
        }
    }
}
