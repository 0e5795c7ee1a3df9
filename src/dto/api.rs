//! DTOs exposed by the mock REST endpoints.

use serde::{Deserialize, Serialize};

/// Every API response is wrapped as `{"data": ...}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
