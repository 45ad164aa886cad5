//! External collaborators the dashboard shell calls on user action

use crate::Result;
use crate::types::{Showcase, TimestampResponse};
use async_trait::async_trait;

/// Source of the showcase item replaced by the manual refresh action
#[async_trait]
pub trait ShowcaseSource: Send + Sync {
    /// Fetch a new showcase item
    async fn fetch_showcase(&self) -> Result<Showcase>;
}

/// Client side of the timestamp endpoint
#[async_trait]
pub trait TimestampSource: Send + Sync {
    /// Ask the server for its current time
    async fn fetch_timestamp(&self) -> Result<TimestampResponse>;
}
