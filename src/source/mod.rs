//! Member data sources.
//!
//! This module provides the paginated source the directory reads from:
//! - [`MemberSource`] - the seam the pagination controller fetches through
//! - [`HttpMemberSource`] - JSON-over-HTTP implementation for the demo endpoint

use crate::model::{FetchError, MemberRecord, PageNumber};
use async_trait::async_trait;

pub mod http;

pub use http::{HttpMemberSource, DEFAULT_BASE_URL};

/// A paginated source of team members.
///
/// One call fetches one page. An empty page means there is nothing after it; the source
/// exposes no total count.
#[async_trait]
pub trait MemberSource: Send + Sync {
    /// Fetch up to `page_size` members for `page`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on transport failure, non-success status, or a body that is
    /// not an array of members.
    async fn fetch_page(
        &self,
        page: PageNumber,
        page_size: usize,
    ) -> Result<Vec<MemberRecord>, FetchError>;
}
