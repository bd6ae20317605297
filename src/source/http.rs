//! HTTP member source backed by `reqwest`.

use super::MemberSource;
use crate::model::{FetchError, MemberRecord, PageNumber};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Public demo endpoint serving the `/users` collection.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

const USERS_PATH: &str = "users";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches pages from `GET {base_url}/users?_page=N&_limit=M`.
#[derive(Debug, Clone)]
pub struct HttpMemberSource {
    users_url: Url,
    http: reqwest::Client,
}

impl HttpMemberSource {
    /// Create a source rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let users_url = users_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Transport {
                reason: e.to_string(),
            })?;

        Ok(Self { users_url, http })
    }

    /// URL of the users collection, without pagination query.
    pub fn users_url(&self) -> &Url {
        &self.users_url
    }

    fn page_url(&self, page: PageNumber, page_size: usize) -> Url {
        let mut url = self.users_url.clone();
        url.query_pairs_mut()
            .append_pair("_page", &page.to_string())
            .append_pair("_limit", &page_size.to_string());
        url
    }
}

fn users_url(base_url: &str) -> Result<Url, FetchError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let mut url = Url::parse(trimmed).map_err(|e| FetchError::Transport {
        reason: format!("invalid base URL {trimmed:?}: {e}"),
    })?;

    url.path_segments_mut()
        .map_err(|()| FetchError::Transport {
            reason: format!("base URL {trimmed:?} cannot carry a path"),
        })?
        .pop_if_empty()
        .push(USERS_PATH);

    Ok(url)
}

#[async_trait]
impl MemberSource for HttpMemberSource {
    async fn fetch_page(
        &self,
        page: PageNumber,
        page_size: usize,
    ) -> Result<Vec<MemberRecord>, FetchError> {
        let url = self.page_url(page, page_size);
        debug!(%url, "Requesting member page");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            reason: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            reason: e.to_string(),
        })
    }
}
