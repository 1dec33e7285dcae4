//! Paginated listing
//!
//! Collects a complete result set from a page-based listing endpoint. Pages `1, 2, 3, …` are
//! requested with `per_page = page_size`; the loop ends after the first page that returns fewer
//! than `page_size` items. A final page that happens to be full costs one extra request, which
//! comes back empty and ends the loop.

use crate::api::{ApiRequest, Fetcher};
use crate::error::RemoteError;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Page size used when listing projects.
pub const PROJECTS_PAGE_SIZE: usize = 10;

/// Fetch every item from the listing at `path`, in the order the pages return them.
///
/// `page_size` must be at least 1; zero is treated as 1. The loop relies on the remote returning
/// a short page once the data is exhausted.
pub async fn fetch_all<T: DeserializeOwned>(
    fetcher: &dyn Fetcher,
    path: &str,
    page_size: usize,
) -> Result<Vec<T>, RemoteError> {
    let page_size = page_size.max(1);
    let mut results: Vec<T> = Vec::new();
    let mut page: usize = 1;

    loop {
        let request = ApiRequest::get(path)
            .with_query("per_page", page_size)
            .with_query("page", page);
        let value = fetcher.fetch(request).await?;
        let items: Vec<T> = serde_json::from_value(value).map_err(|e| RemoteError::Decode {
            path: path.to_string(),
            message: format!("page {}: {}", page, e),
        })?;

        let returned = items.len();
        results.extend(items);
        debug!(path, page, returned, total = results.len(), "Fetched page");

        if returned < page_size {
            break;
        }
        page += 1;
    }

    Ok(results)
}
