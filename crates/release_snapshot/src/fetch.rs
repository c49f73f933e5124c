use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::{Credentials, Tunables};
use crate::error::SnapshotError;
use crate::query::{PageRequest, build_query};
use crate::record::RawRecord;
use crate::window::TimeWindow;

#[derive(Debug, Clone)]
pub struct FetchedPages {
    pub records: Vec<RawRecord>,
    pub pages: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageState {
    Requesting { page: usize },
    HaveFullPage { page: usize },
    Done { pages: usize },
}

/// A page shorter than the requested size means the catalog has nothing further.
fn is_last_page(records_in_page: usize, page_size: usize) -> bool {
    records_in_page < page_size
}

/// Drive `fetch_page` from offset zero until a short page arrives.
///
/// Sleeps `delay` between successive requests but not before the first. The first error
/// aborts the loop and nothing fetched so far is returned.
pub async fn fetch_all_pages<F, Fut>(
    page_size: usize,
    delay: Duration,
    mut fetch_page: F,
) -> Result<FetchedPages, SnapshotError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Vec<RawRecord>, SnapshotError>>,
{
    if page_size == 0 {
        return Err(SnapshotError::Config(
            "page size must be greater than zero".to_string(),
        ));
    }

    let mut records = Vec::new();
    let mut state = PageState::Requesting { page: 0 };

    loop {
        state = match state {
            PageState::Requesting { page } => {
                let request = PageRequest::nth(page, page_size);
                info!(page = page + 1, offset = request.offset, "Requesting page");

                let batch = fetch_page(request).await?;
                let received = batch.len();
                records.extend(batch);
                debug!(page = page + 1, received, "Page received");

                if is_last_page(received, page_size) {
                    PageState::Done { pages: page + 1 }
                } else {
                    PageState::HaveFullPage { page }
                }
            }
            PageState::HaveFullPage { page } => {
                sleep(delay).await;
                PageState::Requesting { page: page + 1 }
            }
            PageState::Done { pages } => {
                info!(pages, records = records.len(), "Finished downloading releases");
                return Ok(FetchedPages { records, pages });
            }
        };
    }
}

/// Catalog endpoint bound to one run's credentials and window.
#[derive(Debug, Clone)]
pub struct CatalogClient<'a> {
    client: &'a Client,
    url: &'a str,
    client_id: &'a str,
    token: &'a str,
    window: TimeWindow,
}

impl<'a> CatalogClient<'a> {
    pub fn new(
        client: &'a Client,
        url: &'a str,
        client_id: &'a str,
        token: &'a str,
        window: TimeWindow,
    ) -> Self {
        Self {
            client,
            url,
            client_id,
            token,
            window,
        }
    }

    pub async fn fetch_page(&self, request: PageRequest) -> Result<Vec<RawRecord>, SnapshotError> {
        let response = self
            .client
            .post(self.url)
            .header(ACCEPT, "application/json")
            .header("Client-ID", self.client_id)
            .bearer_auth(self.token)
            .body(build_query(&self.window, &request))
            .send()
            .await
            .map_err(|err| {
                SnapshotError::fetch(format!(
                    "page {} request failed: {}",
                    request.page + 1,
                    err
                ))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| {
            SnapshotError::fetch(format!(
                "failed to read page {}: {}",
                request.page + 1,
                err
            ))
        })?;

        if !status.is_success() {
            return Err(SnapshotError::fetch(format!(
                "catalog responded with {} for page {}",
                status,
                request.page + 1
            ))
            .with_data(text));
        }

        let items: Vec<Value> = serde_json::from_str(&text).map_err(|err| {
            SnapshotError::fetch(format!(
                "page {} is not a JSON array: {}",
                request.page + 1,
                err
            ))
            .with_data(&text)
        })?;

        Ok(items.into_iter().map(RawRecord::from_value).collect())
    }
}

/// Download every record released inside `window`.
pub async fn fetch_releases(
    client: &Client,
    tunables: &Tunables,
    credentials: &Credentials,
    token: &str,
    window: TimeWindow,
) -> Result<FetchedPages, SnapshotError> {
    let catalog = CatalogClient::new(
        client,
        &tunables.catalog_url,
        &credentials.client_id,
        token,
        window,
    );
    let catalog = &catalog;

    fetch_all_pages(tunables.page_size, tunables.page_delay, move |request| {
        catalog.fetch_page(request)
    })
    .await
}
