use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use meli_client::{decode_error, Route};

use crate::error::{Error, ErrorKind, Result};
use crate::product::{Product, ProductId, ProductStatus};

/// Most ids a single multiget request accepts.
pub const MULTIGET_LIMIT: usize = 20;

/// Ids requested per scan page.
pub const SCAN_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Serialize)]
struct ScanQuery<'a> {
    search_type: &'static str,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scroll_id: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScanPage {
    results: Vec<ProductId>,
    scroll_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    id: u64,
}

/// One entry of a multiget response.
#[derive(Debug, Deserialize)]
struct MultigetEntry {
    code: u16,
    #[serde(default)]
    body: serde_json::Value,
}

impl MultigetEntry {
    fn into_error(self) -> meli_client::Error {
        let body = if self.body.is_null() {
            String::new()
        } else {
            self.body.to_string()
        };
        decode_error(self.code, &body)
    }
}

impl super::MeliRestClient {
    /// Ids of every item of the authenticated user.
    pub async fn scan_all_products(&self) -> Result<Vec<ProductId>> {
        self.scan_products(None).await
    }

    /// Ids of the authenticated user's items, optionally filtered by status.
    ///
    /// Pages through the scan search until a page comes back empty or without
    /// a scroll id.
    #[instrument(skip(self))]
    pub async fn scan_products(&self, status: Option<ProductStatus>) -> Result<Vec<ProductId>> {
        let user_id = self.current_user_id().await?.to_string();

        let mut ids = Vec::new();
        let mut scroll_id: Option<String> = None;

        loop {
            let query = ScanQuery {
                search_type: "scan",
                limit: SCAN_PAGE_LIMIT,
                status,
                scroll_id: scroll_id.as_deref(),
            };
            let url = self.url_requiring_token(Route::UserItemsSearch, &[user_id.as_str()], &query)?;
            let page: ScanPage = self.http.send_json(self.http.get(url)).await?;

            if page.results.is_empty() {
                break;
            }
            debug!(page_size = page.results.len(), total = ids.len(), "Scan page received");
            ids.extend(page.results);

            match page.scroll_id {
                Some(next) if !next.is_empty() => scroll_id = Some(next),
                _ => break,
            }
        }

        Ok(ids)
    }

    /// Fetch up to [`MULTIGET_LIMIT`] items in one request.
    ///
    /// Fails with the decoded remote error of the first entry the API reports
    /// as failed; no partial result is returned.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_products(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        if ids.len() > MULTIGET_LIMIT {
            return Err(Error::new(ErrorKind::InvalidMultigetQuantity {
                given: ids.len(),
                max: MULTIGET_LIMIT,
            }));
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids
            .iter()
            .map(ProductId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let url = self.url_with_token(Route::Items, &[], &[("ids", joined.as_str())])?;
        let entries: Vec<MultigetEntry> = self.http.send_json(self.http.get(url)).await?;

        let mut products = Vec::with_capacity(entries.len());
        for entry in entries {
            if !(200..300).contains(&entry.code) {
                warn!(code = entry.code, body = %entry.body, "Multiget entry failed");
                return Err(entry.into_error().into());
            }
            products.push(serde_json::from_value(entry.body)?);
        }
        Ok(products)
    }

    /// Fetch every item of the authenticated user.
    ///
    /// Scans the ids, then fetches them in concurrent batches of
    /// [`MULTIGET_LIMIT`]. The first failed batch fails the whole call.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>> {
        let ids = self.scan_all_products().await?;
        let batches = ids
            .chunks(MULTIGET_LIMIT)
            .map(|chunk| self.get_products(chunk));

        let products: Vec<Product> = try_join_all(batches).await?.into_iter().flatten().collect();
        debug!(scanned = ids.len(), fetched = products.len(), "Products fetched");
        Ok(products)
    }

    async fn current_user_id(&self) -> Result<u64> {
        if let Some(user_id) = self.credentials.user_id() {
            return Ok(user_id);
        }
        let url = self.url_requiring_token(Route::Users, &["me"], &())?;
        let user: UserInfo = self.http.send_json(self.http.get(url)).await?;
        Ok(user.id)
    }
}
