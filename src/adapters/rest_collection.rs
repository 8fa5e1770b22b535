//! REST adapter for a JSON collection endpoint.
//!
//! Wire shape:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | fetch | `GET {base}?page=&limit=&sortBy=&sortOrder=&search=&filters=<json>` |
//! | create | `POST {base}` |
//! | update | `PATCH {base}/{id}` |
//! | delete one | `DELETE {base}/{id}` |
//! | delete many | `DELETE {base}` with `{"ids": [...]}` |

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{FetchError, MutationError};
use crate::models::{Page, RecordId};
use crate::query::QueryParams;
use crate::traits::{CollectionSource, CrudAccessor};

/// Request timeout applied by [`RestCollection::new`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Collection accessed over HTTP with reqwest.
///
/// # Example
///
/// ```ignore
/// use listgrid::adapters::RestCollection;
///
/// let vehicles: RestCollection<Vehicle> = RestCollection::new("https://shop.example/api/vehicles");
/// let page = vehicles.fetch(&QueryState::default().snapshot()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RestCollection<R> {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    _row: PhantomData<fn() -> R>,
}

impl<R> RestCollection<R> {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self::with_client(client, base_url).with_timeout_hint(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Use a preconfigured client (auth headers, proxies, timeouts).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            _row: PhantomData,
        }
    }

    /// Duration reported in [`FetchError::Timeout`] when the client times out.
    pub fn with_timeout_hint(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full fetch URL for a params snapshot.
    pub fn fetch_url(&self, params: &QueryParams) -> String {
        let mut pairs = vec![
            ("page", params.page.to_string()),
            ("limit", params.limit.to_string()),
        ];
        if let (Some(field), Some(order)) = (&params.sort_by, params.sort_order) {
            pairs.push(("sortBy", field.clone()));
            pairs.push(("sortOrder", order.as_str().to_string()));
        }
        if !params.search.is_empty() {
            pairs.push(("search", params.search.clone()));
        }
        if !params.filters.is_empty() {
            if let Ok(json) = serde_json::to_string(&params.filters) {
                pairs.push(("filters", json));
            }
        }
        let query = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.base_url, query)
    }

    fn item_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    fn convert_fetch_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                after: self.timeout,
            }
        } else if err.is_connect() {
            FetchError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            FetchError::InvalidResponse(err.to_string())
        } else {
            FetchError::Other(err.to_string())
        }
    }

    fn convert_mutation_error(err: reqwest::Error) -> MutationError {
        if err.is_connect() || err.is_timeout() {
            MutationError::ConnectionFailed(err.to_string())
        } else {
            MutationError::Other(err.to_string())
        }
    }

    async fn check_mutation(
        response: reqwest::Response,
        id: Option<&RecordId>,
    ) -> Result<reqwest::Response, MutationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            404 => MutationError::NotFound(id.map(ToString::to_string).unwrap_or(message)),
            400 | 422 => MutationError::Validation(message),
            code => MutationError::Status {
                status: code,
                message,
            },
        })
    }
}

#[async_trait]
impl<R> CollectionSource<R> for RestCollection<R>
where
    R: DeserializeOwned + Send + Sync + 'static,
{
    async fn fetch(&self, params: &QueryParams) -> Result<Page<R>, FetchError> {
        let url = self.fetch_url(params);
        tracing::debug!(url = %url, "Fetching collection page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.convert_fetch_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.convert_fetch_error(e))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl<R, C, U> CrudAccessor<R, C, U> for RestCollection<R>
where
    R: DeserializeOwned + Send + Sync + 'static,
    C: Serialize + Send + 'static,
    U: Serialize + Send + 'static,
{
    async fn create(&self, dto: C) -> Result<R, MutationError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(&dto)
            .send()
            .await
            .map_err(Self::convert_mutation_error)?;
        let response = Self::check_mutation(response, None).await?;
        response
            .json()
            .await
            .map_err(|e| MutationError::Other(e.to_string()))
    }

    async fn update(&self, id: &RecordId, dto: U) -> Result<R, MutationError> {
        let response = self
            .client
            .patch(self.item_url(id))
            .json(&dto)
            .send()
            .await
            .map_err(Self::convert_mutation_error)?;
        let response = Self::check_mutation(response, Some(id)).await?;
        response
            .json()
            .await
            .map_err(|e| MutationError::Other(e.to_string()))
    }

    async fn delete_one(&self, id: &RecordId) -> Result<(), MutationError> {
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(Self::convert_mutation_error)?;
        Self::check_mutation(response, Some(id)).await?;
        Ok(())
    }

    async fn delete_many(&self, ids: &[RecordId]) -> Result<(), MutationError> {
        let response = self
            .client
            .delete(&self.base_url)
            .json(&serde_json::json!({ "ids": ids }))
            .send()
            .await
            .map_err(Self::convert_mutation_error)?;
        Self::check_mutation(response, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ColumnFilter, FilterOperator, QueryState, SortOrder};

    #[test]
    fn test_fetch_url_encoding() {
        let rest: RestCollection<serde_json::Value> =
            RestCollection::new("http://localhost:3000/api/vehicles/");
        let mut q = QueryState::new(25);
        q.set_page(2);
        q.set_search("seat ibiza");
        q.update_sort(Some("owner.name".into()), Some(SortOrder::Desc));
        q.add_filter("year", ColumnFilter::new(2020, FilterOperator::GreaterThan));

        let url = rest.fetch_url(&q.snapshot());
        assert!(url.starts_with("http://localhost:3000/api/vehicles?page=2&limit=25"));
        assert!(url.contains("sortBy=owner.name&sortOrder=desc"));
        assert!(url.contains("search=seat%20ibiza"));
        assert!(url.contains("filters=%7B%22year%22"));
    }

    #[test]
    fn test_fetch_url_minimal() {
        let rest: RestCollection<serde_json::Value> = RestCollection::new("http://h/c");
        assert_eq!(
            rest.fetch_url(&QueryState::new(10).snapshot()),
            "http://h/c?page=1&limit=10"
        );
    }
}
