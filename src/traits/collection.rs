//! Remote paginated-collection capability.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::Page;
use crate::query::QueryParams;

/// Reads one page of a remote collection.
///
/// Implementations include the REST adapter, the in-memory collection and
/// scripted mocks for tests. The controller calls this from a spawned task,
/// hence `Send + Sync`.
///
/// # Example
///
/// ```ignore
/// use listgrid::traits::CollectionSource;
/// use listgrid::query::QueryState;
///
/// async fn first_page<S: CollectionSource<serde_json::Value>>(source: &S) {
///     let page = source.fetch(&QueryState::default().snapshot()).await?;
///     println!("{} of {}", page.data.len(), page.total);
/// }
/// ```
#[async_trait]
pub trait CollectionSource<R>: Send + Sync {
    async fn fetch(&self, params: &QueryParams) -> Result<Page<R>, FetchError>;
}
