//! Scripted collection source for testing request ordering.
//!
//! Each fetch pops the next scripted response, optionally waiting before it
//! resolves, which makes out-of-order completion easy to stage under paused
//! tokio time.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::Page;
use crate::query::QueryParams;
use crate::traits::CollectionSource;

/// One queued answer.
#[derive(Debug, Clone)]
pub struct ScriptedResponse<R> {
    pub result: Result<Page<R>, FetchError>,
    pub delay: Duration,
}

/// Collection source answering from a script.
///
/// # Example
///
/// ```ignore
/// use listgrid::adapters::mock::ScriptedCollection;
/// use listgrid::models::Page;
///
/// let source = ScriptedCollection::new();
/// source.push_page_after(Page::new(vec![a], 1, 1, 10), Duration::from_millis(500));
/// source.push_page(Page::new(vec![b], 1, 1, 10));
/// // ... drive a controller ...
/// assert_eq!(source.request_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedCollection<R> {
    script: Arc<Mutex<VecDeque<ScriptedResponse<R>>>>,
    default_response: Arc<Mutex<Option<Page<R>>>>,
    requests: Arc<Mutex<Vec<QueryParams>>>,
}

impl<R: Clone> ScriptedCollection<R> {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push_page(&self, page: Page<R>) {
        self.push_page_after(page, Duration::ZERO);
    }

    pub fn push_page_after(&self, page: Page<R>, delay: Duration) {
        self.script.lock().unwrap().push_back(ScriptedResponse {
            result: Ok(page),
            delay,
        });
    }

    pub fn push_error(&self, error: FetchError) {
        self.push_error_after(error, Duration::ZERO);
    }

    pub fn push_error_after(&self, error: FetchError, delay: Duration) {
        self.script.lock().unwrap().push_back(ScriptedResponse {
            result: Err(error),
            delay,
        });
    }

    /// Page returned once the script runs dry.
    pub fn set_default_page(&self, page: Page<R>) {
        *self.default_response.lock().unwrap() = Some(page);
    }

    /// Every params snapshot received, in call order.
    pub fn requests(&self) -> Vec<QueryParams> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<QueryParams> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn next_response(&self) -> ScriptedResponse<R> {
        if let Some(response) = self.script.lock().unwrap().pop_front() {
            return response;
        }
        let result = match self.default_response.lock().unwrap().clone() {
            Some(page) => Ok(page),
            None => Err(FetchError::Other("No scripted response".to_string())),
        };
        ScriptedResponse {
            result,
            delay: Duration::ZERO,
        }
    }
}

impl<R: Clone> Default for ScriptedCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> CollectionSource<R> for ScriptedCollection<R>
where
    R: Clone + Send + Sync + 'static,
{
    async fn fetch(&self, params: &QueryParams) -> Result<Page<R>, FetchError> {
        self.requests.lock().unwrap().push(params.clone());
        let response = self.next_response();
        if !response.delay.is_zero() {
            tokio::time::sleep(response.delay).await;
        }
        response.result
    }
}
