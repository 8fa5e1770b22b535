//! List configuration.
//!
//! Use the builder methods to customize, or [`ListConfig::from_env`] to pick
//! up overrides from the environment.
//!
//! # Example
//!
//! ```ignore
//! use listgrid::config::ListConfig;
//! use std::time::Duration;
//!
//! let config = ListConfig::default()
//!     .with_debounce(Duration::from_millis(200))
//!     .with_default_page_size(25);
//! ```

use std::time::Duration;

/// Quiet period before a burst of search/filter edits is sent.
pub const DEFAULT_DEBOUNCE_MS: u64 = 350;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub const DEFAULT_PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 30_000;

pub const ENV_DEBOUNCE_MS: &str = "LISTGRID_DEBOUNCE_MS";
pub const ENV_PAGE_SIZE: &str = "LISTGRID_PAGE_SIZE";
/// `0` disables the fetch timeout.
pub const ENV_FETCH_TIMEOUT_MS: &str = "LISTGRID_FETCH_TIMEOUT_MS";

/// Per-list settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ListConfig {
    /// Coalescing window for quick-filter and column-filter edits.
    pub debounce: Duration,
    /// Page size a freshly mounted list starts with.
    pub default_page_size: u32,
    /// Choices offered by the page-size selector.
    pub page_size_options: Vec<u32>,
    /// Upper bound on a single fetch. `None` waits forever.
    pub fetch_timeout: Option<Duration>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            fetch_timeout: Some(Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS)),
        }
    }
}

impl ListConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the initial page size (floored to 1).
    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size.max(1);
        self
    }

    pub fn with_page_size_options(mut self, options: Vec<u32>) -> Self {
        self.page_size_options = options;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Defaults with `LISTGRID_*` overrides applied.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = env_u64(ENV_DEBOUNCE_MS) {
            config = config.with_debounce(Duration::from_millis(ms));
        }
        if let Some(size) = env_u64(ENV_PAGE_SIZE) {
            config = config.with_default_page_size(u32::try_from(size).unwrap_or(u32::MAX));
        }
        if let Some(ms) = env_u64(ENV_FETCH_TIMEOUT_MS) {
            let timeout = (ms > 0).then(|| Duration::from_millis(ms));
            config = config.with_fetch_timeout(timeout);
        }

        config
    }
}

fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(var = name, value = %raw, "Ignoring invalid setting: {}", e);
            None
        }
    }
}
