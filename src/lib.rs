// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod parsers;
pub mod report;
pub mod results;
pub mod search;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use error::{Error, Result};
pub use parsers::SearchRegion;
pub use results::{PageMatches, PageResult, RunResult, TermMatches};

use crawlers::{FetchConfig, PageSource, WebSource};
use std::time::Duration;

/// Fetches pages one after another and searches each for a set of terms
pub struct Scraper<S = WebSource> {
    source: S,
    config: ScraperConfig,
    delay: Duration,
}

impl Scraper<WebSource> {
    /// Create a scraper that fetches over HTTP with default client settings
    pub fn new(config: ScraperConfig) -> Result<Self> {
        Self::with_fetch_config(config, &FetchConfig::default())
    }

    /// Create a scraper with custom HTTP client settings
    pub fn with_fetch_config(config: ScraperConfig, fetch: &FetchConfig) -> Result<Self> {
        let source = WebSource::new(fetch)?;
        Self::with_source(source, config)
    }
}

impl<S: PageSource> Scraper<S> {
    /// Create a scraper that reads pages from any [`PageSource`]
    pub fn with_source(source: S, config: ScraperConfig) -> Result<Self> {
        let delay = config.delay()?;
        Ok(Self {
            source,
            config,
            delay,
        })
    }

    /// Set the delay between requests in seconds
    pub fn with_delay(mut self, delay_secs: f64) -> Result<Self> {
        self.delay = config::delay_from_secs(delay_secs)?;
        self.config.delay_secs = delay_secs;
        Ok(self)
    }

    /// Set whether matching respects letter case
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.config.case_sensitive = case_sensitive;
        self
    }

    /// Set the page region that is searched
    pub fn with_region(mut self, region: SearchRegion) -> Self {
        self.config.search_in = region;
        self
    }

    /// Run over the configured URLs and search terms
    pub async fn run_configured(&self) -> RunResult {
        self.run(&self.config.urls, &self.config.search_terms).await
    }

    /// Fetch, extract and search every URL in order.
    ///
    /// Waits the configured delay before every URL except the first. A page
    /// that cannot be fetched is recorded as an error and the run moves on.
    pub async fn run(&self, urls: &[String], terms: &[String]) -> RunResult {
        let mut results = RunResult::new();
        let start_time = std::time::Instant::now();

        for (i, url) in urls.iter().enumerate() {
            println!("Scraping {}/{}: {}", i + 1, urls.len(), url);

            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let result = self.process_url(url, terms).await;
            results.insert(url.clone(), result);
        }

        ::log::info!(
            "Scraping complete - processed {} URLs in {:.2} seconds",
            urls.len(),
            start_time.elapsed().as_secs_f64()
        );

        results
    }

    async fn process_url(&self, url: &str, terms: &[String]) -> PageResult {
        let doc = match crawlers::fetch_page(&self.source, url).await {
            Ok(doc) => doc,
            Err(_) => return PageResult::fetch_failed(),
        };

        let text = doc.extract(self.config.search_in);
        ::log::debug!(
            "Extracted {} bytes from {} ({})",
            text.len(),
            url,
            self.config.search_in
        );

        let matches = search::search_terms(&text, terms, self.config.case_sensitive);
        let page = PageMatches::new(doc.title(), matches);

        ::log::info!("Found {} matches on {}", page.total_matches, url);
        PageResult::Scraped(page)
    }
}
