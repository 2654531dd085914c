use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use term_scrape::{Result, ScraperConfig, SearchRegion, config};

#[derive(Parser, Debug)]
#[command(name = "term-scrape")]
#[command(about = "Fetch web pages and report where search terms appear")]
#[command(version)]
#[command(after_help = "Examples:
  term-scrape                                 # Use built-in defaults
  term-scrape --urls https://example.com      # Single URL
  term-scrape --terms python web --delay 2.0  # Custom terms and delay
  term-scrape --config-only                   # Show current configuration
  term-scrape --examples                      # Run example scenarios")]
pub struct Args {
    /// URLs to scrape (overrides the configuration)
    #[arg(long, num_args = 1..)]
    pub urls: Option<Vec<String>>,

    /// Search terms (overrides the configuration)
    #[arg(long, num_args = 1..)]
    pub terms: Option<Vec<String>>,

    /// Delay between requests in seconds
    #[arg(long)]
    pub delay: Option<f64>,

    /// Make search case sensitive
    #[arg(long)]
    pub case_sensitive: bool,

    /// Where to search for terms
    #[arg(long, value_enum)]
    pub search_in: Option<SearchInArg>,

    /// Output file for results (JSON format)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// JSON configuration file used instead of the built-in defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show current configuration and exit
    #[arg(long)]
    pub config_only: bool,

    /// Run example scenarios
    #[arg(long)]
    pub examples: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SearchInArg {
    All,
    Title,
    Body,
    Links,
}

/// Convert from CLI argument region to internal region
pub fn convert_region(arg: SearchInArg) -> SearchRegion {
    match arg {
        SearchInArg::All => SearchRegion::All,
        SearchInArg::Title => SearchRegion::Title,
        SearchInArg::Body => SearchRegion::Body,
        SearchInArg::Links => SearchRegion::Links,
    }
}

impl Args {
    /// Effective configuration: flags over config file over defaults
    pub fn resolve(&self) -> Result<ScraperConfig> {
        let mut resolved = match &self.config {
            Some(path) => ScraperConfig::from_file(path)?,
            None => ScraperConfig::default(),
        };

        if let Some(urls) = &self.urls {
            resolved.urls = urls.clone();
        }
        if let Some(terms) = &self.terms {
            resolved.search_terms = terms.clone();
        }
        if let Some(delay) = self.delay {
            config::delay_from_secs(delay)?;
            resolved.delay_secs = delay;
        }
        // The flag can only switch case sensitivity on
        resolved.case_sensitive |= self.case_sensitive;
        if let Some(region) = self.search_in {
            resolved.search_in = convert_region(region);
        }

        Ok(resolved)
    }
}
