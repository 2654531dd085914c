use crate::error::{Error, Result};
use crate::parsers::SearchRegion;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Settings for one scraping run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Pages to fetch, in order
    #[serde(default = "default_urls")]
    pub urls: Vec<String>,

    /// Terms to look for on every page
    #[serde(default = "default_search_terms")]
    pub search_terms: Vec<String>,

    /// Pause between consecutive requests, in seconds
    #[serde(default = "default_delay_secs")]
    pub delay_secs: f64,

    /// Whether matching respects letter case
    #[serde(default)]
    pub case_sensitive: bool,

    /// Part of the page that is searched
    #[serde(default)]
    pub search_in: SearchRegion,
}

/// Default target pages
fn default_urls() -> Vec<String> {
    vec![
        "https://nationalreview.com".to_string(),
        "https://clarionproject.org".to_string(),
        "https://tranquility.ai".to_string(),
    ]
}

/// Default search terms
fn default_search_terms() -> Vec<String> {
    ["violence", "extremism", "threats", "Charlie", "TimePilot", "Security"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}

/// Default delay between requests
fn default_delay_secs() -> f64 {
    1.0
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            urls: default_urls(),
            search_terms: default_search_terms(),
            delay_secs: default_delay_secs(),
            case_sensitive: false,
            search_in: SearchRegion::All,
        }
    }
}

impl ScraperConfig {
    /// Create a configuration for the given pages and terms, other settings default
    pub fn new(urls: Vec<String>, search_terms: Vec<String>) -> Self {
        Self {
            urls,
            search_terms,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that values are usable
    pub fn validate(&self) -> Result<()> {
        self.delay().map(|_| ())
    }

    /// Delay between requests as a duration
    pub fn delay(&self) -> Result<Duration> {
        delay_from_secs(self.delay_secs)
    }
}

/// Converts a delay in seconds, rejecting values no [`Duration`] can hold.
///
/// Negative, NaN, infinite and overflowing values are all configuration errors.
pub fn delay_from_secs(delay_secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(delay_secs).map_err(|e| {
        Error::Config(format!(
            "delay must be a non-negative number of seconds, got {} ({})",
            delay_secs, e
        ))
    })
}

/// A named, ready-made configuration
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub config: ScraperConfig,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Canned scenarios run by `--examples`
pub fn presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "Basic Usage",
            config: ScraperConfig::new(
                strings(&["https://example.com", "https://httpbin.org/html"]),
                strings(&["example", "domain"]),
            ),
        },
        Preset {
            name: "Title-Only Search",
            config: ScraperConfig {
                search_in: SearchRegion::Title,
                ..ScraperConfig::new(
                    strings(&["https://python.org", "https://github.com"]),
                    strings(&["python", "github"]),
                )
            },
        },
        Preset {
            name: "Case-Sensitive Search",
            config: ScraperConfig {
                case_sensitive: true,
                ..ScraperConfig::new(
                    strings(&["https://python.org"]),
                    strings(&["Python", "PYTHON"]),
                )
            },
        },
        Preset {
            name: "Custom Search",
            config: ScraperConfig {
                delay_secs: 2.0,
                ..ScraperConfig::new(
                    strings(&[
                        "https://news.ycombinator.com",
                        "https://stackoverflow.com/questions/tagged/python",
                    ]),
                    strings(&["javascript", "python", "react"]),
                )
            },
        },
    ]
}
