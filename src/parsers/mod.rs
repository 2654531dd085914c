pub mod html;
pub mod text;


use scraper::Html;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Region of a page whose text is searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchRegion {
    /// Title, body and links together
    #[default]
    All,
    /// Only the `<title>` element
    Title,
    /// All visible text, without script and style content
    Body,
    /// Anchor text and `href` targets
    Links,
}

impl SearchRegion {
    /// Lower-case name used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchRegion::All => "all",
            SearchRegion::Title => "title",
            SearchRegion::Body => "body",
            SearchRegion::Links => "links",
        }
    }
}

impl fmt::Display for SearchRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed page, tolerant of malformed markup
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a page body into a document tree
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        if !html.errors.is_empty() {
            ::log::debug!("HTML parser recovered from {} errors", html.errors.len());
        }
        Self { html }
    }

    /// Trimmed title text, if the page has a `<title>` element
    pub fn title(&self) -> Option<String> {
        html::title_text(&self.html).map(|title| title.trim().to_string())
    }

    /// Builds the search buffer for a region
    pub fn extract(&self, region: SearchRegion) -> String {
        match region {
            SearchRegion::Title => self.title_region(),
            SearchRegion::Body => html::visible_text(&self.html),
            SearchRegion::Links => html::link_text(&self.html),
            SearchRegion::All => {
                let title = self.title_region();
                let body = html::visible_text(&self.html);
                let links = html::link_text(&self.html);
                text::join_regions([title.as_str(), body.as_str(), links.as_str()])
            }
        }
    }

    fn title_region(&self) -> String {
        match html::title_text(&self.html) {
            Some(title) => title + " ",
            None => String::new(),
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("title", &self.title())
            .finish()
    }
}
