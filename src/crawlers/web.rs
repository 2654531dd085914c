use crate::crawlers::PageSource;
use crate::error::{Error, Result};
use crate::parsers::Document;
use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

/// Browser-like identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Bytes at the start of a body that are searched for a `<meta>` charset
const META_SNIFF_BYTES: usize = 1024;

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_.:-]+)"#)
        .expect("hardcoded regex is valid")
});

static HEADER_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)charset\s*=\s*["']?([a-z0-9_.:-]+)"#).expect("hardcoded regex is valid")
});

/// Settings for the HTTP client
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User-Agent header value
    pub user_agent: String,

    /// Timeout covering connect, request and body download
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fetches pages over HTTP(S) with a single GET per URL.
///
/// Redirects follow the client's default policy. Any body is accepted
/// regardless of its content type.
#[derive(Debug, Clone)]
pub struct WebSource {
    http: Client,
}

impl WebSource {
    /// Build an HTTP source from the given settings
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()?;

        Ok(Self { http })
    }
}

impl PageSource for WebSource {
    async fn fetch_html(&self, url_str: &str) -> Result<String> {
        let url = Url::parse(url_str).map_err(|e| Error::InvalidUrl(format!("{url_str}: {e}")))?;

        let start = std::time::Instant::now();
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        let body = decode_body(&bytes, content_type.as_deref());

        ::log::debug!(
            "Fetched {} ({} bytes) in {:.2} seconds",
            url_str,
            body.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(body)
    }
}

/// Decodes a response body to text.
///
/// A byte order mark wins, then a `<meta>` charset near the top of the
/// document, then the `charset` parameter of the Content-Type header.
/// Anything else is read as UTF-8. Undecodable bytes become U+FFFD.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = sniff_meta_charset(bytes)
        .or_else(|| content_type.and_then(header_charset))
        .unwrap_or(UTF_8);

    // `decode` gives a byte order mark priority over `encoding`
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        ::log::debug!("Body contained bytes that are invalid in {}", used.name());
    }
    text.into_owned()
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_BYTES)];
    let label = META_CHARSET.captures(head)?.get(1)?;
    // A page that says UTF-16 in ASCII markup is not UTF-16
    Encoding::for_label(label.as_bytes()).map(Encoding::output_encoding)
}

fn header_charset(content_type: &str) -> Option<&'static Encoding> {
    let label = HEADER_CHARSET.captures(content_type.as_bytes())?.get(1)?;
    Encoding::for_label(label.as_bytes())
}

/// Fetches one page and parses it into a [`Document`].
///
/// Failures are reported on the console and returned to the caller, which
/// records them without looking at the cause.
pub async fn fetch_page<S: PageSource>(source: &S, url: &str) -> Result<Document> {
    match source.fetch_html(url).await {
        Ok(body) => Ok(Document::parse(&body)),
        Err(e) => {
            println!("Error fetching {}: {}", url, e);
            ::log::warn!("Fetch failed for {}: {:?}", url, e);
            Err(e)
        }
    }
}
