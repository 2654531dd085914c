use crate::error::Result;
use std::future::Future;

/// Something that can turn a URL into page markup.
///
/// The HTTP implementation is [`crate::crawlers::web::WebSource`]; the
/// orchestrator only depends on this trait.
pub trait PageSource {
    /// Retrieve the raw body of `url`, failing on any transport or status error
    fn fetch_html(&self, url: &str) -> impl Future<Output = Result<String>>;
}
