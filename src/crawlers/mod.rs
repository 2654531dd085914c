pub mod crawler;
pub mod web;

pub use crawler::PageSource;
pub use web::{FetchConfig, WebSource, fetch_page};
