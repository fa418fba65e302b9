//! Service layer for business logic
//!
//! Each service owns one external operation of the system and receives its
//! storage and cache handles at construction. Services never call each other.

mod analytics;
mod catalog;
mod redirect;
mod shortener;

pub use analytics::{AnalyticsService, UrlStats};
pub use catalog::{CatalogService, Pagination, UrlPage};
pub use redirect::{ClickSource, RedirectService};
pub use shortener::{ShortenedUrl, ShortenerService};
