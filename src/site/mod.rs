pub mod cache;
pub mod client;
pub mod discovery;
pub mod throttle;

use async_trait::async_trait;

use crate::error::Result;

pub use cache::HtmlCache;
pub use client::SiteClient;
pub use discovery::{date_from_url, discover_article_urls, scan_search_page, DiscoveredArticle};
pub use throttle::Throttle;

#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<Option<String>>;

    async fn fetch_listing(&self, url: &str) -> Result<Option<String>> {
        self.fetch_page(url).await
    }
}
