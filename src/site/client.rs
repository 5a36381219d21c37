use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::site::cache::HtmlCache;
use crate::site::throttle::Throttle;
use crate::site::PageSource;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct SiteClient {
    client: Client,
    throttle: Throttle,
    cache: Option<HtmlCache>,
    read_cache: bool,
    retries: u32,
    retry_delay: Duration,
    base_url: String,
}

impl SiteClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("fr-FR,fr;q=0.9"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(15))
            .build()?;

        let delay = Duration::from_millis(config.request_delay_ms);

        Ok(Self {
            client,
            throttle: Throttle::new(delay),
            cache: None,
            read_cache: false,
            retries: config.fetch_retries.max(1),
            retry_delay: delay,
            base_url: config.base_url.clone(),
        })
    }

    pub fn with_cache(mut self, cache: HtmlCache, read: bool) -> Self {
        self.cache = Some(cache);
        self.read_cache = read;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_once(&self, url: &str) -> Result<Option<String>> {
        self.throttle.wait().await;
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::warn!("404 Not Found: {}", url);
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Error::Fetch(format!("HTTP {} for {}", response.status(), url)));
        }

        let body = response.text().await?;
        Ok((!body.is_empty()).then_some(body))
    }

    async fn get_with_retry(&self, url: &str) -> Result<Option<String>> {
        with_retries(self.retries, self.retry_delay, url, move || self.get_once(url)).await
    }
}

async fn with_retries<T, F, Fut>(retries: u32, delay: Duration, url: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < retries => {
                tracing::warn!("Fetch failed for {} (attempt {}/{}): {}", url, attempt, retries, e);
                tokio::time::sleep(delay * attempt).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!("Giving up on {} after {} attempts: {}", url, attempt, e);
                return Err(e);
            }
        }
    }
}

#[async_trait]
impl PageSource for SiteClient {
    async fn fetch_page(&self, url: &str) -> Result<Option<String>> {
        if let (Some(cache), true) = (&self.cache, self.read_cache) {
            if let Some(html) = cache.get(url).await? {
                tracing::debug!("Cache hit: {}", url);
                return Ok(Some(html));
            }
        }

        let page = self.get_with_retry(url).await?;

        if let (Some(cache), Some(html)) = (&self.cache, &page) {
            cache.put(url, html).await?;
        }

        Ok(page)
    }

    async fn fetch_listing(&self, url: &str) -> Result<Option<String>> {
        self.get_with_retry(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const NOT_FOUND: &str = "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
    const UNAVAILABLE: &str =
        "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
    const RATED: &str =
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 11\r\nConnection: close\r\n\r\n<p>note</p>";

    // Answers each connection with the next canned response, one per request.
    async fn serve(responses: Vec<&'static str>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> SiteClient {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        SiteClient::new(&Config {
            base_url: base_url.to_string(),
            request_delay_ms: 10,
            fetch_retries: 3,
            ..Config::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn retries_transient_errors_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retries(3, Duration::from_millis(1), "https://site.test/a", move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(Error::Fetch("HTTP 503".to_string()))
            } else {
                Ok("page")
            }
        })
        .await;
        assert_eq!(result.unwrap(), "page");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_last_attempt() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<()> =
            with_retries(3, Duration::from_millis(1), "https://site.test/a", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::Fetch("HTTP 500".to_string()))
            })
            .await;
        assert!(matches!(result, Err(Error::Fetch(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<()> =
            with_retries(3, Duration::from_millis(1), "https://site.test/a", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::Config("bad".to_string()))
            })
            .await;
        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_page_is_none() {
        let base = serve(vec![NOT_FOUND]).await;
        let client = client(&base);
        let page = client.fetch_page(&format!("{base}/2025/10/26/gone-notes")).await.unwrap();
        assert_eq!(page, None);
    }

    #[tokio::test]
    async fn server_error_is_retried() {
        let base = serve(vec![UNAVAILABLE, RATED]).await;
        let client = client(&base);
        let page = client.fetch_listing(&format!("{base}/search?q=note&page=1")).await.unwrap();
        assert_eq!(page.as_deref(), Some("<p>note</p>"));
    }
}
