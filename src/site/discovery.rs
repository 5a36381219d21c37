use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::error::Result;
use crate::site::PageSource;

// Rating articles carry "note" in their slug (notes-du-match, les-notes, ...).
static ARTICLE_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)href="(/(\d{4})/(\d{2})/(\d{2})/[^"]*note[^"]*)""#).expect("article link pattern")
});
static URL_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(\d{4})/(\d{2})/(\d{2})/").expect("url date pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredArticle {
    pub url: String,
    pub date: NaiveDate,
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

pub fn date_from_url(url: &str) -> Option<NaiveDate> {
    let caps = URL_DATE_RE.captures(url)?;
    ymd(&caps[1], &caps[2], &caps[3])
}

pub fn scan_search_page(html: &str, base_url: &str) -> Vec<DiscoveredArticle> {
    ARTICLE_LINK_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let date = ymd(&caps[2], &caps[3], &caps[4])?;
            Some(DiscoveredArticle {
                url: format!("{}{}", base_url.trim_end_matches('/'), &caps[1]),
                date,
            })
        })
        .collect()
}

pub async fn discover_article_urls(
    source: &dyn PageSource,
    base_url: &str,
    season_start: NaiveDate,
    max_pages: u32,
) -> Result<Vec<DiscoveredArticle>> {
    let mut found: Vec<DiscoveredArticle> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for page in 1..=max_pages {
        let url = format!("{}/search?q=note&page={}", base_url.trim_end_matches('/'), page);
        tracing::info!("Scanning search page {}: {}", page, url);

        let html = match source.fetch_listing(&url).await {
            Ok(Some(html)) => html,
            Ok(None) => {
                tracing::warn!("Empty result for search page {}, stopping", page);
                break;
            }
            Err(e) => {
                tracing::warn!("Search page {} failed, stopping: {}", page, e);
                break;
            }
        };

        let links = scan_search_page(&html, base_url);
        if links.is_empty() {
            tracing::info!("No articles on page {}, stopping", page);
            break;
        }

        let mut page_has_recent = false;
        for link in links.into_iter().filter(|l| l.date >= season_start) {
            page_has_recent = true;
            if seen.insert(link.url.clone()) {
                tracing::debug!("Found article: {} ({})", link.url, link.date);
                found.push(link);
            }
        }

        if !page_has_recent && page > 1 {
            tracing::info!("No in-season articles on page {}, stopping", page);
            break;
        }
    }

    found.sort_by(|a, b| b.date.cmp(&a.date));
    tracing::info!("Total articles discovered: {}", found.len());
    Ok(found)
}
