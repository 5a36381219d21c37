use std::sync::Arc;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio::sync::Semaphore;

use crate::analysis::aggregator::Aggregator;
use crate::analysis::assembler::ArticleAssembler;
use crate::analysis::classifier::CompetitionClassifier;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{ArticleRecord, PlayerStatistics, RawPage};
use crate::site::{discover_article_urls, DiscoveredArticle, PageSource};
use crate::storage::Storage;
use crate::taxonomy::NameTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Incremental,
    Full,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub discovered: usize,
    pub fetched: usize,
    pub stored: usize,
    pub skipped: usize,
    pub defects: usize,
    pub players: usize,
}

pub struct ScrapePipeline {
    source: Arc<dyn PageSource>,
    base_url: String,
    assembler: ArticleAssembler,
    aggregator: Aggregator,
    storage: Storage,
    config: PipelineConfig,
}

impl ScrapePipeline {
    pub fn new(
        source: impl PageSource + 'static,
        base_url: impl Into<String>,
        storage: Storage,
        config: PipelineConfig,
    ) -> Result<Self> {
        let assembler = ArticleAssembler::new(
            NameTable::builtin()?,
            CompetitionClassifier::with_fallback(config.default_competition),
        );
        Ok(Self::with_assembler(source, base_url, assembler, storage, config))
    }

    pub fn with_assembler(
        source: impl PageSource + 'static,
        base_url: impl Into<String>,
        assembler: ArticleAssembler,
        storage: Storage,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source: Arc::new(source),
            base_url: base_url.into(),
            assembler,
            aggregator: Aggregator::new(),
            storage,
            config,
        }
    }

    pub fn into_storage(self) -> Storage {
        self.storage
    }

    pub async fn run(&mut self, mode: RunMode) -> Result<RunReport> {
        let mut report = RunReport::default();

        // Step 1: Find rating articles for the season
        tracing::info!("Discovering rating articles since {}", self.config.season_start);
        let discovered = discover_article_urls(
            self.source.as_ref(),
            &self.base_url,
            self.config.season_start,
            self.config.max_search_pages,
        )
        .await?;
        report.discovered = discovered.len();

        // Step 2: Drop what is already stored
        let pending: Vec<DiscoveredArticle> = match mode {
            RunMode::Full => discovered,
            RunMode::Incremental => {
                let known = self.storage.article_urls()?;
                discovered
                    .into_iter()
                    .filter(|a| !known.contains(&a.url))
                    .collect()
            }
        };
        tracing::info!("{} articles to fetch ({:?} mode)", pending.len(), mode);

        // Step 3: Fetch pages concurrently
        let pages = self.fetch_pages(&pending).await;
        report.fetched = pages.len();
        report.skipped = pending.len() - pages.len();

        // Step 4: Assemble records
        let mut records: Vec<ArticleRecord> = Vec::new();
        for page in &pages {
            let assembly = self.assembler.assemble(page);
            report.defects += assembly.defects.len();
            match assembly.into_record() {
                Some(record) => {
                    tracing::info!(
                        "{} ({}, {}): {} ratings",
                        record.title,
                        record.date,
                        record.competition,
                        record.ratings.len()
                    );
                    records.push(record);
                }
                None => {
                    tracing::debug!("No ratings found in {}, discarding", page.url);
                    report.skipped += 1;
                }
            }
        }

        // Step 5: Persist records
        report.stored = self.storage.save_articles(&records)?;
        tracing::info!("Stored {} article records", report.stored);

        // Step 6: Recompute statistics from everything stored
        let stats = self.rebuild_stats()?;
        report.players = stats.len();

        Ok(report)
    }

    pub fn rebuild_stats(&mut self) -> Result<Vec<PlayerStatistics>> {
        let articles = self.storage.load_articles()?;
        let stats = self.aggregator.aggregate(&articles);
        self.storage.replace_stats(&stats)?;
        tracing::info!(
            "Statistics rebuilt for {} players from {} articles",
            stats.len(),
            articles.len()
        );
        Ok(stats)
    }

    async fn fetch_pages(&self, articles: &[DiscoveredArticle]) -> Vec<RawPage> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit.max(1)));

        let pb = ProgressBar::new(articles.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} articles")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut page_futures = Vec::new();

        for article in articles {
            let source = self.source.clone();
            let sem = semaphore.clone();
            let url = article.url.clone();
            let date = article.date;
            let pb_clone = pb.clone();

            page_futures.push(async move {
                let _permit = sem.acquire().await.ok()?;

                let page = match source.fetch_page(&url).await {
                    Ok(Some(html)) => Some(RawPage {
                        url,
                        date,
                        title: None,
                        html,
                    }),
                    Ok(None) => {
                        tracing::warn!("No content for {}", url);
                        None
                    }
                    Err(e) => {
                        tracing::warn!("Failed to fetch {}: {}", url, e);
                        None
                    }
                };

                pb_clone.inc(1);
                page
            });
        }

        let results = join_all(page_futures).await;
        pb.finish_with_message("Fetched all articles");

        results.into_iter().flatten().collect()
    }
}
