use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{ArticleRecord, PlayerStatistics};

pub fn export_json<P: AsRef<Path>>(
    dir: P,
    articles: &[ArticleRecord],
    stats: &[PlayerStatistics],
) -> Result<(PathBuf, PathBuf)> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let articles_path = dir.join("articles.json");
    std::fs::write(&articles_path, serde_json::to_string_pretty(articles)?)?;

    let stats_path = dir.join("stats.json");
    std::fs::write(&stats_path, serde_json::to_string_pretty(stats)?)?;

    tracing::info!(
        "Exported {} articles and {} players to {}",
        articles.len(),
        stats.len(),
        dir.display()
    );

    Ok((articles_path, stats_path))
}
