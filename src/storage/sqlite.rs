use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::models::{ArticleRecord, Competition, PlayerStatistics};

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.init_db()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.init_db()?;
        Ok(storage)
    }

    fn init_db(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                url TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                match_date TEXT NOT NULL,
                competition TEXT NOT NULL,
                opponent TEXT,
                ratings_json TEXT NOT NULL,
                unrated_json TEXT NOT NULL,
                scraped_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS player_stats (
                player TEXT PRIMARY KEY,
                mean REAL NOT NULL,
                match_count INTEGER NOT NULL,
                stats_json TEXT NOT NULL,
                computed_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_articles_date ON articles(match_date);
            CREATE INDEX IF NOT EXISTS idx_articles_competition ON articles(competition);
            "#,
        )?;

        Ok(())
    }

    pub fn upsert_article(&self, article: &ArticleRecord) -> Result<()> {
        upsert(&self.conn, article)
    }

    pub fn save_articles(&mut self, articles: &[ArticleRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        for article in articles {
            upsert(&tx, article)?;
        }
        tx.commit()?;
        Ok(articles.len())
    }

    pub fn article_urls(&self) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT url FROM articles")?;
        let urls = stmt.query_map([], |row| row.get(0))?;
        urls.collect::<std::result::Result<HashSet<_>, _>>().map_err(Into::into)
    }

    pub fn load_articles(&self) -> Result<Vec<ArticleRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT url, title, match_date, competition, opponent, ratings_json, unrated_json
            FROM articles
            ORDER BY match_date ASC, url ASC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut articles = Vec::new();
        for row in rows {
            let (url, title, date_str, competition_str, opponent, ratings_json, unrated_json) = row?;

            let date = match NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
                Ok(date) => date,
                Err(e) => {
                    tracing::warn!("Skipping {} with unreadable date {:?}: {}", url, date_str, e);
                    continue;
                }
            };
            let competition = competition_str.parse().unwrap_or_else(|_| {
                tracing::warn!("Unknown stored competition {:?} for {}", competition_str, url);
                Competition::Unknown
            });

            articles.push(ArticleRecord {
                url,
                title,
                date,
                competition,
                opponent,
                ratings: serde_json::from_str(&ratings_json)?,
                unrated: serde_json::from_str(&unrated_json)?,
            });
        }

        Ok(articles)
    }

    pub fn replace_stats(&mut self, stats: &[PlayerStatistics]) -> Result<()> {
        let computed_at = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM player_stats", [])?;
        for player in stats {
            let stats_json = serde_json::to_string(player)?;
            tx.execute(
                r#"
                INSERT INTO player_stats (player, mean, match_count, stats_json, computed_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![player.player, player.mean, player.count, stats_json, computed_at],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    pub fn load_stats(&self) -> Result<Vec<PlayerStatistics>> {
        let mut stmt = self.conn.prepare(
            "SELECT stats_json FROM player_stats ORDER BY mean DESC, match_count DESC, player ASC",
        )?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut stats = Vec::new();
        for json in rows {
            stats.push(serde_json::from_str(&json?)?);
        }
        Ok(stats)
    }

    pub fn competitions(&self) -> Result<Vec<(Competition, usize)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT competition, COUNT(*) FROM articles GROUP BY competition")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

        let mut found = Vec::new();
        for row in rows {
            let (label, count) = row?;
            match label.parse::<Competition>() {
                Ok(competition) => found.push((competition, count as usize)),
                Err(e) => tracing::warn!("{}", e),
            }
        }
        found.sort();
        Ok(found)
    }

    pub fn article_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn upsert(conn: &Connection, article: &ArticleRecord) -> Result<()> {
    let ratings_json = serde_json::to_string(&article.ratings)?;
    let unrated_json = serde_json::to_string(&article.unrated)?;

    conn.execute(
        r#"
        INSERT INTO articles (url, title, match_date, competition, opponent, ratings_json, unrated_json, scraped_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT(url) DO UPDATE SET
            title = excluded.title,
            match_date = excluded.match_date,
            competition = excluded.competition,
            opponent = excluded.opponent,
            ratings_json = excluded.ratings_json,
            unrated_json = excluded.unrated_json,
            scraped_at = excluded.scraped_at
        "#,
        params![
            article.url,
            article.title,
            article.date.format("%Y-%m-%d").to_string(),
            article.competition.label(),
            article.opponent,
            ratings_json,
            unrated_json,
            Utc::now().to_rfc3339(),
        ],
    )?;

    Ok(())
}
