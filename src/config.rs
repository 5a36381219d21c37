use crate::error::{Error, Result};
use crate::models::Competition;
use chrono::NaiveDate;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub database_path: String,
    pub cache_dir: String,
    pub season_start: NaiveDate,
    pub max_search_pages: u32,
    pub request_delay_ms: u64,
    pub fetch_retries: u32,
    pub concurrency_limit: usize,
    pub default_competition: Competition,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://lejournaldureal.fr".to_string(),
            database_path: "player_ratings.db".to_string(),
            cache_dir: "cache".to_string(),
            season_start: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap_or_default(),
            max_search_pages: 20,
            request_delay_ms: 1500,
            fetch_retries: 3,
            concurrency_limit: 4,
            default_competition: Competition::Liga,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url = env::var("SITE_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let database_path = env::var("DATABASE_PATH").unwrap_or(defaults.database_path);

        let cache_dir = env::var("CACHE_DIR").unwrap_or(defaults.cache_dir);

        let season_start = match env::var("SEASON_START") {
            Ok(v) => NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                .map_err(|e| Error::Config(format!("SEASON_START {:?}: {}", v, e)))?,
            Err(_) => defaults.season_start,
        };

        let default_competition = match env::var("DEFAULT_COMPETITION") {
            Ok(v) => Competition::from_str(&v)
                .map_err(|_| Error::Config(format!("DEFAULT_COMPETITION {:?} is not a known label", v)))?,
            Err(_) => defaults.default_competition,
        };

        Ok(Self {
            base_url,
            database_path,
            cache_dir,
            season_start,
            max_search_pages: parse_var("MAX_SEARCH_PAGES", defaults.max_search_pages)?,
            request_delay_ms: parse_var("REQUEST_DELAY_MS", defaults.request_delay_ms)?,
            fetch_retries: parse_var("FETCH_RETRIES", defaults.fetch_retries)?,
            concurrency_limit: parse_var("CONCURRENCY_LIMIT", defaults.concurrency_limit)?,
            default_competition,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{} {:?}: {}", name, v, e))),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub season_start: NaiveDate,
    pub max_search_pages: u32,
    pub concurrency_limit: usize,
    pub default_competition: Competition,
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            season_start: config.season_start,
            max_search_pages: config.max_search_pages,
            concurrency_limit: config.concurrency_limit,
            default_competition: config.default_competition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_config_follows_config() {
        let config = Config {
            concurrency_limit: 2,
            default_competition: Competition::Unknown,
            ..Config::default()
        };
        let pipeline = PipelineConfig::from(&config);
        assert_eq!(pipeline.concurrency_limit, 2);
        assert_eq!(pipeline.default_competition, Competition::Unknown);
        assert_eq!(pipeline.season_start, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
    }

    #[test]
    fn parse_var_reads_defaults_and_values() {
        env::remove_var("PLAYER_RATINGS_TEST_UNSET");
        assert_eq!(parse_var("PLAYER_RATINGS_TEST_UNSET", 7u32).unwrap(), 7);

        env::set_var("PLAYER_RATINGS_TEST_GOOD", " 12 ");
        assert_eq!(parse_var("PLAYER_RATINGS_TEST_GOOD", 7u32).unwrap(), 12);
        env::remove_var("PLAYER_RATINGS_TEST_GOOD");
    }

    #[test]
    fn unparsable_value_is_a_config_error() {
        env::set_var("PLAYER_RATINGS_TEST_BAD", "abc");
        let err = parse_var("PLAYER_RATINGS_TEST_BAD", 3u32).unwrap_err();
        env::remove_var("PLAYER_RATINGS_TEST_BAD");

        match err {
            Error::Config(message) => {
                assert!(message.contains("PLAYER_RATINGS_TEST_BAD"));
                assert!(message.contains("\"abc\""));
            }
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn from_env_rejects_bad_values() {
        env::set_var("FETCH_RETRIES", "three");
        let err = Config::from_env().unwrap_err();
        env::remove_var("FETCH_RETRIES");
        assert!(matches!(err, Error::Config(ref m) if m.starts_with("FETCH_RETRIES")));

        env::set_var("SEASON_START", "2025-13-01");
        let err = Config::from_env().unwrap_err();
        env::remove_var("SEASON_START");
        assert!(matches!(err, Error::Config(ref m) if m.starts_with("SEASON_START")));
    }
}
