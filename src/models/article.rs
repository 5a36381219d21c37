use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::competition::Competition;

#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub date: NaiveDate,
    pub title: Option<String>,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub player: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub url: String,
    pub title: String,
    pub date: NaiveDate,
    pub competition: Competition,
    pub opponent: Option<String>,
    pub ratings: Vec<PlayerRating>,
    #[serde(default)]
    pub unrated: Vec<String>,
}

impl ArticleRecord {
    pub fn rating_for(&self, player: &str) -> Option<u8> {
        self.ratings
            .iter()
            .find(|r| r.player == player)
            .map(|r| r.rating)
    }
}
