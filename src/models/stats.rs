use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::competition::Competition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionStats {
    pub mean: f64,
    pub count: u32,
    pub ratings: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub date: NaiveDate,
    pub opponent: Option<String>,
    pub competition: Competition,
    pub rating: u8,
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub player: String,
    pub mean: f64,
    pub count: u32,
    pub min: u8,
    pub max: u8,
    pub std_dev: f64,
    pub unrated_appearances: u32,
    pub by_competition: BTreeMap<Competition, CompetitionStats>,
    pub matches: Vec<MatchDetail>,
}

impl PlayerStatistics {
    pub fn competition(&self, competition: Competition) -> Option<&CompetitionStats> {
        self.by_competition.get(&competition)
    }
}
