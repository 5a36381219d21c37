use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Competition {
    #[serde(rename = "Liga")]
    Liga,
    #[serde(rename = "Ligue des Champions")]
    ChampionsLeague,
    #[serde(rename = "Coupe du Roi")]
    CopaDelRey,
    #[serde(rename = "Supercoupe d'Espagne")]
    SuperCup,
    #[serde(rename = "Amical")]
    Friendly,
    #[serde(rename = "Coupe Intercontinentale")]
    Intercontinental,
    #[serde(rename = "Inconnue")]
    Unknown,
}

impl Competition {
    pub const ALL: [Competition; 7] = [
        Competition::Liga,
        Competition::ChampionsLeague,
        Competition::CopaDelRey,
        Competition::SuperCup,
        Competition::Friendly,
        Competition::Intercontinental,
        Competition::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Competition::Liga => "Liga",
            Competition::ChampionsLeague => "Ligue des Champions",
            Competition::CopaDelRey => "Coupe du Roi",
            Competition::SuperCup => "Supercoupe d'Espagne",
            Competition::Friendly => "Amical",
            Competition::Intercontinental => "Coupe Intercontinentale",
            Competition::Unknown => "Inconnue",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            Competition::Liga => "liga",
            Competition::ChampionsLeague => "champions-league",
            Competition::CopaDelRey => "copa-del-rey",
            Competition::SuperCup => "super-cup",
            Competition::Friendly => "friendly",
            Competition::Intercontinental => "intercontinental",
            Competition::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Competition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Competition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Competition::ALL
            .iter()
            .find(|c| c.label().to_lowercase() == wanted || c.slug() == wanted)
            .copied()
            .ok_or_else(|| Error::UnknownCompetition(s.to_string()))
    }
}
