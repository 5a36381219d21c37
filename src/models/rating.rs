use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingStatement {
    pub raw_name: String,
    pub rating: u8,
    pub substituted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerIdentity {
    Player(String),
    Coach,
}

impl PlayerIdentity {
    pub fn player_name(&self) -> Option<&str> {
        match self {
            PlayerIdentity::Player(name) => Some(name),
            PlayerIdentity::Coach => None,
        }
    }
}
