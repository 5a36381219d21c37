use crate::models::{Competition, PlayerStatistics};

#[derive(Debug, Clone, Default)]
pub struct StatsQuery {
    pub competition: Option<Competition>,
    pub player: Option<String>,
    pub min_matches: u32,
}

impl StatsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn competition(mut self, competition: Competition) -> Self {
        self.competition = Some(competition);
        self
    }

    pub fn player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn min_matches(mut self, min_matches: u32) -> Self {
        self.min_matches = min_matches;
        self
    }

    pub fn matches(&self, stats: &PlayerStatistics) -> bool {
        if let Some(ref wanted) = self.player {
            if stats.player.to_lowercase() != wanted.trim().to_lowercase() {
                return false;
            }
        }

        let count = match self.competition {
            Some(competition) => match stats.competition(competition) {
                Some(c) => c.count,
                None => return false,
            },
            None => stats.count,
        };

        count >= self.min_matches
    }

    pub fn apply<'a>(&self, stats: &'a [PlayerStatistics]) -> Vec<&'a PlayerStatistics> {
        stats.iter().filter(|s| self.matches(s)).collect()
    }
}
