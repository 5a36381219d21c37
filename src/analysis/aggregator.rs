use std::collections::BTreeMap;

use crate::models::{ArticleRecord, Competition, CompetitionStats, MatchDetail, PlayerStatistics};

pub struct Aggregator;

struct Appearance<'a> {
    article: &'a ArticleRecord,
    rating: u8,
}

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, articles: &[ArticleRecord]) -> Vec<PlayerStatistics> {
        let mut appearances: BTreeMap<&str, Vec<Appearance<'_>>> = BTreeMap::new();
        let mut unrated: BTreeMap<&str, u32> = BTreeMap::new();

        for article in articles {
            for rating in &article.ratings {
                appearances
                    .entry(rating.player.as_str())
                    .or_default()
                    .push(Appearance {
                        article,
                        rating: rating.rating,
                    });
            }
            for name in &article.unrated {
                *unrated.entry(name.as_str()).or_insert(0) += 1;
            }
        }

        let mut stats: Vec<PlayerStatistics> = appearances
            .into_iter()
            .map(|(player, apps)| {
                let unrated = unrated.get(player).copied().unwrap_or(0);
                self.player_statistics(player, apps, unrated)
            })
            .collect();

        stats.sort_by(|a, b| {
            b.mean
                .total_cmp(&a.mean)
                .then_with(|| b.count.cmp(&a.count))
                .then_with(|| a.player.cmp(&b.player))
        });

        stats
    }

    fn player_statistics(
        &self,
        player: &str,
        mut apps: Vec<Appearance<'_>>,
        unrated_appearances: u32,
    ) -> PlayerStatistics {
        // Stable: same-date matches keep their input order.
        apps.sort_by_key(|a| a.article.date);

        let ratings: Vec<u8> = apps.iter().map(|a| a.rating).collect();

        let mut by_competition: BTreeMap<Competition, Vec<u8>> = BTreeMap::new();
        for app in &apps {
            by_competition
                .entry(app.article.competition)
                .or_default()
                .push(app.rating);
        }

        let matches = apps
            .iter()
            .map(|a| MatchDetail {
                date: a.article.date,
                opponent: a.article.opponent.clone(),
                competition: a.article.competition,
                rating: a.rating,
                url: a.article.url.clone(),
                title: a.article.title.clone(),
            })
            .collect();

        PlayerStatistics {
            player: player.to_string(),
            mean: mean(&ratings),
            count: ratings.len() as u32,
            min: ratings.iter().copied().min().unwrap_or(0),
            max: ratings.iter().copied().max().unwrap_or(0),
            std_dev: sample_std_dev(&ratings),
            unrated_appearances,
            by_competition: by_competition
                .into_iter()
                .map(|(competition, ratings)| {
                    let stats = CompetitionStats {
                        mean: mean(&ratings),
                        count: ratings.len() as u32,
                        ratings,
                    };
                    (competition, stats)
                })
                .collect(),
            matches,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

// Integer sums keep the result independent of input order.
fn mean(ratings: &[u8]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u64 = ratings.iter().map(|&r| r as u64).sum();
    sum as f64 / ratings.len() as f64
}

fn sample_std_dev(ratings: &[u8]) -> f64 {
    let n = ratings.len() as u64;
    if n < 2 {
        return 0.0;
    }
    let sum: u64 = ratings.iter().map(|&r| r as u64).sum();
    let sum_sq: u64 = ratings.iter().map(|&r| (r as u64) * (r as u64)).sum();
    let numerator = (n * sum_sq - sum * sum) as f64;
    (numerator / (n * (n - 1)) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerRating;
    use chrono::NaiveDate;

    fn article(url: &str, day: u32, competition: Competition, ratings: &[(&str, u8)]) -> ArticleRecord {
        ArticleRecord {
            url: url.to_string(),
            title: format!("Article {url}"),
            date: NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
            competition,
            opponent: Some("Getafe".to_string()),
            ratings: ratings
                .iter()
                .map(|(p, r)| PlayerRating {
                    player: p.to_string(),
                    rating: *r,
                })
                .collect(),
            unrated: Vec::new(),
        }
    }

    #[test]
    fn averages_across_articles() {
        let articles = vec![
            article("a", 1, Competition::Liga, &[("Vinicius Jr", 8)]),
            article("b", 8, Competition::Liga, &[("Vinicius Jr", 6)]),
            article("c", 15, Competition::Liga, &[("Vinicius Jr", 7)]),
        ];
        let stats = Aggregator::new().aggregate(&articles);
        assert_eq!(stats.len(), 1);
        let vini = &stats[0];
        assert_eq!(vini.mean, 7.0);
        assert_eq!(vini.count, 3);
        assert_eq!((vini.min, vini.max), (6, 8));
        assert!((vini.std_dev - 1.0).abs() < 1e-9);
        let liga = vini.competition(Competition::Liga).unwrap();
        assert_eq!(liga.mean, 7.0);
        assert_eq!(liga.count, 3);
    }

    #[test]
    fn counts_are_consistent_per_competition() {
        let articles = vec![
            article("a", 3, Competition::ChampionsLeague, &[("Arda Güler", 7), ("Dean Huijsen", 6)]),
            article("b", 1, Competition::Liga, &[("Arda Güler", 5)]),
            article("c", 20, Competition::CopaDelRey, &[("Arda Güler", 9)]),
        ];
        let stats = Aggregator::new().aggregate(&articles);
        let arda = stats.iter().find(|s| s.player == "Arda Güler").unwrap();

        let per_competition: u32 = arda.by_competition.values().map(|c| c.count).sum();
        assert_eq!(arda.count, per_competition);
        assert_eq!(arda.count as usize, arda.matches.len());
        let detail_mean =
            arda.matches.iter().map(|m| m.rating as f64).sum::<f64>() / arda.matches.len() as f64;
        assert!((arda.mean - detail_mean).abs() < 1e-9);
    }

    #[test]
    fn details_sorted_by_date_stable_on_ties() {
        let articles = vec![
            article("late", 20, Competition::Liga, &[("Rodrygo", 5)]),
            article("tie-first", 10, Competition::Liga, &[("Rodrygo", 6)]),
            article("tie-second", 10, Competition::Friendly, &[("Rodrygo", 7)]),
            article("early", 2, Competition::Liga, &[("Rodrygo", 8)]),
        ];
        let stats = Aggregator::new().aggregate(&articles);
        let urls: Vec<&str> = stats[0].matches.iter().map(|m| m.url.as_str()).collect();
        assert_eq!(urls, vec!["early", "tie-first", "tie-second", "late"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(Aggregator::new().aggregate(&[]).is_empty());
    }

    #[test]
    fn unrated_only_players_are_not_emitted() {
        let mut record = article("a", 1, Competition::Liga, &[("Thibaut Courtois", 7)]);
        record.unrated = vec!["Endrick Felipe".to_string(), "Thibaut Courtois".to_string()];
        let stats = Aggregator::new().aggregate(&[record]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].player, "Thibaut Courtois");
        assert_eq!(stats[0].unrated_appearances, 1);
    }

    #[test]
    fn ordered_by_mean_then_count_then_name() {
        let articles = vec![
            article("a", 1, Competition::Liga, &[("B", 7), ("A", 7), ("C", 9)]),
            article("b", 2, Competition::Liga, &[("B", 7)]),
        ];
        let names: Vec<String> = Aggregator::new()
            .aggregate(&articles)
            .into_iter()
            .map(|s| s.player)
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }
}
