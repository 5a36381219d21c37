use std::collections::HashSet;

use crate::analysis::classifier::{ArticleSignals, CompetitionClassifier, SignalSource};
use crate::analysis::extractor::RatingExtractor;
use crate::analysis::markup;
use crate::error::ExtractionDefect;
use crate::models::{ArticleRecord, PlayerIdentity, PlayerRating, RawPage};
use crate::taxonomy::NameTable;

#[derive(Debug, Clone, PartialEq)]
pub enum ArticleOutcome {
    Rated {
        record: ArticleRecord,
        classified_by: SignalSource,
    },
    NotRatings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub outcome: ArticleOutcome,
    pub defects: Vec<ExtractionDefect>,
}

impl Assembly {
    pub fn record(&self) -> Option<&ArticleRecord> {
        match &self.outcome {
            ArticleOutcome::Rated { record, .. } => Some(record),
            ArticleOutcome::NotRatings => None,
        }
    }

    pub fn into_record(self) -> Option<ArticleRecord> {
        match self.outcome {
            ArticleOutcome::Rated { record, .. } => Some(record),
            ArticleOutcome::NotRatings => None,
        }
    }
}

pub struct ArticleAssembler {
    extractor: RatingExtractor,
    names: NameTable,
    classifier: CompetitionClassifier,
}

impl ArticleAssembler {
    pub fn new(names: NameTable, classifier: CompetitionClassifier) -> Self {
        Self::with_extractor(RatingExtractor::new(), names, classifier)
    }

    pub fn with_extractor(
        extractor: RatingExtractor,
        names: NameTable,
        classifier: CompetitionClassifier,
    ) -> Self {
        Self {
            extractor,
            names,
            classifier,
        }
    }

    pub fn assemble(&self, page: &RawPage) -> Assembly {
        let mut defects = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut ratings = Vec::new();

        for statement in self.extractor.extract(&page.html) {
            let statement = match statement {
                Ok(statement) => statement,
                Err(defect) => {
                    tracing::warn!("Extraction defect in {}: {}", page.url, defect);
                    defects.push(defect);
                    continue;
                }
            };

            let player = match self.names.canonicalize(&statement.raw_name) {
                PlayerIdentity::Coach => {
                    tracing::debug!("Skipping coach {} in {}", statement.raw_name, page.url);
                    continue;
                }
                PlayerIdentity::Player(name) if name.is_empty() => continue,
                PlayerIdentity::Player(name) => name,
            };

            // First mention wins; later corrections are dropped.
            if !seen.insert(player.clone()) {
                tracing::debug!("Duplicate rating for {} in {}, keeping first", player, page.url);
                continue;
            }

            ratings.push(PlayerRating {
                player,
                rating: statement.rating,
            });
        }

        if ratings.is_empty() {
            tracing::debug!("No player ratings in {}", page.url);
            return Assembly {
                outcome: ArticleOutcome::NotRatings,
                defects,
            };
        }

        let unrated = self
            .extractor
            .extract_unrated(&page.html)
            .into_iter()
            .filter_map(|raw| match self.names.canonicalize(&raw) {
                PlayerIdentity::Player(name) if !name.is_empty() => Some(name),
                _ => None,
            })
            .filter(|name| seen.insert(name.clone()))
            .collect();

        let title = page
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| markup::extract_title(&page.html));
        let tags = markup::extract_tags(&page.html);
        let image = markup::og_image(&page.html);

        let classification = self.classifier.classify(&ArticleSignals {
            title: &title,
            tags: tags.as_deref(),
            image: image.as_deref(),
            body: markup::article_body(&page.html),
        });
        tracing::debug!(
            "{} classified as {} from {}",
            page.url,
            classification.competition,
            classification.source
        );

        let opponent = markup::extract_opponent(&title);

        Assembly {
            outcome: ArticleOutcome::Rated {
                record: ArticleRecord {
                    url: page.url.clone(),
                    title,
                    date: page.date,
                    competition: classification.competition,
                    opponent,
                    ratings,
                    unrated,
                },
                classified_by: classification.source,
            },
            defects,
        }
    }
}
