pub mod markup;
pub mod extractor;
pub mod classifier;
pub mod assembler;
pub mod aggregator;
pub mod query;
pub mod pipeline;

pub use extractor::RatingExtractor;
pub use classifier::{ArticleSignals, Classification, CompetitionClassifier, SignalSource};
pub use assembler::{ArticleAssembler, ArticleOutcome, Assembly};
pub use aggregator::Aggregator;
pub use query::StatsQuery;
pub use pipeline::{RunMode, RunReport, ScrapePipeline};
