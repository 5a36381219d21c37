pub mod config;
pub mod error;
pub mod models;
pub mod taxonomy;
pub mod analysis;
pub mod site;
pub mod storage;

pub use config::{Config, PipelineConfig};
pub use error::{Error, ExtractionDefect, Result};
pub use analysis::{
    Aggregator, ArticleAssembler, CompetitionClassifier, RatingExtractor, RunMode, RunReport,
    ScrapePipeline, StatsQuery,
};
pub use site::{HtmlCache, PageSource, SiteClient};
pub use storage::{export_json, Storage};
pub use taxonomy::NameTable;
