pub mod sqlite;
pub mod export;

pub use export::export_json;
pub use sqlite::Storage;
