pub mod competition;
pub mod rating;
pub mod article;
pub mod stats;

pub use competition::*;
pub use rating::*;
pub use article::*;
pub use stats::*;
