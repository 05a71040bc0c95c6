// src/extractors/mod.rs
pub mod champion;
pub mod page;
pub mod record;
pub mod sections;
pub mod standings;
pub mod tables;

// Re-export key extraction types for convenience
pub use champion::ChampionExtractor;
pub use page::{PageExtractor, PageOutcome};
pub use record::YearlyStats;
pub use sections::ContentSection;
