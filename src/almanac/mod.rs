// src/almanac/mod.rs
pub mod client;
pub mod index;
pub mod models;
pub mod session;

pub use client::{BrowserlessFetcher, CachedFetcher, HttpFetcher, PageFetcher};
pub use models::{YearLink, YearPagePattern};
pub use session::FetchSession;
