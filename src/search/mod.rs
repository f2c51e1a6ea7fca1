// Search APIs (SerpAPI)

pub mod serpapi;

pub use serpapi::{SearchError, SearchResult, SerpApiClient};
