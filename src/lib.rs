// Library interface for bilibili_rank_spider
// The binary and the integration tests both drive the spider through here

pub mod browser;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod logging;
pub mod models;
pub mod spider;
pub mod store;

pub use error::SpiderError;
