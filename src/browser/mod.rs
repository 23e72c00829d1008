//! Browser automation for the ranking pages
//!
//! The ranking lists are rendered client-side, so pages are loaded in headless
//! Chrome and the rendered DOM is handed to the extractor.
//!
//! # Example
//!
//! ```no_run
//! use bilibili_rank_spider::browser::{BrowserConfig, BrowserSession, PageSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BrowserConfig::default();
//! let session = BrowserSession::open(&config)?;
//!
//! let html = session.load_page(
//!     "https://www.bilibili.com/v/popular/rank/all",
//!     ".rank-item",
//!     config.implicit_wait(),
//! )?;
//!
//! println!("Extracted {} bytes of HTML", html.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod scraper;
pub mod session;

// Re-export main types for convenience
pub use config::BrowserConfig;
pub use manager::{BrowserError, BrowserManager};
pub use scraper::{BrowserScraper, PageSource};
pub use session::BrowserSession;
