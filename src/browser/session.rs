use super::config::BrowserConfig;
use super::manager::{BrowserError, BrowserManager};
use super::scraper::{BrowserScraper, PageSource};
use std::time::Duration;

/// A launched browser with one working tab, held for the length of a run.
///
/// Dropping the session drops the owned `Browser`, which kills the Chrome
/// process. The tab handle itself closes nothing; the tab dies with the process.
pub struct BrowserSession {
    scraper: BrowserScraper,
    // owns the Chrome process
    _browser: BrowserManager,
}

impl BrowserSession {
    pub fn open(config: &BrowserConfig) -> Result<Self, BrowserError> {
        let manager = BrowserManager::new(config.clone())?;
        let tab = manager.new_tab()?;
        log::info!(
            "Browser session opened ({}x{}, headless: {})",
            config.window_size.0,
            config.window_size.1,
            config.headless
        );

        Ok(Self {
            scraper: BrowserScraper::new(tab),
            _browser: manager,
        })
    }
}

impl PageSource for BrowserSession {
    fn load_page(
        &self,
        url: &str,
        ready_selector: &str,
        wait: Duration,
    ) -> Result<String, BrowserError> {
        self.scraper.load_page(url, ready_selector, wait)
    }
}

impl Drop for BrowserSession {
    // Logs only; the process is killed when `_browser` drops after this.
    fn drop(&mut self) {
        log::debug!("Shutting down browser session");
    }
}
