use super::manager::BrowserError;
use headless_chrome::Tab;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Anything that can hand back the rendered HTML of a ranking page.
///
/// The run driver only talks to this trait, so tests can feed it fixture pages
/// instead of a live browser.
pub trait PageSource {
    /// Load `url`, give `ready_selector` up to `wait` to appear, then return the DOM.
    ///
    /// Running out of `wait` is not an error: the page is read as it stands,
    /// like an implicit wait that finds nothing.
    fn load_page(&self, url: &str, ready_selector: &str, wait: Duration)
        -> Result<String, BrowserError>;
}

/// High-level scraping utilities for a browser tab
pub struct BrowserScraper {
    tab: Arc<Tab>,
}

impl BrowserScraper {
    /// Create a new scraper with the given tab
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }

    /// Navigate to a URL and wait for page load
    pub fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    /// Poll until an element matching `selector` exists or `timeout` elapses.
    /// A failing evaluation is returned at once as `JavaScriptError`.
    pub fn wait_for_selector_with_timeout(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let start = Instant::now();
        let script = format!(
            r#"document.querySelector('{}') !== null"#,
            selector.replace('\'', "\\'")
        );

        loop {
            let result = self
                .tab
                .evaluate(&script, false)
                .map_err(|e| BrowserError::JavaScriptError(format!("{}: {}", script, e)))?;
            if result.value.and_then(|v| v.as_bool()) == Some(true) {
                return Ok(());
            }

            if start.elapsed() > timeout {
                return Err(BrowserError::Timeout(format!(
                    "Waiting for selector: {}",
                    selector
                )));
            }

            std::thread::sleep(Duration::from_millis(100));
        }
    }

    /// Get the HTML content of the page
    pub fn get_html(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))
    }
}

impl PageSource for BrowserScraper {
    fn load_page(
        &self,
        url: &str,
        ready_selector: &str,
        wait: Duration,
    ) -> Result<String, BrowserError> {
        self.navigate(url)?;
        tolerate_timeout(self.wait_for_selector_with_timeout(ready_selector, wait), url, wait)?;
        self.get_html()
    }
}

/// Outcome of an implicit wait: a timeout is logged and the page read as it
/// stands, any other failure still aborts the load.
fn tolerate_timeout(
    waited: Result<(), BrowserError>,
    url: &str,
    wait: Duration,
) -> Result<(), BrowserError> {
    match waited {
        Err(BrowserError::Timeout(what)) => {
            log::warn!("{} not satisfied after {:?} on {}", what, wait, url);
            Ok(())
        }
        other => other,
    }
}
