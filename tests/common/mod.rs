//! Shared fixtures for the integration tests
#![allow(dead_code)]

use bilibili_rank_spider::browser::{BrowserConfig, BrowserError, PageSource};
use bilibili_rank_spider::models::{SchemaGroup, CATEGORIES, DEFAULT_BASE_URL};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

pub const VIDEO_PAGE: &str = include_str!("../fixtures/video_rank.html");
pub const FILM_PAGE: &str = include_str!("../fixtures/film_rank.html");
pub const BROKEN_PAGE: &str = include_str!("../fixtures/broken_rank.html");
pub const EMPTY_PAGE: &str = include_str!("../fixtures/empty_rank.html");

/// Address the fixture pages stand in for
pub const PAGE_URL: &str = "https://www.bilibili.com/v/popular/rank/all";

/// Page source backed by in-memory HTML, recording what was asked of it
pub struct FixturePages {
    pages: HashMap<String, String>,
    pub visited: Rc<RefCell<Vec<String>>>,
    pub dropped: Rc<Cell<bool>>,
}

impl FixturePages {
    /// Every registry category served with the fixture matching its group
    pub fn full_site() -> Self {
        let pages = CATEGORIES
            .iter()
            .map(|c| {
                let html = match c.group {
                    SchemaGroup::Video => VIDEO_PAGE,
                    SchemaGroup::Film => FILM_PAGE,
                };
                (c.url(DEFAULT_BASE_URL), html.to_string())
            })
            .collect();

        Self {
            pages,
            visited: Rc::new(RefCell::new(Vec::new())),
            dropped: Rc::new(Cell::new(false)),
        }
    }

    /// Replace (or add) the page served for one category key
    pub fn with_page(mut self, key: &str, html: &str) -> Self {
        self.pages.insert(format!("{}{}", DEFAULT_BASE_URL, key), html.to_string());
        self
    }

    /// Serve `html` at an arbitrary address
    pub fn with_url(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn without_page(mut self, key: &str) -> Self {
        self.pages.remove(&format!("{}{}", DEFAULT_BASE_URL, key));
        self
    }

    /// Opener for `spider::run` that hands over this source and flags the call
    pub fn opener(
        self,
        opened: Rc<Cell<bool>>,
    ) -> impl FnOnce(&BrowserConfig) -> Result<FixturePages, BrowserError> {
        move |_config| {
            opened.set(true);
            Ok(self)
        }
    }
}

impl PageSource for FixturePages {
    fn load_page(
        &self,
        url: &str,
        _ready_selector: &str,
        _wait: Duration,
    ) -> Result<String, BrowserError> {
        self.visited.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| BrowserError::NavigationError(format!("no fixture for {}", url)))
    }
}

impl Drop for FixturePages {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}
