//! Run driver: open a browser, fetch the selected categories, save, close.

use crate::browser::{BrowserConfig, BrowserError, PageSource};
use crate::config::Config;
use crate::error::SpiderError;
use crate::export::{self, SaveOutcome};
use crate::extract::{self, RANK_ITEM};
use crate::models::{Category, RankRow, SchemaGroup, CATEGORIES};
use crate::store::RankStore;
use log::info;
use std::time::Duration;

/// Which ranking groups a run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Video,
    Film,
    All,
}

/// Answer to the type prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Run(Selection),
    Quit,
}

pub const PROMPT: &str = "Please select type (0: video, 1: film, 2: all, 3: quit): ";

impl Selection {
    pub fn groups(self) -> &'static [SchemaGroup] {
        match self {
            Selection::Video => &[SchemaGroup::Video],
            Selection::Film => &[SchemaGroup::Film],
            Selection::All => &SchemaGroup::ALL,
        }
    }

    /// Categories to fetch, in registry order
    pub fn categories(self) -> Vec<&'static Category> {
        let groups = self.groups();
        CATEGORIES.iter().filter(|c| groups.contains(&c.group)).collect()
    }
}

/// Parse a prompt answer: 0 video, 1 film, 2 all, 3 quit
pub fn parse_choice(input: &str) -> Result<Choice, SpiderError> {
    let invalid = || SpiderError::InvalidSelection(input.trim().to_string());

    match input.trim().parse::<i64>().map_err(|_| invalid())? {
        0 => Ok(Choice::Run(Selection::Video)),
        1 => Ok(Choice::Run(Selection::Film)),
        2 => Ok(Choice::Run(Selection::All)),
        3 => Ok(Choice::Quit),
        _ => Err(invalid()),
    }
}

/// What a finished run produced
#[derive(Debug)]
pub struct RunSummary {
    /// Rows fetched per category key, in fetch order
    pub fetched: Vec<(&'static str, usize)>,
    pub outcome: SaveOutcome,
}

/// Handle a prompt answer. `Quit` returns `Ok(None)` without opening a session.
pub fn run_choice<S, F>(config: &Config, input: &str, open_session: F) -> Result<Option<RunSummary>, SpiderError>
where
    S: PageSource,
    F: FnOnce(&BrowserConfig) -> Result<S, BrowserError>,
{
    match parse_choice(input)? {
        Choice::Quit => {
            info!("Quit.");
            Ok(None)
        }
        Choice::Run(selection) => run(config, selection, open_session).map(Some),
    }
}

/// Run one scrape. The session lives exactly as long as this call.
pub fn run<S, F>(config: &Config, selection: Selection, open_session: F) -> Result<RunSummary, SpiderError>
where
    S: PageSource,
    F: FnOnce(&BrowserConfig) -> Result<S, BrowserError>,
{
    let browser_config = config.browser.browser_config();
    let session = open_session(&browser_config).map_err(SpiderError::Session)?;

    let result = fetch_and_save(config, &session, &selection.categories(), browser_config.implicit_wait());

    drop(session);
    info!("Browser was closed!");

    result
}

fn fetch_and_save<S: PageSource>(
    config: &Config,
    source: &S,
    categories: &[&'static Category],
    wait: Duration,
) -> Result<RunSummary, SpiderError> {
    let mut store = RankStore::new();

    for &category in categories {
        let rows = fetch_category(source, &config.base_url, category, wait)?;
        store.insert(category, rows);
    }

    let fetched = store.iter().map(|(c, rows)| (c.key, rows.len())).collect();
    let outcome = export::save(&store, &config.output)?;
    info!("Done!");

    Ok(RunSummary { fetched, outcome })
}

/// Load one ranking page and extract its rows
pub fn fetch_category<S: PageSource>(
    source: &S,
    base_url: &str,
    category: &'static Category,
    wait: Duration,
) -> Result<Vec<RankRow>, SpiderError> {
    let url = category.url(base_url);
    info!("Fetch: ['{}']({})", category.name, url);

    let html = source
        .load_page(&url, RANK_ITEM, wait)
        .map_err(|e| SpiderError::Navigation {
            category: category.key,
            url: url.clone(),
            source: e,
        })?;

    let rows = extract::extract_rows(&html, &url, category.group).map_err(|e| SpiderError::Extraction {
        category: category.key,
        source: e,
    })?;

    info!("Fetch {} records from ['{}']({}).", rows.len(), category.name, url);
    Ok(rows)
}
