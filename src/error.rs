use crate::browser::BrowserError;
use crate::export::SaveError;
use crate::extract::ExtractError;
use std::path::PathBuf;

/// Everything that can end a run early
#[derive(Debug, thiserror::Error)]
pub enum SpiderError {
    #[error("could not open browser session: {0}")]
    Session(#[source] BrowserError),

    #[error("failed to load ['{category}']({url}): {source}")]
    Navigation {
        category: &'static str,
        url: String,
        #[source]
        source: BrowserError,
    },

    #[error("failed to extract ['{category}']: {source}")]
    Extraction {
        category: &'static str,
        #[source]
        source: ExtractError,
    },

    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: SaveError,
    },

    #[error("Invalid type: {0:?}")]
    InvalidSelection(String),
}
