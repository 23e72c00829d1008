use crate::browser::config::DEFAULT_USER_AGENT;
use crate::browser::BrowserConfig;
use crate::models::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Ranking base URL; category keys are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub browser: BrowserSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    /// Browser headless mode
    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// User agent override sent with every page load
    #[serde(default = "default_user_agent")]
    pub user_agent: Option<String>,

    /// Disable images in browser (faster loading)
    #[serde(default = "default_true")]
    pub disable_images: bool,

    /// Seconds to wait for rank rows after navigation
    #[serde(default = "default_implicit_wait")]
    pub implicit_wait_secs: u64,

    /// Page load timeout in seconds
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,

    /// Extra Chrome command-line flags
    #[serde(default)]
    pub chrome_flags: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory the workbook is written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// File name prefix; the Unix timestamp and `.xlsx` are appended
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_true() -> bool { true }
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_window_width() -> u32 { 1920 }
fn default_window_height() -> u32 { 1080 }
fn default_user_agent() -> Option<String> { Some(DEFAULT_USER_AGENT.to_string()) }
fn default_implicit_wait() -> u64 { 5 }
fn default_navigation_timeout() -> u64 { 30 }
fn default_output_dir() -> PathBuf { PathBuf::from(".") }
fn default_file_prefix() -> String { "bilibili_rank_data_".to_string() }

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            user_agent: default_user_agent(),
            disable_images: true,
            implicit_wait_secs: 5,
            navigation_timeout_secs: 30,
            chrome_flags: vec![],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            browser: BrowserSettings::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load the given file; a missing file means defaults, a malformed one is
    /// reported and also falls back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("Ignoring malformed {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

impl BrowserSettings {
    /// Visible browser with images enabled, for watching a run
    pub fn debug_mode(&mut self) {
        self.headless = false;
        self.disable_images = false;
    }

    /// Runtime browser configuration for these settings
    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            headless: self.headless,
            window_size: (self.window_width, self.window_height),
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.navigation_timeout_secs,
            implicit_wait_seconds: self.implicit_wait_secs,
            disable_images: self.disable_images,
            chrome_flags: self.chrome_flags.clone(),
        }
    }
}

impl OutputConfig {
    pub fn file_name(&self, timestamp: i64) -> String {
        format!("{}{}.xlsx", self.file_prefix, timestamp)
    }
}
