use std::time::Duration;

/// Configuration for the ranking browser session
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// Custom user agent
    pub user_agent: Option<String>,

    /// Navigation timeout in seconds
    pub timeout_seconds: u64,

    /// How long to wait for rank rows to render before reading the page
    pub implicit_wait_seconds: u64,

    /// Disable image loading for performance
    pub disable_images: bool,

    /// Additional Chrome flags
    pub chrome_flags: Vec<String>,
}

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            timeout_seconds: 30,
            implicit_wait_seconds: 5,
            disable_images: true,
            chrome_flags: vec![],
        }
    }
}

impl BrowserConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_seconds)
    }

    /// Full Chrome argument list: user flags plus the ones derived from settings
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = vec![
            "--disable-blink-features=AutomationControlled".to_string(),
            "--disable-dev-shm-usage".to_string(),
        ];
        if self.disable_images {
            args.push("--blink-settings=imagesEnabled=false".to_string());
        }
        if let Some(ua) = &self.user_agent {
            args.push(format!("--user-agent={}", ua));
        }
        args.extend(self.chrome_flags.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert_eq!(config.window_size, (1920, 1080));
        assert!(config.user_agent.is_some());
        assert_eq!(config.implicit_wait(), Duration::from_secs(5));
    }

    #[test]
    fn test_launch_args_carry_user_agent_and_flags() {
        let mut config = BrowserConfig::default();
        config.chrome_flags = vec!["--no-sandbox".to_string()];
        let args = config.launch_args();

        assert!(args.iter().any(|a| a.starts_with("--user-agent=Mozilla/5.0")));
        assert!(args.iter().any(|a| a.contains("imagesEnabled=false")));
        assert_eq!(args.last().map(String::as_str), Some("--no-sandbox"));
    }

    #[test]
    fn test_images_flag_follows_setting() {
        let config = BrowserConfig {
            disable_images: false,
            ..BrowserConfig::default()
        };
        assert!(!config.launch_args().iter().any(|a| a.contains("imagesEnabled")));
    }
}
