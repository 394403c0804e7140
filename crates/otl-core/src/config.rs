use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Browser engines the CDP driver can speak to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserChoice {
    Chrome,
    Chromium,
    Edge,
    Brave,
}

impl FromStr for BrowserChoice {
    type Err = Error;

    /// Parse a browser choice from a config/CLI string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "chrome" => Ok(BrowserChoice::Chrome),
            "chromium" => Ok(BrowserChoice::Chromium),
            "edge" | "msedge" => Ok(BrowserChoice::Edge),
            "brave" => Ok(BrowserChoice::Brave),
            other => Err(Error::UnsupportedBrowser(other.to_string())),
        }
    }
}

impl std::fmt::Display for BrowserChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BrowserChoice::Chrome => "chrome",
            BrowserChoice::Chromium => "chromium",
            BrowserChoice::Edge => "edge",
            BrowserChoice::Brave => "brave",
        };
        write!(f, "{}", name)
    }
}

/// Top-level TOML configuration (`otl.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserSection,
    #[serde(default)]
    pub timecard: TimecardSection,
    #[serde(default)]
    pub secrets: SecretsSection,
    #[serde(default)]
    pub urls: UrlOverrides,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrowserSection {
    /// One of "chrome", "chromium", "edge", "brave"
    #[serde(default = "default_browser")]
    pub choice: String,
    /// Explicit browser binary; platform defaults and $PATH are searched if unset
    #[serde(default)]
    pub binary: Option<PathBuf>,
    /// Maximum seconds to wait for elements and page-state conditions
    #[serde(default = "default_wait_time")]
    pub default_wait_time: u64,
    #[serde(default)]
    pub headless: bool,
    /// Named persistent profile; keeps SSO cookies between runs
    #[serde(default)]
    pub profile: Option<String>,
}

impl Default for BrowserSection {
    fn default() -> Self {
        Self {
            choice: default_browser(),
            binary: None,
            default_wait_time: default_wait_time(),
            headless: false,
            profile: None,
        }
    }
}

impl BrowserSection {
    pub fn choice(&self) -> Result<BrowserChoice> {
        self.choice.parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimecardSection {
    /// Path to the reference timecard CSV
    #[serde(default = "default_timecard_file")]
    pub file: PathBuf,
}

impl Default for TimecardSection {
    fn default() -> Self {
        Self {
            file: default_timecard_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretsSection {
    /// Path to the TOML file holding SSO credentials; missing file is fine
    #[serde(default = "default_secrets_file")]
    pub file: PathBuf,
}

impl Default for SecretsSection {
    fn default() -> Self {
        Self {
            file: default_secrets_file(),
        }
    }
}

/// Optional replacements for the built-in Oracle URLs, mainly for running
/// against saved copies of the pages
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UrlOverrides {
    pub home: Option<String>,
    pub home_no_query: Option<String>,
    pub sso: Option<String>,
    pub sso_hiccup: Option<String>,
    pub timecards_marker: Option<String>,
    pub timecards_alt_marker: Option<String>,
}

fn default_browser() -> String {
    "chrome".to_string()
}

fn default_wait_time() -> u64 {
    60
}

fn default_timecard_file() -> PathBuf {
    PathBuf::from("timecard.csv")
}

fn default_secrets_file() -> PathBuf {
    PathBuf::from("secrets.toml")
}

impl Config {
    /// Read and parse a config file from the given path
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Reading config from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a config from a TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

/// SSO credentials, loaded from the secrets file. Either field may be
/// absent; the login flow then falls back to interactive input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Load credentials from a TOML file; a missing file yields empty
    /// credentials rather than an error
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No secrets file at {}, login will be interactive", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let credentials: Credentials = toml::from_str(&content)?;
        Ok(credentials)
    }

    pub fn is_complete(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.browser.choice, "chrome");
        assert_eq!(config.browser.default_wait_time, 60);
        assert!(!config.browser.headless);
        assert_eq!(config.timecard.file, PathBuf::from("timecard.csv"));
    }

    #[test]
    fn test_full_config_parses() {
        let config = Config::from_str(
            r#"
            [browser]
            choice = "edge"
            binary = "/usr/bin/microsoft-edge"
            default_wait_time = 30
            headless = true
            profile = "work"

            [timecard]
            file = "week32.csv"

            [secrets]
            file = "/home/me/.otl-secrets.toml"

            [urls]
            home = "file:///tmp/OTL_Entry.html"
            "#,
        )
        .unwrap();

        assert_eq!(config.browser.choice().unwrap(), BrowserChoice::Edge);
        assert_eq!(config.browser.default_wait_time, 30);
        assert!(config.browser.headless);
        assert_eq!(config.browser.profile.as_deref(), Some("work"));
        assert_eq!(config.timecard.file, PathBuf::from("week32.csv"));
        assert_eq!(
            config.urls.home.as_deref(),
            Some("file:///tmp/OTL_Entry.html")
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Config::from_str("[browser]\ndriver_path = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_browser_choice_aliases() {
        assert_eq!(
            "MSEdge".parse::<BrowserChoice>().unwrap(),
            BrowserChoice::Edge
        );
        assert_eq!(
            "Chrome".parse::<BrowserChoice>().unwrap(),
            BrowserChoice::Chrome
        );
    }

    #[test]
    fn test_unsupported_browser_is_error() {
        let err = "ie".parse::<BrowserChoice>().unwrap_err();
        assert!(err.to_string().contains("Unsupported browser"));
        assert!(err.to_string().contains("ie"));
    }

    #[test]
    fn test_missing_secrets_file_is_empty() {
        let credentials = Credentials::load(Path::new("/nonexistent/secrets.toml")).unwrap();
        assert!(credentials.username.is_none());
        assert!(credentials.password.is_none());
        assert!(!credentials.is_complete());
    }

    #[test]
    fn test_secrets_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(&path, "username = \"jdoe\"\npassword = \"hunter2\"\n").unwrap();

        let credentials = Credentials::load(&path).unwrap();
        assert_eq!(credentials.username.as_deref(), Some("jdoe"));
        assert!(credentials.is_complete());
    }
}
