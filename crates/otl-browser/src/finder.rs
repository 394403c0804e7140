use crate::{Error, Result};
use otl_core::BrowserChoice;
use std::path::{Path, PathBuf};

/// Locates the browser binary on the system
pub struct BrowserFinder {
    choice: BrowserChoice,
    custom_path: Option<PathBuf>,
}

impl BrowserFinder {
    /// Create a new BrowserFinder with an optional explicit binary path
    pub fn new(choice: BrowserChoice, custom_path: Option<PathBuf>) -> Self {
        Self {
            choice,
            custom_path,
        }
    }

    /// Find the browser binary, checking the explicit path first, then
    /// platform default locations, then `$PATH`
    pub fn find(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.custom_path {
            return self.validate_path(path);
        }

        let default_paths = Self::default_paths(self.choice);
        for path in &default_paths {
            if let Ok(valid_path) = self.validate_path(path) {
                return Ok(valid_path);
            }
        }

        for name in Self::binary_names(self.choice) {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        Err(Error::Browser(format!(
            "{} not found. Checked: {}, and $PATH for {}. Set [browser].binary to specify the location.",
            self.choice,
            default_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            Self::binary_names(self.choice).join(", ")
        )))
    }

    /// Platform-specific default install locations per browser
    fn default_paths(choice: BrowserChoice) -> Vec<PathBuf> {
        #[cfg(target_os = "macos")]
        return match choice {
            BrowserChoice::Chrome => vec![PathBuf::from(
                "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            )],
            BrowserChoice::Chromium => vec![PathBuf::from(
                "/Applications/Chromium.app/Contents/MacOS/Chromium",
            )],
            BrowserChoice::Edge => vec![PathBuf::from(
                "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
            )],
            BrowserChoice::Brave => vec![PathBuf::from(
                "/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
            )],
        };

        #[cfg(target_os = "linux")]
        return match choice {
            BrowserChoice::Chrome => vec![
                PathBuf::from("/usr/bin/google-chrome"),
                PathBuf::from("/usr/bin/google-chrome-stable"),
            ],
            BrowserChoice::Chromium => vec![
                PathBuf::from("/usr/bin/chromium"),
                PathBuf::from("/usr/bin/chromium-browser"),
            ],
            BrowserChoice::Edge => vec![PathBuf::from("/usr/bin/microsoft-edge")],
            BrowserChoice::Brave => vec![PathBuf::from("/usr/bin/brave-browser")],
        };

        #[cfg(target_os = "windows")]
        return match choice {
            BrowserChoice::Chrome => vec![
                PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
                PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
            ],
            BrowserChoice::Chromium => vec![PathBuf::from(
                r"C:\Program Files\Chromium\Application\chrome.exe",
            )],
            BrowserChoice::Edge => vec![PathBuf::from(
                r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
            )],
            BrowserChoice::Brave => vec![PathBuf::from(
                r"C:\Program Files\BraveSoftware\Brave-Browser\Application\brave.exe",
            )],
        };

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            let _ = choice;
            return vec![];
        }
    }

    /// Names to resolve through `$PATH` as a last resort
    fn binary_names(choice: BrowserChoice) -> &'static [&'static str] {
        match choice {
            BrowserChoice::Chrome => &["google-chrome", "google-chrome-stable", "chrome"],
            BrowserChoice::Chromium => &["chromium", "chromium-browser"],
            BrowserChoice::Edge => &["microsoft-edge", "msedge"],
            BrowserChoice::Brave => &["brave-browser", "brave"],
        }
    }

    /// Validate that a path exists and is executable
    fn validate_path(&self, path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            return Err(Error::Browser(format!(
                "{} not found at: {}",
                self.choice,
                path.display()
            )));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let permissions = metadata.permissions();
            if permissions.mode() & 0o111 == 0 {
                return Err(Error::Browser(format!(
                    "Browser binary not executable: {}",
                    path.display()
                )));
            }
        }

        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_finder_accepts_custom_path() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let finder = BrowserFinder::new(BrowserChoice::Chrome, Some(path.to_path_buf()));
        let result = finder.find();

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), path);
    }

    #[test]
    fn test_finder_fails_for_missing_custom_path() {
        let finder = BrowserFinder::new(
            BrowserChoice::Chrome,
            Some(PathBuf::from("/nonexistent/chrome")),
        );
        let result = finder.find();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_finder_rejects_non_executable_custom_path() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        let finder = BrowserFinder::new(
            BrowserChoice::Chrome,
            Some(temp.path().to_path_buf()),
        );
        let err = finder.find().unwrap_err();
        assert!(err.to_string().contains("not executable"));
    }
}
