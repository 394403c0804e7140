use crate::locator::Query;
use crate::{Condition, Error, Locator, PageSnapshot, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Fixed sleep between polls of `find` and `wait_until`
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Options for launching the browser session
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Resolved browser binary
    pub binary: PathBuf,
    /// User-data directory (profile)
    pub user_data_dir: PathBuf,
    pub headless: bool,
    /// Default timeout for `find` and `wait_until`
    pub default_wait: Duration,
}

/// One shared browser session for the process's lifetime. All facade
/// operations act on a single page; waiting is cooperative polling
/// bounded by the configured timeout.
pub struct Session {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    default_wait: Duration,
}

impl Session {
    /// Launch the browser and open the automation page
    pub async fn launch(options: LaunchOptions) -> Result<Self> {
        tracing::info!("Launching browser: {}", options.binary.display());

        let mut builder = BrowserConfig::builder()
            .chrome_executable(&options.binary)
            .user_data_dir(&options.user_data_dir)
            .window_size(1440, 1000);
        if !options.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(Error::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler stream must be polled for any CDP command to make progress
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        tracing::info!("Browser session established");

        Ok(Self {
            browser,
            page,
            handler_task,
            default_wait: options.default_wait,
        })
    }

    /// The configured default wait timeout
    pub fn default_wait(&self) -> Duration {
        self.default_wait
    }

    /// Navigate the shared page to the given URL
    pub async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    /// Current URL of the shared page
    pub async fn current_url(&self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    /// Take a snapshot of session state for condition evaluation. URL
    /// read failures are folded into `None`; the page is often
    /// mid-navigation while we poll.
    pub async fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            url: self.page.url().await.ok().flatten(),
        }
    }

    /// Block until the element matching the locator is present and
    /// displayed, or the timeout elapses. `None` uses the default wait.
    pub async fn find(
        &self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> Result<ElementHandle> {
        let timeout = timeout.unwrap_or(self.default_wait);
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(element) = self.try_find(locator).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(Error::WaitTimeout {
                    what: format!("element {}", locator),
                    timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// One non-blocking lookup attempt. Transient CDP errors (the page
    /// re-rendering under us) count as "not there yet".
    async fn try_find(&self, locator: &Locator) -> Option<ElementHandle> {
        let element = match locator.as_query() {
            Query::Css(css) => self.page.find_element(css).await.ok()?,
            Query::XPath(xpath) => self.page.find_xpath(xpath).await.ok()?,
        };
        let handle = ElementHandle { inner: element };
        if handle.is_displayed().await.unwrap_or(false) {
            Some(handle)
        } else {
            None
        }
    }

    /// All elements matching the locator right now; empty when none are
    /// present. Does not block.
    pub async fn find_all(&self, locator: &Locator) -> Vec<ElementHandle> {
        let found = match locator.as_query() {
            Query::Css(css) => self.page.find_elements(css).await,
            Query::XPath(xpath) => self.page.find_xpaths(xpath).await,
        };
        match found {
            Ok(elements) => elements
                .into_iter()
                .map(|inner| ElementHandle { inner })
                .collect(),
            Err(e) => {
                tracing::debug!("find_all({}) yielded nothing: {}", locator, e);
                Vec::new()
            }
        }
    }

    /// Block, polling, until the condition is truthy or the timeout
    /// elapses. `None` uses the default wait.
    pub async fn wait_until(
        &self,
        condition: &dyn Condition,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let timeout = timeout.unwrap_or(self.default_wait);
        let deadline = Instant::now() + timeout;
        loop {
            let snapshot = self.snapshot().await;
            match condition.evaluate(&snapshot) {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(e) => {
                    tracing::debug!(
                        "Condition \"{}\" errored, treating as false: {}",
                        condition.describe(),
                        e
                    );
                }
            }
            if Instant::now() >= deadline {
                return Err(Error::WaitTimeout {
                    what: condition.describe(),
                    timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Close the browser and stop the CDP handler
    pub async fn close(mut self) -> Result<()> {
        tracing::info!("Closing browser session");
        self.browser.close().await?;
        self.handler_task.abort();
        Ok(())
    }
}

/// A located element. Thin wrapper over the CDP element exposing the
/// operations the fill choreography needs.
pub struct ElementHandle {
    inner: Element,
}

const JS_VALUE: &str = "function() { return this.value; }";
const JS_CLEAR: &str = "function() { this.value = ''; }";
const JS_DISPLAYED: &str =
    "function() { return !!(this.offsetWidth || this.offsetHeight || this.getClientRects().length); }";

impl ElementHandle {
    /// Dispatch a trusted click on the element
    pub async fn click(&self) -> Result<()> {
        self.inner.click().await?;
        Ok(())
    }

    /// Focus the element and type the text as key events
    pub async fn type_text(&self, text: &str) -> Result<()> {
        self.inner.type_str(text).await?;
        Ok(())
    }

    /// Press a single named key (e.g. "Enter") on the element
    pub async fn press_key(&self, key: &str) -> Result<()> {
        self.inner.press_key(key).await?;
        Ok(())
    }

    /// Empty the element's value
    pub async fn clear(&self) -> Result<()> {
        self.inner.call_js_fn(JS_CLEAR, false).await?;
        Ok(())
    }

    /// The element's current `value` property
    pub async fn value(&self) -> Result<String> {
        let returns = self.inner.call_js_fn(JS_VALUE, false).await?;
        match returns.result.value {
            Some(serde_json::Value::String(value)) => Ok(value),
            _ => Ok(String::new()),
        }
    }

    /// Displayed check: the element actually takes up layout space
    pub async fn is_displayed(&self) -> Result<bool> {
        let returns = self.inner.call_js_fn(JS_DISPLAYED, false).await?;
        Ok(matches!(
            returns.result.value,
            Some(serde_json::Value::Bool(true))
        ))
    }
}
