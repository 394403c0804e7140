use otl_browser::Locator;
use otl_core::config::UrlOverrides;
use std::time::Duration;

/// Attempts at opening the E-Business Suite home page before giving up
pub const MAX_TRIES_OPEN_SITE: u32 = 3;

/// E-Business Suite home page
pub const HOME_URL: &str =
    "https://global-ebusiness.oraclecorp.com/OA_HTML/OA.jsp?OAFunc=OAHOMEPAGE";
/// Home page minus the query string; successful logins sometimes land on
/// variations of this
pub const HOME_URL_NO_QUERY: &str = "https://global-ebusiness.oraclecorp.com/OA_HTML/OA.jsp";
/// Single sign-on form
pub const SSO_URL: &str = "https://login.oracle.com/mysso/signon.jsp";
/// Intermediate redirect the credential submission passes through
pub const SSO_HICCUP_URL: &str = "https://login.oracle.com/oam/server/sso/auth_cred_submit";
/// Timecard pages carry one of these two markers in their URL
pub const TIMECARDS_MARKER: &str =
    "https://global-ebusiness.oraclecorp.com/OA_HTML/OA.jsp?_rc=HXCTIMECARDACTIVITIESPAGE";
pub const TIMECARDS_ALT_MARKER: &str = "https://global-ebusiness.oraclecorp.com/OA_HTML/RF.jsp";

pub const SSO_USERNAME_ID: &str = "sso_username";
pub const SSO_PASSWORD_ID: &str = "ssopassword";
pub const CREATE_TIMECARD_ID: &str = "Hxccreatetcbutton";

pub const OVERTIME_ELIGIBLE_LINK: &str =
    "US OTL - Emps Eligible for Overtime (Project Accounting)";
pub const RECENT_TIMECARDS_LINK: &str = "Recent Timecards";

/// tbody of the timecard entry grid, buried in OAF's nested tables
pub const TIMECARD_TBODY_XPATH: &str =
    "//span[@id='Hxctimecard']/table[2]//table[2]/tbody/tr[5]/td/table/tbody/tr[5]/td[2]/table/tbody";

/// XPath rows are 1-indexed and the first grid row is the header
pub const HEADER_ROW_OFFSET: usize = 2;

/// Settle delay after typing the Project field; the page pops validation
/// dialogs into the Task field without it
pub const AFTER_PROJECT_FIELD: Duration = Duration::from_secs(1);
/// Retry interval while waiting for a typed value to stick
pub const WAIT_FOR_DATA_ENTRY: Duration = Duration::from_secs(1);
pub const BEFORE_ADDING_ROW: Duration = Duration::from_secs(2);
pub const AFTER_ADDING_ROW: Duration = Duration::from_secs(2);

/// The "Add Another Row" control under the timecard grid
pub fn add_row_button() -> Locator {
    Locator::xpath(format!(
        "{}//button[contains(., 'Add Another Row')]",
        TIMECARD_TBODY_XPATH
    ))
}

/// Inputs of the grid row backing CSV row `row_index`
pub fn row_inputs(row_index: usize) -> Locator {
    Locator::xpath(format!(
        "{}/tr[{}]//input",
        TIMECARD_TBODY_XPATH,
        row_index + HEADER_ROW_OFFSET
    ))
}

/// Pieces of the rejected-subtask signature (all three present at once)
pub fn error_banner() -> Locator {
    Locator::xpath("//img[@title='Error']")
}

pub fn task_link() -> Locator {
    Locator::link_text("Task")
}

pub fn valid_value_message() -> Locator {
    Locator::xpath("//*[contains(text(), 'Select a valid value')]")
}

/// The URL set the flows run against: the built-in Oracle URLs with any
/// config overrides applied (overrides exist mainly for offline testing
/// against saved copies of the pages)
#[derive(Debug, Clone)]
pub struct Urls {
    pub home: String,
    pub home_no_query: String,
    pub sso: String,
    pub sso_hiccup: String,
    pub timecards_marker: String,
    pub timecards_alt_marker: String,
}

impl Urls {
    /// True for the home page itself or any URL under the query-less home
    /// route, which is where successful logins land
    pub fn is_home(&self, url: &str) -> bool {
        url == self.home || url.starts_with(&self.home_no_query)
    }

    pub fn resolve(overrides: &UrlOverrides) -> Self {
        Self {
            home: overrides.home.clone().unwrap_or_else(|| HOME_URL.to_string()),
            home_no_query: overrides
                .home_no_query
                .clone()
                .unwrap_or_else(|| HOME_URL_NO_QUERY.to_string()),
            sso: overrides.sso.clone().unwrap_or_else(|| SSO_URL.to_string()),
            sso_hiccup: overrides
                .sso_hiccup
                .clone()
                .unwrap_or_else(|| SSO_HICCUP_URL.to_string()),
            timecards_marker: overrides
                .timecards_marker
                .clone()
                .unwrap_or_else(|| TIMECARDS_MARKER.to_string()),
            timecards_alt_marker: overrides
                .timecards_alt_marker
                .clone()
                .unwrap_or_else(|| TIMECARDS_ALT_MARKER.to_string()),
        }
    }
}

impl Default for Urls {
    fn default() -> Self {
        Self::resolve(&UrlOverrides::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_overrides() {
        let urls = Urls::default();
        assert_eq!(urls.home, HOME_URL);
        assert!(urls.home.starts_with(&urls.home_no_query));
    }

    #[test]
    fn test_overrides_replace_selected_urls() {
        let overrides = UrlOverrides {
            home: Some("file:///tmp/home.html".to_string()),
            ..Default::default()
        };
        let urls = Urls::resolve(&overrides);
        assert_eq!(urls.home, "file:///tmp/home.html");
        assert_eq!(urls.sso, SSO_URL);
    }

    #[test]
    fn test_is_home_accepts_query_less_variants() {
        let urls = Urls::default();
        assert!(urls.is_home(HOME_URL));
        assert!(urls.is_home(&format!("{}?OAFunc=OAHOMEPAGE&oapc=2", HOME_URL_NO_QUERY)));
        assert!(!urls.is_home(SSO_URL));
        assert!(!urls.is_home(SSO_HICCUP_URL));
    }

    #[test]
    fn test_row_inputs_offsets_past_header() {
        let locator = row_inputs(0);
        assert_eq!(
            locator,
            Locator::xpath(format!("{}/tr[2]//input", TIMECARD_TBODY_XPATH))
        );
    }
}
