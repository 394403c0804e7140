mod conditions;
mod error;
mod finder;
mod locator;
mod profile;
mod session;

pub use conditions::{AnyOf, Condition, PageSnapshot, UrlContains, UrlIsOneOf, UrlStartsWith};
pub use error::{Error, Result};
pub use finder::BrowserFinder;
pub use locator::Locator;
pub use profile::ProfileManager;
pub use session::{ElementHandle, LaunchOptions, Session, POLL_INTERVAL};
