pub mod config;
pub mod error;
pub mod timecard;
pub mod timeparse;

pub use config::{BrowserChoice, Config, Credentials};
pub use error::{Error, Result};
pub use timecard::{TimecardReader, TimecardRow};
