pub mod auth;
pub mod constants;
mod error;
pub mod fill;
pub mod nav;

pub use auth::Authenticator;
pub use constants::Urls;
pub use error::{Error, Result};
pub use fill::TimecardFiller;
pub use nav::Navigator;
