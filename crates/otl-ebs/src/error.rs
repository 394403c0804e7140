use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Incorrect login details: the sign-on page bounced back to the login form. Check the stored username and password."
    )]
    IncorrectLogin,

    #[error("Reached the maximum of {tries} attempts to open {what}")]
    MaxTriesReached { what: String, tries: u32 },

    #[error(
        "Subtask not found: the site rejected the Task/Type combination of CSV row {row}. Check that row against the timecard page's accepted values."
    )]
    SubtaskNotFound { row: usize },

    #[error(transparent)]
    Browser(#[from] otl_browser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
