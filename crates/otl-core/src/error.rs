use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to parse timecard CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(
        "Unsupported browser \"{0}\". Valid options are \"chrome\", \"chromium\", \"edge\", and \"brave\"."
    )]
    UnsupportedBrowser(String),
}

pub type Result<T> = std::result::Result<T, Error>;
