use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Does not exist: result set has no columns")]
    NoColumns,
    #[error("Does not exist: no rows in result set")]
    NoRows,
    #[error("Sql error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("Cursor error: {0}")]
    Cursor(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl ScanError {
    /// True for the two "does not exist" conditions: no columns, or no row
    /// where exactly one was expected.
    pub fn is_not_exist(&self) -> bool {
        matches!(self, Self::NoColumns | Self::NoRows)
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

// Helper conversions
impl From<config::ConfigError> for ScanError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<regex::Error> for ScanError {
    fn from(e: regex::Error) -> Self { Self::Config(e.to_string()) }
}
