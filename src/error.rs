use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Input discovery error: {0}")]
    DiscoveryError(String),

    #[error("Job error: {0}")]
    JobError(String),

    #[error("Output parse error: {0}")]
    OutputParseError(String),

    #[error("Statistics error: {0}")]
    StatisticsError(String),

    #[error("Table error: {0}")]
    TableError(String),

    #[error("Worker pool error: {0}")]
    PoolError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`BatchError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl BatchError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create an input discovery error.
    discovery => DiscoveryError,
    /// Create a job invocation error.
    job => JobError,
    /// Create an output parse error.
    output_parse => OutputParseError,
    /// Create a statistics extraction error.
    statistics => StatisticsError,
    /// Create a table persistence error.
    table => TableError,
    /// Create a worker pool error.
    pool => PoolError,
}

impl From<serde_yml::Error> for BatchError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<csv::Error> for BatchError {
    fn from(e: csv::Error) -> Self {
        Self::TableError(e.to_string())
    }
}

impl From<rayon::ThreadPoolBuildError> for BatchError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        Self::PoolError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;
