use mongodb::error::Error as MongoError;
use std::result::Result as StdResult;
use thiserror::Error;

/// Errors raised while configuring or running a copy pass.
#[derive(Error, Debug)]
pub enum CopyError {
    /// Any error returned by the mongodb driver.
    #[error("Mongodb error: {0}")]
    MongoError(#[from] MongoError),
    /// The configured database can't be accessed.
    #[error("Check permission for database {db:?} failed, connection string: {uri:?}, detailed: {detail:?}")]
    PermissionError {
        /// connection string used.
        uri: String,
        /// database name.
        db: String,
        /// underlying driver error.
        detail: MongoError,
    },
    /// A source document can't be fetched or decoded, the whole run is aborted.
    #[error("Read source document #{index} failed, detailed: {detail:?}")]
    ReadError {
        /// position of the document in the scan.
        index: usize,
        /// underlying driver error.
        detail: MongoError,
    },
    /// A required configuration value was given neither by env nor by flag.
    #[error("{name} is required, use --{flag} or set {env}")]
    MissingConfig {
        /// human readable name.
        name: &'static str,
        /// command line flag.
        flag: &'static str,
        /// environment variable.
        env: &'static str,
    },
    /// A configuration value can't be parsed.
    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidConfig {
        /// configuration key.
        name: &'static str,
        /// raw value.
        value: String,
        /// why it was rejected.
        reason: String,
    },
    /// Config file is not valid toml.
    #[error("Invalid config file: {0}")]
    ConfigFile(#[from] toml::de::Error),
    /// Config or log file can't be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Insert worker threads can't be started.
    #[error("Build worker pool failed: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// Progress bar template is malformed.
    #[error("Invalid progress bar template: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
}

/// Result type of every fallible doc copy operation.
pub type Result<T> = StdResult<T, CopyError>;
