//! doc copy configuration.
//!
//! Every value can come from an environment variable, a command line flag, or an optional toml
//! file, in that precedence order.  Config file example:
//! ```toml
//! uri = "mongodb://localhost:27017"
//! db = "directory"
//! src = "attorneys_raw"
//! dst = "attorneys"
//! # how many inserts are in flight at once.
//! workers = 50
//! progress = true
//! # "rounds" or "pool".
//! throttle = "rounds"
//! ```
use crate::blocking::ThrottleMode;
use crate::{CopyError, Result};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// connection uri environment variable.
pub const ENV_URI: &str = "MONGODB_URI";
/// database environment variable.
pub const ENV_DB: &str = "MONGODB_DB";
/// source collection environment variable.
pub const ENV_SRC: &str = "MONGODB_SRC";
/// destination collection environment variable.
pub const ENV_DST: &str = "MONGODB_DST";
/// worker count environment variable.
pub const ENV_WORKERS: &str = "MONGODB_WORKERS";
/// progress toggle environment variable.
pub const ENV_PROGRESS: &str = "MONGODB_PROGRESS";
/// throttle mode environment variable.
pub const ENV_THROTTLE: &str = "MONGODB_THROTTLE";

/// default number of concurrent inserts.
pub const DEFAULT_WORKERS: usize = 50;

/// Resolved configuration of one copy pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyConf {
    uri: String,
    db: String,
    src_coll: String,
    dst_coll: String,
    workers: usize,
    progress: bool,
    throttle: ThrottleMode,
}

impl CopyConf {
    /// create a configuration directly, `None` values fall back to defaults.
    pub fn new(
        uri: String,
        db: String,
        src_coll: String,
        dst_coll: String,
        workers: Option<usize>,
        progress: Option<bool>,
        throttle: Option<ThrottleMode>,
    ) -> Self {
        CopyConf {
            uri,
            db,
            src_coll,
            dst_coll,
            workers: workers.unwrap_or(DEFAULT_WORKERS),
            progress: progress.unwrap_or(true),
            throttle: throttle.unwrap_or_default(),
        }
    }

    /// get mongodb connection string.
    pub fn get_uri(&self) -> &str {
        &self.uri
    }

    /// get database name.
    pub fn get_db(&self) -> &str {
        &self.db
    }

    /// get source collection name.
    pub fn get_src_coll(&self) -> &str {
        &self.src_coll
    }

    /// get destination collection name.
    pub fn get_dst_coll(&self) -> &str {
        &self.dst_coll
    }

    /// get maximum concurrent inserts.
    pub fn get_workers(&self) -> usize {
        self.workers
    }

    /// show progress bar or not.
    pub fn show_progress(&self) -> bool {
        self.progress
    }

    /// get throttle mode.
    pub fn get_throttle(&self) -> ThrottleMode {
        self.throttle
    }
}

/// One layer of partially specified configuration.
///
/// Layers are combined with [merge](RawConf::merge) and turned into a [CopyConf] with
/// [resolve](RawConf::resolve).
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawConf {
    /// connection uri.
    pub uri: Option<String>,
    /// database name.
    pub db: Option<String>,
    /// source collection.
    pub src: Option<String>,
    /// destination collection.
    pub dst: Option<String>,
    /// concurrent inserts.
    pub workers: Option<usize>,
    /// show progress bar.
    pub progress: Option<bool>,
    /// throttle mode.
    pub throttle: Option<ThrottleMode>,
}

impl RawConf {
    /// Read a layer from toml file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<RawConf> {
        let data = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&data)?)
    }

    /// Read a layer from process environment.
    pub fn from_env() -> Result<RawConf> {
        RawConf::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read a layer through `lookup`, which maps an environment variable name to its value.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<RawConf>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Ok(RawConf {
            uri: get(ENV_URI),
            db: get(ENV_DB),
            src: get(ENV_SRC),
            dst: get(ENV_DST),
            workers: get(ENV_WORKERS)
                .map(|v| parse_value("workers", v))
                .transpose()?,
            progress: get(ENV_PROGRESS).map(parse_bool).transpose()?,
            throttle: get(ENV_THROTTLE)
                .map(|v| parse_value("throttle", v))
                .transpose()?,
        })
    }

    /// Fill values missing in `self` from `lower`.
    pub fn merge(self, lower: RawConf) -> RawConf {
        RawConf {
            uri: self.uri.or(lower.uri),
            db: self.db.or(lower.db),
            src: self.src.or(lower.src),
            dst: self.dst.or(lower.dst),
            workers: self.workers.or(lower.workers),
            progress: self.progress.or(lower.progress),
            throttle: self.throttle.or(lower.throttle),
        }
    }

    /// Check required values and apply defaults.
    pub fn resolve(self) -> Result<CopyConf> {
        let uri = required(self.uri, "mongodb connection string", "uri", ENV_URI)?;
        let db = required(self.db, "mongodb db", "db", ENV_DB)?;
        let src = required(self.src, "source collection", "src", ENV_SRC)?;
        let dst = required(self.dst, "destination collection", "dst", ENV_DST)?;
        if self.workers == Some(0) {
            return Err(CopyError::InvalidConfig {
                name: "workers",
                value: "0".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(CopyConf::new(
            uri,
            db,
            src,
            dst,
            self.workers,
            self.progress,
            self.throttle,
        ))
    }
}

fn required(
    value: Option<String>,
    name: &'static str,
    flag: &'static str,
    env: &'static str,
) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CopyError::MissingConfig { name, flag, env }),
    }
}

fn parse_value<T>(name: &'static str, value: String) -> Result<T>
where
    T: FromStr,
    T::Err: ToString,
{
    value.parse().map_err(|e: T::Err| CopyError::InvalidConfig {
        name,
        reason: e.to_string(),
        value,
    })
}

// accepts the usual spellings, not just `true` and `false`.
fn parse_bool(value: String) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "on" => Ok(true),
        "0" | "f" | "false" | "no" | "off" => Ok(false),
        _ => Err(CopyError::InvalidConfig {
            name: "progress",
            value,
            reason: "expect a boolean".to_string(),
        }),
    }
}
