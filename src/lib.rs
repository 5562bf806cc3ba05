//! Doc copy lib, which copies one mongodb collection into another, reshaping every document on the way.
//!
//! Every source document is read into memory first, then each one is
//! 1. normalized: `;` separated `PracticeArea` and `FirmName` strings become lists of trimmed strings,
//! 2. reshaped: rebuilt with the fixed field order of [schema::OUTPUT_SCHEMA],
//! 3. inserted into the destination collection, with a bounded number of inserts in flight.
//!
//! Failed inserts are logged and skipped, nothing is upserted, so copying into a non-empty
//! collection fails for every duplicated `_id`.
//!
//! # DocCopier example:
//! ```no_run
//! use mongo_doc_copy::{Connection, CopyConf, DocCopier};
//!
//! let conf = CopyConf::new("mongodb://localhost:27017".to_string(), "directory".to_string(), "raw".to_string(), "clean".to_string(), None, None, None);
//! let conn = Connection::new(&conf).unwrap();
//! conn.check_permissions().unwrap();
//! let summary = DocCopier::new(conn).copy().unwrap();
//! println!("inserted {} records in {:?}", summary.attempted, summary.elapsed);
//! ```

#![warn(missing_docs)]

#[doc(hidden)]
pub mod blocking;
mod config;
mod error;
pub mod normalize;
pub mod schema;

pub use blocking::{
    collect_scan, copy_documents, BatchThrottler, Connection, CopyOptions, CopySummary, DocCopier,
    DocSink, DocSource, Progress, ThrottleMode, ThrottleReport,
};
pub use config::{
    CopyConf, RawConf, DEFAULT_WORKERS, ENV_DB, ENV_DST, ENV_PROGRESS, ENV_SRC, ENV_THROTTLE,
    ENV_URI, ENV_WORKERS,
};
pub use error::{CopyError, Result};
