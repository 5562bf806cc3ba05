/// provide doc copy blocking apis.
mod connection;
#[doc(hidden)]
pub mod copier;

pub use connection::Connection;
pub use copier::store::{collect_scan, DocSink, DocSource};
pub use copier::throttle::{BatchThrottler, ThrottleMode, ThrottleReport};
pub use copier::{copy_documents, CopyOptions, CopySummary, DocCopier, Progress};
