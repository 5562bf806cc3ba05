#[allow(clippy::module_inception)]
mod copier;
mod progress;
#[doc(hidden)]
pub mod store;
#[doc(hidden)]
pub mod throttle;

pub use copier::{copy_documents, CopyOptions, CopySummary, DocCopier};
pub use progress::Progress;
