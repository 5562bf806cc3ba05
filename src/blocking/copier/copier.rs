use super::progress::Progress;
use super::store::{DocSink, DocSource};
use super::throttle::{BatchThrottler, ThrottleMode};
use crate::blocking::connection::Connection;
use crate::normalize::normalize;
use crate::schema::{multi_value_fields, reshape};
use crate::{CopyConf, Result};
use bson::{Bson, Document};
use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Knobs of one copy pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopyOptions {
    /// maximum concurrent inserts.
    pub workers: usize,
    /// draw a progress bar.
    pub show_progress: bool,
    /// how concurrency is bounded.
    pub throttle: ThrottleMode,
}

impl From<&CopyConf> for CopyOptions {
    fn from(conf: &CopyConf) -> Self {
        CopyOptions {
            workers: conf.get_workers(),
            show_progress: conf.show_progress(),
            throttle: conf.get_throttle(),
        }
    }
}

/// Totals of one copy pass.
#[derive(Debug, Clone)]
pub struct CopySummary {
    /// insert attempts, successful or not.
    pub attempted: u64,
    /// inserts which returned an error.
    pub failed: u64,
    /// throttler synchronization rounds.
    pub rounds: usize,
    /// when the pass started.
    pub started_at: DateTime<Local>,
    /// wall clock time of the pass.
    pub elapsed: Duration,
}

/// Copy every document of `source` into `sink`.
///
/// Documents are normalized and reshaped on the way, see [normalize] and [reshape].  A failed
/// insert is logged and counted but never stops the pass.  A failed read does.
pub fn copy_documents<S>(
    source: &S,
    sink: Arc<dyn DocSink>,
    options: &CopyOptions,
) -> Result<CopySummary>
where
    S: DocSource + ?Sized,
{
    let started_at = Local::now();
    let start = Instant::now();

    let count = source.count()?;
    info!(%count, "Begin to read source documents.");
    let docs = source.scan()?;
    if docs.len() as u64 != count {
        warn!(%count, read = docs.len(), "Source changed between count and read.");
    }
    let progress = Progress::start(docs.len() as u64, options.show_progress)?;

    // no need to wait for a round larger than the whole input.
    let bound = options.workers.min(docs.len()).max(1);
    info!(
        docs = docs.len(),
        bound,
        throttle = %options.throttle,
        "Read complete, begin to insert."
    );

    let failed = Arc::new(AtomicU64::new(0));
    let fields = multi_value_fields();
    let task = {
        let failed = Arc::clone(&failed);
        let progress = progress.clone();
        move |doc: Document| {
            copy_one(doc, &fields, sink.as_ref(), &failed);
            progress.increment();
        }
    };

    let report = BatchThrottler::new(bound, options.throttle)?.run(docs, task)?;
    let attempted = progress.finish();

    Ok(CopySummary {
        attempted,
        failed: failed.load(Ordering::Relaxed),
        rounds: report.rounds,
        started_at,
        elapsed: start.elapsed(),
    })
}

fn copy_one(mut doc: Document, fields: &[&str], sink: &dyn DocSink, failed: &AtomicU64) {
    normalize(&mut doc, fields);
    let out = reshape(&doc);
    let id = out.get("_id").cloned().unwrap_or(Bson::Null);
    if let Err(e) = sink.insert(out) {
        failed.fetch_add(1, Ordering::Relaxed);
        error!(%id, ?e, "Insert document failed.");
    }
}

/// Copies the configured source collection into the destination collection.
pub struct DocCopier<'a> {
    conn: Connection<'a>,
}

impl<'a> DocCopier<'a> {
    /// create a copier on top of `conn`.
    pub fn new(conn: Connection<'a>) -> DocCopier<'a> {
        DocCopier { conn }
    }

    /// Run one copy pass.
    pub fn copy(&self) -> Result<CopySummary> {
        let conf = self.conn.get_conf();
        info!(
            db = conf.get_db(),
            src = conf.get_src_coll(),
            dst = conf.get_dst_coll(),
            "Begin to copy collection."
        );
        let source = self.conn.src_coll();
        let sink: Arc<dyn DocSink> = Arc::new(self.conn.dst_coll());
        copy_documents(&source, sink, &CopyOptions::from(conf))
    }
}
