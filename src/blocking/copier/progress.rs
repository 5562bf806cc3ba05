use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const BAR_TEMPLATE: &str =
    "{msg}{pos}/{len} {wide_bar:.cyan/blue} {percent}% {per_sec} [{elapsed_precise}]";

/// Insert progress shared by every copy task.
///
/// Cloning is cheap, all clones report to the same counter and bar.
#[derive(Clone)]
pub struct Progress {
    completed: Arc<AtomicU64>,
    bar: ProgressBar,
}

impl Progress {
    /// Start reporting progress towards `total`, the bar is only drawn when `show` is true.
    pub fn start(total: u64, show: bool) -> Result<Progress> {
        let bar = if show {
            let bar = ProgressBar::new(total);
            bar.set_style(ProgressStyle::with_template(BAR_TEMPLATE)?.progress_chars("##-"));
            bar.set_message("Inserting docs ");
            bar
        } else {
            ProgressBar::hidden()
        };
        bar.set_length(total);
        Ok(Progress {
            completed: Arc::new(AtomicU64::new(0)),
            bar,
        })
    }

    /// one more insert attempt is done.
    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        self.bar.inc(1);
    }

    /// how many attempts are done so far.
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Stop the bar and return completed count.
    pub fn finish(&self) -> u64 {
        self.bar.finish();
        self.completed()
    }
}
