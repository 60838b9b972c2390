//! Day-by-day backfill.

use apod_core::PictureRecord;
use apod_interface::PictureSource;
use chrono::{Local, NaiveDate};
use tracing::{debug, info, instrument, warn};

/// Consecutive failures after which a backfill stops.
pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: u32 = 100;

/// Walks backward from a start date fetching one record per day.
///
/// A day counts as collected only when the fetch succeeds with a non-empty
/// title. Every other outcome, whether no entry was published or the request
/// failed, counts toward the consecutive-failure threshold. Reaching the
/// threshold ends the backfill; a long enough outage therefore truncates the
/// history silently.
pub struct BackfillCollector<'a> {
    source: &'a dyn PictureSource,
    start: NaiveDate,
    prefer_hd: bool,
    max_days: Option<u32>,
}

impl<'a> BackfillCollector<'a> {
    /// Collector starting today (local time).
    pub fn new(source: &'a dyn PictureSource) -> Self {
        Self {
            source,
            start: Local::now().date_naive(),
            prefer_hd: false,
            max_days: None,
        }
    }

    /// Start from `date` instead of today.
    pub fn starting_at(mut self, date: NaiveDate) -> Self {
        self.start = date;
        self
    }

    /// Ask the endpoint for high resolution URLs.
    pub fn prefer_hd(mut self, prefer_hd: bool) -> Self {
        self.prefer_hd = prefer_hd;
        self
    }

    /// Stop after scanning this many calendar days, even without failures.
    pub fn with_day_limit(mut self, max_days: Option<u32>) -> Self {
        self.max_days = max_days;
        self
    }

    /// Run the backfill.
    ///
    /// Records come back most recent first, in the order fetched.
    #[instrument(skip(self), fields(start = %self.start, max_days = ?self.max_days))]
    pub fn collect(&self, max_consecutive_failures: u32) -> Vec<PictureRecord> {
        let mut records = Vec::new();
        let mut failures = 0;
        let mut scanned = 0;
        let mut day = Some(self.start);

        while failures < max_consecutive_failures {
            if self.max_days.is_some_and(|limit| scanned >= limit) {
                debug!(scanned, "Day limit reached");
                break;
            }
            let Some(current) = day else {
                warn!("Reached the earliest representable date");
                break;
            };
            scanned += 1;

            match self.source.fetch(Some(current), self.prefer_hd) {
                Ok(record) if !record.title().is_empty() => {
                    failures = 0;
                    info!(
                        date = %current,
                        title = %record.title(),
                        collected = records.len() + 1,
                        "Collected day"
                    );
                    records.push(record);
                }
                Ok(_) => {
                    failures += 1;
                    debug!(date = %current, failures, "Entry has no title");
                }
                Err(e) => {
                    failures += 1;
                    debug!(date = %current, failures, error = %e, "No entry");
                }
            }

            day = current.pred_opt();
        }

        info!(collected = records.len(), scanned, "Backfill finished");
        records
    }
}
