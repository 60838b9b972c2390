//! Core traits.

use apod_core::{PictureRecord, UploadOutcome};
use apod_error::ApodResult;
use chrono::NaiveDate;
use std::path::Path;

/// Source of picture-of-the-day metadata.
///
/// # Example
///
/// ```
/// use apod_core::{MediaType, PictureRecord};
/// use apod_error::ApodResult;
/// use apod_interface::PictureSource;
/// use chrono::NaiveDate;
///
/// struct Fixed;
///
/// impl PictureSource for Fixed {
///     fn fetch(&self, date: Option<NaiveDate>, _prefer_hd: bool) -> ApodResult<PictureRecord> {
///         let date = date.unwrap_or_else(|| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
///         Ok(PictureRecord::builder()
///             .date(date)
///             .title("Fixed")
///             .media_type(MediaType::Image)
///             .build()
///             .unwrap())
///     }
/// }
///
/// let record = Fixed.fetch(None, false).unwrap();
/// assert_eq!(record.title(), "Fixed");
/// ```
pub trait PictureSource {
    /// Fetch the entry for `date`, or the latest entry when `date` is `None`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success statuses, bodies that are not a
    /// record, and records for a day other than the one requested.
    fn fetch(&self, date: Option<NaiveDate>, prefer_hd: bool) -> ApodResult<PictureRecord>;
}

/// Content-addressed store that accepts uploads.
///
/// Failures never escape as errors; they come back as
/// [`UploadOutcome::Failed`] so callers decide visibly what a missing upload
/// means.
pub trait ContentStore {
    /// Download `url` fully into memory, then add it to the store.
    fn upload_from_url(&self, url: &str) -> UploadOutcome;

    /// Read a local file fully into memory, then add it to the store.
    fn upload_local_file(&self, path: &Path) -> UploadOutcome;
}

/// Downloads remote assets to local paths.
pub trait AssetFetcher {
    /// Download `url` to `destination` unless a file already exists there.
    ///
    /// Existing files are never re-downloaded or overwritten.
    ///
    /// # Errors
    ///
    /// Transport and filesystem errors propagate; nothing is retried.
    fn ensure_downloaded(&self, url: &str, destination: &Path) -> ApodResult<()>;
}
