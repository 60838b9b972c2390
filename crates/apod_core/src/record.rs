//! One calendar day's picture-of-the-day entry.

use crate::{MediaType, Quality};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metadata for one calendar day.
///
/// Field names on the wire match the APOD endpoint (`url`, `hdurl`,
/// `copyright`, `service_version`), and the snapshot file stores records in
/// the same shape. Records are immutable once built.
///
/// # Examples
///
/// ```
/// use apod_core::{MediaType, PictureRecord};
/// use chrono::NaiveDate;
///
/// let record = PictureRecord::builder()
///     .date(NaiveDate::from_ymd_opt(2020, 6, 16).unwrap())
///     .title("Milky Way over Spider Rock")
///     .media_type(MediaType::Image)
///     .standard_url("https://apod.nasa.gov/apod/image/2006/SpiderRock_1024.jpg")
///     .build()
///     .unwrap();
///
/// assert_eq!(record.hd_url(), None);
/// assert_eq!(record.image_url(true), record.sd_url());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct PictureRecord {
    /// Publication date, `YYYY-MM-DD` on the wire
    date: NaiveDate,
    /// Entry title
    #[serde(default)]
    #[builder(default)]
    title: String,
    /// Long-form description
    #[serde(default)]
    #[builder(default)]
    explanation: String,
    /// Image, video, or anything else the endpoint reports
    media_type: MediaType,
    /// Standard resolution URL (or the video URL)
    #[serde(rename = "url", default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    standard_url: Option<String>,
    /// High resolution URL
    #[serde(rename = "hdurl", default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    high_res_url: Option<String>,
    /// Copyright holder, absent for public-domain entries
    #[serde(rename = "copyright", default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    copyright_notice: Option<String>,
    /// Service version reported by the endpoint
    #[serde(rename = "service_version", default)]
    #[builder(default)]
    api_version: String,
}

impl PictureRecord {
    /// Start building a record.
    pub fn builder() -> PictureRecordBuilder {
        PictureRecordBuilder::default()
    }

    /// Standard resolution URL, ignoring empty strings.
    pub fn sd_url(&self) -> Option<&str> {
        non_empty(&self.standard_url)
    }

    /// High resolution URL, ignoring empty strings.
    pub fn hd_url(&self) -> Option<&str> {
        non_empty(&self.high_res_url)
    }

    /// URL for a specific tier, without fallback.
    pub fn url_for(&self, quality: Quality) -> Option<&str> {
        match quality {
            Quality::Standard => self.sd_url(),
            Quality::High => self.hd_url(),
        }
    }

    /// Preferred image URL, falling back to the other resolution when the
    /// preferred one is missing.
    pub fn image_url(&self, prefer_hd: bool) -> Option<&str> {
        if prefer_hd {
            self.hd_url().or_else(|| self.sd_url())
        } else {
            self.sd_url().or_else(|| self.hd_url())
        }
    }

    /// Copyright line, ignoring empty or whitespace-only values.
    pub fn copyright_line(&self) -> Option<&str> {
        self.copyright_notice
            .as_deref()
            .map(str::trim)
            .filter(|notice| !notice.is_empty())
    }

    /// Date formatted the way the endpoint and asset filenames expect.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
