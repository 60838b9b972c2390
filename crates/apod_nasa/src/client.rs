use apod_core::PictureRecord;
use apod_error::{ApodResult, FetchError, FetchErrorKind};
use apod_interface::PictureSource;
use chrono::NaiveDate;
use reqwest::blocking::Client;
use tracing::{debug, error, instrument, warn};

/// Public APOD endpoint.
pub const APOD_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

/// APOD metadata client.
#[derive(Debug, Clone)]
pub struct NasaClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl NasaClient {
    /// Creates a client for the public endpoint.
    ///
    /// # Arguments
    ///
    /// * `api_key` - api.nasa.gov key (`DEMO_KEY` works with low rate limits)
    pub fn new(api_key: impl Into<String>) -> Self {
        debug!("Creating NASA APOD client");
        Self {
            client: Client::new(),
            endpoint: APOD_ENDPOINT.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Endpoint the client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query(&self, date: Option<NaiveDate>, prefer_hd: bool) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("api_key", self.api_key.clone()),
            ("hd", prefer_hd.to_string()),
        ];
        if let Some(date) = date {
            query.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        query
    }

    /// Fetch one day's record, or the latest when `date` is `None`.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub fn fetch_record(
        &self,
        date: Option<NaiveDate>,
        prefer_hd: bool,
    ) -> Result<PictureRecord, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query(date, prefer_hd))
            .send()
            .map_err(|e| {
                debug!(error = %e, "APOD request failed");
                FetchError::new(FetchErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| FetchError::new(FetchErrorKind::Http(e.to_string())))?;

        if !status.is_success() {
            debug!(status = %status, body = %body, "APOD endpoint returned error");
            return Err(FetchError::new(FetchErrorKind::Status {
                status: status.as_u16(),
                message: body,
            }));
        }

        if body.trim().is_empty() {
            return Err(FetchError::new(FetchErrorKind::Parse(
                "empty response body".to_string(),
            )));
        }

        let record: PictureRecord = serde_json::from_str(&body).map_err(|e| {
            debug!(error = %e, "Failed to parse APOD response");
            FetchError::new(FetchErrorKind::Parse(e.to_string()))
        })?;

        if let Some(requested) = date {
            if record.date() != &requested {
                warn!(requested = %requested, received = %record.date(), "APOD returned another day");
                return Err(FetchError::new(FetchErrorKind::DateMismatch {
                    requested: requested.to_string(),
                    received: record.date().to_string(),
                }));
            }
        }

        debug!(date = %record.date(), title = %record.title(), "Received APOD record");
        Ok(record)
    }

    /// Fetch a day's record and download its image.
    ///
    /// Picks `hdurl` when `prefer_hd` is set and present, otherwise `url`,
    /// falling back to whichever one exists.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the record has no image URL or the image download
    /// fails; metadata failures are still errors.
    #[instrument(skip(self))]
    pub fn fetch_image_bytes(
        &self,
        date: Option<NaiveDate>,
        prefer_hd: bool,
    ) -> ApodResult<Option<Vec<u8>>> {
        let record = self.fetch_record(date, prefer_hd)?;
        Ok(self.image_bytes(&record, prefer_hd))
    }

    /// Download the image of an already fetched record, with the same URL
    /// choice and failure handling as [`fetch_image_bytes`](Self::fetch_image_bytes).
    #[instrument(skip(self, record), fields(date = %record.date()))]
    pub fn image_bytes(&self, record: &PictureRecord, prefer_hd: bool) -> Option<Vec<u8>> {
        let Some(url) = record.image_url(prefer_hd) else {
            warn!("Record has no image URL");
            return None;
        };
        self.download(url)
    }

    fn download(&self, url: &str) -> Option<Vec<u8>> {
        let bytes = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes());

        match bytes {
            Ok(bytes) => {
                debug!(url, size = bytes.len(), "Downloaded image");
                Some(bytes.to_vec())
            }
            Err(e) => {
                error!(url, error = %e, "Image download failed");
                None
            }
        }
    }
}

impl PictureSource for NasaClient {
    fn fetch(&self, date: Option<NaiveDate>, prefer_hd: bool) -> ApodResult<PictureRecord> {
        Ok(self.fetch_record(date, prefer_hd)?)
    }
}
