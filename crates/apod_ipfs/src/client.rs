use crate::AddOptions;
use apod_core::{PeerInfo, UploadOutcome, UploadResult};
use apod_error::{ContentStoreError, ContentStoreErrorKind};
use apod_interface::ContentStore;
use reqwest::Url;
use reqwest::blocking::{Client, multipart};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Path of the connected-peers endpoint.
pub const PEERS_PATH: &str = "/api/v0/swarm/peers";
/// Path of the add-file endpoint.
pub const ADD_PATH: &str = "/api/v0/add/";

#[derive(Debug, Deserialize)]
struct PeersReply {
    #[serde(rename = "Peers", default)]
    peers: Option<Vec<PeerInfo>>,
}

/// Content-store client.
///
/// Built with an optional host. Without one the client is disabled: peer
/// listing yields nothing and every upload fails.
#[derive(Debug, Clone)]
pub struct IpfsClient {
    client: Client,
    host: Option<String>,
    add_options: AddOptions,
    peers: Vec<PeerInfo>,
}

impl IpfsClient {
    /// Create a client with default add options.
    ///
    /// When a host is given, peers are listed once straight away as a
    /// connectivity probe. The probe never fails construction.
    pub fn new(host: Option<String>) -> Self {
        Self::with_add_options(host, AddOptions::default())
    }

    /// Create a client with explicit add options.
    #[instrument(skip(add_options))]
    pub fn with_add_options(host: Option<String>, add_options: AddOptions) -> Self {
        let host = host
            .map(|h| h.trim().trim_end_matches('/').to_string())
            .filter(|h| !h.is_empty());

        let mut client = Self {
            client: Client::new(),
            host,
            add_options,
            peers: Vec::new(),
        };

        if client.host.is_some() {
            let count = client.list_peers().len();
            debug!(peers = count, "Content store probe finished");
        }

        client
    }

    /// Whether a host is configured.
    pub fn is_enabled(&self) -> bool {
        self.host.is_some()
    }

    /// Configured host, without a trailing slash.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Peers from the last [`list_peers`](Self::list_peers) call.
    pub fn peers(&self) -> &[PeerInfo] {
        &self.peers
    }

    /// Refresh and return the connected peers.
    ///
    /// Any failure, including a missing host, leaves the cache empty.
    #[instrument(skip(self), fields(host = ?self.host))]
    pub fn list_peers(&mut self) -> &[PeerInfo] {
        self.peers = match self.try_list_peers() {
            Ok(peers) => peers,
            Err(e) => {
                debug!(error = %e, "Peer listing failed");
                Vec::new()
            }
        };
        &self.peers
    }

    fn endpoint(&self, path: &str) -> Result<String, ContentStoreError> {
        self.host
            .as_deref()
            .map(|host| format!("{}{}", host, path))
            .ok_or_else(|| ContentStoreError::new(ContentStoreErrorKind::Disabled))
    }

    fn try_list_peers(&self) -> Result<Vec<PeerInfo>, ContentStoreError> {
        let url = self.endpoint(PEERS_PATH)?;

        let response = self
            .client
            .post(&url)
            .send()
            .map_err(|e| ContentStoreError::new(ContentStoreErrorKind::Http(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ContentStoreError::new(ContentStoreErrorKind::Status {
                status: status.as_u16(),
                message,
            }));
        }

        let reply: PeersReply = response
            .json()
            .map_err(|e| ContentStoreError::new(ContentStoreErrorKind::Parse(e.to_string())))?;

        Ok(reply.peers.unwrap_or_default())
    }

    /// Download `url` fully into memory, then add it to the store.
    #[instrument(skip(self))]
    pub fn try_upload_from_url(&self, url: &str) -> Result<UploadResult, ContentStoreError> {
        // Fail before downloading anything when there is nowhere to upload.
        self.endpoint(ADD_PATH)?;

        let data = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .map_err(|e| ContentStoreError::new(ContentStoreErrorKind::Download(e.to_string())))?;

        self.add_bytes(data.to_vec(), file_name_from_url(url))
    }

    /// Read a local file fully into memory, then add it to the store.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn try_upload_local_file(&self, path: &Path) -> Result<UploadResult, ContentStoreError> {
        self.endpoint(ADD_PATH)?;

        let data = std::fs::read(path).map_err(|e| {
            ContentStoreError::new(ContentStoreErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        self.add_bytes(data, name)
    }

    fn add_bytes(&self, data: Vec<u8>, file_name: String) -> Result<UploadResult, ContentStoreError> {
        let url = self.endpoint(ADD_PATH)?;
        let size = data.len();

        let part = multipart::Part::bytes(data)
            .file_name(file_name.clone())
            .mime_str("application/octet-stream")
            .map_err(|e| ContentStoreError::new(ContentStoreErrorKind::Http(e.to_string())))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .query(&self.add_options)
            .multipart(form)
            .send()
            .map_err(|e| ContentStoreError::new(ContentStoreErrorKind::Http(e.to_string())))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ContentStoreError::new(ContentStoreErrorKind::Http(e.to_string())))?;

        if !status.is_success() {
            return Err(ContentStoreError::new(ContentStoreErrorKind::Status {
                status: status.as_u16(),
                message: body,
            }));
        }

        let result = parse_add_reply(&body, &file_name)?;
        info!(
            name = %file_name,
            size,
            hash = %result.content_hash(),
            "Added file to content store"
        );
        Ok(result)
    }
}

impl ContentStore for IpfsClient {
    fn upload_from_url(&self, url: &str) -> UploadOutcome {
        match self.try_upload_from_url(url) {
            Ok(result) => UploadOutcome::Stored(result),
            Err(e) => {
                warn!(url, error = %e, "Upload from URL failed");
                UploadOutcome::Failed
            }
        }
    }

    fn upload_local_file(&self, path: &Path) -> UploadOutcome {
        match self.try_upload_local_file(path) {
            Ok(result) => UploadOutcome::Stored(result),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Upload of local file failed");
                UploadOutcome::Failed
            }
        }
    }
}

/// The add endpoint streams one JSON object per line: the file itself, then
/// any wrapping directory. Pick the entry named after the upload, falling
/// back to the first entry.
fn parse_add_reply(body: &str, file_name: &str) -> Result<UploadResult, ContentStoreError> {
    let entries = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str::<UploadResult>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ContentStoreError::new(ContentStoreErrorKind::Parse(e.to_string())))?;

    let position = entries
        .iter()
        .position(|entry| entry.reported_name() == file_name)
        .unwrap_or(0);

    entries.into_iter().nth(position).ok_or_else(|| {
        ContentStoreError::new(ContentStoreErrorKind::Parse("empty reply".to_string()))
    })
}

fn file_name_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "file".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_last_path_segment() {
        assert_eq!(
            file_name_from_url("https://apod.nasa.gov/apod/image/2102/galaxy_1024.jpg?x=1"),
            "galaxy_1024.jpg"
        );
        assert_eq!(file_name_from_url("https://apod.nasa.gov/"), "file");
        assert_eq!(file_name_from_url("not a url"), "file");
    }

    #[test]
    fn add_reply_skips_wrapping_directory() {
        let body = "{\"Name\":\"a.jpg\",\"Hash\":\"QmFile\",\"Size\":\"10\"}\n{\"Name\":\"\",\"Hash\":\"QmDir\",\"Size\":\"60\"}\n";
        let result = parse_add_reply(body, "a.jpg").unwrap();
        assert_eq!(result.content_hash(), "QmFile");
    }

    #[test]
    fn add_reply_without_matching_name_uses_first_entry() {
        let body = "{\"Name\":\"QmFile\",\"Hash\":\"QmFile\",\"Size\":\"10\"}\n{\"Name\":\"\",\"Hash\":\"QmDir\",\"Size\":\"60\"}";
        let result = parse_add_reply(body, "renamed.jpg").unwrap();
        assert_eq!(result.content_hash(), "QmFile");
    }

    #[test]
    fn single_line_add_reply() {
        let body = r#"{"Name":"a.jpg","Hash":"QmOnly","Size":10}"#;
        assert_eq!(parse_add_reply(body, "a.jpg").unwrap().content_hash(), "QmOnly");
    }

    #[test]
    fn empty_add_reply_is_an_error() {
        let err = parse_add_reply("  \n", "a.jpg").unwrap_err();
        assert!(matches!(err.kind, ContentStoreErrorKind::Parse(_)));
    }
}
