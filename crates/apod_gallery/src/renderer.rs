//! Static gallery rendering.

use crate::filename::asset_file_name;
use crate::html;
use apod_core::{MediaType, PictureRecord, Quality, StorageBackend, UploadOutcome};
use apod_error::{ApodResult, StorageError, StorageErrorKind};
use apod_interface::{AssetFetcher, ContentStore};
use apod_storage::AssetLayout;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Where rendered images come from.
pub enum GalleryBackend<'a> {
    /// Download both resolutions under `layout` and link to the local copies.
    Local {
        /// Downloader for the image files
        fetcher: &'a dyn AssetFetcher,
        /// Images root and tier directories
        layout: &'a AssetLayout,
        /// Link `<img>` tags to the remote URLs instead of the local copies
        remote_links: bool,
    },
    /// Upload both resolutions and link through a gateway.
    ContentStore {
        /// Store receiving the uploads
        store: &'a dyn ContentStore,
        /// Gateway prefix the content hash is appended to
        gateway: String,
    },
}

/// Counts from one rendering pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct GalleryReport {
    /// Records that produced a fragment
    rendered: usize,
    /// Records that produced nothing
    skipped: usize,
    /// Where the page was written
    output: PathBuf,
}

/// Renders records into a single static HTML page.
pub struct GalleryRenderer<'a> {
    backend: GalleryBackend<'a>,
}

impl<'a> GalleryRenderer<'a> {
    /// Renderer over an explicit backend.
    pub fn new(backend: GalleryBackend<'a>) -> Self {
        Self { backend }
    }

    /// Local-disk renderer linking to the downloaded copies.
    pub fn local(fetcher: &'a dyn AssetFetcher, layout: &'a AssetLayout) -> Self {
        Self::new(GalleryBackend::Local {
            fetcher,
            layout,
            remote_links: false,
        })
    }

    /// Keep downloading locally but link `<img>` tags to the remote URLs.
    ///
    /// No effect on the content-store backend.
    pub fn with_remote_links(mut self, remote: bool) -> Self {
        if let GalleryBackend::Local { remote_links, .. } = &mut self.backend {
            *remote_links = remote;
        }
        self
    }

    /// Content-store renderer linking through `gateway`.
    pub fn content_store(store: &'a dyn ContentStore, gateway: impl Into<String>) -> Self {
        Self::new(GalleryBackend::ContentStore {
            store,
            gateway: gateway.into(),
        })
    }

    /// Which backend this renderer uses.
    pub fn storage_backend(&self) -> StorageBackend {
        match self.backend {
            GalleryBackend::Local { .. } => StorageBackend::Local,
            GalleryBackend::ContentStore { .. } => StorageBackend::ContentStore,
        }
    }

    /// Render all records, in order, into one HTML document.
    ///
    /// Per-record problems (unsupported media, failed downloads or uploads)
    /// drop that record and move on.
    ///
    /// # Errors
    ///
    /// Fails only when the local image directories cannot be created.
    pub fn render(&self, records: &[PictureRecord]) -> ApodResult<String> {
        self.render_counted(records).map(|(page, _, _)| page)
    }

    fn render_counted(&self, records: &[PictureRecord]) -> ApodResult<(String, usize, usize)> {
        if let GalleryBackend::Local { layout, .. } = &self.backend {
            layout.ensure_dirs()?;
        }

        let fragments: Vec<String> = records
            .iter()
            .filter_map(|record| self.render_fragment(record))
            .collect();

        let rendered = fragments.len();
        let skipped = records.len() - rendered;
        Ok((html::document(&fragments), rendered, skipped))
    }

    /// Fragment for a single record, or `None` when it contributes nothing.
    #[instrument(skip(self, record), fields(date = %record.date(), media_type = %record.media_type()))]
    pub fn render_fragment(&self, record: &PictureRecord) -> Option<String> {
        let fragment = match record.media_type() {
            MediaType::Image => self.image_fragment(record),
            MediaType::Video => Some(html::video_fragment(record)),
            MediaType::Other(other) => {
                warn!(media_type = %other, "Media type is not included in the gallery");
                None
            }
        };

        if fragment.is_some() {
            info!(
                title = %record.title(),
                url = record.sd_url().unwrap_or_default(),
                "Rendered {}",
                record.media_type()
            );
        }
        fragment
    }

    fn image_fragment(&self, record: &PictureRecord) -> Option<String> {
        match &self.backend {
            GalleryBackend::Local {
                fetcher,
                layout,
                remote_links,
            } => match store_locally(*fetcher, layout, record) {
                Ok((sd, hd)) => {
                    info!(sd = %sd, hd = %hd, "Stored images locally");
                    Some(if *remote_links {
                        html::image_fragment(
                            record,
                            record.hd_url().unwrap_or_default(),
                            record.sd_url().unwrap_or_default(),
                        )
                    } else {
                        html::image_fragment(record, &hd, &sd)
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Image download failed, skipping day");
                    None
                }
            },
            GalleryBackend::ContentStore { store, gateway } => {
                let hd = upload(*store, record, Quality::High);
                let sd = upload(*store, record, Quality::Standard);
                match (hd, sd) {
                    (UploadOutcome::Stored(hd), UploadOutcome::Stored(sd)) => {
                        let hd_url = hd.gateway_url(gateway);
                        let sd_url = sd.gateway_url(gateway);
                        info!(sd = %sd_url, hd = %hd_url, "Stored images in content store");
                        Some(html::image_fragment(record, &hd_url, &sd_url))
                    }
                    _ => {
                        warn!("Upload incomplete, skipping day");
                        None
                    }
                }
            }
        }
    }

    /// Render the page, replace `output`, and report what happened.
    ///
    /// With the content-store backend the finished page is uploaded as well;
    /// the outcome is only logged.
    ///
    /// # Errors
    ///
    /// Local directory or file write failures.
    #[instrument(skip(self, records), fields(count = records.len(), output = %output.display()))]
    pub fn write(&self, records: &[PictureRecord], output: &Path) -> ApodResult<GalleryReport> {
        let (page, rendered, skipped) = self.render_counted(records)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }
        std::fs::write(output, page).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                output.display(),
                e
            )))
        })?;
        info!(rendered, skipped, "Wrote gallery page");

        if let GalleryBackend::ContentStore { store, gateway } = &self.backend {
            match store.upload_local_file(output) {
                UploadOutcome::Stored(result) => {
                    info!(url = %result.gateway_url(gateway), "Published gallery page");
                }
                UploadOutcome::Failed => warn!("Gallery page upload failed"),
            }
        }

        Ok(GalleryReport {
            rendered,
            skipped,
            output: output.to_path_buf(),
        })
    }
}

/// Download both resolutions; a missing URL leaves an empty location.
fn store_locally(
    fetcher: &dyn AssetFetcher,
    layout: &AssetLayout,
    record: &PictureRecord,
) -> ApodResult<(String, String)> {
    let date = record.date_string();
    let mut locations = [String::new(), String::new()];

    for (slot, quality) in [Quality::Standard, Quality::High].into_iter().enumerate() {
        let Some(url) = record.url_for(quality) else {
            debug!(%quality, "No URL for this resolution");
            continue;
        };
        let path = layout.path_for(quality, &asset_file_name(&date, quality, record.title()));
        fetcher.ensure_downloaded(url, &path)?;
        locations[slot] = link_path(&path);
    }

    let [sd, hd] = locations;
    Ok((sd, hd))
}

fn upload(store: &dyn ContentStore, record: &PictureRecord, quality: Quality) -> UploadOutcome {
    match record.url_for(quality) {
        Some(url) => store.upload_from_url(url),
        None => {
            debug!(%quality, "No URL for this resolution");
            UploadOutcome::Failed
        }
    }
}

fn link_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
