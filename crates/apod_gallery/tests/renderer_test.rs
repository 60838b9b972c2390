//! Gallery rendering tests with in-memory stores and fetchers.

use apod_core::{MediaType, PictureRecord, Quality, StorageBackend, UploadOutcome, UploadResult};
use apod_error::{ApodResult, StorageError, StorageErrorKind};
use apod_gallery::{GalleryRenderer, asset_file_name};
use apod_interface::{AssetFetcher, ContentStore};
use apod_storage::AssetLayout;
use apod_test_utils::{date, image_record, video_record};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const GATEWAY: &str = "https://gateway.test/ipfs/";

/// Stores the URLs it has a hash for; everything else fails.
#[derive(Default)]
struct FakeStore {
    hashes: HashMap<String, String>,
    url_uploads: RefCell<Vec<String>>,
    file_uploads: RefCell<Vec<PathBuf>>,
}

impl FakeStore {
    fn storing(mut self, url: &str, hash: &str) -> Self {
        self.hashes.insert(url.to_string(), hash.to_string());
        self
    }
}

impl ContentStore for FakeStore {
    fn upload_from_url(&self, url: &str) -> UploadOutcome {
        self.url_uploads.borrow_mut().push(url.to_string());
        match self.hashes.get(url) {
            Some(hash) => UploadOutcome::Stored(UploadResult::new(hash.as_str(), "image.jpg", 10)),
            None => UploadOutcome::Failed,
        }
    }

    fn upload_local_file(&self, path: &Path) -> UploadOutcome {
        self.file_uploads.borrow_mut().push(path.to_path_buf());
        UploadOutcome::Stored(UploadResult::new("QmPage", "NasaAPOD.html", 100))
    }
}

/// Records download requests, failing for URLs listed in `broken`.
#[derive(Default)]
struct FakeFetcher {
    broken: Vec<String>,
    downloads: RefCell<Vec<(String, PathBuf)>>,
}

impl AssetFetcher for FakeFetcher {
    fn ensure_downloaded(&self, url: &str, destination: &Path) -> ApodResult<()> {
        self.downloads
            .borrow_mut()
            .push((url.to_string(), destination.to_path_buf()));
        if self.broken.iter().any(|b| b == url) {
            return Err(StorageError::new(StorageErrorKind::Download(url.to_string())).into());
        }
        Ok(())
    }
}

fn other_record() -> PictureRecord {
    PictureRecord::builder()
        .date(date(2024, 1, 5))
        .title("Interactive")
        .media_type(MediaType::Other("interactive".to_string()))
        .standard_url("https://example.test/app")
        .build()
        .unwrap()
}

#[test]
fn content_store_needs_both_uploads() {
    let half = image_record(
        date(2024, 1, 2),
        "Half Stored",
        "https://example.test/sd1.jpg",
        "https://example.test/hd1.jpg",
    );
    let whole = image_record(
        date(2024, 1, 1),
        "Fully Stored",
        "https://example.test/sd2.jpg",
        "https://example.test/hd2.jpg",
    );
    let store = FakeStore::default()
        .storing("https://example.test/sd1.jpg", "QmSd1")
        .storing("https://example.test/sd2.jpg", "QmSd2")
        .storing("https://example.test/hd2.jpg", "QmHd2");

    let renderer = GalleryRenderer::content_store(&store, GATEWAY);
    assert_eq!(renderer.storage_backend(), StorageBackend::ContentStore);
    let page = renderer.render(&[half, whole]).unwrap();

    assert!(!page.contains("Half Stored"));
    assert!(page.contains("Fully Stored"));
    assert!(page.contains("src='https://gateway.test/ipfs/QmHd2'"));
    assert!(page.contains("lowsrc='https://gateway.test/ipfs/QmSd2'"));
    // Both resolutions are attempted even after the first fails.
    assert_eq!(store.url_uploads.borrow().len(), 4);
}

#[test]
fn image_without_hd_url_is_skipped_by_content_store() {
    let record = PictureRecord::builder()
        .date(date(2024, 1, 3))
        .title("Standard Only")
        .media_type(MediaType::Image)
        .standard_url("https://example.test/sd.jpg")
        .build()
        .unwrap();
    let store = FakeStore::default().storing("https://example.test/sd.jpg", "QmSd");

    let page = GalleryRenderer::content_store(&store, GATEWAY)
        .render(&[record])
        .unwrap();

    assert!(!page.contains("Standard Only"));
}

#[test]
fn video_embeds_remote_url_without_storage() {
    let store = FakeStore::default();
    let fetcher = FakeFetcher::default();
    let tmp = tempfile::tempdir().unwrap();
    let layout = AssetLayout::new(tmp.path().join("images"));
    let record = video_record(
        date(2024, 2, 1),
        "Launch Replay",
        "https://video.test/embed/abc?rel=0&x=1",
    );

    let stored = GalleryRenderer::content_store(&store, GATEWAY)
        .render(std::slice::from_ref(&record))
        .unwrap();
    let local = GalleryRenderer::local(&fetcher, &layout)
        .render(std::slice::from_ref(&record))
        .unwrap();

    for page in [&stored, &local] {
        assert!(page.contains(
            "<embed class='nasaVideo' src='https://video.test/embed/abc?rel=0&amp;x=1'"
        ));
    }
    assert!(store.url_uploads.borrow().is_empty());
    assert!(fetcher.downloads.borrow().is_empty());
}

#[test]
fn local_backend_downloads_into_tier_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = AssetLayout::new(tmp.path().join("images"));
    let fetcher = FakeFetcher::default();
    let record = image_record(
        date(2024, 3, 4),
        "What's Up?",
        "https://example.test/sd.jpg",
        "https://example.test/hd.jpg",
    );

    let renderer = GalleryRenderer::local(&fetcher, &layout);
    assert_eq!(renderer.storage_backend(), StorageBackend::Local);
    let page = renderer.render(&[record]).unwrap();

    let sd_path = layout.path_for(
        Quality::Standard,
        &asset_file_name("2024-03-04", Quality::Standard, "What's Up?"),
    );
    let hd_path = layout.path_for(
        Quality::High,
        &asset_file_name("2024-03-04", Quality::High, "What's Up?"),
    );
    assert!(sd_path.ends_with("SD/Nasa-APOD-2024-03-04-SD-WHATS-UP-.jpg"));
    assert!(layout.dir(Quality::Standard).is_dir());
    assert!(layout.dir(Quality::High).is_dir());

    assert_eq!(
        *fetcher.downloads.borrow(),
        vec![
            ("https://example.test/sd.jpg".to_string(), sd_path.clone()),
            ("https://example.test/hd.jpg".to_string(), hd_path.clone()),
        ]
    );
    assert!(page.contains(&format!("src='{}'", hd_path.display())));
    assert!(page.contains(&format!("lowsrc='{}'", sd_path.display())));
}

#[test]
fn remote_links_point_at_original_urls() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = AssetLayout::new(tmp.path());
    let fetcher = FakeFetcher::default();
    let record = image_record(
        date(2024, 3, 5),
        "Remote",
        "https://example.test/sd.jpg",
        "https://example.test/hd.jpg",
    );

    let page = GalleryRenderer::local(&fetcher, &layout)
        .with_remote_links(true)
        .render(&[record])
        .unwrap();

    assert!(page.contains("src='https://example.test/hd.jpg'"));
    assert!(page.contains("lowsrc='https://example.test/sd.jpg'"));
    assert_eq!(fetcher.downloads.borrow().len(), 2);
}

#[test]
fn failed_download_skips_only_that_day() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = AssetLayout::new(tmp.path());
    let fetcher = FakeFetcher {
        broken: vec!["https://example.test/bad-hd.jpg".to_string()],
        ..FakeFetcher::default()
    };
    let records = [
        image_record(
            date(2024, 4, 2),
            "Broken",
            "https://example.test/bad-sd.jpg",
            "https://example.test/bad-hd.jpg",
        ),
        image_record(
            date(2024, 4, 1),
            "Fine",
            "https://example.test/sd.jpg",
            "https://example.test/hd.jpg",
        ),
    ];

    let page = GalleryRenderer::local(&fetcher, &layout)
        .render(&records)
        .unwrap();

    assert!(!page.contains("Broken"));
    assert!(page.contains("Fine"));
}

#[test]
fn unsupported_media_type_is_left_out() {
    let store = FakeStore::default();
    let page = GalleryRenderer::content_store(&store, GATEWAY)
        .render(&[other_record()])
        .unwrap();

    assert!(!page.contains("Interactive"));
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.trim_end().ends_with("</html>"));
}

#[test]
fn fragments_follow_record_order() {
    let store = FakeStore::default();
    let records = [
        video_record(date(2024, 6, 3), "Newest", "https://video.test/1"),
        video_record(date(2024, 6, 2), "Middle", "https://video.test/2"),
        video_record(date(2024, 6, 1), "Oldest", "https://video.test/3"),
    ];

    let page = GalleryRenderer::content_store(&store, GATEWAY)
        .render(&records)
        .unwrap();

    let newest = page.find("Newest").unwrap();
    let middle = page.find("Middle").unwrap();
    let oldest = page.find("Oldest").unwrap();
    assert!(newest < middle && middle < oldest);
}

#[test]
fn write_replaces_page_and_publishes_it() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("site").join("NasaAPOD.html");
    std::fs::create_dir_all(output.parent().unwrap()).unwrap();
    std::fs::write(&output, "stale contents").unwrap();
    let store = FakeStore::default();
    let records = [
        video_record(date(2024, 7, 2), "Clip", "https://video.test/clip"),
        other_record(),
    ];

    let report = GalleryRenderer::content_store(&store, GATEWAY)
        .write(&records, &output)
        .unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(!written.contains("stale contents"));
    assert!(written.contains("Clip"));
    assert_eq!(*report.rendered(), 1);
    assert_eq!(*report.skipped(), 1);
    assert_eq!(report.output(), &output);
    assert_eq!(*store.file_uploads.borrow(), vec![output.clone()]);
}

#[test]
fn local_write_does_not_publish() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = AssetLayout::new(tmp.path().join("images"));
    let fetcher = FakeFetcher::default();
    let output = tmp.path().join("NasaAPOD.html");

    let report = GalleryRenderer::local(&fetcher, &layout)
        .write(&[], &output)
        .unwrap();

    assert_eq!(*report.rendered(), 0);
    assert!(output.is_file());
}

#[test]
fn local_links_never_contain_a_fragment_marker() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = AssetLayout::new(tmp.path().join("images"));
    let fetcher = FakeFetcher::default();
    let record = image_record(
        date(2024, 8, 1),
        "NGC #1",
        "https://example.test/sd.jpg",
        "https://example.test/hd.jpg",
    );

    let page = GalleryRenderer::local(&fetcher, &layout)
        .render(&[record])
        .unwrap();

    let img = page
        .lines()
        .find(|line| line.contains("nasaPic"))
        .unwrap();
    assert!(img.contains("Nasa-APOD-2024-08-01-HD-NGC--1.jpg"));
    let links = &img[img.find("src=").unwrap()..img.find("alt=").unwrap()];
    assert!(!links.contains('#'));
}
