//! Command handlers.

use super::{CollectArgs, RenderArgs};
use apod::{
    ApodConfig, ApodResult, AssetLayout, BackfillCollector, ConfigError, GalleryRenderer,
    GalleryReport, HttpAssetFetcher, IpfsClient, JsonError, NasaClient, PictureRecord,
    SnapshotStore, StorageBackend, StorageError, StorageErrorKind,
};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{info, instrument, warn};

fn nasa_client(config: &ApodConfig) -> ApodResult<NasaClient> {
    let key = config.require_api_key()?;
    Ok(NasaClient::new(key).with_endpoint(config.nasa().endpoint()))
}

fn content_store(config: &ApodConfig) -> IpfsClient {
    IpfsClient::with_add_options(
        config.content_store_host().map(str::to_string),
        config.content_store().add().clone(),
    )
}

fn snapshot_store(config: &ApodConfig) -> SnapshotStore {
    SnapshotStore::new(config.storage().snapshot())
}

/// Run the backfill and save the snapshot.
pub fn collect(config: &ApodConfig, args: &CollectArgs) -> ApodResult<()> {
    collect_records(config, args).map(|_| ())
}

#[instrument(skip(config))]
fn collect_records(config: &ApodConfig, args: &CollectArgs) -> ApodResult<Vec<PictureRecord>> {
    let client = nasa_client(config)?;
    let max_failures = args
        .max_failures
        .unwrap_or(*config.backfill().max_consecutive_failures());

    let records = BackfillCollector::new(&client)
        .prefer_hd(args.hd || *config.nasa().prefer_hd())
        .with_day_limit(args.days.or(*config.backfill().max_days()))
        .collect(max_failures);

    let snapshot = snapshot_store(config);
    snapshot.save(&records)?;
    info!(
        count = records.len(),
        path = %snapshot.path().display(),
        "Saved snapshot"
    );
    Ok(records)
}

/// Render the gallery from the saved snapshot. A missing snapshot is an error.
pub fn render(config: &ApodConfig, args: &RenderArgs) -> ApodResult<()> {
    let records = snapshot_store(config).load()?;
    render_records(config, args, &records).map(|_| ())
}

/// Render from the snapshot, collecting first when there is none.
pub fn run(config: &ApodConfig, collect: &CollectArgs, render: &RenderArgs) -> ApodResult<()> {
    let records = match snapshot_store(config).load_if_present()? {
        Some(records) => {
            info!(count = records.len(), "Using existing snapshot");
            records
        }
        None => {
            info!("No snapshot yet, collecting");
            collect_records(config, collect)?
        }
    };
    render_records(config, render, &records).map(|_| ())
}

#[instrument(skip(config, records), fields(count = records.len()))]
fn render_records(
    config: &ApodConfig,
    args: &RenderArgs,
    records: &[PictureRecord],
) -> ApodResult<GalleryReport> {
    let storage = config.storage();
    let backend = args
        .backend
        .map(StorageBackend::from)
        .unwrap_or(*storage.backend());
    config.validate_backend(backend)?;

    let report = match backend {
        StorageBackend::Local => {
            let fetcher = HttpAssetFetcher::new();
            let layout = AssetLayout::new(storage.images_dir());
            GalleryRenderer::local(&fetcher, &layout)
                .with_remote_links(args.remote_images || *storage.remote_image_links())
                .write(records, storage.output())?
        }
        StorageBackend::ContentStore => {
            let store = content_store(config);
            GalleryRenderer::content_store(&store, config.content_store().gateway())
                .write(records, storage.output())?
        }
    };

    info!(
        backend = %backend,
        rendered = report.rendered(),
        skipped = report.skipped(),
        output = %report.output().display(),
        "Gallery ready"
    );
    Ok(report)
}

/// Print one day's record as JSON, optionally saving its image.
pub fn fetch(
    config: &ApodConfig,
    date: Option<NaiveDate>,
    hd: bool,
    image: Option<&Path>,
) -> ApodResult<()> {
    let client = nasa_client(config)?;
    let prefer_hd = hd || *config.nasa().prefer_hd();

    let record = client.fetch_record(date, prefer_hd)?;
    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| JsonError::new(format!("Failed to serialize record: {}", e)))?;
    println!("{}", json);

    if let Some(path) = image {
        match client.image_bytes(&record, prefer_hd) {
            Some(bytes) => {
                std::fs::write(path, &bytes).map_err(|e| {
                    StorageError::new(StorageErrorKind::FileWrite(format!(
                        "{}: {}",
                        path.display(),
                        e
                    )))
                })?;
                info!(path = %path.display(), bytes = bytes.len(), "Saved image");
            }
            None => warn!("No image available for this day"),
        }
    }
    Ok(())
}

/// Print the peers connected to the content store.
pub fn peers(config: &ApodConfig) -> ApodResult<()> {
    let store = content_store(config);
    if !store.is_enabled() {
        return Err(ConfigError::new("content_store.host is not configured").into());
    }

    if store.peers().is_empty() {
        warn!("No peers connected, or the content store is unreachable");
    }
    for peer in store.peers() {
        println!("{}\t{}", peer.peer_id(), peer.address());
    }
    Ok(())
}
