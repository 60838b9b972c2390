//! Layered configuration for the gallery tool.
//!
//! Sources, lowest precedence first:
//! 1. Bundled defaults (`apod.toml` shipped with the crate)
//! 2. `~/.config/apod/apod.toml`
//! 3. `./apod.toml`
//! 4. An explicit file, usually from `--config`
//! 5. `APOD_`-prefixed environment variables, `__` between sections
//!    (`APOD_NASA__API_KEY`, `APOD_STORAGE__BACKEND`)

use apod_core::StorageBackend;
use apod_error::{ApodError, ApodResult, ConfigError};
use apod_ipfs::AddOptions;
use apod_nasa::APOD_ENDPOINT;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../apod.toml");

/// Picture-of-the-day endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct NasaConfig {
    /// Metadata endpoint.
    #[serde(default = "default_endpoint")]
    endpoint: String,

    /// API key; empty means not configured.
    #[serde(default)]
    api_key: String,

    /// Ask the endpoint for high resolution URLs.
    #[serde(default)]
    prefer_hd: bool,
}

fn default_endpoint() -> String {
    APOD_ENDPOINT.to_string()
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            prefer_hd: false,
        }
    }
}

/// Content-store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ContentStoreConfig {
    /// HTTP API base URL. Absent or blank disables the backend.
    #[serde(default)]
    host: Option<String>,

    /// Gateway prefix the content hash is appended to.
    #[serde(default = "default_gateway")]
    gateway: String,

    /// Query options for uploads.
    #[serde(default)]
    add: AddOptions,
}

fn default_gateway() -> String {
    "https://ipfs.io/ipfs/".to_string()
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            host: None,
            gateway: default_gateway(),
            add: AddOptions::default(),
        }
    }
}

/// Where things land on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StorageConfig {
    /// Image storage backend.
    #[serde(default)]
    backend: StorageBackend,

    /// Root of the `SD`/`HD` image directories.
    #[serde(default = "default_images_dir")]
    images_dir: PathBuf,

    /// Snapshot file.
    #[serde(default = "default_snapshot")]
    snapshot: PathBuf,

    /// Rendered gallery page.
    #[serde(default = "default_output")]
    output: PathBuf,

    /// Link images to their remote URLs even when stored locally.
    #[serde(default)]
    remote_image_links: bool,
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_snapshot() -> PathBuf {
    PathBuf::from("apod_snapshot.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("NasaAPOD.html")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            images_dir: default_images_dir(),
            snapshot: default_snapshot(),
            output: default_output(),
            remote_image_links: false,
        }
    }
}

/// Backfill stopping rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct BackfillConfig {
    /// Consecutive failed days that end the backfill.
    #[serde(default = "default_max_consecutive_failures")]
    max_consecutive_failures: u32,

    /// Optional cap on the number of days scanned.
    #[serde(default)]
    max_days: Option<u32>,
}

fn default_max_consecutive_failures() -> u32 {
    100
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            max_consecutive_failures: default_max_consecutive_failures(),
            max_days: None,
        }
    }
}

/// Top-level configuration.
///
/// # Example
///
/// ```no_run
/// use apod::ApodConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApodConfig::load(None)?;
/// println!("Snapshot at {}", config.storage().snapshot().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ApodConfig {
    /// `[nasa]`
    #[serde(default)]
    nasa: NasaConfig,

    /// `[content_store]`
    #[serde(default)]
    content_store: ContentStoreConfig,

    /// `[storage]`
    #[serde(default)]
    storage: StorageConfig,

    /// `[backfill]`
    #[serde(default)]
    backfill: BackfillConfig,
}

impl ApodConfig {
    /// Load every configuration source, with `explicit` above the user files.
    ///
    /// # Errors
    ///
    /// Fails when a required file is missing or any source does not parse.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> ApodResult<Self> {
        debug!("Loading configuration: env > explicit > current dir > home dir > bundled");

        let mut builder = Self::bundled();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/apod/apod.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("apod").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("APOD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Bundled defaults overlaid with a single file, ignoring user files and
    /// the environment.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing or does not parse.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ApodResult<Self> {
        debug!("Loading configuration from file");
        Self::finish(Self::bundled().add_source(File::from(path.as_ref())))
    }

    fn bundled() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> ApodResult<Self> {
        builder
            .build()
            .map_err(|e| {
                ApodError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ApodError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// The API key, or an error when it is blank.
    ///
    /// # Errors
    ///
    /// `nasa.api_key` is empty.
    pub fn require_api_key(&self) -> ApodResult<&str> {
        let key = self.nasa.api_key.trim();
        if key.is_empty() {
            return Err(ConfigError::new(
                "nasa.api_key is required (set it in apod.toml or APOD_NASA__API_KEY)",
            )
            .into());
        }
        Ok(key)
    }

    /// Content-store host, when one is configured and not blank.
    pub fn content_store_host(&self) -> Option<&str> {
        self.content_store
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    /// Check that `backend` can be used with this configuration.
    ///
    /// # Errors
    ///
    /// The content-store backend without a host.
    pub fn validate_backend(&self, backend: StorageBackend) -> ApodResult<()> {
        if backend == StorageBackend::ContentStore && self.content_store_host().is_none() {
            return Err(ConfigError::new(
                "storage.backend = \"content-store\" needs content_store.host",
            )
            .into());
        }
        Ok(())
    }
}
