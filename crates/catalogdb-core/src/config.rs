//! Configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` +
//! `config.<env>.toml` + `CATALOG_*` env vars (`__` separates nested keys,
//! e.g. `CATALOG_INGEST__NUM_WORKERS=8`).
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Bulk-load tunables. Chunk length is `batch_size / num_workers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub batch_size: usize,
    pub num_workers: usize,
    pub queue_buffer: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { batch_size: 50_000, num_workers: 12, queue_buffer: 100 }
    }
}

/// Positions per chunk for a load: `batch_size / num_workers`, which must be
/// at least 1.
pub fn chunk_len(batch_size: usize, num_workers: usize) -> Result<usize> {
    if num_workers == 0 {
        return Err(Error::InvalidConfig("ingest.num_workers must be at least 1".into()));
    }
    match batch_size / num_workers {
        0 => Err(Error::InvalidConfig(format!(
            "ingest.batch_size ({batch_size}) must be >= ingest.num_workers ({num_workers})"
        ))),
        len => Ok(len),
    }
}

impl IngestConfig {
    pub fn chunk_len(&self) -> Result<usize> {
        chunk_len(self.batch_size, self.num_workers)
    }

    pub fn validate(&self) -> Result<()> {
        self.chunk_len()?;
        if self.queue_buffer == 0 {
            return Err(Error::InvalidConfig("ingest.queue_buffer must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub fuzziness: u8,
    pub page_size: usize,
    pub highlight: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { fuzziness: 2, page_size: 50, highlight: true }
    }
}

impl SearchConfig {
    pub const MAX_FUZZINESS: u8 = 2;

    pub fn validate(&self) -> Result<()> {
        if self.fuzziness > Self::MAX_FUZZINESS {
            return Err(Error::InvalidConfig(format!(
                "search.fuzziness must be <= {}, got {}",
                Self::MAX_FUZZINESS,
                self.fuzziness
            )));
        }
        if self.page_size == 0 {
            return Err(Error::InvalidConfig("search.page_size must be at least 1".into()));
        }
        Ok(())
    }
}

/// Text engine setup. `index_dir = None` keeps the index in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub index_dir: Option<String>,
    pub writer_memory_bytes: usize,
    pub name_analyzer: String,
    pub category_analyzer: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_dir: None,
            writer_memory_bytes: 50_000_000,
            name_analyzer: "standard".to_string(),
            category_analyzer: "standard".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn index_path(&self) -> Option<PathBuf> {
        self.index_dir.as_deref().map(expand_path)
    }
}

/// Synthetic catalog generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub size: usize,
    pub seed: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { size: 1_000_000, seed: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ingest: IngestConfig,
    pub search: SearchConfig,
    pub engine: EngineConfig,
    pub catalog: CatalogConfig,
    pub server: ServerConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        self.ingest.validate()?;
        self.search.validate()
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Self::base().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("CATALOG_").split("__"));

        Ok(Self { figment })
    }

    /// Defaults overlaid with an inline TOML document.
    pub fn from_toml_str(toml: &str) -> Self {
        Self { figment: Self::base().merge(Toml::string(toml)) }
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extract and validate the full typed settings.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
