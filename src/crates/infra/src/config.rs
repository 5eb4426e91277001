use config::{Config, Environment, File};
use dotenvy::dotenv;
use serde::Deserialize;
use std::error::Error;

/// `database_url` value that selects the in-memory store instead of SQLite.
pub const IN_MEMORY_DATABASE: &str = "memory";

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    database_url: String,
    log_file: String,
    catalog: RawCatalogConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawCatalogConfig {
    deezer_base_url: String,
    open_opus_base_url: String,
    jikan_base_url: String,
    /// per request, in seconds
    timeout_secs: u64,
    page_size: u32,
}

impl Default for RawCatalogConfig {
    fn default() -> Self {
        Self {
            deezer_base_url: "https://api.deezer.com/".to_string(),
            open_opus_base_url: "https://api.openopus.org/".to_string(),
            jikan_base_url: "https://api.jikan.moe/v4/".to_string(),
            timeout_secs: 10,
            page_size: 20,
        }
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://hobbyhub.db?mode=rwc".to_string(),
            log_file: "hobbyhub.log".to_string(),
            catalog: RawCatalogConfig::default(),
        }
    }
}

/// Remote catalog endpoints and request limits.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub deezer_base_url: String,
    pub open_opus_base_url: String,
    pub jikan_base_url: String,
    pub timeout_secs: u64,
    pub page_size: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfigImpl {
    database_url: String,
    log_file: String,
    catalog: CatalogConfig,
}

impl AppConfigImpl {
    fn new(data: RawConfig) -> Self {
        let catalog = CatalogConfig {
            deezer_base_url: with_trailing_slash(data.catalog.deezer_base_url),
            open_opus_base_url: with_trailing_slash(data.catalog.open_opus_base_url),
            jikan_base_url: with_trailing_slash(data.catalog.jikan_base_url),
            timeout_secs: data.catalog.timeout_secs.max(1),
            page_size: data.catalog.page_size.max(1),
        };
        AppConfigImpl {
            database_url: data.database_url,
            log_file: data.log_file,
            catalog,
        }
    }

    /// Reads `config.*` from the working directory, then `APP__*` environment variables.
    pub fn load() -> Result<AppConfigImpl, Box<dyn Error>> {
        dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let raw: RawConfig = config.try_deserialize()?;
        Ok(AppConfigImpl::new(raw))
    }

    /// Reads a single config file, without the environment layer.
    pub fn load_from_file(path: &str) -> Result<AppConfigImpl, Box<dyn Error>> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .build()?;
        let raw: RawConfig = config.try_deserialize()?;
        Ok(AppConfigImpl::new(raw))
    }

    pub fn database_url(&self) -> String {
        self.database_url.clone()
    }

    pub fn uses_in_memory_store(&self) -> bool {
        self.database_url == IN_MEMORY_DATABASE
    }

    pub fn log_file(&self) -> String {
        self.log_file.clone()
    }

    pub fn catalog(&self) -> CatalogConfig {
        self.catalog.clone()
    }
}

impl Default for AppConfigImpl {
    fn default() -> Self {
        AppConfigImpl::new(RawConfig::default())
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
