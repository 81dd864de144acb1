use crate::config::{
    TomlConfig, DEFAULT_BASE_URL, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_TIMEOUT_SECONDS,
    MAX_TIMEOUT_SECONDS,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "appetizers")]
#[command(about = "Fetch the appetizer catalog and warm the image cache")]
pub struct CliConfig {
    #[arg(long, help = "Catalog base URL [default: the course backend]")]
    pub base_url: Option<String>,

    #[arg(long, help = "Per-request timeout in seconds [default: 30]")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Image downloads in flight at once [default: 5]")]
    pub concurrent_requests: Option<usize>,

    #[arg(long, help = "Read settings from a TOML file; flags given above take precedence")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Applies the flags given on the command line on top of a file config.
    pub fn overlay(&self, mut file: TomlConfig) -> TomlConfig {
        if let Some(base_url) = &self.base_url {
            tracing::debug!("--base-url overrides source.base_url from the config file");
            file.source.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            file.source.timeout_seconds = Some(timeout);
        }
        if let Some(concurrent) = self.concurrent_requests {
            file.images.concurrent_requests = Some(concurrent);
        }
        file.logging.verbose |= self.verbose;
        file.logging.json |= self.log_json;
        file
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
            .unwrap_or(DEFAULT_CONCURRENT_REQUESTS)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", self.base_url())?;
        validate_range(
            "timeout_seconds",
            self.request_timeout().as_secs(),
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validate_positive_number("concurrent_requests", self.concurrent_requests(), 1)?;
        Ok(())
    }
}
