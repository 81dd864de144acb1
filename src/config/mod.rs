#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_BASE_URL: &str =
    "https://seanallen-course-backend.herokuapp.com/swiftui-fundamentals/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;
