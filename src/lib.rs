pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::ReqwestTransport;
pub use core::{
    AppetizerClient, CatalogImage, CatalogRecord, ImageCache, ImageService, Menu, MenuEntry,
    Order, RecordFetcher, TransportClient,
};
pub use utils::error::{AppError, DomainError, ErrorKind, Result};
