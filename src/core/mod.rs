pub mod catalog;
pub mod client;
pub mod image_cache;
pub mod image_service;
pub mod order;

pub use crate::domain::model::{CatalogImage, CatalogRecord, CatalogResponse};
pub use crate::domain::ports::{ConfigProvider, TransportClient};
pub use crate::utils::error::{DomainError, Result};

pub use catalog::RecordFetcher;
pub use client::{AppetizerClient, Menu, MenuEntry};
pub use image_cache::ImageCache;
pub use image_service::ImageService;
pub use order::Order;
