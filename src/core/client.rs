use crate::adapters::ReqwestTransport;
use crate::core::{
    CatalogImage, CatalogRecord, ConfigProvider, ImageCache, ImageService, RecordFetcher,
    TransportClient,
};
use crate::utils::error::{DomainError, Result};
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// A catalog record paired with its image, or `None` when the image could
/// not be resolved and a placeholder should be shown.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    pub record: CatalogRecord,
    pub image: Option<Arc<CatalogImage>>,
}

#[derive(Debug, Clone, Default)]
pub struct Menu {
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn missing_images(&self) -> usize {
        self.entries.iter().filter(|e| e.image.is_none()).count()
    }
}

/// Catalog and image access sharing one transport and one image cache.
pub struct AppetizerClient<T: TransportClient + 'static> {
    records: RecordFetcher<T>,
    images: ImageService<T>,
    concurrent_requests: usize,
}

impl AppetizerClient<ReqwestTransport> {
    pub fn from_config<C: ConfigProvider>(config: &C, cache: Arc<ImageCache>) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::with_timeout(config.request_timeout())?);
        Ok(Self::new(
            transport,
            cache,
            config.base_url(),
            config.concurrent_requests(),
        ))
    }
}

impl<T: TransportClient + 'static> AppetizerClient<T> {
    pub fn new(
        transport: Arc<T>,
        cache: Arc<ImageCache>,
        base_url: &str,
        concurrent_requests: usize,
    ) -> Self {
        Self {
            records: RecordFetcher::new(Arc::clone(&transport), base_url),
            images: ImageService::new(transport, cache),
            concurrent_requests: concurrent_requests.max(1),
        }
    }

    pub fn cache(&self) -> &Arc<ImageCache> {
        self.images.cache()
    }

    pub async fn catalog(&self) -> std::result::Result<Vec<CatalogRecord>, DomainError> {
        self.records.fetch_catalog().await
    }

    pub async fn image(&self, key: &str) -> Option<Arc<CatalogImage>> {
        self.images.resolve(key).await
    }

    /// Fetches the catalog, then resolves every record's image with at most
    /// `concurrent_requests` resolutions outstanding. Entries keep server order.
    pub async fn load_menu(&self) -> std::result::Result<Menu, DomainError> {
        let records = self.catalog().await?;
        tracing::debug!(
            "Resolving {} images, {} at a time",
            records.len(),
            self.concurrent_requests
        );

        let entries: Vec<MenuEntry> = stream::iter(records)
            .map(|record| async move {
                let image = self.images.resolve(&record.image_key).await;
                MenuEntry { record, image }
            })
            .buffered(self.concurrent_requests)
            .collect()
            .await;

        let menu = Menu { entries };
        tracing::info!(
            "Menu ready: {} items, {} without image",
            menu.len(),
            menu.missing_images()
        );
        Ok(menu)
    }
}
