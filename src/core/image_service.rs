//! Cache-or-fetch resolution of images by URL.
//!
//! Concurrent resolutions of the same URL share a single download: the first
//! caller spawns the download as its own task and registers a shared handle
//! to it in the pending table; later callers await that same handle. The task
//! runs to completion even if every caller goes away, and removes its pending
//! entry only after the cache has been populated, so a caller always finds
//! either the in-flight download or the cached image. Failed downloads leave
//! no trace and the next resolution goes back to the network.

use crate::core::{CatalogImage, ImageCache, TransportClient};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

type PendingDownload = Shared<BoxFuture<'static, Option<Arc<CatalogImage>>>>;

pub struct ImageService<T: TransportClient + 'static> {
    transport: Arc<T>,
    cache: Arc<ImageCache>,
    pending: Arc<Mutex<HashMap<String, PendingDownload>>>,
}

impl<T: TransportClient + 'static> ImageService<T> {
    pub fn new(transport: Arc<T>, cache: Arc<ImageCache>) -> Self {
        Self {
            transport,
            cache,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn cache(&self) -> &Arc<ImageCache> {
        &self.cache
    }

    /// Number of downloads currently in flight.
    pub fn in_flight(&self) -> usize {
        self.pending.lock().len()
    }

    /// Returns the image for `key`, downloading it on a cache miss.
    ///
    /// `None` means the download or the decode failed; the caller shows a
    /// placeholder.
    pub async fn resolve(&self, key: &str) -> Option<Arc<CatalogImage>> {
        if let Some(image) = self.cache.get(key) {
            tracing::debug!("Image cache hit: {}", key);
            return Some(image);
        }

        let download = {
            let mut pending = self.pending.lock();

            // The download may have completed between the lookup and the lock.
            if let Some(image) = self.cache.get(key) {
                return Some(image);
            }

            match pending.get(key) {
                Some(download) => {
                    tracing::debug!("Joining in-flight download: {}", key);
                    download.clone()
                }
                None => {
                    tracing::debug!("Image cache miss: {}", key);
                    let download = self.spawn_download(key.to_string());
                    pending.insert(key.to_string(), download.clone());
                    download
                }
            }
        };

        download.await
    }

    /// Spawns the download so it makes progress independently of the
    /// callers awaiting it. Must be called with the pending table locked.
    fn spawn_download(&self, key: String) -> PendingDownload {
        let handle = tokio::spawn(self.download(key.clone()));
        let pending = Arc::clone(&self.pending);

        async move {
            match handle.await {
                Ok(image) => image,
                Err(e) => {
                    tracing::error!("Image download task for {} aborted: {}", key, e);
                    pending.lock().remove(&key);
                    None
                }
            }
        }
        .boxed()
        .shared()
    }

    fn download(
        &self,
        key: String,
    ) -> impl Future<Output = Option<Arc<CatalogImage>>> + Send + 'static {
        let transport = Arc::clone(&self.transport);
        let cache = Arc::clone(&self.cache);
        let pending = Arc::clone(&self.pending);

        async move {
            let image = fetch_image(transport.as_ref(), &key).await.map(Arc::new);
            if let Some(image) = &image {
                cache.put(key.clone(), Arc::clone(image));
            }
            pending.lock().remove(&key);
            image
        }
    }
}

async fn fetch_image<T: TransportClient + ?Sized>(transport: &T, key: &str) -> Option<CatalogImage> {
    let bytes = match transport.fetch(key).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Image download failed for {}: {}", key, e);
            return None;
        }
    };

    match tokio::task::spawn_blocking(move || CatalogImage::decode(&bytes)).await {
        Ok(Ok(image)) => {
            let (width, height) = image.dimensions();
            tracing::debug!("Decoded {}x{} {:?} image from {}", width, height, image.format(), key);
            Some(image)
        }
        Ok(Err(e)) => {
            tracing::warn!("Image from {} did not decode: {}", key, e);
            None
        }
        Err(e) => {
            tracing::error!("Image decode task for {} aborted: {}", key, e);
            None
        }
    }
}
