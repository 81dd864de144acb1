//! Process-lifetime store of decoded images keyed by URL.
//!
//! Entries are never evicted or expired. Locking is sharded per key by
//! `DashMap`, so lookups for unrelated URLs do not contend.

use crate::core::CatalogImage;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct ImageCache {
    entries: DashMap<String, Arc<CatalogImage>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure lookup. Never touches the network.
    pub fn get(&self, key: &str) -> Option<Arc<CatalogImage>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Inserts or overwrites the entry for `key`.
    pub fn put(&self, key: impl Into<String>, image: Arc<CatalogImage>) {
        self.entries.insert(key.into(), image);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::thread;

    fn solid(width: u32, color: [u8; 4]) -> Arc<CatalogImage> {
        let img = RgbaImage::from_pixel(width, 1, Rgba(color));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        Arc::new(CatalogImage::decode(&buf.into_inner()).unwrap())
    }

    #[test]
    fn test_get_after_put_returns_stored_image() {
        let cache = ImageCache::new();
        let image = solid(2, [1, 2, 3, 255]);

        cache.put("http://x/a.png", Arc::clone(&image));

        let cached = cache.get("http://x/a.png").unwrap();
        assert!(Arc::ptr_eq(&cached, &image));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_miss_is_none() {
        let cache = ImageCache::new();

        assert!(cache.get("http://x/missing.png").is_none());
        assert!(!cache.contains("http://x/missing.png"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_overwrites_single_entry() {
        let cache = ImageCache::new();
        let first = solid(1, [0, 0, 0, 255]);
        let second = solid(4, [255, 255, 255, 255]);

        cache.put("k", first);
        cache.put("k", Arc::clone(&second));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k").unwrap().dimensions(), (4, 1));
    }

    #[test]
    fn test_concurrent_puts_and_gets() {
        let cache = Arc::new(ImageCache::new());
        let image = solid(1, [9, 9, 9, 255]);

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let cache = Arc::clone(&cache);
                let image = Arc::clone(&image);
                thread::spawn(move || {
                    for i in 0..50 {
                        let key = format!("http://x/{}.png", i % 10);
                        cache.put(key.clone(), Arc::clone(&image));
                        assert!(cache.get(&key).is_some(), "worker {} lost {}", worker, key);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 10);
    }
}
