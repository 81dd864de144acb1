use image::{DynamicImage, GenericImageView, ImageError, ImageFormat};
use serde::{Deserialize, Serialize};

/// One appetizer as served by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "imageURL")]
    pub image_key: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
}

/// Wire envelope of `GET <base>/appetizers`.
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    pub request: Vec<CatalogRecord>,
}

/// A decoded bitmap held by the image cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogImage {
    format: ImageFormat,
    pixels: DynamicImage,
}

impl CatalogImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let format = image::guess_format(bytes)?;
        let pixels = image::load_from_memory_with_format(bytes, format)?;
        Ok(Self { format, pixels })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }
}
