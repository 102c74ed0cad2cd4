use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use dashmap::DashMap;
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use crate::config::FetchConfig;
use crate::errors::ShopError;
use super::placeholder::placeholder;
use tracing::{debug, warn};

/// Where picture bytes come from.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, ShopError>;
}

/// HTTP(S) URLs through reqwest, everything else from the local filesystem.
pub struct DefaultImageSource {
    client: reqwest::Client,
}

impl DefaultImageSource {
    pub fn new(config: &FetchConfig) -> Result<Self, ShopError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ShopError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

fn is_remote(reference: &str) -> bool {
    let lower = reference.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[async_trait]
impl ImageSource for DefaultImageSource {
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, ShopError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ShopError::NotFound("empty image reference".into()));
        }

        if !is_remote(reference) {
            return Ok(tokio::fs::read(reference).await?);
        }

        let resp = self.client
            .get(reference)
            .send()
            .await
            .map_err(|e| ShopError::Network(format!("GET {} failed: {}", reference, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ShopError::Network(format!("GET {} returned {}", reference, status)));
        }

        let bytes = resp.bytes().await
            .map_err(|e| ShopError::Network(format!("Reading {} failed: {}", reference, e)))?;
        Ok(bytes.to_vec())
    }
}

type CacheKey = (String, u32, u32);

/// Fetches product pictures as fixed-size thumbnails.
///
/// Results, placeholders included, are memoized by (reference, width, height)
/// for the life of the fetcher.
#[derive(Clone)]
pub struct ThumbnailFetcher {
    source: Arc<dyn ImageSource>,
    cache: Arc<DashMap<CacheKey, Arc<RgbaImage>>>,
}

impl ThumbnailFetcher {
    pub fn new(source: Arc<dyn ImageSource>) -> Self {
        Self {
            source,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// A `width` x `height` thumbnail of the referenced picture, or a placeholder
    /// of the same size if anything goes wrong. Never fails.
    pub async fn fetch(&self, reference: &str, width: u32, height: u32) -> Arc<RgbaImage> {
        let key = (reference.to_string(), width, height);
        if let Some(hit) = self.cache.get(&key) {
            debug!(reference, "Thumbnail cache hit");
            return hit.clone();
        }

        let thumbnail = match self.load(reference, width, height).await {
            Ok(img) => img,
            Err(e) => {
                warn!(reference, error = %e, "Image unavailable, using placeholder");
                placeholder(width, height)
            }
        };

        let thumbnail = Arc::new(thumbnail);
        self.cache.insert(key, thumbnail.clone());
        thumbnail
    }

    async fn load(&self, reference: &str, width: u32, height: u32) -> Result<RgbaImage, ShopError> {
        let bytes = self.source.fetch(reference).await?;
        let decoded = image::load_from_memory(&bytes)?;
        Ok(fit_thumbnail(&decoded, width, height))
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

/// Shrink (never enlarge) to fit the box, keeping the aspect ratio, and center
/// the result on a transparent canvas of exactly the box size.
pub fn fit_thumbnail(img: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let scaled = if img.width() > width || img.height() > height {
        img.resize(width, height, FilterType::Lanczos3)
    } else {
        img.clone()
    };
    let scaled = scaled.to_rgba8();

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));
    let x = (width.saturating_sub(scaled.width()) / 2) as i64;
    let y = (height.saturating_sub(scaled.height()) / 2) as i64;
    image::imageops::replace(&mut canvas, &scaled, x, y);
    canvas
}
