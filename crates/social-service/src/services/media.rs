//! Media service
//!
//! Resizes uploaded images, re-encodes them as JPEG and stores them in the
//! upload store. Decoding and encoding are CPU-bound and run on the blocking
//! thread pool.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView};
use rand::RngCore;
use social_common::StorageConfig;
use social_core::entities::StoredFile;
use social_core::DomainError;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Content types accepted for post images
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Content type of every stored upload
pub const STORED_CONTENT_TYPE: &str = "image/jpeg";

/// One image received in a multipart upload
#[derive(Clone)]
pub struct ImageUpload {
    pub content_type: String,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            content_type: content_type.into(),
            data,
        }
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Resize and re-encode settings
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    max_dimension: u32,
    quality: u8,
    max_file_size: usize,
}

impl From<&StorageConfig> for ImageProcessor {
    fn from(config: &StorageConfig) -> Self {
        Self {
            max_dimension: config.max_dimension,
            quality: config.jpeg_quality,
            max_file_size: config.max_file_size_bytes(),
        }
    }
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self::from(&StorageConfig::default())
    }
}

impl ImageProcessor {
    /// Check type and size, then resize and encode on the blocking pool
    pub async fn process(&self, upload: ImageUpload) -> ServiceResult<Bytes> {
        if !ACCEPTED_IMAGE_TYPES.contains(&upload.content_type.as_str()) {
            return Err(DomainError::UnsupportedMediaType(upload.content_type).into());
        }
        if upload.data.len() > self.max_file_size {
            return Err(ServiceError::PayloadTooLarge(format!(
                "image exceeds {} bytes",
                self.max_file_size
            )));
        }

        let processor = self.clone();
        tokio::task::spawn_blocking(move || processor.resize_and_encode(&upload.data))
            .await
            .map_err(|e| ServiceError::internal(format!("Image task panicked: {e}")))?
    }

    /// Decode, cap the longer edge, encode as RGB JPEG (blocking)
    pub fn resize_and_encode(&self, data: &[u8]) -> ServiceResult<Bytes> {
        let img = image::load_from_memory(data)
            .map_err(|e| ServiceError::validation(format!("Failed to decode image: {e}")))?;

        let (orig_w, orig_h) = img.dimensions();
        let img = self.resize(img);
        let (width, height) = img.dimensions();

        let rgb = img.to_rgb8();
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, self.quality)
            .encode(rgb.as_raw(), width, height, ColorType::Rgb8)
            .map_err(|e| ServiceError::internal(format!("Failed to encode JPEG: {e}")))?;

        debug!(
            original_width = orig_w,
            original_height = orig_h,
            width,
            height,
            size = buf.len(),
            "Image processed"
        );

        Ok(Bytes::from(buf))
    }

    /// Scale down so the longer edge fits; never upscale
    fn resize(&self, img: DynamicImage) -> DynamicImage {
        let (width, height) = img.dimensions();
        if width.max(height) <= self.max_dimension {
            return img;
        }
        let (new_w, new_h) = self.calculate_dimensions(width, height);
        img.resize_exact(new_w, new_h, FilterType::Lanczos3)
    }

    fn calculate_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let max_dim = self.max_dimension;

        if width > height {
            let ratio = f64::from(max_dim) / f64::from(width);
            (max_dim, ((f64::from(height) * ratio).round() as u32).max(1))
        } else {
            let ratio = f64::from(max_dim) / f64::from(height);
            (((f64::from(width) * ratio).round() as u32).max(1), max_dim)
        }
    }
}

/// Random hex filename for a stored upload
pub fn generate_filename() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{}.jpg", hex::encode(bytes))
}

/// Media service
pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MediaService<'a> {
    /// Create a new MediaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Process an upload and put it in the store. Returns the stored filename.
    #[instrument(skip(self))]
    pub async fn store_image(&self, upload: ImageUpload) -> ServiceResult<String> {
        let data = self.ctx.image_processor().process(upload).await?;
        let file = StoredFile::new(
            generate_filename(),
            STORED_CONTENT_TYPE.to_string(),
            data.to_vec(),
        );

        self.ctx.file_repo().store(&file).await?;
        debug!(filename = %file.filename, size = file.len(), "Upload stored");

        Ok(file.filename)
    }

    /// Fetch a stored file by name
    #[instrument(skip(self))]
    pub async fn get_file(&self, filename: &str) -> ServiceResult<StoredFile> {
        self.ctx
            .file_repo()
            .find_by_filename(filename)
            .await?
            .ok_or_else(|| DomainError::FileNotFound(filename.to_string()).into())
    }

    /// Best-effort removal of stored images, e.g. when their post is deleted
    #[instrument(skip(self))]
    pub async fn remove_files(&self, filenames: &[String]) {
        for filename in filenames {
            if let Err(e) = self.ctx.file_repo().delete(filename).await {
                tracing::warn!(filename = %filename, error = %e, "Failed to remove upload");
            }
        }
    }
}
