use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("Could not prepare image directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not save prediction image: {0}")]
    Write(#[from] std::io::Error),
}

/// A prediction image written to disk. The file is removed on drop unless kept.
#[derive(Debug)]
pub struct PredictionImage {
    path: PathBuf,
    format: Option<ImageFormat>,
    size: usize,
    keep: bool,
}

impl PredictionImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn format_name(&self) -> String {
        self.format
            .and_then(|f| f.extensions_str().first())
            .map(|ext| ext.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Leave the file on disk and return its path
    pub fn keep(mut self) -> PathBuf {
        self.keep = true;
        self.path.clone()
    }
}

impl Drop for PredictionImage {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Released image {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove image {}: {}", self.path.display(), e),
        }
    }
}

/// Holds the image currently on display; storing a new one releases the old file
pub struct ImageStore {
    dir: PathBuf,
    current: Option<PredictionImage>,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ImageStoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| ImageStoreError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        Ok(Self { dir, current: None })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn store(
        &mut self,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<&PredictionImage, ImageStoreError> {
        self.release();

        let format = detect_format(bytes, content_type);
        if format.is_none() {
            tracing::warn!("Unrecognized image data ({} bytes)", bytes.len());
        }

        let ext = format
            .and_then(|f| f.extensions_str().first().copied())
            .unwrap_or("bin");
        let path = self.dir.join(format!("{}.{ext}", Uuid::new_v4().simple()));

        fs::write(&path, bytes)?;
        tracing::info!("Saved prediction image to {}", path.display());

        Ok(self.current.insert(PredictionImage {
            path,
            format,
            size: bytes.len(),
            keep: false,
        }))
    }

    pub fn current(&self) -> Option<&PredictionImage> {
        self.current.as_ref()
    }

    pub fn take(&mut self) -> Option<PredictionImage> {
        self.current.take()
    }

    /// Drop the displayed image and its file
    pub fn release(&mut self) {
        self.current = None;
    }
}

/// Magic bytes first, then the declared content type
fn detect_format(bytes: &[u8], content_type: Option<&str>) -> Option<ImageFormat> {
    image::guess_format(bytes).ok().or_else(|| {
        content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
            .and_then(ImageFormat::from_mime_type)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn stores_png_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ImageStore::new(dir.path()).unwrap();

        let image = store.store(PNG_MAGIC, Some("image/png")).unwrap();
        assert_eq!(image.format(), Some(ImageFormat::Png));
        assert_eq!(image.path().extension().unwrap(), "png");
        assert_eq!(image.size(), PNG_MAGIC.len());
        assert_eq!(fs::read(image.path()).unwrap(), PNG_MAGIC);
    }

    #[test]
    fn content_type_used_when_bytes_are_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ImageStore::new(dir.path()).unwrap();

        let image = store.store(b"opaque", Some("image/jpeg; charset=binary")).unwrap();
        assert_eq!(image.format(), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn unknown_data_is_still_stored() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ImageStore::new(dir.path()).unwrap();

        let image = store.store(b"opaque", None).unwrap();
        assert_eq!(image.format_name(), "unknown");
        assert!(image.path().exists());
    }

    #[test]
    fn new_image_releases_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ImageStore::new(dir.path()).unwrap();

        let first = store.store(PNG_MAGIC, None).unwrap().path().to_path_buf();
        let second = store.store(PNG_MAGIC, None).unwrap().path().to_path_buf();

        assert!(!first.exists());
        assert!(second.exists());

        store.release();
        assert!(!second.exists());
        assert!(store.current().is_none());
    }

    #[test]
    fn kept_image_survives_drop() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ImageStore::new(dir.path()).unwrap();

        store.store(PNG_MAGIC, None).unwrap();
        let path = store.take().unwrap().keep();
        drop(store);

        assert!(path.exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");

        let store = ImageStore::new(&nested).unwrap();
        assert!(store.dir().is_dir());
    }
}
