use std::path::Path as StdPath;

use tokio::fs;

use crate::error::{Error, Result};
use crate::i18n::Notice;

/// Public mount point of the uploads directory.
pub const IMAGES_ROUTE: &str = "/static/images";

const ALLOWED_EXTS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Lowercased extension of an accepted photo, checked against its magic bytes.
pub fn image_extension(filename: &str, data: &[u8]) -> Result<String> {
    let ext = StdPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or(Error::BadRequest(Notice::InvalidImage))?;

    if !ALLOWED_EXTS.contains(&ext.as_str()) {
        return Err(Error::BadRequest(Notice::InvalidImage));
    }
    if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
        return Err(Error::BadRequest(Notice::InvalidImage));
    }
    if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Err(Error::BadRequest(Notice::InvalidImage));
    }
    Ok(ext)
}

/// Stores a dossier photo under a generated name and returns its public URL.
pub async fn save_image(uploads_dir: &str, filename: &str, data: &bytes::Bytes) -> Result<String> {
    let ext = image_extension(filename, data)?;

    fs::create_dir_all(uploads_dir).await?;

    let safe_filename = format!("{}.{}", uuid::Uuid::new_v4(), ext);
    let file_path = StdPath::new(uploads_dir).join(&safe_filename);

    fs::write(&file_path, data).await.map_err(|e| {
        tracing::error!(path = %file_path.display(), error = %e, "failed to write photo");
        Error::Io(e)
    })?;

    tracing::info!(file = %safe_filename, bytes = data.len(), "photo stored");
    Ok(format!("{}/{}", IMAGES_ROUTE, safe_filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_magic_bytes() {
        assert_eq!(image_extension("me.PNG", &[0x89, 0x50, 0x4E, 0x47, 0x0D]).unwrap(), "png");
        assert_eq!(image_extension("me.jpeg", &[0xFF, 0xD8, 0xFF]).unwrap(), "jpeg");
    }

    #[test]
    fn rejects_wrong_extension_or_content() {
        assert!(image_extension("cv.pdf", b"%PDF-1.4").is_err());
        assert!(image_extension("photo.png", &[0xFF, 0xD8]).is_err());
        assert!(image_extension("noext", &[0xFF, 0xD8]).is_err());
    }

    #[tokio::test]
    async fn saved_image_is_served_from_images_route() {
        let dir = std::env::temp_dir().join(format!("dossier-upload-{}", uuid::Uuid::new_v4()));
        let dir_str = dir.to_string_lossy().to_string();
        let data = bytes::Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xE0]);

        let url = save_image(&dir_str, "portrait.jpg", &data).await.unwrap();
        assert!(url.starts_with("/static/images/"));
        assert!(url.ends_with(".jpg"));

        let stored = dir.join(url.trim_start_matches("/static/images/"));
        assert!(stored.exists());
        let _ = std::fs::remove_dir_all(dir);
    }
}
