use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp", "ico"];

/// Whether the path names an image by its extension
pub fn has_image_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Read a file as UTF-8 text.
///
/// Returns `None` for images, unreadable files and non-UTF-8 content.
pub fn read_text(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    if has_image_extension(path) {
        log::debug!("Skipping image file {}", path.display());
        return None;
    }
    match std::fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(_) => {
                log::debug!("Skipping non-UTF-8 file {}", path.display());
                None
            }
        },
        Err(e) => {
            log::debug!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_image_extensions() {
        assert!(has_image_extension("logo.png"));
        assert!(has_image_extension("photos/Cat.JPEG"));
        assert!(has_image_extension("favicon.ico"));
        assert!(!has_image_extension("main.py"));
        assert!(!has_image_extension("README"));
    }

    #[test]
    fn test_read_text() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.py");
        std::fs::write(&file, "x = 1\n").unwrap();
        assert_eq!(read_text(&file).as_deref(), Some("x = 1\n"));

        let image = dir.path().join("a.png");
        std::fs::write(&image, "not really an image").unwrap();
        assert_eq!(read_text(&image), None);

        let binary = dir.path().join("blob.py");
        std::fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
        assert_eq!(read_text(&binary), None);

        assert_eq!(read_text(dir.path().join("missing.py")), None);
    }
}
