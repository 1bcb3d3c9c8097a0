//! File naming and saving of the decoded visual.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{DynamicImage, ImageFormat};

use crate::error::ImageError;

/// Generate an output filename from a description.
///
/// Sanitizes the first 50 characters of the description to kebab-case,
/// appends a unix timestamp and a `.png` extension.
#[must_use]
pub fn auto_filename(description: &str) -> String {
    let sanitized = sanitize_for_filename(description, 50);
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("{sanitized}-{timestamp}.png")
}

/// Sanitize a string for use in a filename.
///
/// Converts to lowercase, replaces non-alphanumeric chars with hyphens,
/// collapses consecutive hyphens, and trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // no leading hyphen

    for ch in input.chars() {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "visual".to_string()
    } else {
        result
    }
}

/// Resolve the output path: use explicit path or auto-generate.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, description: &str) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(auto_filename(description)),
    }
}

/// Write the decoded visual, picking the encoder from the file extension.
///
/// # Errors
///
/// Returns an error if the extension is not a supported image format or the
/// file cannot be written.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<(), ImageError> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        ImageError::ImageConversion(format!("Unsupported output format: {}", path.display()))
    })?;

    // JPEG has no alpha channel.
    let result = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(path, format)
    } else {
        image.save_with_format(path, format)
    };

    result.map_err(|e| {
        ImageError::ImageConversion(format!("Failed to save {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_basic() {
        assert_eq!(sanitize_for_filename("A forest at sunset", 50), "a-forest-at-sunset");
    }

    #[test]
    fn sanitize_special_chars() {
        assert_eq!(
            sanitize_for_filename("A cat!! sitting on a mat...", 50),
            "a-cat-sitting-on-a-mat"
        );
    }

    #[test]
    fn sanitize_truncates() {
        let long = "a".repeat(100);
        assert!(sanitize_for_filename(&long, 10).len() <= 10);
    }

    #[test]
    fn sanitize_empty() {
        assert_eq!(sanitize_for_filename("", 50), "visual");
        assert_eq!(sanitize_for_filename("!!!", 50), "visual");
    }

    #[test]
    fn auto_filename_is_png() {
        let name = auto_filename("a cat");
        assert!(name.starts_with("a-cat-"));
        assert_eq!(Path::new(&name).extension().unwrap(), "png");
    }

    #[test]
    fn resolve_explicit() {
        let path = resolve_output_path(Some("my-visual.jpg"), "ignored");
        assert_eq!(path, PathBuf::from("my-visual.jpg"));
    }

    #[test]
    fn save_png_and_jpeg() {
        let dir = std::env::temp_dir().join("designer_output_save_test");
        std::fs::create_dir_all(&dir).unwrap();
        let img = DynamicImage::new_rgba8(3, 2);

        let png = dir.join("out.png");
        save_image(&img, &png).unwrap();
        let reloaded = image::open(&png).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (3, 2));

        let jpg = dir.join("out.jpg");
        save_image(&img, &jpg).unwrap();
        assert_eq!(&std::fs::read(&jpg).unwrap()[..2], &[0xFF, 0xD8]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_unknown_extension_fails() {
        let img = DynamicImage::new_rgb8(1, 1);
        let err = save_image(&img, Path::new("out.unknownext")).unwrap_err();
        assert!(matches!(err, ImageError::ImageConversion(_)));
    }
}
