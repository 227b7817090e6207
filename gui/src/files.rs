//! Folder scanning for the file list.
//!
//! The viewer owns filesystem traversal; the engine library only ever
//! receives the paths picked here.

use std::fs;
use std::path::{Path, PathBuf};

/// Extensions the file list accepts, matched case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp"];

/// Enumerate image files directly inside `folder`, sorted by path.
pub fn scan_folder(folder: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && is_image_path(&path) {
            files.push(path);
        }
    }
    files.sort();
    log::debug!("found {} image files in {:?}", files.len(), folder);
    Ok(files)
}

/// Whether a path's extension names a known image type.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extension_match_is_case_insensitive() {
        assert!(is_image_path(Path::new("a/photo.PNG")));
        assert!(is_image_path(Path::new("b.JpEg")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("no_extension")));
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.jpg", "a.PNG", "skip.txt", "c.webp"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let files = scan_folder(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.PNG", "b.jpg", "c.webp"]);
    }

    #[test]
    fn test_scan_missing_folder_errors() {
        assert!(scan_folder(Path::new("definitely/not/a/folder")).is_err());
    }
}
