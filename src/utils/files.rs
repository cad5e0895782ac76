use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions (lower-case, without the dot) treated as images
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Check whether a path carries one of the supported image extensions (case-insensitive)
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        })
}

/// Create the output directory if it doesn't exist
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        println!("Created directory: {}", dir.display());
    }
    Ok(())
}

/// Fail with `MissingDir` unless `dir` is an existing directory
pub fn require_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::MissingDir(dir.to_path_buf()))
    }
}

/// Fail with `MissingFile` unless `file` is an existing file
pub fn require_file(file: &Path) -> Result<()> {
    if file.is_file() {
        Ok(())
    } else {
        Err(Error::MissingFile(file.to_path_buf()))
    }
}

/// Image files directly inside `dir`, sorted by file name
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    require_dir(dir)?;

    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            images.push(path);
        }
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// Result of a recursive image scan
#[derive(Debug, Default)]
pub struct ImageScan {
    /// Image files, sorted by path
    pub images: Vec<PathBuf>,
    /// Entries that could not be read (unreadable directories, link loops, ...)
    pub unreadable: usize,
}

/// Image files anywhere below `dir`, following symlinks.
///
/// Entries the walk cannot read are reported and counted, never fatal.
pub fn list_images_recursive(dir: &Path) -> Result<ImageScan> {
    require_dir(dir)?;

    let mut scan = ImageScan::default();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_image_file(entry.path()) {
                    scan.images.push(entry.into_path());
                }
            }
            Err(e) => {
                eprintln!("Failed to scan: {}", e);
                scan.unreadable += 1;
            }
        }
    }

    Ok(scan)
}

/// File name of `path` as an owned string
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn is_image_file_matches_extensions_case_insensitively() {
        assert!(is_image_file(Path::new("a.png")));
        assert!(is_image_file(Path::new("b.JPG")));
        assert!(is_image_file(Path::new("c.jpeg")));
        assert!(is_image_file(Path::new("d.WebP")));
        assert!(!is_image_file(Path::new("e.gif")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("png")));
    }

    #[test]
    fn list_images_is_flat_filtered_and_sorted() {
        let dir = TempDir::new().expect("tempdir should be created");
        for name in ["010.png", "002.jpg", "001.webp", "readme.txt"] {
            fs::write(dir.path().join(name), b"x").expect("file should be written");
        }
        fs::create_dir(dir.path().join("nested.png")).expect("dir should be created");
        fs::create_dir(dir.path().join("sub")).expect("dir should be created");
        fs::write(dir.path().join("sub/003.png"), b"x").expect("file should be written");

        let names: Vec<String> = list_images(dir.path())
            .expect("listing should succeed")
            .iter()
            .map(|p| file_name(p))
            .collect();

        assert_eq!(names, vec!["001.webp", "002.jpg", "010.png"]);
    }

    #[test]
    fn list_images_recursive_descends_into_subdirectories() {
        let dir = TempDir::new().expect("tempdir should be created");
        fs::create_dir_all(dir.path().join("b/c")).expect("dirs should be created");
        fs::write(dir.path().join("a.png"), b"x").expect("file should be written");
        fs::write(dir.path().join("b/c/d.jpeg"), b"x").expect("file should be written");
        fs::write(dir.path().join("b/skip.md"), b"x").expect("file should be written");

        let scan = list_images_recursive(dir.path()).expect("walk should succeed");

        assert_eq!(
            scan.images,
            vec![dir.path().join("a.png"), dir.path().join("b/c/d.jpeg")]
        );
        assert_eq!(scan.unreadable, 0);
    }

    #[cfg(unix)]
    #[test]
    fn list_images_recursive_counts_unwalkable_entries() {
        let dir = TempDir::new().expect("tempdir should be created");
        fs::create_dir_all(dir.path().join("sub")).expect("dir should be created");
        fs::write(dir.path().join("sub/card.png"), b"x").expect("file should be written");
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub/loop"))
            .expect("symlink should be created");

        let scan = list_images_recursive(dir.path()).expect("walk should not abort");

        assert_eq!(scan.images, vec![dir.path().join("sub/card.png")]);
        assert_eq!(scan.unreadable, 1);
    }

    #[test]
    fn listing_a_missing_directory_fails() {
        let dir = TempDir::new().expect("tempdir should be created");
        let missing = dir.path().join("missing");

        assert!(matches!(list_images(&missing), Err(Error::MissingDir(_))));
        assert!(matches!(
            list_images_recursive(&missing),
            Err(Error::MissingDir(_))
        ));
    }
}
