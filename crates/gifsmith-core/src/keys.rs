//! Object-key path functions.
//!
//! Object keys use `/` as their separator regardless of the local platform,
//! so these operate on the key string directly rather than going through
//! `std::path`.

/// Returns the final path component of an object key.
///
/// A key ending in `/` (or an empty key) has no file name and yields `""`.
pub fn file_name(key: &str) -> &str {
    match key.rsplit_once('/') {
        Some((_, name)) => name,
        None => key,
    }
}

/// Replaces the extension of a file name with `ext`, or appends it when the
/// name has none.
///
/// A dot-file name such as `.hidden` counts as having no extension, so the
/// new extension is appended (`.hidden.gif`) rather than replacing the whole
/// name.
pub fn with_extension(file_name: &str, ext: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{}.{}", stem, ext),
        _ => format!("{}.{}", file_name, ext),
    }
}

/// Computes the key the converted artifact is stored under: the directory
/// portion of the source key joined with the converted file name.
pub fn destination_key(source_key: &str, converted_file_name: &str) -> String {
    match source_key.rsplit_once('/') {
        Some((dir, _)) => format!("{}/{}", dir, converted_file_name),
        None => converted_file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_directories() {
        assert_eq!(file_name("videos/clip1.mp4"), "clip1.mp4");
        assert_eq!(file_name("a/b/c/clip.mov"), "clip.mov");
        assert_eq!(file_name("clip.mp4"), "clip.mp4");
        assert_eq!(file_name("videos/"), "");
        assert_eq!(file_name(""), "");
    }

    #[test]
    fn with_extension_replaces_or_appends() {
        assert_eq!(with_extension("clip1.mp4", "gif"), "clip1.gif");
        assert_eq!(with_extension("clip", "gif"), "clip.gif");
        assert_eq!(with_extension("archive.tar.gz", "gif"), "archive.tar.gif");
        // hidden files keep their leading dot
        assert_eq!(with_extension(".hidden", "gif"), ".hidden.gif");
    }

    #[test]
    fn destination_key_preserves_directory() {
        assert_eq!(
            destination_key("videos/clip1.mp4", "clip1.gif"),
            "videos/clip1.gif"
        );
        assert_eq!(
            destination_key("a/b/clip.mov", "clip.gif"),
            "a/b/clip.gif"
        );
    }

    #[test]
    fn destination_key_without_directory_is_bare_name() {
        assert_eq!(destination_key("clip1.mp4", "clip1.gif"), "clip1.gif");
    }
}
