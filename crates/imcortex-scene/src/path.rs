//! Path helpers for scene-relative file names

use std::path::{Component, Path};

/// Directory portion of a file name ("" when there is none)
pub fn directory_of(file_name: &str) -> String {
    Path::new(file_name)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Express `path` relative to `directory`.
///
/// Both must be absolute; otherwise `None`. Components are compared
/// textually, no file system access takes place.
pub fn relative_path_to_directory(path: &str, directory: &str) -> Option<String> {
    let path = Path::new(path);
    let directory = Path::new(directory);
    if !path.is_absolute() || !directory.is_absolute() {
        return None;
    }

    let path_parts: Vec<Component> = path.components().collect();
    let dir_parts: Vec<Component> = directory.components().collect();

    let common = path_parts
        .iter()
        .zip(dir_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..dir_parts.len() {
        parts.push("..".to_string());
    }
    for part in &path_parts[common..] {
        parts.push(part.as_os_str().to_string_lossy().into_owned());
    }

    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_of() {
        assert_eq!(directory_of("/data/study/a.scene"), "/data/study");
        assert_eq!(directory_of("a.scene"), "");
    }

    #[test]
    fn test_relative_path_same_directory() {
        assert_eq!(
            relative_path_to_directory("/data/study/a.border", "/data/study"),
            Some("a.border".to_string())
        );
    }

    #[test]
    fn test_relative_path_sibling_directory() {
        assert_eq!(
            relative_path_to_directory("/data/borders/a.border", "/data/scenes"),
            Some("../borders/a.border".to_string())
        );
    }

    #[test]
    fn test_relative_path_requires_absolute() {
        assert_eq!(relative_path_to_directory("a.border", "/data"), None);
        assert_eq!(relative_path_to_directory("/data/a.border", "data"), None);
    }
}
