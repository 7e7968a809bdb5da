//! Report key format helpers
//!
//! A report key is a `':'`-delimited hierarchical identifier computed at
//! analysis time. The root segment is the project key; in the current
//! format, file and directory keys append a single `'/'`-separated path
//! relative to the project root, e.g. `acme:server/src/main.c`.

/// Separates the project key from the component part of a report key
pub const KEY_DELIMITER: char = ':';

/// Separates path segments inside the component part
pub const PATH_SEPARATOR: char = '/';

/// Compose the current-format report key of a component from the project
/// key and the component's project-relative path.
pub fn component_key(project_key: &str, relative_path: &str) -> String {
    format!("{project_key}{KEY_DELIMITER}{relative_path}")
}

/// The part of `report_key` below `root_key`, or `None` when the key is
/// the root itself or belongs to a different project.
pub fn key_path_part<'a>(report_key: &'a str, root_key: &str) -> Option<&'a str> {
    report_key
        .strip_prefix(root_key)?
        .strip_prefix(KEY_DELIMITER)
}
