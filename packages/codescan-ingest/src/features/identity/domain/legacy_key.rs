//! Legacy key derivation
//!
//! Older report formats kept an explicit module level in component keys
//! (`project:module1:module2:file2`, with file paths relative to their
//! module). Newer reports flatten modules away and key files by their
//! project-relative path (`project:module1_path/module2_path/file2_path`).
//! Components persisted under the old scheme are found again by deriving,
//! from a current report key, where the equivalent entity sat in the
//! retired module hierarchy.
//!
//! Derivation is pure string computation over the module map sent with the
//! report; it never touches storage.

use std::collections::HashMap;
use std::fmt;

use crate::features::component_store::domain::models::ComponentKey;

use super::report_key::{key_path_part, KEY_DELIMITER, PATH_SEPARATOR};

/// Where a component addressed by a current report key sat in the retired
/// module hierarchy.
///
/// Exists only transiently as a lookup candidate; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyKey {
    /// Legacy keys of the containing modules, outermost first. Never empty.
    pub module_keys: Vec<ComponentKey>,

    /// Path relative to the innermost module, or `None` when the report
    /// key denotes that module itself (since flattened to a folder)
    pub relative_path: Option<String>,
}

impl fmt::Display for LegacyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(module_key) = self.module_keys.last() {
            write!(f, "{module_key}")?;
        }
        if let Some(relative_path) = &self.relative_path {
            write!(f, "{KEY_DELIMITER}{relative_path}")?;
        }
        Ok(())
    }
}

/// Derive the legacy lookup candidate for `report_key`, if any.
///
/// `modules_relative_paths` maps each legacy module key to the module's
/// path relative to the project root; nested modules accumulate their
/// parents' paths (`module1_path/module2_path`). The deepest module whose
/// relative path is a whole-segment prefix of the key's path part anchors
/// the candidate. Entries that match nothing are ignored, as is a root
/// entry with an empty path. Returns `None` for the root key itself and
/// for keys with no module ancestor, which need no migration.
pub fn derive_legacy_key(
    report_key: &str,
    root_key: &str,
    modules_relative_paths: &HashMap<ComponentKey, String>,
) -> Option<LegacyKey> {
    let path = key_path_part(report_key, root_key)?;

    let mut chain: Vec<(&str, &str)> = modules_relative_paths
        .iter()
        .filter(|(module_key, module_path)| {
            module_key.as_str() != root_key && is_segment_prefix(module_path, path)
        })
        .map(|(module_key, module_path)| (module_key.as_str(), module_path.as_str()))
        .collect();
    if chain.is_empty() {
        return None;
    }
    // outermost first; key order disambiguates duplicate paths
    chain.sort_by(|(key_a, path_a), (key_b, path_b)| {
        path_a.len().cmp(&path_b.len()).then_with(|| key_a.cmp(key_b))
    });

    let (_, innermost_path) = *chain.last()?;
    let relative_path = if path == innermost_path {
        None
    } else {
        Some(path[innermost_path.len() + 1..].to_string())
    };

    Some(LegacyKey {
        module_keys: chain
            .into_iter()
            .map(|(module_key, _)| module_key.to_string())
            .collect(),
        relative_path,
    })
}

/// Whole-segment prefix test: `module1_path` anchors `module1_path` and
/// `module1_path/file`, never `module1_path_extra`.
fn is_segment_prefix(module_path: &str, path: &str) -> bool {
    if module_path.is_empty() {
        return false;
    }
    match path.strip_prefix(module_path) {
        Some(rest) => rest.is_empty() || rest.starts_with(PATH_SEPARATOR),
        None => false,
    }
}
