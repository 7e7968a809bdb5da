//! Component row model
//!
//! A component is one node of the persisted project tree: the project root,
//! a legacy module, a directory or a file. Rows are addressed two ways:
//! by their key string, and structurally by the uuid chain of the modules
//! that contain them plus a relative path (see
//! [`ComponentStore`](super::ports::ComponentStore)).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Component key: `':'`-delimited hierarchical identifier computed at
/// analysis time.
///
/// Examples:
/// - `"acme"` (project root)
/// - `"acme:server"` (legacy module)
/// - `"acme:server/src/main.c"` (file, current format)
pub type ComponentKey = String;

/// Persistent component identifier (v4 UUID rendered as a string)
pub type ComponentUuid = String;

/// Hierarchy level of a persisted component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualifier {
    Project,
    Module,
    Directory,
    File,
}

impl Qualifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Qualifier::Project => "project",
            Qualifier::Module => "module",
            Qualifier::Directory => "directory",
            Qualifier::File => "file",
        }
    }

    pub fn parse(s: &str) -> Option<Qualifier> {
        match s {
            "project" => Some(Qualifier::Project),
            "module" => Some(Qualifier::Module),
            "directory" => Some(Qualifier::Directory),
            "file" => Some(Qualifier::File),
            _ => None,
        }
    }
}

/// Persisted component row
///
/// `module_uuid_path` is the dot-delimited uuid chain of the ancestors
/// containing this row, project first, with leading and trailing dots: a
/// file inside `module2` inside `module1` stores
/// `.{project}.{module1}.{module2}.`. The project row itself, having no
/// ancestors, stores `"."`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub uuid: ComponentUuid,

    /// Key the row was persisted under. For rows written before module
    /// flattening this is a legacy-format string.
    pub key: ComponentKey,

    /// Uuid of the project root row (the root row points at itself)
    pub project_uuid: ComponentUuid,

    /// Ancestor uuid chain, `.{project}.{module...}.`
    pub module_uuid_path: String,

    /// Path relative to the innermost containing module, for rows that have
    /// one (files, directories, legacy modules)
    pub path: Option<String>,

    pub qualifier: Qualifier,

    /// Disabled rows stay addressable; resolution ignores this flag
    pub enabled: bool,

    pub created_at: DateTime<Utc>,
}

/// Build the `module_uuid_path` value for a row contained by `project_uuid`
/// and the given module chain, outermost module first.
pub fn module_uuid_path(project_uuid: &str, module_uuids: &[ComponentUuid]) -> String {
    let mut out = String::with_capacity(2 + project_uuid.len() + module_uuids.len() * 37);
    out.push('.');
    out.push_str(project_uuid);
    out.push('.');
    for uuid in module_uuids {
        out.push_str(uuid);
        out.push('.');
    }
    out
}

/// Iterate the ancestor uuids stored in a `module_uuid_path`, project first
pub fn ancestor_uuids(module_uuid_path: &str) -> impl Iterator<Item = &str> {
    module_uuid_path.split('.').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_uuid_path_format() {
        assert_eq!(module_uuid_path("p1", &[]), ".p1.");
        assert_eq!(
            module_uuid_path("p1", &["m1".to_string(), "m2".to_string()]),
            ".p1.m1.m2."
        );
    }

    #[test]
    fn test_ancestor_uuids() {
        let ancestors: Vec<&str> = ancestor_uuids(".p1.m1.m2.").collect();
        assert_eq!(ancestors, vec!["p1", "m1", "m2"]);

        assert_eq!(ancestor_uuids(".").count(), 0);
    }

    #[test]
    fn test_qualifier_round_trip() {
        for qualifier in [
            Qualifier::Project,
            Qualifier::Module,
            Qualifier::Directory,
            Qualifier::File,
        ] {
            assert_eq!(Qualifier::parse(qualifier.as_str()), Some(qualifier));
        }
        assert_eq!(Qualifier::parse("package"), None);
    }

    #[test]
    fn test_component_serde() {
        let component = Component {
            uuid: "u1".to_string(),
            key: "acme:src/main.c".to_string(),
            project_uuid: "p1".to_string(),
            module_uuid_path: ".p1.".to_string(),
            path: Some("src/main.c".to_string()),
            qualifier: Qualifier::File,
            enabled: true,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&component).unwrap();
        assert!(json.contains("acme:src/main.c"));
        assert!(json.contains("\"file\""));

        let deserialized: Component = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, component);
    }
}
