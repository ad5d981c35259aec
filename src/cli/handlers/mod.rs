//! CLI command handlers.

pub mod plan;
pub mod show;
pub mod step;
pub mod validate;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::ShotlistError;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Read a JSON or YAML artifact, picking the parser by file extension.
pub fn load_artifact<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file '{}': {}", path.display(), e))?;
    let parsed: Result<T, ShotlistError> = if is_yaml(path) {
        serde_yaml_ng::from_str(&content).map_err(Into::into)
    } else {
        serde_json::from_str(&content).map_err(Into::into)
    };
    parsed.with_context(|| format!("Failed to parse '{}'", path.display()))
}

/// Write an artifact as YAML or pretty JSON, by file extension.
pub fn write_artifact<T: Serialize>(path: &Path, item: &T) -> anyhow::Result<()> {
    let content = if is_yaml(path) {
        serde_yaml_ng::to_string(item)?
    } else {
        serde_json::to_string_pretty(item)?
    };
    std::fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("Failed to write file '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Screenplay, ShotList, StoryFormat};

    #[test]
    fn test_load_yaml_screenplay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.yml");
        std::fs::write(
            &path,
            "title: Pilot\nscenes:\n  - slugline: INT. LAB - NIGHT\n    beat: Setup\n",
        )
        .unwrap();
        let sp: Screenplay = load_artifact(&path).unwrap();
        assert_eq!(sp.title, "Pilot");
        assert_eq!(sp.scenes[0].slugline, "INT. LAB - NIGHT");
    }

    #[test]
    fn test_write_then_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        let list = ShotList::new("p", "t", StoryFormat::ShortForm);
        write_artifact(&path, &list).unwrap();
        let back: ShotList = load_artifact(&path).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn test_malformed_yaml_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "title: [unclosed").unwrap();
        let err = load_artifact::<Screenplay>(&path).unwrap_err();
        assert!(err.to_string().contains("bad.yaml"));
        assert!(matches!(
            err.downcast_ref::<ShotlistError>(),
            Some(ShotlistError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_artifact::<ShotList>(Path::new("/nonexistent/list.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/list.json"));
    }
}
