//! Folder-scanning description source.
//!
//! Supports the two artifact shapes the surrounding tooling produces:
//! `.txt` files (optional `ID:` header line, else the file stem is the id)
//! and `.json` files holding one `{id, description}` object or an array of
//! them. Other file types are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::DriftError;
use crate::source::{DescriptionEntry, DescriptionSource};
use crate::types::SourceId;

/// Description source backed by a folder of artifact files.
pub struct FolderSource {
    source_id: SourceId,
    root: PathBuf,
    follow_links: bool,
}

impl FolderSource {
    /// Create a source scanning `root`.
    pub fn new(source_id: impl Into<SourceId>, root: impl Into<PathBuf>) -> Self {
        Self {
            source_id: source_id.into(),
            root: root.into(),
            follow_links: false,
        }
    }

    /// Configure symlink traversal.
    pub fn with_follow_symlinks(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }
}

impl DescriptionSource for FolderSource {
    fn id(&self) -> &str {
        &self.source_id
    }

    fn fetch(&self) -> Result<Vec<DescriptionEntry>, DriftError> {
        if !self.root.is_dir() {
            return Err(DriftError::SourceUnavailable {
                source_id: self.source_id.clone(),
                reason: format!("'{}' is not a readable directory", self.root.display()),
            });
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path().to_path_buf())
            .collect();
        files.sort();

        let mut entries = Vec::new();
        for path in files {
            match read_artifact(&path) {
                Ok(Some(mut found)) => entries.append(&mut found),
                Ok(None) => debug!(path = %path.display(), "skipping unsupported artifact"),
                Err(err) => warn!(path = %path.display(), %err, "skipping unreadable artifact"),
            }
        }
        Ok(entries)
    }
}

/// Read one description artifact, or `None` for unsupported file types.
fn read_artifact(path: &Path) -> Result<Option<Vec<DescriptionEntry>>, DriftError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("txt") => read_description_file(path).map(|entry| Some(vec![entry])),
        Some("json") => read_json_artifact(path).map(Some),
        _ => Ok(None),
    }
}

/// Parse a plain-text description file.
///
/// When the first line is an `ID:` header (an id token followed by a
/// colon), the id comes from the header and the description is the
/// remaining lines joined with single spaces. Otherwise the file stem is
/// the id and the whole content is the description.
pub fn read_description_file(path: &Path) -> Result<DescriptionEntry, DriftError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        DriftError::MalformedInput(format!("could not read '{}': {err}", path.display()))
    })?;

    let mut lines = raw.lines();
    if let Some(first) = lines.next() {
        if let Some((head, _)) = first.split_once(':') {
            let head = head.trim();
            if !head.is_empty() && !head.contains(char::is_whitespace) {
                let description = lines
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<&str>>()
                    .join(" ");
                return Ok(DescriptionEntry::new(head, description));
            }
        }
    }

    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            DriftError::MalformedInput(format!(
                "cannot derive an id from file name '{}'",
                path.display()
            ))
        })?;
    Ok(DescriptionEntry::new(id, raw.trim()))
}

#[derive(Deserialize)]
struct JsonArtifact {
    id: String,
    description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonArtifactFile {
    One(JsonArtifact),
    Many(Vec<JsonArtifact>),
}

fn read_json_artifact(path: &Path) -> Result<Vec<DescriptionEntry>, DriftError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        DriftError::MalformedInput(format!("could not read '{}': {err}", path.display()))
    })?;
    let parsed: JsonArtifactFile = serde_json::from_str(&raw).map_err(|err| {
        DriftError::MalformedInput(format!("could not parse '{}': {err}", path.display()))
    })?;
    let artifacts = match parsed {
        JsonArtifactFile::One(artifact) => vec![artifact],
        JsonArtifactFile::Many(artifacts) => artifacts,
    };
    Ok(artifacts
        .into_iter()
        .map(|artifact| DescriptionEntry::new(artifact.id, artifact.description))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn txt_header_line_supplies_the_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("req.txt");
        fs::write(&path, "REQ-7: brake timing\nThe brake must engage\nwithin 200 ms\n").unwrap();

        let entry = read_description_file(&path).unwrap();
        assert_eq!(entry.id, "REQ-7");
        assert_eq!(entry.description, "The brake must engage within 200 ms");
    }

    #[test]
    fn txt_without_header_uses_file_stem() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("REQ-9.txt");
        fs::write(&path, "Plain description text\n").unwrap();

        let entry = read_description_file(&path).unwrap();
        assert_eq!(entry.id, "REQ-9");
        assert_eq!(entry.description, "Plain description text");
    }

    #[test]
    fn first_line_colon_inside_prose_is_not_a_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("REQ-10.txt");
        fs::write(&path, "note the following: brakes matter\n").unwrap();

        let entry = read_description_file(&path).unwrap();
        assert_eq!(entry.id, "REQ-10");
    }

    #[test]
    fn folder_fetch_collects_txt_and_json_artifacts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("REQ-1.txt"), "first description").unwrap();
        fs::write(
            dir.path().join("batch.json"),
            r#"[{"id": "REQ-2", "description": "second"}, {"id": "REQ-3", "description": "third"}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("ignored.bin"), [0u8, 159]).unwrap();

        let source = FolderSource::new("testcases", dir.path());
        let mut ids: Vec<String> = source
            .fetch()
            .unwrap()
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["REQ-1", "REQ-2", "REQ-3"]);
    }

    #[test]
    fn one_bad_artifact_does_not_abort_the_batch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.txt"), "fine").unwrap();
        fs::write(dir.path().join("bad.json"), "{ nope").unwrap();

        let source = FolderSource::new("testcases", dir.path());
        let entries = source.fetch().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "good");
    }

    #[test]
    fn missing_root_is_source_unavailable() {
        let dir = tempdir().unwrap();
        let source = FolderSource::new("testcases", dir.path().join("nowhere"));
        let err = source.fetch().unwrap_err();
        assert!(matches!(
            err,
            DriftError::SourceUnavailable { ref source_id, .. } if source_id == "testcases"
        ));
    }

    #[test]
    fn json_single_object_artifact_parses() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("one.json"),
            r#"{"id": "REQ-4", "description": "single"}"#,
        )
        .unwrap();

        let source = FolderSource::new("testcases", dir.path());
        let entries = source.fetch().unwrap();
        assert_eq!(entries, vec![DescriptionEntry::new("REQ-4", "single")]);
    }
}
