//! File-based Branch Source Adapter
//!
//! Reads branch records exported as JSON. Two layouts are accepted:
//! a bare array of records, or an object with a `branches` array
//! (the shape of a saved analysis request).

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::mcda::BranchRecord;
use crate::ports::BranchSource;

#[derive(Debug, Deserialize)]
struct WrappedBranches {
    branches: Vec<BranchRecord>,
}

/// Loads branch records from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileBranchSource {
    path: PathBuf,
}

impl JsonFileBranchSource {
    /// # Example
    /// ```ignore
    /// let source = JsonFileBranchSource::new("./data/branches-2024-q3.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Picks the layout from the first token so serde errors keep their
    /// line and column.
    fn parse(&self, contents: &str) -> Result<Vec<BranchRecord>, DomainError> {
        let parsed = if contents.trim_start().starts_with('{') {
            serde_json::from_str::<WrappedBranches>(contents).map(|file| file.branches)
        } else {
            serde_json::from_str::<Vec<BranchRecord>>(contents)
        };

        parsed.map_err(|e| {
            DomainError::new(
                ErrorCode::InvalidInput,
                format!("Invalid branch data in {}: {}", self.path.display(), e),
            )
            .with_detail("path", self.path.display().to_string())
            .with_detail("line", e.line().to_string())
        })
    }
}

#[async_trait]
impl BranchSource for JsonFileBranchSource {
    async fn load(&self) -> Result<Vec<BranchRecord>, DomainError> {
        let contents = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::SourceUnavailable,
                format!("Failed to read {}: {}", self.path.display(), e),
            )
            .with_detail("path", self.path.display().to_string())
        })?;

        let branches = self.parse(&contents)?;
        debug!(path = %self.path.display(), count = branches.len(), "Loaded branch records");
        Ok(branches)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mcda::Criterion;
    use tempfile::TempDir;

    async fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn loads_bare_array() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "branches.json",
            r#"[
                {"branch_id": 1, "branch_name": "Central", "total_savings": 700000, "active_members": "150"},
                {"branch_id": "HS-02", "branch_name": "Hillside", "total_savings": "200000.50"}
            ]"#,
        )
        .await;

        let branches = JsonFileBranchSource::new(&path).load().await.unwrap();

        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].figure(Criterion::ActiveMembers), 150.0);
        assert_eq!(branches[1].figure(Criterion::TotalSavings), 200000.5);
    }

    #[tokio::test]
    async fn loads_wrapped_object() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "request.json",
            r#"{"branches": [{"branch_name": "Annex"}], "weights": null}"#,
        )
        .await;

        let branches = JsonFileBranchSource::new(&path).load().await.unwrap();

        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].branch_name, "Annex");
    }

    #[tokio::test]
    async fn missing_file_is_source_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = JsonFileBranchSource::new(dir.path().join("absent.json"));

        let err = source.load().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::SourceUnavailable);
        assert!(err.details.contains_key("path"));
    }

    #[tokio::test]
    async fn malformed_json_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "broken.json", "{ not json").await;

        let err = JsonFileBranchSource::new(&path).load().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message().contains("Invalid branch data"));
    }

    #[tokio::test]
    async fn bad_record_reports_field_and_line() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "typo.json",
            "[\n  {\"branch_name\": \"Central\"},\n  {\"branch_name\": 42}\n]",
        )
        .await;

        let err = JsonFileBranchSource::new(&path).load().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message().contains("line 3"), "{}", err.message());
        assert!(!err.message().contains("did not match any variant"));
        assert_eq!(err.details.get("line"), Some(&"3".to_string()));
    }

    #[tokio::test]
    async fn wrapped_object_without_branches_names_the_field() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "request.json", r#"{"weights": null}"#).await;

        let err = JsonFileBranchSource::new(&path).load().await.unwrap_err();

        assert!(err.message().contains("missing field `branches`"), "{}", err.message());
    }

    #[tokio::test]
    async fn empty_array_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.json", "[]").await;

        assert!(JsonFileBranchSource::new(&path).load().await.unwrap().is_empty());
    }
}
