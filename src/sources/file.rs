//! Offline retrieval from a JSON export
//!
//! The file maps tab names to their rows, `{"S1x": [["Date", ...], ...]}`.
//! A tab mapped to `null` stands for a failed retrieval.

use super::{rows_from_json, RowSource};
use crate::types::{PltrackError, Result, SourceBatch};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileSource {
    path: PathBuf,
    tabs: HashMap<String, Option<Vec<Vec<Value>>>>,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let tabs = serde_json::from_str(&content)
            .map_err(|e| PltrackError::Parse(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            path: path.to_path_buf(),
            tabs,
        })
    }
}

impl RowSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch_all(&self, tabs: &[String]) -> HashMap<String, SourceBatch> {
        tabs.iter()
            .map(|tab| {
                let batch = match self.tabs.get(tab) {
                    Some(Some(values)) => SourceBatch::Rows(rows_from_json(values.clone())),
                    Some(None) => SourceBatch::Unavailable("null in input file".into()),
                    None => SourceBatch::Unavailable(format!(
                        "tab missing from {}",
                        self.path.display()
                    )),
                };
                (tab.clone(), batch)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_input(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.json");
        fs::write(&path, content).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_fetch_all_from_file() {
        let (_dir, path) = write_input(
            r#"{"S1x": [["Date"], ["01/01/2024", "5"]], "S2x": null}"#,
        );
        let source = FileSource::open(&path).unwrap();

        let batches = source.fetch_all(&["S1x".into(), "S2x".into(), "S3PM".into()]);

        assert!(matches!(&batches["S1x"], SourceBatch::Rows(rows) if rows.len() == 2));
        assert_eq!(
            batches["S2x"],
            SourceBatch::Unavailable("null in input file".into())
        );
        assert!(matches!(&batches["S3PM"], SourceBatch::Unavailable(r) if r.contains("missing")));
    }

    #[test]
    fn test_open_invalid_json() {
        let (_dir, path) = write_input("[1, 2");
        assert!(matches!(
            FileSource::open(&path),
            Err(PltrackError::Parse(_))
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileSource::open(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(PltrackError::Io(_))));
    }
}
