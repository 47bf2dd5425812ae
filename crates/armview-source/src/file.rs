//! File source: reads a rules export such as `arm_rules.json` from disk.

use crate::RuleSource;
use armview_core::{DataUnavailable, RuleSet};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RuleSource for FileSource {
    async fn fetch(&self) -> Result<RuleSet, DataUnavailable> {
        tracing::debug!(path = %self.path.display(), "reading rules file");
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| DataUnavailable::Io {
                path: self.path.clone(),
                source,
            })?;
        RuleSet::from_json(&bytes).inspect_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "rules file rejected");
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_rules_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"antecedents_str":"Cold","consequents_str":"Chills","support":0.2,"confidence":0.7,"lift":1.3}}]"#
        )
        .unwrap();

        let set = FileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.antecedents(), ["Cold"]);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = FileSource::new("/nonexistent/arm_rules.json")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, DataUnavailable::Io { .. }));
    }

    #[tokio::test]
    async fn garbage_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = FileSource::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, DataUnavailable::Malformed(_)));
    }
}
