//! Markdown report writer tool

use async_trait::async_trait;
use newscast_core::{Error, Result as CoreResult};
use newscast_tools::{Tool, schema};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::{ResearchError, Result};

use super::{MARKDOWN_TOOL, output_path, status_error};

#[derive(Debug, Deserialize)]
struct MarkdownParams {
    filename: String,
    content: String,
}

/// Tool saving a Markdown report into the output directory
pub struct SaveMarkdownTool {
    output_dir: PathBuf,
}

impl SaveMarkdownTool {
    /// Create a writer rooted at `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write `content` to `<output_dir>/<filename>.md`, returning the full path
    pub fn save(&self, filename: &str, content: &str) -> Result<PathBuf> {
        let path = output_path(&self.output_dir, filename, "md")?;
        std::fs::write(&path, content)?;
        Ok(std::fs::canonicalize(&path).unwrap_or(path))
    }
}

#[async_trait]
impl Tool for SaveMarkdownTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: MarkdownParams = serde_json::from_value(params)
            .map_err(|e| Error::invalid_arguments(MARKDOWN_TOOL, e))?;

        match self.save(&params.filename, &params.content) {
            Ok(path) => {
                info!(path = %path.display(), bytes = params.content.len(), "Saved Markdown report");
                Ok(json!({
                    "status": "success",
                    "message": format!("Successfully saved news to {}", path.display()),
                }))
            }
            Err(e) => {
                warn!(dir = %self.output_dir.display(), error = %e, "Failed to save Markdown report");
                Ok(status_error(format!("Failed to save file: {}", describe(&e))))
            }
        }
    }

    fn name(&self) -> &str {
        MARKDOWN_TOOL
    }

    fn description(&self) -> &str {
        "Save Markdown content to a file in the output directory. \
         The '.md' extension is added when missing."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "filename": schema::string("File name, e.g. 'ai_research_report.md'"),
                "content": schema::string("Markdown content to write"),
            }),
            &["filename", "content"],
        )
    }
}

fn describe(err: &ResearchError) -> String {
    match err {
        ResearchError::Io(io) => io.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let tool = SaveMarkdownTool::new(dir.path());

        let result = tool
            .execute(json!({"filename": "ai_research_report", "content": "# Report\n"}))
            .await
            .unwrap();

        assert_eq!(result["status"], "success");
        let written = dir.path().join("ai_research_report.md");
        assert_eq!(std::fs::read_to_string(&written).unwrap(), "# Report\n");
        assert!(
            result["message"]
                .as_str()
                .unwrap()
                .ends_with("ai_research_report.md")
        );
    }

    #[tokio::test]
    async fn test_existing_extension_kept() {
        let dir = tempfile::tempdir().unwrap();
        let tool = SaveMarkdownTool::new(dir.path());

        tool.execute(json!({"filename": "news.md", "content": "ñ"}))
            .await
            .unwrap();

        assert!(dir.path().join("news.md").exists());
        assert!(!dir.path().join("news.md.md").exists());
    }

    #[tokio::test]
    async fn test_write_failure_is_status_error() {
        let dir = tempfile::tempdir().unwrap();
        let tool = SaveMarkdownTool::new(dir.path().join("missing"));

        let result = tool
            .execute(json!({"filename": "report", "content": "x"}))
            .await
            .unwrap();

        assert_eq!(result["status"], "error");
        assert!(
            result["message"]
                .as_str()
                .unwrap()
                .starts_with("Failed to save file: ")
        );
    }
}
