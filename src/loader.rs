use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::model::TestPayload;

/// Load a quiz payload from disk, dispatching on the file extension.
/// JSON is the authoring tool's native shape; YAML is accepted for
/// hand-written quizzes.
pub fn load_payload(path: &Path) -> Result<TestPayload, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let payload = match ext.as_str() {
        "json" | "" => from_json(&content)?,
        "yaml" | "yml" => from_yaml(&content)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    if payload.questions.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(payload)
}

pub fn from_json(content: &str) -> Result<TestPayload, LoadError> {
    Ok(serde_json::from_str(content)?)
}

pub fn from_yaml(content: &str) -> Result<TestPayload, LoadError> {
    Ok(serde_yaml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_payload_parses() {
        let yaml = r#"
title: Weekly review
instructions: ""
questions:
  - type: fill
    question: ""
    sentence: "water boils at high temperature"
    options: ["boils", "high"]
"#;
        let payload = from_yaml(yaml).unwrap();
        assert_eq!(payload.title, "Weekly review");
        assert_eq!(payload.questions.len(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(from_json("{not json"), Err(LoadError::Json(_))));
    }
}
