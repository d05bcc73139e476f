//! Built-in local capabilities.
//!
//! The explicit startup list every kernel registers at boot. Each unit is
//! self-contained: plain filesystem and clock reads, no network access.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use praxis_types::{Args, Capability, CapabilityError};

/// Cap on rendered capability output, in characters.
const MAX_OUTPUT_CHARS: usize = 8_192;

/// All built-in capabilities, ready for registration.
#[must_use]
pub fn builtin_capabilities() -> Vec<Arc<dyn Capability>> {
    vec![
        Arc::new(ReadFile),
        Arc::new(ListDir),
        Arc::new(CurrentTime),
    ]
}

fn required_str<'a>(args: &'a Args, key: &str) -> Result<&'a str, CapabilityError> {
    args.get(key)
        .and_then(|value| value.as_str())
        .ok_or_else(|| CapabilityError::InvalidInput(format!("missing string argument '{key}'")))
}

/// Truncate text at a char boundary, noting the original length.
fn clamp_output(text: String) -> String {
    if text.len() <= MAX_OUTPUT_CHARS {
        return text;
    }
    let mut boundary = MAX_OUTPUT_CHARS;
    while boundary > 0 && !text.is_char_boundary(boundary) {
        boundary -= 1;
    }
    format!(
        "{}... [truncated, {} chars total]",
        &text[..boundary],
        text.len()
    )
}

/// Read a UTF-8 text file from disk.
pub struct ReadFile;

impl Capability for ReadFile {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read a UTF-8 text file. Arguments: {\"path\": string}."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": { "path": { "type": "string" } },
            "required": ["path"]
        })
    }

    fn invoke(&self, args: &Args) -> Result<String, CapabilityError> {
        let path = required_str(args, "path")?;
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CapabilityError::ExecutionFailed(Box::new(e)))?;
        Ok(clamp_output(contents))
    }
}

/// List the entries of a directory, directories marked with a trailing
/// slash.
pub struct ListDir;

impl Capability for ListDir {
    fn name(&self) -> &str {
        "list_dir"
    }

    fn description(&self) -> &str {
        "List the entries of a directory. Arguments: {\"path\": string (default \".\")}."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": { "path": { "type": "string" } }
        })
    }

    fn invoke(&self, args: &Args) -> Result<String, CapabilityError> {
        let path = args
            .get("path")
            .and_then(|value| value.as_str())
            .unwrap_or(".");

        let entries = std::fs::read_dir(path)
            .map_err(|e| CapabilityError::ExecutionFailed(Box::new(e)))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CapabilityError::ExecutionFailed(Box::new(e)))?;
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                name.push('/');
            }
            names.push(name);
        }
        names.sort();
        Ok(clamp_output(names.join("\n")))
    }
}

/// Report the current UTC time.
pub struct CurrentTime;

impl Capability for CurrentTime {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Current UTC time in RFC 3339 format. No arguments."
    }

    fn invoke(&self, _args: &Args) -> Result<String, CapabilityError> {
        Ok(Utc::now().to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_file_returns_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "hello kernel").unwrap();

        let mut args = Args::new();
        args.insert("path".to_string(), json!(path.to_string_lossy()));

        assert_eq!(ReadFile.invoke(&args).unwrap(), "hello kernel");
    }

    #[test]
    fn read_file_without_path_is_invalid_input() {
        let err = ReadFile.invoke(&Args::new()).unwrap_err();
        assert!(matches!(err, CapabilityError::InvalidInput(_)));
    }

    #[test]
    fn read_file_missing_file_is_execution_failure() {
        let mut args = Args::new();
        args.insert("path".to_string(), json!("/definitely/not/here.txt"));
        let err = ReadFile.invoke(&args).unwrap_err();
        assert!(matches!(err, CapabilityError::ExecutionFailed(_)));
    }

    #[test]
    fn list_dir_marks_directories_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();

        let mut args = Args::new();
        args.insert("path".to_string(), json!(dir.path().to_string_lossy()));

        let listing = ListDir.invoke(&args).unwrap();
        assert_eq!(listing, "a.txt\nsub/");
    }

    #[test]
    fn current_time_is_rfc3339() {
        let rendered = CurrentTime.invoke(&Args::new()).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&rendered).is_ok());
    }

    #[test]
    fn clamp_output_preserves_short_text() {
        assert_eq!(clamp_output("short".to_string()), "short");
    }

    #[test]
    fn clamp_output_truncates_long_text() {
        let long = "y".repeat(MAX_OUTPUT_CHARS + 100);
        let clamped = clamp_output(long);
        assert!(clamped.contains("[truncated,"));
        assert!(clamped.len() < MAX_OUTPUT_CHARS + 100);
    }

    #[test]
    fn builtin_set_is_stable() {
        let names: Vec<String> = builtin_capabilities()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["read_file", "list_dir", "current_time"]);
    }
}
