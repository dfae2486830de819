use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid JSON at line {line}, column {column}: {message}")]
pub struct JsonToolError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl From<serde_json::Error> for JsonToolError {
    fn from(value: serde_json::Error) -> Self {
        Self {
            line: value.line(),
            column: value.column(),
            message: value.to_string(),
        }
    }
}

fn parse(text: &str) -> Result<serde_json::Value, JsonToolError> {
    // An empty editor is an empty object.
    let source = if text.trim().is_empty() { "{}" } else { text };
    Ok(serde_json::from_str(source)?)
}

pub fn validate(text: &str) -> Result<(), JsonToolError> {
    parse(text).map(|_| ())
}

/// Pretty-prints with two-space indentation.
pub fn format(text: &str) -> Result<String, JsonToolError> {
    let value = parse(text)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn minify(text: &str) -> Result<String, JsonToolError> {
    let value = parse(text)?;
    Ok(serde_json::to_string(&value)?)
}
