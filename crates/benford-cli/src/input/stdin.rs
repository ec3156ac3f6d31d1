use serde_json::Value;
use std::io::{self, Read};

/// Data piped on stdin.
pub enum StdinPayload {
    /// A JSON document.
    Json(Value),
    /// Anything else, split on whitespace and commas into raw tokens.
    Tokens(Vec<String>),
}

/// Attempt to read piped data from stdin.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin() -> Result<Option<StdinPayload>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    parse_payload(&buffer)
}

/// Classify piped text as a JSON document or a list of raw tokens.
fn parse_payload(text: &str) -> Result<Option<StdinPayload>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.starts_with('{') {
        let value: Value = serde_json::from_str(trimmed)?;
        return Ok(Some(StdinPayload::Json(value)));
    }

    Ok(Some(StdinPayload::Tokens(split_tokens(trimmed))))
}

fn split_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
