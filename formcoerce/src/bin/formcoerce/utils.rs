use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

/// Split a `key=value` argument; the value may itself contain `=`
pub fn parse_field_pair(pair: &str) -> Result<(String, String)> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected KEY=VALUE, got '{pair}'"))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("Field name missing in '{pair}'");
    }
    Ok((key.to_string(), value.to_string()))
}

/// Read a JSON document from a file, or from stdin when the path is `-`
pub fn read_json_input(path: &Path) -> Result<Value> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).context("Input is not valid JSON")
}

/// Merge JSON input and `key=value` pairs into one submission object.
/// Pairs are kept as strings, the way a browser submits form fields.
pub fn build_submission(input: Option<Value>, pairs: &[String]) -> Result<Value> {
    let mut submission = match input {
        None => Map::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            if pairs.is_empty() {
                return Ok(other);
            }
            bail!("--field cannot be combined with non-object JSON input");
        }
    };
    for pair in pairs {
        let (key, value) = parse_field_pair(pair)?;
        submission.insert(key, Value::String(value));
    }
    Ok(Value::Object(submission))
}

/// Render an optional value for tables; `None` is the absent marker
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None => "(absent)".to_string(),
        Some(Value::String(text)) => format!("{text:?}"),
        Some(other) => other.to_string(),
    }
}
