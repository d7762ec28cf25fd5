use crate::prelude::*;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Pretty prints any serializable value with a four space indent.
/// Non-ASCII characters are written as is.
pub fn format_json<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Parses `text` as JSON and pretty prints it.
pub fn format_json_str(text: &str) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    format_json(&value)
}
