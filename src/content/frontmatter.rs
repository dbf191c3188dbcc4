//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde_yaml::Value;

/// Front-matter of a post: an ordered map of field name to string value.
///
/// Every scalar is kept as its string form. Nothing is validated here;
/// required-field checks happen in the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Malformed front-matter never fails: a warning is logged, the metadata
    /// is left empty and the text after the closing delimiter is the body.
    /// A document without front-matter is returned unchanged.
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();

        let parsed = if trimmed.starts_with("---") {
            // YAML front-matter (---)
            Self::parse_yaml(trimmed)
        } else if trimmed.starts_with(";;;") {
            // JSON front-matter (;;;)
            Self::parse_json(trimmed)
        } else {
            None
        };

        parsed.unwrap_or_else(|| (FrontMatter::default(), content))
    }

    /// `None` when the leading `---` does not open a front-matter block
    fn parse_yaml(content: &str) -> Option<(Self, &str)> {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        // No closing ---
        let end_pos = rest.find("\n---")?;

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Some((FrontMatter::default(), remaining));
        }

        // A `---` thematic break followed by prose is not front-matter
        if !has_yaml_structure(yaml_content) {
            return None;
        }

        let fm = match serde_yaml::from_str::<Value>(yaml_content) {
            Ok(Value::Mapping(map)) => Self::from_mapping(&map),
            Ok(other) => {
                tracing::warn!(
                    "Front-matter is not a key/value block ({:?}), ignoring it",
                    other
                );
                FrontMatter::default()
            }
            Err(e) => {
                tracing::warn!("Failed to parse YAML front-matter, ignoring it: {}", e);
                FrontMatter::default()
            }
        };
        Some((fm, remaining))
    }

    /// `None` when the leading `;;;` is never closed
    fn parse_json(content: &str) -> Option<(Self, &str)> {
        let rest = &content[3..];
        let end_pos = rest.find(";;;")?;

        let json_content = rest[..end_pos].trim();
        let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

        // `;;;` blocks may hold bare `"key": value` pairs without braces
        let json_content = if json_content.starts_with('{') {
            json_content.to_string()
        } else {
            format!("{{{}}}", json_content)
        };

        let parsed = serde_json::from_str::<serde_json::Value>(&json_content)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_yaml::to_value(json).map_err(|e| e.to_string()));

        let fm = match parsed {
            Ok(Value::Mapping(map)) => Self::from_mapping(&map),
            Ok(_) => {
                tracing::warn!("JSON front-matter is not an object, ignoring it");
                FrontMatter::default()
            }
            Err(e) => {
                tracing::warn!("Failed to parse JSON front-matter, ignoring it: {}", e);
                FrontMatter::default()
            }
        };
        Some((fm, remaining))
    }

    fn from_mapping(map: &serde_yaml::Mapping) -> Self {
        let fields = map
            .iter()
            .map(|(k, v)| (value_to_string(k), value_to_string(v)))
            .collect();
        Self { fields }
    }

    /// Look up a field by name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    /// Parse the date field, if present and in a recognised format
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date().and_then(parse_date_string)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the front-matter, yielding every field in source order
    pub fn into_fields(self) -> IndexMap<String, String> {
        self.fields
    }
}

/// Check that a block has at least one `key: value` line
fn has_yaml_structure(yaml_content: &str) -> bool {
    yaml_content.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let before_colon = &trimmed[..colon_pos];
        let is_valid_key = !before_colon.is_empty()
            && before_colon
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(before_colon, "http" | "https" | "ftp");
        if !is_valid_key {
            return false;
        }
        let after_colon = &trimmed[colon_pos + 1..];
        after_colon.is_empty() || after_colon.starts_with(' ')
    })
}

/// Flatten a YAML value into the string form stored in the metadata map
fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Mapping(_) => match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Cannot flatten nested front-matter mapping, using \"\": {}", e);
                String::new()
            }
        },
        Value::Tagged(tagged) => value_to_string(&tagged.value),
    }
}

/// Parse a date string in various formats
///
/// Zoned inputs are normalised to UTC so that posts compare on one timeline.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_utc());
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}
