//! Pool files: lenient JSON and CSV parsers.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::PoolItem;
use crate::core::skill::{clamp_proficiency, skill_id_from_name};
use crate::error::{Result, SgError};

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?)(\d+)").expect("valid regex"));

/// File formats accepted by `sg pool import`, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(SgError::InvalidInput(format!(
                "unsupported pool file '{}' (supported formats: .json, .csv)",
                path.display()
            ))),
        }
    }

    /// Source name recorded on aspirational skills imported this way.
    #[must_use]
    pub const fn source_label(&self) -> &'static str {
        match self {
            Self::Json => "JSON Import",
            Self::Csv => "CSV Import",
        }
    }

    pub fn parse(&self, text: &str) -> Result<Vec<PoolItem>> {
        match self {
            Self::Json => parse_pool_json(text),
            Self::Csv => parse_pool_csv(text),
        }
    }
}

/// Parse a JSON array of loosely-typed pool entries.
///
/// Ids are slugged from `id` or `name`, a missing name becomes
/// `Imported Skill N` (1-based), a missing category becomes `Imported`, and
/// proficiency may be a number or a string with leading digits, clamped to
/// the valid range.
pub fn parse_pool_json(text: &str) -> Result<Vec<PoolItem>> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(entries) = value else {
        return Err(SgError::InvalidInput(
            "pool JSON must contain an array of skills".to_string(),
        ));
    };

    Ok(entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let text_field = |key: &str| {
                entry
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };
            let name = text_field("name");
            let id_source = text_field("id")
                .or_else(|| name.clone())
                .unwrap_or_else(|| format!("imported-{index}"));
            PoolItem {
                id: Some(skill_id_from_name(&id_source)),
                name: name.unwrap_or_else(|| format!("Imported Skill {}", index + 1)),
                category: text_field("category").unwrap_or_else(|| "Imported".to_string()),
                proficiency: Some(json_proficiency(entry.get("proficiency"))),
                description: text_field("description"),
            }
        })
        .collect())
}

/// Parse a CSV pool file with a header row.
///
/// Columns are found by header: the first containing `name` (required),
/// `category`, `proficiency` or `level`, and `description`. Rows get the
/// same defaults as JSON entries.
pub fn parse_pool_csv(text: &str) -> Result<Vec<PoolItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(unreadable_csv)?
        .iter()
        .map(str::to_lowercase)
        .collect();
    let column = |needles: &[&str]| {
        headers
            .iter()
            .position(|header| needles.iter().any(|needle| header.contains(needle)))
    };
    let name_column = column(&["name"]);
    let category_column = column(&["category"]);
    let proficiency_column = column(&["proficiency", "level"]);
    let description_column = column(&["description"]);

    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(unreadable_csv)?;
    if records.is_empty() {
        return Err(SgError::InvalidInput(
            "CSV file must have a header row and at least one data row".to_string(),
        ));
    }
    let Some(name_column) = name_column else {
        return Err(SgError::InvalidInput(
            "CSV file must have a \"name\" column".to_string(),
        ));
    };

    Ok(records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let cell = |column: Option<usize>| {
                column
                    .and_then(|c| record.get(c))
                    .map(|value| value.replace('"', ""))
                    .filter(|value| !value.is_empty())
            };
            let name = cell(Some(name_column));
            let id_source = name.clone().unwrap_or_else(|| format!("imported-{index}"));
            PoolItem {
                id: Some(skill_id_from_name(&id_source)),
                name: name.unwrap_or_else(|| format!("Imported Skill {}", index + 1)),
                category: cell(category_column).unwrap_or_else(|| "Imported".to_string()),
                proficiency: Some(cell(proficiency_column).map_or(0, |v| leading_proficiency(&v))),
                description: cell(description_column),
            }
        })
        .collect())
}

fn unreadable_csv(err: csv::Error) -> SgError {
    SgError::InvalidInput(format!("unreadable CSV: {err}"))
}

fn json_proficiency(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v.is_finite() && v > 0.0 => clamp_proficiency(v.trunc().min(255.0) as u8),
            _ => 0,
        },
        Some(Value::String(s)) => leading_proficiency(s),
        _ => 0,
    }
}

/// Proficiency from the leading integer of `text` (`"4abc"` reads as 4).
/// Text without leading digits, and negative values, read as 0.
fn leading_proficiency(text: &str) -> u8 {
    let Some(captures) = LEADING_INTEGER.captures(text) else {
        return 0;
    };
    if &captures[1] == "-" {
        return 0;
    }
    let value = captures[2].parse::<u64>().unwrap_or(u64::MAX);
    clamp_proficiency(u8::try_from(value).unwrap_or(u8::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pool_json() {
        let items = parse_pool_json(
            r#"[
                {"name": "Machine Learning", "category": "AI", "proficiency": "4"},
                {"id": "My Tool", "proficiency": 42},
                {"category": "Misc", "proficiency": -3, "description": "??"}
            ]"#,
        )
        .unwrap();

        assert_eq!(items[0].id.as_deref(), Some("machine-learning"));
        assert_eq!(items[0].proficiency, Some(4));
        assert_eq!(items[1].id.as_deref(), Some("my-tool"));
        assert_eq!(items[1].name, "Imported Skill 2");
        assert_eq!(items[1].category, "Imported");
        assert_eq!(items[1].proficiency, Some(10));
        assert_eq!(items[2].id.as_deref(), Some("imported-2"));
        assert_eq!(items[2].proficiency, Some(0));
        assert_eq!(items[2].description.as_deref(), Some("??"));
    }

    #[test]
    fn test_parse_pool_json_rejects_non_array() {
        let err = parse_pool_json(r#"{"name": "x"}"#).unwrap_err();
        assert!(matches!(err, SgError::InvalidInput(_)));
        assert!(parse_pool_json("nope").is_err());
    }

    #[test]
    fn test_string_proficiency_reads_leading_digits() {
        assert_eq!(leading_proficiency("4abc"), 4);
        assert_eq!(leading_proficiency("  7 / 10"), 7);
        assert_eq!(leading_proficiency("4.9"), 4);
        assert_eq!(leading_proficiency("+3"), 3);
        assert_eq!(leading_proficiency("-3"), 0);
        assert_eq!(leading_proficiency("abc4"), 0);
        assert_eq!(leading_proficiency("99999999999999999999999"), 10);

        let items = parse_pool_json(r#"[{"name": "Go", "proficiency": "4abc"}]"#).unwrap();
        assert_eq!(items[0].proficiency, Some(4));
    }

    #[test]
    fn test_parse_pool_csv() {
        let items = parse_pool_csv(
            "Skill Name, Category ,Level,Description\n\
             Docker,DevOps,3,Containers\n\
             \n\
             \"Rust\",Programming,7 of 10,\n\
             ,Misc,-2,orphan\n",
        )
        .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id.as_deref(), Some("docker"));
        assert_eq!(items[0].category, "DevOps");
        assert_eq!(items[0].proficiency, Some(3));
        assert_eq!(items[0].description.as_deref(), Some("Containers"));

        assert_eq!(items[1].name, "Rust");
        assert_eq!(items[1].proficiency, Some(7));
        assert!(items[1].description.is_none());

        assert_eq!(items[2].id.as_deref(), Some("imported-2"));
        assert_eq!(items[2].name, "Imported Skill 3");
        assert_eq!(items[2].proficiency, Some(0));
    }

    #[test]
    fn test_parse_pool_csv_short_rows_use_defaults() {
        let items = parse_pool_csv("name,proficiency\nGraphQL\n").unwrap();
        assert_eq!(items[0].category, "Imported");
        assert_eq!(items[0].proficiency, Some(0));
    }

    #[test]
    fn test_parse_pool_csv_errors() {
        let header_only = parse_pool_csv("name,category\n").unwrap_err();
        assert!(header_only.to_string().contains("at least one data row"));

        let nameless = parse_pool_csv("title,category\nRust,Programming\n").unwrap_err();
        assert!(nameless.to_string().contains("\"name\" column"));
    }

    #[test]
    fn test_import_format_from_extension() {
        assert_eq!(ImportFormat::from_path(Path::new("a/skills.JSON")).unwrap(), ImportFormat::Json);
        assert_eq!(ImportFormat::from_path(Path::new("skills.csv")).unwrap(), ImportFormat::Csv);
        assert!(ImportFormat::from_path(Path::new("skills.xlsx")).is_err());
        assert!(ImportFormat::from_path(Path::new("skills")).is_err());
        assert_eq!(ImportFormat::Csv.source_label(), "CSV Import");
    }
}
