//! Normalisation of loosely typed store rows into entity fields
//!
//! Rows may have been written by older clients or by hand: list columns can
//! be missing or malformed and flags can be NULL. Everything is coerced into
//! the entity shapes here, before any visibility logic sees it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

pub(crate) fn id_column<T: From<Uuid>>(row: &SqliteRow, column: &str) -> Result<T> {
    let raw: String = row.try_get(column)?;
    let uuid = Uuid::parse_str(&raw).with_context(|| format!("Malformed {}: {}", column, raw))?;
    Ok(T::from(uuid))
}

pub(crate) fn optional_id_column<T: From<Uuid>>(row: &SqliteRow, column: &str) -> Result<Option<T>> {
    let raw: Option<String> = row.try_get(column)?;
    match raw.filter(|r| !r.is_empty()) {
        Some(raw) => {
            let uuid =
                Uuid::parse_str(&raw).with_context(|| format!("Malformed {}: {}", column, raw))?;
            Ok(Some(T::from(uuid)))
        }
        None => Ok(None),
    }
}

pub(crate) fn text(row: &SqliteRow, column: &str) -> Result<String> {
    let value: Option<String> = row.try_get(column)?;
    Ok(value.unwrap_or_default())
}

pub(crate) fn optional_text(row: &SqliteRow, column: &str) -> Result<Option<String>> {
    let value: Option<String> = row.try_get(column)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

/// NULL flags read as private
pub(crate) fn flag(row: &SqliteRow, column: &str) -> Result<bool> {
    let value: Option<bool> = row.try_get(column)?;
    Ok(value.unwrap_or(false))
}

pub(crate) fn timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    let raw: Option<String> = row.try_get(column)?;
    Ok(raw
        .and_then(|r| DateTime::parse_from_rfc3339(&r).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default())
}

/// Decode a JSON column, falling back to the default for NULL or malformed values
pub(crate) fn json_column<T: DeserializeOwned + Default>(row: &SqliteRow, column: &str) -> Result<T> {
    let raw: Option<String> = row.try_get(column)?;
    Ok(decode_json(raw.as_deref(), column))
}

pub(crate) fn decode_json<T: DeserializeOwned + Default>(raw: Option<&str>, column: &str) -> T {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => T::default(),
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed {} value: {}", column, e);
            T::default()
        }),
    }
}

/// String lists tolerate non-string elements by dropping them
pub(crate) fn string_list(row: &SqliteRow, column: &str) -> Result<Vec<String>> {
    let values: Vec<serde_json::Value> = json_column(row, column)?;
    Ok(values
        .into_iter()
        .filter_map(|v| match v {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("Failed to encode JSON column")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_json_is_lenient() {
        let list: Vec<String> = decode_json(Some(r#"["a", "b"]"#), "taverns");
        assert_eq!(list, vec!["a", "b"]);

        let malformed: Vec<String> = decode_json(Some("{not json"), "taverns");
        assert!(malformed.is_empty());

        let missing: Vec<String> = decode_json(None, "taverns");
        assert!(missing.is_empty());

        let blank: Vec<String> = decode_json(Some("  "), "taverns");
        assert!(blank.is_empty());
    }
}
