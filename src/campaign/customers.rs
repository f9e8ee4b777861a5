//! Extraction of customer rows from the upload response.
//!
//! The backend returns spreadsheet rows as JSON objects keyed by column
//! header. Cells decoded from a spreadsheet are frequently numbers, so phone
//! values are accepted as strings or numbers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::campaign::types::{CustomerFile, CustomerRecord};
use crate::errors::UploadError;

/// Column names used to read a customer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFields {
    #[serde(default = "default_name_field")]
    pub name_field: String,
    #[serde(default = "default_phone_field")]
    pub phone_field: String,
}

fn default_name_field() -> String {
    "Ad".to_string()
}

fn default_phone_field() -> String {
    "Telefon".to_string()
}

impl Default for CustomerFields {
    fn default() -> Self {
        Self {
            name_field: default_name_field(),
            phone_field: default_phone_field(),
        }
    }
}

impl CustomerFile {
    /// Read a customer list from disk, guessing its MIME type from the extension.
    pub async fn load(path: &Path) -> Result<Self, UploadError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "customers".to_string());
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }
}

/// Parse the `customers` array out of an upload response body.
///
/// Order is preserved and duplicates are kept.
pub fn parse_customers(
    body: &Value,
    fields: &CustomerFields,
) -> Result<Vec<CustomerRecord>, UploadError> {
    let rows = body
        .get("customers")
        .and_then(Value::as_array)
        .ok_or(UploadError::MissingCustomers)?;

    rows.iter()
        .map(|row| {
            let object = row.as_object().ok_or(UploadError::MissingCustomers)?;
            Ok(CustomerRecord {
                name: object.get(&fields.name_field).and_then(cell_text),
                phone: object.get(&fields.phone_field).and_then(cell_text),
                fields: object.clone(),
            })
        })
        .collect()
}

/// Render a cell as text. Empty strings and nulls count as absent.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64()?;
                if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e18 {
                    Some(format!("{}", f as i64))
                } else {
                    Some(n.to_string())
                }
            }
        }
        _ => None,
    }
}
