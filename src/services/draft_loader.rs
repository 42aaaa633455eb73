//! Quote draft loading from YAML or JSON files.

use std::fs;
use std::path::Path;

use crate::domain::AppError;
use crate::domain::quote::QuoteFormState;

/// Load a quote draft. The format is chosen by file extension.
pub fn load_draft(path: &Path) -> Result<QuoteFormState, AppError> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let content = fs::read_to_string(path)?;

    match extension {
        "yml" | "yaml" => serde_yaml::from_str(&content).map_err(|e| AppError::DraftParse {
            path: path.display().to_string(),
            details: e.to_string(),
        }),
        "json" => serde_json::from_str(&content).map_err(|e| AppError::DraftParse {
            path: path.display().to_string(),
            details: e.to_string(),
        }),
        other => Err(AppError::UnsupportedDraftFormat(other.to_string())),
    }
}
