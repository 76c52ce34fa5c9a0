// Dashboard file adapter - JSON documents on disk
use crate::domain::dashboard::Document;
use crate::infrastructure::error::DashboardFileError;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const JSON_EXTENSION: &str = "json";

pub fn load_dashboard(path: &Path) -> Result<Document, DashboardFileError> {
    let raw = fs::read_to_string(path).map_err(|source| DashboardFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document = serde_json::from_str(&raw).map_err(|source| DashboardFileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Loaded dashboard from {}", path.display());
    Ok(document)
}

/// Write `document` as 2-space indented JSON.
pub fn save_dashboard(path: &Path, document: &Document) -> Result<(), DashboardFileError> {
    let mut body =
        serde_json::to_string_pretty(document).map_err(|source| DashboardFileError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    body.push('\n');

    fs::write(path, body).map_err(|source| DashboardFileError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Wrote dashboard to {}", path.display());
    Ok(())
}

/// `cpu.json` -> `cpu{suffix}.json`. Paths without a `.json` extension get
/// the suffix and extension appended, so the input is never overwritten.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let has_json_extension = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(JSON_EXTENSION));

    let base = if has_json_extension {
        input.file_stem()
    } else {
        input.file_name()
    };

    let mut name = base.map(OsString::from).unwrap_or_default();
    name.push(suffix);
    name.push(".");
    name.push(JSON_EXTENSION);

    input.with_file_name(name)
}
