//! ScanCode Toolkit detector.
//!
//! Stages all blobs into a run-scoped temp directory, shells out to the
//! `scancode` CLI once per batch, and parses its JSON output. The staging
//! directory is removed when the `TempDir` drops, on success and failure
//! alike.

use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use crate::config::DetectorConfig;

use super::{Blob, DetectError, Detector};

/// Blob names double as staged file names, so they must stay inside the
/// staging directory.
static SAFE_BLOB_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex"));

/// Which scanner mode to run.
#[derive(Debug, Clone, Copy)]
enum ScanMode {
    License,
    Copyright,
}

impl ScanMode {
    fn flag(self) -> &'static str {
        match self {
            ScanMode::License => "--license",
            ScanMode::Copyright => "--copyright",
        }
    }
}

/// Detector backed by the ScanCode toolkit CLI.
pub struct ScancodeDetector {
    config: DetectorConfig,
}

impl ScancodeDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Run one batched scan and return the parsed per-file JSON records,
    /// keyed by blob name.
    async fn scan(
        &self,
        blobs: &[Blob],
        mode: ScanMode,
    ) -> Result<HashMap<String, serde_json::Value>, DetectError> {
        if blobs.is_empty() {
            return Ok(HashMap::new());
        }

        let staging = tempfile::tempdir()?;
        let input_dir = staging.path().join("input");
        std::fs::create_dir(&input_dir)?;

        let mut file_map: HashMap<String, String> = HashMap::new();
        for blob in blobs {
            if !SAFE_BLOB_NAME.is_match(&blob.name) {
                return Err(DetectError::InvalidBlobName(blob.name.clone()));
            }
            let file_name = format!("{}.txt", blob.name);
            std::fs::write(input_dir.join(&file_name), &blob.text)?;
            file_map.insert(file_name, blob.name.clone());
        }

        let results_path = staging.path().join("results.json");
        let output = tokio::process::Command::new(&self.config.command)
            .arg(mode.flag())
            .arg("--strip-root")
            .arg("--quiet")
            .arg("--timeout")
            .arg(self.config.timeout_secs.to_string())
            .arg("--json-pp")
            .arg(&results_path)
            .arg(&input_dir)
            .output()
            .await?;

        if !output.status.success() {
            return Err(DetectError::ProcessFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let raw = std::fs::read_to_string(&results_path)?;
        let parsed: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| DetectError::MalformedOutput(e.to_string()))?;

        let files = parsed
            .get("files")
            .and_then(|f| f.as_array())
            .ok_or_else(|| DetectError::MalformedOutput("missing 'files' array".into()))?;

        let mut records = HashMap::new();
        for file in files {
            if file.get("type").and_then(|t| t.as_str()) != Some("file") {
                continue;
            }
            let Some(path) = file.get("path").and_then(|p| p.as_str()) else {
                continue;
            };
            let Some(file_name) = Path::new(path).file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(blob_name) = file_map.get(file_name) {
                records.insert(blob_name.clone(), file.clone());
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl Detector for ScancodeDetector {
    async fn detect_licenses(
        &self,
        blobs: &[Blob],
    ) -> Result<HashMap<String, String>, DetectError> {
        let records = self.scan(blobs, ScanMode::License).await?;

        let mut results = HashMap::new();
        for (name, record) in records {
            if let Some(expr) = first_license_expression(&record) {
                results.insert(name, expr);
            }
        }
        Ok(results)
    }

    async fn detect_copyrights(
        &self,
        blobs: &[Blob],
    ) -> Result<HashMap<String, Vec<String>>, DetectError> {
        let records = self.scan(blobs, ScanMode::Copyright).await?;

        let mut results = HashMap::new();
        for (name, record) in records {
            let holders = holder_strings(&record);
            if !holders.is_empty() {
                results.insert(name, holders);
            }
        }
        Ok(results)
    }
}

/// SPDX expression of the first license detection in a file record, if any.
fn first_license_expression(record: &serde_json::Value) -> Option<String> {
    let expr = record
        .get("license_detections")?
        .as_array()?
        .first()?
        .get("license_expression_spdx")?
        .as_str()?;
    if expr.is_empty() {
        None
    } else {
        Some(expr.to_string())
    }
}

/// Copyright holders of a file record; falls back to the full copyright
/// statements for scanner versions that omit the holders table.
fn holder_strings(record: &serde_json::Value) -> Vec<String> {
    let from_key = |key: &str, field: &str| -> Vec<String> {
        record
            .get(key)
            .and_then(|v| v.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| e.get(field).and_then(|h| h.as_str()))
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    let holders = from_key("holders", "holder");
    if !holders.is_empty() {
        return holders;
    }
    from_key("copyrights", "copyright")
}
