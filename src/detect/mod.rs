//! Detection gateway: batched license/copyright classification of text blobs.
//!
//! The policy engines talk to a [`Detector`] trait object so that the
//! production scanner (an external process) can be swapped for a test
//! double returning fixed expressions.

pub mod scancode;

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

pub use scancode::ScancodeDetector;

/// A named text blob submitted for detection.
#[derive(Debug, Clone)]
pub struct Blob {
    /// Stable name used to key the detection result.
    pub name: String,
    /// The text to classify.
    pub text: String,
}

impl Blob {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Errors from the detection gateway.
///
/// All of these are fatal to the run: a detection failure must never be
/// treated as "no license detected".
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("scanner I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("blob name is not filesystem-safe: {0}")]
    InvalidBlobName(String),

    #[error("scanner process failed ({status}): {stderr}")]
    ProcessFailed { status: String, stderr: String },

    #[error("malformed scanner output: {0}")]
    MalformedOutput(String),
}

/// Batched detection of licenses and copyright holders.
///
/// Each method makes at most one external invocation regardless of the
/// number of blobs. Blobs absent from the result map had no detection.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Detected SPDX license expression per blob name.
    async fn detect_licenses(
        &self,
        blobs: &[Blob],
    ) -> Result<HashMap<String, String>, DetectError>;

    /// Detected copyright holder strings per blob name.
    async fn detect_copyrights(
        &self,
        blobs: &[Blob],
    ) -> Result<HashMap<String, Vec<String>>, DetectError>;
}
