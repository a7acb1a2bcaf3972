//! Batch protocol types
//!
//! Request and response shapes for the token, submission, and status
//! endpoints.

use serde::{Deserialize, Serialize};

use crate::constants::{STATE_FAILED, STATE_FINALIZED};

/// Successful response from the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// One processing job as posted to the batches endpoint.
///
/// `batch_identifier` is present only for asynchronous submissions; the
/// remaining tag fields are fixed per [`crate::constants`]. `document` is the
/// base64-encoded PDF payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_identifier: Option<String>,
    pub batch_type: String,
    pub document_type: String,
    pub processing_type: String,
    pub execution_type: String,
    pub identifier: String,
    pub file_type: String,
    pub document: String,
}

/// Server-side description of a submitted batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchMetadata {
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    pub state: String,
    pub result: String,
    /// Timestamps are carried as opaque strings so round-trips never
    /// reformat them.
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_updated_at: Option<String>,
    pub document_count: i64,
    pub processing_mode: String,
    pub batch_type: String,
}

impl BatchMetadata {
    /// Whether the batch has reached a state with no further transitions.
    ///
    /// Unknown state values are non-terminal so that new server states keep
    /// the poll loop running instead of ending it early.
    pub fn is_terminal(&self) -> bool {
        self.state == STATE_FINALIZED || self.state == STATE_FAILED
    }
}

/// Metadata attached to a completed output payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutputMetadata {
    pub document_type: String,
    pub state: String,
    pub result: String,
    pub processed_at: String,
}

/// Extraction results for a completed batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub metadata: OutputMetadata,
    pub general: super::manifest::GeneralOutput,
}

/// Response envelope for submission and status fetches.
///
/// `output` is populated once processing completes; an accepted-but-pending
/// asynchronous batch carries metadata only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatus {
    pub metadata: BatchMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,
}

/// Structured error body returned with non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
}
