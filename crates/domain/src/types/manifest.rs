//! Manifest extraction types
//!
//! Contents of the `general` output payload: header counts from the manifest
//! document, the shipment line items, and the exception roll-up.

use serde::{Deserialize, Serialize};

use crate::constants::EXCEPTION_TYPE_OK;

/// Header fields extracted from the manifest document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestInfo {
    pub manifest_number: String,
    pub trip_number: String,
    pub trailer_number: String,
    pub expected_shipments: i64,
    pub expected_handling_units: i64,
    pub actual_shipments: i64,
    pub actual_handling_units: i64,
}

/// Piece counts behind a shipment exception, split by category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortage_pieces: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overage_pieces: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damaged_pieces: Option<i64>,
}

/// One shipment line item as read off the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub pro_number: String,
    pub expected_pieces: i64,
    pub actual_pieces: i64,
    pub weight: i64,
    pub description: String,
    pub exception_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_details: Option<ExceptionDetails>,
    pub markup_notations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handwritten_notes: Option<String>,
    pub highlight_color: String,
}

impl Shipment {
    /// Whether this line carries an exception notation.
    pub fn has_exception(&self) -> bool {
        self.exception_type != EXCEPTION_TYPE_OK
    }
}

/// Document-level exception totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_overages: i64,
    pub total_shortages: i64,
    pub total_damages: i64,
    pub total_overage_pieces: i64,
    pub total_shortage_pieces: i64,
    pub total_damaged_pieces: i64,
    #[serde(rename = "hasOSDNotation")]
    pub has_osd_notation: bool,
}

/// Full extraction payload for one manifest document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneralOutput {
    pub manifest_info: ManifestInfo,
    pub shipments: Vec<Shipment>,
    pub summary: Summary,
}
