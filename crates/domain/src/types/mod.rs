//! Wire types for the manifest exception processing API
//!
//! Everything here mirrors the server's JSON contract (camelCase fields) and
//! round-trips losslessly; the client passes these through without
//! interpreting them.

pub mod batch;
pub mod manifest;

pub use batch::{
    BatchMetadata, BatchRequest, BatchStatus, ErrorBody, Output, OutputMetadata, TokenResponse,
};
pub use manifest::{ExceptionDetails, GeneralOutput, ManifestInfo, Shipment, Summary};
