//! Protocol constants
//!
//! Centralized location for endpoint paths, wire literals, and default
//! timings shared by the client and its callers.

// API endpoints (relative to the configured base URL)
pub const TOKEN_ENDPOINT: &str = "/api/v1/token";
pub const BATCHES_ENDPOINT: &str = "/api/v1/batches";
pub const HEALTH_ENDPOINT: &str = "/api/v1/health";

// Fixed fields of every submission
pub const BATCH_TYPE: &str = "manifestExceptions";
pub const DOCUMENT_TYPE: &str = "manifestException";
pub const PROCESSING_TYPE: &str = "single_pass";
pub const FILE_TYPE_PDF: &str = "pdf";

// Execution modes
pub const EXECUTION_SYNC: &str = "sync";
pub const EXECUTION_ASYNC: &str = "async";

// Terminal batch states; anything else keeps the poll loop running
pub const STATE_FINALIZED: &str = "finalized";
pub const STATE_FAILED: &str = "failed";

// Shipments whose exception type equals this value carry no discrepancy
pub const EXCEPTION_TYPE_OK: &str = "ok";

// Default timings (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SYNC_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 300;
