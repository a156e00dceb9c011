// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

//! Structural and size checks on submissions. All functions are pure; each
//! returns the typed error the request handler surfaces to the caller.

use std::collections::HashMap;

use crate::envelope::{LogBatch, LogRecord};
use crate::error::ApiError;

/// Raw request body limit, applied after the body has been read. The
/// Content-Length header is checked separately before the body is touched.
pub fn validate_payload_size(body: &[u8], max_bytes: usize) -> Result<(), ApiError> {
    if body.len() > max_bytes {
        return Err(ApiError::PayloadTooLarge(max_bytes));
    }
    Ok(())
}

pub fn require_logs(batch: &LogBatch) -> Result<&[LogRecord], ApiError> {
    batch
        .logs
        .as_deref()
        .ok_or_else(|| ApiError::missing_field("logs"))
}

pub fn require_dimensions(record: &LogRecord) -> Result<&HashMap<String, String>, ApiError> {
    record
        .dimensions
        .as_ref()
        .ok_or_else(|| ApiError::missing_field("dimensions"))
}

pub fn require_message(record: &LogRecord) -> Result<&str, ApiError> {
    record
        .message
        .as_deref()
        .ok_or_else(|| ApiError::missing_field("message"))
}

/// Per-envelope limit, enforced on the serialized form: JSON escaping and
/// UTF-8 expansion inflate sizes unpredictably relative to the raw fields.
pub fn validate_envelope_size(serialized: &[u8], max_bytes: usize) -> Result<(), ApiError> {
    if serialized.len() > max_bytes {
        return Err(ApiError::UnprocessableEntity(format!(
            "log envelope exceeds the maximum size of {max_bytes} bytes"
        )));
    }
    Ok(())
}
