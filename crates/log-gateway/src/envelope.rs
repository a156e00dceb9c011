// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};

/// One untrusted record from a submission body.
///
/// Required fields are modeled as options so the validator can report which
/// one is missing; unknown top-level keys are silently ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogRecord {
    pub dimensions: Option<HashMap<String, String>>,
    pub message: Option<String>,
}

/// The top-level submission body: `{"logs": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogBatch {
    pub logs: Option<Vec<LogRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub region: String,
}

/// The canonical wrapped form of a log record, ready for transport.
/// Immutable once built; serialized to JSON before publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEnvelope {
    pub creation_time: i64,
    pub meta: EnvelopeMeta,
    pub dimensions: HashMap<String, String>,
    pub logs: String,
}

impl LogEnvelope {
    /// Wraps a validated record. Callers validate inputs first; the only
    /// non-deterministic field is `creation_time` (Unix seconds).
    pub fn new(
        tenant_id: &str,
        region: &str,
        dimensions: HashMap<String, String>,
        message: String,
    ) -> Self {
        LogEnvelope {
            creation_time: UNIX_EPOCH
                .elapsed()
                .map(|d| d.as_secs() as i64)
                .unwrap_or_default(),
            meta: EnvelopeMeta {
                tenant_id: tenant_id.to_string(),
                region: region.to_string(),
            },
            dimensions,
            logs: message,
        }
    }
}
