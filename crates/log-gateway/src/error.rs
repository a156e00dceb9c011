// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

use hyper::StatusCode;

/// Caller-visible errors raised while ingesting a log submission.
///
/// Every variant is terminal for the request; validation and authorization
/// failures are deterministic, publish failures carry a retry hint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing X-Tenant-Id header")]
    Unauthorized,

    #[error("project {0} cannot POST cross tenant logs")]
    Forbidden(String),

    #[error("content type must be application/json")]
    UnsupportedMediaType,

    #[error("{0}")]
    BadRequest(String),

    #[error("missing Content-Length and Transfer-Encoding header")]
    LengthRequired,

    #[error("request body exceeds the maximum payload size of {0} bytes")]
    PayloadTooLarge(usize),

    #[error("unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("service unavailable, retry in {retry_after_secs} seconds")]
    ServiceUnavailable { retry_after_secs: u64 },
}

impl ApiError {
    pub fn missing_field(field: &str) -> Self {
        ApiError::UnprocessableEntity(format!("{field} not found"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::LengthRequired => StatusCode::LENGTH_REQUIRED,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Retry hint for transient failures, surfaced as a Retry-After header.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            ApiError::ServiceUnavailable { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ApiError::Forbidden("t1".to_string());
        assert_eq!(error.to_string(), "project t1 cannot POST cross tenant logs");

        let error = ApiError::missing_field("dimensions");
        assert_eq!(error.to_string(), "unprocessable entity: dimensions not found");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Forbidden("t1".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::UnsupportedMediaType.status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ApiError::PayloadTooLarge(1024).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::UnprocessableEntity("logs not found".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::ServiceUnavailable {
                retry_after_secs: 60
            }
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_retry_after_only_on_service_unavailable() {
        let error = ApiError::ServiceUnavailable {
            retry_after_secs: 60,
        };
        assert_eq!(error.retry_after_secs(), Some(60));
        assert_eq!(ApiError::Unauthorized.retry_after_secs(), None);
        assert_eq!(ApiError::LengthRequired.retry_after_secs(), None);
    }
}
