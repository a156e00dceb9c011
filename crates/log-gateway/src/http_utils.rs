// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::{
    header,
    http::{self, HeaderMap},
    Response,
};
use serde_json::json;
use tracing::{debug, error};

use crate::error::ApiError;

/// Unified body type for requests and responses: incoming hyper bodies and
/// fixed buffers are both boxed into it.
pub type Body = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

pub fn full_body(data: impl Into<Bytes>) -> Body {
    Full::new(data.into()).map_err(|never| match never {}).boxed()
}

pub fn empty_body() -> Body {
    Empty::new().map_err(|never| match never {}).boxed()
}

/// Does two things:
/// 1. Logs the error.
/// 2. Returns the error in the body of a JSON response with its status code,
///    attaching a Retry-After header when the error carries a retry hint.
///
/// Response body format:
/// {
///     "message": message
/// }
pub fn log_and_create_api_error_response(error: &ApiError) -> http::Result<Response<Body>> {
    error!("{error}");
    let body = json!({ "message": error.to_string() }).to_string();
    let mut builder = Response::builder().status(error.status());
    if let Some(retry_after_secs) = error.retry_after_secs() {
        builder = builder.header(header::RETRY_AFTER, retry_after_secs.to_string());
    }
    builder.body(full_body(body))
}

/// Takes a request's header map, and verifies that the "content-length"
/// and/or "Transfer-Encoding" header is present, valid, and less than the
/// given max_content_length.
///
/// Bodies sent with Transfer-Encoding are accepted here and re-checked
/// against the limit once read.
pub fn verify_request_content_length(
    header_map: &HeaderMap,
    max_content_length: usize,
) -> Result<(), ApiError> {
    let content_length_header = match header_map.get(header::CONTENT_LENGTH) {
        Some(res) => res,
        None => {
            if let Some(transfer_encoding_header) = header_map.get(header::TRANSFER_ENCODING) {
                debug!(
                    "Transfer-Encoding header is present: {:?}",
                    transfer_encoding_header
                );
                return Ok(());
            }
            return Err(ApiError::LengthRequired);
        }
    };
    let content_length = content_length_header
        .to_str()
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .ok_or_else(|| ApiError::BadRequest("invalid Content-Length header".to_string()))?;
    if content_length > max_content_length {
        return Err(ApiError::PayloadTooLarge(max_content_length));
    }
    Ok(())
}
