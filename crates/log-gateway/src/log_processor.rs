// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use http_body_util::BodyExt;
use hyper::{header, http, Request, Response, StatusCode};
use tracing::{debug, error};
use url::form_urlencoded;

use crate::authorizer::TenantAuthorizer;
use crate::config::GatewayConfig;
use crate::envelope::{LogBatch, LogEnvelope};
use crate::error::ApiError;
use crate::http_utils::{self, Body};
use crate::publisher::LogPublisher;
use crate::validation;

/// Header carrying the authenticated tenant id, set by the auth layer in
/// front of the gateway.
pub const TENANT_ID_HEADER: &str = "X-Tenant-Id";
/// Query parameter expressing cross-tenant intent; untrusted until authorized.
const CROSS_TENANT_QUERY_PARAM: &str = "tenant_id";

#[async_trait]
pub trait LogProcessor {
    /// Handles one log submission end to end: authorize, validate, wrap,
    /// publish, respond.
    async fn process_logs(
        &self,
        config: Arc<GatewayConfig>,
        req: Request<Body>,
    ) -> http::Result<Response<Body>>;
}

pub struct GatewayLogProcessor {
    pub authorizer: TenantAuthorizer,
    pub publisher: Arc<dyn LogPublisher + Send + Sync>,
}

#[async_trait]
impl LogProcessor for GatewayLogProcessor {
    async fn process_logs(
        &self,
        config: Arc<GatewayConfig>,
        req: Request<Body>,
    ) -> http::Result<Response<Body>> {
        debug!("Received logs to process");
        match self.ingest(config, req).await {
            Ok(count) => {
                debug!("Accepted submission of {count} log envelopes");
                Response::builder()
                    .status(StatusCode::NO_CONTENT)
                    .body(http_utils::empty_body())
            }
            Err(err) => http_utils::log_and_create_api_error_response(&err),
        }
    }
}

impl GatewayLogProcessor {
    /// The submission pipeline. Each step short-circuits the request; the
    /// first validation failure aborts the whole batch, so the broker never
    /// sees a partial submission.
    async fn ingest(
        &self,
        config: Arc<GatewayConfig>,
        req: Request<Body>,
    ) -> Result<usize, ApiError> {
        let (parts, body) = req.into_parts();

        require_json_content_type(&parts.headers)?;
        http_utils::verify_request_content_length(&parts.headers, config.max_content_length)?;

        let tenant_id = parts
            .headers
            .get(TENANT_ID_HEADER)
            .and_then(|val| val.to_str().ok())
            .filter(|val| !val.is_empty())
            .map(str::to_string)
            .ok_or(ApiError::Unauthorized)?;
        let cross_tenant_id = cross_tenant_param(parts.uri.query());

        // Authorized before the body is touched, so an unauthorized
        // cross-tenant request never learns anything about record shape.
        let effective_tenant = self
            .authorizer
            .authorize(&tenant_id, cross_tenant_id.as_deref())
            .await?;

        let body = body
            .collect()
            .await
            .map_err(|err| ApiError::BadRequest(format!("error reading request body: {err}")))?
            .to_bytes();
        // Covers Transfer-Encoding bodies that bypass the header check.
        validation::validate_payload_size(&body, config.max_content_length)?;

        let batch: LogBatch = serde_json::from_slice(&body)
            .map_err(|err| ApiError::BadRequest(format!("malformed JSON body: {err}")))?;

        let records = validation::require_logs(&batch)?;
        let mut envelopes = Vec::with_capacity(records.len());
        for record in records {
            let dimensions = validation::require_dimensions(record)?;
            let message = validation::require_message(record)?;
            let envelope = LogEnvelope::new(
                &effective_tenant,
                &config.region,
                dimensions.clone(),
                message.to_string(),
            );
            let serialized = serde_json::to_vec(&envelope).map_err(|err| {
                ApiError::UnprocessableEntity(format!("log envelope could not be serialized: {err}"))
            })?;
            validation::validate_envelope_size(&serialized, config.max_envelope_size)?;
            envelopes.push(envelope);
        }

        match self.publisher.publish(&envelopes).await {
            Ok(()) => Ok(envelopes.len()),
            Err(err) => {
                // Operator-visible cause; the caller only gets the retry hint.
                error!("Error publishing log envelopes: {err}");
                Err(ApiError::ServiceUnavailable {
                    retry_after_secs: 60,
                })
            }
        }
    }
}

fn require_json_content_type(headers: &hyper::HeaderMap) -> Result<(), ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|val| val.to_str().ok())
        .unwrap_or_default();
    if content_type == "application/json" || content_type.starts_with("application/json;") {
        Ok(())
    } else {
        Err(ApiError::UnsupportedMediaType)
    }
}

fn cross_tenant_param(query: Option<&str>) -> Option<String> {
    let query = query?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == CROSS_TENANT_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
