// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::service::service_fn;
use hyper::{http, Method, Response, StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::config::GatewayConfig;
use crate::http_utils::{self, Body};
use crate::log_processor::LogProcessor;

const LOGS_ENDPOINT_PATH: &str = "/logs";
const HEALTHCHECK_ENDPOINT_PATH: &str = "/healthcheck";

/// HTTP front of the ingestion pipeline. Holds the shared configuration and
/// the processor every request is dispatched to.
pub struct LogGateway {
    pub config: Arc<GatewayConfig>,
    pub log_processor: Arc<dyn LogProcessor + Send + Sync>,
}

impl LogGateway {
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let log_processor = self.log_processor.clone();
        let endpoint_config = self.config.clone();

        let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
            // called for each http request
            let log_processor = log_processor.clone();
            let endpoint_config = endpoint_config.clone();
            LogGateway::endpoint_handler(
                endpoint_config,
                req.map(|body| body.boxed()),
                log_processor,
            )
        });

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        debug!(
            "Log gateway started: listening on port {}",
            self.config.http_port
        );

        Self::serve_tcp(listener, service).await
    }

    async fn serve_tcp<S>(
        listener: tokio::net::TcpListener,
        service: S,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        S: hyper::service::Service<hyper::Request<hyper::body::Incoming>, Response = Response<Body>>
            + Clone
            + Send
            + 'static,
        S::Future: Send,
        S::Error: std::error::Error + Send + Sync + 'static,
    {
        let server = hyper::server::conn::http1::Builder::new();
        let mut joinset = tokio::task::JoinSet::new();

        loop {
            let conn = tokio::select! {
                con_res = listener.accept() => match con_res {
                    Err(e)
                        if matches!(
                            e.kind(),
                            io::ErrorKind::ConnectionAborted
                                | io::ErrorKind::ConnectionReset
                                | io::ErrorKind::ConnectionRefused
                        ) =>
                    {
                        continue;
                    }
                    Err(e) => {
                        error!("Server error: {e}");
                        return Err(e.into());
                    }
                    Ok((conn, _)) => conn,
                },
                finished = async {
                    match joinset.join_next().await {
                        Some(finished) => finished,
                        None => std::future::pending().await,
                    }
                } => match finished {
                    Err(e) if e.is_panic() => {
                        // Don't kill server on panic - log and continue
                        error!("Connection handler panicked: {:?}", e);
                        continue;
                    },
                    Ok(()) | Err(_) => continue,
                },
            };
            let conn = hyper_util::rt::TokioIo::new(conn);
            let server = server.clone();
            let service = service.clone();
            joinset.spawn(async move {
                if let Err(e) = server.serve_connection(conn, service).await {
                    error!("Connection error: {e}");
                }
            });
        }
    }

    async fn endpoint_handler(
        config: Arc<GatewayConfig>,
        req: hyper::Request<Body>,
        log_processor: Arc<dyn LogProcessor + Send + Sync>,
    ) -> http::Result<Response<Body>> {
        match (req.method(), req.uri().path()) {
            (&Method::POST, LOGS_ENDPOINT_PATH) => log_processor.process_logs(config, req).await,
            (&Method::GET, HEALTHCHECK_ENDPOINT_PATH) => Self::healthcheck_handler(&config),
            _ => {
                let mut not_found = Response::new(http_utils::empty_body());
                *not_found.status_mut() = StatusCode::NOT_FOUND;
                Ok(not_found)
            }
        }
    }

    fn healthcheck_handler(config: &GatewayConfig) -> http::Result<Response<Body>> {
        let response_json = json!(
            {
                "endpoints": [
                    LOGS_ENDPOINT_PATH,
                    HEALTHCHECK_ENDPOINT_PATH
                ],
                "config": {
                    "http_port": config.http_port,
                    "kafka_topic": config.kafka_topic,
                    "region": config.region
                }
            }
        );
        Response::builder()
            .status(200)
            .body(http_utils::full_body(response_json.to_string()))
    }
}
