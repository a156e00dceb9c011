// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

//! Log ingestion gateway: accepts structured log submissions over HTTP,
//! validates and wraps each record into a canonical envelope, and hands the
//! batch to Kafka for downstream processing.

pub mod authorizer;
pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod http_utils;
pub mod log_processor;
pub mod publisher;
pub mod validation;
