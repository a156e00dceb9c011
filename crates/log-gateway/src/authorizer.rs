// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ApiError;

/// Capability of the identity/role collaborator: whether a tenant holds the
/// delegate privilege required for cross-tenant submission.
#[async_trait]
pub trait DelegateVerifier {
    async fn is_delegate(&self, tenant_id: &str) -> bool;
}

/// Delegate lookup backed by the configured tenant set.
pub struct ConfigDelegateVerifier {
    delegate_tenants: HashSet<String>,
}

impl ConfigDelegateVerifier {
    pub fn new(delegate_tenants: HashSet<String>) -> Self {
        ConfigDelegateVerifier { delegate_tenants }
    }
}

#[async_trait]
impl DelegateVerifier for ConfigDelegateVerifier {
    async fn is_delegate(&self, tenant_id: &str) -> bool {
        self.delegate_tenants.contains(tenant_id)
    }
}

/// Decides which tenant a request may submit logs under.
pub struct TenantAuthorizer {
    delegate_verifier: Arc<dyn DelegateVerifier + Send + Sync>,
}

impl TenantAuthorizer {
    pub fn new(delegate_verifier: Arc<dyn DelegateVerifier + Send + Sync>) -> Self {
        TenantAuthorizer { delegate_verifier }
    }

    /// Resolves the effective tenant for a submission. Without a cross-tenant
    /// id the authenticated tenant is always permitted; with one, the
    /// authenticated tenant must hold the delegate privilege.
    pub async fn authorize(
        &self,
        tenant_id: &str,
        cross_tenant_id: Option<&str>,
    ) -> Result<String, ApiError> {
        match cross_tenant_id {
            None => Ok(tenant_id.to_string()),
            Some(cross_tenant_id) => {
                if self.delegate_verifier.is_delegate(tenant_id).await {
                    debug!("Tenant {tenant_id} submits logs on behalf of {cross_tenant_id}");
                    Ok(cross_tenant_id.to_string())
                } else {
                    Err(ApiError::Forbidden(tenant_id.to_string()))
                }
            }
        }
    }
}
