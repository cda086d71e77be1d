//! Tenant management operations.
//!
//! This module provides the TenantsClient for creating, listing and
//! updating tenants.

use crate::body::Body;
use crate::client::Client;
use crate::context::Context;
use crate::error::Result;
use crate::response::PagedResponse;
use crate::types::{Tenant, TenantCreateRequest, TenantUpdateRequest};

/// Client for tenant operations.
///
/// Access via `client.tenants()`.
pub struct TenantsClient {
    client: Client,
}

impl TenantsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a new tenant.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use zerogate::{Client, Context, types::TenantCreateRequest};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new("key_xxxxx", "secret_xxxxx")?;
    ///
    ///     let tenant = client.tenants().create(&Context::background(), &TenantCreateRequest {
    ///         name: "acme".to_string(),
    ///         description: "Acme Corp".to_string(),
    ///     }).await?;
    ///     println!("Tenant: {} ({})", tenant.name, tenant.base.id);
    ///     Ok(())
    /// }
    /// ```
    pub async fn create(&self, ctx: &Context, request: &TenantCreateRequest) -> Result<Tenant> {
        self.client
            .post(ctx, "/tenants", None, Body::json(request)?, None)
            .await?
            .data()
    }

    /// List all tenants.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use zerogate::{Client, Context};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new("key_xxxxx", "secret_xxxxx")?;
    ///
    ///     let page = client.tenants().list(&Context::background()).await?;
    ///     println!("{} of {} tenants", page.data.len(), page.total);
    ///     Ok(())
    /// }
    /// ```
    pub async fn list(&self, ctx: &Context) -> Result<PagedResponse<Tenant>> {
        self.client
            .get(ctx, "/tenants", None, None)
            .await?
            .paged()
    }

    /// Update a tenant.
    ///
    /// # Arguments
    ///
    /// * `tenant_id` - The tenant's identifier
    /// * `request` - New field values
    pub async fn update(
        &self,
        ctx: &Context,
        tenant_id: &str,
        request: &TenantUpdateRequest,
    ) -> Result<Tenant> {
        self.client
            .put(
                ctx,
                &format!("/tenants/{}", tenant_id),
                None,
                Body::json(request)?,
                None,
            )
            .await?
            .data()
    }
}
