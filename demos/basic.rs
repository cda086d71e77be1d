//! Basic usage example for the ZeroGate SDK.
//!
//! This example demonstrates:
//! - Creating a client from the environment
//! - Creating a tenant
//! - Listing tenants
//! - Updating a tenant
//!
//! Run with:
//! ```bash
//! ZEROGATE_API_KEY=key_xxx ZEROGATE_API_SECRET=xxx cargo run --example basic
//! ```

use std::time::Duration;
use zerogate::{Client, Context, TenantCreateRequest, TenantUpdateRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads ZEROGATE_API_KEY, ZEROGATE_API_SECRET and optionally
    // ZEROGATE_BASE_URL / ZEROGATE_DEBUG.
    let client = Client::from_env()?;
    println!("Using {}", client.base_url());

    let ctx = Context::background().with_timeout(Duration::from_secs(30));

    println!("\nCreating a tenant...");
    let tenant = client
        .tenants()
        .create(
            &ctx,
            &TenantCreateRequest {
                name: "example-tenant".to_string(),
                description: "created by the basic example".to_string(),
            },
        )
        .await?;
    println!("Created tenant:");
    println!("  ID:           {}", tenant.base.id);
    println!("  Name:         {}", tenant.name);
    println!("  Organization: {}", tenant.organization);

    println!("\nListing tenants...");
    let page = client.tenants().list(&ctx).await?;
    println!("Found {} tenants:", page.total);
    for t in &page.data {
        println!("  - {} ({})", t.name, t.base.id);
    }

    println!("\nUpdating tenant...");
    let updated = client
        .tenants()
        .update(
            &ctx,
            &tenant.base.id,
            &TenantUpdateRequest {
                id: tenant.base.id.clone(),
                name: "example-tenant-renamed".to_string(),
                description: tenant.description.clone(),
            },
        )
        .await?;
    println!("Renamed to {}", updated.name);

    println!("\nDone!");
    Ok(())
}
