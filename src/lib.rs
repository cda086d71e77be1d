//! # ZeroGate Rust SDK
//!
//! Rust client for the ZeroGate public API.
//!
//! Every request is authenticated with an API key and secret: the client
//! signs `method + path + nonce (+ body)` with HMAC-SHA512 and sends the
//! result in the `Authorization` header.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zerogate::{Client, Context, types::TenantCreateRequest};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("key_xxxxx", "secret_xxxxx")?;
//!     let ctx = Context::background().with_timeout(Duration::from_secs(10));
//!
//!     let tenant = client.tenants().create(&ctx, &TenantCreateRequest {
//!         name: "acme".to_string(),
//!         description: "Acme Corp".to_string(),
//!     }).await?;
//!     println!("Created tenant: {} ({})", tenant.name, tenant.base.id);
//!
//!     let page = client.tenants().list(&ctx).await?;
//!     println!("{} tenants", page.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Raw requests
//!
//! The verb helpers on [`Client`] sign and send arbitrary requests and
//! return the raw [`ApiResponse`]:
//!
//! ```rust,no_run
//! use zerogate::{Client, Context, Query};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("key_xxxxx", "secret_xxxxx")?;
//!
//!     let mut query = Query::new();
//!     query.insert("page".to_string(), vec!["2".to_string()]);
//!
//!     let res = client.get(&Context::background(), "/tenants", Some(&query), None).await?;
//!     println!("{}: {} bytes", res.status, res.body.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, ZeroGateError>`:
//!
//! ```rust,no_run
//! use zerogate::{Client, Context, ZeroGateError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new("key_xxxxx", "secret_xxxxx").unwrap();
//!
//!     match client.tenants().list(&Context::background()).await {
//!         Ok(page) => println!("Found {} tenants", page.data.len()),
//!         Err(e) if e.is_auth_error() => println!("Bad credentials: {}", e),
//!         Err(e) if e.is_cancellation() => println!("Gave up: {}", e),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! ## Debugging
//!
//! With `ClientOption::Debug(true)` every request and response is dumped to
//! the `zerogate::http` log target at debug level, with the API key and
//! secret replaced by `[**************]`.

pub mod body;
pub mod client;
pub mod context;
pub mod error;
pub mod response;
pub mod sign;
pub mod tenants;
pub mod trace;
pub mod transport;
pub mod types;

// Re-export main types at the crate root
pub use body::Body;
pub use client::{Client, ClientOption, Query};
pub use context::{CancelHandle, Context};
pub use error::{ApiError, ErrorResponse, Result, ZeroGateError};
pub use response::{ApiResponse, PagedResponse, SuccessResponse};
pub use transport::{ReqwestTransport, Transport};

// Re-export types module for easy access
pub use types::{AuditBase, Base, Tenant, TenantCreateRequest, TenantUpdateRequest};
