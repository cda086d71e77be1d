//! ZeroGate API client.
//!
//! The main entry point for interacting with the ZeroGate public API. Every
//! request is signed with the client's API key and secret; see [`crate::sign`].

use crate::body::Body;
use crate::context::Context;
use crate::error::{Result, ZeroGateError};
use crate::response::{classify, ApiResponse};
use crate::sign::{self, Authorization};
use crate::tenants::TenantsClient;
use crate::trace::{self, Redactor};
use crate::transport::{ReqwestTransport, Transport};
use bytes::Bytes;
use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use http::Method;
use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

const DEFAULT_BASE_URL: &str = "https://api.zerogate.io/public/v1";

/// Query parameters: each key maps to one or more values.
pub type Query = BTreeMap<String, Vec<String>>;

/// A client option, applied in order by [`Client::with_options`] and
/// [`Client::configure`]. Later options override earlier ones.
#[derive(Debug, Clone)]
pub enum ClientOption {
    /// Base URL every path is appended to (default: https://api.zerogate.io/public/v1).
    BaseUrl(String),
    /// Dump requests and responses to the `zerogate::http` log target.
    Debug(bool),
    /// User-Agent header value (default: `zerogate-rust/<version>`).
    UserAgent(String),
    /// Add a default header sent with every request.
    Header(String, String),
    /// Replace all default headers.
    Headers(HeaderMap),
    /// Use a custom transport.
    Transport(Arc<dyn Transport>),
    /// Use a caller-configured reqwest client as the transport.
    HttpClient(reqwest::Client),
}

/// Mutable network configuration shared by all calls of one client.
#[derive(Debug, Clone)]
struct Settings {
    base_url: String,
    debug: bool,
    user_agent: Option<HeaderValue>,
    headers: HeaderMap,
    transport: Arc<dyn Transport>,
}

impl Default for Settings {
    fn default() -> Self {
        let user_agent = format!("zerogate-rust/{}", env!("CARGO_PKG_VERSION"));
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debug: false,
            user_agent: HeaderValue::from_str(&user_agent).ok(),
            headers: HeaderMap::new(),
            transport: Arc::new(ReqwestTransport::default()),
        }
    }
}

impl Settings {
    fn apply(&mut self, option: ClientOption) -> Result<()> {
        match option {
            ClientOption::BaseUrl(url) => {
                let parsed = reqwest::Url::parse(&url).map_err(|e| {
                    ZeroGateError::Configuration(format!("invalid base URL {url:?}: {e}"))
                })?;
                if parsed.cannot_be_a_base() {
                    return Err(ZeroGateError::Configuration(format!(
                        "invalid base URL {url:?}: not a base"
                    )));
                }
                self.base_url = url.trim_end_matches('/').to_string();
            }
            ClientOption::Debug(debug) => self.debug = debug,
            ClientOption::UserAgent(agent) => {
                let value = HeaderValue::from_str(&agent).map_err(|e| {
                    ZeroGateError::Configuration(format!("invalid user agent {agent:?}: {e}"))
                })?;
                self.user_agent = Some(value);
            }
            ClientOption::Header(name, value) => {
                let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                    ZeroGateError::Configuration(format!("invalid header name {name:?}: {e}"))
                })?;
                let header_value = HeaderValue::from_str(&value).map_err(|e| {
                    ZeroGateError::Configuration(format!("invalid value for header {name}: {e}"))
                })?;
                self.headers.append(header_name, header_value);
            }
            ClientOption::Headers(headers) => self.headers = headers,
            ClientOption::Transport(transport) => self.transport = transport,
            ClientOption::HttpClient(client) => {
                self.transport = Arc::new(ReqwestTransport::new(client));
            }
        }
        Ok(())
    }
}

struct ClientInner {
    api_key: String,
    api_secret: String,
    settings: RwLock<Settings>,
}

/// ZeroGate API client.
///
/// Cloning is cheap: clones share credentials and configuration.
///
/// # Example
///
/// ```rust,no_run
/// use zerogate::{Client, ClientOption, Context};
/// use zerogate::types::TenantCreateRequest;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::with_options(
///         "key_xxxxx",
///         "secret_xxxxx",
///         [ClientOption::BaseUrl("https://api.zerogate.io/public/v1".to_string())],
///     )?;
///
///     let tenant = client
///         .tenants()
///         .create(&Context::background(), &TenantCreateRequest {
///             name: "acme".to_string(),
///             description: "Acme Corp".to_string(),
///         })
///         .await?;
///     println!("Created tenant {}", tenant.base.id);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &self.inner.api_key)
            .field("base_url", &self.base_url())
            .field("debug", &self.is_debug())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new ZeroGate client with default configuration.
    ///
    /// Fails with [`ZeroGateError::Configuration`] if the key or secret is empty.
    ///
    /// ```rust
    /// use zerogate::Client;
    ///
    /// let client = Client::new("key_xxxxx", "secret_xxxxx").unwrap();
    /// assert!(Client::new("", "secret_xxxxx").is_err());
    /// ```
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, api_secret, Vec::<ClientOption>::new())
    }

    /// Create a new ZeroGate client and apply `options` in order.
    ///
    /// ```rust
    /// use zerogate::{Client, ClientOption};
    ///
    /// let client = Client::with_options("key_xxxxx", "secret_xxxxx", [
    ///     ClientOption::BaseUrl("http://localhost:8080/public/v1".to_string()),
    ///     ClientOption::Debug(true),
    /// ]).unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8080/public/v1");
    /// ```
    pub fn with_options(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        options: impl IntoIterator<Item = ClientOption>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        if api_key.is_empty() || api_secret.is_empty() {
            return Err(ZeroGateError::Configuration(
                "API key & secret must not be empty".to_string(),
            ));
        }

        let mut settings = Settings::default();
        for option in options {
            settings.apply(option)?;
        }

        Ok(Self {
            inner: Arc::new(ClientInner {
                api_key,
                api_secret,
                settings: RwLock::new(settings),
            }),
        })
    }

    /// Create a client from `ZEROGATE_API_KEY`, `ZEROGATE_API_SECRET` and the
    /// optional `ZEROGATE_BASE_URL` and `ZEROGATE_DEBUG` variables.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let api_key = var("ZEROGATE_API_KEY").ok_or_else(|| {
            ZeroGateError::Configuration("ZEROGATE_API_KEY is not set".to_string())
        })?;
        let api_secret = var("ZEROGATE_API_SECRET").ok_or_else(|| {
            ZeroGateError::Configuration("ZEROGATE_API_SECRET is not set".to_string())
        })?;

        let mut options = Vec::new();
        if let Some(url) = var("ZEROGATE_BASE_URL") {
            options.push(ClientOption::BaseUrl(url));
        }
        if let Some(debug) = var("ZEROGATE_DEBUG") {
            let debug = matches!(debug.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
            options.push(ClientOption::Debug(debug));
        }

        Self::with_options(api_key, api_secret, options)
    }

    /// Apply options to a live client.
    ///
    /// Either every option applies or none does. Calls already in flight keep
    /// the configuration they started with.
    pub fn configure(&self, options: impl IntoIterator<Item = ClientOption>) -> Result<()> {
        let mut settings = self
            .inner
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let mut updated = settings.clone();
        for option in options {
            updated.apply(option)?;
        }
        *settings = updated;
        Ok(())
    }

    /// The public API key.
    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    /// Get the base URL for the API.
    pub fn base_url(&self) -> String {
        self.read(|s| s.base_url.clone())
    }

    /// Whether request/response dumps are enabled.
    pub fn is_debug(&self) -> bool {
        self.read(|s| s.debug)
    }

    /// The configured User-Agent, if any.
    pub fn user_agent(&self) -> Option<String> {
        self.read(|s| {
            s.user_agent
                .as_ref()
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
    }

    /// The default headers sent with every request.
    pub fn headers(&self) -> HeaderMap {
        self.read(|s| s.headers.clone())
    }

    /// The transport the next call will use.
    pub fn transport(&self) -> Arc<dyn Transport> {
        self.read(|s| s.transport.clone())
    }

    /// Get the tenants client for tenant management.
    pub fn tenants(&self) -> TenantsClient {
        TenantsClient::new(self.clone())
    }

    fn read<T>(&self, f: impl FnOnce(&Settings) -> T) -> T {
        let settings = self
            .inner
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&settings)
    }

    /// Make an authenticated GET request.
    pub async fn get(
        &self,
        ctx: &Context,
        path: &str,
        query: Option<&Query>,
        headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse> {
        self.execute(ctx, Method::GET, path, query, Body::Empty, headers)
            .await
    }

    /// Make an authenticated POST request.
    pub async fn post(
        &self,
        ctx: &Context,
        path: &str,
        query: Option<&Query>,
        body: impl Into<Body>,
        headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse> {
        self.execute(ctx, Method::POST, path, query, body.into(), headers)
            .await
    }

    /// Make an authenticated PUT request.
    pub async fn put(
        &self,
        ctx: &Context,
        path: &str,
        query: Option<&Query>,
        body: impl Into<Body>,
        headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse> {
        self.execute(ctx, Method::PUT, path, query, body.into(), headers)
            .await
    }

    /// Make an authenticated DELETE request.
    pub async fn delete(
        &self,
        ctx: &Context,
        path: &str,
        query: Option<&Query>,
        headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse> {
        self.execute(ctx, Method::DELETE, path, query, Body::Empty, headers)
            .await
    }

    /// Build, sign and send one request.
    ///
    /// For `POST` and `PUT` the body is materialized once and the same bytes
    /// are signed and sent. For other methods the body is dropped.
    pub async fn execute(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
        query: Option<&Query>,
        body: Body,
        headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse> {
        if let Some(err) = ctx.err() {
            return Err(err);
        }

        let settings = self.read(Settings::clone);

        let body = if sign::signs_body(&method) {
            Some(ctx.run(body.into_bytes()).await?)
        } else {
            None
        };

        let mut url = reqwest::Url::parse(&format!("{}{}", settings.base_url, path))
            .map_err(|e| ZeroGateError::InvalidRequest(format!("request URL: {e}")))?;
        if let Some(query) = query.map(encode_query).filter(|q| !q.is_empty()) {
            url.set_query(Some(&query));
        }

        // The server verifies against the decoded path.
        let signed_path = percent_decode_str(url.path())
            .decode_utf8()
            .map_err(|e| ZeroGateError::InvalidRequest(format!("request path: {e}")))?;

        let nonce = sign::nonce();
        let authorization = Authorization::new(
            &self.inner.api_key,
            &self.inner.api_secret,
            &method,
            &signed_path,
            nonce,
            body.as_deref(),
        );

        let mut request_headers = merge_headers(&settings.headers, headers);
        let authorization = HeaderValue::from_str(&authorization.to_string())
            .map_err(|e| ZeroGateError::InvalidRequest(format!("Authorization header: {e}")))?;
        request_headers.insert(header::AUTHORIZATION, authorization);
        if let Some(agent) = settings.user_agent {
            request_headers.entry(header::USER_AGENT).or_insert(agent);
        }
        request_headers
            .entry(header::CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));

        let mut request = http::Request::builder()
            .method(method)
            .uri(url.as_str())
            .body(body.unwrap_or_else(Bytes::new))
            .map_err(|e| ZeroGateError::InvalidRequest(e.to_string()))?;
        *request.headers_mut() = request_headers;

        let redactor = settings
            .debug
            .then(|| Redactor::new([self.inner.api_key.as_str(), self.inner.api_secret.as_str()]));
        if let Some(redactor) = &redactor {
            log::debug!(
                target: trace::LOG_TARGET,
                "\n{}",
                redactor.redact(&trace::dump_request(&request))
            );
        }

        log::trace!("sending {} {}", request.method(), url.path());
        let transport = settings.transport;
        let response = ctx
            .run(async {
                transport
                    .perform(request)
                    .await
                    .map_err(ZeroGateError::Transport)
            })
            .await?;

        if let Some(redactor) = &redactor {
            log::debug!(
                target: trace::LOG_TARGET,
                "\n{}",
                redactor.redact(&trace::dump_response(&response))
            );
        }

        classify(response)
    }
}

/// Encode a query map as `application/x-www-form-urlencoded`.
///
/// Keys come out sorted; repeated values keep their order.
pub fn encode_query(query: &Query) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in query {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// Default headers overlaid by per-call headers. A per-call header replaces
/// every default value with the same name.
fn merge_headers(defaults: &HeaderMap, overrides: Option<&HeaderMap>) -> HeaderMap {
    let mut merged = defaults.clone();
    if let Some(overrides) = overrides {
        for name in overrides.keys() {
            merged.remove(name);
            for value in overrides.get_all(name) {
                merged.append(name.clone(), value.clone());
            }
        }
    }
    merged
}
