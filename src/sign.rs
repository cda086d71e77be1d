//! Request signing.
//!
//! Every request carries an `Authorization` header of the form
//!
//! ```text
//! APIKey=<key>, Signature=<hex>, Nonce=<seconds>
//! ```
//!
//! where the signature is the lowercase hex HMAC-SHA512, keyed by the API
//! secret, of `method + path + nonce` followed by the body bytes for `POST`
//! and `PUT` requests.

use crate::error::ZeroGateError;
use hmac::{Hmac, Mac};
use http::Method;
use sha2::Sha512;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha512 = Hmac<Sha512>;

/// Returns true if requests with this method carry a signed body.
pub fn signs_body(method: &Method) -> bool {
    method == Method::POST || method == Method::PUT
}

/// Current nonce: whole seconds since the Unix epoch.
///
/// Two calls within the same second yield the same nonce.
pub fn nonce() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Compute the request signature.
///
/// `body` is only mixed in for `POST` and `PUT`; it must be the exact bytes
/// sent on the wire.
///
/// # Example
///
/// ```rust
/// use zerogate::sign::sign;
/// use http::Method;
///
/// let a = sign("secret", &Method::POST, "/tenants", 1700000000, Some(b"{}"));
/// let b = sign("secret", &Method::POST, "/tenants", 1700000000, Some(b"{}"));
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 128);
/// ```
pub fn sign(secret: &str, method: &Method, path: &str, nonce: u64, body: Option<&[u8]>) -> String {
    hex::encode(canonical_mac(secret, method, path, nonce, body).finalize().into_bytes())
}

fn canonical_mac(
    secret: &str,
    method: &Method,
    path: &str,
    nonce: u64,
    body: Option<&[u8]>,
) -> HmacSha512 {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(method.as_str().as_bytes());
    mac.update(path.as_bytes());
    mac.update(nonce.to_string().as_bytes());
    if signs_body(method) {
        if let Some(body) = body {
            mac.update(body);
        }
    }
    mac
}

/// Parsed or to-be-rendered `Authorization` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    /// Public API key.
    pub api_key: String,
    /// Lowercase hex signature.
    pub signature: String,
    /// Nonce the signature was computed with.
    pub nonce: u64,
}

impl Authorization {
    /// Sign a request and build the header value for it.
    pub fn new(
        api_key: &str,
        secret: &str,
        method: &Method,
        path: &str,
        nonce: u64,
        body: Option<&[u8]>,
    ) -> Self {
        Self {
            api_key: api_key.to_string(),
            signature: sign(secret, method, path, nonce, body),
            nonce,
        }
    }

    /// Recompute the signature with `secret` and compare it to the carried one.
    pub fn verify(&self, secret: &str, method: &Method, path: &str, body: Option<&[u8]>) -> bool {
        let mac = canonical_mac(secret, method, path, self.nonce, body);
        match hex::decode(&self.signature) {
            Ok(expected) => mac.verify_slice(&expected).is_ok(),
            Err(_) => false,
        }
    }
}

impl fmt::Display for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "APIKey={}, Signature={}, Nonce={}",
            self.api_key, self.signature, self.nonce
        )
    }
}

impl FromStr for Authorization {
    type Err = ZeroGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ZeroGateError::InvalidRequest(format!("invalid Authorization header: {s}"));

        let parts: Vec<&str> = s.split(", ").collect();
        let [key, signature, nonce] = parts.as_slice() else {
            return Err(invalid());
        };

        let api_key = key.strip_prefix("APIKey=").ok_or_else(invalid)?;
        let signature = signature.strip_prefix("Signature=").ok_or_else(invalid)?;
        let nonce = nonce
            .strip_prefix("Nonce=")
            .and_then(|n| n.parse::<u64>().ok())
            .ok_or_else(invalid)?;

        if api_key.is_empty() || signature.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            api_key: api_key.to_string(),
            signature: signature.to_string(),
            nonce,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "1f4f6db557e4fdce6eb1dbbcc9f5d544f99252e8c2b5158a566e1c4667a48717";

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign(SECRET, &Method::GET, "/get", 1_700_000_000, None);
        let b = sign(SECRET, &Method::GET, "/get", 1_700_000_000, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sign_is_lowercase_hex() {
        let sig = sign(SECRET, &Method::PUT, "/put", 42, Some(b"{}"));
        assert_eq!(sig.len(), 128);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_sign_matches_manual_hmac() {
        let mut mac = HmacSha512::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(b"POST/post1700000000{\"name\":\"Test\"}");
        let expected = hex::encode(mac.finalize().into_bytes());

        let sig = sign(
            SECRET,
            &Method::POST,
            "/post",
            1_700_000_000,
            Some(br#"{"name":"Test"}"#),
        );
        assert_eq!(sig, expected);
    }

    #[test]
    fn test_get_and_delete_ignore_body() {
        for method in [Method::GET, Method::DELETE] {
            let without = sign(SECRET, &method, "/x", 7, None);
            let with = sign(SECRET, &method, "/x", 7, Some(b"ignored"));
            assert_eq!(without, with, "{method} must not sign a body");
        }
    }

    #[test]
    fn test_post_body_changes_signature() {
        let a = sign(SECRET, &Method::POST, "/x", 7, Some(b"{}"));
        let b = sign(SECRET, &Method::POST, "/x", 7, Some(b"{ }"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_nonce_and_path_change_signature() {
        let base = sign(SECRET, &Method::GET, "/a", 1, None);
        assert_ne!(base, sign(SECRET, &Method::GET, "/a", 2, None));
        assert_ne!(base, sign(SECRET, &Method::GET, "/b", 1, None));
        assert_ne!(base, sign("other", &Method::GET, "/a", 1, None));
    }

    #[test]
    fn test_authorization_format() {
        let auth = Authorization {
            api_key: "key_1".to_string(),
            signature: "abcd".to_string(),
            nonce: 1_700_000_000,
        };
        assert_eq!(
            auth.to_string(),
            "APIKey=key_1, Signature=abcd, Nonce=1700000000"
        );
    }

    #[test]
    fn test_authorization_parse() {
        let auth: Authorization = "APIKey=key_1, Signature=abcd, Nonce=12".parse().unwrap();
        assert_eq!(auth.api_key, "key_1");
        assert_eq!(auth.signature, "abcd");
        assert_eq!(auth.nonce, 12);
    }

    #[test]
    fn test_authorization_parse_rejects_malformed() {
        for raw in [
            "",
            "Bearer token",
            "APIKey=k, Signature=s",
            "APIKey=k,Signature=s,Nonce=1",
            "APIKey=k, Signature=s, Nonce=abc",
            "Signature=s, APIKey=k, Nonce=1",
        ] {
            assert!(raw.parse::<Authorization>().is_err(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn test_authorization_verify() {
        let body = br#"{"name":"Test"}"#;
        let auth = Authorization::new("key_1", SECRET, &Method::POST, "/post", 99, Some(body));
        assert!(auth.verify(SECRET, &Method::POST, "/post", Some(body)));
        assert!(!auth.verify(SECRET, &Method::POST, "/post", Some(b"{}")));
        assert!(!auth.verify("wrong", &Method::POST, "/post", Some(body)));
    }
}
