//! Request signing for the authenticated REST endpoints.
//!
//! Every signed request carries three headers: the connection id, a
//! millisecond-precision UTC timestamp, and a base64 HMAC-SHA256 signature
//! over the canonical request string
//!
//! ```text
//! METHOD ‖ PATH ‖ QUERY ‖ "BTNL-AUTH-TIMESTAMP" ‖ TIMESTAMP
//!        ‖ "BTNL-CONNECTION-ID" ‖ CONNECTION_ID
//! ```
//!
//! `QUERY` is the signing-only canonical form produced by
//! [`QueryParams::canonical`]: it always begins with `?`, joins terms with
//! `?`, expands list values to repeated `key=value` terms, and is **not**
//! URL-escaped. The HTTP layer separately URL-encodes the query string it
//! actually transmits; the signature is over the canonical form.
//!
//! The HMAC key is the auth token **string's UTF-8 bytes verbatim** — the
//! hex text the exchange handed out, not the 32 bytes it decodes to.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// One query parameter value: a scalar or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A single `key=value` term.
    Single(String),
    /// Repeated `key=value` terms, one per element.
    Many(Vec<String>),
}

/// An insertion-ordered query parameter mapping.
///
/// Shared by the signer and the HTTP layer so the signed canonical form and
/// the transmitted query always agree on content and order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, ParamValue)>);

impl QueryParams {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar parameter.
    pub fn push(&mut self, key: &'static str, value: impl ToString) {
        self.0.push((key, ParamValue::Single(value.to_string())));
    }

    /// Append a scalar parameter if it is present.
    pub fn push_opt<T: ToString>(&mut self, key: &'static str, value: Option<&T>) {
        if let Some(v) = value {
            self.push(key, v.to_string());
        }
    }

    /// Append a list parameter. An empty list is treated as absent.
    pub fn push_list<T: ToString>(&mut self, key: &'static str, values: &[T]) {
        if values.is_empty() {
            return;
        }
        self.0.push((
            key,
            ParamValue::Many(values.iter().map(ToString::to_string).collect()),
        ));
    }

    /// The signing-only canonical form: starts with `?`, terms joined by
    /// `?`, list values expanded to repeated terms, no URL escaping.
    pub fn canonical(&self) -> String {
        let terms: Vec<String> = self
            .0
            .iter()
            .map(|(key, value)| match value {
                ParamValue::Single(v) => format!("{key}={v}"),
                ParamValue::Many(vs) => vs
                    .iter()
                    .map(|v| format!("{key}={v}"))
                    .collect::<Vec<_>>()
                    .join("?"),
            })
            .collect();
        format!("?{}", terms.join("?"))
    }

    /// Flat `(key, value)` pairs for the HTTP layer, which URL-encodes them.
    /// List keys repeat once per element.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            match value {
                ParamValue::Single(v) => pairs.push((*key, v.clone())),
                ParamValue::Many(vs) => {
                    for v in vs {
                        pairs.push((*key, v.clone()));
                    }
                }
            }
        }
        pairs
    }
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Format a signing timestamp: ISO 8601 UTC with millisecond precision and
/// a trailing `Z`.
pub fn auth_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The canonical string covered by the signature.
pub fn canonical_string(
    method: &str,
    path: &str,
    params: &QueryParams,
    timestamp: &str,
    connection_id: u64,
) -> String {
    format!(
        "{method}{path}{query}{ts_header}{timestamp}{cid_header}{connection_id}",
        query = params.canonical(),
        ts_header = crate::constants::TIMESTAMP_HEADER,
        cid_header = crate::constants::CONNECTION_ID_HEADER,
    )
}

/// Sign one request: base64 HMAC-SHA256 of the canonical string, keyed by
/// the auth token's UTF-8 text.
pub fn signature(
    method: &str,
    path: &str,
    params: &QueryParams,
    timestamp: &str,
    connection_id: u64,
    auth_token: &str,
) -> Result<String, AuthError> {
    let msg = canonical_string(method, path, params, timestamp, connection_id);
    let mut mac = HmacSha256::new_from_slice(auth_token.as_bytes())
        .map_err(|_| AuthError::SigningFailed)?;
    mac.update(msg.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
