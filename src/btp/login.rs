//! Login handshake bodies (`LG` encoding).
//!
//! The first byte of every `LG` body is a message-type tag: `'L'` request,
//! `'K'` logout, `'A'` ack, `'R'` reject.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{AuthError, ParseError};

use super::wire::WireReader;

// ---------------------------------------------------------------------------
// Auth token
// ---------------------------------------------------------------------------

/// The 32-byte connection secret supplied to login.
///
/// The exchange hands the token out as 64 hex characters; [`from_hex`]
/// decodes and length-checks it. The same hex text (not the decoded bytes)
/// is the HMAC key for signed REST requests — see [`crate::auth`].
///
/// [`from_hex`]: AuthToken::from_hex
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AuthToken([u8; 32]);

impl AuthToken {
    /// Decode a 64-character hex token.
    pub fn from_hex(hex_token: &str) -> Result<Self, AuthError> {
        let bytes = hex::decode(hex_token).map_err(|_| AuthError::BadTokenEncoding)?;
        let decoded_len = bytes.len();
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| AuthError::BadTokenLength {
                actual: decoded_len,
            })?;
        Ok(Self(bytes))
    }

    /// Wrap raw token bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw token bytes as sent in a login request.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

/// `'L'` — client login request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginRequest {
    /// Connection id assigned by the exchange.
    pub connection_id: u64,
    /// The 32-byte connection secret.
    pub auth_token: AuthToken,
    /// Idle heartbeat cadence the client commits to, in seconds.
    pub heartbeat_interval: u8,
}

impl LoginRequest {
    pub(crate) const MSG_TYPE: u8 = b'L';
    const LEN: usize = 42;

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u64_le(self.connection_id);
        buf.put_slice(self.auth_token.as_bytes());
        buf.put_u8(self.heartbeat_interval);
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        r.tag(Self::MSG_TYPE)?;
        let connection_id = r.u64_le()?;
        let auth_token = AuthToken::from_bytes(r.array::<32>()?);
        let heartbeat_interval = r.u8()?;
        r.finish()?;
        Ok(Self {
            connection_id,
            auth_token,
            heartbeat_interval,
        })
    }
}

/// `'K'` — client logout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutRequest {
    /// Whether resting orders survive the logout (`'Y'`/`'N'` on the wire).
    pub persist_orders: bool,
}

impl LogoutRequest {
    pub(crate) const MSG_TYPE: u8 = b'K';
    const LEN: usize = 2;

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u8(if self.persist_orders { b'Y' } else { b'N' });
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        r.tag(Self::MSG_TYPE)?;
        let persist_orders = match r.u8()? {
            b'Y' => true,
            b'N' => false,
            value => {
                return Err(ParseError::UnknownEnum {
                    field: "persist_orders",
                    value,
                });
            }
        };
        r.finish()?;
        Ok(Self { persist_orders })
    }
}

/// Reason byte of a [`LoginReject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginRejectReason {
    /// No login request was received before the server's deadline.
    NoReqReceived = 0x01,
    /// The credentials did not validate.
    Unauthorized = 0x02,
    /// The connection id already has a live session.
    AlreadyLoggedIn = 0x03,
}

impl LoginRejectReason {
    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::NoReqReceived),
            0x02 => Some(Self::Unauthorized),
            0x03 => Some(Self::AlreadyLoggedIn),
            _ => None,
        }
    }
}

/// `'R'` — server login rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginReject {
    /// Why the login was refused.
    pub reason: LoginRejectReason,
}

impl LoginReject {
    pub(crate) const MSG_TYPE: u8 = b'R';
    const LEN: usize = 2;

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u8(Self::MSG_TYPE);
        buf.put_u8(self.reason as u8);
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        self.encode_into(&mut buf);
        buf.freeze()
    }

    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        r.tag(Self::MSG_TYPE)?;
        let code = r.u8()?;
        let reason = LoginRejectReason::from_code(code).ok_or(ParseError::UnknownEnum {
            field: "login reject reason",
            value: code,
        })?;
        r.finish()?;
        Ok(Self { reason })
    }
}

// ---------------------------------------------------------------------------
// LG dispatch
// ---------------------------------------------------------------------------

/// Any body carried under the `LG` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Login {
    /// Client login request.
    Request(LoginRequest),
    /// Client logout request.
    Logout(LogoutRequest),
    /// `'A'` — server login acknowledgement. The body is the tag alone.
    Ack,
    /// Server login rejection.
    Reject(LoginReject),
}

impl Login {
    pub(crate) const ACK_MSG_TYPE: u8 = b'A';

    pub(crate) fn encoded_len(&self) -> usize {
        match self {
            Self::Request(_) => LoginRequest::LEN,
            Self::Logout(_) => LogoutRequest::LEN,
            Self::Ack => 1,
            Self::Reject(_) => LoginReject::LEN,
        }
    }

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) {
        match self {
            Self::Request(b) => b.encode_into(buf),
            Self::Logout(b) => b.encode_into(buf),
            Self::Ack => buf.put_u8(Self::ACK_MSG_TYPE),
            Self::Reject(b) => b.encode_into(buf),
        }
    }

    /// Encode this body to its wire bytes (without the frame header).
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Decode an `LG` body, dispatching on its message-type byte.
    pub fn decode(data: &[u8]) -> Result<Self, ParseError> {
        let mut r = WireReader::new(data);
        match r.u8()? {
            LoginRequest::MSG_TYPE => Ok(Self::Request(LoginRequest::decode(data)?)),
            LogoutRequest::MSG_TYPE => Ok(Self::Logout(LogoutRequest::decode(data)?)),
            Self::ACK_MSG_TYPE => {
                r.finish()?;
                Ok(Self::Ack)
            }
            LoginReject::MSG_TYPE => Ok(Self::Reject(LoginReject::decode(data)?)),
            value => Err(ParseError::UnknownEnum {
                field: "login message type",
                value,
            }),
        }
    }
}
