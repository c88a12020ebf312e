//! AWS SigV2 request signature verification routines.
//!
//! These recompute the signature for a [RequestDescription] with known credentials and compare it,
//! in constant time, with the signature presented by the client. The server time is always passed
//! in; nothing here reads the clock.

use {
    crate::{constants::*, signature::sign, CredentialPair, RequestDescription, SignatureError, SigningMode},
    chrono::{DateTime, Duration, Utc},
    lazy_static::lazy_static,
    log::trace,
    regex::Regex,
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
    subtle::ConstantTimeEq,
};

lazy_static! {
    /// Pattern for an AWS SigV2 Authorization header: `AWS <access-key>:<signature>`.
    static ref AWS_AUTH_RE: Regex = Regex::new(r"^AWS ([^\s:]+):([A-Za-z0-9+/]+={0,2})$").unwrap();
}

/// A parsed `Authorization: AWS <access-key>:<signature>` header value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorizationHeader {
    access_key: String,
    signature: String,
}

impl AuthorizationHeader {
    /// Create an authorization header value from its parts.
    pub fn new<A: Into<String>, S: Into<String>>(access_key: A, signature: S) -> Self {
        Self {
            access_key: access_key.into(),
            signature: signature.into(),
        }
    }

    /// Retrieve the access key.
    #[inline]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Retrieve the base64-encoded signature.
    #[inline]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl FromStr for AuthorizationHeader {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match AWS_AUTH_RE.captures(s.trim()) {
            Some(cap) => Ok(Self::new(&cap[1], &cap[2])),
            None => Err(SignatureError::InvalidAuthorizationHeader(MSG_AUTH_HEADER_INVALID.to_string())),
        }
    }
}

impl Display for AuthorizationHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}:{}", AWS_AUTH_PREFIX, self.access_key, self.signature)
    }
}

/// Verify an `Authorization` header against the request, allowing the request date to differ from
/// `server_timestamp` by up to 15 minutes.
pub fn verify_authorization(
    request: &RequestDescription,
    credentials: &CredentialPair,
    authorization: &str,
    server_timestamp: DateTime<Utc>,
) -> Result<(), SignatureError> {
    verify_authorization_with_mismatch(
        request,
        credentials,
        authorization,
        server_timestamp,
        Duration::minutes(ALLOWED_MISMATCH_MINUTES),
    )
}

/// Verify an `Authorization` header against the request, allowing the request date to differ from
/// `server_timestamp` by up to `allowed_mismatch`.
pub fn verify_authorization_with_mismatch(
    request: &RequestDescription,
    credentials: &CredentialPair,
    authorization: &str,
    server_timestamp: DateTime<Utc>,
    allowed_mismatch: Duration,
) -> Result<(), SignatureError> {
    let header = AuthorizationHeader::from_str(authorization)?;
    check_access_key(header.access_key(), credentials)?;

    let mode = SigningMode::HeaderAuth;
    let req_ts = request.date().to_timestamp(mode.date_rendering()).ok_or_else(|| {
        SignatureError::MalformedInput(format!("Invalid request date: {}", request.date()))
    })?;

    let min_ts = server_timestamp.checked_sub_signed(allowed_mismatch).unwrap_or(server_timestamp);
    let max_ts = server_timestamp.checked_add_signed(allowed_mismatch).unwrap_or(server_timestamp);
    if req_ts < min_ts || req_ts > max_ts {
        trace!("verify_authorization: request timestamp {} is outside [{}, {}]", req_ts, min_ts, max_ts);
        return Err(SignatureError::RequestTimeTooSkewed(MSG_REQUEST_TIME_TOO_SKEWED.to_string()));
    }

    check_signature(header.signature(), &sign(request, credentials, mode)?)
}

/// Verify the signature of a presigned URL.
///
/// The request's date is the `Expires` value; the request is rejected once `server_timestamp` is
/// past it. `signature` is the `Signature` query parameter after URL decoding.
pub fn verify_presigned(
    request: &RequestDescription,
    credentials: &CredentialPair,
    access_key_id: &str,
    signature: &str,
    server_timestamp: DateTime<Utc>,
) -> Result<(), SignatureError> {
    check_access_key(access_key_id, credentials)?;

    let mode = SigningMode::QueryAuth;
    let expires = request.date().to_timestamp(mode.date_rendering()).ok_or_else(|| {
        SignatureError::MalformedInput(format!("Invalid expiration time: {}", request.date()))
    })?;

    if server_timestamp > expires {
        trace!("verify_presigned: expired at {}, server time {}", expires, server_timestamp);
        return Err(SignatureError::ExpiredRequest(MSG_REQUEST_EXPIRED.to_string()));
    }

    check_signature(signature, &sign(request, credentials, mode)?)
}

fn check_access_key(access_key: &str, credentials: &CredentialPair) -> Result<(), SignatureError> {
    if access_key == credentials.access_key() {
        Ok(())
    } else {
        trace!("Access key mismatch: expected '{}', got '{}'", credentials.access_key(), access_key);
        Err(SignatureError::InvalidAccessKeyId(MSG_INVALID_ACCESS_KEY_ID.to_string()))
    }
}

fn check_signature(signature: &str, expected_signature: &str) -> Result<(), SignatureError> {
    let is_equal: bool = signature.as_bytes().ct_eq(expected_signature.as_bytes()).into();
    if is_equal {
        Ok(())
    } else {
        trace!("Signature mismatch: expected '{}', got '{}'", expected_signature, signature);
        Err(SignatureError::SignatureDoesNotMatch(MSG_REQUEST_SIGNATURE_MISMATCH.to_string()))
    }
}
