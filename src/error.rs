use {
    crate::constants::*,
    derive_builder::UninitializedFieldError,
    http::status::StatusCode,
    scratchstack_errors::ServiceError,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// Error returned when an AWS SigV2 signature cannot be generated or fails validation.
#[derive(Debug)]
#[non_exhaustive]
pub enum SignatureError {
    /// The `Authorization` header is not of the form `AWS <access-key>:<signature>`.
    InvalidAuthorizationHeader(/* message */ String),

    /// The access key presented with the request does not match the credentials it is being
    /// validated against.
    InvalidAccessKeyId(/* message */ String),

    /// A presigned request was presented after its expiration time.
    ExpiredRequest(/* message */ String),

    /// Part of the request description could not be interpreted. Sample causes:
    /// the resource is not a valid URI path and query string;
    /// a header value is not a visible ASCII string;
    /// a date could not be parsed when a point in time was required;
    /// a string is not valid base64.
    MalformedInput(/* message */ String),

    /// A field required to build the string to sign is absent, e.g. the verb in header
    /// authentication mode, or the resource.
    MissingRequiredField(/* message */ String),

    /// The request date is too far from the server's clock.
    RequestTimeTooSkewed(/* message */ String),

    /// Signature did not match the calculated signature value.
    SignatureDoesNotMatch(/* message */ String),
}

impl SignatureError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAuthorizationHeader(_) => ERR_CODE_INVALID_ARGUMENT,
            Self::InvalidAccessKeyId(_) => ERR_CODE_INVALID_ACCESS_KEY_ID,
            Self::ExpiredRequest(_) => ERR_CODE_ACCESS_DENIED,
            Self::MalformedInput(_) => ERR_CODE_MALFORMED_INPUT,
            Self::MissingRequiredField(_) => ERR_CODE_MISSING_REQUIRED_FIELD,
            Self::RequestTimeTooSkewed(_) => ERR_CODE_REQUEST_TIME_TOO_SKEWED,
            Self::SignatureDoesNotMatch(_) => ERR_CODE_SIGNATURE_DOES_NOT_MATCH,
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidAuthorizationHeader(_) | Self::MalformedInput(_) | Self::MissingRequiredField(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::FORBIDDEN,
        }
    }
}

impl ServiceError for SignatureError {
    fn error_code(&self) -> &'static str {
        SignatureError::error_code(self)
    }

    fn http_status(&self) -> StatusCode {
        SignatureError::http_status(self)
    }
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidAuthorizationHeader(msg) => f.write_str(msg),
            Self::InvalidAccessKeyId(msg) => f.write_str(msg),
            Self::ExpiredRequest(msg) => f.write_str(msg),
            Self::MalformedInput(msg) => f.write_str(msg),
            Self::MissingRequiredField(msg) => f.write_str(msg),
            Self::RequestTimeTooSkewed(msg) => f.write_str(msg),
            Self::SignatureDoesNotMatch(msg) => f.write_str(msg),
        }
    }
}

impl Error for SignatureError {}

impl From<UninitializedFieldError> for SignatureError {
    fn from(e: UninitializedFieldError) -> SignatureError {
        SignatureError::MissingRequiredField(format!("Missing required field: {}", e.field_name()))
    }
}
