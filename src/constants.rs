//! Common constants used throughout the crate.
//!
//! Tests that are testing the content of an error code or message should not use these constants;
//! they should use hard-coded strings so the tests are also testing for misspellings.
//!
//! Please keep this file organized alphabetically. (This can be a bit hard with comments, etc.)

/// Default allowed timestamp mismatch in minutes.
pub(crate) const ALLOWED_MISMATCH_MINUTES: i64 = 15;

/// Prefix of the `Authorization` header value for AWS SigV2.
pub(crate) const AWS_AUTH_PREFIX: &str = "AWS ";

/// Error code: AccessDenied (returned by S3 for expired presigned requests)
pub(crate) const ERR_CODE_ACCESS_DENIED: &str = "AccessDenied";

/// Error code: InvalidAccessKeyId
pub(crate) const ERR_CODE_INVALID_ACCESS_KEY_ID: &str = "InvalidAccessKeyId";

/// Error code: InvalidArgument
pub(crate) const ERR_CODE_INVALID_ARGUMENT: &str = "InvalidArgument";

/// Error code: MalformedInput
pub(crate) const ERR_CODE_MALFORMED_INPUT: &str = "MalformedInput";

/// Error code: MissingRequiredField
pub(crate) const ERR_CODE_MISSING_REQUIRED_FIELD: &str = "MissingRequiredField";

/// Error code: RequestTimeTooSkewed
pub(crate) const ERR_CODE_REQUEST_TIME_TOO_SKEWED: &str = "RequestTimeTooSkewed";

/// Error code: SignatureDoesNotMatch
pub(crate) const ERR_CODE_SIGNATURE_DOES_NOT_MATCH: &str = "SignatureDoesNotMatch";

/// Header for `content-md5`
pub(crate) const HDR_CONTENT_MD5: &str = "content-md5";

/// Header for `content-type`
pub(crate) const HDR_CONTENT_TYPE: &str = "content-type";

/// Header for `date`
pub(crate) const HDR_DATE: &str = "date";

/// Prefix shared by all vendor headers that participate in signing.
pub(crate) const HDR_PREFIX_X_AMZ: &str = "x-amz";

/// Header for `x-amz-date`; excluded from the canonical headers.
pub(crate) const HDR_X_AMZ_DATE: &str = "x-amz-date";

/// Header for `x-amz-security-token`
pub(crate) const HDR_X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

/// Format of an HTTP date (RFC 1123, always in GMT).
pub(crate) const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Error message: `"Authorization header is invalid -- one and only one ' ' (space) required"`
pub(crate) const MSG_AUTH_HEADER_INVALID: &str =
    "Authorization header is invalid -- one and only one ' ' (space) required";

/// Error message: `"Request has expired"`
pub(crate) const MSG_REQUEST_EXPIRED: &str = "Request has expired";

/// Error message: `"The AWS Access Key Id you provided does not exist in our records."`
pub(crate) const MSG_INVALID_ACCESS_KEY_ID: &str = "The AWS Access Key Id you provided does not exist in our records.";

/// Error message: `"The request signature we calculated does not match the signature you provided. Check your key and signing method."`
pub(crate) const MSG_REQUEST_SIGNATURE_MISMATCH: &str =
    "The request signature we calculated does not match the signature you provided. Check your key and signing method.";

/// Error message: `"The difference between the request time and the current time is too large."`
pub(crate) const MSG_REQUEST_TIME_TOO_SKEWED: &str =
    "The difference between the request time and the current time is too large.";

/// Query parameters permitted in the canonicalized resource (S3 sub-resources).
///
/// Keep this sorted; membership is tested with a binary search.
pub(crate) const SUBRESOURCES: [&str; 16] = [
    "acl",
    "delete",
    "lifecycle",
    "location",
    "logging",
    "notification",
    "partNumber",
    "policy",
    "requestPayment",
    "torrent",
    "uploadId",
    "uploads",
    "versionId",
    "versioning",
    "versions",
    "website",
];
