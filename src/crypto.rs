use {
    crate::SignatureError,
    base64::{engine::general_purpose::STANDARD, Engine},
    hmac::{Hmac, Mac},
    md5::{Digest, Md5},
    sha1::Sha1,
};

/// Length of a SHA-1 digest (and therefore of an HMAC-SHA1 tag), in bytes.
pub(crate) const SHA1_OUTPUT_LEN: usize = 20;

type HmacSha1 = Hmac<Sha1>;

/// Wrapper function to form a HMAC-SHA1 operation.
#[inline(always)]
pub(crate) fn hmac_sha1(key: &[u8], value: &[u8]) -> [u8; SHA1_OUTPUT_LEN] {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(value);
    let mut result = [0u8; SHA1_OUTPUT_LEN];
    result.copy_from_slice(&mac.finalize().into_bytes());
    result
}

/// Base64-encoded HMAC-SHA1 of `value` keyed by `key`.
#[inline(always)]
pub(crate) fn hmac_sha1_base64(key: &[u8], value: &[u8]) -> String {
    base64_encode(hmac_sha1(key, value))
}

/// Encode bytes as standard (padded) base64.
pub fn base64_encode<T: AsRef<[u8]>>(data: T) -> String {
    STANDARD.encode(data)
}

/// Decode standard (padded) base64 into bytes.
pub fn base64_decode<T: AsRef<[u8]>>(data: T) -> Result<Vec<u8>, SignatureError> {
    STANDARD.decode(data).map_err(|e| SignatureError::MalformedInput(format!("Invalid base64 data: {}", e)))
}

/// Compute a `Content-MD5` header value for a request body: the base64-encoded MD5 digest of the
/// body bytes.
///
/// This is a content digest only; it plays no part in computing signatures.
pub fn content_md5<T: AsRef<[u8]>>(body: T) -> String {
    base64_encode(Md5::digest(body.as_ref()))
}
