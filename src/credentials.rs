use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

/// An AWS access key and its secret key, supplied per signing call.
///
/// The secret key is never included in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
    access_key: String,
    secret_key: String,
}

impl CredentialPair {
    /// Create a new credential pair.
    pub fn new<A: Into<String>, S: Into<String>>(access_key: A, secret_key: S) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Retrieve the access key.
    #[inline(always)]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Retrieve the raw secret key bytes used to key the HMAC.
    #[inline(always)]
    pub(crate) fn secret_key(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }
}

impl Debug for CredentialPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CredentialPair").field("access_key", &self.access_key).finish_non_exhaustive()
    }
}

impl Display for CredentialPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.access_key)
    }
}
