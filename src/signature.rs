use {
    crate::{
        canonical::{canonicalize_headers, canonicalize_resource},
        chronoutil::DateRendering,
        constants::{AWS_AUTH_PREFIX, HDR_X_AMZ_SECURITY_TOKEN},
        crypto::hmac_sha1_base64,
        CredentialPair, RequestDescription, SignatureError,
    },
    http::method::Method,
    log::trace,
    std::borrow::Cow,
};

/// Where the signature will be delivered, which determines the layout of the string to sign.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SigningMode {
    /// The signature goes into an `Authorization: AWS <access-key>:<signature>` header.
    #[default]
    HeaderAuth,

    /// The signature goes into the `Signature` query parameter of a presigned URL.
    QueryAuth,
}

/// Per-mode rules for filling in the string to sign.
#[derive(Debug)]
struct ModePolicy {
    /// Verb used when the request description does not specify one. `None` means the verb is
    /// required.
    default_verb: Option<Method>,

    /// Whether the Content-MD5 line carries the request's value; otherwise it is always empty.
    sign_content_md5: bool,

    /// Whether a session token is signed as an `x-amz-security-token` line.
    sign_security_token: bool,

    /// How a structured date is rendered.
    date_rendering: DateRendering,

    /// Whether the resource is reduced to its path and sub-resources. Otherwise it is signed as
    /// given, query string included.
    canonicalize_resource: bool,
}

static HEADER_AUTH_POLICY: ModePolicy = ModePolicy {
    default_verb: None,
    sign_content_md5: true,
    sign_security_token: false,
    date_rendering: DateRendering::HttpDate,
    canonicalize_resource: true,
};

static QUERY_AUTH_POLICY: ModePolicy = ModePolicy {
    default_verb: Some(Method::GET),
    sign_content_md5: false,
    sign_security_token: true,
    date_rendering: DateRendering::EpochSeconds,
    canonicalize_resource: false,
};

impl SigningMode {
    #[inline(always)]
    fn policy(self) -> &'static ModePolicy {
        match self {
            Self::HeaderAuth => &HEADER_AUTH_POLICY,
            Self::QueryAuth => &QUERY_AUTH_POLICY,
        }
    }

    /// How a structured request date is interpreted in this mode.
    #[inline(always)]
    pub(crate) fn date_rendering(self) -> DateRendering {
        self.policy().date_rendering
    }
}

/// Return the string to sign for the request.
///
/// In [`HeaderAuth`][SigningMode::HeaderAuth] mode:
/// ```text
/// <verb>
/// <content-md5>
/// <content-type>
/// <date>
/// [<canonical-headers>\n]<canonical-resource>
/// ```
///
/// In [`QueryAuth`][SigningMode::QueryAuth] mode the verb defaults to `GET`, the Content-MD5 line is
/// always empty, the date is the expiration time, a session token (if any) is signed on its own
/// line, and the resource is signed exactly as given:
/// ```text
/// <verb>
///
/// <content-type>
/// <expires>
/// [<canonical-headers>\n][x-amz-security-token:<token>\n]<resource>
/// ```
///
/// In both modes the canonical-headers line is omitted when no header qualifies; an empty line is
/// never emitted in its place.
pub fn string_to_sign(request: &RequestDescription, mode: SigningMode) -> Result<String, SignatureError> {
    let policy = mode.policy();

    let verb = match (request.verb(), &policy.default_verb) {
        (Some(verb), _) => verb.as_str(),
        (None, Some(verb)) => verb.as_str(),
        (None, None) => return Err(SignatureError::MissingRequiredField("Missing required field: verb".to_string())),
    };

    let content_md5 = if policy.sign_content_md5 {
        request.content_md5()
    } else {
        ""
    };

    let date = request.date().render(policy.date_rendering);
    let canonical_headers = canonicalize_headers(request.headers().iter().map(|(name, value)| (name, value)));
    let canonical_resource = if policy.canonicalize_resource {
        Cow::Owned(canonicalize_resource(request.resource())?)
    } else if request.resource().is_empty() {
        return Err(SignatureError::MissingRequiredField("Missing required field: resource".to_string()));
    } else {
        Cow::Borrowed(request.resource())
    };

    let mut result = String::with_capacity(
        verb.len()
            + content_md5.len()
            + request.content_type().len()
            + date.len()
            + canonical_headers.len()
            + canonical_resource.len()
            + 8,
    );

    for line in [verb, content_md5, request.content_type(), date.as_str()] {
        result.push_str(line);
        result.push('\n');
    }

    if !canonical_headers.is_empty() {
        result.push_str(&canonical_headers);
        result.push('\n');
    }

    if policy.sign_security_token {
        if let Some(token) = request.security_token() {
            result.push_str(HDR_X_AMZ_SECURITY_TOKEN);
            result.push(':');
            result.push_str(token);
            result.push('\n');
        }
    }

    result.push_str(&canonical_resource);

    trace!("String to sign ({:?}):\n{}", mode, result);
    Ok(result)
}

/// Compute the base64-encoded HMAC-SHA1 signature of the request.
pub fn sign(
    request: &RequestDescription,
    credentials: &CredentialPair,
    mode: SigningMode,
) -> Result<String, SignatureError> {
    let string_to_sign = string_to_sign(request, mode)?;
    Ok(hmac_sha1_base64(credentials.secret_key(), string_to_sign.as_bytes()))
}

/// Return the `Authorization` header value for the request: `AWS <access-key>:<signature>`.
pub fn authorization_header_value(
    request: &RequestDescription,
    credentials: &CredentialPair,
) -> Result<String, SignatureError> {
    let signature = sign(request, credentials, SigningMode::HeaderAuth)?;
    Ok(format!("{}{}:{}", AWS_AUTH_PREFIX, credentials.access_key(), signature))
}
