use {
    crate::{
        constants::{HDR_CONTENT_MD5, HDR_CONTENT_TYPE, HDR_DATE, HDR_X_AMZ_DATE},
        SignatureError, SigningDate,
    },
    derive_builder::Builder,
    http::{
        header::{HeaderMap, HeaderValue},
        method::Method,
        request::Parts,
    },
    log::trace,
};

/// The parts of an HTTP request that participate in an AWS SigV2 signature.
///
/// RequestDescription structs are immutable. Use [RequestDescriptionBuilder] to construct one, or
/// [from_http_request_parts][Self::from_http_request_parts] to extract one from an HTTP request.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(error = "SignatureError"), derive(Debug))]
pub struct RequestDescription {
    /// The HTTP method. Required for `Authorization` header signatures; presigned URLs default to
    /// `GET`.
    #[builder(setter(into, strip_option), default)]
    verb: Option<Method>,

    /// The base64-encoded MD5 digest of the body, or empty.
    #[builder(setter(into), default)]
    content_md5: String,

    /// The content type of the body, or empty.
    #[builder(setter(into), default)]
    content_type: String,

    /// The request date. For presigned URLs this is the expiration time.
    #[builder(setter(into))]
    date: SigningDate,

    /// The URI-encoded resource path, including any query string.
    #[builder(setter(into))]
    resource: String,

    /// Request headers, in any case and any order.
    #[builder(setter(into), default)]
    headers: Vec<(String, String)>,

    /// A session token; signed only for presigned URLs.
    #[builder(setter(into, strip_option), default)]
    security_token: Option<String>,
}

impl RequestDescription {
    /// Create a [RequestDescriptionBuilder] to construct a [RequestDescription].
    #[inline]
    pub fn builder() -> RequestDescriptionBuilder {
        RequestDescriptionBuilder::default()
    }

    /// Extract a request description from HTTP request [Parts].
    ///
    /// The resource is taken from the request's path and query string as-is. For virtual-host
    /// style requests, the caller must add the bucket to the path before signing.
    ///
    /// The date comes from the `Date` header, or from `x-amz-date` if `Date` is absent.
    pub fn from_http_request_parts(parts: &Parts) -> Result<Self, SignatureError> {
        let mut headers = Vec::with_capacity(parts.headers.len());
        for (name, value) in parts.headers.iter() {
            headers.push((name.as_str().to_string(), header_value_to_string(name.as_str(), value)?));
        }

        let date = match get_header(&parts.headers, HDR_DATE)? {
            Some(date) => date,
            None => match get_header(&parts.headers, HDR_X_AMZ_DATE)? {
                Some(date) => {
                    trace!("No Date header; using x-amz-date for the date line");
                    date
                }
                None => return Err(SignatureError::MissingRequiredField("Missing required field: date".to_string())),
            },
        };

        let resource = match parts.uri.path_and_query() {
            Some(pq) => pq.as_str().to_string(),
            None => "/".to_string(),
        };

        Ok(Self {
            verb: Some(parts.method.clone()),
            content_md5: get_header(&parts.headers, HDR_CONTENT_MD5)?.unwrap_or_default(),
            content_type: get_header(&parts.headers, HDR_CONTENT_TYPE)?.unwrap_or_default(),
            date: SigningDate::Formatted(date),
            resource,
            headers,
            security_token: None,
        })
    }

    /// Retrieve the HTTP method, if one was specified.
    #[inline]
    pub fn verb(&self) -> Option<&Method> {
        self.verb.as_ref()
    }

    /// Retrieve the base64-encoded MD5 digest of the body.
    #[inline]
    pub fn content_md5(&self) -> &str {
        &self.content_md5
    }

    /// Retrieve the content type.
    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Retrieve the request date.
    #[inline]
    pub fn date(&self) -> &SigningDate {
        &self.date
    }

    /// Retrieve the URI-encoded resource.
    #[inline]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Retrieve the request headers.
    #[inline]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Retrieve the session token.
    #[inline]
    pub fn security_token(&self) -> Option<&str> {
        self.security_token.as_deref()
    }
}

impl RequestDescriptionBuilder {
    /// Append a single header.
    pub fn header<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) -> &mut Self {
        self.headers.get_or_insert_with(Vec::new).push((name.into(), value.into()));
        self
    }
}

fn get_header(headers: &HeaderMap<HeaderValue>, name: &str) -> Result<Option<String>, SignatureError> {
    match headers.get(name) {
        Some(value) => Ok(Some(header_value_to_string(name, value)?)),
        None => Ok(None),
    }
}

fn header_value_to_string(name: &str, value: &HeaderValue) -> Result<String, SignatureError> {
    match value.to_str() {
        Ok(s) => Ok(s.to_string()),
        Err(_) => Err(SignatureError::MalformedInput(format!("Header {} contains a non-visible-ASCII value", name))),
    }
}
