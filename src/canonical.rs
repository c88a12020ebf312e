//! Canonicalization functionality for signature generation and validation.
//!
//! AWS SigV2 signs two normalized views of a request: the vendor (`x-amz-*`) headers, and the
//! resource path together with any S3 sub-resource query parameters.
//!
//! **Stability of the helpers in this module is not guaranteed except for items exposed at the
//! crate root**. They are exposed with the `unstable` feature for testing purposes only.

use {
    crate::{
        constants::{HDR_PREFIX_X_AMZ, HDR_X_AMZ_DATE, SUBRESOURCES},
        SignatureError,
    },
    http::uri::Uri,
    log::trace,
    qualifier_attr::qualifiers,
};

/// Canonicalize the vendor headers of a request.
///
/// Header names are lowercased; only names starting with `x-amz` are retained, except
/// `x-amz-date`, which is carried in the date line instead. The retained headers are sorted by
/// name and emitted as `name:value` lines joined by `\n`, with no trailing newline. Leading and
/// trailing whitespace is trimmed from each value. Headers whose names differ only in case (or
/// that repeat) are merged into a single line, their values joined by `,`. Case variants are
/// ordered by their original spelling (byte order, so `X-Amz-Meta-A` before `x-amz-meta-a`), and
/// repeats of the same spelling keep their input order. The output of a map is therefore the same
/// regardless of the map's iteration order.
///
/// The result is empty if no header qualifies.
///
/// ```
/// # use scratchstack_aws_signature_v2::canonicalize_headers;
/// let headers = [("X-Amz-Meta-Foo", "bar"), ("Content-Type", "text/plain"), ("x-amz-date", "ignored")];
/// assert_eq!(canonicalize_headers(headers), "x-amz-meta-foo:bar");
/// ```
pub fn canonicalize_headers<I, K, V>(headers: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut entries: Vec<(String, K, V)> = headers
        .into_iter()
        .filter_map(|(name, value)| {
            let lower_name = name.as_ref().to_lowercase();
            if is_signed_header(&lower_name) {
                Some((lower_name, name, value))
            } else {
                None
            }
        })
        .collect();

    // Stable: values for the same spelling stay in input order.
    entries.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.as_ref().cmp(b.1.as_ref())));

    let mut result = String::new();
    let mut last_name: Option<&str> = None;

    for (name, _, value) in entries.iter() {
        let value = normalize_header_value(value.as_ref());
        if last_name == Some(name.as_str()) {
            result.push(',');
        } else {
            if last_name.is_some() {
                result.push('\n');
            }
            result.push_str(name);
            result.push(':');
            last_name = Some(name.as_str());
        }
        result.push_str(value);
    }

    result
}

/// Canonicalize a URI-encoded resource (path plus optional query string).
///
/// The path is kept as-is. Query parameters that are S3 sub-resources (`acl`, `uploadId`, ...) are
/// kept as `key` (bare or empty value) or `key=value`, sorted, and joined with `&` after a `?`.
/// All other query parameters are dropped. If no sub-resource is present, no `?` is emitted.
///
/// Keys and values are not decoded or re-encoded.
///
/// ```
/// # use scratchstack_aws_signature_v2::canonicalize_resource;
/// assert_eq!(canonicalize_resource("/bucket/obj?acl&foo=1&uploadId=42").unwrap(), "/bucket/obj?acl&uploadId=42");
/// assert_eq!(canonicalize_resource("/bucket/obj?foo=1").unwrap(), "/bucket/obj");
/// ```
pub fn canonicalize_resource(resource: &str) -> Result<String, SignatureError> {
    if resource.is_empty() {
        return Err(SignatureError::MissingRequiredField("Missing required field: resource".to_string()));
    }

    let uri = resource
        .parse::<Uri>()
        .map_err(|e| SignatureError::MalformedInput(format!("Invalid resource '{}': {}", resource, e)))?;

    let mut subresources: Vec<String> = split_query(uri.query().unwrap_or(""))
        .filter(|(key, _)| is_subresource(key))
        .map(|(key, value)| match value {
            Some(value) if !value.is_empty() => format!("{}={}", key, value),
            _ => key.to_string(),
        })
        .collect();

    subresources.sort_unstable();

    let mut result = uri.path().to_string();
    if !subresources.is_empty() {
        result.push('?');
        result.push_str(&subresources.join("&"));
    }

    trace!("Canonical resource for {}: {}", resource, result);
    Ok(result)
}

/// Indicates whether the lowercased header name participates in the canonical headers.

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[inline(always)]
fn is_signed_header(lower_name: &str) -> bool {
    lower_name.starts_with(HDR_PREFIX_X_AMZ) && lower_name != HDR_X_AMZ_DATE
}

/// Indicates whether the query parameter key is an S3 sub-resource. Comparison is case-sensitive.

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[inline(always)]
fn is_subresource(key: &str) -> bool {
    SUBRESOURCES.binary_search(&key).is_ok()
}

/// Trims whitespace around a header value. Interior whitespace is left alone.

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[inline(always)]
fn normalize_header_value(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Split a raw query string into `(key, value)` pairs without decoding. A parameter without `=`
/// (e.g. `acl` in `?acl`) has no value. Empty segments are skipped.

#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn split_query<'a>(query: &'a str) -> impl Iterator<Item = (&'a str, Option<&'a str>)> {
    query.split('&').filter(|part| !part.is_empty()).map(|part| match part.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (part, None),
    })
}

#[cfg(test)]
mod tests {
    use {
        super::{canonicalize_headers, canonicalize_resource, is_subresource, normalize_header_value, split_query},
        crate::{constants::SUBRESOURCES, SignatureError},
        std::collections::HashMap,
    };

    macro_rules! expect_err {
        ($test:expr, $expected:ident) => {
            match $test {
                Ok(ref v) => panic!("Expected Err({}); got Ok({:?})", stringify!($expected), v),
                Err(ref e) => match e {
                    SignatureError::$expected(_) => e.to_string(),
                    _ => panic!("Expected {}; got {:#?}: {}", stringify!($expected), &e, &e),
                },
            }
        };
    }

    #[test_log::test]
    fn headers_filtered_and_lowercased() {
        let mut headers = HashMap::new();
        headers.insert("X-Amz-Meta-Foo".to_string(), "bar".to_string());
        headers.insert("Content-Type".to_string(), "text/plain".to_string());
        headers.insert("x-amz-date".to_string(), "ignored".to_string());
        assert_eq!(canonicalize_headers(&headers), "x-amz-meta-foo:bar");
    }

    #[test_log::test]
    fn headers_empty() {
        assert_eq!(canonicalize_headers(Vec::<(String, String)>::new()), "");
        assert_eq!(canonicalize_headers([("Host", "example.com"), ("X-Amz-Date", "now")]), "");
    }

    #[test_log::test]
    fn headers_sorted_by_lowercase_name() {
        let headers = [
            ("x-amz-meta-zed", "1"),
            ("X-AMZ-ACL", "private"),
            ("x-amz-Meta-Alpha", "Mixed Case Value"),
            ("x-amzfoo", "2"),
        ];
        assert_eq!(
            canonicalize_headers(headers),
            "x-amz-acl:private\nx-amz-meta-alpha:Mixed Case Value\nx-amz-meta-zed:1\nx-amzfoo:2"
        );
    }

    #[test_log::test]
    fn headers_values_are_trimmed() {
        // Whitespace between the colon and the value is removed; interior whitespace is kept.
        let headers = [("x-amz-meta-a", "  spaced  out \t"), ("x-amz-meta-b", "\tb")];
        assert_eq!(canonicalize_headers(headers), "x-amz-meta-a:spaced  out\nx-amz-meta-b:b");
        assert_eq!(normalize_header_value(" x "), "x");
    }

    #[test_log::test]
    fn headers_duplicates_are_merged() {
        let headers = [
            ("X-Amz-Meta-ReviewedBy", "joe@johnsmith.net"),
            ("x-amz-acl", "public-read"),
            ("x-amz-meta-reviewedby", "jane@johnsmith.net"),
        ];
        assert_eq!(
            canonicalize_headers(headers),
            "x-amz-acl:public-read\nx-amz-meta-reviewedby:joe@johnsmith.net,jane@johnsmith.net"
        );
    }

    #[test_log::test]
    fn headers_case_variants_ordered_by_spelling() {
        let mut headers = HashMap::new();
        headers.insert("x-amz-meta-a", "lower");
        headers.insert("X-Amz-Meta-A", "title");
        headers.insert("X-AMZ-META-A", "upper");
        assert_eq!(canonicalize_headers(&headers), "x-amz-meta-a:upper,title,lower");

        // Input order does not matter across spellings, only within one.
        let headers = [("x-amz-meta-a", "2"), ("X-Amz-Meta-A", "1"), ("x-amz-meta-a", "3")];
        assert_eq!(canonicalize_headers(headers), "x-amz-meta-a:1,2,3");
    }

    #[test_log::test]
    fn resource_whitelist() {
        assert_eq!(canonicalize_resource("/bucket/obj?acl&foo=1&uploadId=42").unwrap(), "/bucket/obj?acl&uploadId=42");
        assert_eq!(canonicalize_resource("/bucket/obj?foo=1").unwrap(), "/bucket/obj");
        assert_eq!(canonicalize_resource("/bucket/obj").unwrap(), "/bucket/obj");
        assert_eq!(canonicalize_resource("/bucket/obj?").unwrap(), "/bucket/obj");
        assert_eq!(canonicalize_resource("/johnsmith/?acl").unwrap(), "/johnsmith/?acl");
    }

    #[test_log::test]
    fn resource_sorted_and_bare_flags() {
        assert_eq!(
            canonicalize_resource("/b/k?versionId=3&uploads&acl=&partNumber=2&prefix=x").unwrap(),
            "/b/k?acl&partNumber=2&uploads&versionId=3"
        );

        // Sub-resource names are case-sensitive.
        assert_eq!(canonicalize_resource("/b/k?ACL&uploadid=1").unwrap(), "/b/k");
    }

    #[test_log::test]
    fn resource_not_decoded() {
        assert_eq!(
            canonicalize_resource("/b/a%20key?versionId=abc%2Fdef&response-content-type=x").unwrap(),
            "/b/a%20key?versionId=abc%2Fdef"
        );
    }

    #[test_log::test]
    fn resource_invalid() {
        let e = expect_err!(canonicalize_resource(""), MissingRequiredField);
        assert_eq!(e, "Missing required field: resource");

        let e = expect_err!(canonicalize_resource("/bad path"), MalformedInput);
        assert!(e.starts_with("Invalid resource '/bad path': "));
    }

    #[test_log::test]
    fn subresources_sorted() {
        let mut sorted = SUBRESOURCES;
        sorted.sort_unstable();
        assert_eq!(sorted, SUBRESOURCES);
        for key in SUBRESOURCES.iter() {
            assert!(is_subresource(key));
        }
        assert!(!is_subresource("prefix"));
    }

    #[test_log::test]
    fn query_split() {
        let parts: Vec<_> = split_query("a=1&&b&c=&d=x=y").collect();
        assert_eq!(parts, vec![("a", Some("1")), ("b", None), ("c", Some("")), ("d", Some("x=y"))]);
    }
}
