use {
    crate::constants::HTTP_DATE_FORMAT,
    chrono::{DateTime, Utc},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// The date of a request as it participates in signing.
///
/// A [`Formatted`][SigningDate::Formatted] date is placed into the string to sign verbatim. A
/// [`Timestamp`][SigningDate::Timestamp] is rendered according to the signing mode: as an HTTP
/// date (`Tue, 01 Jan 2020 00:00:00 GMT`) for `Authorization` header signatures, or as Unix epoch
/// seconds (the `Expires` value) for presigned URLs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SigningDate {
    /// A structured UTC timestamp.
    Timestamp(DateTime<Utc>),

    /// A pre-formatted date string, used exactly as given.
    Formatted(String),
}

/// How a [`SigningDate::Timestamp`] is rendered into the string to sign.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DateRendering {
    /// RFC 1123 HTTP date in GMT.
    HttpDate,

    /// Decimal seconds since the Unix epoch.
    EpochSeconds,
}

impl SigningDate {
    /// Render this date for inclusion in a string to sign.
    pub(crate) fn render(&self, rendering: DateRendering) -> String {
        match (self, rendering) {
            (Self::Formatted(s), _) => s.clone(),
            (Self::Timestamp(ts), DateRendering::HttpDate) => ts.to_http_date(),
            (Self::Timestamp(ts), DateRendering::EpochSeconds) => ts.timestamp().to_string(),
        }
    }

    /// Interpret this date as a point in time, if possible.
    pub(crate) fn to_timestamp(&self, rendering: DateRendering) -> Option<DateTime<Utc>> {
        match (self, rendering) {
            (Self::Timestamp(ts), _) => Some(*ts),
            (Self::Formatted(s), DateRendering::HttpDate) => parse_http_date(s),
            (Self::Formatted(s), DateRendering::EpochSeconds) => parse_epoch_seconds(s),
        }
    }
}

impl Display for SigningDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Timestamp(ts) => f.write_str(&ts.to_http_date()),
            Self::Formatted(s) => f.write_str(s),
        }
    }
}

impl From<DateTime<Utc>> for SigningDate {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<&str> for SigningDate {
    fn from(s: &str) -> Self {
        Self::Formatted(s.to_string())
    }
}

impl From<String> for SigningDate {
    fn from(s: String) -> Self {
        Self::Formatted(s)
    }
}

pub(crate) trait ToHttpDate {
    fn to_http_date(&self) -> String;
}

impl ToHttpDate for DateTime<Utc> {
    fn to_http_date(&self) -> String {
        self.format(HTTP_DATE_FORMAT).to_string()
    }
}

/// Parse an HTTP date. S3 clients send both `GMT` and `+0000` forms; RFC 2822 parsing accepts
/// either.
pub(crate) fn parse_http_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s.trim()).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Parse a presigned URL `Expires` value.
pub(crate) fn parse_epoch_seconds(s: &str) -> Option<DateTime<Utc>> {
    let secs = s.trim().parse::<i64>().ok()?;
    DateTime::<Utc>::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use {
        super::{parse_epoch_seconds, parse_http_date, DateRendering, SigningDate},
        chrono::{DateTime, TimeZone, Utc},
    };

    fn jan_1_2020() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).single().expect("valid date")
    }

    #[test_log::test]
    fn test_render_timestamp() {
        let date = SigningDate::from(jan_1_2020());
        assert_eq!(date.render(DateRendering::HttpDate), "Wed, 01 Jan 2020 00:00:00 GMT");
        assert_eq!(date.render(DateRendering::EpochSeconds), "1577836800");
        assert_eq!(date.to_string(), "Wed, 01 Jan 2020 00:00:00 GMT");
    }

    #[test_log::test]
    fn test_render_formatted_is_verbatim() {
        let date = SigningDate::from("Tue, 01 Jan 2020 00:00:00 GMT");
        assert_eq!(date.render(DateRendering::HttpDate), "Tue, 01 Jan 2020 00:00:00 GMT");
        assert_eq!(date.render(DateRendering::EpochSeconds), "Tue, 01 Jan 2020 00:00:00 GMT");

        let date = SigningDate::from("123456".to_string());
        assert_eq!(date.render(DateRendering::EpochSeconds), "123456");
    }

    #[test_log::test]
    fn test_parse() {
        assert_eq!(parse_http_date("Wed, 01 Jan 2020 00:00:00 GMT"), Some(jan_1_2020()));
        assert_eq!(parse_http_date("Wed, 01 Jan 2020 00:00:00 +0000"), Some(jan_1_2020()));
        assert_eq!(parse_http_date("Wed, 01 Jan 2020 01:00:00 +0100"), Some(jan_1_2020()));
        assert_eq!(parse_http_date("20200101T000000Z"), None);

        assert_eq!(parse_epoch_seconds("1577836800"), Some(jan_1_2020()));
        assert_eq!(parse_epoch_seconds("soon"), None);

        let date = SigningDate::from("1577836800");
        assert_eq!(date.to_timestamp(DateRendering::EpochSeconds), Some(jan_1_2020()));
        assert_eq!(date.to_timestamp(DateRendering::HttpDate), None);
    }
}
