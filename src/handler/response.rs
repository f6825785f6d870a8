//! HTTP Response Envelope
//!
//! The gateway in front of the function expects a proxy-integration response:
//!
//! ```text
//! {
//!   "statusCode": 200,
//!   "headers": {
//!     "Access-Control-Allow-Origin": "*",
//!     "Content-Type": "application/json"
//!   },
//!   "body": "{\"visitors\": \"43\"}"
//! }
//! ```
//!
//! The body is a JSON document carried as a string. It is encoded with a space
//! after every `:` and `,` so the bytes clients see are exactly
//! `{"visitors": "43"}`.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io;

/// Status code of every successful response.
pub const STATUS_OK: u16 = 200;

pub const HEADER_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// The response handed back to the invoking platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<&'static str, &'static str>,
    pub body: String,
}

/// JSON body of a counter response.
#[derive(Debug, Serialize)]
struct VisitorsBody {
    visitors: String,
}

impl ResponseEnvelope {
    /// Builds the 200 response reporting `visitors`.
    ///
    /// # Example
    ///
    /// ```
    /// use visitor_counter::handler::ResponseEnvelope;
    ///
    /// let response = ResponseEnvelope::visitors(43).unwrap();
    /// assert_eq!(response.status_code, 200);
    /// assert_eq!(response.body, r#"{"visitors": "43"}"#);
    /// ```
    pub fn visitors(visitors: i64) -> serde_json::Result<Self> {
        let body = to_spaced_json(&VisitorsBody {
            visitors: visitors.to_string(),
        })?;

        Ok(Self {
            status_code: STATUS_OK,
            headers: default_headers(),
            body,
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).copied()
    }
}

/// The fixed CORS and content-type headers.
fn default_headers() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        (HEADER_ALLOW_ORIGIN, "*"),
        (HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON),
    ])
}

/// Compact JSON with `": "` and `", "` separators.
#[derive(Debug, Clone, Copy, Default)]
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    #[inline]
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serializes `value` with [`SpacedFormatter`].
pub fn to_spaced_json<T>(value: &T) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(64);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visitors_body() {
        assert_eq!(
            ResponseEnvelope::visitors(43).unwrap().body,
            r#"{"visitors": "43"}"#
        );
        assert_eq!(
            ResponseEnvelope::visitors(1).unwrap().body,
            r#"{"visitors": "1"}"#
        );
    }

    #[test]
    fn test_headers() {
        let response = ResponseEnvelope::visitors(7).unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.headers.len(), 2);
    }

    #[test]
    fn test_envelope_field_names() {
        let value = serde_json::to_value(ResponseEnvelope::visitors(5).unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "statusCode": 200,
                "headers": {
                    "Access-Control-Allow-Origin": "*",
                    "Content-Type": "application/json"
                },
                "body": "{\"visitors\": \"5\"}"
            })
        );
    }

    #[test]
    fn test_spaced_json() {
        let value = json!({"a": [1, 2, 3], "b": {"c": null}});
        assert_eq!(
            to_spaced_json(&value).unwrap(),
            r#"{"a": [1, 2, 3], "b": {"c": null}}"#
        );

        assert_eq!(to_spaced_json(&json!({})).unwrap(), "{}");
        assert_eq!(to_spaced_json(&json!([])).unwrap(), "[]");
    }
}
