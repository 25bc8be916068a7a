//! HTTP transport types for the NanManager API.
//!
//! # Design
//! Requests and responses are plain data. `NanManagerClient` builds an
//! `HttpRequest`, hands it to a `Transport`, and decodes the returned
//! `HttpResponse`. Nothing here performs I/O, so request construction and
//! response decoding can be tested by feeding canned values.

use url::form_urlencoded;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A value that can be rendered into a query string.
///
/// Booleans render as literal `true`/`false`; enum filters render as their
/// integer wire value.
pub trait QueryValue {
    fn to_query_value(&self) -> String;
}

macro_rules! display_query_value {
    ($($ty:ty),*) => {
        $(impl QueryValue for $ty {
            fn to_query_value(&self) -> String {
                self.to_string()
            }
        })*
    };
}

display_query_value!(i32, i64, u32, u64, bool, String);

impl QueryValue for str {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> String {
        (**self).to_query_value()
    }
}

/// Ordered query parameters. Absent optional values are never recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter unconditionally.
    pub fn push<V: QueryValue>(mut self, key: &str, value: V) -> Self {
        self.pairs.push((key.to_string(), value.to_query_value()));
        self
    }

    /// Append a parameter only when `value` is present.
    pub fn push_opt<V: QueryValue>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render as `a=1&b=two`, percent-encoded, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// An HTTP request described as plain data.
///
/// `path` already contains the base URL; `query` is appended by `url()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: QueryParams,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Full request URL including the encoded query string.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.to_query_string())
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Any response the server actually sent is represented here, whatever its
/// status. Classification happens in `envelope::decode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_parameters_are_dropped() {
        let query = QueryParams::new()
            .push_opt("page", Some(2))
            .push_opt::<i32>("page_size", None)
            .push_opt::<&str>("search", None);
        assert_eq!(query.to_query_string(), "page=2");
        assert!(query.get("page_size").is_none());
    }

    #[test]
    fn booleans_render_lowercase() {
        let query = QueryParams::new()
            .push("online_only", true)
            .push("banned_only", false);
        assert_eq!(query.to_query_string(), "online_only=true&banned_only=false");
    }

    #[test]
    fn values_are_percent_encoded() {
        let query = QueryParams::new().push("search", "steve & alex");
        assert_eq!(query.to_query_string(), "search=steve+%26+alex");
    }

    #[test]
    fn url_without_query_has_no_question_mark() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            path: "http://localhost:8080/api/v1/players".to_string(),
            query: QueryParams::new(),
            headers: Vec::new(),
            body: None,
        };
        assert_eq!(req.url(), "http://localhost:8080/api/v1/players");
    }

    #[test]
    fn url_keeps_parameter_order() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            path: "http://localhost:8080/api/v1/players".to_string(),
            query: QueryParams::new().push("page_size", 10).push("page", 1),
            headers: Vec::new(),
            body: None,
        };
        assert_eq!(
            req.url(),
            "http://localhost:8080/api/v1/players?page_size=10&page=1"
        );
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            path: String::new(),
            query: QueryParams::new(),
            headers: vec![("X-API-Token".to_string(), "abc".to_string())],
            body: None,
        };
        assert_eq!(req.header("x-api-token"), Some("abc"));
    }
}
