//! HTTP described as plain data.
//!
//! The client never touches a socket: it hands the host an `HttpRequest` and
//! gets an `HttpResponse` back. The browser app executes these with
//! `gloo-net`; integration tests execute them with a blocking native client.
//! Owned fields keep the values trivially movable across `spawn_local`.

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A request the host should execute.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: String, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }

    /// Append a header, keeping any already present.
    pub fn with_header(mut self, name: &str, value: String) -> Self {
        self.headers.push((name.to_string(), value));
        self
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The outcome the host hands back.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpMethod, HttpRequest, HttpResponse};

    #[test]
    fn post_carries_a_json_content_type() {
        let req = HttpRequest::post("http://x/register".into(), "{}".into());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest::get("http://x".into()).with_header("Authorization", "Bearer t".into());
        assert_eq!(req.header("authorization"), Some("Bearer t"));
    }

    #[test]
    fn success_is_the_whole_2xx_range() {
        for status in [200u16, 201, 204, 299] {
            assert!(
                HttpResponse {
                    status,
                    body: String::new()
                }
                .is_success()
            );
        }
        for status in [199u16, 301, 404, 500] {
            assert!(
                !HttpResponse {
                    status,
                    body: String::new()
                }
                .is_success()
            );
        }
    }
}
