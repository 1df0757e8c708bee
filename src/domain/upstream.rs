//! Upstream gateway result type.

/// What the upstream backend answered for one feed call.
///
/// Deliberately transport-free: status code, content type and raw body bytes,
/// nothing from any particular HTTP client. The body stays as received so a
/// forwarded response is byte-identical to the upstream's.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON, `None` if it isn't.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> UpstreamResponse {
        UpstreamResponse {
            status,
            content_type: None,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn two_xx_is_success() {
        assert!(response(200, "").is_success());
        assert!(response(204, "").is_success());
        assert!(!response(199, "").is_success());
        assert!(!response(301, "").is_success());
        assert!(!response(404, "").is_success());
        assert!(!response(503, "").is_success());
    }

    #[test]
    fn json_parses_valid_body() {
        let parsed = response(200, r#"{"s":"ok"}"#).json().unwrap();
        assert_eq!(parsed["s"], "ok");
    }

    #[test]
    fn json_rejects_invalid_body() {
        assert!(response(200, "<html>oops</html>").json().is_none());
        assert!(response(200, "").json().is_none());
    }
}
