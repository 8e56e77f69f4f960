use quotedesk_core::schema::FieldViolation;
use serde::Deserialize;

/// Errors returned by [`ApiClient`](crate::ApiClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {error}")]
    Api {
        status: u16,
        /// `code` from the error body, e.g. `NOT_FOUND`.
        code: Option<String>,
        error: String,
        /// Field violations, present on validation failures.
        details: Vec<FieldViolation>,
    },
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a status and the raw error body.
    ///
    /// Bodies that are not the server's JSON error shape are kept verbatim
    /// in `error`.
    pub fn from_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: String,
            code: Option<String>,
            #[serde(default)]
            details: Vec<FieldViolation>,
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => ClientError::Api {
                status,
                code: parsed.code,
                error: parsed.error,
                details: parsed.details,
            },
            Err(_) => ClientError::Api {
                status,
                code: None,
                error: body.to_string(),
                details: Vec::new(),
            },
        }
    }

    /// HTTP status of an API error, `None` for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_validation_body() {
        let body = r#"{
            "error": "Invalid data",
            "code": "VALIDATION_ERROR",
            "details": [{"path": "prices.1.amount", "message": "Price cannot be negative", "code": "range"}]
        }"#;
        let err = ClientError::from_body(400, body);
        assert_matches!(
            err,
            ClientError::Api { status: 400, ref code, ref details, .. }
                if code.as_deref() == Some("VALIDATION_ERROR") && details[0].path == "prices.1.amount"
        );
    }

    #[test]
    fn parses_body_without_details() {
        let err = ClientError::from_body(404, r#"{"error": "Quote with id x not found", "code": "NOT_FOUND"}"#);
        assert!(err.is_not_found());
        assert_matches!(err, ClientError::Api { details, .. } if details.is_empty());
    }

    #[test]
    fn keeps_non_json_body_verbatim() {
        let err = ClientError::from_body(502, "Bad Gateway");
        assert_matches!(err, ClientError::Api { status: 502, code: None, error, .. } if error == "Bad Gateway");
    }
}
