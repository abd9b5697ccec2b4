/// Failures reported by the FreshRSS and Karakeep clients
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("API error: {0}")]
    Api(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClientError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = if body.is_empty() {
            status.to_string()
        } else {
            format!("{}: {}", status, body)
        };
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                ClientError::Authentication(detail)
            }
            _ => ClientError::Api(detail),
        }
    }

    /// Whether this is one of the two expected collaborator failure kinds
    pub fn is_expected(&self) -> bool {
        matches!(self, ClientError::Authentication(_) | ClientError::Api(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Other(anyhow::Error::new(err).context("malformed response body"))
        } else {
            ClientError::Api(err.to_string())
        }
    }
}
