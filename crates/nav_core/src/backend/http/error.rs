use thiserror::Error;

/// Errors encountered while talking to the routing service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(reqwest::Error),
    #[error("invalid response body: {0}")]
    Json(reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("no route found")]
    NoRoute,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err)
    }
}
