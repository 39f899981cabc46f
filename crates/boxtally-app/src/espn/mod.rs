// ESPN fantasy baseball API: HTTP client and response decoding.

pub mod client;
pub mod types;

use reqwest::StatusCode;
use thiserror::Error;

pub use client::EspnClient;

#[derive(Debug, Error)]
pub enum EspnError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error(
        "ESPN rejected the request to {url} ({status}); \
         private leagues need espn_s2 and SWID credentials"
    )]
    Unauthorized { url: String, status: StatusCode },

    #[error("ESPN returned {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("failed to decode response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },

    #[error("espn_s2 or SWID contains characters that can't be sent in a cookie header")]
    InvalidCredentials,

    #[error("ESPN response is missing `{0}`")]
    MissingField(&'static str),
}
