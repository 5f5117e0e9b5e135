// API client module: a small blocking HTTP client that talks to the
// Seven Bridges Cancer Genomics Cloud (CGC) REST API. It is intentionally
// synchronous: one command issues one sequence of requests and exits.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Public CGC API endpoint, versioned.
pub const DEFAULT_BASE_URL: &str = "https://cgc-api.sbgenomics.com/v2/";

/// Static auth header expected by the CGC gateway. No OAuth, no refresh.
const AUTH_HEADER: &str = "X-SBG-Auth-Token";

/// Errors produced by the transport layer. These travel up to the
/// command layer, which prints them and exits non-zero; nothing in the
/// library terminates the process itself.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decoding response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response is missing the `{0}` field")]
    MissingField(&'static str),
    #[error("API token is not a valid header value")]
    InvalidToken,
    #[error("writing {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Immutable client configuration: base URL plus the caller's API token.
/// Passed into `ApiClient::new` explicitly; there is no global state.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
}

impl ApiConfig {
    /// Build a configuration from the environment variable `CGC_API_URL`
    /// (useful for testing against a staging gateway) or fall back to
    /// the public endpoint.
    pub fn from_env(token: String) -> Self {
        let base_url =
            std::env::var("CGC_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        ApiConfig { base_url, token }
    }
}

/// Blocking API client holding a reqwest client, the base URL and the
/// auth token pre-validated as a header value.
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: HeaderValue,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let auth =
            HeaderValue::from_str(&config.token).map_err(|_| ApiError::InvalidToken)?;
        let client = Client::builder().build()?;
        Ok(ApiClient {
            client,
            base_url: config.base_url,
            auth,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Authenticated GET returning the parsed JSON body. Any non-2xx
    /// status becomes `ApiError::Api` carrying the server's `message`.
    pub fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        let res = self
            .client
            .get(self.url(path))
            .header(AUTH_HEADER, self.auth.clone())
            .query(params)
            .send()?;
        let status = res.status();
        let text = res.text()?;
        parse_body(status, text)
    }

    /// Authenticated PATCH with a JSON payload. The raw response body is
    /// echoed to stdout before the status check, matching the gateway's
    /// expected diagnostic output for update calls.
    pub fn patch<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value, ApiError> {
        let res = self
            .client
            .patch(self.url(path))
            .header(AUTH_HEADER, self.auth.clone())
            .json(body)
            .send()?;
        let status = res.status();
        let text = res.text()?;
        println!("{text}");
        parse_body(status, text)
    }

    /// Fetch a signed URL and stream its body to `dest`, truncating any
    /// existing file. The auth header is deliberately not sent: signed
    /// URLs point at object storage, not the gateway.
    pub fn download_to(&self, url: &str, dest: &Path) -> Result<u64, ApiError> {
        let res = self.client.get(url).send()?;
        let status = res.status();
        if !status.is_success() {
            return Err(status_error(status, res.text()?));
        }
        write_stream(res, dest).map_err(|source| ApiError::Io {
            path: dest.to_path_buf(),
            source,
        })
    }
}

/// Copy a byte stream into a fresh file at `dest`. `File::create`
/// truncates, so a previous file at the path is fully replaced. The
/// handle is dropped on every exit path, including mid-stream failure.
pub(crate) fn write_stream<R: Read>(mut reader: R, dest: &Path) -> io::Result<u64> {
    let mut file = File::create(dest)?;
    io::copy(&mut reader, &mut file)
}

/// Map a non-2xx response to a typed error. The CGC gateway reports
/// failures as `{"message": "..."}`; fall back to the raw body when the
/// response is not JSON in that shape.
fn status_error(status: StatusCode, body: String) -> ApiError {
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or(body);
    ApiError::Api { status, message }
}

fn parse_body(status: StatusCode, text: String) -> Result<Value, ApiError> {
    if !status.is_success() {
        return Err(status_error(status, text));
    }
    Ok(serde_json::from_str(&text)?)
}
