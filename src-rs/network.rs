use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};
use tracing::{debug, error};

#[derive(Debug, thiserror::Error)]
pub enum PostError {
    /// Non-200 status; code and message come from the `X-Error-Code` and
    /// `X-Error` response headers, empty when a header is absent.
    #[error("API Error {code} ! : {message}")]
    Api { code: String, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
    /// Body parsed as a JSON object, in document key order. Empty when the
    /// body is not a JSON object.
    pub api_json: Map<String, Value>,
}

pub struct Network {
    client: Client,
}

impl Network {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn post(&self, link: &str, payload: &Map<String, Value>) -> Result<ApiResponse, PostError> {
        debug!(target: "readlater::network", url = %link, "sending POST");
        let resp = self.client.post(link).json(payload).send()?;

        let status = resp.status().as_u16();
        if status != 200 {
            let code = header_text(resp.headers(), "X-Error-Code");
            let message = header_text(resp.headers(), "X-Error");
            error!(target: "readlater::network", status, code = %code, "API returned an error");
            return Err(PostError::Api { code, message });
        }

        let headers = resp.headers().clone();
        let body = resp.text()?;
        // Field order is significant downstream, so the body lands in an
        // insertion-ordered map (serde_json `preserve_order`).
        let api_json = serde_json::from_str::<Map<String, Value>>(&body).unwrap_or_default();

        Ok(ApiResponse {
            status,
            headers,
            body,
            api_json,
        })
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string()
}
