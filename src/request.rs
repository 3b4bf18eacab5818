use std::env;

use serde::Deserialize;

use crate::error::HandlerError;

/// Request metadata handed to the script by the web server.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CgiRequest {
    #[serde(default)]
    pub request_method: String,
    #[serde(default)]
    pub path_info: String,
    pub content_length: Option<String>,
    pub content_type: Option<String>,
    pub http_transfer_encoding: Option<String>,
}

impl CgiRequest {
    pub fn from_env() -> Result<Self, HandlerError> {
        // Variables that are not valid unicode cannot be CGI metadata we use
        Self::from_vars(
            env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, HandlerError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into()));
        Ok(envy::from_iter::<_, CgiRequest>(vars)?)
    }

    pub fn method(&self) -> String {
        self.request_method.trim().to_uppercase()
    }

    /// The path info with leading separators stripped.
    pub fn key(&self) -> &str {
        self.path_info.trim_start_matches('/')
    }

    pub fn is_chunked(&self) -> bool {
        self.http_transfer_encoding
            .as_deref()
            .map(|encoding| encoding.trim().eq_ignore_ascii_case("chunked"))
            .unwrap_or(false)
    }

    /// The declared body length, `None` when the header is absent or empty.
    pub fn content_length(&self) -> Result<Option<u64>, HandlerError> {
        let raw = match self.content_length.as_deref().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };

        match raw.parse::<i64>() {
            Ok(length) if length >= 0 => Ok(Some(length as u64)),
            _ => Err(HandlerError::InvalidContentLength),
        }
    }

    pub fn has_text_content_type(&self) -> bool {
        match self.content_type.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(content_type) => content_type.to_ascii_lowercase().starts_with("text/plain"),
        }
    }
}
