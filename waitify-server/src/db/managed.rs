//! Managed-backend client
//!
//! An HTTP client bound to a base URL that stamps the API key on every
//! request it builds. Nothing in the server issues requests through it.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Url};

use crate::config::{redact_url, ManagedSettings};
use crate::error::DbError;

const API_KEY_HEADER: &str = "apikey";

#[derive(Clone)]
pub struct ManagedClient {
    base_url: Url,
    headers: HeaderMap,
    http: reqwest::Client,
}

impl ManagedClient {
    pub fn new(settings: &ManagedSettings) -> Result<Self, DbError> {
        let mut key = HeaderValue::from_str(&settings.api_key)?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            base_url: settings.url.clone(),
            headers,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Start a request to `path` under the base URL, credentials attached.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        self.http.request(method, url).headers(self.headers.clone())
    }
}

impl fmt::Debug for ManagedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedClient")
            .field("base_url", &redact_url(&self.base_url))
            .finish_non_exhaustive()
    }
}
