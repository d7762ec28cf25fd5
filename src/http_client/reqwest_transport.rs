use crate::prelude::*;
use reqwest::{
    blocking::{Client, ClientBuilder},
    header::{HeaderMap, HeaderName, HeaderValue, COOKIE},
    Method,
};
use std::sync::OnceLock;

/// Blocking [`Transport`] built on `reqwest`.
///
/// A client is built per request so that the node's `verify` flag and proxy
/// map apply to exactly that request.
///
/// Response bodies are always read in full; [`NetworkRequest::stream`] is
/// accepted and ignored. Header names that differ only by case are sent once,
/// with the value of the first one inserted.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    config: TransportConfig,
}

impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Process wide transport used by nodes that were not given one.
    pub fn shared() -> Arc<dyn Transport> {
        static SHARED: OnceLock<Arc<dyn Transport>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(ReqwestTransport::default()))
            .clone()
    }

    fn client_for(&self, request: &NetworkRequest) -> Result<Client, TransportError> {
        let mut builder: ClientBuilder =
            Client::builder().danger_accept_invalid_certs(!request.verify);

        if let Some(timeout) = self.config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &self.config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(proxies) = &request.proxy {
            if let Some(url) = proxies.get("http") {
                builder = builder.proxy(reqwest::Proxy::http(url.as_str()).map_err(|e| {
                    TransportError::InvalidProxy {
                        url: url.clone(),
                        reason: e.to_string(),
                    }
                })?);
            }
            if let Some(url) = proxies.get("https") {
                builder = builder.proxy(reqwest::Proxy::https(url.as_str()).map_err(|e| {
                    TransportError::InvalidProxy {
                        url: url.clone(),
                        reason: e.to_string(),
                    }
                })?);
            }
        }

        builder.build().map_err(|e| TransportError::ClientBuild {
            reason: e.to_string(),
        })
    }
}

impl Transport for ReqwestTransport {
    fn request(&self, request: NetworkRequest) -> Result<NetworkResponse, TransportError> {
        let client = self.client_for(&request)?;

        let method = Method::from_bytes(request.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| TransportError::InvalidMethod {
                method: request.method.clone(),
            })?;

        let mut headers = header_map(&request.headers)?;
        if let Some(cookies) = request.cookie_header() {
            let value = HeaderValue::from_str(&cookies).map_err(|e| {
                TransportError::InvalidHeader {
                    name: COOKIE.to_string(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(COOKIE, value);
        }

        let mut builder = client.request(method, request.url.as_str()).headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .map_err(|e| TransportError::RequestFailed {
                status_code: e.status().map(|s| s.as_u16()),
                underlying_error: e.to_string(),
            })?;

        let status_code = response.status().as_u16();
        let url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_owned(), value.to_owned()))
            })
            .collect();

        let body = response
            .bytes()
            .map_err(|e| TransportError::BodyRead {
                reason: e.to_string(),
            })?
            .to_vec();

        Ok(NetworkResponse {
            status_code,
            url,
            headers,
            body,
        })
    }
}

/// Converts node headers, keeping the first spelling of each name.
fn header_map(headers: &Headers) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = |reason: String| TransportError::InvalidHeader {
            name: name.clone(),
            reason,
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        if map.contains_key(&header_name) {
            continue;
        }
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
