use crate::prelude::*;
use url::Url;

/// An absolute URL split into the parts a request node stores separately.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl UrlParts {
    pub fn parse(url: impl AsRef<str>) -> Result<Self, ApiError> {
        let url = url.as_ref();
        let parsed = Url::parse(url).map_err(|e| ApiError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            scheme: parsed.scheme().to_owned(),
            host: parsed.host_str().unwrap_or_default().to_owned(),
            port: parsed.port(),
            path: parsed.path().to_owned(),
            query: parsed.query().unwrap_or_default().to_owned(),
            fragment: parsed.fragment().unwrap_or_default().to_owned(),
        })
    }

    /// Reassembles the parts, `None` when there is no host.
    pub fn compose(&self) -> Option<String> {
        if self.host.is_empty() {
            return None;
        }

        let mut url = String::new();
        if !self.scheme.is_empty() {
            url.push_str(&self.scheme);
            url.push(':');
        }
        url.push_str("//");
        url.push_str(&self.host);
        if let Some(port) = self.port {
            url.push_str(&format!(":{port}"));
        }
        if !self.path.is_empty() && !self.path.starts_with('/') {
            url.push('/');
        }
        url.push_str(&self.path);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            url.push('#');
            url.push_str(&self.fragment);
        }
        Some(url)
    }
}

/// Joins pairs as `k=v&k2=v2`, keeping their order. Nothing is escaped.
pub fn encode_query<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: std::fmt::Display,
    V: std::fmt::Display,
{
    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}
