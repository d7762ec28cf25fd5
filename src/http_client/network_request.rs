use crate::prelude::*;
use indexmap::IndexMap;

/// Request headers in insertion order. Names are kept as given, so two
/// entries may differ only by case; the first one inserted wins.
pub type Headers = IndexMap<String, String>;

/// Proxy URLs keyed by the scheme they apply to (`http`, `https`).
pub type ProxyMap = BTreeMap<String, String>;

/// A fully resolved HTTP request, handed to a [`Transport`] for execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,

    /// Already encoded payload, `None` if the node has no body.
    pub body: Option<Vec<u8>>,
    pub verify: bool,
    pub cookies: HashMap<String, String>,
    pub proxy: Option<ProxyMap>,
    pub stream: bool,
}

impl NetworkRequest {
    /// First header whose name matches `name` ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        header_ignore_case(&self.headers, name)
    }

    /// Renders `cookies` as the value of a `Cookie` header, `None` if there
    /// are no cookies. Pairs are ordered by name.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let ordered: BTreeMap<_, _> = self.cookies.iter().collect();
        Some(
            ordered
                .into_iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Looks `name` up ignoring ASCII case, first inserted match wins.
pub(crate) fn header_ignore_case<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
