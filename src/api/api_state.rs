use crate::prelude::*;

fn assign<T: IsBlank>(slot: &mut T, value: T) {
    if !value.is_blank() {
        *slot = value;
    }
}

/// Static setters. Blank values are ignored, everything else overwrites.
/// Deferred resolution feeds its results through these same functions.
impl ApiState {
    pub(crate) fn set_url(&mut self, url: String) -> Result<(), ApiError> {
        if url.is_empty() {
            return Ok(());
        }
        let parts = UrlParts::parse(&url)?;
        self.protocol = parts.scheme;
        self.host = parts.host;
        self.port = parts.port;
        self.path = parts.path;
        self.query = parts.query;
        self.fragment = parts.fragment;
        Ok(())
    }

    pub(crate) fn set_protocol(&mut self, protocol: String) {
        assign(&mut self.protocol, protocol);
    }

    pub(crate) fn set_host(&mut self, host: String) {
        assign(&mut self.host, host);
    }

    pub(crate) fn set_port(&mut self, port: u16) {
        if !port.is_blank() {
            self.port = Some(port);
        }
    }

    pub(crate) fn set_path(&mut self, path: String) {
        assign(&mut self.path, path);
    }

    pub(crate) fn set_query(&mut self, query: String) {
        assign(&mut self.query, query);
    }

    pub(crate) fn set_fragment(&mut self, fragment: String) {
        assign(&mut self.fragment, fragment);
    }

    /// Merges into the existing headers. A name already present keeps its
    /// position and takes the new value.
    pub(crate) fn set_headers(&mut self, headers: Headers) {
        self.headers.extend(headers);
    }

    pub(crate) fn set_verify(&mut self, verify: bool) {
        self.verify = verify;
    }

    pub(crate) fn set_env(&mut self, env: Env) {
        if let Some(port) = env.port {
            self.set_port(port);
        }
        self.set_host(env.host);
        self.set_protocol(env.protocol);
    }

    pub(crate) fn set_proxy(&mut self, proxy: Proxy) {
        self.proxy = Some(proxy);
    }

    pub(crate) fn set_body(&mut self, body: Body) {
        if !body.is_blank() {
            self.body = Some(body);
        }
    }

    pub(crate) fn set_cookie(&mut self, cookie: HashMap<String, String>) {
        assign(&mut self.cookie, cookie);
    }

    /// Only ever switches streaming on.
    pub(crate) fn set_stream(&mut self, stream: bool) {
        if stream {
            self.stream = true;
        }
    }

    pub(crate) fn set_method(&mut self, method: String) {
        assign(&mut self.method, method);
    }
}

/// Derived views over the static fields.
impl ApiState {
    /// The full URL, `None` while the node has no host.
    pub(crate) fn url(&self) -> Option<String> {
        UrlParts {
            scheme: self.protocol.clone(),
            host: self.host.clone(),
            port: self.port,
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
        .compose()
    }

    pub(crate) fn proxy_map(&self) -> Option<ProxyMap> {
        self.proxy.as_ref().map(Proxy::to_map)
    }

    pub(crate) fn header_ignore_case(&self, name: &str) -> Option<&str> {
        header_ignore_case(&self.headers, name)
    }

    /// The request this node would send right now, `None` if it has no host.
    pub(crate) fn network_request(&self) -> Result<Option<NetworkRequest>, ApiError> {
        let Some(url) = self.url() else {
            return Ok(None);
        };

        let as_json = self
            .header_ignore_case("Content-Type")
            .is_some_and(|content_type| content_type.contains("application/json"));
        let body = self
            .body
            .as_ref()
            .map(|body| body.to_payload(as_json))
            .transpose()?;

        Ok(Some(NetworkRequest {
            method: self.method.clone(),
            url,
            headers: self.headers.clone(),
            body,
            verify: self.verify,
            cookies: self.cookie.clone(),
            proxy: self.proxy_map(),
            stream: self.stream,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_fills_every_part() {
        let mut state = ApiState::default();
        state.set_url("https://example.com:8443/a/b?x=1#frag".to_owned()).unwrap();
        assert_eq!(state.protocol, "https");
        assert_eq!(state.host, "example.com");
        assert_eq!(state.port, Some(8443));
        assert_eq!(state.path, "/a/b");
        assert_eq!(state.query, "x=1");
        assert_eq!(state.fragment, "frag");
        assert_eq!(
            state.url().as_deref(),
            Some("https://example.com:8443/a/b?x=1#frag")
        );
    }

    #[test]
    fn blank_values_keep_previous_ones() {
        let mut state = ApiState::default();
        state.set_host("example.com".to_owned());
        state.set_host(String::new());
        state.set_port(0);
        state.set_cookie(HashMap::new());
        state.set_stream(false);
        state.set_url(String::new()).unwrap();
        assert_eq!(state.host, "example.com");
        assert_eq!(state.port, None);
        assert!(!state.stream);
    }

    #[test]
    fn verify_accepts_false() {
        let mut state = ApiState::default();
        state.set_verify(false);
        assert!(!state.verify);
    }

    #[test]
    fn env_skips_missing_port() {
        let mut state = ApiState::default();
        state.set_port(9000);
        state.set_env(Env::new("staging.local", None, "https"));
        assert_eq!(state.url().as_deref(), Some("https://staging.local:9000"));
    }

    #[test]
    fn no_host_means_no_request() {
        let state = ApiState::default();
        assert!(state.network_request().unwrap().is_none());
    }

    #[test]
    fn json_content_type_is_matched_ignoring_case() {
        let mut state = ApiState::default();
        state.headers.clear();
        state.set_headers(Headers::from_iter([(
            "content-TYPE".to_owned(),
            "application/json; charset=utf-8".to_owned(),
        )]));
        state.set_host("example.com".to_owned());
        state.set_body(Body::from(json!({ "k": [1, 2] })));

        let request = state.network_request().unwrap().unwrap();
        assert_eq!(request.body, Some(br#"{"k":[1,2]}"#.to_vec()));
        assert_eq!(request.url, "http://example.com");
    }
}
