use crate::prelude::*;

/// Fluent configuration.
///
/// Every field setter takes either a value or a [`Field::deferred`] resolver.
/// A value is applied immediately, unless it is blank (empty string, empty
/// map, port `0`), in which case the call does nothing. A resolver is stored
/// and runs each time the node is sent, just before dispatch.
impl Api {
    /// Splits an absolute URL into protocol, host, port, path, query and
    /// fragment. Fields set afterwards override the parts taken from it.
    pub fn url(self, url: impl Into<Field<String>>) -> Result<Self, ApiError> {
        match url.into() {
            Field::Static(url) => {
                self.state().set_url(url)?;
                Ok(self)
            }
            Field::Deferred(resolver) => Ok(self.update(|s| s.deferred.url = Some(resolver))),
        }
    }

    pub fn env(self, env: impl Into<Field<Env>>) -> Self {
        match env.into() {
            Field::Static(env) => self.update(|s| s.set_env(env)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.env = Some(resolver)),
        }
    }

    pub fn protocol(self, protocol: impl Into<Field<String>>) -> Self {
        match protocol.into() {
            Field::Static(protocol) => self.update(|s| s.set_protocol(protocol)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.protocol = Some(resolver)),
        }
    }

    pub fn host(self, host: impl Into<Field<String>>) -> Self {
        match host.into() {
            Field::Static(host) => self.update(|s| s.set_host(host)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.host = Some(resolver)),
        }
    }

    pub fn port(self, port: impl Into<Field<u16>>) -> Self {
        match port.into() {
            Field::Static(port) => self.update(|s| s.set_port(port)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.port = Some(resolver)),
        }
    }

    pub fn path(self, path: impl Into<Field<String>>) -> Self {
        match path.into() {
            Field::Static(path) => self.update(|s| s.set_path(path)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.path = Some(resolver)),
        }
    }

    pub fn query(self, query: impl Into<Field<String>>) -> Self {
        match query.into() {
            Field::Static(query) => self.update(|s| s.set_query(query)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.query = Some(resolver)),
        }
    }

    /// Sets the query from key/value pairs, see [`encode_query`].
    pub fn query_pairs<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: std::fmt::Display,
        V: std::fmt::Display,
    {
        self.query(encode_query(pairs))
    }

    pub fn fragment(self, fragment: impl Into<Field<String>>) -> Self {
        match fragment.into() {
            Field::Static(fragment) => self.update(|s| s.set_fragment(fragment)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.fragment = Some(resolver)),
        }
    }

    /// Merges `headers` into the node's headers. A node starts out with
    /// `Content-Type: application/json`.
    pub fn headers(self, headers: impl Into<Field<Headers>>) -> Self {
        match headers.into() {
            Field::Static(headers) => self.update(|s| s.set_headers(headers)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.headers = Some(resolver)),
        }
    }

    pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let headers = Headers::from_iter([(name.into(), value.into())]);
        self.update(|s| s.set_headers(headers))
    }

    /// Unlike the other flags, `false` is a real value here.
    pub fn verify(self, verify: impl Into<Field<bool>>) -> Self {
        match verify.into() {
            Field::Static(verify) => self.update(|s| s.set_verify(verify)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.verify = Some(resolver)),
        }
    }

    pub fn proxy(self, proxy: impl Into<Field<Proxy>>) -> Self {
        match proxy.into() {
            Field::Static(proxy) => self.update(|s| s.set_proxy(proxy)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.proxy = Some(resolver)),
        }
    }

    pub fn body(self, body: impl Into<Field<Body>>) -> Self {
        match body.into() {
            Field::Static(body) => self.update(|s| s.set_body(body)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.body = Some(resolver)),
        }
    }

    pub fn cookie(self, cookie: impl Into<Field<HashMap<String, String>>>) -> Self {
        match cookie.into() {
            Field::Static(cookie) => self.update(|s| s.set_cookie(cookie)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.cookie = Some(resolver)),
        }
    }

    /// `false` is ignored; streaming cannot be switched off once on.
    pub fn stream(self, stream: impl Into<Field<bool>>) -> Self {
        match stream.into() {
            Field::Static(stream) => self.update(|s| s.set_stream(stream)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.stream = Some(resolver)),
        }
    }

    pub fn method(self, method: impl Into<Field<String>>) -> Self {
        match method.into() {
            Field::Static(method) => self.update(|s| s.set_method(method)),
            Field::Deferred(resolver) => self.update(|s| s.deferred.method = Some(resolver)),
        }
    }

    pub fn before_send<F>(self, before_send: F) -> Self
    where
        F: Fn(Option<&ApiResult>, &Api) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let before_send: BeforeSend = Arc::new(before_send);
        self.update(|s| s.before_send = Some(before_send))
    }

    pub fn callback<F>(self, callback: F) -> Self
    where
        F: Fn(Option<&NetworkResponse>, &ApiResult) -> Result<Value, BoxError>
            + Send
            + Sync
            + 'static,
    {
        let callback: Callback = Arc::new(callback);
        self.update(|s| s.callback = Some(callback))
    }

    /// Replaces the transport this node dispatches through.
    pub fn transport(self, transport: Arc<dyn Transport>) -> Self {
        self.update(|s| s.transport = transport)
    }

    /// Seeds the previous result, as a predecessor would just before sending
    /// this node.
    pub fn prev_result(self, prev_result: ApiResult) -> Self {
        self.update(|s| s.prev_result = Some(prev_result))
    }

    /// Sets the single successor directly, replacing any earlier one.
    /// See [`Api::then`] for appending at the end of the chain instead.
    pub fn next_api(self, next_api: Api) -> Self {
        self.update(|s| s.next_api = Some(next_api))
    }

    /// Sets the fan-out group directly. An empty group is ignored.
    pub fn next_api_list(self, next_api_list: Vec<Api>) -> Self {
        if next_api_list.is_empty() {
            return self;
        }
        self.update(|s| s.next_api_list = Some(next_api_list))
    }

    pub(crate) fn set_prev_result(&self, prev_result: ApiResult) {
        self.state().prev_result = Some(prev_result);
    }

    pub(crate) fn force_method(&self, method: &str) {
        self.state().method = method.to_owned();
    }
}
