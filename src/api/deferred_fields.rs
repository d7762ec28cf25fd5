use crate::prelude::*;

/// Resolvers registered for a node's fields, at most one per field.
#[derive(Clone, Default)]
pub(crate) struct DeferredFields {
    pub(crate) url: Option<Resolver<String>>,
    pub(crate) port: Option<Resolver<u16>>,
    pub(crate) host: Option<Resolver<String>>,
    pub(crate) protocol: Option<Resolver<String>>,
    pub(crate) method: Option<Resolver<String>>,
    pub(crate) path: Option<Resolver<String>>,
    pub(crate) query: Option<Resolver<String>>,
    pub(crate) fragment: Option<Resolver<String>>,
    pub(crate) headers: Option<Resolver<Headers>>,
    pub(crate) verify: Option<Resolver<bool>>,
    pub(crate) env: Option<Resolver<Env>>,
    pub(crate) proxy: Option<Resolver<Proxy>>,
    pub(crate) body: Option<Resolver<Body>>,
    pub(crate) cookie: Option<Resolver<HashMap<String, String>>>,
    pub(crate) stream: Option<Resolver<bool>>,
}

fn resolve<T>(
    field: &'static str,
    resolver: &Option<Resolver<T>>,
    prev: Option<&ApiResult>,
) -> Result<Option<T>, ApiError> {
    let Some(resolver) = resolver else {
        return Ok(None);
    };
    debug!(field, "resolving deferred field");
    resolver(prev)
        .map(Some)
        .map_err(|source| ApiError::Resolver { field, source })
}

impl Api {
    /// Runs every registered resolver against `prev` and feeds the results
    /// through the static setters, in a fixed order: url, port, host,
    /// protocol, method, path, query, fragment, headers, verify, env, proxy,
    /// body, cookie, stream. A later field can therefore override what an
    /// earlier one wrote, e.g. `env` overrides the host taken from `url`.
    ///
    /// Resolvers run without the node locked; each result is applied under a
    /// short lock of its own.
    pub(crate) fn resolve_deferred(&self, prev: Option<&ApiResult>) -> Result<(), ApiError> {
        let deferred = self.state().deferred.clone();

        if let Some(url) = resolve("url", &deferred.url, prev)? {
            self.state().set_url(url)?;
        }
        if let Some(port) = resolve("port", &deferred.port, prev)? {
            self.state().set_port(port);
        }
        if let Some(host) = resolve("host", &deferred.host, prev)? {
            self.state().set_host(host);
        }
        if let Some(protocol) = resolve("protocol", &deferred.protocol, prev)? {
            self.state().set_protocol(protocol);
        }
        if let Some(method) = resolve("method", &deferred.method, prev)? {
            self.state().set_method(method);
        }
        if let Some(path) = resolve("path", &deferred.path, prev)? {
            self.state().set_path(path);
        }
        if let Some(query) = resolve("query", &deferred.query, prev)? {
            self.state().set_query(query);
        }
        if let Some(fragment) = resolve("fragment", &deferred.fragment, prev)? {
            self.state().set_fragment(fragment);
        }
        if let Some(headers) = resolve("headers", &deferred.headers, prev)? {
            self.state().set_headers(headers);
        }
        if let Some(verify) = resolve("verify", &deferred.verify, prev)? {
            self.state().set_verify(verify);
        }
        if let Some(env) = resolve("env", &deferred.env, prev)? {
            self.state().set_env(env);
        }
        if let Some(proxy) = resolve("proxy", &deferred.proxy, prev)? {
            self.state().set_proxy(proxy);
        }
        if let Some(body) = resolve("body", &deferred.body, prev)? {
            self.state().set_body(body);
        }
        if let Some(cookie) = resolve("cookie", &deferred.cookie, prev)? {
            self.state().set_cookie(cookie);
        }
        if let Some(stream) = resolve("stream", &deferred.stream, prev)? {
            self.state().set_stream(stream);
        }
        Ok(())
    }
}
