use crate::prelude::*;

/// Runs before a node resolves its deferred fields. Receives the node's
/// previous result and the node itself; only its error matters.
pub type BeforeSend =
    Arc<dyn Fn(Option<&ApiResult>, &Api) -> Result<(), BoxError> + Send + Sync + 'static>;

/// Runs after a node's network call (or in its place, for nodes without a
/// host). Receives the response, if any, and the previous result, falling
/// back to the node's own envelope when there is no predecessor. Its value
/// becomes the envelope's callback result.
pub type Callback = Arc<
    dyn Fn(Option<&NetworkResponse>, &ApiResult) -> Result<Value, BoxError>
        + Send
        + Sync
        + 'static,
>;

/// A request node: configuration, hooks and links to its successors.
///
/// `Api` is a handle. Clones share the same node, which is what lets one node
/// appear in a chain while still being configured through another binding,
/// and lets dispatch workers send the same graph concurrently.
///
/// During [`Api::send_parallel`] in the default shared mode, concurrent
/// dispatches read and write the same node state. Each access is atomic on
/// its own, but nothing orders whole dispatches against each other.
#[derive(Clone)]
pub struct Api {
    state: Arc<Mutex<ApiState>>,
}

#[derive(Clone)]
pub(crate) struct ApiState {
    pub(crate) protocol: String,
    pub(crate) host: String,
    pub(crate) port: Option<u16>,
    pub(crate) path: String,
    pub(crate) query: String,
    pub(crate) fragment: String,
    pub(crate) headers: Headers,
    pub(crate) verify: bool,
    pub(crate) proxy: Option<Proxy>,
    pub(crate) body: Option<Body>,
    pub(crate) cookie: HashMap<String, String>,
    pub(crate) stream: bool,
    pub(crate) method: String,

    pub(crate) deferred: DeferredFields,

    pub(crate) prev_result: Option<ApiResult>,
    pub(crate) before_send: Option<BeforeSend>,
    pub(crate) callback: Option<Callback>,
    pub(crate) next_api: Option<Api>,
    pub(crate) next_api_list: Option<Vec<Api>>,

    pub(crate) transport: Arc<dyn Transport>,
}

impl Default for ApiState {
    fn default() -> Self {
        Self {
            protocol: "http".to_owned(),
            host: String::new(),
            port: None,
            path: String::new(),
            query: String::new(),
            fragment: String::new(),
            headers: Headers::from_iter([(
                "Content-Type".to_owned(),
                "application/json".to_owned(),
            )]),
            verify: true,
            proxy: None,
            body: None,
            cookie: HashMap::new(),
            stream: false,
            method: "get".to_owned(),
            deferred: DeferredFields::default(),
            prev_result: None,
            before_send: None,
            callback: None,
            next_api: None,
            next_api_list: None,
            transport: ReqwestTransport::shared(),
        }
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

impl Api {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ApiState::default())),
        }
    }

    /// A node pre-filled from an absolute URL.
    pub fn parse(url: impl AsRef<str>) -> Result<Self, ApiError> {
        Self::new().url(url.as_ref())
    }

    /// A node pre-filled with the protocol, host and port of `env`.
    pub fn with_env(env: Env) -> Self {
        Self::new().env(env)
    }

    /// Locks this node's state. Never held across user code or the transport.
    pub(crate) fn state(&self) -> MutexGuard<'_, ApiState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn update(self, apply: impl FnOnce(&mut ApiState)) -> Self {
        apply(&mut self.state());
        self
    }

    /// `true` if both handles refer to the same node.
    pub fn same_node(&self, other: &Api) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Copies this node and, recursively, every successor into fresh nodes
    /// that share no state with this graph. Nodes reachable through
    /// several paths are copied once per path. The graph must be acyclic.
    pub fn deep_clone(&self) -> Api {
        let mut copy = self.state().clone();
        copy.next_api = copy.next_api.as_ref().map(Api::deep_clone);
        copy.next_api_list = copy
            .next_api_list
            .as_ref()
            .map(|group| group.iter().map(Api::deep_clone).collect());
        Api {
            state: Arc::new(Mutex::new(copy)),
        }
    }
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("Api")
            .field("method", &state.method)
            .field("url", &state.url())
            .field("successor", &state.next_api.is_some())
            .field(
                "group",
                &state.next_api_list.as_ref().map(Vec::len).unwrap_or_default(),
            )
            .finish()
    }
}
