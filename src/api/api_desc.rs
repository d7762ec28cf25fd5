use crate::prelude::*;

/// Snapshot of a node's static configuration, for logs and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApiDesc {
    pub url: Option<String>,
    pub method: String,
    pub headers: Headers,
    pub verify: bool,
    pub proxy: Option<ProxyMap>,
}

impl Api {
    /// Describes the node as it stands. Deferred fields are not resolved, so
    /// the snapshot shows whatever static values they last produced.
    pub fn get_desc(&self) -> ApiDesc {
        let state = self.state();
        ApiDesc {
            url: state.url(),
            method: state.method.clone(),
            headers: state.headers.clone(),
            verify: state.verify,
            proxy: state.proxy_map(),
        }
    }

    pub fn get_url(&self) -> Option<String> {
        self.state().url()
    }

    pub fn get_method(&self) -> String {
        self.state().method.clone()
    }

    pub fn get_headers(&self) -> Headers {
        self.state().headers.clone()
    }

    pub fn get_body(&self) -> Option<Body> {
        self.state().body.clone()
    }

    pub fn get_prev_result(&self) -> Option<ApiResult> {
        self.state().prev_result.clone()
    }

    pub fn get_next_api(&self) -> Option<Api> {
        self.state().next_api.clone()
    }

    pub fn get_next_api_list(&self) -> Option<Vec<Api>> {
        self.state().next_api_list.clone()
    }
}
