use crate::prelude::*;

impl Api {
    /// Sends this node and everything chained after it, depth first.
    ///
    /// In order: the pre-dispatch hook runs, deferred fields are resolved
    /// against the previous result, the request goes out through the node's
    /// transport (skipped when there is no host), the callback runs, the
    /// fan-out group is sent member by member and merged, and finally the
    /// single successor is sent.
    ///
    /// The returned envelope is this node's own, taken after its fan-out
    /// group merged, never its single successor's. Results travel forward
    /// only by becoming each successor's previous result; to observe the end
    /// of a chain, use a callback on its last node.
    ///
    /// The first error aborts the rest of the traversal. Nodes that already
    /// ran keep their effects.
    pub fn send(&self) -> Result<ApiResult, ApiError> {
        let before_send = self.state().before_send.clone();
        if let Some(before_send) = before_send {
            let prev_result = self.get_prev_result();
            before_send(prev_result.as_ref(), self)
                .map_err(|source| ApiError::BeforeSend { source })?;
        }

        let prev_result = self.get_prev_result();
        self.resolve_deferred(prev_result.as_ref())?;

        let mut this_result = ApiResult::default();

        let (request, transport) = {
            let state = self.state();
            (state.network_request()?, state.transport.clone())
        };
        let response = match request {
            Some(request) => {
                info!(method = %request.method, url = %request.url, "sending request");
                let response = Arc::new(transport.request(request)?);
                debug!(status_code = response.status_code, "received response");
                this_result.replace_resp(Reply::Single(response.clone()));
                Some(response)
            }
            None => {
                debug!("no host configured, skipping network call");
                None
            }
        };

        let callback = self.state().callback.clone();
        if let Some(callback) = callback {
            let effective_prev = prev_result.unwrap_or_else(|| this_result.clone());
            let value = callback(response.as_deref(), &effective_prev)
                .map_err(|source| ApiError::Callback { source })?;
            this_result.replace_callback_result(value);
        }

        let group = self.get_next_api_list().filter(|group| !group.is_empty());
        if let Some(group) = group {
            this_result = fan_out(&group, &this_result)?;
        }

        if let Some(next_api) = self.get_next_api() {
            next_api.set_prev_result(this_result.clone());
            next_api.send()?;
        }

        Ok(this_result)
    }

    /// Forces the method to `get`, then [`Api::send`]s. A deferred method
    /// still wins when the node resolves its fields.
    pub fn get(&self) -> Result<ApiResult, ApiError> {
        self.force_method("get");
        self.send()
    }

    /// Forces the method to `post`, then [`Api::send`]s.
    pub fn post(&self) -> Result<ApiResult, ApiError> {
        self.force_method("post");
        self.send()
    }
}

/// Sends every member with `this_result` as its previous result and merges
/// their envelopes: responses are kept in send order, object callback results
/// are merged key by key with later members winning. Members without a
/// callback result contribute nothing to the map.
fn fan_out(group: &[Api], this_result: &ApiResult) -> Result<ApiResult, ApiError> {
    debug!(members = group.len(), "fanning out");
    let mut responses = Vec::with_capacity(group.len());
    let mut combined = Map::new();

    for (index, member) in group.iter().enumerate() {
        member.set_prev_result(this_result.clone());
        let member_result = member.send()?;

        match member_result.callback_result() {
            None | Some(Value::Null) => {}
            Some(Value::Object(fields)) => combined.extend(fields.clone()),
            Some(other) => {
                return Err(ApiError::FanOutMerge {
                    index,
                    found: other.clone(),
                })
            }
        }
        responses.push(member_result.resp().cloned());
    }

    Ok(ApiResult::new(
        Some(Reply::Group(responses)),
        Some(Value::Object(combined)),
    ))
}
