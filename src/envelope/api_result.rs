use crate::prelude::*;

/// The envelope a node produces when it is sent, and which its successors
/// receive as their previous result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiResult {
    resp: Option<Reply>,
    callback_result: Option<Value>,
}

impl ApiResult {
    pub fn new(resp: Option<Reply>, callback_result: Option<Value>) -> Self {
        Self {
            resp,
            callback_result,
        }
    }

    pub fn resp(&self) -> Option<&Reply> {
        self.resp.as_ref()
    }

    /// The response when this envelope holds exactly one.
    pub fn single_response(&self) -> Option<&NetworkResponse> {
        self.resp.as_ref()?.as_single().map(Arc::as_ref)
    }

    pub fn callback_result(&self) -> Option<&Value> {
        self.callback_result.as_ref()
    }

    pub(crate) fn replace_resp(&mut self, resp: Reply) {
        self.resp = Some(resp);
    }

    pub(crate) fn replace_callback_result(&mut self, callback_result: Value) {
        self.callback_result = Some(callback_result);
    }
}
