use crate::prelude::*;

impl Api {
    /// Sends the node and parses its own response body as JSON.
    pub fn send_and_get_json(&self) -> Result<Value, ApiError> {
        let result = self.send()?;
        result
            .single_response()
            .ok_or(ApiError::NoResponse)?
            .json::<Value>()
            .map_err(|error| ApiError::ResponseNotJson { error })
    }

    /// Sends the node and prints its response(s) to stdout, pretty printed as
    /// JSON or HTML where possible, see [`render_response`]. Formatting
    /// failures fall back silently; send failures are returned.
    pub fn send_and_print(&self) -> Result<ApiResult, ApiError> {
        let result = self.send()?;
        match result.resp() {
            Some(reply) => {
                for response in reply.responses() {
                    println!("{}", render_response(response));
                }
            }
            None => warn!("nothing to print, node made no network call"),
        }
        Ok(result)
    }
}

/// Renders a response body for humans: pretty JSON if it parses as JSON,
/// otherwise re-indented HTML if it contains markup, otherwise the raw text.
pub fn render_response(response: &NetworkResponse) -> String {
    let text = response.text();
    if let Ok(pretty) = format_json_str(&text) {
        return pretty;
    }
    if let Some(pretty) = format_html(&response.body) {
        return pretty;
    }
    text
}
