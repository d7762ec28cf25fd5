use crate::prelude::*;

/// The outcome of a completed [`NetworkRequest`], as reported by a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkResponse {
    pub status_code: u16,
    pub url: String,
    pub headers: HashMap<String, String>,

    /// Can be empty.
    pub body: Vec<u8>,
}

impl NetworkResponse {
    pub fn new(status_code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code,
            url: String::new(),
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T>(&self) -> Result<T, serde_json::Error>
    where
        T: for<'a> Deserialize<'a>,
    {
        serde_json::from_slice::<T>(&self.body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
