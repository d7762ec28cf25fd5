use crate::prelude::*;

#[derive(Clone, Debug, PartialEq, enum_as_inner::EnumAsInner)]
pub enum Body {
    /// Sent verbatim, also when the node declares a JSON content type.
    Text(String),
    /// Serialized to JSON text when the node declares a JSON content type,
    /// form encoded otherwise if it is an object.
    Json(Value),
    Bytes(Vec<u8>),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Text(text) => text.is_empty(),
            Body::Bytes(bytes) => bytes.is_empty(),
            Body::Json(Value::Null) => true,
            Body::Json(Value::String(s)) => s.is_empty(),
            Body::Json(Value::Array(a)) => a.is_empty(),
            Body::Json(Value::Object(o)) => o.is_empty(),
            Body::Json(_) => false,
        }
    }

    /// Encodes the body for the wire.
    pub(crate) fn to_payload(&self, as_json: bool) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Body::Text(text) => Ok(text.clone().into_bytes()),
            Body::Bytes(bytes) => Ok(bytes.clone()),
            Body::Json(value) if as_json => serde_json::to_vec(value),
            Body::Json(Value::Object(fields)) => Ok(form_encode(fields).into_bytes()),
            Body::Json(Value::String(text)) => Ok(text.clone().into_bytes()),
            Body::Json(value) => serde_json::to_vec(value),
        }
    }
}

fn form_encode(fields: &Map<String, Value>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        match value {
            Value::String(text) => serializer.append_pair(key, text),
            other => serializer.append_pair(key, &other.to_string()),
        };
    }
    serializer.finish()
}

impl From<&str> for Body {
    fn from(value: &str) -> Self {
        Body::Text(value.to_owned())
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Body::Text(value)
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

impl From<Vec<u8>> for Body {
    fn from(value: Vec<u8>) -> Self {
        Body::Bytes(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_is_serialized_for_json_content_type() {
        let body = Body::from(json!({ "a": 1, "b": "x" }));
        assert_eq!(body.to_payload(true).unwrap(), br#"{"a":1,"b":"x"}"#.to_vec());
    }

    #[test]
    fn object_body_is_form_encoded_otherwise() {
        let body = Body::from(json!({ "q": "a b", "n": 2 }));
        assert_eq!(body.to_payload(false).unwrap(), b"q=a+b&n=2".to_vec());
    }

    #[test]
    fn text_body_is_never_reencoded() {
        let body = Body::from(r#"{"already":"json"}"#);
        assert_eq!(body.to_payload(true).unwrap(), br#"{"already":"json"}"#.to_vec());
    }

    #[test]
    fn empty_values_are_blank() {
        assert!(Body::from(json!({})).is_empty());
        assert!(Body::from("").is_empty());
        assert!(!Body::from(json!(0)).is_empty());
    }
}
