use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::hello_world::{HelloWorldResponse, MESSAGE_FIELD, error::ConstructionError};

impl HelloWorldResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Builds a response from an untyped mapping.
    ///
    /// `message` must be present and hold a JSON string. Other keys are ignored.
    pub fn try_from_mapping(mapping: &Map<String, Value>) -> Result<Self, ConstructionError> {
        match mapping.get(MESSAGE_FIELD) {
            Some(Value::String(message)) => Ok(Self::new(message.as_str())),
            Some(other) => {
                let found = json_type_name(other);
                debug!(field = MESSAGE_FIELD, found, "rejected non-string field");
                Err(ConstructionError::WrongType {
                    field: MESSAGE_FIELD,
                    expected: "string",
                    found,
                })
            }
            None => {
                debug!(field = MESSAGE_FIELD, "rejected mapping without field");
                Err(ConstructionError::MissingField {
                    field: MESSAGE_FIELD,
                })
            }
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ConstructionError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::try_from(value)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut mapping = Map::with_capacity(1);
        mapping.insert(
            MESSAGE_FIELD.to_string(),
            Value::String(self.message.clone()),
        );
        mapping
    }

    /// Compact JSON, e.g. `{"message":"Hello World"}`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl TryFrom<Value> for HelloWorldResponse {
    type Error = ConstructionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(mapping) => Self::try_from_mapping(&mapping),
            other => Err(ConstructionError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }
}

impl IntoResponse for HelloWorldResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::header::CONTENT_TYPE};
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn hello_world_response_model() {
        let response = HelloWorldResponse::new("Hello World");

        assert_eq!(response.message(), "Hello World");
        assert_eq!(
            Value::Object(response.to_mapping()),
            json!({"message": "Hello World"})
        );
    }

    #[test]
    fn hello_world_response_model_json() {
        let response = HelloWorldResponse::new("Hello World");
        let encoded = response.to_json().unwrap();

        assert_eq!(encoded, r#"{"message":"Hello World"}"#);
        assert_eq!(encoded.len(), 25);
    }

    #[test]
    fn empty_message_is_accepted() {
        let response = HelloWorldResponse::new("");

        assert_eq!(response.message(), "");
        assert_eq!(response.to_json().unwrap(), r#"{"message":""}"#);
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(
            HelloWorldResponse::new("Hello World"),
            HelloWorldResponse::new(String::from("Hello World"))
        );
        assert_ne!(
            HelloWorldResponse::new("Hello World"),
            HelloWorldResponse::new("hello world")
        );
    }

    #[test]
    fn special_characters_are_escaped() {
        let response = HelloWorldResponse::new("say \"hi\"\n");

        assert_eq!(
            response.to_json().unwrap(),
            r#"{"message":"say \"hi\"\n"}"#
        );
    }

    #[test]
    fn mapping_ignores_extra_keys() {
        let mapping = json!({"message": "Hello World", "extra": 1})
            .as_object()
            .cloned()
            .unwrap();

        let response = HelloWorldResponse::try_from_mapping(&mapping).unwrap();
        assert_eq!(response.to_mapping().len(), 1);
        assert_eq!(response.message(), "Hello World");
    }

    #[test]
    fn missing_message_is_rejected() {
        let err = HelloWorldResponse::from_json("{}").unwrap_err();

        assert!(matches!(
            err,
            ConstructionError::MissingField { field: "message" }
        ));
        assert_eq!(err.to_string(), "Missing required field `message`");
    }

    #[test]
    fn non_string_message_is_rejected() {
        for (raw, expected) in [
            (r#"{"message":42}"#, "number"),
            (r#"{"message":null}"#, "null"),
            (r#"{"message":true}"#, "boolean"),
            (r#"{"message":["Hello"]}"#, "array"),
            (r#"{"message":{"text":"Hello"}}"#, "object"),
        ] {
            match HelloWorldResponse::from_json(raw) {
                Err(ConstructionError::WrongType { field, found, .. }) => {
                    assert_eq!(field, "message");
                    assert_eq!(found, expected);
                }
                other => panic!("expected WrongType for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn non_object_is_rejected() {
        let err = HelloWorldResponse::try_from(json!("Hello World")).unwrap_err();

        assert!(matches!(
            err,
            ConstructionError::NotAnObject { found: "string" }
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = HelloWorldResponse::from_json(r#"{"message":"#).unwrap_err();

        assert!(matches!(err, ConstructionError::InvalidJson(_)));
    }

    #[test]
    fn deserialize_applies_the_same_validation() {
        let response: HelloWorldResponse =
            serde_json::from_str(r#"{"message":"Hello World"}"#).unwrap();
        assert_eq!(response, HelloWorldResponse::new("Hello World"));

        let err = serde_json::from_str::<HelloWorldResponse>(r#"{"message":1}"#).unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[tokio::test]
    async fn into_response_is_json() {
        let response = HelloWorldResponse::new("Hello World").into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_TYPE].to_str().unwrap(),
            "application/json"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"message":"Hello World"}"#);
    }

    #[tokio::test]
    async fn construction_error_into_response() {
        let response = ConstructionError::MissingField {
            field: MESSAGE_FIELD,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"error": "Missing required field `message`"}));
    }

    proptest! {
        #[test]
        fn message_reads_back_unchanged(message in any::<String>()) {
            let response = HelloWorldResponse::new(message.clone());
            prop_assert_eq!(response.message(), message.as_str());
        }

        #[test]
        fn mapping_has_exactly_the_message(message in any::<String>()) {
            let mapping = HelloWorldResponse::new(message.clone()).to_mapping();
            prop_assert_eq!(mapping.len(), 1);
            prop_assert_eq!(mapping.get(MESSAGE_FIELD), Some(&Value::String(message)));
        }

        #[test]
        fn json_parses_back_to_the_mapping(message in any::<String>()) {
            let response = HelloWorldResponse::new(message.clone());
            let encoded = response.to_json().unwrap();

            let parsed: Value = serde_json::from_str(&encoded).unwrap();
            prop_assert_eq!(parsed, json!({ "message": message }));
            prop_assert_eq!(HelloWorldResponse::from_json(&encoded).unwrap(), response);
        }
    }
}
