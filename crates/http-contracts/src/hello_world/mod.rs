pub mod error;
pub mod implementation;

use serde::{Deserialize, Serialize};

/// Key under which the greeting is serialized.
pub const MESSAGE_FIELD: &str = "message";

/// Body returned by the hello world endpoint.
///
/// The field is private so a constructed value never changes. Deserialization
/// goes through [`TryFrom<serde_json::Value>`] and rejects anything that is not
/// an object carrying a string `message`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "serde_json::Value")]
pub struct HelloWorldResponse {
    message: String,
}
