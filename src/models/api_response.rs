use serde::{Deserialize, Serialize};

/// Structured error body returned by every failing endpoint.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, new)]
pub struct ErrorBody {
    pub message: String,
    pub name: String,
    #[serde(rename = "errorCode", skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}
