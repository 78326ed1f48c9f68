use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body the backend sends along with non-success status codes
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    /// Validation failures carry a list of problems instead of a string
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human readable message, if the backend provided one
    pub fn user_message(&self) -> Option<String> {
        if let Some(message) = self.message.as_ref().filter(|m| !m.trim().is_empty()) {
            return Some(message.clone());
        }
        match self.detail.as_ref()? {
            Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
            Value::Array(problems) => {
                let messages = problems
                    .iter()
                    .filter_map(|p| p.get("msg").and_then(Value::as_str))
                    .collect::<Vec<_>>();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            _ => None,
        }
    }
}
