use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const UNKNOWN_QUESTION: &str = "Unknown question";
const DEFAULT_QUESTION_TYPE: &str = "text";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Survey {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub is_anonymous: bool,
    pub created_at: Option<String>,
    pub created_by: Option<ID>,
}

impl Entity<ID> for Survey {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Maps form builder question types to the types the backend stores
pub fn map_question_type_to_api(ui_type: &str) -> &str {
    match ui_type {
        "radio" => "single_choice",
        "checkbox" => "multiple_choice",
        other => other,
    }
}

pub fn map_question_type_to_ui(api_type: &str) -> &str {
    match api_type {
        "single_choice" => "radio",
        "multiple_choice" => "checkbox",
        other => other,
    }
}

/// Best-effort normalization of the `questions` payload of a survey.
///
/// The backend has stored questions both as an array and as an object keyed
/// by question number. Anything unrecognizable degrades to a placeholder
/// text question instead of failing the whole survey.
pub fn normalize_questions(questions: &Value) -> Vec<Question> {
    match questions {
        Value::Object(entries) => {
            let mut keyed = entries.iter().collect::<Vec<_>>();
            keyed.sort_by_key(|(key, _)| key.parse::<i64>().unwrap_or(i64::MAX));
            keyed
                .into_iter()
                .map(|(key, value)| normalize_keyed_question(key, value))
                .collect()
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| normalize_listed_question(index, value))
            .collect(),
        _ => Vec::new(),
    }
}

fn normalize_keyed_question(key: &str, value: &Value) -> Question {
    let key_id = key.parse::<i64>().ok().filter(|id| *id != 0);
    match value.as_object() {
        Some(fields) if fields.contains_key("text") && fields.contains_key("type") => Question {
            id: key_id
                .or_else(|| fields.get("id").and_then(value_as_id))
                .unwrap_or(0),
            text: text_field(fields, "text").unwrap_or_default(),
            kind: text_field(fields, "type").unwrap_or_else(|| DEFAULT_QUESTION_TYPE.into()),
            options: options_field(fields),
        },
        Some(fields) => Question {
            id: key_id.unwrap_or(0),
            text: if fields.contains_key("text") {
                text_field(fields, "text").unwrap_or_default()
            } else {
                UNKNOWN_QUESTION.into()
            },
            kind: text_field(fields, "type").unwrap_or_else(|| DEFAULT_QUESTION_TYPE.into()),
            options: options_field(fields),
        },
        None => Question {
            id: key_id.unwrap_or(0),
            text: UNKNOWN_QUESTION.into(),
            kind: DEFAULT_QUESTION_TYPE.into(),
            options: None,
        },
    }
}

fn normalize_listed_question(index: usize, value: &Value) -> Question {
    let empty = Map::new();
    let fields = value.as_object().unwrap_or(&empty);
    Question {
        id: fields
            .get("id")
            .and_then(value_as_id)
            .unwrap_or(index as i64),
        text: text_field(fields, "text").unwrap_or_else(|| UNKNOWN_QUESTION.into()),
        kind: text_field(fields, "type").unwrap_or_else(|| DEFAULT_QUESTION_TYPE.into()),
        options: options_field(fields),
    }
}

/// Non-empty textual rendering of a field
fn text_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    let text = match fields.get(name)? {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn options_field(fields: &Map<String, Value>) -> Option<Vec<String>> {
    let options = fields.get("options")?.as_array()?;
    Some(
        options
            .iter()
            .map(|option| match option {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

fn value_as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
