use chrono::Utc;
use uuid::Uuid;

use crate::{time_to_millis, Document, Error, Fields, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct QuestionId(pub Uuid);

/// A posted question. Never mutated, never deleted; decoded from store
/// documents only.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub created_at: Time,
}

impl Question {
    pub fn from_document(doc: &Document) -> Result<Question, Error> {
        Ok(Question {
            id: QuestionId(doc.id.0),
            text: doc.str_field("text")?.to_string(),
            created_at: doc.time_field("created_at")?,
        })
    }
}

/// A validated question submission, carrying its client-assigned creation
/// timestamp. The id is assigned by the store on create.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewQuestion {
    pub text: String,
    pub created_at: Time,
}

impl NewQuestion {
    pub fn new(text: impl Into<String>) -> Result<NewQuestion, Error> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::EmptySubmission);
        }
        Ok(NewQuestion {
            text,
            created_at: Utc::now(),
        })
    }

    pub fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(String::from("text"), self.text.clone().into());
        fields.insert(
            String::from("created_at"),
            time_to_millis(self.created_at).into(),
        );
        fields
    }
}
