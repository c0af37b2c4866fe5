use chrono::Utc;
use uuid::Uuid;

use crate::{time_to_millis, Document, Error, Fields, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct AnswerId(pub Uuid);

/// An answer to one question. Lives in that question's `answers`
/// sub-collection and belongs exclusively to it.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Answer {
    pub id: AnswerId,
    pub text: String,
    pub created_at: Time,
}

impl Answer {
    pub fn from_document(doc: &Document) -> Result<Answer, Error> {
        Ok(Answer {
            id: AnswerId(doc.id.0),
            text: doc.str_field("text")?.to_string(),
            created_at: doc.time_field("created_at")?,
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewAnswer {
    pub text: String,
    pub created_at: Time,
}

impl NewAnswer {
    pub fn new(text: impl Into<String>) -> Result<NewAnswer, Error> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::EmptySubmission);
        }
        Ok(NewAnswer {
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
