use async_trait::async_trait;
use chrono::TimeZone;
use uuid::Uuid;

use crate::{Error, Time, STUB_UUID};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn stub() -> DocumentId {
        DocumentId(STUB_UUID)
    }
}

pub type Fields = serde_json::Map<String, serde_json::Value>;

/// A raw document as stored: an id plus a free-form field map. Typed views
/// (`Question`, `Answer`) are decoded from this at the store boundary.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    pub fn str_field(&self, name: &'static str) -> Result<&str, Error> {
        self.fields
            .get(name)
            .ok_or(Error::MissingField(name))?
            .as_str()
            .ok_or(Error::InvalidField(name))
    }

    pub fn time_field(&self, name: &'static str) -> Result<Time, Error> {
        let millis = self
            .fields
            .get(name)
            .ok_or(Error::MissingField(name))?
            .as_i64()
            .ok_or(Error::InvalidField(name))?;
        time_from_millis(millis)
    }
}

/// Timestamps cross the store boundary as epoch milliseconds and are
/// validated back into a structured `Time` here.
pub fn time_from_millis(millis: i64) -> Result<Time, Error> {
    chrono::Utc
        .timestamp_millis_opt(millis)
        .single()
        .ok_or(Error::InvalidTimestamp(millis))
}

pub fn time_to_millis(t: Time) -> i64 {
    t.timestamp_millis()
}

/// Slash-separated path to a collection of documents. Sub-collections live
/// under a specific parent document, eg `questions/<uuid>/answers`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CollectionPath(String);

impl CollectionPath {
    pub fn new(path: impl Into<String>) -> CollectionPath {
        CollectionPath(path.into())
    }

    pub fn questions() -> CollectionPath {
        CollectionPath::new("questions")
    }

    pub fn subcollection(&self, parent: DocumentId, name: &str) -> CollectionPath {
        CollectionPath(format!("{}/{}/{}", self.0, parent.0, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A live query: one collection, ordered by one field. The store re-delivers
/// the full ordered result set on every change until cancelled.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Query {
    pub path: CollectionPath,
    pub order_by: String,
    pub direction: Direction,
}

impl Query {
    pub fn questions() -> Query {
        Query {
            path: CollectionPath::questions(),
            order_by: String::from("created_at"),
            direction: Direction::Descending,
        }
    }

    pub fn answers_of(question: crate::QuestionId) -> Query {
        Query {
            path: CollectionPath::questions().subcollection(DocumentId(question.0), "answers"),
            order_by: String::from("created_at"),
            direction: Direction::Ascending,
        }
    }
}

pub type OnUpdate = Box<dyn Fn(Vec<Document>) + Send + Sync>;

/// The document-store contract consumed by the client. The hosted store is an
/// opaque collaborator; `giron-mem-store` is the in-process implementation.
#[async_trait]
pub trait Store: Send + Sync {
    /// Creates a document and returns its store-assigned id. The write is
    /// observed through live queries only, never echoed back directly.
    async fn create(&self, path: &CollectionPath, fields: Fields) -> Result<DocumentId, Error>;

    /// Registers a live query. `on_update` is called with the full ordered
    /// result set, once right away and then after every change, until the
    /// returned subscription is cancelled.
    async fn subscribe(&self, query: Query, on_update: OnUpdate)
        -> Result<StoreSubscription, Error>;
}

/// Cancel handle for a live query. Cancelling (explicitly or on drop)
/// detaches the underlying listener; no further deliveries happen after it
/// returns. Safe to cancel twice.
pub struct StoreSubscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl StoreSubscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> StoreSubscription {
        StoreSubscription {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(f) = self.cancel.take() {
            f();
        }
    }
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        if let Some(f) = self.cancel.take() {
            f();
        }
    }
}

impl std::fmt::Debug for StoreSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSubscription")
            .field("cancelled", &self.cancel.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcollection_path_is_nested_under_parent() {
        let parent = DocumentId(uuid::uuid!("00000000-0000-0000-0000-000000000042"));
        let path = CollectionPath::questions().subcollection(parent, "answers");
        assert_eq!(
            path.as_str(),
            "questions/00000000-0000-0000-0000-000000000042/answers"
        );
    }

    #[test]
    fn timestamps_round_trip_through_millis() {
        let now = chrono::Utc::now();
        let back = time_from_millis(time_to_millis(now)).unwrap();
        assert_eq!(back.timestamp_millis(), now.timestamp_millis());
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        assert_eq!(
            time_from_millis(i64::MAX),
            Err(Error::InvalidTimestamp(i64::MAX))
        );
    }

    #[test]
    fn cancelling_twice_is_harmless() {
        let sub = StoreSubscription::new(|| ());
        sub.cancel();
        // second handle cancelled through drop
        let _ = StoreSubscription::new(|| ());
    }
}
