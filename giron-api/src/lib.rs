use chrono::Utc;

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod answer;
pub use answer::{Answer, AnswerId, NewAnswer};

mod error;
pub use error::Error;

mod question;
pub use question::{NewQuestion, Question, QuestionId};

mod store;
pub use store::{
    time_from_millis, time_to_millis, CollectionPath, Direction, Document, DocumentId, Fields,
    OnUpdate, Query, Store, StoreSubscription,
};
