#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Store is unreachable")]
    Disconnected,

    #[error("Submission text is empty")]
    EmptySubmission,

    #[error("Document is missing field {0:?}")]
    MissingField(&'static str),

    #[error("Document field {0:?} has the wrong type")]
    InvalidField(&'static str),

    #[error("Timestamp {0} is out of range")]
    InvalidTimestamp(i64),
}
