use crate::api::{
    CollectionPath, DocumentId, Error, NewAnswer, NewQuestion, QuestionId, Store,
};

/// Creates a Question document. The view model is not touched: the root live
/// query is the sole update path, so the question appears on its next
/// delivery. Empty (trimmed) text produces no store write.
pub async fn post_question<S: Store>(store: &S, text: &str) -> Result<DocumentId, Error> {
    let new = NewQuestion::new(text)?;
    let id = store.create(&CollectionPath::questions(), new.fields()).await?;
    tracing::debug!(?id, "posted question");
    Ok(id)
}

/// Creates an Answer document under the question's sub-collection. Same
/// non-optimistic behavior as [`post_question`].
pub async fn post_answer<S: Store>(
    store: &S,
    question: QuestionId,
    text: &str,
) -> Result<DocumentId, Error> {
    let new = NewAnswer::new(text)?;
    let path = CollectionPath::questions().subcollection(DocumentId(question.0), "answers");
    let id = store.create(&path, new.fields()).await?;
    tracing::debug!(?question, ?id, "posted answer");
    Ok(id)
}
