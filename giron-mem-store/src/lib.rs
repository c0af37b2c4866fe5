use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use giron_api::{
    CollectionPath, Direction, Document, DocumentId, Error, Fields, OnUpdate, Query, Store,
    StoreSubscription, Uuid,
};

/// In-memory document store with live-query semantics: every subscriber of a
/// collection gets the full ordered result set redelivered after each write.
/// Backs the web app and the test-suite; the hosted store it stands in for is
/// an opaque external collaborator.
#[derive(Clone)]
pub struct MemStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    docs: HashMap<CollectionPath, Vec<Document>>,
    subs: HashMap<CollectionPath, Vec<Subscriber>>,
    offline: bool,
}

struct Subscriber {
    id: Uuid,
    query: Query,
    on_update: Arc<dyn Fn(Vec<Document>) + Send + Sync>,
}

fn snapshot(docs: &[Document], query: &Query) -> Vec<Document> {
    let mut res = docs.to_vec();
    let key = |d: &Document| d.fields.get(&query.order_by).and_then(|v| v.as_i64());
    // Stable sort: ties stay in insertion order
    match query.direction {
        Direction::Ascending => res.sort_by_key(key),
        Direction::Descending => res.sort_by(|a, b| key(b).cmp(&key(a))),
    }
    res
}

impl MemStore {
    pub fn new() -> MemStore {
        MemStore {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// While offline, every create and subscribe fails with
    /// `Error::Disconnected`. Existing subscriptions keep working; this
    /// models an unreachable backend, not a wiped one.
    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().expect("mem-store lock poisoned").offline = offline;
    }

    /// Return the current number of documents in `path`
    pub fn test_doc_count(&self, path: &CollectionPath) -> usize {
        let inner = self.inner.lock().expect("mem-store lock poisoned");
        inner.docs.get(path).map(|d| d.len()).unwrap_or(0)
    }

    /// Return the current number of live subscribers on `path`
    pub fn test_subscriber_count(&self, path: &CollectionPath) -> usize {
        let inner = self.inner.lock().expect("mem-store lock poisoned");
        inner.subs.get(path).map(|s| s.len()).unwrap_or(0)
    }

    /// Return the total number of live subscribers across all collections
    pub fn test_total_subscribers(&self) -> usize {
        let inner = self.inner.lock().expect("mem-store lock poisoned");
        inner.subs.values().map(|s| s.len()).sum()
    }
}

impl Default for MemStore {
    fn default() -> MemStore {
        MemStore::new()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn create(&self, path: &CollectionPath, fields: Fields) -> Result<DocumentId, Error> {
        let mut inner = self.inner.lock().expect("mem-store lock poisoned");
        if inner.offline {
            return Err(Error::Disconnected);
        }
        let id = DocumentId(Uuid::new_v4());
        inner
            .docs
            .entry(path.clone())
            .or_insert_with(Vec::new)
            .push(Document { id, fields });
        tracing::debug!(path = path.as_str(), ?id, "created document");

        let docs = &inner.docs[path];
        let deliveries = inner
            .subs
            .get(path)
            .into_iter()
            .flatten()
            .map(|s| (s.on_update.clone(), snapshot(docs, &s.query)))
            .collect::<Vec<_>>();
        // Callbacks run outside the lock so they may reenter the store
        drop(inner);
        for (on_update, docs) in deliveries {
            on_update(docs);
        }
        Ok(id)
    }

    async fn subscribe(
        &self,
        query: Query,
        on_update: OnUpdate,
    ) -> Result<StoreSubscription, Error> {
        let on_update: Arc<dyn Fn(Vec<Document>) + Send + Sync> = Arc::from(on_update);
        let sub_id = Uuid::new_v4();
        let initial = {
            let mut inner = self.inner.lock().expect("mem-store lock poisoned");
            if inner.offline {
                return Err(Error::Disconnected);
            }
            let initial = snapshot(
                inner.docs.get(&query.path).map(|d| &d[..]).unwrap_or(&[]),
                &query,
            );
            inner
                .subs
                .entry(query.path.clone())
                .or_insert_with(Vec::new)
                .push(Subscriber {
                    id: sub_id,
                    query: query.clone(),
                    on_update: on_update.clone(),
                });
            initial
        };
        tracing::debug!(path = query.path.as_str(), %sub_id, "registered live query");
        // Delivered outside the lock, like every other delivery. A create on
        // another thread between registration and this call could deliver a
        // newer snapshot first; deliveries are only ordered when the store is
        // driven from a single thread, which is how the UI runtime drives it.
        on_update(initial);

        let inner = self.inner.clone();
        let path = query.path;
        Ok(StoreSubscription::new(move || {
            let mut inner = inner.lock().expect("mem-store lock poisoned");
            if let Some(subs) = inner.subs.get_mut(&path) {
                subs.retain(|s| s.id != sub_id);
            }
            tracing::debug!(path = path.as_str(), %sub_id, "cancelled live query");
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use giron_api::{NewQuestion, Question};

    fn collector() -> (Arc<Mutex<Vec<Vec<Document>>>>, OnUpdate) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let on_update: OnUpdate = Box::new(move |docs| sink.lock().unwrap().push(docs));
        (seen, on_update)
    }

    #[test]
    fn subscribe_delivers_initial_snapshot_then_every_write() {
        let store = MemStore::new();
        let path = CollectionPath::questions();
        block_on(store.create(&path, NewQuestion::new("first").unwrap().fields())).unwrap();

        let (seen, on_update) = collector();
        let sub = block_on(store.subscribe(Query::questions(), on_update)).unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(seen.lock().unwrap()[0].len(), 1);

        block_on(store.create(&path, NewQuestion::new("second").unwrap().fields())).unwrap();
        assert_eq!(seen.lock().unwrap().len(), 2);
        assert_eq!(seen.lock().unwrap()[1].len(), 2);
        sub.cancel();
    }

    #[test]
    fn deliveries_follow_the_query_order() {
        let store = MemStore::new();
        let path = CollectionPath::questions();
        let mut old = NewQuestion::new("old").unwrap();
        old.created_at = old.created_at - chrono::Duration::seconds(10);
        block_on(store.create(&path, old.fields())).unwrap();
        block_on(store.create(&path, NewQuestion::new("new").unwrap().fields())).unwrap();

        let (seen, on_update) = collector();
        let _sub = block_on(store.subscribe(Query::questions(), on_update)).unwrap();
        let texts = seen.lock().unwrap()[0]
            .iter()
            .map(|d| Question::from_document(d).unwrap().text)
            .collect::<Vec<_>>();
        assert_eq!(texts, ["new", "old"]);
    }

    #[test]
    fn cancelled_subscribers_stop_receiving() {
        let store = MemStore::new();
        let path = CollectionPath::questions();
        let (seen, on_update) = collector();
        let sub = block_on(store.subscribe(Query::questions(), on_update)).unwrap();
        sub.cancel();
        assert_eq!(store.test_subscriber_count(&path), 0);

        block_on(store.create(&path, NewQuestion::new("late").unwrap().fields())).unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1); // only the initial snapshot
    }

    #[test]
    fn offline_store_rejects_writes_and_subscriptions() {
        let store = MemStore::new();
        let path = CollectionPath::questions();
        store.set_offline(true);
        assert_eq!(
            block_on(store.create(&path, Fields::new())),
            Err(Error::Disconnected)
        );
        assert!(block_on(store.subscribe(Query::questions(), Box::new(|_| ()))).is_err());
        assert_eq!(store.test_doc_count(&path), 0);

        store.set_offline(false);
        assert!(block_on(store.create(&path, NewQuestion::new("back").unwrap().fields())).is_ok());
    }
}
