use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use futures::channel::mpsc;

use crate::{
    api::{
        Answer, Document, Error, OnUpdate, Query, Question, QuestionId, Store, StoreSubscription,
    },
    BoardMsg,
};

/// Owns every live query: the root question-list feed plus at most one
/// answer feed (the expanded question's). Deliveries go out as [`BoardMsg`]
/// on the channel given at construction; the receiver applies them to a
/// [`Board`](crate::Board).
///
/// All state sits behind one lock so the manager can be driven from a
/// multi-threaded test runtime, even though a UI runs it single-threaded.
pub struct FeedManager<S> {
    store: Arc<S>,
    sender: mpsc::UnboundedSender<BoardMsg>,
    active: Arc<Mutex<ActiveFeeds>>,
}

impl<S> Clone for FeedManager<S> {
    fn clone(&self) -> Self {
        FeedManager {
            store: self.store.clone(),
            sender: self.sender.clone(),
            active: self.active.clone(),
        }
    }
}

#[derive(Default)]
struct ActiveFeeds {
    root: Option<LiveFeed>,
    answers: Option<(QuestionId, LiveFeed)>,
}

/// One live query. The slot is registered before the async subscribe
/// completes; `alive` doubles as the stale-callback guard and as the marker
/// that lets a superseded in-flight setup detect it lost.
struct LiveFeed {
    alive: Arc<AtomicBool>,
    sub: Option<StoreSubscription>,
}

impl LiveFeed {
    fn pending() -> (LiveFeed, Arc<AtomicBool>) {
        let alive = Arc::new(AtomicBool::new(true));
        (
            LiveFeed {
                alive: alive.clone(),
                sub: None,
            },
            alive,
        )
    }

    fn stop(mut self) {
        self.alive.store(false, Ordering::SeqCst);
        if let Some(sub) = self.sub.take() {
            sub.cancel();
        }
    }
}

fn decode<T>(
    docs: &[Document],
    parse: impl Fn(&Document) -> Result<T, Error>,
) -> Vec<T> {
    docs.iter()
        .filter_map(|d| match parse(d) {
            Ok(v) => Some(v),
            Err(err) => {
                tracing::warn!(?err, id = ?d.id, "dropping malformed document from delivery");
                None
            }
        })
        .collect()
}

impl<S: Store> FeedManager<S> {
    pub fn new(store: Arc<S>, sender: mpsc::UnboundedSender<BoardMsg>) -> FeedManager<S> {
        FeedManager {
            store,
            sender,
            active: Arc::new(Mutex::new(ActiveFeeds::default())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ActiveFeeds> {
        self.active.lock().expect("feed manager lock poisoned")
    }

    /// Begins the live query over the question list. Idempotent: while a root
    /// feed is active or still setting up, further calls do nothing, so no
    /// second underlying listener can leak. On setup failure the slot is
    /// cleared and the error returned for the caller to retry.
    pub async fn start_root(&self) -> Result<(), Error> {
        let alive = {
            let mut active = self.lock();
            if active.root.is_some() {
                tracing::debug!("root feed already active");
                return Ok(());
            }
            let (feed, alive) = LiveFeed::pending();
            active.root = Some(feed);
            alive
        };

        let sender = self.sender.clone();
        let flag = alive.clone();
        let on_update: OnUpdate = Box::new(move |docs| {
            if !flag.load(Ordering::SeqCst) {
                return;
            }
            let questions = decode(&docs, Question::from_document);
            let _ = sender.unbounded_send(BoardMsg::Questions(questions));
        });

        match self.store.subscribe(Query::questions(), on_update).await {
            Ok(sub) => {
                let mut active = self.lock();
                match &mut active.root {
                    Some(feed) if Arc::ptr_eq(&feed.alive, &alive) => feed.sub = Some(sub),
                    // torn down while the subscribe was in flight
                    _ => sub.cancel(),
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(?err, "root feed setup failed");
                let mut active = self.lock();
                if matches!(&active.root, Some(feed) if Arc::ptr_eq(&feed.alive, &alive)) {
                    active.root = None;
                }
                Err(err)
            }
        }
    }

    /// Collapses `question` if it is the expanded one, else expands it,
    /// cancelling whichever answer feed was active before. Last toggle wins:
    /// the slot is claimed before the async subscribe completes, so a
    /// superseded setup cancels its own subscription when it lands and its
    /// deliveries are dropped through the liveness flag.
    pub async fn toggle(&self, question: QuestionId) -> Result<(), Error> {
        let alive = {
            let mut active = self.lock();
            if matches!(&active.answers, Some((expanded, _)) if *expanded == question) {
                let (id, feed) = active.answers.take().expect("checked just above");
                feed.stop();
                let _ = self.sender.unbounded_send(BoardMsg::Collapsed(id));
                tracing::debug!(?id, "collapsed question");
                return Ok(());
            }
            if let Some((id, feed)) = active.answers.take() {
                tracing::debug!(?id, "cancelling previous answer feed");
                feed.stop();
            }
            let (feed, alive) = LiveFeed::pending();
            active.answers = Some((question, feed));
            let _ = self.sender.unbounded_send(BoardMsg::Expanded(question));
            alive
        };

        let sender = self.sender.clone();
        let flag = alive.clone();
        let on_update: OnUpdate = Box::new(move |docs| {
            if !flag.load(Ordering::SeqCst) {
                return;
            }
            let answers = decode(&docs, Answer::from_document);
            let _ = sender.unbounded_send(BoardMsg::Answers(question, answers));
        });

        match self.store.subscribe(Query::answers_of(question), on_update).await {
            Ok(sub) => {
                let mut active = self.lock();
                match &mut active.answers {
                    Some((_, feed)) if Arc::ptr_eq(&feed.alive, &alive) => feed.sub = Some(sub),
                    // a later toggle or teardown won the race
                    _ => sub.cancel(),
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(?err, ?question, "answer feed setup failed");
                let mut active = self.lock();
                if matches!(&active.answers, Some((_, feed)) if Arc::ptr_eq(&feed.alive, &alive)) {
                    active.answers = None;
                    let _ = self.sender.unbounded_send(BoardMsg::Collapsed(question));
                }
                Err(err)
            }
        }
    }

    /// Stops the root feed and any active answer feed. Idempotent no-op once
    /// everything is already stopped.
    pub fn teardown(&self) {
        let mut active = self.lock();
        if let Some(feed) = active.root.take() {
            feed.stop();
        }
        if let Some((id, feed)) = active.answers.take() {
            feed.stop();
            let _ = self.sender.unbounded_send(BoardMsg::Collapsed(id));
        }
    }

    /// The question whose answer feed is currently active (or being set up)
    pub fn active_answer_feed(&self) -> Option<QuestionId> {
        self.lock().answers.as_ref().map(|(id, _)| *id)
    }

    pub fn root_feed_active(&self) -> bool {
        self.lock().root.is_some()
    }
}
