//! End-to-end harness: a client board wired to an in-memory store, with
//! deliveries pumped by hand so tests control exactly when they apply.

use std::sync::Arc;

use futures::channel::mpsc;
use giron_client::{Board, BoardMsg, FeedManager};
use giron_mem_store::MemStore;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub struct LiveBoard {
    pub store: Arc<MemStore>,
    pub feeds: FeedManager<MemStore>,
    pub board: Board,
    rx: mpsc::UnboundedReceiver<BoardMsg>,
}

impl LiveBoard {
    /// Builds the whole stack and starts the root feed, like the web app
    /// does on mount.
    pub async fn start() -> LiveBoard {
        init_logging();
        let store = Arc::new(MemStore::new());
        let (tx, rx) = mpsc::unbounded();
        let feeds = FeedManager::new(store.clone(), tx);
        let mut this = LiveBoard {
            store,
            feeds,
            board: Board::stub(),
            rx,
        };
        this.feeds.start_root().await.expect("starting root feed");
        this.pump();
        this
    }

    /// Applies every delivery queued so far to the view model
    pub fn pump(&mut self) {
        while let Ok(Some(msg)) = self.rx.try_next() {
            self.board.apply(msg);
        }
    }

    pub fn question_texts(&self) -> Vec<String> {
        self.board.questions.iter().map(|q| q.text.clone()).collect()
    }

    pub fn answer_texts(&self) -> Vec<String> {
        self.board.answers.iter().map(|a| a.text.clone()).collect()
    }
}
