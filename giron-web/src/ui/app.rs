use std::{rc::Rc, sync::Arc};

use futures::channel::mpsc;
use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use giron_client::{
    api::{DocumentId, Error, QuestionId},
    post_answer, post_question, Board, BoardMsg, FeedManager,
};
use giron_mem_store::MemStore;

use crate::{feed, ui};

const KEY_QUESTION_DRAFT: &str = "question-draft";

#[derive(Clone, PartialEq)]
pub enum ConnState {
    Connected,
    Disconnected,
}

pub enum AppMsg {
    Feed(BoardMsg),
    ConnectionChanged(ConnState),

    ToggleQuestion(QuestionId),
    Toggled,

    QuestionDraftChanged(String),
    SubmitQuestion,
    QuestionPosted(Result<DocumentId, Error>),

    AnswerDraftChanged(String),
    SubmitAnswer(QuestionId),
    AnswerPosted(Result<DocumentId, Error>),

    StoreError(Error),
}

pub struct App {
    store: Arc<MemStore>,
    feeds: Rc<FeedManager<MemStore>>,
    board: Rc<Board>,
    conn: ConnState,
    last_error: Option<String>,
    question_draft: String,
    answer_draft: String,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let store = Arc::new(MemStore::new());
        let (deliveries, receiver) = mpsc::unbounded();
        let feeds = Rc::new(FeedManager::new(store.clone(), deliveries));

        spawn_local(feed::forward_deliveries(receiver, ctx.link().clone()));
        spawn_local(feed::run_root_feed(feeds.clone(), ctx.link().clone()));

        App {
            store,
            feeds,
            board: Rc::new(Board::stub()),
            conn: ConnState::Disconnected,
            last_error: None,
            question_draft: LocalStorage::get(KEY_QUESTION_DRAFT).unwrap_or_default(),
            answer_draft: String::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Feed(msg) => {
                Rc::make_mut(&mut self.board).apply(msg);
                true
            }
            AppMsg::ConnectionChanged(conn) => {
                self.conn = conn;
                true
            }
            AppMsg::ToggleQuestion(id) => {
                let feeds = self.feeds.clone();
                ctx.link().send_future(async move {
                    match feeds.toggle(id).await {
                        Ok(()) => AppMsg::Toggled,
                        Err(err) => AppMsg::StoreError(err),
                    }
                });
                false
            }
            // the board already re-rendered on the Expanded/Collapsed delivery
            AppMsg::Toggled => false,
            AppMsg::QuestionDraftChanged(text) => {
                LocalStorage::set(KEY_QUESTION_DRAFT, &text)
                    .expect("failed saving draft to LocalStorage");
                self.question_draft = text;
                true
            }
            AppMsg::SubmitQuestion => {
                let text = self.question_draft.clone();
                if text.trim().is_empty() {
                    tracing::debug!("ignoring empty question submission");
                    return false;
                }
                let store = self.store.clone();
                ctx.link().send_future(async move {
                    AppMsg::QuestionPosted(post_question(&*store, &text).await)
                });
                false
            }
            AppMsg::QuestionPosted(Ok(_)) => {
                // cleared on success only: a failed post keeps the draft for retry
                self.question_draft.clear();
                LocalStorage::delete(KEY_QUESTION_DRAFT);
                self.last_error = None;
                true
            }
            AppMsg::QuestionPosted(Err(err)) | AppMsg::AnswerPosted(Err(err)) => {
                self.last_error = Some(err.to_string());
                true
            }
            AppMsg::AnswerDraftChanged(text) => {
                self.answer_draft = text;
                true
            }
            AppMsg::SubmitAnswer(question) => {
                let text = self.answer_draft.clone();
                if text.trim().is_empty() {
                    tracing::debug!("ignoring empty answer submission");
                    return false;
                }
                let store = self.store.clone();
                ctx.link().send_future(async move {
                    AppMsg::AnswerPosted(post_answer(&*store, question, &text).await)
                });
                false
            }
            AppMsg::AnswerPosted(Ok(_)) => {
                self.answer_draft.clear();
                self.last_error = None;
                true
            }
            AppMsg::StoreError(err) => {
                self.last_error = Some(err.to_string());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                <ui::StoreBanner
                    connection_state={ self.conn.clone() }
                    last_error={ self.last_error.clone() }
                />
                <h1>{ "Discuss" }</h1>
                <ui::NewQuestionForm
                    draft={ self.question_draft.clone() }
                    on_change={ ctx.link().callback(AppMsg::QuestionDraftChanged) }
                    on_submit={ ctx.link().callback(|_| AppMsg::SubmitQuestion) }
                />
                <ui::FilterBar />
                <h2>{ "Recent Questions" }</h2>
                <ui::QuestionList
                    board={ self.board.clone() }
                    answer_draft={ self.answer_draft.clone() }
                    on_toggle={ ctx.link().callback(AppMsg::ToggleQuestion) }
                    on_answer_change={ ctx.link().callback(AppMsg::AnswerDraftChanged) }
                    on_submit_answer={ ctx.link().callback(AppMsg::SubmitAnswer) }
                />
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.feeds.teardown();
    }
}
