mod answer_thread;
pub use answer_thread::AnswerThread;

mod app;
pub use app::{App, AppMsg, ConnState};

mod filter_bar;
pub use filter_bar::FilterBar;

mod new_question_form;
pub use new_question_form::NewQuestionForm;

mod question_card;
pub use question_card::QuestionCard;

mod question_list;
pub use question_list::QuestionList;

mod store_banner;
pub use store_banner::StoreBanner;
