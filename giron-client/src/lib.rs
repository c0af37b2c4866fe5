mod board;
pub use board::{Board, BoardMsg};

mod feed;
pub use feed::FeedManager;

mod posts;
pub use posts::{post_answer, post_question};

pub mod api {
    pub use giron_api::*;
}
