use std::rc::Rc;

use giron_client::{api::QuestionId, Board};
use yew::prelude::*;

use crate::ui;

#[derive(Clone, PartialEq, Properties)]
pub struct QuestionListProps {
    pub board: Rc<Board>,
    pub answer_draft: String,
    pub on_toggle: Callback<QuestionId>,
    pub on_answer_change: Callback<String>,
    pub on_submit_answer: Callback<QuestionId>,
}

#[function_component(QuestionList)]
pub fn question_list(p: &QuestionListProps) -> Html {
    p.board
        .questions
        .iter()
        .map(|q| {
            let expanded = p.board.is_expanded(q.id);
            html! {
                <ui::QuestionCard
                    key={ q.id.0.to_string() }
                    question={ q.clone() }
                    {expanded}
                    answers={ expanded.then(|| p.board.answers.clone()).unwrap_or_default() }
                    answer_draft={ p.answer_draft.clone() }
                    on_toggle={ p.on_toggle.clone() }
                    on_answer_change={ p.on_answer_change.clone() }
                    on_submit_answer={ p.on_submit_answer.clone() }
                />
            }
        })
        .collect()
}
