use std::sync::Arc;

use giron_client::api::{Answer, Question, QuestionId};
use yew::prelude::*;

use crate::{ui, util};

#[derive(Clone, PartialEq, Properties)]
pub struct QuestionCardProps {
    pub question: Arc<Question>,
    pub expanded: bool,
    /// Empty unless this card is the expanded one
    pub answers: Vec<Arc<Answer>>,
    pub answer_draft: String,
    pub on_toggle: Callback<QuestionId>,
    pub on_answer_change: Callback<String>,
    pub on_submit_answer: Callback<QuestionId>,
}

#[function_component(QuestionCard)]
pub fn question_card(p: &QuestionCardProps) -> Html {
    let ontoggle = {
        let id = p.question.id;
        p.on_toggle.reform(move |_| id)
    };
    let thread = p.expanded.then(|| {
        html! {
            <ui::AnswerThread
                question={ p.question.id }
                answers={ p.answers.clone() }
                draft={ p.answer_draft.clone() }
                on_change={ p.on_answer_change.clone() }
                on_submit={ p.on_submit_answer.clone() }
            />
        }
    });
    html! {
        <div class="question-card">
            <h2 class="question-text">{ &p.question.text }</h2>
            // no accounts: the byline user and topic tags are static placeholders
            <p class="meta">{ format!("Posted by User123 on {}", util::format_time(&p.question.created_at)) }</p>
            <div class="tags">
                <span class="tag">{ "Dynamic Programming" }</span>
                <span class="tag">{ "Optimization" }</span>
            </div>
            <span class="toggle-replies" onclick={ontoggle}>
                { if p.expanded { "Hide Replies" } else { "View Replies" } }
            </span>
            { for thread }
        </div>
    }
}
