use std::sync::Arc;

use giron_client::api::{Answer, QuestionId};
use yew::prelude::*;

use crate::util;

#[derive(Clone, PartialEq, Properties)]
pub struct AnswerThreadProps {
    pub question: QuestionId,
    /// Oldest first
    pub answers: Vec<Arc<Answer>>,
    pub draft: String,
    pub on_change: Callback<String>,
    pub on_submit: Callback<QuestionId>,
}

#[function_component(AnswerThread)]
pub fn answer_thread(p: &AnswerThreadProps) -> Html {
    let onsubmit = {
        let question = p.question;
        let on_submit = p.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(question);
        })
    };
    let oninput = p.on_change.reform(|e: InputEvent| {
        let elt: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
        elt.value()
    });
    let cards = p.answers.iter().enumerate().map(|(i, a)| {
        html! {
            <div class="answer-card" key={ a.id.0.to_string() }>
                <div class="answer-header">
                    // no accounts: position in the thread stands in for a username
                    <span class="answer-username">{ format!("User{}", i + 1) }</span>
                    <span class="answer-timestamp">{ util::format_time(&a.created_at) }</span>
                </div>
                <p class="answer-text">{ &a.text }</p>
            </div>
        }
    });
    html! {
        <div class="answer-thread">
            <form class="answer-form" {onsubmit}>
                <textarea
                    placeholder="Write your answer here..."
                    value={ p.draft.clone() }
                    rows="2"
                    {oninput}
                />
                <button type="submit">{ "Submit Answer" }</button>
            </form>
            { for cards }
        </div>
    }
}
