use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct NewQuestionFormProps {
    pub draft: String,
    pub on_change: Callback<String>,
    pub on_submit: Callback<()>,
}

#[function_component(NewQuestionForm)]
pub fn new_question_form(p: &NewQuestionFormProps) -> Html {
    let onsubmit = {
        let on_submit = p.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };
    let oninput = p.on_change.reform(|e: InputEvent| {
        let elt: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
        elt.value()
    });
    html! {
        <div class="question-form">
            <h2>{ "Ask a Question" }</h2>
            <form {onsubmit}>
                <textarea
                    placeholder="Post your question here..."
                    value={ p.draft.clone() }
                    rows="3"
                    {oninput}
                />
                <button type="submit">{ "Post Question" }</button>
            </form>
        </div>
    }
}
