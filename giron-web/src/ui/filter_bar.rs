use yew::prelude::*;

// "Popular" is an inert placeholder: there is no ranking behind it
#[function_component(FilterBar)]
pub fn filter_bar() -> Html {
    html! {
        <div class="filters">
            <button type="button" class="filter-button active">{ "Recent" }</button>
            <button type="button" class="filter-button" disabled=true>{ "Popular" }</button>
        </div>
    }
}
