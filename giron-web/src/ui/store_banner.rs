use yew::prelude::*;

use crate::ui;

#[derive(Clone, PartialEq, Properties)]
pub struct StoreBannerProps {
    pub connection_state: ui::ConnState,
    pub last_error: Option<String>,
}

/// Transient banner for store trouble: setup retries and failed writes.
/// Failed writes keep the draft, so the user can simply retry.
#[function_component(StoreBanner)]
pub fn store_banner(p: &StoreBannerProps) -> Html {
    let message = match (&p.connection_state, &p.last_error) {
        (ui::ConnState::Disconnected, _) => Some(String::from("Store unreachable. Retrying...")),
        (_, Some(err)) => Some(format!("Something went wrong: {err}")),
        (ui::ConnState::Connected, None) => None,
    };

    html! {
        <div
            class={ classes!("store-banner", message.is_none().then(|| "is-hidden")) }
            aria-hidden={ if message.is_some() { "false" } else { "true" } }
        >
            { for message.map(|m| html! { <div>{ m }</div> }) }
        </div>
    }
}
