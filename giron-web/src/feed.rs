use std::rc::Rc;

use futures::StreamExt;
use futures::channel::mpsc;
use giron_client::{BoardMsg, FeedManager};
use giron_mem_store::MemStore;

use crate::ui;

// Space each root-feed setup attempt by ATTEMPT_SPACING
const ATTEMPT_SPACING_SECS: u64 = 1;

/// Relays subscription deliveries into the component message queue, so the
/// view model mutates only inside `App::update`.
pub async fn forward_deliveries(
    mut deliveries: mpsc::UnboundedReceiver<BoardMsg>,
    scope: yew::html::Scope<ui::App>,
) {
    while let Some(msg) = deliveries.next().await {
        scope.send_message(ui::AppMsg::Feed(msg));
    }
    tracing::debug!("delivery channel closed");
}

/// Starts the question-list feed, retrying with spacing until setup
/// succeeds. Failures surface through the store banner in the meantime.
pub async fn run_root_feed(feeds: Rc<FeedManager<MemStore>>, scope: yew::html::Scope<ui::App>) {
    loop {
        match feeds.start_root().await {
            Ok(()) => {
                scope.send_message(ui::AppMsg::ConnectionChanged(ui::ConnState::Connected));
                return;
            }
            Err(err) => {
                tracing::warn!(?err, "root feed setup failed, retrying");
                scope.send_message(ui::AppMsg::ConnectionChanged(ui::ConnState::Disconnected));
                sleep_for(std::time::Duration::from_secs(ATTEMPT_SPACING_SECS)).await;
            }
        }
    }
}

async fn sleep_for(d: std::time::Duration) {
    wasm_timer::Delay::new(d).await.expect("failed sleeping")
}
