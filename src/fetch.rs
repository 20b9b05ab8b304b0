use crate::{catalog::CatalogClient, types::AppEvent};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Only the first page is ever requested.
pub const FIRST_PAGE: u32 = 1;

/// Fetch the first page once and report the outcome to the screen.
///
/// Exactly one event is sent. If the screen has gone away the channel is
/// closed and the result is dropped.
pub async fn run_initial_fetch<C>(client: &C, page_size: u32, tx: UnboundedSender<AppEvent>)
where
    C: CatalogClient + ?Sized,
{
    let event = match client.fetch_page(FIRST_PAGE, page_size).await {
        Ok(cards) => AppEvent::CardsLoaded(cards),
        Err(e) => {
            log::error!("[fetch] initial fetch failed: {e}");
            AppEvent::FetchFailed(e.to_string())
        }
    };

    if tx.send(event).is_err() {
        log::debug!("[fetch] screen already torn down, dropping result");
    }
}

/// Spawn the single fetch-on-mount task on the current runtime.
pub fn spawn_initial_fetch(
    client: Arc<dyn CatalogClient>,
    page_size: u32,
    tx: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move { run_initial_fetch(client.as_ref(), page_size, tx).await })
}
