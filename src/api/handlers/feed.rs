use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use crate::state::AppState;
use futures::{Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::BroadcastStream;

/// Server-sent change feed over the slot table. Clients re-fetch the
/// slot list when an event arrives; the payload identifies the changed
/// row for clients that prefer to apply a delta.
pub async fn slot_feed(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.notifier.subscribe();

    let stream = BroadcastStream::new(receiver).filter_map(|change| async move {
        match change {
            Ok(change) => {
                let data = serde_json::to_string(&change).ok()?;
                Some(Ok(Event::default().event("slot_change").data(data)))
            }
            // A lagged subscriber resumes at the next event; it re-reads
            // the list from storage either way.
            Err(_) => None,
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
