use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use phrasebook_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::cli::LangArgs;
use crate::render;
use crate::state::AppState;

pub mod text_input;

use text_input::handle_text_input;

/// App's main loop, returns once `Quit` arrives or the input side hangs up
pub async fn event_loop(
    state: Arc<AppState>,
    langs: LangArgs,
    cancel: CancellationToken,
    input_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::debug!("Event loop started");
    loop {
        let event = tokio::select! {
            event = input_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
            _ = cancel.cancelled() => break,
        };

        tracing::trace!("Event received: {:?}", std::mem::discriminant(&event));
        if !handle_events(&state, langs, &cancel, &output_tx, event).await? {
            break;
        }
    }

    tracing::debug!("Event loop stopping");
    Ok(())
}

/// Returns false when the loop should stop
async fn handle_events(
    state: &AppState,
    langs: LangArgs,
    cancel: &CancellationToken,
    output_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::TextInput(text) => {
            tracing::debug!("Text input: {} chars", text.chars().count());
            handle_text_input(state, text, langs, cancel, output_tx).await?;
        }
        AppEvent::ShowHistory => {
            let text = render::history(&*state.history.read().await);
            output_tx.send(AppEvent::ShowMessage(text)).await?;
        }
        AppEvent::ShowStats => {
            let history = state.history.read().await.stats();
            let text = render::stats(&history, &state.router.cache().stats());
            output_tx.send(AppEvent::ShowMessage(text)).await?;
        }
        AppEvent::ClearCache => {
            state.router.cache().clear();
            tracing::info!("Translation cache cleared");
            output_tx
                .send(AppEvent::ShowMessage("Cache cleared".to_string()))
                .await?;
        }
        AppEvent::Quit => {
            cancel.cancel();
            return Ok(false);
        }
        AppEvent::ShowTranslation { .. }
        | AppEvent::ShowSuggestions { .. }
        | AppEvent::ShowMessage(_)
        | AppEvent::ShowError(_) => {
            // Output-only events, nothing to do here
        }
    }

    Ok(true)
}
