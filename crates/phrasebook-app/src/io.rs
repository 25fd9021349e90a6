use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use phrasebook_types::AppEvent;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::render;
use crate::state::AppState;

const PROMPT: &str = "> ";

pub const HELP: &str = "Type a phrase to translate. Commands: :history :stats :clear-cache :quit";

/// Map one stdin line to an event. `Ok(None)` for blank lines,
/// `Err` for unknown `:` commands.
pub fn parse_line(line: &str) -> Result<Option<AppEvent>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let event = match line {
        ":history" | ":h" => AppEvent::ShowHistory,
        ":stats" => AppEvent::ShowStats,
        ":clear-cache" => AppEvent::ClearCache,
        ":quit" | ":q" | ":exit" => AppEvent::Quit,
        cmd if cmd.starts_with(':') => return Err(format!("Unknown command: {cmd}")),
        text => AppEvent::TextInput(text.to_string()),
    };
    Ok(Some(event))
}

fn interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

fn prompt() {
    if interactive() {
        print!("{PROMPT}");
        let _ = std::io::stdout().flush();
    }
}

/// Read stdin lines until EOF or cancellation
pub async fn stdin_watcher(
    cancel: CancellationToken,
    input_tx: AsyncSender<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if interactive() {
        println!("{HELP}");
    }
    prompt();

    line_watcher(BufReader::new(tokio::io::stdin()), cancel, input_tx, output_tx).await
}

/// Turn each line of `reader` into an event. EOF sends `Quit`.
pub async fn line_watcher<R: AsyncBufRead + Unpin>(
    reader: R,
    cancel: CancellationToken,
    input_tx: AsyncSender<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = cancel.cancelled() => {
                tracing::debug!("Line watcher stopping");
                return Ok(());
            }
        };

        let Some(line) = line else {
            tracing::debug!("Input closed");
            input_tx.send(AppEvent::Quit).await?;
            return Ok(());
        };

        match parse_line(&line) {
            Ok(Some(event)) => {
                let quit = matches!(event, AppEvent::Quit);
                input_tx.send(event).await?;
                if quit {
                    return Ok(());
                }
            }
            Ok(None) => prompt(),
            Err(message) => output_tx.send(AppEvent::ShowError(message)).await?,
        }
    }
}

/// Print everything the event loop produces. Queued events are still
/// printed after cancellation.
pub async fn output_loop(
    cancel: CancellationToken,
    output_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        let event = tokio::select! {
            biased;
            event = output_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
            _ = cancel.cancelled() => break,
        };

        match event {
            AppEvent::ShowTranslation {
                source_text,
                result,
            } => println!("{}", render::translation(&source_text, &result)),
            AppEvent::ShowSuggestions {
                source_lang,
                entries,
            } => println!("{}", render::suggestions(&entries, source_lang)),
            AppEvent::ShowMessage(message) => println!("{message}"),
            AppEvent::ShowError(message) => eprintln!("Error: {message}"),
            other => {
                tracing::trace!("Ignoring {:?} on the output side", std::mem::discriminant(&other));
                continue;
            }
        }
        prompt();
    }

    tracing::debug!("Output loop stopping");
    Ok(())
}

/// Periodically drop expired cache entries
pub async fn cache_sweeper(
    state: Arc<AppState>,
    interval: Duration,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = state.router.cache().purge_expired();
                if removed > 0 {
                    tracing::debug!("Cache sweep removed {} expired entries", removed);
                }
            }
            _ = cancel.cancelled() => {
                tracing::debug!("Cache sweeper stopping");
                return Ok(());
            }
        }
    }
}
