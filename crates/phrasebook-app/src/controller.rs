use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use phrasebook_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::cli::LangArgs;
use crate::events::event_loop;
use crate::io::{cache_sweeper, output_loop, stdin_watcher};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub input: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub output: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            input: kanal::bounded_async(64),
            output: kanal::bounded_async(256),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, langs: LangArgs) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            langs,
            self.cancel_token.clone(),
            self.channels.input.1.clone(),
            self.channels.output.0.clone(),
        ));

        tasks.spawn(output_loop(
            self.cancel_token.child_token(),
            self.channels.output.1.clone(),
        ));

        tasks.spawn(stdin_watcher(
            self.cancel_token.child_token(),
            self.channels.input.0.clone(),
            self.channels.output.0.clone(),
        ));

        if let Some(interval) = self.state.config.cache.sweep_interval() {
            tracing::debug!("Cache sweep every {:?}", interval);
            tasks.spawn(cache_sweeper(
                self.state.clone(),
                interval,
                self.cancel_token.child_token(),
            ));
        }

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
