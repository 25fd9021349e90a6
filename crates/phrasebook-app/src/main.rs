use std::sync::Arc;

use clap::Parser;
use phrasebook_config::Config;
use phrasebook_types::{Language, PhraseEntry};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod controller;
mod events;
mod io;
mod profile;
mod render;
mod state;

#[cfg(test)]
mod tests;

use cli::{Cli, Command, LangArgs};
use controller::AppController;
use state::AppState;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = profile::load_config(cli.config.as_deref())?;
    init_tracing(&config);

    let state = Arc::new(AppState::build(config, cli.mock)?);
    tracing::debug!("Catalog loaded with {} phrases", state.router.index().len());

    match cli.command {
        Command::Translate { text, langs } => translate(&state, text, langs).await,
        Command::Batch { file, from, to } => batch(&state, &file, from, to).await,
        Command::Phrases { category } => {
            let index = state.router.index();
            match category {
                Some(category) => println!("{}", render::phrases(&index.by_category(category))),
                None => println!("{}", render::categories(&index.categories())),
            }
            Ok(())
        }
        Command::Similar { text, from, limit } => {
            let limit = limit.unwrap_or(state.config.matcher.suggestion_limit);
            let entries: Vec<PhraseEntry> = state
                .router
                .suggest(&text, from, limit)
                .into_iter()
                .map(|m| m.entry.clone())
                .collect();
            println!("{}", render::suggestions(&entries, from));
            Ok(())
        }
        Command::History { clear, stats } => history(&state, clear, stats).await,
        Command::Repl { langs } => repl(state, langs).await,
    }
}

async fn translate(state: &AppState, text: String, langs: LangArgs) -> anyhow::Result<()> {
    let result = state.router.translate(langs.request(text.clone())).await;

    match result {
        Ok(result) => {
            println!("{}", render::translation(&text, &result));
            state.history.write().await.record(&text, &result);
            state.save_history().await
        }
        Err(e) => {
            let source = if langs.auto {
                phrasebook_core::language::detect_pair(&text).0
            } else {
                langs.from
            };
            let suggestions: Vec<PhraseEntry> = state
                .router
                .suggest(&text, source, state.config.matcher.suggestion_limit)
                .into_iter()
                .map(|m| m.entry.clone())
                .collect();
            if !suggestions.is_empty() {
                println!("{}", render::suggestions(&suggestions, source));
            }
            Err(e.into())
        }
    }
}

async fn batch(
    state: &AppState,
    file: &std::path::Path,
    from: Language,
    to: Language,
) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(file).await?;
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let results = state.translate_batch(&lines, from, to).await?;
    for (_, result) in &results {
        println!("{}", render::batch_line(result));
    }
    println!("{}/{} translated", results.len(), lines.len());
    Ok(())
}

async fn history(state: &AppState, clear: bool, stats: bool) -> anyhow::Result<()> {
    if clear {
        state.history.write().await.clear();
        state.save_history().await?;
        println!("History cleared");
        return Ok(());
    }

    let history = state.history.read().await;
    if stats {
        println!("{}", render::stats(&history.stats(), &state.router.cache().stats()));
    } else {
        println!("{}", render::history(&history));
    }
    Ok(())
}

async fn repl(state: Arc<AppState>, langs: LangArgs) -> anyhow::Result<()> {
    let controller = AppController::new(state.clone());
    let mut tasks = controller.spawn_tasks(langs);
    let mut interrupted = false;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c(), if !interrupted => {
                tracing::info!("Shutdown requested");
                interrupted = true;
                controller.shutdown();
            }
            joined = tasks.join_next() => match joined {
                None => break,
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => {
                    tracing::error!("Task failed: {}", e);
                    controller.shutdown();
                }
                Some(Err(e)) => {
                    tracing::error!("Task panicked: {}", e);
                    controller.shutdown();
                }
            }
        }
    }

    state.save_history().await?;

    // A pending stdin read cannot be cancelled and would block runtime shutdown
    if interrupted {
        std::process::exit(0);
    }
    Ok(())
}
