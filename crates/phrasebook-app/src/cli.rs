use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use phrasebook_types::{Language, PhraseCategory};

#[derive(Debug, Parser)]
#[command(name = "phrasebook", version, about = "Chinese/Korean travel phrasebook with online fallback")]
pub struct Cli {
    /// JSON config file (defaults to ./config.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the mock translator instead of the remote provider
    #[arg(long, short = 'm', global = true)]
    pub mock: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate one piece of text
    Translate {
        text: String,
        #[command(flatten)]
        langs: LangArgs,
    },
    /// Translate every non-empty line of a file
    Batch {
        file: PathBuf,
        #[arg(long, default_value = "zh")]
        from: Language,
        #[arg(long, default_value = "ko")]
        to: Language,
    },
    /// List catalog phrases
    Phrases {
        #[arg(long, short)]
        category: Option<PhraseCategory>,
    },
    /// Catalog phrases resembling the given text
    Similar {
        text: String,
        #[arg(long, default_value = "zh")]
        from: Language,
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Show or clear the translation history
    History {
        #[arg(long)]
        clear: bool,
        #[arg(long)]
        stats: bool,
    },
    /// Interactive session reading lines from stdin
    Repl {
        #[command(flatten)]
        langs: LangArgs,
    },
}

#[derive(Debug, Clone, Copy, Args)]
pub struct LangArgs {
    #[arg(long, default_value = "zh")]
    pub from: Language,
    #[arg(long, default_value = "ko")]
    pub to: Language,
    /// Detect the source language from the text
    #[arg(long)]
    pub auto: bool,
}
