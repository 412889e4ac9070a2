use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bbscope")]
#[command(about = "Local-first bug-bounty scope aggregator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory holding the SQLite store and config.toml.
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Poll configured platforms and record scope changes")]
    Poll {
        /// Restrict the cycle to a single platform (hackerone, bugcrowd, intigriti, yeswehack, immunefi).
        #[arg(long)]
        platform: Option<String>,

        #[arg(long, default_value = "5")]
        concurrency: usize,

        /// Skip the AI normalization overlay even if configured.
        #[arg(long)]
        no_ai: bool,
    },

    #[command(about = "List current scope entries")]
    List {
        #[arg(long)]
        platform: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        in_scope_only: bool,
    },

    #[command(about = "Search current scope entries by substring")]
    Search { query: String },

    #[command(about = "Show recent scope changes")]
    Changes {
        #[arg(short = 'n', long, default_value = "20")]
        n: usize,
    },

    #[command(about = "Show store-wide statistics")]
    Stats,

    #[command(about = "Ignore (or unignore) programs matching a URL pattern")]
    Ignore {
        pattern: String,

        /// Clear the ignored flag instead of setting it.
        #[arg(long)]
        unignore: bool,
    },
}
